//! Recording `Transport` double for unit tests.

use std::io;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::TransportError;
use crate::http::{RawResponse, RequestConfig};
use crate::transport::Transport;

pub(crate) type Call = (String, Option<RequestConfig>);

enum Reply {
    Fixed { status: u16, body: Vec<u8> },
    Fail { kind: io::ErrorKind, message: &'static str },
    /// Respond with `{"uri": <requested uri>}` after yielding once.
    Echo,
}

pub(crate) struct RecordingTransport {
    reply: Reply,
    calls: Mutex<Vec<Call>>,
}

impl RecordingTransport {
    fn with(reply: Reply) -> Self {
        Self {
            reply,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn responding(status: u16, body: &str) -> Self {
        Self::with(Reply::Fixed {
            status,
            body: body.as_bytes().to_vec(),
        })
    }

    pub(crate) fn failing(kind: io::ErrorKind, message: &'static str) -> Self {
        Self::with(Reply::Fail { kind, message })
    }

    pub(crate) fn echoing() -> Self {
        Self::with(Reply::Echo)
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn fetch(
        &self,
        uri: &str,
        config: Option<&RequestConfig>,
    ) -> Result<RawResponse, TransportError> {
        self.calls
            .lock()
            .unwrap()
            .push((uri.to_string(), config.cloned()));

        match &self.reply {
            Reply::Fixed { status, body } => Ok(RawResponse {
                status: *status,
                headers: Vec::new(),
                body: body.clone(),
            }),
            Reply::Fail { kind, message } => {
                Err(TransportError::new(io::Error::new(*kind, *message)))
            }
            Reply::Echo => {
                tokio::task::yield_now().await;
                Ok(RawResponse {
                    status: 200,
                    headers: Vec::new(),
                    body: serde_json::json!({ "uri": uri }).to_string().into_bytes(),
                })
            }
        }
    }
}
