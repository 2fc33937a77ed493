//! Injectable fetch primitive.
//!
//! # Design
//! The client never reaches for an ambient HTTP capability. Everything goes
//! through a `Transport` supplied by the caller, so tests can substitute a
//! recording double and applications can bring their own HTTP library.
//! `UreqTransport` is the bundled implementation.

use async_trait::async_trait;

use crate::error::TransportError;
use crate::http::{HttpMethod, RawResponse, RequestConfig};

/// Minimal async fetch: a URI plus optional config in, a raw response out.
///
/// A `None` config means an implicit GET with no headers and no body.
/// Implementations must return non-2xx responses as `Ok`; only failures to
/// complete the exchange are `Err`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn fetch(
        &self,
        uri: &str,
        config: Option<&RequestConfig>,
    ) -> Result<RawResponse, TransportError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    async fn fetch(
        &self,
        uri: &str,
        config: Option<&RequestConfig>,
    ) -> Result<RawResponse, TransportError> {
        (**self).fetch(uri, config).await
    }
}

/// Largest response body `UreqTransport` reads by default: 64 MiB.
pub const DEFAULT_BODY_LIMIT: u64 = 64 * 1024 * 1024;

/// Blocking `ureq` agent driven from `tokio::task::spawn_blocking`.
///
/// Relative URIs such as `/lines/details` are resolved against `base_url`.
/// Polling `fetch` outside a tokio runtime fails with a `TransportError`.
#[derive(Clone)]
pub struct UreqTransport {
    base_url: String,
    agent: ureq::Agent,
    body_limit: u64,
}

impl UreqTransport {
    pub fn new(base_url: &str) -> Self {
        // Statuses are data for the caller, not transport failures.
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            agent,
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }

    /// Cap on response body size; larger bodies fail as `TransportError`.
    pub fn with_body_limit(mut self, limit: u64) -> Self {
        self.body_limit = limit;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn resolve(&self, uri: &str) -> String {
        if uri.starts_with("http://") || uri.starts_with("https://") {
            uri.to_string()
        } else {
            format!("{}{uri}", self.base_url)
        }
    }
}

#[async_trait]
impl Transport for UreqTransport {
    async fn fetch(
        &self,
        uri: &str,
        config: Option<&RequestConfig>,
    ) -> Result<RawResponse, TransportError> {
        let runtime = tokio::runtime::Handle::try_current().map_err(TransportError::new)?;
        let agent = self.agent.clone();
        let url = self.resolve(uri);
        let config = config.cloned();
        let body_limit = self.body_limit;

        runtime
            .spawn_blocking(move || execute(&agent, &url, config, body_limit))
            .await
            .map_err(TransportError::new)?
    }
}

fn execute(
    agent: &ureq::Agent,
    url: &str,
    config: Option<RequestConfig>,
    body_limit: u64,
) -> Result<RawResponse, TransportError> {
    let config = config.unwrap_or_else(|| RequestConfig::bare(HttpMethod::Get));

    let mut response = match config.method {
        HttpMethod::Get => with_headers(agent.get(url), &config.headers).call(),
        HttpMethod::Delete => with_headers(agent.delete(url), &config.headers).call(),
        HttpMethod::Post => {
            let req = with_headers(agent.post(url), &config.headers);
            match config.body {
                Some(body) => req.send(body.as_bytes()),
                None => req.send_empty(),
            }
        }
        HttpMethod::Put => {
            let req = with_headers(agent.put(url), &config.headers);
            match config.body {
                Some(body) => req.send(body.as_bytes()),
                None => req.send_empty(),
            }
        }
    }?;

    let status = response.status().as_u16();
    let headers = header_pairs(response.headers());
    let body = response
        .body_mut()
        .with_config()
        .limit(body_limit)
        .read_to_vec()?;

    Ok(RawResponse {
        status,
        headers,
        body,
    })
}

/// Every header, in order. Non-UTF-8 bytes in a value become U+FFFD.
fn header_pairs(headers: &ureq::http::HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|(name, value)| {
            let value = String::from_utf8_lossy(value.as_bytes()).into_owned();
            (name.as_str().to_string(), value)
        })
        .collect()
}

fn with_headers<B>(
    mut req: ureq::RequestBuilder<B>,
    headers: &[(String, String)],
) -> ureq::RequestBuilder<B> {
    for (name, value) in headers {
        req = req.header(name.as_str(), value.as_str());
    }
    req
}
