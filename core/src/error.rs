//! Error types for the subway API client.
//!
//! # Design
//! Nothing is recovered inside the client. Transport failures are wrapped
//! once and keep the original error as `source`. A body that is not JSON
//! surfaces as `Parse`, and a payload that cannot become a JSON object
//! surfaces as `Serialization` before any request is issued.

use std::error::Error;
use std::fmt;

use thiserror::Error;

pub type BoxError = Box<dyn Error + Send + Sync>;

/// Errors returned by request helpers and endpoint namespaces.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The transport could not complete the exchange (network, DNS, reset).
    #[error("transport: {0}")]
    Transport(#[from] TransportError),

    /// The response body is not valid JSON.
    #[error("response body is not valid JSON: {0}")]
    Parse(#[source] serde_json::Error),

    /// The request payload could not be serialized into a JSON object.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

/// Failure raised by a `Transport` implementation.
///
/// Holds the underlying error untouched so callers can downcast it.
#[derive(Debug)]
pub struct TransportError(BoxError);

impl TransportError {
    pub fn new(e: impl Into<BoxError>) -> Self {
        Self(e.into())
    }

    pub fn get_ref(&self) -> &(dyn Error + Send + Sync + 'static) {
        &*self.0
    }

    pub fn into_inner(self) -> BoxError {
        self.0
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Error for TransportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&*self.0)
    }
}

impl From<ureq::Error> for TransportError {
    fn from(e: ureq::Error) -> Self {
        Self::new(e)
    }
}
