//! HTTP values exchanged with a `Transport`.
//!
//! # Design
//! Requests and responses are plain data. Builders in `method` produce a
//! `RequestConfig`; a `Transport` turns a URI plus optional config into a
//! `RawResponse`. Owned `String` / `Vec` fields keep the values independent
//! of whichever HTTP library executes them.

use std::borrow::Cow;

use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// HTTP method carried by a `RequestConfig`.
///
/// A request issued without a config is an implicit `Get`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// Verb, headers and body handed to the transport alongside a URI.
///
/// `headers` is non-empty exactly when `body` is present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestConfig {
    pub method: HttpMethod,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl RequestConfig {
    /// A config with only a method: no headers, no body.
    pub fn bare(method: HttpMethod) -> Self {
        Self {
            method,
            headers: Vec::new(),
            body: None,
        }
    }
}

/// A response exactly as the transport returned it.
///
/// Status codes are not interpreted here; callers of `request` decide what a
/// given status means. The body is kept as raw bytes.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl RawResponse {
    /// Parse the body as JSON, regardless of `status`.
    ///
    /// Bytes that are not UTF-8 are a `Parse` error like any other invalid JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        serde_json::from_slice(&self.body).map_err(ApiError::Parse)
    }

    /// Body as text, with invalid UTF-8 replaced by U+FFFD.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    /// First header value matching `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
