//! Method-config builders.
//!
//! # Design
//! `Method` is closed: each variant maps to exactly one `RequestConfig`
//! shape. There is no `Get` variant because request helpers issue an
//! implicit GET when no config is supplied.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::ApiError;
use crate::http::{HttpMethod, RequestConfig};

/// JSON object sent as a POST body.
///
/// Built by copying a caller's value; the original is only borrowed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Payload(Map<String, Value>);

impl Payload {
    /// Copy `value` into a JSON object.
    ///
    /// `null` becomes the empty object. Any other non-object value, or a
    /// `Serialize` impl that fails, returns `ApiError::Serialization`.
    pub fn from_serialize<T: Serialize + ?Sized>(value: &T) -> Result<Self, ApiError> {
        match serde_json::to_value(value).map_err(|e| ApiError::Serialization(e.to_string()))? {
            Value::Object(map) => Ok(Self(map)),
            Value::Null => Ok(Self::default()),
            other => Err(ApiError::Serialization(format!(
                "payload must be a JSON object, got {}",
                kind_of(&other)
            ))),
        }
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for Payload {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Verb-specific request conventions.
#[derive(Debug, Clone, PartialEq)]
pub enum Method {
    Put,
    Delete,
    Post(Payload),
}

impl Method {
    /// `Method::Post` with a copy of `payload`.
    pub fn post<T: Serialize + ?Sized>(payload: &T) -> Result<Self, ApiError> {
        Payload::from_serialize(payload).map(Method::Post)
    }

    /// Build the transport config for this verb.
    pub fn config(&self) -> Result<RequestConfig, ApiError> {
        match self {
            Method::Put => Ok(RequestConfig::bare(HttpMethod::Put)),
            Method::Delete => Ok(RequestConfig::bare(HttpMethod::Delete)),
            Method::Post(payload) => {
                let body = serde_json::to_string(payload.as_map())
                    .map_err(|e| ApiError::Serialization(e.to_string()))?;
                Ok(RequestConfig {
                    method: HttpMethod::Post,
                    headers: vec![("Content-Type".to_string(), "application/json".to_string())],
                    body: Some(body),
                })
            }
        }
    }
}
