//! `line` endpoint namespace.

use serde_json::Value;

use crate::error::ApiError;
use crate::http::RawResponse;
use crate::method::Method;
use crate::request::{request, request_with_json_data};
use crate::transport::Transport;
use crate::types::LineSaveRequest;

/// Operations on subway lines, borrowed from an `Api`.
pub struct LineApi<'a, T: ?Sized> {
    transport: &'a T,
}

impl<'a, T: Transport + ?Sized> LineApi<'a, T> {
    pub fn new(transport: &'a T) -> Self {
        Self { transport }
    }

    /// `GET /lines/details`: every line with its stations.
    pub async fn get_all_details(&self) -> Result<Value, ApiError> {
        request_with_json_data(self.transport, "/lines/details", None).await
    }

    /// `POST /lines`. The server answers 201 with a `Location` header.
    pub async fn create(&self, line: &LineSaveRequest) -> Result<RawResponse, ApiError> {
        let config = Method::post(line)?.config()?;
        request(self.transport, "/lines", Some(&config)).await
    }

    /// `DELETE /lines/{id}`. The server answers 204.
    pub async fn delete(&self, id: i64) -> Result<RawResponse, ApiError> {
        let config = Method::Delete.config()?;
        request(self.transport, &format!("/lines/{id}"), Some(&config)).await
    }
}
