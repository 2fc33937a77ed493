//! `path` endpoint namespace.

use serde_json::Value;

use crate::error::ApiError;
use crate::request::request_with_json_data;
use crate::transport::Transport;
use crate::types::PathQuery;

/// Path search between two stations, borrowed from an `Api`.
pub struct PathApi<'a, T: ?Sized> {
    transport: &'a T,
}

impl<'a, T: Transport + ?Sized> PathApi<'a, T> {
    pub fn new(transport: &'a T) -> Self {
        Self { transport }
    }

    /// `GET /paths?source=..&target=..&pathType=..`
    ///
    /// Parameters are not escaped.
    pub async fn find(&self, query: &PathQuery) -> Result<Value, ApiError> {
        request_with_json_data(self.transport, &find_uri(query), None).await
    }
}

fn find_uri(query: &PathQuery) -> String {
    format!(
        "/paths?source={}&target={}&pathType={}",
        query.source, query.target, query.path_type
    )
}
