//! Request-side DTOs for the subway API.
//!
//! Response shapes are owned by the server and returned as opaque
//! `serde_json::Value`s, so only what the client sends is typed here.

use serde::{Deserialize, Serialize};

/// Payload for creating a line together with its first section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LineSaveRequest {
    pub name: String,
    pub color: String,
    pub up_station_id: i64,
    pub down_station_id: i64,
    pub distance: u32,
    #[serde(default)]
    pub extra_fare: u32,
}

/// Parameters of a path search.
///
/// Values are interpolated into the query string as-is; anything needing
/// URI escaping must be escaped by the caller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PathQuery {
    pub source: String,
    pub target: String,
    pub path_type: String,
}

impl PathQuery {
    pub fn new(
        source: impl Into<String>,
        target: impl Into<String>,
        path_type: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            path_type: path_type.into(),
        }
    }
}
