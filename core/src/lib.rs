//! Asynchronous client for the subway service API.
//!
//! # Overview
//! Callers go through the `Api` façade (`api.line()`, `api.path()`) instead
//! of assembling fetch configuration by hand. Every call is a single
//! request/response exchange over an injected `Transport`.
//!
//! # Design
//! - `Method` is a closed set of verb builders producing a `RequestConfig`;
//!   an absent config is an implicit GET.
//! - `request` returns the transport's response untouched;
//!   `request_with_json_data` additionally parses the body as JSON without
//!   looking at the status code.
//! - Errors are never recovered here. Transport, parse and serialization
//!   failures reach the caller as `ApiError`.
//! - No state survives between calls, so calls may be issued concurrently.

pub mod api;
pub mod error;
pub mod http;
pub mod line;
pub mod method;
pub mod path;
pub mod request;
pub mod transport;
pub mod types;

#[cfg(test)]
mod test_support;

pub use api::Api;
pub use error::{ApiError, TransportError};
pub use http::{HttpMethod, RawResponse, RequestConfig};
pub use line::LineApi;
pub use method::{Method, Payload};
pub use path::PathApi;
pub use request::{request, request_with_json_data};
pub use transport::{Transport, UreqTransport, DEFAULT_BODY_LIMIT};
pub use types::{LineSaveRequest, PathQuery};
