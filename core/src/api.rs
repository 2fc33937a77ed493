//! Façade aggregating every endpoint namespace.
//!
//! # Design
//! `Api` owns the injected transport and hands out namespace handles that
//! borrow it. A new namespace is a new module plus one accessor here.

use crate::line::LineApi;
use crate::path::PathApi;
use crate::transport::{Transport, UreqTransport};

/// Entry point of the client: `api.line()` and `api.path()`.
#[derive(Clone)]
pub struct Api<T> {
    transport: T,
}

impl<T: Transport> Api<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn line(&self) -> LineApi<'_, T> {
        LineApi::new(&self.transport)
    }

    pub fn path(&self) -> PathApi<'_, T> {
        PathApi::new(&self.transport)
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}

impl Api<UreqTransport> {
    /// Client backed by the bundled `ureq` transport.
    pub fn connect(base_url: &str) -> Self {
        Self::new(UreqTransport::new(base_url))
    }
}
