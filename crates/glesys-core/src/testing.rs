//! In-memory sender double.
//!
//! [`CannedSender`] answers every request with the same status and body and
//! remembers what it was asked to send, so services can be exercised through
//! the real request builder and executor without a network.

use crate::request::OutboundRequest;
use crate::transport::{HttpSender, RawResponse};
use crate::TransportError;
use async_trait::async_trait;
use bytes::Bytes;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Sender returning a fixed response, keeping the last request and a count.
#[derive(Debug)]
pub struct CannedSender {
    outcome: std::result::Result<RawResponse, TransportError>,
    last: Mutex<Option<OutboundRequest>>,
    count: AtomicUsize,
}

impl CannedSender {
    /// Answer every request with `status` and `body`.
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            outcome: Ok(RawResponse::new(status, body)),
            last: Mutex::new(None),
            count: AtomicUsize::new(0),
        }
    }

    /// Answer every request with status 200 and `body`.
    pub fn ok(body: impl Into<Bytes>) -> Self {
        Self::new(200, body)
    }

    /// Fail every request with `error`.
    #[must_use]
    pub fn failing(error: TransportError) -> Self {
        Self {
            outcome: Err(error),
            last: Mutex::new(None),
            count: AtomicUsize::new(0),
        }
    }

    /// The most recent request, if any.
    #[must_use]
    pub fn last_request(&self) -> Option<OutboundRequest> {
        self.last.lock().ok().and_then(|last| last.clone())
    }

    /// Number of requests received so far.
    #[must_use]
    pub fn request_count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    /// Decode the JSON body of the most recent request.
    #[must_use]
    pub fn last_body(&self) -> Option<serde_json::Value> {
        self.last_request()
            .and_then(|request| request.body)
            .and_then(|body| serde_json::from_slice(&body).ok())
    }
}

#[async_trait]
impl HttpSender for CannedSender {
    async fn send(
        &self,
        request: OutboundRequest,
    ) -> std::result::Result<RawResponse, TransportError> {
        self.count.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last.lock() {
            *last = Some(request);
        }
        self.outcome.clone()
    }
}
