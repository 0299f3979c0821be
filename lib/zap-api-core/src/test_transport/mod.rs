//! In-memory [`Transport`] for testing code built on the ZAP client.
//!
//! [`StubTransport`] records every request it receives and answers with
//! scripted replies, so the endpoint proxies can be exercised without a ZAP
//! instance.
//!
//! ```rust
//! use serde_json::json;
//! use zap_api_core::ZapClient;
//! use zap_api_core::test_transport::StubTransport;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let stub = StubTransport::new().with_response(json!({"MaxDepth": 5}));
//! let client = ZapClient::builder().with_transport(stub.clone()).build()?;
//!
//! assert_eq!(client.spider().option_max_depth()?, json!(5));
//!
//! let requests = stub.requests();
//! assert_eq!(requests.len(), 1);
//! assert_eq!(requests[0].url, "http://zap/JSON/spider/view/optionMaxDepth/");
//! # Ok(())
//! # }
//! ```

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde_json::Value;

use crate::{ApiResponse, CallQuery, Transport, TransportError};

/// A request seen by a [`StubTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    /// The requested URL, without query string.
    pub url: String,
    /// The query parameters.
    pub query: CallQuery,
}

#[derive(Debug, Default)]
struct StubState {
    replies: VecDeque<Result<ApiResponse, TransportError>>,
    fallback: ApiResponse,
    requests: Vec<RecordedRequest>,
}

/// A scripted [`Transport`].
///
/// Queued replies are consumed in order, one per request; once the queue is
/// empty every request gets the fallback response (an empty object unless set
/// with [`StubTransport::with_fallback`]).
///
/// Clones share the same state, so a clone can be handed to a client while the
/// original is kept to inspect the recorded requests.
#[derive(Debug, Clone, Default)]
pub struct StubTransport {
    state: Arc<Mutex<StubState>>,
}

impl StubTransport {
    /// Creates a stub answering `{}` to everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful reply.
    ///
    /// Values other than JSON objects are queued as
    /// [`TransportError::NotAnObject`], mirroring the HTTP transport.
    #[must_use]
    pub fn with_response(self, response: Value) -> Self {
        let reply = into_response(response);
        self.lock().replies.push_back(reply);
        self
    }

    /// Queues a failure.
    #[must_use]
    pub fn with_error(self, error: TransportError) -> Self {
        self.lock().replies.push_back(Err(error));
        self
    }

    /// Sets the reply used once the queue is exhausted.
    ///
    /// Non-object values are ignored and leave the fallback unchanged.
    #[must_use]
    pub fn with_fallback(self, response: Value) -> Self {
        if let Value::Object(response) = response {
            self.lock().fallback = response;
        }
        self
    }

    /// All requests received so far, in order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.lock().requests.clone()
    }

    /// The last request received.
    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.lock().requests.last().cloned()
    }

    /// Number of queued replies not yet consumed.
    pub fn pending_replies(&self) -> usize {
        self.lock().replies.len()
    }

    fn lock(&self) -> MutexGuard<'_, StubState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Transport for StubTransport {
    fn request(&self, url: &str, query: &CallQuery) -> Result<ApiResponse, TransportError> {
        let mut state = self.lock();
        state.requests.push(RecordedRequest {
            url: url.to_string(),
            query: query.clone(),
        });
        match state.replies.pop_front() {
            Some(reply) => reply,
            None => Ok(state.fallback.clone()),
        }
    }
}

fn into_response(value: Value) -> Result<ApiResponse, TransportError> {
    match value {
        Value::Object(response) => Ok(response),
        value => Err(TransportError::NotAnObject {
            url: "stub".to_string(),
            value,
        }),
    }
}
