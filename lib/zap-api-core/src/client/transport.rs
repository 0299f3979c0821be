use std::fmt::Debug;
use std::sync::Arc;

use super::{CallQuery, TransportError};

/// A decoded API response: the JSON object returned by the remote service.
pub type ApiResponse = serde_json::Map<String, serde_json::Value>;

/// Performs the actual network call for the endpoint proxies.
///
/// A transport sends a `GET` request to `url` with the given query parameters,
/// and decodes the body as a JSON object. Any network, status, or parsing
/// failure is reported as a [`TransportError`].
///
/// Implementations must be shareable: a single transport serves every
/// endpoint proxy of a [`ZapClient`](crate::ZapClient).
///
/// # Example
///
/// ```rust
/// use zap_api_core::{ApiResponse, CallQuery, Transport, TransportError};
///
/// #[derive(Debug)]
/// struct Offline;
///
/// impl Transport for Offline {
///     fn request(&self, url: &str, _query: &CallQuery) -> Result<ApiResponse, TransportError> {
///         Err(TransportError::Other {
///             message: format!("offline, cannot reach {url}"),
///         })
///     }
/// }
/// ```
pub trait Transport: Debug + Send + Sync {
    /// Sends the request and returns the decoded response object.
    ///
    /// # Errors
    ///
    /// Fails with a [`TransportError`] on network, HTTP status or JSON failure.
    fn request(&self, url: &str, query: &CallQuery) -> Result<ApiResponse, TransportError>;
}

impl<T> Transport for Arc<T>
where
    T: Transport + ?Sized,
{
    fn request(&self, url: &str, query: &CallQuery) -> Result<ApiResponse, TransportError> {
        self.as_ref().request(url, query)
    }
}

impl<T> Transport for &T
where
    T: Transport + ?Sized,
{
    fn request(&self, url: &str, query: &CallQuery) -> Result<ApiResponse, TransportError> {
        (**self).request(url, query)
    }
}

/// Whether a value is the `{"Result": "OK"}` acknowledgement ZAP sends back for actions.
pub fn is_ok_acknowledgement(value: &serde_json::Value) -> bool {
    value.get("Result").and_then(serde_json::Value::as_str) == Some("OK")
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_is_ok_acknowledgement() {
        assert!(is_ok_acknowledgement(&json!({"Result": "OK"})));
        assert!(!is_ok_acknowledgement(&json!({"Result": "FAIL"})));
        assert!(!is_ok_acknowledgement(&json!({"scan": "OK"})));
        assert!(!is_ok_acknowledgement(&json!("OK")));
    }
}
