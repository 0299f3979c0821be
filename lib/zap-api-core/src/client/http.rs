use std::time::Duration;

use tracing::debug;
use url::Url;

use super::error::truncate_body;
use super::{ApiResponse, CallQuery, Transport, TransportError};

/// The default blocking [`Transport`], backed by a `reqwest` client.
///
/// ZAP serves its API on the pseudo host `zap`, which only resolves when the
/// request goes through the ZAP proxy itself, so the transport is usually
/// configured with that proxy.
///
/// # Example
///
/// ```rust,no_run
/// use std::time::Duration;
/// use zap_api_core::ReqwestTransport;
///
/// # fn example() -> Result<(), zap_api_core::TransportError> {
/// let transport = ReqwestTransport::configured(
///     Some("http://127.0.0.1:8080"),
///     Some(Duration::from_secs(30)),
/// )?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    /// Creates a direct transport, without proxy and without timeout.
    ///
    /// # Errors
    ///
    /// Fails if the underlying HTTP client cannot be initialized.
    pub fn new() -> Result<Self, TransportError> {
        Self::configured(None, None)
    }

    /// Creates a transport routed through `proxy`, or connecting directly when
    /// `proxy` is `None`, with an optional request timeout.
    ///
    /// # Errors
    ///
    /// Fails if the proxy URL is invalid or the HTTP client cannot be initialized.
    pub fn configured(proxy: Option<&str>, timeout: Option<Duration>) -> Result<Self, TransportError> {
        let mut builder = reqwest::blocking::Client::builder().timeout(timeout);
        builder = match proxy {
            Some(proxy) => builder.proxy(reqwest::Proxy::all(proxy)?),
            None => builder.no_proxy(),
        };
        let client = builder.build()?;
        Ok(Self { client })
    }

    /// Wraps an already configured `reqwest` blocking client.
    pub fn from_client(client: reqwest::blocking::Client) -> Self {
        Self { client }
    }

    fn build_url(url: &str, query: &CallQuery) -> Result<Url, TransportError> {
        let mut url = Url::parse(url)?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in query.iter() {
                pairs.append_pair(name, value);
            }
        }
        Ok(url)
    }
}

impl Transport for ReqwestTransport {
    fn request(&self, url: &str, query: &CallQuery) -> Result<ApiResponse, TransportError> {
        let request_url = Self::build_url(url, query)?;
        let request = self.client.get(request_url).build()?;

        debug!(?request, "sending...");
        let response = self.client.execute(request)?;
        debug!(?response, "...receiving");

        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            return Err(TransportError::UnexpectedStatusCode {
                status_code: status.as_u16(),
                body: truncate_body(body),
            });
        }

        match serde_json::from_str(&body) {
            Ok(serde_json::Value::Object(response)) => Ok(response),
            Ok(value) => Err(TransportError::NotAnObject {
                url: url.to_string(),
                value,
            }),
            Err(error) => Err(TransportError::JsonError {
                url: url.to_string(),
                error,
                body: truncate_body(body),
            }),
        }
    }
}
