use std::fmt::Debug;
use std::sync::Arc;
use std::time::Duration;

use url::Url;

use super::{ApiError, ReqwestTransport, Transport, ZapClient};

/// Base URL of the JSON API served by ZAP.
pub const DEFAULT_BASE_URL: &str = "http://zap/JSON/";

/// Address of the ZAP proxy on a default local install.
pub const DEFAULT_PROXY: &str = "http://127.0.0.1:8080";

/// Builder for [`ZapClient`].
///
/// # Default Configuration
///
/// - **Base URL**: `http://zap/JSON/`
/// - **Proxy**: `http://127.0.0.1:8080`, the `zap` host only resolves through it
/// - **Timeout**: none
/// - **Transport**: a [`ReqwestTransport`] built from the proxy and timeout
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use zap_api_core::ZapClient;
///
/// # fn example() -> Result<(), zap_api_core::ApiError> {
/// let client = ZapClient::builder()
///     .with_proxy("http://127.0.0.1:8090")
///     .with_timeout(Duration::from_secs(10))
///     .build()?;
///
/// assert_eq!(client.base_url().as_str(), "http://zap/JSON/");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ZapClientBuilder {
    base_url: String,
    proxy: Option<String>,
    timeout: Option<Duration>,
    transport: Option<Arc<dyn Transport>>,
}

impl Default for ZapClientBuilder {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            proxy: Some(DEFAULT_PROXY.to_string()),
            timeout: None,
            transport: None,
        }
    }
}

impl ZapClientBuilder {
    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - [`ApiError::InvalidBaseUrl`] if the base URL cannot be parsed
    /// - [`ApiError::Transport`] if the default transport cannot be created,
    ///   e.g. because the proxy URL is invalid
    pub fn build(self) -> Result<ZapClient, ApiError> {
        let Self {
            base_url,
            proxy,
            timeout,
            transport,
        } = self;

        let base_url = parse_base_url(&base_url)?;
        let transport = match transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::configured(proxy.as_deref(), timeout)?),
        };

        Ok(ZapClient {
            transport,
            base_url,
        })
    }

    /// Sets the API base URL, a trailing `/` is added when missing.
    ///
    /// Use this to reach ZAP directly, e.g. `http://127.0.0.1:8080/JSON/`
    /// together with [`ZapClientBuilder::without_proxy`].
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Routes requests through this proxy.
    pub fn with_proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Sends requests directly, without proxy.
    pub fn without_proxy(mut self) -> Self {
        self.proxy = None;
        self
    }

    /// Sets a timeout for each request.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Uses a custom transport.
    ///
    /// The proxy and timeout settings only apply to the default transport and
    /// are ignored when a transport is supplied.
    pub fn with_transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    /// Uses a transport already shared with other clients.
    pub fn with_shared_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }
}

fn parse_base_url(base_url: &str) -> Result<Url, ApiError> {
    let mut url = Url::parse(base_url).map_err(|error| ApiError::InvalidBaseUrl {
        url: base_url.to_string(),
        error,
    })?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
