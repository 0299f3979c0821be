use std::sync::Arc;

use url::Url;

mod builder;
pub use self::builder::{DEFAULT_BASE_URL, DEFAULT_PROXY, ZapClientBuilder};

mod endpoint;
pub use self::endpoint::EndpointProxy;
pub(crate) use self::endpoint::decode;

mod error;
pub use self::error::{ApiError, TransportError};

mod http;
pub use self::http::ReqwestTransport;

mod operation;
pub use self::operation::{ApiModule, Operation, OperationKind, ResponseField};

mod query;
pub use self::query::CallQuery;

mod transport;
pub use self::transport::{ApiResponse, Transport, is_ok_acknowledgement};

use crate::spider::{SPIDER, Spider};

/// Client for the ZAP REST control API.
///
/// The client owns the transport shared by all its API modules, and hands out
/// lightweight per-module proxies such as [`ZapClient::spider`].
///
/// # Example
///
/// ```rust,no_run
/// use zap_api_core::ZapClient;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = ZapClient::builder().build()?;
///
/// let spider = client.spider();
/// spider.scan("http://example.com")?;
/// while spider.progress()? < 100 {
///     std::thread::sleep(std::time::Duration::from_secs(1));
/// }
/// for url in spider.found_urls()? {
///     println!("{url}");
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ZapClient {
    transport: Arc<dyn Transport>,
    base_url: Url,
}

impl ZapClient {
    /// Creates a builder with the default configuration.
    pub fn builder() -> ZapClientBuilder {
        ZapClientBuilder::default()
    }

    /// The API base URL, always ending with `/`.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The shared transport.
    pub fn transport(&self) -> Arc<dyn Transport> {
        Arc::clone(&self.transport)
    }

    /// Binds an API module to this client.
    pub fn endpoint(&self, module: &'static ApiModule) -> EndpointProxy<'_> {
        EndpointProxy::new(self.transport.as_ref(), &self.base_url, module)
    }

    /// The `spider` API module.
    pub fn spider(&self) -> Spider<'_> {
        Spider::new(self.endpoint(&SPIDER))
    }
}
