//! # ZAP API Core
//!
//! A blocking client binding for the REST control API of
//! [ZAP](https://www.zaproxy.org/), the Zed Attack Proxy.
//!
//! ZAP exposes its features as API modules (`spider`, `ascan`, ...). Each
//! module offers **views**, read-only queries, and **actions**, which change
//! ZAP's state. Every call is an HTTP `GET` to
//! `{base}{module}/{view|action}/{operation}/`, answered with a JSON object
//! from which one field is read.
//!
//! - **[`ZapClient`]** - owns the shared [`Transport`] and the base URL
//! - **[`Spider`]** - typed accessors for the `spider` module
//! - **[`EndpointProxy`]** - the generic dispatch behind every accessor, driven
//!   by a declarative [`ApiModule`] operation table
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use zap_api_core::ZapClient;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Requests go to http://zap/JSON/ through the ZAP proxy on 127.0.0.1:8080
//! let client = ZapClient::builder().build()?;
//! let spider = client.spider();
//!
//! spider.set_option_max_depth(3)?;
//! spider.exclude_from_scan(".*logout.*")?;
//! spider.scan("http://example.com")?;
//!
//! let depth = spider.option_max_depth()?; // JSON value, e.g. `3`
//! let progress = spider.progress()?;      // 0..=100
//! # Ok(())
//! # }
//! ```
//!
//! ## Calling operations by name
//!
//! ```rust
//! use serde_json::json;
//! use zap_api_core::test_transport::StubTransport;
//! use zap_api_core::{CallQuery, SPIDER, ZapClient};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let stub = StubTransport::new().with_response(json!({"Result": "OK"}));
//! let client = ZapClient::builder().with_transport(stub.clone()).build()?;
//!
//! let query = CallQuery::new().add_param("Integer", 4)?;
//! let result = client
//!     .endpoint(&SPIDER)
//!     .call_by_name("setOptionThreadCount", &query)?;
//!
//! assert!(zap_api_core::is_ok_acknowledgement(&result));
//! # Ok(())
//! # }
//! ```
//!
//! ## Errors
//!
//! Transport failures (network, HTTP status, invalid JSON) are reported as
//! [`TransportError`] and surface unchanged in [`ApiError::Transport`].
//! Nothing is retried.

mod client;
pub use self::client::{
    ApiError, ApiModule, ApiResponse, CallQuery, DEFAULT_BASE_URL, DEFAULT_PROXY, EndpointProxy,
    Operation, OperationKind, ReqwestTransport, ResponseField, Transport, TransportError,
    ZapClient, ZapClientBuilder, is_ok_acknowledgement,
};

pub mod spider;
pub use self::spider::{SPIDER, Spider};

pub mod test_transport;
