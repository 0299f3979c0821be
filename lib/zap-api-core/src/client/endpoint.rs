use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;
use url::Url;

use super::{ApiError, ApiModule, CallQuery, Operation, Transport};

/// The binding of one API module to a transport.
///
/// The proxy borrows the shared transport and base URL of its client, it holds
/// no other state: every call issues an independent request and nothing is
/// cached between calls.
///
/// All operations go through [`EndpointProxy::call`], which builds
/// `{base}{module}/{view|action}/{operation}/`, sends it with the supplied query
/// parameters, and extracts the operation's response field.
#[derive(Debug, Clone, Copy)]
pub struct EndpointProxy<'a> {
    transport: &'a dyn Transport,
    base_url: &'a Url,
    module: &'static ApiModule,
}

impl<'a> EndpointProxy<'a> {
    /// Binds a module to a transport and a base URL.
    ///
    /// The base URL is expected to end with `/`, as enforced by
    /// [`ZapClientBuilder`](crate::ZapClientBuilder).
    pub fn new(transport: &'a dyn Transport, base_url: &'a Url, module: &'static ApiModule) -> Self {
        Self {
            transport,
            base_url,
            module,
        }
    }

    /// The bound module.
    pub fn module(&self) -> &'static ApiModule {
        self.module
    }

    /// Full URL of an operation, without query parameters.
    pub fn url(&self, operation: &Operation) -> String {
        format!("{}{}", self.base_url, operation.path(self.module.name))
    }

    /// Calls an operation of the module.
    ///
    /// # Errors
    ///
    /// - [`ApiError::MissingParameter`] / [`ApiError::UnexpectedParameter`] if the
    ///   query does not carry exactly the operation's parameter names
    /// - [`ApiError::Transport`] with the transport error, unchanged
    /// - [`ApiError::MissingField`] if a view's response lacks its field
    pub fn call(&self, operation: &Operation, query: &CallQuery) -> Result<Value, ApiError> {
        operation.check_params(query)?;
        let url = self.url(operation);

        debug!(%url, ?query, kind = %operation.kind, "calling {}", operation.name);
        let response = self.transport.request(&url, query)?;

        operation.response.extract(operation.name, response)
    }

    /// Calls an operation looked up by its remote name.
    ///
    /// # Errors
    ///
    /// [`ApiError::UnknownOperation`] if the module has no such operation,
    /// otherwise the same errors as [`EndpointProxy::call`].
    pub fn call_by_name(&self, name: &str, query: &CallQuery) -> Result<Value, ApiError> {
        let operation = self
            .module
            .find(name)
            .ok_or_else(|| ApiError::UnknownOperation {
                module: self.module.name,
                name: name.to_string(),
            })?;
        self.call(operation, query)
    }

    /// Calls a parameterless operation.
    ///
    /// # Errors
    ///
    /// Same as [`EndpointProxy::call`].
    pub fn view(&self, operation: &Operation) -> Result<Value, ApiError> {
        self.call(operation, &CallQuery::new())
    }

    /// Calls a parameterless operation and decodes its value.
    ///
    /// # Errors
    ///
    /// Same as [`EndpointProxy::call`], plus [`ApiError::Deserialize`] with the
    /// failing JSON path when the value does not fit `T`.
    pub fn view_as<T>(&self, operation: &Operation) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let value = self.view(operation)?;
        decode(operation.name, value)
    }
}

pub(crate) fn decode<T>(operation: &'static str, value: Value) -> Result<T, ApiError>
where
    T: DeserializeOwned,
{
    serde_path_to_error::deserialize(value)
        .map_err(|error| ApiError::Deserialize { operation, error })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::client::{Operation, TransportError};
    use crate::test_transport::StubTransport;

    const VIEW: Operation = Operation::view("optionThreadCount", "ThreadCount");
    const ACTION: Operation = Operation::action("excludeFromScan", &["regex"], "excludeFromScan");
    const MODULE: ApiModule = ApiModule {
        name: "spider",
        operations: &[VIEW, ACTION],
    };

    fn base_url() -> Url {
        Url::parse("http://zap/JSON/").expect("valid url")
    }

    #[test]
    fn test_view_request_shape() {
        let stub = StubTransport::new().with_response(json!({"ThreadCount": 2}));
        let base = base_url();
        let proxy = EndpointProxy::new(&stub, &base, &MODULE);

        let value = proxy.view(&VIEW).expect("view succeeds");

        assert_eq!(value, json!(2));
        let requests = stub.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url, "http://zap/JSON/spider/view/optionThreadCount/");
        assert!(requests[0].query.is_empty());
    }

    #[test]
    fn test_action_by_name() {
        let stub = StubTransport::new().with_response(json!({"Result": "OK"}));
        let base = base_url();
        let proxy = EndpointProxy::new(&stub, &base, &MODULE);
        let query = CallQuery::new().add_text("regex", ".*logout.*");

        let value = proxy
            .call_by_name("excludeFromScan", &query)
            .expect("action succeeds");

        assert_eq!(value, json!({"Result": "OK"}));
        assert_eq!(stub.requests()[0].query, query);
    }

    #[test]
    fn test_unknown_operation_sends_nothing() {
        let stub = StubTransport::new();
        let base = base_url();
        let proxy = EndpointProxy::new(&stub, &base, &MODULE);

        let result = proxy.call_by_name("crawl", &CallQuery::new());

        assert!(matches!(
            result,
            Err(ApiError::UnknownOperation { module: "spider", ref name }) if name == "crawl"
        ));
        assert!(stub.requests().is_empty());
    }

    #[test]
    fn test_parameter_mismatch_sends_nothing() {
        let stub = StubTransport::new();
        let base = base_url();
        let proxy = EndpointProxy::new(&stub, &base, &MODULE);

        let result = proxy.call(&ACTION, &CallQuery::new());

        assert!(matches!(result, Err(ApiError::MissingParameter { .. })));
        assert!(stub.requests().is_empty());
    }

    #[test]
    fn test_transport_error_is_propagated() {
        let stub = StubTransport::new().with_error(TransportError::UnexpectedStatusCode {
            status_code: 502,
            body: "Bad Gateway".to_string(),
        });
        let base = base_url();
        let proxy = EndpointProxy::new(&stub, &base, &MODULE);

        let result = proxy.view(&VIEW);

        assert!(matches!(
            result,
            Err(ApiError::Transport(TransportError::UnexpectedStatusCode {
                status_code: 502,
                ..
            }))
        ));
    }

    #[test]
    fn test_view_as_reports_path() {
        let stub = StubTransport::new().with_response(json!({"ThreadCount": "two"}));
        let base = base_url();
        let proxy = EndpointProxy::new(&stub, &base, &MODULE);

        let result = proxy.view_as::<u32>(&VIEW);

        match result {
            Err(ApiError::Deserialize { operation, error }) => {
                assert_eq!(operation, "optionThreadCount");
                assert_eq!(error.path().to_string(), ".");
            }
            other => panic!("Expected Deserialize error, got: {other:?}"),
        }
    }
}
