use std::fmt::Debug;

/// Maximum number of characters of a response body kept in error messages.
pub(crate) const BODY_MAX_LENGTH: usize = 1024;

/// Errors raised by a [`Transport`](super::Transport) while performing a call.
///
/// These are passed through the endpoint proxies unchanged, wrapped in
/// [`ApiError::Transport`].
#[derive(Debug, derive_more::Error, derive_more::Display, derive_more::From)]
pub enum TransportError {
    /// HTTP client error from the underlying reqwest library.
    ///
    /// Occurs when the connection fails, the proxy is unreachable, or the request times out.
    ReqwestError(reqwest::Error),

    /// URL parsing error when attaching query parameters to the request URL.
    UrlError(url::ParseError),

    /// The remote service answered with a non-2xx status code.
    #[display("Unexpected status code {status_code}: {body}")]
    #[from(skip)]
    UnexpectedStatusCode {
        /// The HTTP status code received.
        status_code: u16,
        /// The (possibly truncated) response body.
        body: String,
    },

    /// The response body is not valid JSON.
    #[display("Failed to deserialize JSON from '{url}': {error}\n{body}")]
    #[from(skip)]
    JsonError {
        /// The requested URL.
        url: String,
        /// The underlying JSON parsing error.
        error: serde_json::Error,
        /// The (possibly truncated) response body.
        body: String,
    },

    /// The response body is valid JSON but not a JSON object.
    #[display("Expected a JSON object from '{url}', got: {value}")]
    #[from(skip)]
    NotAnObject {
        /// The requested URL.
        url: String,
        /// The value actually received.
        value: serde_json::Value,
    },

    /// A scripted failure, mostly useful for test doubles.
    #[display("Transport failure: {message}")]
    #[from(skip)]
    Other {
        /// Description of the failure.
        message: String,
    },
}

/// Errors that can occur when calling the ZAP API.
#[derive(Debug, derive_more::Error, derive_more::Display, derive_more::From)]
pub enum ApiError {
    /// The transport failed, the wrapped error is left untouched.
    Transport(TransportError),

    /// The configured base URL cannot be parsed.
    #[display("Invalid base URL '{url}': {error}")]
    #[from(skip)]
    InvalidBaseUrl {
        /// The rejected URL.
        url: String,
        /// The parsing error.
        error: url::ParseError,
    },

    /// The response does not contain the field the operation reads.
    #[display("Missing field '{key}' in response of '{operation}': {response}")]
    #[from(skip)]
    MissingField {
        /// Name of the remote operation.
        operation: &'static str,
        /// The expected key.
        key: &'static str,
        /// The full response received.
        response: serde_json::Value,
    },

    /// No operation with this name exists in the module.
    #[display("Unknown operation '{name}' in module '{module}'")]
    #[from(skip)]
    UnknownOperation {
        /// The API module name.
        module: &'static str,
        /// The requested operation name.
        name: String,
    },

    /// A parameter declared by the operation was not supplied.
    #[display("Missing parameter '{name}' for '{operation}'")]
    #[from(skip)]
    MissingParameter {
        /// Name of the remote operation.
        operation: &'static str,
        /// The missing parameter name.
        name: &'static str,
    },

    /// A parameter not declared by the operation was supplied.
    #[display("Unexpected parameter '{name}' for '{operation}'")]
    #[from(skip)]
    UnexpectedParameter {
        /// Name of the remote operation.
        operation: &'static str,
        /// The extra parameter name.
        name: String,
    },

    /// The parameter value cannot be written into a query string.
    #[display("Unsupported value for parameter '{name}': {value}")]
    #[from(skip)]
    UnsupportedParameterValue {
        /// The parameter name.
        name: String,
        /// The rejected value.
        value: serde_json::Value,
    },

    /// The parameter value cannot be serialized at all.
    #[display("Cannot serialize parameter '{name}': {error}")]
    #[from(skip)]
    ParameterSerialization {
        /// The parameter name.
        name: String,
        /// The serialization error.
        error: serde_json::Error,
    },

    /// The extracted value does not match the requested Rust type.
    #[display("Failed to decode '{operation}' response: {error}")]
    #[from(skip)]
    Deserialize {
        /// Name of the remote operation.
        operation: &'static str,
        /// The decoding error, with the failing JSON path.
        error: serde_path_to_error::Error<serde_json::Error>,
    },

    /// The extracted value has an unexpected shape for a convenience helper.
    #[display("Unexpected value for '{operation}': {value}")]
    #[from(skip)]
    UnexpectedValue {
        /// Name of the remote operation.
        operation: &'static str,
        /// The value received.
        value: serde_json::Value,
    },
}

pub(crate) fn truncate_body(body: String) -> String {
    if body.chars().count() > BODY_MAX_LENGTH {
        let head = body.chars().take(BODY_MAX_LENGTH).collect::<String>();
        format!("{head}... (truncated)")
    } else {
        body
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_errors_are_send_and_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<ApiError>();
        assert_sync::<ApiError>();
        assert_send::<TransportError>();
        assert_sync::<TransportError>();
    }

    #[test]
    fn test_transport_error_converts_into_api_error() {
        let error = TransportError::Other {
            message: "boom".to_string(),
        };

        let api_error = ApiError::from(error);

        assert!(matches!(
            api_error,
            ApiError::Transport(TransportError::Other { ref message }) if message == "boom"
        ));
        insta::assert_snapshot!(api_error, @"Transport failure: boom");
    }

    #[test]
    fn test_missing_field_display() {
        let error = ApiError::MissingField {
            operation: "optionMaxDepth",
            key: "MaxDepth",
            response: serde_json::json!({"Result": "OK"}),
        };

        insta::assert_snapshot!(
            error,
            @r#"Missing field 'MaxDepth' in response of 'optionMaxDepth': {"Result":"OK"}"#
        );
    }

    #[test]
    fn test_truncate_body() {
        let short = "short body".to_string();
        assert_eq!(truncate_body(short.clone()), short);

        let long = "é".repeat(BODY_MAX_LENGTH + 10);
        let truncated = truncate_body(long);
        assert!(truncated.ends_with("... (truncated)"));
        assert_eq!(
            truncated.chars().count(),
            BODY_MAX_LENGTH + "... (truncated)".len()
        );
    }
}
