//! The `spider` API module: crawling a site from a start URL.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::client::{ApiError, CallQuery, EndpointProxy, Operation, decode};

pub mod operations;
pub use self::operations::SPIDER;
use self::operations::*;


/// Typed accessors for the `spider` API module.
///
/// Views return the value of their documented field unchanged. Actions return
/// their documented field when the response has it, otherwise the whole
/// response object (usually `{"Result": "OK"}`, see
/// [`is_ok_acknowledgement`](crate::is_ok_acknowledgement)).
///
/// Parameter values are not validated locally, ZAP rejects invalid ones.
#[derive(Debug, Clone, Copy)]
pub struct Spider<'a> {
    proxy: EndpointProxy<'a>,
}

impl<'a> Spider<'a> {
    /// Wraps an endpoint proxy bound to the [`SPIDER`] module.
    pub fn new(proxy: EndpointProxy<'a>) -> Self {
        Self { proxy }
    }

    /// The underlying endpoint proxy.
    pub fn proxy(&self) -> EndpointProxy<'a> {
        self.proxy
    }

    /// Progress of the current scan, as reported by ZAP (a percentage, as a string).
    ///
    /// # Errors
    ///
    /// Fails if the call fails or the `status` field is missing.
    pub fn status(&self) -> Result<Value, ApiError> {
        self.proxy.view(&STATUS)
    }

    /// URLs found by the current scan.
    ///
    /// # Errors
    ///
    /// Fails if the call fails or the `results` field is missing.
    pub fn results(&self) -> Result<Value, ApiError> {
        self.proxy.view(&RESULTS)
    }

    /// Regexes of URLs excluded from the scan.
    ///
    /// # Errors
    ///
    /// Fails if the call fails or the `excludedFromScan` field is missing.
    pub fn excluded_from_scan(&self) -> Result<Value, ApiError> {
        self.proxy.view(&EXCLUDED_FROM_SCAN)
    }

    /// The `MaxDepth` option.
    pub fn option_max_depth(&self) -> Result<Value, ApiError> {
        self.proxy.view(&OPTION_MAX_DEPTH)
    }

    /// The `ScopeText` option.
    pub fn option_scope_text(&self) -> Result<Value, ApiError> {
        self.proxy.view(&OPTION_SCOPE_TEXT)
    }

    /// The `Scope` option.
    pub fn option_scope(&self) -> Result<Value, ApiError> {
        self.proxy.view(&OPTION_SCOPE)
    }

    /// The `ThreadCount` option.
    pub fn option_thread_count(&self) -> Result<Value, ApiError> {
        self.proxy.view(&OPTION_THREAD_COUNT)
    }

    /// The `PostForm` option.
    pub fn option_post_form(&self) -> Result<Value, ApiError> {
        self.proxy.view(&OPTION_POST_FORM)
    }

    /// The `ProcessForm` option.
    pub fn option_process_form(&self) -> Result<Value, ApiError> {
        self.proxy.view(&OPTION_PROCESS_FORM)
    }

    /// The `SkipURLString` option.
    pub fn option_skip_url_string(&self) -> Result<Value, ApiError> {
        self.proxy.view(&OPTION_SKIP_URL_STRING)
    }

    /// The `RequestWaitTime` option.
    pub fn option_request_wait_time(&self) -> Result<Value, ApiError> {
        self.proxy.view(&OPTION_REQUEST_WAIT_TIME)
    }

    /// The `UserAgent` option.
    pub fn option_user_agent(&self) -> Result<Value, ApiError> {
        self.proxy.view(&OPTION_USER_AGENT)
    }

    /// The `ParseComments` option.
    pub fn option_parse_comments(&self) -> Result<Value, ApiError> {
        self.proxy.view(&OPTION_PARSE_COMMENTS)
    }

    /// The `ParseRobotsTxt` option.
    pub fn option_parse_robots_txt(&self) -> Result<Value, ApiError> {
        self.proxy.view(&OPTION_PARSE_ROBOTS_TXT)
    }

    /// The `HandleParameters` option.
    pub fn option_handle_parameters(&self) -> Result<Value, ApiError> {
        self.proxy.view(&OPTION_HANDLE_PARAMETERS)
    }

    /// The `HandleODataParametersVisited` option.
    pub fn option_handle_odata_parameters_visited(&self) -> Result<Value, ApiError> {
        self.proxy.view(&OPTION_HANDLE_ODATA_PARAMETERS_VISITED)
    }

    /// Starts spidering from `url`.
    ///
    /// # Errors
    ///
    /// Fails if the call fails.
    pub fn scan(&self, url: &str) -> Result<Value, ApiError> {
        let query = CallQuery::new().add_text("url", url);
        self.proxy.call(&SCAN, &query)
    }

    /// Stops the running scan.
    ///
    /// # Errors
    ///
    /// Fails if the call fails.
    pub fn stop(&self) -> Result<Value, ApiError> {
        self.proxy.view(&STOP)
    }

    /// Removes every exclusion regex.
    ///
    /// # Errors
    ///
    /// Fails if the call fails.
    pub fn clear_excluded_from_scan(&self) -> Result<Value, ApiError> {
        self.proxy.view(&CLEAR_EXCLUDED_FROM_SCAN)
    }

    /// Excludes URLs matching `regex` from the scan.
    ///
    /// # Errors
    ///
    /// Fails if the call fails.
    pub fn exclude_from_scan(&self, regex: &str) -> Result<Value, ApiError> {
        let query = CallQuery::new().add_text("regex", regex);
        self.proxy.call(&EXCLUDE_FROM_SCAN, &query)
    }

    /// Sets the `ScopeString` option.
    pub fn set_option_scope_string(&self, string: &str) -> Result<Value, ApiError> {
        self.set_string(&SET_OPTION_SCOPE_STRING, string)
    }

    /// Sets the `SkipURLString` option.
    pub fn set_option_skip_url_string(&self, string: &str) -> Result<Value, ApiError> {
        self.set_string(&SET_OPTION_SKIP_URL_STRING, string)
    }

    /// Sets the `UserAgent` option.
    pub fn set_option_user_agent(&self, string: &str) -> Result<Value, ApiError> {
        self.set_string(&SET_OPTION_USER_AGENT, string)
    }

    /// Sets the `MaxDepth` option.
    pub fn set_option_max_depth(&self, integer: i32) -> Result<Value, ApiError> {
        self.set_integer(&SET_OPTION_MAX_DEPTH, integer)
    }

    /// Sets the `ThreadCount` option.
    pub fn set_option_thread_count(&self, integer: i32) -> Result<Value, ApiError> {
        self.set_integer(&SET_OPTION_THREAD_COUNT, integer)
    }

    /// Sets the `PostForm` option.
    pub fn set_option_post_form(&self, boolean: bool) -> Result<Value, ApiError> {
        self.set_boolean(&SET_OPTION_POST_FORM, boolean)
    }

    /// Sets the `ProcessForm` option.
    pub fn set_option_process_form(&self, boolean: bool) -> Result<Value, ApiError> {
        self.set_boolean(&SET_OPTION_PROCESS_FORM, boolean)
    }

    /// Sets the `RequestWaitTime` option, in milliseconds.
    pub fn set_option_request_wait_time(&self, integer: i32) -> Result<Value, ApiError> {
        self.set_integer(&SET_OPTION_REQUEST_WAIT_TIME, integer)
    }

    /// Sets the `ParseComments` option.
    pub fn set_option_parse_comments(&self, boolean: bool) -> Result<Value, ApiError> {
        self.set_boolean(&SET_OPTION_PARSE_COMMENTS, boolean)
    }

    /// Sets the `ParseRobotsTxt` option.
    pub fn set_option_parse_robots_txt(&self, boolean: bool) -> Result<Value, ApiError> {
        self.set_boolean(&SET_OPTION_PARSE_ROBOTS_TXT, boolean)
    }

    /// Sets the `HandleODataParametersVisited` option.
    pub fn set_option_handle_odata_parameters_visited(
        &self,
        boolean: bool,
    ) -> Result<Value, ApiError> {
        self.set_boolean(&SET_OPTION_HANDLE_ODATA_PARAMETERS_VISITED, boolean)
    }

    /// Progress of the current scan, from 0 to 100.
    ///
    /// ZAP reports the percentage as a string, plain numbers are accepted too.
    ///
    /// # Errors
    ///
    /// Fails like [`Spider::status`], or with [`ApiError::UnexpectedValue`] when
    /// the value is not a percentage.
    pub fn progress(&self) -> Result<u8, ApiError> {
        let value = self.status()?;
        let progress = match &value {
            Value::String(text) => text.trim().parse::<u8>().ok(),
            Value::Number(number) => number.as_u64().and_then(|it| u8::try_from(it).ok()),
            _ => None,
        };
        match progress {
            Some(progress) if progress <= 100 => Ok(progress),
            _ => Err(ApiError::UnexpectedValue {
                operation: STATUS.name,
                value,
            }),
        }
    }

    /// URLs found by the current scan.
    ///
    /// # Errors
    ///
    /// Fails like [`Spider::results`], or with [`ApiError::Deserialize`] when
    /// the value is not a list of URLs.
    pub fn found_urls(&self) -> Result<Vec<String>, ApiError> {
        self.list_view(&RESULTS)
    }

    /// Regexes of URLs excluded from the scan.
    ///
    /// # Errors
    ///
    /// Fails like [`Spider::excluded_from_scan`], or with
    /// [`ApiError::Deserialize`] when the value is not a list of regexes.
    pub fn excluded_regexes(&self) -> Result<Vec<String>, ApiError> {
        self.list_view(&EXCLUDED_FROM_SCAN)
    }

    /// The scan results decoded into any type.
    ///
    /// # Errors
    ///
    /// Fails like [`Spider::results`], or with [`ApiError::Deserialize`].
    pub fn results_as<T>(&self) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        self.proxy.view_as(&RESULTS)
    }

    fn set_string(&self, operation: &Operation, string: &str) -> Result<Value, ApiError> {
        let query = CallQuery::new().add_text("String", string);
        self.proxy.call(operation, &query)
    }

    fn set_integer(&self, operation: &Operation, integer: i32) -> Result<Value, ApiError> {
        let query = CallQuery::new().add_param("Integer", integer)?;
        self.proxy.call(operation, &query)
    }

    fn set_boolean(&self, operation: &Operation, boolean: bool) -> Result<Value, ApiError> {
        let query = CallQuery::new().add_param("Boolean", boolean)?;
        self.proxy.call(operation, &query)
    }

    fn list_view(&self, operation: &Operation) -> Result<Vec<String>, ApiError> {
        let value = self.proxy.view(operation)?;
        let entries: Vec<ListEntry> = decode(operation.name, value)?;
        Ok(entries.into_iter().map(ListEntry::into_inner).collect())
    }
}

/// List items are either bare strings or wrapped in a named element.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ListEntry {
    Bare(String),
    Url { url: String },
    Regex { regex: String },
}

impl ListEntry {
    fn into_inner(self) -> String {
        match self {
            Self::Bare(text) | Self::Url { url: text } | Self::Regex { regex: text } => text,
        }
    }
}
