//! The `spider` operation table.
#![allow(missing_docs)]

use crate::client::{ApiModule, Operation};

pub const STATUS: Operation = Operation::view("status", "status");
pub const RESULTS: Operation = Operation::view("results", "results");
pub const EXCLUDED_FROM_SCAN: Operation = Operation::view("excludedFromScan", "excludedFromScan");
pub const OPTION_MAX_DEPTH: Operation = Operation::view("optionMaxDepth", "MaxDepth");
pub const OPTION_SCOPE_TEXT: Operation = Operation::view("optionScopeText", "ScopeText");
pub const OPTION_SCOPE: Operation = Operation::view("optionScope", "Scope");
pub const OPTION_THREAD_COUNT: Operation = Operation::view("optionThreadCount", "ThreadCount");
pub const OPTION_POST_FORM: Operation = Operation::view("optionPostForm", "PostForm");
pub const OPTION_PROCESS_FORM: Operation = Operation::view("optionProcessForm", "ProcessForm");
pub const OPTION_SKIP_URL_STRING: Operation =
    Operation::view("optionSkipURLString", "SkipURLString");
pub const OPTION_REQUEST_WAIT_TIME: Operation =
    Operation::view("optionRequestWaitTime", "RequestWaitTime");
pub const OPTION_USER_AGENT: Operation = Operation::view("optionUserAgent", "UserAgent");
pub const OPTION_PARSE_COMMENTS: Operation =
    Operation::view("optionParseComments", "ParseComments");
pub const OPTION_PARSE_ROBOTS_TXT: Operation =
    Operation::view("optionParseRobotsTxt", "ParseRobotsTxt");
pub const OPTION_HANDLE_PARAMETERS: Operation =
    Operation::view("optionHandleParameters", "HandleParameters");
pub const OPTION_HANDLE_ODATA_PARAMETERS_VISITED: Operation = Operation::view(
    "optionHandleODataParametersVisited",
    "HandleODataParametersVisited",
);

pub const SCAN: Operation = Operation::action("scan", &["url"], "scan");
pub const STOP: Operation = Operation::action("stop", &[], "stop");
pub const CLEAR_EXCLUDED_FROM_SCAN: Operation =
    Operation::action("clearExcludedFromScan", &[], "clearExcludedFromScan");
pub const EXCLUDE_FROM_SCAN: Operation =
    Operation::action("excludeFromScan", &["regex"], "excludeFromScan");
pub const SET_OPTION_SCOPE_STRING: Operation =
    Operation::action("setOptionScopeString", &["String"], "setOptionScopeString");
pub const SET_OPTION_SKIP_URL_STRING: Operation =
    Operation::action("setOptionSkipURLString", &["String"], "setOptionSkipURLString");
pub const SET_OPTION_USER_AGENT: Operation =
    Operation::action("setOptionUserAgent", &["String"], "setOptionUserAgent");
pub const SET_OPTION_MAX_DEPTH: Operation =
    Operation::action("setOptionMaxDepth", &["Integer"], "setOptionMaxDepth");
pub const SET_OPTION_THREAD_COUNT: Operation =
    Operation::action("setOptionThreadCount", &["Integer"], "setOptionThreadCount");
pub const SET_OPTION_POST_FORM: Operation =
    Operation::action("setOptionPostForm", &["Boolean"], "setOptionPostForm");
pub const SET_OPTION_PROCESS_FORM: Operation =
    Operation::action("setOptionProcessForm", &["Boolean"], "setOptionProcessForm");
pub const SET_OPTION_REQUEST_WAIT_TIME: Operation = Operation::action(
    "setOptionRequestWaitTime",
    &["Integer"],
    "setOptionRequestWaitTime",
);
pub const SET_OPTION_PARSE_COMMENTS: Operation =
    Operation::action("setOptionParseComments", &["Boolean"], "setOptionParseComments");
pub const SET_OPTION_PARSE_ROBOTS_TXT: Operation =
    Operation::action("setOptionParseRobotsTxt", &["Boolean"], "setOptionParseRobotsTxt");
pub const SET_OPTION_HANDLE_ODATA_PARAMETERS_VISITED: Operation = Operation::action(
    "setOptionHandleODataParametersVisited",
    &["Boolean"],
    "setOptionHandleODataParametersVisited",
);

/// The `spider` API module.
pub const SPIDER: ApiModule = ApiModule {
    name: "spider",
    operations: &[
        STATUS,
        RESULTS,
        EXCLUDED_FROM_SCAN,
        OPTION_MAX_DEPTH,
        OPTION_SCOPE_TEXT,
        OPTION_SCOPE,
        OPTION_THREAD_COUNT,
        OPTION_POST_FORM,
        OPTION_PROCESS_FORM,
        OPTION_SKIP_URL_STRING,
        OPTION_REQUEST_WAIT_TIME,
        OPTION_USER_AGENT,
        OPTION_PARSE_COMMENTS,
        OPTION_PARSE_ROBOTS_TXT,
        OPTION_HANDLE_PARAMETERS,
        OPTION_HANDLE_ODATA_PARAMETERS_VISITED,
        SCAN,
        STOP,
        CLEAR_EXCLUDED_FROM_SCAN,
        EXCLUDE_FROM_SCAN,
        SET_OPTION_SCOPE_STRING,
        SET_OPTION_SKIP_URL_STRING,
        SET_OPTION_USER_AGENT,
        SET_OPTION_MAX_DEPTH,
        SET_OPTION_THREAD_COUNT,
        SET_OPTION_POST_FORM,
        SET_OPTION_PROCESS_FORM,
        SET_OPTION_REQUEST_WAIT_TIME,
        SET_OPTION_PARSE_COMMENTS,
        SET_OPTION_PARSE_ROBOTS_TXT,
        SET_OPTION_HANDLE_ODATA_PARAMETERS_VISITED,
    ],
};
