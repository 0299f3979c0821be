use serde_json::Value;

use super::{ApiError, ApiResponse, CallQuery};

/// The remote service's own category of an operation, reflected in the URL path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum OperationKind {
    /// Read-only query.
    #[display("view")]
    View,
    /// State-changing operation.
    #[display("action")]
    Action,
}

/// How the value returned to the caller is taken out of the response object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseField {
    /// The key must be present, its value is returned.
    Required(&'static str),
    /// The key's value is returned when present, otherwise the whole response.
    IfPresent(&'static str),
}

impl ResponseField {
    /// The response key read by this field.
    pub fn key(self) -> &'static str {
        match self {
            Self::Required(key) | Self::IfPresent(key) => key,
        }
    }

    pub(crate) fn extract(
        self,
        operation: &'static str,
        mut response: ApiResponse,
    ) -> Result<Value, ApiError> {
        match self {
            Self::Required(key) => match response.remove(key) {
                Some(value) => Ok(value),
                None => Err(ApiError::MissingField {
                    operation,
                    key,
                    response: Value::Object(response),
                }),
            },
            Self::IfPresent(key) => Ok(response
                .remove(key)
                .unwrap_or_else(|| Value::Object(response))),
        }
    }
}

/// One entry of an API module's operation table.
///
/// An operation is fully described by its kind, its remote name, the names of
/// the query parameters it takes, and the field read from its response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation {
    /// View or action.
    pub kind: OperationKind,
    /// Remote operation name, as it appears in the URL (case-sensitive).
    pub name: &'static str,
    /// Query parameter names, in the order the remote service documents them.
    pub params: &'static [&'static str],
    /// Field read from the response.
    pub response: ResponseField,
}

impl Operation {
    /// A view without parameters reading the `key` field.
    pub const fn view(name: &'static str, key: &'static str) -> Self {
        Self {
            kind: OperationKind::View,
            name,
            params: &[],
            response: ResponseField::Required(key),
        }
    }

    /// An action with parameters, narrowed to the `key` field when present.
    pub const fn action(name: &'static str, params: &'static [&'static str], key: &'static str) -> Self {
        Self {
            kind: OperationKind::Action,
            name,
            params,
            response: ResponseField::IfPresent(key),
        }
    }

    /// Path of this operation relative to the API base URL.
    pub fn path(&self, module: &str) -> String {
        format!("{module}/{}/{}/", self.kind, self.name)
    }

    /// Checks the query carries exactly the declared parameter names.
    ///
    /// Parameter values are never inspected, the remote service validates them.
    ///
    /// # Errors
    ///
    /// Fails on the first missing or undeclared parameter.
    pub fn check_params(&self, query: &CallQuery) -> Result<(), ApiError> {
        if let Some(name) = self.params.iter().copied().find(|name| !query.contains(name)) {
            return Err(ApiError::MissingParameter {
                operation: self.name,
                name,
            });
        }
        if let Some(name) = query
            .names()
            .find(|name| !self.params.iter().any(|param| param == name))
        {
            return Err(ApiError::UnexpectedParameter {
                operation: self.name,
                name: name.to_string(),
            });
        }
        Ok(())
    }
}

/// A named group of remote operations, e.g. `spider`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiModule {
    /// Module name, the first URL path segment after the base URL.
    pub name: &'static str,
    /// The module's operation table.
    pub operations: &'static [Operation],
}

impl ApiModule {
    /// Finds an operation by its remote name.
    pub fn find(&self, name: &str) -> Option<&'static Operation> {
        self.operations.iter().find(|operation| operation.name == name)
    }

    /// Iterates over the operations of a kind.
    pub fn operations_of(&self, kind: OperationKind) -> impl Iterator<Item = &'static Operation> {
        self.operations
            .iter()
            .filter(move |operation| operation.kind == kind)
    }
}
