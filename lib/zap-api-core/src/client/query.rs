use indexmap::IndexMap;
use serde::Serialize;

use super::ApiError;

/// Query parameters attached to a single API call.
///
/// Every value is stored in its string representation, in insertion order.
/// Values are coerced the way they appear in JSON: strings as-is, numbers in
/// decimal, booleans as `true` / `false`, `null` as the empty string.
///
/// # Example
///
/// ```rust
/// use zap_api_core::CallQuery;
///
/// # fn example() -> Result<(), zap_api_core::ApiError> {
/// let query = CallQuery::new()
///     .add_param("Integer", 5)?
///     .add_param("Boolean", true)?;
///
/// assert_eq!(query.get("Integer"), Some("5"));
/// assert_eq!(query.get("Boolean"), Some("true"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallQuery {
    params: IndexMap<String, String>,
}

impl CallQuery {
    /// Creates an empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parameter, coercing the value to its string form.
    ///
    /// # Errors
    ///
    /// Arrays and objects have no single string form and are rejected with
    /// [`ApiError::UnsupportedParameterValue`].
    pub fn add_param(
        mut self,
        name: impl Into<String>,
        value: impl Serialize,
    ) -> Result<Self, ApiError> {
        let name = name.into();
        let value = match serde_json::to_value(value) {
            Ok(value) => value,
            Err(error) => return Err(ApiError::ParameterSerialization { name, error }),
        };
        let text = match value {
            serde_json::Value::String(text) => text,
            serde_json::Value::Number(number) => number.to_string(),
            serde_json::Value::Bool(flag) => flag.to_string(),
            serde_json::Value::Null => String::new(),
            value @ (serde_json::Value::Array(_) | serde_json::Value::Object(_)) => {
                return Err(ApiError::UnsupportedParameterValue { name, value });
            }
        };
        self.params.insert(name, text);
        Ok(self)
    }

    /// Adds a parameter whose value is already a string.
    pub fn add_text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Returns the value of a parameter.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// Whether a parameter is set.
    pub fn contains(&self, name: &str) -> bool {
        self.params.contains_key(name)
    }

    /// Iterates over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Iterates over the parameter names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.params.keys().map(String::as_str)
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Whether there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for CallQuery
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        iter.into_iter()
            .fold(Self::new(), |query, (name, value)| query.add_text(name, value))
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    #[rstest]
    #[case::string(json!("http://example.com"), "http://example.com")]
    #[case::integer(json!(5), "5")]
    #[case::negative(json!(-1), "-1")]
    #[case::boolean_true(json!(true), "true")]
    #[case::boolean_false(json!(false), "false")]
    #[case::null(json!(null), "")]
    fn test_add_param_coerces_to_string(#[case] value: serde_json::Value, #[case] expected: &str) {
        let query = CallQuery::new()
            .add_param("value", value)
            .expect("scalar values are supported");

        assert_eq!(query.get("value"), Some(expected));
    }

    #[rstest]
    #[case::array(json!([1, 2]))]
    #[case::object(json!({"nested": true}))]
    fn test_add_param_rejects_complex_values(#[case] value: serde_json::Value) {
        let result = CallQuery::new().add_param("value", value.clone());

        match result {
            Err(ApiError::UnsupportedParameterValue { name, value: rejected }) => {
                assert_eq!(name, "value");
                assert_eq!(rejected, value);
            }
            other => panic!("Expected UnsupportedParameterValue, got: {other:?}"),
        }
    }

    #[test]
    fn test_query_keeps_insertion_order() {
        let query: CallQuery = [("b", "2"), ("a", "1"), ("c", "3")].into_iter().collect();

        let names = query.names().collect::<Vec<_>>();
        assert_eq!(names, vec!["b", "a", "c"]);
        assert_eq!(query.len(), 3);
        assert!(query.contains("a"));
        assert!(!query.contains("d"));
    }

    #[test]
    fn test_same_name_overwrites_value() {
        let query = CallQuery::new()
            .add_text("String", "first")
            .add_text("String", "second");

        assert_eq!(query.len(), 1);
        assert_eq!(query.get("String"), Some("second"));
    }

    #[test]
    fn test_empty_query() {
        let query = CallQuery::new();
        assert!(query.is_empty());
        assert_eq!(query.iter().count(), 0);
    }
}
