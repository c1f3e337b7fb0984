//! Request parameter mappings.
//!
//! [`Params`] is the string-keyed, arbitrarily nested mapping sent as the body
//! of create and action requests. Keys are passed through uninterpreted, so
//! new server-side fields can be used without a client release.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A parameter mapping for create and action requests.
///
/// # Example
///
/// ```rust
/// use easypost::rest::Params;
/// use serde_json::json;
///
/// let params = Params::new()
///     .with("to_address", json!({"zip": "64153", "country": "US"}))
///     .with("parcel", json!({"weight": 10}))
///     .with("options", json!({"residential_to_address": 1}));
///
/// assert_eq!(params.get("parcel"), Some(&json!({"weight": 10})));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Params(Map<String, Value>);

impl Params {
    /// Creates an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a key, replacing any previous value.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Adds a key whose value is any serializable type.
    ///
    /// # Errors
    ///
    /// Returns the serializer's error if `value` cannot be represented as
    /// JSON, e.g. a map with non-string keys.
    pub fn with_serialized<T: Serialize>(
        self,
        key: impl Into<String>,
        value: &T,
    ) -> Result<Self, serde_json::Error> {
        let value = serde_json::to_value(value)?;
        Ok(self.with(key, value))
    }

    /// Inserts a key in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Returns the value for a key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns `true` if the mapping has no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Wraps the mapping under a single key: `{key: {...}}`.
    #[must_use]
    pub fn wrapped(self, key: &str) -> Value {
        let mut outer = Map::new();
        outer.insert(key.to_string(), Value::Object(self.0));
        Value::Object(outer)
    }

    /// Converts the mapping into a JSON value.
    #[must_use]
    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

impl From<Map<String, Value>> for Params {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Non-object values become an empty mapping.
impl From<Value> for Params {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map),
            _ => Self::default(),
        }
    }
}

impl FromIterator<(String, Value)> for Params {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
