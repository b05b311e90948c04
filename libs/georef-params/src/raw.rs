//! Untrusted, untyped input as received from the transport layer.

use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// One received occurrence of a parameter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RawValue {
    Text(String),
    /// A JSON array or object where a scalar was expected.
    Unsupported,
}

/// Received parameters, keeping every occurrence so repetition is observable.
///
/// A name may be present with zero occurrences (a JSON `null`): it counts as
/// received for unknown-parameter detection but yields no value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawParams {
    values: BTreeMap<String, Vec<RawValue>>,
}

impl RawParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(name, value)` pairs; repeated names accumulate.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut raw = Self::new();
        for (name, value) in pairs {
            raw.push(name, value);
        }
        raw
    }

    /// Parse an `application/x-www-form-urlencoded` querystring
    /// (without the leading `?`).
    pub fn from_querystring(qs: &str) -> Self {
        Self::from_pairs(
            url::form_urlencoded::parse(qs.trim_start_matches('?').as_bytes())
                .map(|(k, v)| (k.into_owned(), v.into_owned())),
        )
    }

    /// Build from one JSON object of a bulk body.
    ///
    /// Strings are taken as-is, numbers and booleans by their JSON text,
    /// `null` as absent, arrays and objects as [`RawValue::Unsupported`].
    pub fn from_json_object(obj: &Map<String, Value>) -> Self {
        let mut raw = Self::new();
        for (name, value) in obj {
            let occurrences = match value {
                Value::Null => Vec::new(),
                Value::String(s) => vec![RawValue::Text(s.clone())],
                Value::Number(n) => vec![RawValue::Text(n.to_string())],
                Value::Bool(b) => vec![RawValue::Text(b.to_string())],
                Value::Array(_) | Value::Object(_) => vec![RawValue::Unsupported],
            };
            raw.values.insert(name.clone(), occurrences);
        }
        raw
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values
            .entry(name.into())
            .or_default()
            .push(RawValue::Text(value.into()));
    }

    /// First occurrence of `name`, if any.
    pub fn get(&self, name: &str) -> Option<&RawValue> {
        self.values.get(name).and_then(|v| v.first())
    }

    pub fn occurrences(&self, name: &str) -> usize {
        self.values.get(name).map_or(0, Vec::len)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn querystring_keeps_repetitions() {
        let raw = RawParams::from_querystring("?nombre=San%20Luis&max=3&max=4");
        assert_eq!(raw.occurrences("max"), 2);
        assert_eq!(raw.get("max"), Some(&RawValue::Text("3".into())));
        assert_eq!(raw.get("nombre"), Some(&RawValue::Text("San Luis".into())));
        assert_eq!(raw.len(), 2);
    }

    #[test]
    fn empty_querystring_has_no_params() {
        assert!(RawParams::from_querystring("").is_empty());
    }

    #[test]
    fn json_object_conversion() {
        let obj = json!({"nombre": "Salta", "max": 5, "aplanar": true, "id": null, "campos": ["id"]});
        let raw = RawParams::from_json_object(obj.as_object().unwrap());
        assert_eq!(raw.get("max"), Some(&RawValue::Text("5".into())));
        assert_eq!(raw.get("aplanar"), Some(&RawValue::Text("true".into())));
        assert!(raw.contains("id"));
        assert_eq!(raw.get("id"), None);
        assert_eq!(raw.get("campos"), Some(&RawValue::Unsupported));
    }
}
