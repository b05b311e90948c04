use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Street name plus a positive door number, as extracted from free-form text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StreetAddress {
    pub street: String,
    /// Door number digits exactly as written ("0042" stays "0042").
    pub number: String,
}

/// A validated, typed parameter value.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<String>),
    Address(StreetAddress),
}

/// Validated output for one logical request: parameter name → typed value.
///
/// Optional parameters that were not received and carry no default are
/// simply absent.
pub type ParsedRecord = BTreeMap<String, ParamValue>;

impl ParamValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            ParamValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            ParamValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParamValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            ParamValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_address(&self) -> Option<&StreetAddress> {
        match self {
            ParamValue::Address(a) => Some(a),
            _ => None,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Bool(b) => write!(f, "{}", b),
            ParamValue::Int(i) => write!(f, "{}", i),
            ParamValue::Float(x) => write!(f, "{}", x),
            ParamValue::Str(s) => f.write_str(s),
            ParamValue::List(items) => f.write_str(&items.join(",")),
            ParamValue::Address(a) => write!(f, "{} {}", a.street, a.number),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::Str(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        ParamValue::Str(s)
    }
}

impl From<i64> for ParamValue {
    fn from(i: i64) -> Self {
        ParamValue::Int(i)
    }
}

impl From<f64> for ParamValue {
    fn from(x: f64) -> Self {
        ParamValue::Float(x)
    }
}

impl From<bool> for ParamValue {
    fn from(b: bool) -> Self {
        ParamValue::Bool(b)
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(items: Vec<String>) -> Self {
        ParamValue::List(items)
    }
}

impl From<StreetAddress> for ParamValue {
    fn from(a: StreetAddress) -> Self {
        ParamValue::Address(a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_untagged() {
        let list = ParamValue::List(vec!["id".into(), "nombre".into()]);
        assert_eq!(serde_json::to_value(&list).unwrap(), serde_json::json!(["id", "nombre"]));
        assert_eq!(
            serde_json::to_value(ParamValue::Int(10)).unwrap(),
            serde_json::json!(10)
        );
        assert_eq!(
            serde_json::to_value(ParamValue::from("02")).unwrap(),
            serde_json::json!("02")
        );
    }

    #[test]
    fn display_joins_lists() {
        let list = ParamValue::List(vec!["a".into(), "b".into()]);
        assert_eq!(list.to_string(), "a,b");
        let addr = ParamValue::Address(StreetAddress {
            street: "Corrientes".into(),
            number: "1234".into(),
        });
        assert_eq!(addr.to_string(), "Corrientes 1234");
    }
}
