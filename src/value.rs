//! Submitted form values and the read-only form data mapping.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single submitted field value.
///
/// Form bodies carry either text or integers; both serialize transparently
/// so they can be stashed in session flash storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Textual value
    Str(String),
    /// Integer value
    Int(i64),
}

impl Value {
    /// Borrow the textual content, if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s.as_str()),
            Value::Int(_) => None,
        }
    }

    /// Render the value as text (integers use their decimal form).
    pub fn to_text(&self) -> String {
        self.to_string()
    }

    /// Character length of the textual rendering.
    pub(crate) fn text_len(&self) -> usize {
        match self {
            Value::Str(s) => s.chars().count(),
            Value::Int(n) => n.to_string().chars().count(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => f.write_str(s),
            Value::Int(n) => write!(f, "{n}"),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n.into())
    }
}

/// The submitted-data mapping for one request.
///
/// Built by the hosting framework from the request body; the validator only
/// ever reads from it. Iteration order is insertion order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormData {
    fields: IndexMap<String, Value>,
}

impl FormData {
    /// Create an empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field's value.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(field, value);
        self
    }

    /// Get a field's value.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Whether the field was submitted at all (even if empty).
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Number of submitted fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the form is empty.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate fields in submission order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for FormData {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_text_rendering() {
        assert_eq!(Value::from("hello").to_text(), "hello");
        assert_eq!(Value::from(42).to_text(), "42");
        assert_eq!(Value::from(-7).text_len(), 2);
    }

    #[test]
    fn value_serializes_transparently() {
        assert_eq!(
            serde_json::to_value(Value::from("a")).unwrap(),
            serde_json::json!("a")
        );
        assert_eq!(
            serde_json::to_value(Value::from(5)).unwrap(),
            serde_json::json!(5)
        );
    }

    #[test]
    fn value_deserializes_untagged() {
        let v: Value = serde_json::from_str("\"x\"").unwrap();
        assert_eq!(v, Value::from("x"));
        let v: Value = serde_json::from_str("9").unwrap();
        assert_eq!(v, Value::from(9));
    }

    #[test]
    fn form_data_from_pairs() {
        let form: FormData = [("email", "a@b.com"), ("name", "jo")].into_iter().collect();
        assert_eq!(form.len(), 2);
        assert!(form.contains("email"));
        assert!(!form.contains("missing"));
        assert_eq!(form.get("name"), Some(&Value::from("jo")));
    }

    #[test]
    fn form_data_preserves_order() {
        let form = FormData::new().with("b", "1").with("a", "2").with("c", "3");
        let keys: Vec<&str> = form.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
    }
}
