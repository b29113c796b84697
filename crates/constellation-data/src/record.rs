//! Unit records and the `{ users: [...] }` payload.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single attribute value taken from a record.
///
/// Only scalar values take part in relationship matching. Anything else
/// (null, arrays, objects) is kept as [`AttributeValue::Other`] and never
/// matches, not even against itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// A boolean flag.
    Flag(bool),
    /// A numeric value.
    Number(f64),
    /// A text value such as `"f"` or `"mobile"`.
    Text(String),
    /// Any non-scalar JSON value.
    Other(Value),
}

impl AttributeValue {
    /// Whether this value can link units together.
    pub fn participates(&self) -> bool {
        !matches!(self, AttributeValue::Other(_))
    }

    /// Equality used for relationship discovery.
    pub fn matches(&self, other: &AttributeValue) -> bool {
        match (self, other) {
            (AttributeValue::Flag(a), AttributeValue::Flag(b)) => a == b,
            (AttributeValue::Number(a), AttributeValue::Number(b)) => a == b,
            (AttributeValue::Text(a), AttributeValue::Text(b)) => a == b,
            _ => false,
        }
    }
}

impl From<Value> for AttributeValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Bool(b) => AttributeValue::Flag(b),
            Value::Number(n) => match n.as_f64() {
                Some(f) => AttributeValue::Number(f),
                None => AttributeValue::Other(Value::Number(n)),
            },
            Value::String(s) => AttributeValue::Text(s),
            other => AttributeValue::Other(other),
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::Text(value.to_string())
    }
}

impl std::fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttributeValue::Flag(b) => write!(f, "{}", b),
            AttributeValue::Number(n) => write!(f, "{}", n),
            AttributeValue::Text(s) => write!(f, "{}", s),
            AttributeValue::Other(v) => write!(f, "{}", v),
        }
    }
}

/// One record from the data source: attribute names mapped to values.
///
/// Attributes keep the order they had in the source document, which fixes
/// the order relationships are discovered in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct UnitRecord {
    attributes: Vec<(String, AttributeValue)>,
}

impl UnitRecord {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style attribute insertion. Replaces an existing value in place.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Insert or replace an attribute.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<AttributeValue>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name, value)),
        }
    }

    /// Look up an attribute by name.
    pub fn get(&self, name: &str) -> Option<&AttributeValue> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Iterate attributes in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttributeValue)> {
        self.attributes.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Iterate attribute values in document order.
    pub fn values(&self) -> impl Iterator<Item = &AttributeValue> {
        self.attributes.iter().map(|(_, v)| v)
    }

    /// True if any attribute, under any name, matches `value`.
    pub fn contains_value(&self, value: &AttributeValue) -> bool {
        self.values().any(|v| v.matches(value))
    }

    /// Number of attributes.
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Whether the record has no attributes.
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

impl From<Map<String, Value>> for UnitRecord {
    fn from(map: Map<String, Value>) -> Self {
        Self {
            attributes: map
                .into_iter()
                .map(|(name, value)| (name, AttributeValue::from(value)))
                .collect(),
        }
    }
}

impl From<UnitRecord> for Map<String, Value> {
    fn from(record: UnitRecord) -> Self {
        record
            .attributes
            .into_iter()
            .map(|(name, value)| {
                let json = match value {
                    AttributeValue::Flag(b) => Value::Bool(b),
                    AttributeValue::Number(n) => serde_json::Number::from_f64(n)
                        .map(Value::Number)
                        .unwrap_or(Value::Null),
                    AttributeValue::Text(s) => Value::String(s),
                    AttributeValue::Other(v) => v,
                };
                (name, json)
            })
            .collect()
    }
}

/// The document delivered by the data source.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataPayload {
    /// Raw user entries. Non-object entries are dropped by [`DataPayload::records`].
    #[serde(default)]
    pub users: Vec<Value>,
}

impl DataPayload {
    /// Parse a payload from JSON text.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Convert the user entries into records, skipping anything that is not an object.
    pub fn records(self) -> Vec<UnitRecord> {
        let mut records = Vec::with_capacity(self.users.len());
        for (index, entry) in self.users.into_iter().enumerate() {
            match entry {
                Value::Object(map) => records.push(UnitRecord::from(map)),
                other => {
                    tracing::warn!(index, kind = json_kind(&other), "Skipping non-object user entry");
                }
            }
        }
        records
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_preserves_document_order() {
        let json = r#"{"platform":"pc","gender":"f","format":"video"}"#;
        let record: UnitRecord = serde_json::from_str(json).unwrap();

        let names: Vec<&str> = record.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["platform", "gender", "format"]);
    }

    #[test]
    fn test_scalar_values_match() {
        assert!(AttributeValue::from("f").matches(&AttributeValue::from("f")));
        assert!(!AttributeValue::from("f").matches(&AttributeValue::from("m")));
        assert!(AttributeValue::Number(3.0).matches(&AttributeValue::Number(3.0)));
        assert!(!AttributeValue::Number(1.0).matches(&AttributeValue::Flag(true)));
    }

    #[test]
    fn test_compound_values_never_match() {
        let null = AttributeValue::Other(Value::Null);
        assert!(!null.participates());
        assert!(!null.matches(&null.clone()));
    }

    #[test]
    fn test_contains_value_ignores_attribute_name() {
        let record = UnitRecord::new()
            .with("gender", "f")
            .with("nickname", "pc");

        assert!(record.contains_value(&AttributeValue::from("pc")));
        assert!(!record.contains_value(&AttributeValue::from("mobile")));
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut record = UnitRecord::new().with("a", "1").with("b", "2");
        record.insert("a", "3");

        assert_eq!(record.len(), 2);
        assert_eq!(record.get("a"), Some(&AttributeValue::from("3")));
        assert_eq!(record.iter().next().map(|(n, _)| n), Some("a"));
    }

    #[test]
    fn test_payload_skips_non_objects() {
        let payload =
            DataPayload::from_json(r#"{"users":[{"gender":"f"},42,"x",{"gender":"m"}]}"#).unwrap();
        let records = payload.records();

        assert_eq!(records.len(), 2);
        assert_eq!(records[1].get("gender"), Some(&AttributeValue::from("m")));
    }

    #[test]
    fn test_payload_missing_users_is_empty() {
        let payload = DataPayload::from_json(r#"{"people":[]}"#).unwrap();
        assert!(payload.records().is_empty());
    }

    #[test]
    fn test_record_serializes_back_to_object() {
        let record = UnitRecord::new().with("gender", "f").with("age", AttributeValue::Number(30.0));
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"gender":"f","age":30.0}"#);
    }
}
