//! Property record data model
//!
//! Ads on the site do not share a fixed schema: different listings populate
//! different fields, and the embedded structured-data block can carry
//! arbitrary extra keys. A record is therefore a string-keyed mapping to a
//! tagged value, with an explicit first-writer-wins merge rule so that
//! structured data (merged first) always beats heuristic fallbacks.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A single field value inside a [`PropertyRecord`]
///
/// Serialized untagged so the persisted JSON document reads like plain
/// key/value data. `Other` passes nested structured-data values through
/// unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Bool(bool),
    Other(Value),
}

impl FieldValue {
    /// Returns the text content if this value is textual
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Coerces this value to a number, parsing textual values
    ///
    /// Non-numeric text yields `None` so downstream aggregation can treat
    /// the field as absent.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            FieldValue::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Renders this value as a single CSV cell
    pub fn to_cell(&self) -> String {
        match self {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Number(n) => format_number(*n),
            FieldValue::Bool(b) => b.to_string(),
            FieldValue::Other(v) => v.to_string(),
        }
    }
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => FieldValue::Text(s),
            Value::Number(n) => match n.as_f64() {
                Some(f) => FieldValue::Number(f),
                None => FieldValue::Other(Value::Number(n)),
            },
            Value::Bool(b) => FieldValue::Bool(b),
            other => FieldValue::Other(other),
        }
    }
}

/// Formats a float without a trailing `.0` for whole values
fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.is_finite() && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

/// One extracted ad, as a string-keyed mapping of field values
///
/// Every record carries at least the `url` key. The field set is fixed once
/// the record is appended to the crawl accumulator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyRecord {
    fields: BTreeMap<String, FieldValue>,
}

impl PropertyRecord {
    /// Creates a record for the given canonical ad URL
    pub fn new(url: &str) -> Self {
        let mut fields = BTreeMap::new();
        fields.insert("url".to_string(), FieldValue::Text(url.to_string()));
        Self { fields }
    }

    /// Returns the canonical ad URL
    pub fn url(&self) -> &str {
        self.fields
            .get("url")
            .and_then(FieldValue::as_text)
            .unwrap_or_default()
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Inserts a field only if the key is not already present
    ///
    /// Returns true when the value was written. This is the only write path,
    /// which makes the merge order (structured data before fallbacks) the
    /// single source of precedence.
    pub fn insert_first(&mut self, key: &str, value: FieldValue) -> bool {
        if self.fields.contains_key(key) {
            return false;
        }
        self.fields.insert(key.to_string(), value);
        true
    }

    /// Merges every entry of a structured-data object, first writer wins
    pub fn merge_structured(&mut self, data: serde_json::Map<String, Value>) {
        for (key, value) in data {
            self.insert_first(&key, FieldValue::from(value));
        }
    }

    /// Iterates over the record's field names
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_record_has_url() {
        let record = PropertyRecord::new("https://example.com/ad/1");
        assert_eq!(record.url(), "https://example.com/ad/1");
        assert_eq!(record.len(), 1);
    }

    #[test]
    fn test_insert_first_writer_wins() {
        let mut record = PropertyRecord::new("https://example.com/ad/1");
        assert!(record.insert_first("title", FieldValue::Text("Casa".into())));
        assert!(!record.insert_first("title", FieldValue::Text("Apartamento".into())));
        assert_eq!(record.get("title").unwrap().as_text(), Some("Casa"));
    }

    #[test]
    fn test_merge_structured_does_not_overwrite_url() {
        let mut record = PropertyRecord::new("https://example.com/ad/1");
        let data = json!({"url": "https://other.com/x", "price": 350000})
            .as_object()
            .unwrap()
            .clone();
        record.merge_structured(data);
        assert_eq!(record.url(), "https://example.com/ad/1");
        assert_eq!(record.get("price").unwrap().as_number(), Some(350000.0));
    }

    #[test]
    fn test_merge_structured_keeps_nested_values() {
        let mut record = PropertyRecord::new("https://example.com/ad/1");
        let data = json!({"offers": {"price": "350000"}})
            .as_object()
            .unwrap()
            .clone();
        record.merge_structured(data);
        assert!(matches!(
            record.get("offers"),
            Some(FieldValue::Other(Value::Object(_)))
        ));
    }

    #[test]
    fn test_as_number_parses_text() {
        assert_eq!(FieldValue::Text("350000".into()).as_number(), Some(350000.0));
        assert_eq!(FieldValue::Text("não informado".into()).as_number(), None);
        assert_eq!(FieldValue::Number(1.5).as_number(), Some(1.5));
    }

    #[test]
    fn test_to_cell_rendering() {
        assert_eq!(FieldValue::Text("Centro".into()).to_cell(), "Centro");
        assert_eq!(FieldValue::Number(350000.0).to_cell(), "350000");
        assert_eq!(FieldValue::Number(2.5).to_cell(), "2.5");
        assert_eq!(FieldValue::Bool(true).to_cell(), "true");
        assert_eq!(
            FieldValue::Other(json!({"a": 1})).to_cell(),
            r#"{"a":1}"#
        );
    }

    #[test]
    fn test_json_round_trip_preserves_tags() {
        let mut record = PropertyRecord::new("https://example.com/ad/1");
        record.insert_first("price", FieldValue::Text("350000".into()));
        record.insert_first("rooms", FieldValue::Number(3.0));

        let encoded = serde_json::to_string(&record).unwrap();
        let decoded: PropertyRecord = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, record);
    }
}
