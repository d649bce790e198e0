//! Raw record type
//!
//! Collections share no schema, so a record is carried as the field map the
//! store returned. Typed access goes through [`super::ExtractedAttributes`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One row from a historical-record table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: Map<String, Value>,
}

impl Record {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Build a record from `(column, value)` pairs
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        Self {
            fields: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn into_fields(self) -> Map<String, Value> {
        self.fields
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Non-empty display text for a field; numbers and booleans are rendered
    pub fn text(&self, field: &str) -> Option<String> {
        self.fields.get(field).and_then(value_text)
    }

    /// Whole-number value for a field, accepting numeric text such as "23 years"
    pub fn integer(&self, field: &str) -> Option<i32> {
        match self.fields.get(field)? {
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
                .and_then(|v| i32::try_from(v).ok()),
            Value::String(s) => leading_integer(s),
            _ => None,
        }
    }
}

impl From<Map<String, Value>> for Record {
    fn from(fields: Map<String, Value>) -> Self {
        Self::new(fields)
    }
}

/// Render a JSON scalar as trimmed text
pub fn value_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => return None,
    };
    (!text.is_empty()).then_some(text)
}

fn leading_integer(text: &str) -> Option<i32> {
    let digits: String = text
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

/// First run of exactly four digits, read as a year
pub fn extract_year(text: &str) -> Option<i32> {
    let bytes = text.as_bytes();
    let mut start = 0;
    while start < bytes.len() {
        if !bytes[start].is_ascii_digit() {
            start += 1;
            continue;
        }
        let mut end = start;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        if end - start == 4 {
            return text[start..end].parse().ok();
        }
        start = end;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_renders_scalars() {
        let record = Record::from_pairs([
            ("name", json!("  Harriet Jones ")),
            ("age", json!(34)),
            ("free", json!(true)),
            ("notes", json!("")),
            ("missing", Value::Null),
        ]);

        assert_eq!(record.text("name").as_deref(), Some("Harriet Jones"));
        assert_eq!(record.text("age").as_deref(), Some("34"));
        assert_eq!(record.text("free").as_deref(), Some("true"));
        assert_eq!(record.text("notes"), None);
        assert_eq!(record.text("missing"), None);
        assert_eq!(record.text("absent"), None);
    }

    #[test]
    fn test_integer_accepts_numeric_text() {
        let record = Record::from_pairs([
            ("age", json!("23 years")),
            ("year", json!(1860)),
            ("weight", json!(140.7)),
            ("unknown", json!("about twenty")),
        ]);

        assert_eq!(record.integer("age"), Some(23));
        assert_eq!(record.integer("year"), Some(1860));
        assert_eq!(record.integer("weight"), Some(140));
        assert_eq!(record.integer("unknown"), None);
    }

    #[test]
    fn test_extract_year() {
        assert_eq!(extract_year("March 3, 1865"), Some(1865));
        assert_eq!(extract_year("1850-06-01"), Some(1850));
        assert_eq!(extract_year("no. 123456 filed 1871"), Some(1871));
        assert_eq!(extract_year("12/3/65"), None);
        assert_eq!(extract_year(""), None);
    }

    #[test]
    fn test_record_serializes_as_plain_map() {
        let record = Record::from_pairs([("id", json!("r1")), ("name", json!("Sam"))]);
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value, json!({"id": "r1", "name": "Sam"}));
    }
}
