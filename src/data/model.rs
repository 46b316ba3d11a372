use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Value – a single cell of a record
// ---------------------------------------------------------------------------

/// A dynamically-typed field value.
/// Distinct values are collected into `BTreeSet`s so `Value` must be `Ord`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    /// ISO-8601 date string kept as text.
    Date(String),
    Null,
}

// -- Manual Eq/Ord so we can put Value in BTreeSet --

impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use Value::*;
        fn discriminant(v: &Value) -> u8 {
            match v {
                Null => 0,
                Bool(_) => 1,
                Integer(_) => 2,
                Float(_) => 3,
                String(_) => 4,
                Date(_) => 5,
            }
        }
        let da = discriminant(self);
        let db = discriminant(other);
        if da != db {
            return da.cmp(&db);
        }
        match (self, other) {
            (Bool(a), Bool(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (String(a), String(b)) | (Date(a), Date(b)) => a.cmp(b),
            _ => std::cmp::Ordering::Equal,
        }
    }
}

impl Value {
    pub fn date(iso: impl Into<String>) -> Self {
        Value::Date(iso.into())
    }

    /// Textual representation used for matching and export.
    /// `Null` renders as the empty string.
    pub fn text(&self) -> Cow<'_, str> {
        match self {
            Value::String(s) | Value::Date(s) => Cow::Borrowed(s),
            Value::Integer(i) => Cow::Owned(i.to_string()),
            Value::Float(v) => Cow::Owned(v.to_string()),
            Value::Bool(b) => Cow::Borrowed(if *b { "true" } else { "false" }),
            Value::Null => Cow::Borrowed(""),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            Value::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Integer(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

// ---------------------------------------------------------------------------
// Record – one row (a booking, payment, cart or promotion)
// ---------------------------------------------------------------------------

/// Name of the externally supplied identity field.
pub const ID_FIELD: &str = "id";

/// A flat mapping from field name to value.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, Value>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, handy for sample data and tests.
    pub fn with(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn insert(&mut self, field: &str, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(field.to_string(), value.into())
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Textual value of `field`, `None` when the field is absent.
    pub fn text(&self, field: &str) -> Option<Cow<'_, str>> {
        self.fields.get(field).map(Value::text)
    }

    pub fn id(&self) -> Option<&Value> {
        self.get(ID_FIELD)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FromIterator<(String, Value)> for Record {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Record {
            fields: iter.into_iter().collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// ColumnIndex – per-column distinct values of a record set
// ---------------------------------------------------------------------------

/// Distinct values per column of a record sequence.
/// Drives the filter dropdowns and the status colour map.
#[derive(Debug, Clone, Default)]
pub struct ColumnIndex {
    /// For each column the sorted set of distinct values.
    pub unique_values: BTreeMap<String, BTreeSet<Value>>,
}

impl ColumnIndex {
    pub fn build(records: &[Record]) -> Self {
        let mut unique_values: BTreeMap<String, BTreeSet<Value>> = BTreeMap::new();

        for rec in records {
            for (col, val) in rec.fields() {
                unique_values
                    .entry(col.to_string())
                    .or_default()
                    .insert(val.clone());
            }
        }
        ColumnIndex { unique_values }
    }

    /// Distinct non-null textual values of `column`, sorted.
    pub fn distinct_text(&self, column: &str) -> Vec<String> {
        self.unique_values
            .get(column)
            .map(|vals| {
                vals.iter()
                    .filter(|v| !v.is_null())
                    .map(|v| v.text().into_owned())
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_text_renders_null_as_empty() {
        assert_eq!(Value::Null.text(), "");
        assert_eq!(Value::from(75000).text(), "75000");
        assert_eq!(Value::from(12.5).text(), "12.5");
        assert_eq!(Value::from(true).text(), "true");
        assert_eq!(Value::date("2024-03-05").text(), "2024-03-05");
    }

    #[test]
    fn option_into_value() {
        assert_eq!(Value::from(None::<&str>), Value::Null);
        assert_eq!(Value::from(Some("x")), Value::String("x".into()));
    }

    #[test]
    fn record_text_missing_field_is_none() {
        let rec = Record::new().with("id", 1).with("name", "Alice");
        assert_eq!(rec.text("name").as_deref(), Some("Alice"));
        assert!(rec.text("email").is_none());
        assert_eq!(rec.id(), Some(&Value::Integer(1)));
    }

    #[test]
    fn column_index_collects_distinct_values() {
        let records = vec![
            Record::new().with("status", "pending"),
            Record::new().with("status", "confirmed"),
            Record::new().with("status", "pending").with("note", Value::Null),
        ];
        let index = ColumnIndex::build(&records);
        assert_eq!(index.unique_values.keys().collect::<Vec<_>>(), vec!["note", "status"]);
        assert_eq!(index.distinct_text("status"), vec!["confirmed", "pending"]);
        assert!(index.distinct_text("note").is_empty());
        assert!(index.distinct_text("missing").is_empty());
    }

    #[test]
    fn record_serializes_as_flat_object() {
        let rec = Record::new()
            .with("id", 3)
            .with("date", Value::date("2024-01-02"))
            .with("paid", false);
        let json = serde_json::to_string(&rec).unwrap();
        assert_eq!(json, r#"{"date":"2024-01-02","id":3,"paid":false}"#);
    }
}
