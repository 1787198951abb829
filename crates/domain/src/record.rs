//! Loosely typed records as exchanged with the backend.

use serde_json::{Map, Value};

use crate::id::RecordId;

/// A flat record: canonical field name to JSON value.
pub type Record = Map<String, Value>;

/// Name of the identifier column present in every table.
pub const ID_FIELD: &str = "Id";

/// Read the identifier of a record, if it carries a usable one.
#[must_use]
pub fn record_id(record: &Record) -> Option<RecordId> {
    let value = record.get(ID_FIELD)?.clone();
    serde_json::from_value(value).ok()
}

/// Incremental builder for write payloads.
///
/// Absent values are skipped so the backend leaves those columns untouched.
#[derive(Debug, Default)]
pub struct RecordWriter {
    record: Record,
}

impl RecordWriter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `Id`, as required by update requests.
    #[must_use]
    pub fn id(mut self, id: RecordId) -> Self {
        self.record.insert(ID_FIELD.to_string(), Value::from(id.get()));
        self
    }

    /// Write a text column when a value is present.
    #[must_use]
    pub fn text(mut self, field: &str, value: Option<String>) -> Self {
        if let Some(value) = value {
            self.record.insert(field.to_string(), Value::String(value));
        }
        self
    }

    /// Write an integer column when a value is present.
    #[must_use]
    pub fn int(mut self, field: &str, value: Option<i64>) -> Self {
        if let Some(value) = value {
            self.record.insert(field.to_string(), Value::from(value));
        }
        self
    }

    /// Write an integer column, sending an explicit `null` when absent.
    #[must_use]
    pub fn nullable_int(mut self, field: &str, value: Option<i64>) -> Self {
        let value = value.map_or(Value::Null, Value::from);
        self.record.insert(field.to_string(), value);
        self
    }

    #[must_use]
    pub fn build(self) -> Record {
        self.record
    }
}

/// Pick the first present text value: non-empty strings only.
#[must_use]
pub fn first_text<'a, I>(candidates: I) -> Option<String>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    candidates
        .into_iter()
        .flatten()
        .find(|value| !value.is_empty())
        .map(str::to_string)
}

/// Pick the first present integer: zero counts as absent.
#[must_use]
pub fn first_int<I>(candidates: I) -> Option<i64>
where
    I: IntoIterator<Item = Option<i64>>,
{
    candidates.into_iter().flatten().find(|value| *value != 0)
}
