//! Table registry and required-column rules.

use std::collections::BTreeMap;

use carehub_domain::appointment::Appointments;
use carehub_domain::bed::Beds;
use carehub_domain::patient::Patients;
use carehub_domain::record::Record;
use carehub_domain::table::Table;
use carehub_domain::ward::Wards;
use serde_json::Value;

/// Tables the backend serves and the columns each one requires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRules {
    required: BTreeMap<String, Vec<String>>,
}

impl TableRules {
    /// No tables at all.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            required: BTreeMap::new(),
        }
    }

    /// Register `table` with the columns a written record must carry.
    #[must_use]
    pub fn with_table(mut self, table: &str, required: &[&str]) -> Self {
        self.required.insert(
            table.to_string(),
            required.iter().map(|field| (*field).to_string()).collect(),
        );
        self
    }

    /// Register a [`Table`] descriptor.
    #[must_use]
    pub fn with<T: Table>(self, required: &[&str]) -> Self {
        self.with_table(T::NAME, required)
    }

    pub fn contains(&self, table: &str) -> bool {
        self.required.contains_key(table)
    }

    pub fn tables(&self) -> impl Iterator<Item = &str> {
        self.required.keys().map(String::as_str)
    }

    /// Required columns of `table` that `record` leaves blank.
    ///
    /// Missing columns, `null` and empty strings all count as blank.
    pub fn missing<'a>(&'a self, table: &str, record: &Record) -> Vec<&'a str> {
        let Some(required) = self.required.get(table) else {
            return Vec::new();
        };
        required
            .iter()
            .filter(|field| is_blank(record.get(field.as_str())))
            .map(String::as_str)
            .collect()
    }
}

impl Default for TableRules {
    fn default() -> Self {
        Self::empty()
            .with::<Appointments>(&["PatientId_c", "DoctorId_c", "DateTime_c"])
            .with::<Beds>(&["BedNumber_c"])
            .with::<Patients>(&["Name_c"])
            .with::<Wards>(&["Name_c"])
    }
}

fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(text)) => text.trim().is_empty(),
        Some(_) => false,
    }
}

/// Human label of a column, as reported in field errors: `DateTime_c` reads `DateTime`.
#[must_use]
pub fn field_label(field: &str) -> &str {
    field.strip_suffix("_c").unwrap_or(field)
}
