//! Table descriptors: the per-table contract with the remote schema.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::id::RecordId;
use crate::record::Record;

/// Whether a write payload is being built for a create or an update.
///
/// Some tables apply defaults only on create.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    Create,
    Update(RecordId),
}

impl WriteMode {
    #[must_use]
    pub fn is_create(self) -> bool {
        matches!(self, Self::Create)
    }
}

/// Describes one backend table: its name, projection, ordering and the
/// mapping from caller input to a write payload.
///
/// Implemented by zero-sized marker types (`Patients`, `Wards`, …).
pub trait Table: Send + Sync + 'static {
    /// Remote table name, e.g. `patient_c`.
    const NAME: &'static str;

    /// Singular noun used in log messages.
    const SINGULAR: &'static str;

    /// Plural noun used in log messages.
    const PLURAL: &'static str;

    /// Projection requested on reads, starting with `Id`.
    const FIELDS: &'static [&'static str];

    /// Column the list operation sorts by, ascending.
    const ORDER_BY: &'static str;

    /// Typed view of a stored record.
    type Entity: DeserializeOwned + Serialize + Send;

    /// Caller input accepted by create and update.
    type Input: DeserializeOwned + Send + Sync;

    /// Map caller input to the single record of a write request.
    ///
    /// For [`WriteMode::Update`] the payload carries `Id`.
    fn write_record(input: &Self::Input, mode: WriteMode) -> Record;

    /// Decode a stored record into the typed view.
    ///
    /// # Errors
    ///
    /// Returns a [`serde_json::Error`] when the record has an unexpected shape.
    fn decode(record: Record) -> Result<Self::Entity, serde_json::Error> {
        serde_json::from_value(serde_json::Value::Object(record))
    }
}
