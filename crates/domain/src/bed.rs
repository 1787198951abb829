//! Bed: a single bed within a ward, optionally occupied by a patient.

use serde::{Deserialize, Serialize};

use crate::id::{RecordId, deserialize_opt_id};
use crate::loose::{deserialize_opt_int, deserialize_opt_text};
use crate::record::{Record, RecordWriter, first_int, first_text};
use crate::table::{Table, WriteMode};

/// Status given to new beds.
pub const DEFAULT_STATUS: &str = "available";

/// A stored bed record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bed {
    #[serde(rename = "Id")]
    pub id: RecordId,
    #[serde(rename = "BedNumber_c", default, deserialize_with = "deserialize_opt_text")]
    pub bed_number: Option<String>,
    #[serde(rename = "Status_c", default, deserialize_with = "deserialize_opt_text")]
    pub status: Option<String>,
    #[serde(rename = "WardId_c", default, deserialize_with = "deserialize_opt_id")]
    pub ward_id: Option<RecordId>,
    #[serde(rename = "PatientId_c", default, deserialize_with = "deserialize_opt_id")]
    pub patient_id: Option<RecordId>,
    #[serde(
        rename = "AdmissionDate_c",
        default,
        deserialize_with = "deserialize_opt_text"
    )]
    pub admission_date: Option<String>,
    #[serde(
        rename = "ExpectedDischarge_c",
        default,
        deserialize_with = "deserialize_opt_text"
    )]
    pub expected_discharge: Option<String>,
}

impl Bed {
    /// Whether a patient currently occupies the bed.
    #[must_use]
    pub fn is_occupied(&self) -> bool {
        self.patient_id.is_some()
    }
}

/// Caller input for creating or updating a bed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BedInput {
    #[serde(rename = "bedNumber", default, deserialize_with = "deserialize_opt_text")]
    pub bed_number: Option<String>,
    #[serde(rename = "BedNumber_c", default, deserialize_with = "deserialize_opt_text")]
    pub bed_number_c: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_text")]
    pub status: Option<String>,
    #[serde(rename = "Status_c", default, deserialize_with = "deserialize_opt_text")]
    pub status_c: Option<String>,
    #[serde(rename = "wardId", default, deserialize_with = "deserialize_opt_int")]
    pub ward_id: Option<i64>,
    #[serde(rename = "WardId_c", default, deserialize_with = "deserialize_opt_int")]
    pub ward_id_c: Option<i64>,
    #[serde(rename = "patientId", default, deserialize_with = "deserialize_opt_int")]
    pub patient_id: Option<i64>,
    #[serde(rename = "PatientId_c", default, deserialize_with = "deserialize_opt_int")]
    pub patient_id_c: Option<i64>,
    #[serde(rename = "admissionDate", default, deserialize_with = "deserialize_opt_text")]
    pub admission_date: Option<String>,
    #[serde(
        rename = "AdmissionDate_c",
        default,
        deserialize_with = "deserialize_opt_text"
    )]
    pub admission_date_c: Option<String>,
    #[serde(
        rename = "expectedDischarge",
        default,
        deserialize_with = "deserialize_opt_text"
    )]
    pub expected_discharge: Option<String>,
    #[serde(
        rename = "ExpectedDischarge_c",
        default,
        deserialize_with = "deserialize_opt_text"
    )]
    pub expected_discharge_c: Option<String>,
}

/// Marker for the `bed_c` table.
#[derive(Debug, Clone, Copy, Default)]
pub struct Beds;

impl Table for Beds {
    const NAME: &'static str = "bed_c";
    const SINGULAR: &'static str = "bed";
    const PLURAL: &'static str = "beds";
    const FIELDS: &'static [&'static str] = &[
        "Id",
        "BedNumber_c",
        "Status_c",
        "WardId_c",
        "PatientId_c",
        "AdmissionDate_c",
        "ExpectedDischarge_c",
    ];
    const ORDER_BY: &'static str = "BedNumber_c";

    type Entity = Bed;
    type Input = BedInput;

    fn write_record(input: &BedInput, mode: WriteMode) -> Record {
        let mut writer = RecordWriter::new();
        if let WriteMode::Update(id) = mode {
            writer = writer.id(id);
        }

        let mut status = first_text([input.status.as_deref(), input.status_c.as_deref()]);
        if mode.is_create() {
            status = status.or_else(|| Some(DEFAULT_STATUS.to_string()));
        }

        writer
            .text(
                "BedNumber_c",
                first_text([input.bed_number.as_deref(), input.bed_number_c.as_deref()]),
            )
            .text("Status_c", status)
            .int("WardId_c", first_int([input.ward_id, input.ward_id_c]))
            // Always written so an update can vacate the bed.
            .nullable_int("PatientId_c", first_int([input.patient_id, input.patient_id_c]))
            .text(
                "AdmissionDate_c",
                first_text([
                    input.admission_date.as_deref(),
                    input.admission_date_c.as_deref(),
                ]),
            )
            .text(
                "ExpectedDischarge_c",
                first_text([
                    input.expected_discharge.as_deref(),
                    input.expected_discharge_c.as_deref(),
                ]),
            )
            .build()
    }
}
