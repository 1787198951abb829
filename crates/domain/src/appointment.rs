//! Appointment: a scheduled visit between a patient and a doctor.

use serde::{Deserialize, Serialize};

use crate::id::{RecordId, deserialize_opt_id};
use crate::loose::{deserialize_opt_int, deserialize_opt_text};
use crate::record::{Record, RecordWriter, first_int, first_text};
use crate::table::{Table, WriteMode};

/// Length in minutes written when the caller supplies none.
pub const DEFAULT_DURATION_MINUTES: i64 = 30;
/// Status given to new appointments.
pub const DEFAULT_STATUS: &str = "scheduled";

/// A stored appointment record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    #[serde(rename = "Id")]
    pub id: RecordId,
    #[serde(rename = "PatientId_c", default, deserialize_with = "deserialize_opt_id")]
    pub patient_id: Option<RecordId>,
    #[serde(rename = "DoctorId_c", default, deserialize_with = "deserialize_opt_id")]
    pub doctor_id: Option<RecordId>,
    #[serde(rename = "DateTime_c", default, deserialize_with = "deserialize_opt_text")]
    pub date_time: Option<String>,
    #[serde(rename = "Duration_c", default, deserialize_with = "deserialize_opt_int")]
    pub duration: Option<i64>,
    #[serde(rename = "Type_c", default, deserialize_with = "deserialize_opt_text")]
    pub kind: Option<String>,
    #[serde(rename = "Status_c", default, deserialize_with = "deserialize_opt_text")]
    pub status: Option<String>,
    #[serde(rename = "Notes_c", default, deserialize_with = "deserialize_opt_text")]
    pub notes: Option<String>,
}

/// Caller input for creating or updating an appointment.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppointmentInput {
    #[serde(rename = "patientId", default, deserialize_with = "deserialize_opt_int")]
    pub patient_id: Option<i64>,
    #[serde(rename = "PatientId_c", default, deserialize_with = "deserialize_opt_int")]
    pub patient_id_c: Option<i64>,
    #[serde(rename = "doctorId", default, deserialize_with = "deserialize_opt_int")]
    pub doctor_id: Option<i64>,
    #[serde(rename = "DoctorId_c", default, deserialize_with = "deserialize_opt_int")]
    pub doctor_id_c: Option<i64>,
    #[serde(rename = "dateTime", default, deserialize_with = "deserialize_opt_text")]
    pub date_time: Option<String>,
    #[serde(rename = "DateTime_c", default, deserialize_with = "deserialize_opt_text")]
    pub date_time_c: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_int")]
    pub duration: Option<i64>,
    #[serde(rename = "Duration_c", default, deserialize_with = "deserialize_opt_int")]
    pub duration_c: Option<i64>,
    #[serde(rename = "type", default, deserialize_with = "deserialize_opt_text")]
    pub kind: Option<String>,
    #[serde(rename = "Type_c", default, deserialize_with = "deserialize_opt_text")]
    pub kind_c: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_text")]
    pub status: Option<String>,
    #[serde(rename = "Status_c", default, deserialize_with = "deserialize_opt_text")]
    pub status_c: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_text")]
    pub notes: Option<String>,
    #[serde(rename = "Notes_c", default, deserialize_with = "deserialize_opt_text")]
    pub notes_c: Option<String>,
}

/// Marker for the `appointment_c` table.
#[derive(Debug, Clone, Copy, Default)]
pub struct Appointments;

impl Table for Appointments {
    const NAME: &'static str = "appointment_c";
    const SINGULAR: &'static str = "appointment";
    const PLURAL: &'static str = "appointments";
    const FIELDS: &'static [&'static str] = &[
        "Id",
        "PatientId_c",
        "DoctorId_c",
        "DateTime_c",
        "Duration_c",
        "Type_c",
        "Status_c",
        "Notes_c",
    ];
    const ORDER_BY: &'static str = "DateTime_c";

    type Entity = Appointment;
    type Input = AppointmentInput;

    fn write_record(input: &AppointmentInput, mode: WriteMode) -> Record {
        let mut writer = RecordWriter::new();
        if let WriteMode::Update(id) = mode {
            writer = writer.id(id);
        }

        let mut status = first_text([input.status.as_deref(), input.status_c.as_deref()]);
        if mode.is_create() {
            status = status.or_else(|| Some(DEFAULT_STATUS.to_string()));
        }
        let notes = first_text([input.notes.as_deref(), input.notes_c.as_deref()])
            .unwrap_or_default();
        let duration =
            first_int([input.duration, input.duration_c]).unwrap_or(DEFAULT_DURATION_MINUTES);

        writer
            .int("PatientId_c", first_int([input.patient_id, input.patient_id_c]))
            .int("DoctorId_c", first_int([input.doctor_id, input.doctor_id_c]))
            .text(
                "DateTime_c",
                first_text([input.date_time.as_deref(), input.date_time_c.as_deref()]),
            )
            .int("Duration_c", Some(duration))
            .text(
                "Type_c",
                first_text([input.kind.as_deref(), input.kind_c.as_deref()]),
            )
            .text("Status_c", status)
            .text("Notes_c", Some(notes))
            .build()
    }
}
