//! Application services: the per-table data-access facades.
//!
//! Each facade is an instance of the generic [`RecordService`]: it accepts a
//! client factory and a notifier via generic parameters (constructor
//! injection), keeping this layer decoupled from concrete adapters.

pub mod appointment_service;
pub mod bed_service;
pub mod outcome;
pub mod patient_service;
pub mod record_service;
pub mod ward_service;

#[cfg(test)]
pub(crate) mod test_support;

pub use appointment_service::AppointmentService;
pub use bed_service::BedService;
pub use outcome::{DeleteOutcome, RecordFailure, WriteOutcome};
pub use patient_service::PatientService;
pub use record_service::RecordService;
pub use ward_service::WardService;
