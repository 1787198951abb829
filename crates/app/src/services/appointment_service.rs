//! Appointment service: data access for `appointment_c` records.

use carehub_domain::appointment::Appointments;

use crate::services::record_service::RecordService;

/// Facade over the appointment table.
pub type AppointmentService<F, N> = RecordService<Appointments, F, N>;
