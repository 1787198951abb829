//! # carehub-app
//!
//! Application layer: data-access facades and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `BackendClient`: the hosted backend's record operations
//!   - `ClientFactory`: builds a client on first use
//!   - `Notifier`: receives user-facing failure messages
//! - Define the **facades** callers use, one per table:
//!   - `AppointmentService`, `BedService`, `PatientService`, `WardService`
//!   - all instances of the generic `RecordService`
//! - Provide **in-process infrastructure** (notification bus) that doesn't need IO
//!
//! ## Dependency rule
//! Depends on `carehub-domain` only (plus `tokio::sync` for cells and channels).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod notify;
pub mod ports;
pub mod services;
