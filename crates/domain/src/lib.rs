//! # carehub-domain
//!
//! Pure domain model for the carehub hospital data-access layer.
//!
//! ## Responsibilities
//! - Foundational types: record identifiers, error conventions, timestamps
//! - Describe each backend **table** (name, projection, ordering) via [`table::Table`]
//! - Define the typed **entities** (appointments, beds, patients, wards)
//! - Map caller input (friendly or canonical field names) to write payloads
//! - Define the **wire shapes** of backend requests and responses
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod loose;
pub mod record;
pub mod table;
pub mod time;

pub mod query;
pub mod response;

pub mod appointment;
pub mod bed;
pub mod patient;
pub mod ward;
