//! # carehub-adapter-memory
//!
//! In-memory implementation of the backend port.
//!
//! ## Responsibilities
//! - Implement [`BackendClient`](carehub_app::ports::BackendClient) against
//!   tables held in process memory, answering with the hosted backend's
//!   envelopes (`success`, `results[]`, field errors)
//! - Honour field projection, ascending ordering and paging on fetch
//! - Reject records missing required columns with per-record field errors
//! - Stamp `CreatedOn` / `ModifiedOn` system columns
//! - Seed tables from a JSON fixture
//! - Provide a [`ClientFactory`](carehub_app::ports::ClientFactory) that checks
//!   credentials before handing out the client
//!
//! ## Dependency rule
//! Depends on `carehub-app` (port traits) and `carehub-domain` only.

pub mod backend;
pub mod connector;
pub mod error;
pub mod rules;

pub use backend::MemoryBackend;
pub use connector::MemoryConnector;
pub use error::MemoryError;
pub use rules::TableRules;
