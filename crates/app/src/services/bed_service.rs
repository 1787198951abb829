//! Bed service: data access for `bed_c` records.

use carehub_domain::bed::Beds;

use crate::services::record_service::RecordService;

/// Facade over the bed table.
pub type BedService<F, N> = RecordService<Beds, F, N>;
