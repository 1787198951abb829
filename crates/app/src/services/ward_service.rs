//! Ward service: data access for `ward_c` records.

use carehub_domain::ward::Wards;

use crate::services::record_service::RecordService;

/// Facade over the ward table.
pub type WardService<F, N> = RecordService<Wards, F, N>;
