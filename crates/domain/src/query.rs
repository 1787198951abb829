//! Request parameter shapes understood by the backend client.
//!
//! The serialized form mirrors the vendor SDK exactly, e.g. a projection entry
//! is `{"field": {"Name": "Name_c"}}` and ordering is
//! `{"fieldName": "Name_c", "sorttype": "ASC"}`.

use serde::{Deserialize, Serialize};

use crate::id::RecordId;
use crate::record::Record;
use crate::table::Table;

/// Maximum number of records requested by a list call.
pub const LIST_LIMIT: u32 = 100;

/// One entry of a field projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSelector {
    pub field: FieldName,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldName {
    #[serde(rename = "Name")]
    pub name: String,
}

impl FieldSelector {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            field: FieldName { name: name.into() },
        }
    }

    /// The selected column name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.field.name
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortType {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBy {
    #[serde(rename = "fieldName")]
    pub field_name: String,
    #[serde(rename = "sorttype")]
    pub sort_type: SortType,
}

impl OrderBy {
    #[must_use]
    pub fn asc(field_name: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
            sort_type: SortType::Asc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PagingInfo {
    pub limit: u32,
    pub offset: u32,
}

impl Default for PagingInfo {
    fn default() -> Self {
        Self {
            limit: LIST_LIMIT,
            offset: 0,
        }
    }
}

/// Parameters of `fetchRecords`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchParams {
    pub fields: Vec<FieldSelector>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub order_by: Vec<OrderBy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paging_info: Option<PagingInfo>,
}

impl FetchParams {
    /// The list request for `T`: full projection, ascending on the table's
    /// ordering column, first page of [`LIST_LIMIT`] records.
    #[must_use]
    pub fn list<T: Table>() -> Self {
        Self {
            fields: projection::<T>(),
            order_by: vec![OrderBy::asc(T::ORDER_BY)],
            paging_info: Some(PagingInfo::default()),
        }
    }
}

/// Parameters of `getRecordById`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetParams {
    pub fields: Vec<FieldSelector>,
}

impl GetParams {
    #[must_use]
    pub fn for_table<T: Table>() -> Self {
        Self {
            fields: projection::<T>(),
        }
    }
}

/// Parameters of `createRecord` and `updateRecord`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordsRequest {
    pub records: Vec<Record>,
}

impl RecordsRequest {
    #[must_use]
    pub fn single(record: Record) -> Self {
        Self {
            records: vec![record],
        }
    }
}

/// Parameters of `deleteRecord`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteRequest {
    #[serde(rename = "RecordIds")]
    pub record_ids: Vec<RecordId>,
}

fn projection<T: Table>() -> Vec<FieldSelector> {
    T::FIELDS.iter().copied().map(FieldSelector::new).collect()
}
