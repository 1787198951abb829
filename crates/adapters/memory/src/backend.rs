//! In-memory record store answering with the hosted backend's envelopes.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::future::Future;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use carehub_app::ports::BackendClient;
use carehub_domain::error::CareHubError;
use carehub_domain::id::RecordId;
use carehub_domain::query::{
    DeleteRequest, FetchParams, FieldSelector, GetParams, OrderBy, RecordsRequest, SortType,
};
use carehub_domain::record::{ID_FIELD, Record, record_id};
use carehub_domain::response::{
    DeleteResponse, DeleteResult, FetchResponse, FieldError, GetResponse, MutationResponse,
    RecordResult,
};
use carehub_domain::time::{self, Timestamp};
use serde_json::Value;

use crate::error::MemoryError;
use crate::rules::{TableRules, field_label};

pub const CREATED_ON: &str = "CreatedOn";
pub const MODIFIED_ON: &str = "ModifiedOn";

const VALIDATION_FAILED: &str = "Validation failed";
const MISSING_RECORD: &str = "Record does not exist";
const MISSING_ID: &str = "Record Id is required";
const REQUIRED: &str = "is required";

#[derive(Debug, Default)]
struct TableData {
    rows: BTreeMap<i64, Record>,
    next_id: i64,
}

impl TableData {
    fn allocate_id(&mut self) -> i64 {
        self.next_id = self.next_id.max(1);
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn insert(&mut self, id: i64, record: Record) {
        self.next_id = self.next_id.max(id + 1);
        self.rows.insert(id, record);
    }
}

#[derive(Debug)]
struct Store {
    rules: TableRules,
    tables: BTreeMap<String, TableData>,
}

/// Backend holding every table in process memory.
///
/// Clones share the same tables.
#[derive(Debug, Clone)]
pub struct MemoryBackend {
    store: Arc<Mutex<Store>>,
    clock: fn() -> Timestamp,
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new(TableRules::default())
    }
}

impl MemoryBackend {
    /// Empty backend serving the tables registered in `rules`.
    #[must_use]
    pub fn new(rules: TableRules) -> Self {
        let tables = rules
            .tables()
            .map(|name| (name.to_string(), TableData::default()))
            .collect();
        Self {
            store: Arc::new(Mutex::new(Store { rules, tables })),
            clock: time::now,
        }
    }

    /// Replace the clock used for system timestamps.
    #[must_use]
    pub fn with_clock(mut self, clock: fn() -> Timestamp) -> Self {
        self.clock = clock;
        self
    }

    /// Default tables seeded from a JSON fixture.
    ///
    /// The fixture maps table names to arrays of records. Records keep their
    /// `Id` when they carry one and get the next free id otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`MemoryError::FixtureParse`] for malformed JSON,
    /// [`MemoryError::FixtureShape`] when the document is not an object of
    /// arrays of objects, and [`MemoryError::UnknownTable`] for tables the
    /// backend does not serve.
    pub fn from_fixture(json: &str) -> Result<Self, MemoryError> {
        let backend = Self::default();
        let document: Value = serde_json::from_str(json).map_err(MemoryError::FixtureParse)?;
        let Value::Object(tables) = document else {
            return Err(MemoryError::FixtureShape(
                "expected an object keyed by table name".to_string(),
            ));
        };
        for (table, rows) in tables {
            let Value::Array(rows) = rows else {
                return Err(MemoryError::FixtureShape(format!(
                    "{table} must be an array of records"
                )));
            };
            let records = rows
                .into_iter()
                .map(|row| match row {
                    Value::Object(record) => Ok(record),
                    _ => Err(MemoryError::FixtureShape(format!(
                        "{table} contains a value that is not a record"
                    ))),
                })
                .collect::<Result<Vec<_>, _>>()?;
            backend.seed(&table, records)?;
        }
        Ok(backend)
    }

    /// Read and load a fixture file, see [`from_fixture`](Self::from_fixture).
    ///
    /// # Errors
    ///
    /// Returns [`MemoryError::FixtureRead`] when the file cannot be read, or
    /// any error of [`from_fixture`](Self::from_fixture).
    pub fn from_fixture_path(path: &Path) -> Result<Self, MemoryError> {
        let json = std::fs::read_to_string(path).map_err(|source| MemoryError::FixtureRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_fixture(&json)
    }

    /// Insert records as-is, bypassing required-column checks.
    ///
    /// # Errors
    ///
    /// Returns [`MemoryError::UnknownTable`] when `table` is not served.
    pub fn seed(&self, table: &str, records: Vec<Record>) -> Result<(), MemoryError> {
        let stamp = time::to_wire((self.clock)());
        let mut store = self.lock();
        let data = store
            .tables
            .get_mut(table)
            .ok_or_else(|| MemoryError::UnknownTable(table.to_string()))?;
        for mut record in records {
            let id = match record_id(&record) {
                Some(id) => id.get(),
                None => data.allocate_id(),
            };
            record.insert(ID_FIELD.to_string(), Value::from(id));
            record
                .entry(CREATED_ON)
                .or_insert_with(|| Value::String(stamp.clone()));
            record
                .entry(MODIFIED_ON)
                .or_insert_with(|| Value::String(stamp.clone()));
            data.insert(id, record);
        }
        tracing::debug!(table, rows = data.rows.len(), "seeded table");
        Ok(())
    }

    /// Number of records currently stored in `table`.
    pub fn count(&self, table: &str) -> usize {
        self.lock().tables.get(table).map_or(0, |data| data.rows.len())
    }

    /// Stored copy of a record, system columns included.
    pub fn snapshot(&self, table: &str, id: RecordId) -> Option<Record> {
        self.lock().tables.get(table)?.rows.get(&id.get()).cloned()
    }

    fn lock(&self) -> MutexGuard<'_, Store> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn fetch(&self, table: &str, params: &FetchParams) -> FetchResponse {
        let store = self.lock();
        let Some(data) = store.tables.get(table) else {
            return FetchResponse {
                success: false,
                message: Some(unknown_table(table)),
                data: None,
            };
        };
        let mut rows: Vec<&Record> = data.rows.values().collect();
        rows.sort_by(|a, b| compare_records(a, b, &params.order_by));
        let (offset, limit) = params.paging_info.map_or((0, usize::MAX), |paging| {
            (paging.offset as usize, paging.limit as usize)
        });
        let page = rows
            .into_iter()
            .skip(offset)
            .take(limit)
            .map(|record| project(record, &params.fields))
            .collect::<Vec<_>>();
        tracing::debug!(table, returned = page.len(), "fetched records");
        FetchResponse {
            success: true,
            message: None,
            data: Some(page),
        }
    }

    fn get(&self, table: &str, id: RecordId, params: &GetParams) -> Result<GetResponse, MemoryError> {
        let store = self.lock();
        let data = store
            .tables
            .get(table)
            .ok_or_else(|| MemoryError::UnknownTable(table.to_string()))?;
        Ok(GetResponse {
            data: data
                .rows
                .get(&id.get())
                .map(|record| project(record, &params.fields)),
        })
    }

    fn create(&self, table: &str, request: RecordsRequest) -> MutationResponse {
        let stamp = time::to_wire((self.clock)());
        let mut guard = self.lock();
        let store = &mut *guard;
        let Some(data) = store.tables.get_mut(table) else {
            return rejected_mutation(table);
        };
        let results = request
            .records
            .into_iter()
            .map(|mut record| {
                record.remove(ID_FIELD);
                let errors = required_errors(&store.rules, table, &record);
                if !errors.is_empty() {
                    return RecordResult::failed(VALIDATION_FAILED, errors);
                }
                let id = data.allocate_id();
                record.insert(ID_FIELD.to_string(), Value::from(id));
                record.insert(CREATED_ON.to_string(), Value::String(stamp.clone()));
                record.insert(MODIFIED_ON.to_string(), Value::String(stamp.clone()));
                data.insert(id, record.clone());
                RecordResult::succeeded(record)
            })
            .collect::<Vec<_>>();
        tracing::debug!(table, records = results.len(), "created records");
        MutationResponse {
            success: true,
            message: None,
            results: Some(results),
        }
    }

    fn update(&self, table: &str, request: RecordsRequest) -> MutationResponse {
        let stamp = time::to_wire((self.clock)());
        let mut guard = self.lock();
        let store = &mut *guard;
        let Some(data) = store.tables.get_mut(table) else {
            return rejected_mutation(table);
        };
        let results = request
            .records
            .into_iter()
            .map(|changes| {
                let Some(id) = record_id(&changes) else {
                    return RecordResult::failed(MISSING_ID, Vec::new());
                };
                let Some(existing) = data.rows.get_mut(&id.get()) else {
                    return RecordResult::failed(MISSING_RECORD, Vec::new());
                };
                let mut merged = existing.clone();
                for (field, value) in changes {
                    if field != ID_FIELD && field != CREATED_ON && field != MODIFIED_ON {
                        merged.insert(field, value);
                    }
                }
                let errors = required_errors(&store.rules, table, &merged);
                if !errors.is_empty() {
                    return RecordResult::failed(VALIDATION_FAILED, errors);
                }
                merged.insert(MODIFIED_ON.to_string(), Value::String(stamp.clone()));
                existing.clone_from(&merged);
                RecordResult::succeeded(merged)
            })
            .collect::<Vec<_>>();
        tracing::debug!(table, records = results.len(), "updated records");
        MutationResponse {
            success: true,
            message: None,
            results: Some(results),
        }
    }

    fn delete(&self, table: &str, request: &DeleteRequest) -> DeleteResponse {
        let mut store = self.lock();
        let Some(data) = store.tables.get_mut(table) else {
            return DeleteResponse {
                success: false,
                message: Some(unknown_table(table)),
                results: None,
            };
        };
        let results = request
            .record_ids
            .iter()
            .map(|id| match data.rows.remove(&id.get()) {
                Some(_) => DeleteResult {
                    success: true,
                    message: None,
                },
                None => DeleteResult {
                    success: false,
                    message: Some(MISSING_RECORD.to_string()),
                },
            })
            .collect::<Vec<_>>();
        tracing::debug!(table, requested = results.len(), "deleted records");
        DeleteResponse {
            success: true,
            message: None,
            results: Some(results),
        }
    }
}

fn unknown_table(table: &str) -> String {
    MemoryError::UnknownTable(table.to_string()).to_string()
}

fn rejected_mutation(table: &str) -> MutationResponse {
    MutationResponse {
        success: false,
        message: Some(unknown_table(table)),
        results: None,
    }
}

fn required_errors(rules: &TableRules, table: &str, record: &Record) -> Vec<FieldError> {
    rules
        .missing(table, record)
        .into_iter()
        .map(|field| FieldError::new(field_label(field), REQUIRED))
        .collect()
}

/// Keep only the selected columns; an empty selection keeps everything.
fn project(record: &Record, fields: &[FieldSelector]) -> Record {
    if fields.is_empty() {
        return record.clone();
    }
    fields
        .iter()
        .filter_map(|selector| {
            let name = selector.name();
            record.get(name).map(|value| (name.to_string(), value.clone()))
        })
        .collect()
}

fn compare_records(a: &Record, b: &Record, order_by: &[OrderBy]) -> Ordering {
    order_by
        .iter()
        .map(|order| {
            let ordering = compare_values(a.get(&order.field_name), b.get(&order.field_name));
            match order.sort_type {
                SortType::Asc => ordering,
                SortType::Desc => ordering.reverse(),
            }
        })
        .find(|ordering| ordering.is_ne())
        .unwrap_or(Ordering::Equal)
}

/// Blank values sort first, then booleans, numbers, text and everything else.
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    fn rank(value: Option<&Value>) -> u8 {
        match value {
            None | Some(Value::Null) => 0,
            Some(Value::Bool(_)) => 1,
            Some(Value::Number(_)) => 2,
            Some(Value::String(_)) => 3,
            Some(_) => 4,
        }
    }

    match (a, b) {
        (Some(Value::Bool(a)), Some(Value::Bool(b))) => a.cmp(b),
        (Some(Value::Number(a)), Some(Value::Number(b))) => {
            let (a, b) = (a.as_f64().unwrap_or(0.0), b.as_f64().unwrap_or(0.0));
            a.partial_cmp(&b).unwrap_or(Ordering::Equal)
        }
        (Some(Value::String(a)), Some(Value::String(b))) => a.cmp(b),
        _ => rank(a).cmp(&rank(b)),
    }
}

impl BackendClient for MemoryBackend {
    fn fetch_records(
        &self,
        table: &str,
        params: FetchParams,
    ) -> impl Future<Output = Result<FetchResponse, CareHubError>> + Send {
        let result = Ok(self.fetch(table, &params));
        async move { result }
    }

    fn get_record_by_id(
        &self,
        table: &str,
        id: RecordId,
        params: GetParams,
    ) -> impl Future<Output = Result<GetResponse, CareHubError>> + Send {
        let result = self.get(table, id, &params).map_err(CareHubError::from);
        async move { result }
    }

    fn create_record(
        &self,
        table: &str,
        request: RecordsRequest,
    ) -> impl Future<Output = Result<MutationResponse, CareHubError>> + Send {
        let result = Ok(self.create(table, request));
        async move { result }
    }

    fn update_record(
        &self,
        table: &str,
        request: RecordsRequest,
    ) -> impl Future<Output = Result<MutationResponse, CareHubError>> + Send {
        let result = Ok(self.update(table, request));
        async move { result }
    }

    fn delete_record(
        &self,
        table: &str,
        request: DeleteRequest,
    ) -> impl Future<Output = Result<DeleteResponse, CareHubError>> + Send {
        let result = Ok(self.delete(table, &request));
        async move { result }
    }
}
