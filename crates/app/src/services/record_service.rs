//! Generic record facade: the CRUD contract shared by every table.
//!
//! Two layers of operations are exposed:
//!
//! - `try_*` operations return a tagged [`Result`] so callers can tell "not
//!   found", "rejected by the backend", "invalid id" and "transport failure"
//!   apart. They never log or notify.
//! - the plain operations (`list`, `get_by_id`, `create`, `update`,
//!   `delete`) log every failure, notify the user about backend-reported
//!   ones, and collapse the result into a neutral value: an empty `Vec`,
//!   `None`, or `false`.

use std::error::Error;
use std::fmt::Write as _;
use std::marker::PhantomData;

use carehub_domain::error::{CareHubError, NotFoundError, RejectedError};
use carehub_domain::id::{RecordId, ToRecordId};
use carehub_domain::query::{DeleteRequest, FetchParams, GetParams, RecordsRequest};
use carehub_domain::table::{Table, WriteMode};
use tokio::sync::OnceCell;

use crate::ports::{BackendClient, ClientFactory, Notification, Notifier};
use crate::services::outcome::{DeleteOutcome, RecordFailure, WriteOutcome, decode_or_skip};

/// CRUD facade over the backend table described by `T`.
///
/// The backend client is built through `F` on first use and kept for the
/// lifetime of the facade. A failed build is retried on the next operation.
pub struct RecordService<T, F: ClientFactory, N> {
    factory: F,
    client: OnceCell<F::Client>,
    notifier: N,
    table: PhantomData<fn() -> T>,
}

impl<T, F, N> RecordService<T, F, N>
where
    T: Table,
    F: ClientFactory,
    N: Notifier,
{
    /// Create a facade; no client is built until the first operation.
    pub fn new(factory: F, notifier: N) -> Self {
        Self {
            factory,
            client: OnceCell::new(),
            notifier,
            table: PhantomData,
        }
    }

    /// Remote table this facade targets.
    #[must_use]
    pub fn table_name(&self) -> &'static str {
        T::NAME
    }

    async fn client(&self) -> Result<&F::Client, CareHubError> {
        self.client
            .get_or_try_init(|| async {
                let client = self.factory.connect()?;
                tracing::debug!(table = T::NAME, "backend client initialised");
                Ok::<_, CareHubError>(client)
            })
            .await
    }

    /// Fetch the first page of records, ordered by the table's sort column.
    ///
    /// Records of an unexpected shape are logged and left out.
    ///
    /// # Errors
    ///
    /// Returns [`CareHubError::Rejected`] on an unsuccessful response, or the
    /// transport error of the client.
    pub async fn try_list(&self) -> Result<Vec<T::Entity>, CareHubError> {
        let client = self.client().await?;
        let response = client
            .fetch_records(T::NAME, FetchParams::list::<T>())
            .await?;
        if !response.success {
            return Err(RejectedError::from_message(response.message).into());
        }
        Ok(response
            .data
            .unwrap_or_default()
            .into_iter()
            .filter_map(decode_or_skip::<T>)
            .collect())
    }

    /// Fetch one record.
    ///
    /// # Errors
    ///
    /// Returns [`CareHubError::NotFound`] when the backend has no such record,
    /// [`CareHubError::Decode`] when it has an unexpected shape, or the
    /// transport error of the client.
    pub async fn try_get(&self, id: RecordId) -> Result<T::Entity, CareHubError> {
        let client = self.client().await?;
        let response = client
            .get_record_by_id(T::NAME, id, GetParams::for_table::<T>())
            .await?;
        let record = response.data.ok_or_else(|| NotFoundError {
            table: T::NAME,
            id: id.to_string(),
        })?;
        Ok(T::decode(record)?)
    }

    /// Send a single-record create request built from `input`.
    ///
    /// # Errors
    ///
    /// Returns [`CareHubError::Rejected`] when the whole request is refused,
    /// or the transport error of the client. Per-record refusals are part of
    /// the [`WriteOutcome`].
    pub async fn try_create(
        &self,
        input: &T::Input,
    ) -> Result<WriteOutcome<T::Entity>, CareHubError> {
        let client = self.client().await?;
        let record = T::write_record(input, WriteMode::Create);
        let response = client
            .create_record(T::NAME, RecordsRequest::single(record))
            .await?;
        WriteOutcome::from_response::<T>(response)
    }

    /// Send a single-record update request for `id` built from `input`.
    ///
    /// # Errors
    ///
    /// Same as [`try_create`](Self::try_create).
    pub async fn try_update(
        &self,
        id: RecordId,
        input: &T::Input,
    ) -> Result<WriteOutcome<T::Entity>, CareHubError> {
        let client = self.client().await?;
        let record = T::write_record(input, WriteMode::Update(id));
        let response = client
            .update_record(T::NAME, RecordsRequest::single(record))
            .await?;
        WriteOutcome::from_response::<T>(response)
    }

    /// Request deletion of `id`.
    ///
    /// # Errors
    ///
    /// Returns [`CareHubError::Rejected`] when the request is refused, or
    /// the transport error of the client.
    pub async fn try_delete(&self, id: RecordId) -> Result<DeleteOutcome, CareHubError> {
        let client = self.client().await?;
        let response = client
            .delete_record(
                T::NAME,
                DeleteRequest {
                    record_ids: vec![id],
                },
            )
            .await?;
        DeleteOutcome::from_response(response)
    }

    /// List records; empty on any failure.
    #[tracing::instrument(skip_all, fields(table = T::NAME))]
    pub async fn list(&self) -> Vec<T::Entity> {
        match self.try_list().await {
            Ok(entities) => entities,
            Err(err) => {
                self.report(&err, &format!("fetch {}", T::PLURAL));
                Vec::new()
            }
        }
    }

    /// Fetch one record; `None` when it is absent or anything fails.
    #[tracing::instrument(skip_all, fields(table = T::NAME))]
    pub async fn get_by_id(&self, id: impl ToRecordId) -> Option<T::Entity> {
        let result = match id.to_record_id() {
            Ok(id) => self.try_get(id).await,
            Err(err) => Err(err.into()),
        };
        match result {
            Ok(entity) => Some(entity),
            Err(CareHubError::NotFound(err)) => {
                tracing::debug!(%err, "no matching record");
                None
            }
            Err(err) => {
                self.report(&err, &format!("fetch {}", T::SINGULAR));
                None
            }
        }
    }

    /// Create a record; returns the first created record, if any.
    #[tracing::instrument(skip_all, fields(table = T::NAME))]
    pub async fn create(&self, input: &T::Input) -> Option<T::Entity> {
        match self.try_create(input).await {
            Ok(outcome) => {
                self.report_write_failures("create", &outcome.failed);
                outcome.into_first()
            }
            Err(err) => {
                self.report(&err, &format!("create {}", T::SINGULAR));
                None
            }
        }
    }

    /// Update a record; returns the first updated record, if any.
    #[tracing::instrument(skip_all, fields(table = T::NAME))]
    pub async fn update(&self, id: impl ToRecordId, input: &T::Input) -> Option<T::Entity> {
        let result = match id.to_record_id() {
            Ok(id) => self.try_update(id, input).await,
            Err(err) => Err(err.into()),
        };
        match result {
            Ok(outcome) => {
                self.report_write_failures("update", &outcome.failed);
                outcome.into_first()
            }
            Err(err) => {
                self.report(&err, &format!("update {}", T::SINGULAR));
                None
            }
        }
    }

    /// Delete a record; `true` when at least one requested id was deleted.
    #[tracing::instrument(skip_all, fields(table = T::NAME))]
    pub async fn delete(&self, id: impl ToRecordId) -> bool {
        let result = match id.to_record_id() {
            Ok(id) => self.try_delete(id).await,
            Err(err) => Err(err.into()),
        };
        match result {
            Ok(outcome) => {
                if !outcome.failed.is_empty() {
                    tracing::error!(
                        count = outcome.failed.len(),
                        failures = ?outcome.failed,
                        "failed to delete {} {}",
                        outcome.failed.len(),
                        T::PLURAL
                    );
                    for message in outcome.failed.iter().flatten() {
                        self.notifier.notify(Notification::error(T::NAME, message));
                    }
                }
                outcome.any_deleted()
            }
            Err(err) => {
                self.report(&err, &format!("delete {}", T::SINGULAR));
                false
            }
        }
    }

    fn report(&self, err: &CareHubError, action: &str) {
        tracing::error!(error = %describe(err), "failed to {action}");
        if let Some(message) = err.backend_message() {
            self.notifier.notify(Notification::error(T::NAME, message));
        }
    }

    fn report_write_failures(&self, verb: &str, failed: &[RecordFailure]) {
        if failed.is_empty() {
            return;
        }
        tracing::error!(
            count = failed.len(),
            failures = ?failed,
            "failed to {verb} {} {}",
            failed.len(),
            T::PLURAL
        );
        for failure in failed {
            for field in &failure.errors {
                self.notifier
                    .notify(Notification::error(T::NAME, field.to_string()));
            }
            if let Some(message) = &failure.message {
                self.notifier.notify(Notification::error(T::NAME, message));
            }
        }
    }
}

/// Render an error with its source chain.
fn describe(err: &CareHubError) -> String {
    let mut text = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let _ = write!(text, ": {cause}");
        source = cause.source();
    }
    text
}
