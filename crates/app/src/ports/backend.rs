//! Backend port: the record operations of the hosted backend-as-a-service.
//!
//! The vendor SDK is opaque; this trait reproduces its method surface so the
//! facades can be written against it and adapters can stand in for it.

use std::future::Future;
use std::sync::Arc;

use carehub_domain::error::{CareHubError, ValidationError};
use carehub_domain::id::RecordId;
use carehub_domain::query::{DeleteRequest, FetchParams, GetParams, RecordsRequest};
use carehub_domain::response::{DeleteResponse, FetchResponse, GetResponse, MutationResponse};

/// Client for the remote record store.
///
/// Application-level failures are reported inside the response envelopes
/// (`success: false`); the `Err` side is reserved for transport failures.
pub trait BackendClient: Send + Sync {
    /// `fetchRecords(table, {fields, orderBy, pagingInfo})`.
    fn fetch_records(
        &self,
        table: &str,
        params: FetchParams,
    ) -> impl Future<Output = Result<FetchResponse, CareHubError>> + Send;

    /// `getRecordById(table, id, {fields})`.
    fn get_record_by_id(
        &self,
        table: &str,
        id: RecordId,
        params: GetParams,
    ) -> impl Future<Output = Result<GetResponse, CareHubError>> + Send;

    /// `createRecord(table, {records})`.
    fn create_record(
        &self,
        table: &str,
        request: RecordsRequest,
    ) -> impl Future<Output = Result<MutationResponse, CareHubError>> + Send;

    /// `updateRecord(table, {records})`.
    fn update_record(
        &self,
        table: &str,
        request: RecordsRequest,
    ) -> impl Future<Output = Result<MutationResponse, CareHubError>> + Send;

    /// `deleteRecord(table, {RecordIds})`.
    fn delete_record(
        &self,
        table: &str,
        request: DeleteRequest,
    ) -> impl Future<Output = Result<DeleteResponse, CareHubError>> + Send;
}

impl<T: BackendClient> BackendClient for Arc<T> {
    fn fetch_records(
        &self,
        table: &str,
        params: FetchParams,
    ) -> impl Future<Output = Result<FetchResponse, CareHubError>> + Send {
        (**self).fetch_records(table, params)
    }

    fn get_record_by_id(
        &self,
        table: &str,
        id: RecordId,
        params: GetParams,
    ) -> impl Future<Output = Result<GetResponse, CareHubError>> + Send {
        (**self).get_record_by_id(table, id, params)
    }

    fn create_record(
        &self,
        table: &str,
        request: RecordsRequest,
    ) -> impl Future<Output = Result<MutationResponse, CareHubError>> + Send {
        (**self).create_record(table, request)
    }

    fn update_record(
        &self,
        table: &str,
        request: RecordsRequest,
    ) -> impl Future<Output = Result<MutationResponse, CareHubError>> + Send {
        (**self).update_record(table, request)
    }

    fn delete_record(
        &self,
        table: &str,
        request: DeleteRequest,
    ) -> impl Future<Output = Result<DeleteResponse, CareHubError>> + Send {
        (**self).delete_record(table, request)
    }
}

/// Builds a [`BackendClient`] the first time a facade needs one.
///
/// A facade calls [`connect`](Self::connect) lazily and keeps the client for
/// its whole lifetime. When `connect` fails the facade stays without a client
/// and tries again on its next operation.
pub trait ClientFactory: Send + Sync {
    type Client: BackendClient;

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns an error when the client cannot be built, e.g. because a
    /// credential is missing.
    fn connect(&self) -> Result<Self::Client, CareHubError>;
}

impl<F: ClientFactory> ClientFactory for Arc<F> {
    type Client = F::Client;

    fn connect(&self) -> Result<F::Client, CareHubError> {
        (**self).connect()
    }
}

/// Factory handing out clones of an already built client.
#[derive(Debug, Clone)]
pub struct Preconnected<C>(pub C);

impl<C: BackendClient + Clone> ClientFactory for Preconnected<C> {
    type Client = C;

    fn connect(&self) -> Result<C, CareHubError> {
        Ok(self.0.clone())
    }
}

/// Project identity the hosted backend authenticates clients with.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub project_id: String,
    pub public_key: String,
}

impl Credentials {
    pub fn new(project_id: impl Into<String>, public_key: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            public_key: public_key.into(),
        }
    }

    /// Check that both parts are filled in.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingCredential`] naming the first blank part.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.project_id.trim().is_empty() {
            return Err(ValidationError::MissingCredential("project_id"));
        }
        if self.public_key.trim().is_empty() {
            return Err(ValidationError::MissingCredential("public_key"));
        }
        Ok(())
    }
}
