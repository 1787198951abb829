//! Scripted doubles shared by the facade tests.

use std::collections::VecDeque;
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use carehub_domain::error::{CareHubError, ValidationError};
use carehub_domain::id::RecordId;
use carehub_domain::query::{DeleteRequest, FetchParams, GetParams, RecordsRequest};
use carehub_domain::record::Record;
use carehub_domain::response::{DeleteResponse, FetchResponse, GetResponse, MutationResponse};
use serde_json::Value;

use crate::ports::{BackendClient, ClientFactory, Notification, Notifier};

/// Canned reply for the next client call.
pub enum Reply {
    Fetch(FetchResponse),
    Get(GetResponse),
    Mutation(MutationResponse),
    Delete(DeleteResponse),
    Fail(&'static str),
}

/// A call observed by [`ScriptedClient`].
#[derive(Debug, Clone)]
pub struct Call {
    pub method: &'static str,
    pub table: String,
    pub id: Option<RecordId>,
    pub payload: Value,
}

#[derive(Default)]
struct State {
    replies: VecDeque<Reply>,
    calls: Vec<Call>,
}

/// Client answering from a queue of canned replies and recording each call.
#[derive(Clone, Default)]
pub struct ScriptedClient {
    state: Arc<Mutex<State>>,
}

impl ScriptedClient {
    pub fn replying(replies: impl IntoIterator<Item = Reply>) -> Self {
        let client = Self::default();
        client.state.lock().unwrap().replies.extend(replies);
        client
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn last_payload(&self) -> Value {
        self.calls().last().expect("no call recorded").payload.clone()
    }

    fn next(
        &self,
        method: &'static str,
        table: &str,
        id: Option<RecordId>,
        payload: Value,
    ) -> Reply {
        let mut state = self.state.lock().unwrap();
        state.calls.push(Call {
            method,
            table: table.to_string(),
            id,
            payload,
        });
        state
            .replies
            .pop_front()
            .unwrap_or_else(|| panic!("no scripted reply for {method}"))
    }
}

fn transport(message: &'static str) -> CareHubError {
    CareHubError::Transport(message.into())
}

impl BackendClient for ScriptedClient {
    fn fetch_records(
        &self,
        table: &str,
        params: FetchParams,
    ) -> impl Future<Output = Result<FetchResponse, CareHubError>> + Send {
        let reply = self.next("fetch", table, None, serde_json::to_value(&params).unwrap());
        let result = match reply {
            Reply::Fetch(response) => Ok(response),
            Reply::Fail(message) => Err(transport(message)),
            _ => panic!("unexpected reply kind for fetch"),
        };
        async { result }
    }

    fn get_record_by_id(
        &self,
        table: &str,
        id: RecordId,
        params: GetParams,
    ) -> impl Future<Output = Result<GetResponse, CareHubError>> + Send {
        let reply = self.next("get", table, Some(id), serde_json::to_value(&params).unwrap());
        let result = match reply {
            Reply::Get(response) => Ok(response),
            Reply::Fail(message) => Err(transport(message)),
            _ => panic!("unexpected reply kind for get"),
        };
        async { result }
    }

    fn create_record(
        &self,
        table: &str,
        request: RecordsRequest,
    ) -> impl Future<Output = Result<MutationResponse, CareHubError>> + Send {
        let reply = self.next("create", table, None, serde_json::to_value(&request).unwrap());
        let result = match reply {
            Reply::Mutation(response) => Ok(response),
            Reply::Fail(message) => Err(transport(message)),
            _ => panic!("unexpected reply kind for create"),
        };
        async { result }
    }

    fn update_record(
        &self,
        table: &str,
        request: RecordsRequest,
    ) -> impl Future<Output = Result<MutationResponse, CareHubError>> + Send {
        let reply = self.next("update", table, None, serde_json::to_value(&request).unwrap());
        let result = match reply {
            Reply::Mutation(response) => Ok(response),
            Reply::Fail(message) => Err(transport(message)),
            _ => panic!("unexpected reply kind for update"),
        };
        async { result }
    }

    fn delete_record(
        &self,
        table: &str,
        request: DeleteRequest,
    ) -> impl Future<Output = Result<DeleteResponse, CareHubError>> + Send {
        let reply = self.next("delete", table, None, serde_json::to_value(&request).unwrap());
        let result = match reply {
            Reply::Delete(response) => Ok(response),
            Reply::Fail(message) => Err(transport(message)),
            _ => panic!("unexpected reply kind for delete"),
        };
        async { result }
    }
}

/// Factory that fails its first `failures` attempts, counting every attempt.
pub struct FlakyFactory {
    client: ScriptedClient,
    failures: usize,
    attempts: AtomicUsize,
}

impl FlakyFactory {
    pub fn new(client: ScriptedClient, failures: usize) -> Self {
        Self {
            client,
            failures,
            attempts: AtomicUsize::new(0),
        }
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

impl ClientFactory for FlakyFactory {
    type Client = ScriptedClient;

    fn connect(&self) -> Result<ScriptedClient, CareHubError> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst);
        if attempt < self.failures {
            return Err(ValidationError::MissingCredential("project_id").into());
        }
        Ok(self.client.clone())
    }
}

/// Notifier keeping every message for later assertions.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    received: Arc<Mutex<Vec<Notification>>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.received
            .lock()
            .unwrap()
            .iter()
            .map(|n| n.message.clone())
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.received.lock().unwrap().push(notification);
    }
}

/// Build a record from a JSON object literal.
pub fn record(value: Value) -> Record {
    match value {
        Value::Object(record) => record,
        other => panic!("expected a JSON object, got {other}"),
    }
}
