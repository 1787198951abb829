//! Tagged outcomes of batch writes, before they are collapsed for callers.

use carehub_domain::error::{CareHubError, RejectedError};
use carehub_domain::record::Record;
use carehub_domain::response::{DeleteResponse, FieldError, MutationResponse};
use carehub_domain::table::Table;

/// A record the backend refused, with whatever detail it gave.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFailure {
    pub message: Option<String>,
    pub errors: Vec<FieldError>,
}

/// Per-record results of a create or update request.
#[derive(Debug)]
pub struct WriteOutcome<E> {
    /// Decoded records of the successful results, in response order.
    pub succeeded: Vec<E>,
    pub failed: Vec<RecordFailure>,
}

impl<E> Default for WriteOutcome<E> {
    fn default() -> Self {
        Self {
            succeeded: Vec::new(),
            failed: Vec::new(),
        }
    }
}

impl<E> WriteOutcome<E> {
    /// Split a mutation response into successes and failures.
    ///
    /// A response without `results` yields an empty outcome. Successful
    /// results that carry no record, or a record of an unexpected shape, are
    /// skipped.
    ///
    /// # Errors
    ///
    /// Returns [`CareHubError::Rejected`] when the envelope reports failure.
    pub fn from_response<T>(response: MutationResponse) -> Result<Self, CareHubError>
    where
        T: Table<Entity = E>,
    {
        if !response.success {
            return Err(RejectedError::from_message(response.message).into());
        }

        let mut outcome = Self::default();
        for result in response.results.unwrap_or_default() {
            if result.success {
                if let Some(record) = result.data.and_then(decode_or_skip::<T>) {
                    outcome.succeeded.push(record);
                }
            } else {
                outcome.failed.push(RecordFailure {
                    message: result.message,
                    errors: result.errors,
                });
            }
        }
        Ok(outcome)
    }

    /// Take the first successful record.
    #[must_use]
    pub fn into_first(self) -> Option<E> {
        self.succeeded.into_iter().next()
    }
}

/// Decode one returned record, logging and dropping it when malformed.
pub(crate) fn decode_or_skip<T: Table>(record: Record) -> Option<T::Entity> {
    match T::decode(record) {
        Ok(entity) => Some(entity),
        Err(err) => {
            tracing::warn!(table = T::NAME, %err, "skipping malformed record");
            None
        }
    }
}

/// Per-id results of a delete request.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DeleteOutcome {
    pub succeeded: usize,
    /// Messages of the failed results (`None` when the backend gave none).
    pub failed: Vec<Option<String>>,
}

impl DeleteOutcome {
    /// Split a delete response.
    ///
    /// # Errors
    ///
    /// Returns [`CareHubError::Rejected`] when the envelope reports failure.
    pub fn from_response(response: DeleteResponse) -> Result<Self, CareHubError> {
        if !response.success {
            return Err(RejectedError::from_message(response.message).into());
        }

        let mut outcome = Self::default();
        for result in response.results.unwrap_or_default() {
            if result.success {
                outcome.succeeded += 1;
            } else {
                outcome.failed.push(result.message);
            }
        }
        Ok(outcome)
    }

    /// Whether at least one requested id was deleted.
    #[must_use]
    pub fn any_deleted(&self) -> bool {
        self.succeeded > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carehub_domain::response::{DeleteResult, RecordResult};
    use carehub_domain::ward::Wards;
    use serde_json::json;

    fn ward_record(id: i64) -> carehub_domain::record::Record {
        let serde_json::Value::Object(record) = json!({"Id": id, "Name_c": "North"}) else {
            unreachable!()
        };
        record
    }

    #[test]
    fn should_split_successes_and_failures() {
        let response = MutationResponse {
            success: true,
            message: None,
            results: Some(vec![
                RecordResult::failed("rejected", vec![FieldError::new("Name", "is required")]),
                RecordResult::succeeded(ward_record(1)),
                RecordResult::succeeded(ward_record(2)),
            ]),
        };
        let outcome = WriteOutcome::from_response::<Wards>(response).unwrap();
        assert_eq!(outcome.failed.len(), 1);
        assert_eq!(outcome.failed[0].errors.len(), 1);
        assert_eq!(outcome.into_first().unwrap().id.get(), 1);
    }

    #[test]
    fn should_skip_malformed_success_and_keep_failures() {
        let serde_json::Value::Object(pending) = json!({"Id": "pending"}) else {
            unreachable!()
        };
        let response = MutationResponse {
            success: true,
            message: None,
            results: Some(vec![
                RecordResult::succeeded(pending),
                RecordResult::failed("rejected", vec![]),
                RecordResult::succeeded(ward_record(4)),
            ]),
        };
        let outcome = WriteOutcome::from_response::<Wards>(response).unwrap();
        assert_eq!(outcome.failed.len(), 1);
        assert_eq!(outcome.succeeded.len(), 1);
        assert_eq!(outcome.into_first().unwrap().id.get(), 4);
    }

    #[test]
    fn should_yield_empty_outcome_when_results_missing() {
        let response = MutationResponse {
            success: true,
            ..MutationResponse::default()
        };
        let outcome = WriteOutcome::from_response::<Wards>(response).unwrap();
        assert!(outcome.succeeded.is_empty());
        assert!(outcome.failed.is_empty());
    }

    #[test]
    fn should_reject_unsuccessful_envelope() {
        let response = MutationResponse {
            success: false,
            message: Some("table locked".to_string()),
            results: None,
        };
        let err = WriteOutcome::from_response::<Wards>(response).unwrap_err();
        assert_eq!(err.backend_message(), Some("table locked"));
    }

    #[test]
    fn should_report_whether_any_id_was_deleted() {
        let response = DeleteResponse {
            success: true,
            message: None,
            results: Some(vec![
                DeleteResult {
                    success: false,
                    message: Some("missing".to_string()),
                },
                DeleteResult {
                    success: true,
                    message: None,
                },
            ]),
        };
        let outcome = DeleteOutcome::from_response(response).unwrap();
        assert!(outcome.any_deleted());
        assert_eq!(outcome.failed, vec![Some("missing".to_string())]);
    }

    #[test]
    fn should_report_nothing_deleted_without_results() {
        let response = DeleteResponse {
            success: true,
            ..DeleteResponse::default()
        };
        assert!(!DeleteOutcome::from_response(response).unwrap().any_deleted());
    }
}
