//! Client factory that checks credentials before handing out the backend.

use carehub_app::ports::{ClientFactory, Credentials};
use carehub_domain::error::CareHubError;

use crate::backend::MemoryBackend;

/// Connects facades to a shared [`MemoryBackend`].
///
/// Every successful [`connect`](ClientFactory::connect) returns a clone of the
/// same backend, so all facades see the same tables.
#[derive(Debug, Clone)]
pub struct MemoryConnector {
    backend: MemoryBackend,
    credentials: Credentials,
}

impl MemoryConnector {
    #[must_use]
    pub fn new(backend: MemoryBackend, credentials: Credentials) -> Self {
        Self {
            backend,
            credentials,
        }
    }

    pub fn backend(&self) -> &MemoryBackend {
        &self.backend
    }
}

impl ClientFactory for MemoryConnector {
    type Client = MemoryBackend;

    fn connect(&self) -> Result<MemoryBackend, CareHubError> {
        self.credentials.validate()?;
        tracing::debug!(project_id = %self.credentials.project_id, "connected to in-memory backend");
        Ok(self.backend.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carehub_domain::error::ValidationError;

    #[test]
    fn should_hand_out_shared_backend() {
        let connector = MemoryConnector::new(
            MemoryBackend::default(),
            Credentials::new("proj", "key"),
        );

        let client = connector.connect().unwrap();
        let ward = serde_json::json!({"Name_c": "ICU"});
        let serde_json::Value::Object(ward) = ward else {
            unreachable!()
        };
        client.seed("ward_c", vec![ward]).unwrap();

        assert_eq!(connector.backend().count("ward_c"), 1);
    }

    #[test]
    fn should_refuse_to_connect_without_public_key() {
        let connector =
            MemoryConnector::new(MemoryBackend::default(), Credentials::new("proj", ""));

        let err = connector.connect().unwrap_err();

        assert!(matches!(
            err,
            CareHubError::Validation(ValidationError::MissingCredential("public_key"))
        ));
    }
}
