//! Patient service: data access for `patient_c` records.

use carehub_domain::patient::Patients;

use crate::services::record_service::RecordService;

/// Facade over the patient table.
pub type PatientService<F, N> = RecordService<Patients, F, N>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::Preconnected;
    use crate::services::test_support::{RecordingNotifier, Reply, ScriptedClient, record};
    use carehub_domain::patient::PatientInput;
    use carehub_domain::response::{FetchResponse, MutationResponse, RecordResult};
    use serde_json::json;

    fn service(
        replies: Vec<Reply>,
    ) -> (
        PatientService<Preconnected<ScriptedClient>, RecordingNotifier>,
        ScriptedClient,
    ) {
        let client = ScriptedClient::replying(replies);
        let svc = PatientService::new(Preconnected(client.clone()), RecordingNotifier::default());
        (svc, client)
    }

    #[tokio::test]
    async fn should_create_patient_with_joined_allergies() {
        let (svc, client) = service(vec![Reply::Mutation(MutationResponse {
            success: true,
            message: None,
            results: Some(vec![RecordResult::succeeded(record(json!({
                "Id": 21,
                "Name_c": "Jane Doe",
                "DateOfBirth_c": "1990-01-01",
                "Allergies_c": "peanuts, latex"
            })))]),
        })]);
        let input: PatientInput = serde_json::from_value(json!({
            "name": "Jane Doe",
            "dateOfBirth": "1990-01-01",
            "allergies": ["peanuts", "latex"]
        }))
        .unwrap();

        let created = svc.create(&input).await.unwrap();

        assert_eq!(created.id.get(), 21);
        assert_eq!(created.allergy_list(), vec!["peanuts", "latex"]);
        let payload = client.last_payload();
        assert_eq!(payload["records"][0]["Allergies_c"], json!("peanuts, latex"));
        assert_eq!(client.calls()[0].table, "patient_c");
    }

    #[tokio::test]
    async fn should_list_patients_ordered_by_name_with_full_projection() {
        let (svc, client) = service(vec![Reply::Fetch(FetchResponse {
            success: true,
            ..FetchResponse::default()
        })]);

        assert!(svc.list().await.is_empty());

        let payload = client.last_payload();
        assert_eq!(
            payload["orderBy"],
            json!([{"fieldName": "Name_c", "sorttype": "ASC"}])
        );
        assert_eq!(payload["fields"].as_array().unwrap().len(), 12);
        assert_eq!(payload["fields"][11], json!({"field": {"Name": "MedicalHistory_c"}}));
    }
}
