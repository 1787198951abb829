//! Patient: demographic and clinical summary of a person under care.

use serde::{Deserialize, Serialize};

use crate::id::RecordId;
use crate::loose::deserialize_opt_text;
use crate::record::{Record, RecordWriter, first_text};
use crate::table::{Table, WriteMode};

/// Separator used when a list column is flattened to text.
pub const LIST_SEPARATOR: &str = ", ";

/// A stored patient record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    #[serde(rename = "Id")]
    pub id: RecordId,
    #[serde(rename = "Name_c", default, deserialize_with = "deserialize_opt_text")]
    pub name: Option<String>,
    #[serde(rename = "DateOfBirth_c", default, deserialize_with = "deserialize_opt_text")]
    pub date_of_birth: Option<String>,
    #[serde(rename = "Gender_c", default, deserialize_with = "deserialize_opt_text")]
    pub gender: Option<String>,
    #[serde(rename = "Phone_c", default, deserialize_with = "deserialize_opt_text")]
    pub phone: Option<String>,
    #[serde(rename = "Email_c", default, deserialize_with = "deserialize_opt_text")]
    pub email: Option<String>,
    #[serde(rename = "Address_c", default, deserialize_with = "deserialize_opt_text")]
    pub address: Option<String>,
    #[serde(rename = "BloodType_c", default, deserialize_with = "deserialize_opt_text")]
    pub blood_type: Option<String>,
    #[serde(rename = "Allergies_c", default, deserialize_with = "deserialize_opt_text")]
    pub allergies: Option<String>,
    #[serde(
        rename = "EmergencyContactName_c",
        default,
        deserialize_with = "deserialize_opt_text"
    )]
    pub emergency_contact_name: Option<String>,
    #[serde(
        rename = "EmergencyContactPhone_c",
        default,
        deserialize_with = "deserialize_opt_text"
    )]
    pub emergency_contact_phone: Option<String>,
    #[serde(
        rename = "MedicalHistory_c",
        default,
        deserialize_with = "deserialize_opt_text"
    )]
    pub medical_history: Option<String>,
}

impl Patient {
    /// Allergies split back into individual entries.
    #[must_use]
    pub fn allergy_list(&self) -> Vec<&str> {
        split_list(self.allergies.as_deref())
    }

    /// Medical history split back into individual entries.
    #[must_use]
    pub fn medical_history_list(&self) -> Vec<&str> {
        split_list(self.medical_history.as_deref())
    }
}

fn split_list(text: Option<&str>) -> Vec<&str> {
    text.map(|text| {
        text.split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .collect()
    })
    .unwrap_or_default()
}

/// A column that callers may send either as text or as a list of entries.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TextOrList {
    List(Vec<String>),
    Text(String),
}

impl TextOrList {
    /// Flatten into the stored text form.
    #[must_use]
    pub fn to_text(&self) -> String {
        match self {
            Self::List(items) => items.join(LIST_SEPARATOR),
            Self::Text(text) => text.clone(),
        }
    }
}

/// Nested emergency contact as sent by form layers.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmergencyContact {
    #[serde(default, deserialize_with = "deserialize_opt_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_text")]
    pub phone: Option<String>,
}

/// Caller input for creating or updating a patient.
///
/// The emergency contact may come nested (`emergencyContact.name`), flat
/// (`emergencyContactName`) or canonical (`EmergencyContactName_c`), in that
/// order of preference.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientInput {
    #[serde(default, deserialize_with = "deserialize_opt_text")]
    pub name: Option<String>,
    #[serde(rename = "Name_c", default, deserialize_with = "deserialize_opt_text")]
    pub name_c: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_text")]
    pub date_of_birth: Option<String>,
    #[serde(rename = "DateOfBirth_c", default, deserialize_with = "deserialize_opt_text")]
    pub date_of_birth_c: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_text")]
    pub gender: Option<String>,
    #[serde(rename = "Gender_c", default, deserialize_with = "deserialize_opt_text")]
    pub gender_c: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_text")]
    pub phone: Option<String>,
    #[serde(rename = "Phone_c", default, deserialize_with = "deserialize_opt_text")]
    pub phone_c: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_text")]
    pub email: Option<String>,
    #[serde(rename = "Email_c", default, deserialize_with = "deserialize_opt_text")]
    pub email_c: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_text")]
    pub address: Option<String>,
    #[serde(rename = "Address_c", default, deserialize_with = "deserialize_opt_text")]
    pub address_c: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_text")]
    pub blood_type: Option<String>,
    #[serde(rename = "BloodType_c", default, deserialize_with = "deserialize_opt_text")]
    pub blood_type_c: Option<String>,
    #[serde(default)]
    pub allergies: Option<TextOrList>,
    #[serde(rename = "Allergies_c", default)]
    pub allergies_c: Option<TextOrList>,
    #[serde(default)]
    pub emergency_contact: Option<EmergencyContact>,
    #[serde(default, deserialize_with = "deserialize_opt_text")]
    pub emergency_contact_name: Option<String>,
    #[serde(
        rename = "EmergencyContactName_c",
        default,
        deserialize_with = "deserialize_opt_text"
    )]
    pub emergency_contact_name_c: Option<String>,
    #[serde(default, deserialize_with = "deserialize_opt_text")]
    pub emergency_contact_phone: Option<String>,
    #[serde(
        rename = "EmergencyContactPhone_c",
        default,
        deserialize_with = "deserialize_opt_text"
    )]
    pub emergency_contact_phone_c: Option<String>,
    #[serde(default)]
    pub medical_history: Option<TextOrList>,
    #[serde(rename = "MedicalHistory_c", default)]
    pub medical_history_c: Option<TextOrList>,
}

fn list_text(friendly: Option<&TextOrList>, canonical: Option<&TextOrList>) -> Option<String> {
    let friendly = friendly.map(TextOrList::to_text);
    let canonical = canonical.map(TextOrList::to_text);
    first_text([friendly.as_deref(), canonical.as_deref()])
}

/// Marker for the `patient_c` table.
#[derive(Debug, Clone, Copy, Default)]
pub struct Patients;

impl Table for Patients {
    const NAME: &'static str = "patient_c";
    const SINGULAR: &'static str = "patient";
    const PLURAL: &'static str = "patients";
    const FIELDS: &'static [&'static str] = &[
        "Id",
        "Name_c",
        "DateOfBirth_c",
        "Gender_c",
        "Phone_c",
        "Email_c",
        "Address_c",
        "BloodType_c",
        "Allergies_c",
        "EmergencyContactName_c",
        "EmergencyContactPhone_c",
        "MedicalHistory_c",
    ];
    const ORDER_BY: &'static str = "Name_c";

    type Entity = Patient;
    type Input = PatientInput;

    fn write_record(input: &PatientInput, mode: WriteMode) -> Record {
        let mut writer = RecordWriter::new();
        if let WriteMode::Update(id) = mode {
            writer = writer.id(id);
        }
        let contact = input.emergency_contact.as_ref();

        writer
            .text(
                "Name_c",
                first_text([input.name.as_deref(), input.name_c.as_deref()]),
            )
            .text(
                "DateOfBirth_c",
                first_text([
                    input.date_of_birth.as_deref(),
                    input.date_of_birth_c.as_deref(),
                ]),
            )
            .text(
                "Gender_c",
                first_text([input.gender.as_deref(), input.gender_c.as_deref()]),
            )
            .text(
                "Phone_c",
                first_text([input.phone.as_deref(), input.phone_c.as_deref()]),
            )
            .text(
                "Email_c",
                first_text([input.email.as_deref(), input.email_c.as_deref()]),
            )
            .text(
                "Address_c",
                first_text([input.address.as_deref(), input.address_c.as_deref()]),
            )
            .text(
                "BloodType_c",
                first_text([input.blood_type.as_deref(), input.blood_type_c.as_deref()]),
            )
            .text(
                "Allergies_c",
                list_text(input.allergies.as_ref(), input.allergies_c.as_ref()),
            )
            .text(
                "EmergencyContactName_c",
                first_text([
                    contact.and_then(|c| c.name.as_deref()),
                    input.emergency_contact_name.as_deref(),
                    input.emergency_contact_name_c.as_deref(),
                ]),
            )
            .text(
                "EmergencyContactPhone_c",
                first_text([
                    contact.and_then(|c| c.phone.as_deref()),
                    input.emergency_contact_phone.as_deref(),
                    input.emergency_contact_phone_c.as_deref(),
                ]),
            )
            .text(
                "MedicalHistory_c",
                list_text(
                    input.medical_history.as_ref(),
                    input.medical_history_c.as_ref(),
                ),
            )
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn input(value: Value) -> PatientInput {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn should_join_allergy_list_with_comma_space() {
        let record = Patients::write_record(
            &input(json!({
                "name": "Jane Doe",
                "dateOfBirth": "1990-01-01",
                "allergies": ["peanuts", "latex"]
            })),
            WriteMode::Create,
        );
        assert_eq!(
            Value::Object(record),
            json!({
                "Name_c": "Jane Doe",
                "DateOfBirth_c": "1990-01-01",
                "Allergies_c": "peanuts, latex"
            })
        );
    }

    #[test]
    fn should_pass_text_history_through_unchanged() {
        let record = Patients::write_record(
            &input(json!({"medicalHistory": "asthma; appendectomy"})),
            WriteMode::Create,
        );
        assert_eq!(
            record.get("MedicalHistory_c"),
            Some(&json!("asthma; appendectomy"))
        );
    }

    #[test]
    fn should_prefer_nested_emergency_contact_then_flat_then_canonical() {
        let record = Patients::write_record(
            &input(json!({
                "emergencyContact": {"name": "Nested"},
                "emergencyContactName": "Flat",
                "EmergencyContactName_c": "Canonical",
                "emergencyContactPhone": "555-0100",
                "EmergencyContactPhone_c": "555-0199"
            })),
            WriteMode::Create,
        );
        assert_eq!(record.get("EmergencyContactName_c"), Some(&json!("Nested")));
        assert_eq!(
            record.get("EmergencyContactPhone_c"),
            Some(&json!("555-0100"))
        );
    }

    #[test]
    fn should_prefer_friendly_name_over_canonical() {
        let record = Patients::write_record(
            &input(json!({"name": "A", "Name_c": "B"})),
            WriteMode::Update(RecordId::new(1)),
        );
        assert_eq!(record.get("Name_c"), Some(&json!("A")));
        assert_eq!(record.get("Id"), Some(&json!(1)));
    }

    #[test]
    fn should_split_stored_lists() {
        let Value::Object(record) = json!({
            "Id": 3,
            "Allergies_c": "peanuts, latex",
            "MedicalHistory_c": null
        }) else {
            unreachable!()
        };
        let patient = Patients::decode(record).unwrap();
        assert_eq!(patient.allergy_list(), vec!["peanuts", "latex"]);
        assert!(patient.medical_history_list().is_empty());
    }
}
