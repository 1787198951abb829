//! Ward: a hospital unit grouping beds on one floor.

use serde::{Deserialize, Serialize};

use crate::id::RecordId;
use crate::loose::{deserialize_opt_int, deserialize_opt_text};
use crate::record::{Record, RecordWriter, first_int, first_text};
use crate::table::{Table, WriteMode};

/// Bed count written when the caller supplies none.
pub const DEFAULT_TOTAL_BEDS: i64 = 0;
/// Floor written when the caller supplies none.
pub const DEFAULT_FLOOR: i64 = 1;

/// A stored ward record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ward {
    #[serde(rename = "Id")]
    pub id: RecordId,
    #[serde(rename = "Name_c", default, deserialize_with = "deserialize_opt_text")]
    pub name: Option<String>,
    #[serde(rename = "Type_c", default, deserialize_with = "deserialize_opt_text")]
    pub kind: Option<String>,
    #[serde(rename = "TotalBeds_c", default, deserialize_with = "deserialize_opt_int")]
    pub total_beds: Option<i64>,
    #[serde(rename = "Floor_c", default, deserialize_with = "deserialize_opt_int")]
    pub floor: Option<i64>,
}

/// Caller input for creating or updating a ward.
///
/// Every column can be given under its friendly name or its canonical name;
/// the friendly one wins.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WardInput {
    #[serde(default, deserialize_with = "deserialize_opt_text")]
    pub name: Option<String>,
    #[serde(rename = "Name_c", default, deserialize_with = "deserialize_opt_text")]
    pub name_c: Option<String>,
    #[serde(rename = "type", default, deserialize_with = "deserialize_opt_text")]
    pub kind: Option<String>,
    #[serde(rename = "Type_c", default, deserialize_with = "deserialize_opt_text")]
    pub kind_c: Option<String>,
    #[serde(rename = "totalBeds", default, deserialize_with = "deserialize_opt_int")]
    pub total_beds: Option<i64>,
    #[serde(rename = "TotalBeds_c", default, deserialize_with = "deserialize_opt_int")]
    pub total_beds_c: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_opt_int")]
    pub floor: Option<i64>,
    #[serde(rename = "Floor_c", default, deserialize_with = "deserialize_opt_int")]
    pub floor_c: Option<i64>,
}

/// Marker for the `ward_c` table.
#[derive(Debug, Clone, Copy, Default)]
pub struct Wards;

impl Table for Wards {
    const NAME: &'static str = "ward_c";
    const SINGULAR: &'static str = "ward";
    const PLURAL: &'static str = "wards";
    const FIELDS: &'static [&'static str] = &["Id", "Name_c", "Type_c", "TotalBeds_c", "Floor_c"];
    const ORDER_BY: &'static str = "Name_c";

    type Entity = Ward;
    type Input = WardInput;

    fn write_record(input: &WardInput, mode: WriteMode) -> Record {
        let mut writer = RecordWriter::new();
        if let WriteMode::Update(id) = mode {
            writer = writer.id(id);
        }
        writer
            .text(
                "Name_c",
                first_text([input.name.as_deref(), input.name_c.as_deref()]),
            )
            .text(
                "Type_c",
                first_text([input.kind.as_deref(), input.kind_c.as_deref()]),
            )
            .int(
                "TotalBeds_c",
                Some(
                    first_int([input.total_beds, input.total_beds_c])
                        .unwrap_or(DEFAULT_TOTAL_BEDS),
                ),
            )
            .int(
                "Floor_c",
                Some(first_int([input.floor, input.floor_c]).unwrap_or(DEFAULT_FLOOR)),
            )
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn input(value: Value) -> WardInput {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn should_apply_bed_and_floor_defaults_on_create() {
        let record = Wards::write_record(&input(json!({"name": "North"})), WriteMode::Create);
        assert_eq!(
            Value::Object(record),
            json!({"Name_c": "North", "TotalBeds_c": 0, "Floor_c": 1})
        );
    }

    #[test]
    fn should_apply_defaults_on_update_as_well() {
        let record = Wards::write_record(
            &input(json!({"Name_c": "North"})),
            WriteMode::Update(RecordId::new(2)),
        );
        assert_eq!(record.get("Id"), Some(&json!(2)));
        assert_eq!(record.get("Floor_c"), Some(&json!(1)));
    }

    #[test]
    fn should_prefer_friendly_names_and_coerce_numbers() {
        let record = Wards::write_record(
            &input(json!({
                "name": "A",
                "Name_c": "B",
                "type": "ICU",
                "totalBeds": "12",
                "TotalBeds_c": 4,
                "Floor_c": 3
            })),
            WriteMode::Create,
        );
        assert_eq!(record.get("Name_c"), Some(&json!("A")));
        assert_eq!(record.get("Type_c"), Some(&json!("ICU")));
        assert_eq!(record.get("TotalBeds_c"), Some(&json!(12)));
        assert_eq!(record.get("Floor_c"), Some(&json!(3)));
    }

    #[test]
    fn should_treat_zero_as_missing_when_coalescing_counts() {
        let record = Wards::write_record(
            &input(json!({"name": "N", "floor": 0, "totalBeds": 0, "TotalBeds_c": 5})),
            WriteMode::Create,
        );
        assert_eq!(
            Value::Object(record),
            json!({"Name_c": "N", "TotalBeds_c": 5, "Floor_c": 1})
        );
    }

    #[test]
    fn should_fall_back_to_canonical_when_friendly_is_empty() {
        let record = Wards::write_record(
            &input(json!({"name": "", "Name_c": "B"})),
            WriteMode::Create,
        );
        assert_eq!(record.get("Name_c"), Some(&json!("B")));
    }

    #[test]
    fn should_decode_stored_ward() {
        let mut record = Record::new();
        record.insert("Id".to_string(), json!(1));
        record.insert("Name_c".to_string(), json!("North"));
        record.insert("TotalBeds_c".to_string(), json!("20"));
        let ward = Wards::decode(record).unwrap();
        assert_eq!(ward.id, RecordId::new(1));
        assert_eq!(ward.name.as_deref(), Some("North"));
        assert_eq!(ward.total_beds, Some(20));
        assert_eq!(ward.floor, None);
    }
}
