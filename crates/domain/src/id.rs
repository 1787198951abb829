//! Numeric record identifiers assigned by the backend.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ValidationError;
use crate::loose::parse_leading_int;

/// Identifier of a record in any backend table.
///
/// Serialized as a bare integer. Deserialization is lenient and also accepts
/// numeric strings and lookup objects carrying an `Id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct RecordId(i64);

impl RecordId {
    /// Wrap a raw integer.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Access the inner integer.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for RecordId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_leading_int(s)
            .map(Self)
            .ok_or_else(|| ValidationError::InvalidId(s.to_string()))
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        crate::loose::deserialize_opt_int(deserializer)?
            .map(Self)
            .ok_or_else(|| serde::de::Error::custom("expected an integer record id"))
    }
}

/// Deserialize an optional foreign key, tolerating every loose shape.
///
/// # Errors
///
/// Only fails when the underlying deserializer fails.
pub fn deserialize_opt_id<'de, D>(deserializer: D) -> Result<Option<RecordId>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(crate::loose::deserialize_opt_int(deserializer)?.map(RecordId))
}

/// Values that can be coerced into a [`RecordId`].
///
/// Integers convert directly; strings go through leading-integer parsing.
pub trait ToRecordId {
    /// Coerce `self` into a record id.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidId`] when no integer can be read.
    fn to_record_id(&self) -> Result<RecordId, ValidationError>;
}

impl ToRecordId for RecordId {
    fn to_record_id(&self) -> Result<RecordId, ValidationError> {
        Ok(*self)
    }
}

impl ToRecordId for i64 {
    fn to_record_id(&self) -> Result<RecordId, ValidationError> {
        Ok(RecordId(*self))
    }
}

impl ToRecordId for i32 {
    fn to_record_id(&self) -> Result<RecordId, ValidationError> {
        Ok(RecordId(i64::from(*self)))
    }
}

impl ToRecordId for u32 {
    fn to_record_id(&self) -> Result<RecordId, ValidationError> {
        Ok(RecordId(i64::from(*self)))
    }
}

impl ToRecordId for str {
    fn to_record_id(&self) -> Result<RecordId, ValidationError> {
        self.parse()
    }
}

impl ToRecordId for String {
    fn to_record_id(&self) -> Result<RecordId, ValidationError> {
        self.parse()
    }
}

impl<T: ToRecordId + ?Sized> ToRecordId for &T {
    fn to_record_id(&self) -> Result<RecordId, ValidationError> {
        (**self).to_record_id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_coerce_strings_like_integer_prefix_parsing() {
        assert_eq!("42".to_record_id().unwrap(), RecordId::new(42));
        assert_eq!(" 7th".to_record_id().unwrap(), RecordId::new(7));
    }

    #[test]
    fn should_reject_non_numeric_string() {
        let err = "bed-4".to_record_id().unwrap_err();
        assert_eq!(err, ValidationError::InvalidId("bed-4".to_string()));
    }

    #[test]
    fn should_coerce_integers_directly() {
        assert_eq!(3_i32.to_record_id().unwrap().get(), 3);
        assert_eq!(3_u32.to_record_id().unwrap().get(), 3);
        assert_eq!(RecordId::new(5).to_record_id().unwrap().get(), 5);
    }

    #[test]
    fn should_serialize_as_bare_integer() {
        let json = serde_json::to_string(&RecordId::new(12)).unwrap();
        assert_eq!(json, "12");
    }

    #[test]
    fn should_deserialize_from_lookup_object() {
        let id: RecordId = serde_json::from_str(r#"{"Id": 3, "Name": "North"}"#).unwrap();
        assert_eq!(id, RecordId::new(3));
    }

    #[test]
    fn should_fail_to_deserialize_from_null() {
        let result = serde_json::from_str::<RecordId>("null");
        assert!(result.is_err());
    }
}
