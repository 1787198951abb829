//! Lenient integer handling for loosely typed backend columns.
//!
//! The hosted backend stores foreign keys and counters as integers, but callers
//! and the backend itself hand them around as numbers, numeric strings, or
//! lookup objects (`{"Id": 4, "Name": "..."}`).

use serde::{Deserialize, Deserializer};

/// Parse the leading integer of `text`.
///
/// Leading whitespace is skipped, an optional sign is honoured and the run of
/// ASCII digits that follows is read; anything after it is ignored. Returns
/// `None` when no digit follows, or when the value overflows `i64`.
#[must_use]
pub fn parse_leading_int(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if end == 0 {
        return None;
    }
    let magnitude: i64 = rest[..end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Raw {
    Int(i64),
    Float(f64),
    Text(String),
    Lookup {
        #[serde(rename = "Id")]
        id: i64,
    },
    Other(serde_json::Value),
}

impl Raw {
    #[allow(clippy::cast_possible_truncation)]
    fn into_int(self) -> Option<i64> {
        match self {
            Self::Int(value) | Self::Lookup { id: value } => Some(value),
            Self::Float(value) if value.is_finite() => Some(value.trunc() as i64),
            Self::Text(text) => parse_leading_int(&text),
            Self::Float(_) | Self::Other(_) => None,
        }
    }
}

/// Deserialize an optional loosely typed integer.
///
/// Missing, `null`, and unparsable values all become `None`.
///
/// # Errors
///
/// Only fails when the underlying deserializer fails.
pub fn deserialize_opt_int<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Raw> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(Raw::into_int))
}

/// Deserialize an optional text column.
///
/// Strings pass through, numbers and booleans are rendered as text, anything
/// else becomes `None`.
///
/// # Errors
///
/// Only fails when the underlying deserializer fails.
pub fn deserialize_opt_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value: Option<serde_json::Value> = Option::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(text)) => Some(text),
        Some(serde_json::Value::Number(number)) => Some(number.to_string()),
        Some(serde_json::Value::Bool(flag)) => Some(flag.to_string()),
        _ => None,
    })
}
