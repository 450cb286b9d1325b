//! Field-level helpers shared by the request models: raw update fields,
//! date/timestamp formats and validator glue.

use std::borrow::Cow;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serializer};
use serde_json::Value;
use validator::{ValidationError, ValidationErrors};

use crate::error::{AppError, AppResult};

/// Calendar date format used on the wire
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// Timestamp format used on the wire
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ---------------------------------------------------------------------------
// RawField
// ---------------------------------------------------------------------------

/// A single field of an update body, exactly as the client sent it.
///
/// Use with `#[serde(default)]` so that a missing key becomes `Absent`.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RawField {
    #[default]
    Absent,
    Null,
    Value(Value),
}

impl<'de> Deserialize<'de> for RawField {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Null => RawField::Null,
            v => RawField::Value(v),
        })
    }
}

impl RawField {
    /// Absent, null and empty-string values all mean "not provided".
    pub fn provided(self) -> Option<Value> {
        match self {
            RawField::Absent | RawField::Null => None,
            RawField::Value(Value::String(s)) if s.is_empty() => None,
            RawField::Value(v) => Some(v),
        }
    }

    /// Decode a non-nullable field: `None` when not provided.
    pub fn decode<T: DeserializeOwned>(self, field: &str) -> AppResult<Option<T>> {
        self.provided()
            .map(|v| decode_value(v, field))
            .transpose()
    }

    /// Decode a nullable field: `None` when absent, `Some(None)` when the client
    /// sent null or an empty string to clear it.
    pub fn decode_nullable<T: DeserializeOwned>(self, field: &str) -> AppResult<Option<Option<T>>> {
        match self {
            RawField::Absent => Ok(None),
            RawField::Null => Ok(Some(None)),
            RawField::Value(Value::String(s)) if s.is_empty() => Ok(Some(None)),
            RawField::Value(v) => decode_value(v, field).map(|t| Some(Some(t))),
        }
    }
}

/// Unwraps a field the create schema has already checked for presence.
pub fn required<T>(value: Option<T>, field: &str) -> AppResult<T> {
    value.ok_or_else(|| AppError::Validation(format!("{} is required", field)))
}

fn decode_value<T: DeserializeOwned>(value: Value, field: &str) -> AppResult<T> {
    serde_json::from_value(value)
        .map_err(|_| AppError::Validation(format!("{} has an invalid type", field)))
}

// ---------------------------------------------------------------------------
// Dates and timestamps
// ---------------------------------------------------------------------------

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).ok()
}

/// Accepts `YYYY-MM-DD HH:MM[:SS]`, `YYYY-MM-DDTHH:MM[:SS]` and RFC 3339.
/// Timestamps carrying an offset are converted to UTC; the others are stored
/// as written.
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    const FORMATS: [&str; 4] = [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M",
    ];
    FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.naive_utc()))
}

/// Lower bound of a time range: a bare date means the start of that day.
pub fn parse_range_start(s: &str) -> Option<NaiveDateTime> {
    parse_timestamp(s).or_else(|| parse_date(s).map(|d| d.and_time(NaiveTime::MIN)))
}

/// Upper bound of a time range: a bare date covers the whole day.
pub fn parse_range_end(s: &str) -> Option<NaiveDateTime> {
    parse_timestamp(s).or_else(|| {
        parse_date(s).and_then(|d| d.and_hms_opt(23, 59, 59))
    })
}

/// Serde helper writing timestamps as `YYYY-MM-DD HH:MM:SS`
pub mod timestamp {
    use super::*;

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.format(TIMESTAMP_FORMAT).to_string())
    }
}

// ---------------------------------------------------------------------------
// Validators
// ---------------------------------------------------------------------------

pub fn non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(ValidationError::new("non_negative"));
    }
    Ok(())
}

/// Amounts must fit `NUMERIC(12, 2)` once rounded to cents.
pub fn amount_in_range(value: &Decimal) -> Result<(), ValidationError> {
    if value.round_dp(2).abs() >= Decimal::new(10_000_000_000, 0) {
        return Err(ValidationError::new("amount_range"));
    }
    Ok(())
}

fn max_chars(value: &str, max: usize) -> Result<(), ValidationError> {
    if value.chars().count() > max {
        return Err(ValidationError::new("max_length"));
    }
    Ok(())
}

pub fn fits_varchar_50(value: &str) -> Result<(), ValidationError> {
    max_chars(value, 50)
}

pub fn fits_varchar_100(value: &str) -> Result<(), ValidationError> {
    max_chars(value, 100)
}

pub fn calendar_date(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || parse_date(value).is_some() {
        return Ok(());
    }
    Err(ValidationError::new("date"))
}

pub fn timestamp_value(value: &str) -> Result<(), ValidationError> {
    match parse_timestamp(value) {
        Some(_) => Ok(()),
        None => Err(ValidationError::new("timestamp")),
    }
}

/// Reports the first failed constraint, walking fields in declaration order.
pub fn first_error(errors: &ValidationErrors, order: &[&str]) -> AppError {
    let mut failed: Vec<(String, ValidationError)> = errors
        .field_errors()
        .into_iter()
        .filter_map(|(name, errs)| {
            let name: &str = name.as_ref();
            errs.first().map(|e| (name.to_string(), e.clone()))
        })
        .collect();
    failed.sort_by_key(|(name, _)| {
        order
            .iter()
            .position(|o| *o == name.as_str())
            .unwrap_or(usize::MAX)
    });

    let message = failed
        .first()
        .map(|(name, err)| match &err.message {
            Some(msg) => msg.to_string(),
            None => default_message(name, &err.code),
        })
        .unwrap_or_else(|| "Invalid request".to_string());
    AppError::Validation(message)
}

fn default_message(field: &str, code: &Cow<'static, str>) -> String {
    match code.as_ref() {
        "required" => format!("{} is required", field),
        "length" => format!("{} must not be empty", field),
        "non_negative" => format!("{} must be a non-negative number", field),
        "max_length" => format!("{} is too long", field),
        "amount_range" => format!("{} is too large", field),
        _ => format!("{} is invalid", field),
    }
}
