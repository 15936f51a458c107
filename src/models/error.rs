//! Structural validation errors for the domain model

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Category of a schema violation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaErrorKind {
    /// A required field is absent or empty
    MissingField,
    /// A numeric or temporal value lies outside its allowed range
    OutOfRange,
    /// A field has the wrong JSON type
    WrongType,
    /// A string does not match its expected shape (URL, code, timestamp...)
    FormatMismatch,
}

impl fmt::Display for SchemaErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SchemaErrorKind::MissingField => "missing field",
            SchemaErrorKind::OutOfRange => "out of range",
            SchemaErrorKind::WrongType => "wrong type",
            SchemaErrorKind::FormatMismatch => "format mismatch",
        };
        f.write_str(label)
    }
}

/// A field of a domain entity violated its constraint
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind} at `{field}`: {message}")]
pub struct SchemaError {
    pub kind: SchemaErrorKind,
    /// Dotted path of the offending field, e.g. `itinerary.segments[1].arrival_time`
    pub field: String,
    pub message: String,
}

impl SchemaError {
    pub fn new(kind: SchemaErrorKind, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn missing_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(SchemaErrorKind::MissingField, field, message)
    }

    pub fn out_of_range(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(SchemaErrorKind::OutOfRange, field, message)
    }

    pub fn wrong_type(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(SchemaErrorKind::WrongType, field, message)
    }

    pub fn format_mismatch(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(SchemaErrorKind::FormatMismatch, field, message)
    }

    /// Prefix the field path with the name of the enclosing field
    pub fn at(mut self, parent: &str) -> Self {
        self.field = if self.field.is_empty() {
            parent.to_string()
        } else if self.field.starts_with('[') {
            format!("{}{}", parent, self.field)
        } else {
            format!("{}.{}", parent, self.field)
        };
        self
    }
}

impl From<serde_json::Error> for SchemaError {
    fn from(err: serde_json::Error) -> Self {
        let message = err.to_string();

        if message.starts_with("missing field") {
            // serde reports the name between backticks: missing field `name`
            let field = message.split('`').nth(1).unwrap_or_default().to_string();
            SchemaError::missing_field(field, message)
        } else if message.starts_with("invalid type") {
            SchemaError::wrong_type("", message)
        } else if message.starts_with("invalid value") {
            // e.g. a negative number for an unsigned field
            SchemaError::out_of_range("", message)
        } else {
            SchemaError::format_mismatch("", message)
        }
    }
}

/// Fail with `OutOfRange` unless `min <= value <= max`. NaN is always rejected.
pub(crate) fn check_range(field: &str, value: f64, min: f64, max: f64) -> Result<(), SchemaError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(SchemaError::out_of_range(
            field,
            format!("{} is not within [{}, {}]", value, min, max),
        ))
    }
}

/// Fail with `OutOfRange` unless `value` is a finite number `>= 0`
pub(crate) fn check_non_negative(field: &str, value: f64) -> Result<(), SchemaError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SchemaError::out_of_range(
            field,
            format!("{} must be a non-negative number", value),
        ))
    }
}

pub(crate) fn check_not_blank(field: &str, value: &str) -> Result<(), SchemaError> {
    if value.trim().is_empty() {
        Err(SchemaError::missing_field(field, "must not be empty"))
    } else {
        Ok(())
    }
}

/// Accept only absolute http(s) URLs
pub(crate) fn check_http_url(field: &str, value: &str) -> Result<(), SchemaError> {
    let url = reqwest::Url::parse(value)
        .map_err(|e| SchemaError::format_mismatch(field, format!("invalid URL `{}`: {}", value, e)))?;

    match url.scheme() {
        "http" | "https" if url.host_str().is_some() => Ok(()),
        _ => Err(SchemaError::format_mismatch(
            field,
            format!("`{}` is not an http(s) URL", value),
        )),
    }
}
