//! Normalization helpers for loosely-typed form and query input.
//!
//! HTML forms submit every input, blank or not, and query strings carry
//! booleans as text. These helpers turn that input into the typed values the
//! store expects.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

use crate::error::CoreError;

/// Treat a missing, empty, or whitespace-only string as "not sent".
pub fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Parse a boolean field value. Accepts `true`/`false` in any case.
pub fn parse_bool(raw: &str) -> Result<bool, CoreError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(CoreError::Validation(format!(
            "expected 'true' or 'false', got '{other}'"
        ))),
    }
}

/// Serde adapter for optional booleans that may arrive either as JSON
/// booleans or as form/query strings. Blank strings deserialize to `None`.
///
/// Use with `#[serde(default, deserialize_with = "lenient_bool")]`.
pub fn lenient_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrString {
        Bool(bool),
        Text(String),
    }

    match Option::<BoolOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(BoolOrString::Bool(b)) => Ok(Some(b)),
        Some(BoolOrString::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(BoolOrString::Text(s)) => parse_bool(&s)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

/// A boolean field as the client sent it, kept even when it is not a boolean
/// so the caller can decide how to refuse it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoolInput {
    Value(bool),
    /// The raw text of a value that is neither a boolean nor `true`/`false`.
    Unrecognized(String),
}

impl BoolInput {
    pub fn to_bool(&self) -> Result<bool, CoreError> {
        match self {
            BoolInput::Value(b) => Ok(*b),
            BoolInput::Unrecognized(raw) => parse_bool(raw),
        }
    }
}

/// Like [`lenient_bool`], but never fails: values that are not booleans come
/// back as [`BoolInput::Unrecognized`] instead of a decoding error.
///
/// Use with `#[serde(default, deserialize_with = "bool_input")]`.
pub fn bool_input<'de, D>(deserializer: D) -> Result<Option<BoolInput>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Bool(bool),
        Text(String),
        Other(IgnoredAny),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        None => None,
        Some(Raw::Bool(b)) => Some(BoolInput::Value(b)),
        Some(Raw::Text(s)) if s.trim().is_empty() => None,
        Some(Raw::Text(s)) => Some(match parse_bool(&s) {
            Ok(b) => BoolInput::Value(b),
            Err(_) => BoolInput::Unrecognized(s),
        }),
        Some(Raw::Other(IgnoredAny)) => {
            Some(BoolInput::Unrecognized("non-boolean value".to_string()))
        }
    })
}
