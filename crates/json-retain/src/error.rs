//! Error types for mapping resolution, decode, and encode.

use thiserror::Error;

/// A record's wire-key bindings are not usable.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MappingError {
    /// Two fields declare the same wire-key.
    #[error("duplicate wire-key `{0}`")]
    DuplicateWireKey(&'static str),
}

/// Decoding a JSON payload into a record failed.
///
/// The record may have been partially overwritten when this is returned;
/// callers that need atomicity should decode into a fresh record (see
/// [`from_slice`](crate::from_slice)) instead of decoding in place.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The payload is not well-formed JSON.
    #[error("malformed JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    /// The top-level value is not a JSON object.
    #[error("expected a top-level JSON object, found {0}")]
    NotAnObject(&'static str),
    /// A typed field's JSON value does not convert to its declared type.
    #[error("field `{key}`: {source}")]
    Field {
        key: &'static str,
        source: serde_json::Error,
    },
    #[error(transparent)]
    Mapping(#[from] MappingError),
}

/// Encoding a record to JSON failed.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// A typed field's current value is not representable as JSON.
    #[error("field `{key}` is not representable as JSON: {source}")]
    Field {
        key: &'static str,
        source: serde_json::Error,
    },
    /// Serializing the assembled object failed.
    #[error("serialization failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Mapping(#[from] MappingError),
}

/// Human-readable kind of a JSON value, for error messages.
pub(crate) fn json_kind(value: &serde_json::Value) -> &'static str {
    use serde_json::Value;
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
