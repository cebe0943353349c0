//! Translation of domain validation failures into `invalid_request` errors.
//!
//! Every validation error carries `details: {field, code}` (plus `value` for
//! unparsable path segments) so clients can highlight the offending input.

use serde_json::json;

use crate::domain::{
    CredentialsValidationError, EntryIdParseError, EntryValidationError, Error, EntryId,
};

/// Validation error codes reported under `details.code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ValidationCode {
    MissingField,
    InvalidId,
}

impl ValidationCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::InvalidId => "invalid_id",
        }
    }
}

fn missing_field(field: &str, message: String) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "code": ValidationCode::MissingField.as_str(),
    }))
}

pub(crate) fn credentials_error(err: CredentialsValidationError) -> Error {
    let field = match err {
        CredentialsValidationError::EmptyUsername => "username",
        CredentialsValidationError::EmptyPassword => "password",
    };
    missing_field(field, err.to_string())
}

pub(crate) fn entry_error(err: EntryValidationError) -> Error {
    match err {
        EntryValidationError::MissingField(field) => missing_field(field.as_str(), err.to_string()),
    }
}

/// Parse the `{entryId}` path segment.
pub(crate) fn parse_entry_id(raw: &str) -> Result<EntryId, Error> {
    raw.parse().map_err(|err: EntryIdParseError| {
        Error::invalid_request(err.to_string()).with_details(json!({
            "field": "entryId",
            "value": raw,
            "code": ValidationCode::InvalidId.as_str(),
        }))
    })
}
