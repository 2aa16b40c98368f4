use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use super::ValidationErrors;

/// Everything a handler can answer with besides success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    Internal,
    InvalidFormBody(ValidationErrors),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Internal => f.write_str("internal server error"),
            Self::InvalidFormBody(..) => f.write_str("invalid form body"),
        }
    }
}

impl Serialize for Error {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        match self {
            Self::Internal => map.serialize_entry("message", "Internal server error")?,
            Self::InvalidFormBody(errors) => map.serialize_entry("errors", errors)?,
        }
        map.end()
    }
}
