use std::fmt::{Display, Formatter};
use std::io::Error as IoError;

use serde::{Deserialize, Serialize};
use serde_json::Error as SerdeError;

use crate::samputt::SamputtError;
use crate::selection::SelectionError;

/// Envelope returned to the host for every FFI call.
///
/// `Ok` carries a JSON payload; every other variant carries a message the
/// host can show or log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppResponse {
    DataIntegrityError(String),
    SerializationError(String),
    IoError(String),
    NotFound(String),
    ValidationError(String),
    BadRequest(String),
    Ok(String),
}

impl Display for AppResponse {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            AppResponse::DataIntegrityError(msg) => write!(f, "Data integrity error: {}", msg),
            AppResponse::SerializationError(msg) => write!(f, "Serialization error: {}", msg),
            AppResponse::IoError(msg) => write!(f, "IO error: {}", msg),
            AppResponse::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppResponse::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            AppResponse::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppResponse::Ok(msg) => write!(f, "Ok: {}", msg),
        }
    }
}

impl std::error::Error for AppResponse {}

impl From<SerdeError> for AppResponse {
    fn from(err: SerdeError) -> Self {
        AppResponse::SerializationError(format!("JSON serialization error: {}", err))
    }
}

impl From<IoError> for AppResponse {
    fn from(err: IoError) -> Self {
        AppResponse::IoError(format!("Failed to read dataset: {}", err))
    }
}

impl From<SamputtError> for AppResponse {
    fn from(err: SamputtError) -> Self {
        match err {
            SamputtError::InvalidSelection { .. } => AppResponse::ValidationError(err.to_string()),
            SamputtError::UnresolvedVerse(_) | SamputtError::EmptySequence => {
                AppResponse::DataIntegrityError(err.to_string())
            }
        }
    }
}

impl From<SelectionError> for AppResponse {
    fn from(err: SelectionError) -> Self {
        match err {
            SelectionError::MissingVerse(_) => AppResponse::DataIntegrityError(err.to_string()),
            SelectionError::InvalidInput | SelectionError::OutOfRange { .. } => {
                AppResponse::ValidationError(err.to_string())
            }
        }
    }
}

impl AppResponse {
    pub fn success(msg: impl Into<String>) -> Self {
        AppResponse::Ok(msg.into())
    }

    /// Serializes `payload` and wraps it in [`AppResponse::Ok`].
    pub fn json<T: Serialize + ?Sized>(payload: &T) -> Self {
        match serde_json::to_string(payload) {
            Ok(json) => AppResponse::Ok(json),
            Err(e) => AppResponse::SerializationError(format!("Failed to serialize result: {e}")),
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, AppResponse::Ok(_))
    }
}
