//! Contract error types for user settings
//!
//! These errors are transport-agnostic and used for inter-module communication.

/// User settings domain errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserSettingsError {
    /// Cache backend failed for a reason other than a missing key
    #[error("Cache error: {message}")]
    Cache {
        /// Backend error message
        message: String,
    },
    /// Record store query or write failed
    #[error("Record store error: {message}")]
    RecordStore {
        /// Store error message
        message: String,
    },
    /// Cached snapshot or setting payload is not valid for the requested shape
    #[error("Decode error: {message}")]
    Decode {
        /// Decoder error message
        message: String,
    },
    /// A built-in template file is malformed
    #[error("Template parse error in '{file}': {reason}")]
    TemplateParse {
        /// Template file name
        file: String,
        /// What was wrong with it
        reason: String,
    },
    /// Parent links between records are cyclic or too deep
    #[error("Data integrity error: {message}")]
    DataIntegrity {
        /// Details
        message: String,
    },
}

impl UserSettingsError {
    pub fn cache(err: impl std::fmt::Display) -> Self {
        Self::Cache {
            message: err.to_string(),
        }
    }

    pub fn record_store(err: impl std::fmt::Display) -> Self {
        Self::RecordStore {
            message: err.to_string(),
        }
    }

    pub fn decode(err: impl std::fmt::Display) -> Self {
        Self::Decode {
            message: err.to_string(),
        }
    }
}
