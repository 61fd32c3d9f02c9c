//! Error taxonomy for the analysis pipeline.

use thiserror::Error;

use crate::constants::error_codes;

/// Faults raised by a storage backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Injected fault: {0}")]
    Injected(String),
}

impl From<sea_orm::DbErr> for StoreError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for StoreError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(format!("{err:#}"))
    }
}

/// Errors surfaced by the loader, classifier, log writer and analyzer.
///
/// Every variant maps to a stable machine-readable code, see [`AnalyzerError::code`].
#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("[{code}] Invalid user ID: {0}", code = error_codes::VALIDATION)]
    InvalidUserId(i64),

    #[error("[{code}] Invalid timestamp format: {0}", code = error_codes::INVALID_DATE)]
    InvalidTimestamp(String),

    #[error("[{code}] User ID {0} not found", code = error_codes::USER_NOT_FOUND)]
    UserNotFound(i64),

    #[error("[{code}] {message}: {source}", code = error_codes::DATABASE)]
    Load {
        message: String,
        #[source]
        source: StoreError,
    },

    #[error("[{code}] {message}: {source}", code = error_codes::DATABASE)]
    Write {
        message: String,
        #[source]
        source: StoreError,
    },
}

impl AnalyzerError {
    pub fn load(message: impl Into<String>, source: StoreError) -> Self {
        Self::Load {
            message: message.into(),
            source,
        }
    }

    pub fn write(message: impl Into<String>, source: StoreError) -> Self {
        Self::Write {
            message: message.into(),
            source,
        }
    }

    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidUserId(_) => error_codes::VALIDATION,
            Self::InvalidTimestamp(_) => error_codes::INVALID_DATE,
            Self::UserNotFound(_) => error_codes::USER_NOT_FOUND,
            Self::Load { .. } | Self::Write { .. } => error_codes::DATABASE,
        }
    }
}
