//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

pub use gandi_rrr_provider::ProviderError;

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// Configuration could not be read or is inconsistent. Fatal at startup.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The request carried no token, or one the directory does not know.
    #[error("Invalid token")]
    InvalidToken,

    /// HTTP method other than GET, POST or DELETE.
    #[error("Invalid request method")]
    InvalidMethod,

    /// Malformed or incomplete request body, or an undecodable record name.
    #[error("{0}")]
    Validation(String),

    /// No record with the requested name among the token's records.
    #[error("Record with name '{0}' not found")]
    RecordNotFound(String),

    /// The provider answered, but did not confirm the change.
    #[error("{0}")]
    NotAcknowledged(String),

    /// The transaction was already committed or has failed.
    #[error("Transaction is closed")]
    TransactionClosed,

    /// Provider error (converting from library)
    #[error("{0}")]
    Provider(#[from] ProviderError),
}

impl CoreError {
    /// Whether it is expected behavior (bad input, unknown token, missing record), used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::InvalidToken
            | Self::InvalidMethod
            | Self::Validation(_)
            | Self::RecordNotFound(_) => true,
            Self::Provider(e) => e.is_expected(),
            Self::Config(_) | Self::NotAcknowledged(_) | Self::TransactionClosed => false,
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
