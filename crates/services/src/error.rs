//! Shared error types for the services crate.
//!
//! `LoadError` covers environment-caused, user-facing failures of a content
//! load. `SessionError` covers calls made outside a session operation's legal
//! state; those are caller defects and are never shown to the user.

use thiserror::Error;

use quiz_core::model::SourceUrlError;
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `ContentLoader`.
#[derive(Debug, Error, Clone)]
#[non_exhaustive]
pub enum LoadError {
    #[error("invalid URL: {0}")]
    InvalidSource(#[from] SourceUrlError),
    #[error("no internet connection")]
    NoConnectivity,
    #[error("error fetching data: {0}")]
    TransferFailed(String),
    #[error("content request failed with status {0}")]
    UnexpectedStatus(reqwest::StatusCode),
    #[error("JSON decoding error: {0}")]
    DecodeFailed(String),
    #[error("content load was cancelled")]
    Cancelled,
}

impl LoadError {
    /// Whether re-issuing the same load may succeed.
    ///
    /// A bad URL or a malformed payload will fail the same way again.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::NoConnectivity | Self::TransferFailed(_) | Self::UnexpectedStatus(_)
        )
    }
}

/// Errors emitted by `QuizSession` when an operation is called out of order.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("option {index} is outside the {option_count} available options")]
    InvalidInput { index: usize, option_count: usize },
    #[error("no option has been selected")]
    NoSelectionMade,
    #[error("the current answer was already submitted")]
    NotAnswering,
    #[error("there is no submitted answer to acknowledge")]
    NotRevealing,
    #[error("session already finished")]
    Finished,
    #[error("session is still in progress")]
    NotFinished,
}

/// Errors emitted by `SourceSettingsService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SourceSettingsError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping quiz services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
}
