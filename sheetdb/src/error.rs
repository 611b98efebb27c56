//! Error types for sheetdb operations.

use thiserror::Error;

/// Substring the backend puts in rate-limit failure messages.
pub(crate) const QUOTA_ERROR_MARKER: &str = "Quota exceeded for quota metric";

/// Result type for sheetdb operations.
pub type SheetDbResult<T> = Result<T, SheetDbError>;

/// Errors that can occur while talking to the spreadsheet backend.
#[derive(Debug, Error)]
pub enum SheetDbError {
    /// Unusable configuration (no clients, missing serializer, ...).
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Malformed cell text on read, or an unrepresentable value on write.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Transport-level failure (connection, body read, response decode).
    #[error("network error: {0}")]
    Network(String),

    /// The backend answered with a non-success status.
    #[error("backend error: {0}")]
    Backend(String),

    /// Every client in the pool hit its rate limit for one logical call.
    #[error("quota exhausted: all {0} clients hit their rate limit")]
    QuotaExhausted(usize),

    /// An id referenced for update/delete matches no current row.
    #[error("entity '{id}' is not part of sheet '{sheet}'")]
    NotInSheet { id: String, sheet: String },

    /// The configured sheet does not exist in the spreadsheet.
    #[error("no sheet named '{0}' in spreadsheet")]
    SheetNotFound(String),

    /// A write was attempted with an entity that has no id.
    #[error("cannot persist entities that have no id")]
    MissingId,
}

impl SheetDbError {
    /// Whether this failure indicates rate-limit exhaustion on one client.
    ///
    /// The backend does not use a dedicated status for quota errors, so the
    /// retry layer classifies by message content.
    pub fn is_quota_error(&self) -> bool {
        match self {
            SheetDbError::Backend(msg) | SheetDbError::Network(msg) => {
                msg.contains(QUOTA_ERROR_MARKER)
            }
            _ => false,
        }
    }
}
