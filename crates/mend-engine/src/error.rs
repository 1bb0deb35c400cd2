//! Engine error types.

use mend_core::enums::FixStatus;
use thiserror::Error;

/// Errors from generation, workflow and bulk operations.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Required configuration missing; nothing was mutated.
    #[error("configuration error: {0}")]
    Config(String),

    /// Referenced audit/fix/document does not exist; nothing was mutated.
    #[error("{entity} not found: {id}")]
    NotFound {
        entity: &'static str,
        id: String,
    },

    /// Operation attempted from a disallowed status. Names the actual
    /// status so the caller can resynchronize its view.
    #[error("cannot {operation} fix {fix_id} in status {status}")]
    InvalidState {
        fix_id: String,
        status: FixStatus,
        operation: &'static str,
    },

    /// The platform cannot perform this operation; no remote write was
    /// attempted and the fix record was not marked failed.
    #[error("unsupported operation: {0}")]
    Unsupported(String),

    /// The CMS rejected or failed the write. By the time this surfaces the
    /// fix record is already `failed` with the message persisted.
    #[error("remote write failed: {0}")]
    RemoteWrite(#[source] mend_cms::CmsError),

    /// Persistence layer error.
    #[error(transparent)]
    Store(#[from] mend_db::error::DatabaseError),

    /// Malformed field path in the mapping table or a stored record.
    #[error(transparent)]
    FieldPath(#[from] mend_core::errors::FieldPathError),
}
