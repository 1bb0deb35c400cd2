//! Field path validation errors.
//!
//! Domain-specific errors (`DatabaseError`, `CmsError`, `EngineError`) live in
//! their respective crates and converge at the CLI boundary; the only fallible
//! surface in this crate is [`FieldPath`](crate::field_path::FieldPath)
//! construction.

use thiserror::Error;

/// Rejected input to [`FieldPath::new`](crate::field_path::FieldPath::new).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FieldPathError {
    /// The segment list was empty.
    #[error("field path has no segments")]
    Empty,

    /// A segment at `index` was empty or whitespace-only.
    #[error("field path segment {index} is empty")]
    EmptySegment { index: usize },
}
