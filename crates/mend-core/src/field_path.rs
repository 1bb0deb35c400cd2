//! Nested field paths addressing a value inside a CMS document.
//!
//! A path is an ordered list of keys, e.g. `["seo", "metaTitle"]`. Keeping the
//! segments as a list (rather than a dotted string split on demand) means a key
//! containing a literal `.` stays addressable, and traversal code never guesses
//! at delimiters. Serialized as a JSON array.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::errors::FieldPathError;

/// Validated, non-empty list of non-empty key segments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
#[schemars(with = "Vec<String>")]
pub struct FieldPath(Vec<String>);

impl FieldPath {
    /// Build a path from owned segments. Errors if the list is empty or any
    /// segment is empty/whitespace.
    pub fn new(segments: Vec<String>) -> Result<Self, FieldPathError> {
        if segments.is_empty() {
            return Err(FieldPathError::Empty);
        }
        if let Some(index) = segments.iter().position(|s| s.trim().is_empty()) {
            return Err(FieldPathError::EmptySegment { index });
        }
        Ok(Self(segments))
    }

    /// Build a path from a dotted string, e.g. `"seo.metaTitle"`.
    pub fn from_dotted(dotted: &str) -> Result<Self, FieldPathError> {
        Self::new(dotted.split('.').map(str::to_owned).collect())
    }

    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Dotted rendering used for display and for draft-capable patch keys.
    #[must_use]
    pub fn dotted(&self) -> String {
        self.0.join(".")
    }

    /// The final segment (the leaf key).
    #[must_use]
    pub fn leaf(&self) -> &str {
        // Invariant: segments are never empty.
        self.0.last().map_or("", String::as_str)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.dotted())
    }
}

impl TryFrom<Vec<String>> for FieldPath {
    type Error = FieldPathError;

    fn try_from(segments: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(segments)
    }
}

impl From<FieldPath> for Vec<String> {
    fn from(path: FieldPath) -> Self {
        path.0
    }
}
