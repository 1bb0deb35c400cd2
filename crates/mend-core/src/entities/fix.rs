use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{FixStatus, Severity};
use crate::field_path::FieldPath;

/// A proposed content edit and its review lifecycle. The primary entity of
/// the system: created only by the generation pass, mutated only through the
/// state-machine operations, never deleted.
///
/// At most one record exists per `(audit_id, issue_type, field_path)`; the
/// store enforces this with a uniqueness constraint.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct FixRecord {
    pub id: String,
    pub audit_id: String,
    pub issue_type: String,
    pub severity: Severity,
    pub title: String,
    pub description: Option<String>,
    /// Logical CMS content-type the edit targets, e.g. `landingPage`.
    pub document_type: String,
    /// Resolved CMS document id. `None` when the target could not be resolved
    /// at generation time; apply/publish refuse until it is known.
    pub document_id: Option<String>,
    pub field_path: FieldPath,
    /// Remote value snapshot taken at generation time.
    pub current_value: Option<String>,
    pub proposed_value: String,
    pub status: FixStatus,
    /// Populated when a remote write fails; cleared by the next successful
    /// transition out of `failed`.
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub applied_at: Option<DateTime<Utc>>,
    pub published_at: Option<DateTime<Utc>>,
}

impl FixRecord {
    /// Whether the review surface should offer actions on this record.
    #[must_use]
    pub const fn is_actionable(&self) -> bool {
        self.status.is_actionable()
    }
}
