//! CLI response types returned as JSON by `smd` commands.
//!
//! These structs define the shape of JSON output for commands like
//! `smd audit import`, `smd fix generate`, and `smd fix bulk-apply`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{FixRecord, SiteAudit};
use crate::enums::FixField;

/// Response from `smd audit import`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AuditImportResponse {
    pub audit: SiteAudit,
    pub pages: u32,
    pub findings: u32,
}

/// Response from `smd fix generate`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct GenerateResponse {
    pub audit_id: String,
    /// Fix records actually created; 0 on a re-run against an already
    /// generated audit.
    pub created: u32,
}

/// Response from the single-record mutations (`approve`, `reject`, `apply`,
/// `publish`): the record after the transition.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct FixActionResponse {
    pub fix: FixRecord,
}

/// Per-item outcome of a bulk apply. Items are independent: one failure
/// never aborts the rest.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct BulkOutcome {
    pub target_url: String,
    pub field: FixField,
    pub success: bool,
    pub error: Option<String>,
}

/// Response from `smd fix bulk-apply`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct BulkApplyReport {
    /// Items actually processed (after the hard cap).
    pub attempted: u32,
    pub succeeded: u32,
    pub failed: u32,
    pub results: Vec<BulkOutcome>,
}

impl BulkApplyReport {
    /// Batch-level success means every item succeeded.
    #[must_use]
    pub const fn all_succeeded(&self) -> bool {
        self.failed == 0
    }
}
