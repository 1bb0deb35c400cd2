use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::Severity;

/// An SEO issue reported by the audit pipeline. Read-only to this system;
/// the generation pass turns mapped findings into fix records.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Finding {
    pub id: String,
    pub audit_id: String,
    /// Analyzer identifier, e.g. `missing_meta_description`. Open-ended:
    /// unmapped types are skipped, not rejected.
    pub issue_type: String,
    pub severity: Severity,
    pub title: String,
    pub description: Option<String>,
    /// Per-page detail from the analyzer, kept verbatim.
    pub evidence: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}
