//! Typed activity detail payloads.
//!
//! Each activity action can carry a structured `detail` JSON blob. These types
//! pin down the shapes the engine writes.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Detail for status-changing actions (`approved`, `rejected`, `applied`,
/// `published`).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct StatusChangedDetail {
    pub from: String,
    pub to: String,
}

/// Detail for `ActivityAction::Generated` on an audit.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct GeneratedDetail {
    pub created: u32,
    pub findings_seen: u32,
}

/// Detail for `ActivityAction::WriteFailed` on a fix.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct WriteFailedDetail {
    pub operation: String,
    pub message: String,
}
