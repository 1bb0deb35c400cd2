//! Status enums, entity types, and actions for sitemend.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.
//! `FixStatus` carries the state machine and provides `allowed_next_states()` to
//! enforce valid transitions at the application layer.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// FixStatus
// ---------------------------------------------------------------------------

/// Status of a fix record through its review and write lifecycle.
///
/// ```text
/// pending → approved → applied → published
///         → published (direct publish)
///         → rejected
/// failed  → approved (retried apply)
///         → published (retried publish)
///         → rejected
/// any remote write failure → failed (failed → failed when a retry fails again)
/// ```
///
/// `published` and `rejected` are terminal. One-step apply routes
/// `pending`/`failed` through `approved` before the draft write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FixStatus {
    Pending,
    Approved,
    Applied,
    Published,
    Rejected,
    Failed,
}

impl FixStatus {
    /// Valid next states from the current state.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Pending => &[Self::Approved, Self::Published, Self::Rejected, Self::Failed],
            Self::Approved => &[Self::Applied, Self::Published, Self::Rejected, Self::Failed],
            Self::Applied => &[Self::Published, Self::Rejected, Self::Failed],
            Self::Failed => &[Self::Approved, Self::Published, Self::Rejected, Self::Failed],
            Self::Published | Self::Rejected => &[],
        }
    }

    /// Check whether transitioning to `next` is allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    /// Whether the review surface should offer actions on a record in this state.
    #[must_use]
    pub const fn is_actionable(self) -> bool {
        matches!(self, Self::Pending | Self::Approved | Self::Failed)
    }

    /// Whether the state admits no further transitions.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Published | Self::Rejected)
    }

    /// Return the string representation used in SQL storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Applied => "applied",
            Self::Published => "published",
            Self::Rejected => "rejected",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for FixStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Severity
// ---------------------------------------------------------------------------

/// Severity assigned to a finding by the audit pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Critical,
    Warning,
    Notice,
}

impl Severity {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::Warning => "warning",
            Self::Notice => "notice",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// FixField
// ---------------------------------------------------------------------------

/// Field kinds the publish-only write path can target directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FixField {
    Title,
    MetaDescription,
}

impl FixField {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::MetaDescription => "meta_description",
        }
    }
}

impl fmt::Display for FixField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Platform
// ---------------------------------------------------------------------------

/// CMS platform a site is hosted on. Selected once from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Sanity,
    Wordpress,
}

impl Platform {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sanity => "sanity",
            Self::Wordpress => "wordpress",
        }
    }

    /// Whether the platform keeps a draft variant separate from the published one.
    #[must_use]
    pub const fn supports_draft(self) -> bool {
        matches!(self, Self::Sanity)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// SeoPlugin
// ---------------------------------------------------------------------------

/// SEO companion plugin detected on a WordPress target. Gates which meta
/// fields the publish-only adapter can write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SeoPlugin {
    Yoast,
    RankMath,
}

impl SeoPlugin {
    /// The post-meta key the plugin stores its meta description under.
    #[must_use]
    pub const fn meta_description_key(self) -> &'static str {
        match self {
            Self::Yoast => "_yoast_wpseo_metadesc",
            Self::RankMath => "rank_math_description",
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Yoast => "yoast",
            Self::RankMath => "rank_math",
        }
    }
}

impl fmt::Display for SeoPlugin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ActivityAction
// ---------------------------------------------------------------------------

/// Type of action recorded in the activity log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ActivityAction {
    Created,
    Generated,
    Approved,
    Rejected,
    Applied,
    Published,
    WriteFailed,
}

impl ActivityAction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Generated => "generated",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Applied => "applied",
            Self::Published => "published",
            Self::WriteFailed => "write_failed",
        }
    }
}

impl fmt::Display for ActivityAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// EntityType
// ---------------------------------------------------------------------------

/// Type of entity the activity log records mutations for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Audit,
    Fix,
}

impl EntityType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Audit => "audit",
            Self::Fix => "fix",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // --- Serde roundtrip tests ---

    macro_rules! test_serde_roundtrip {
        ($name:ident, $ty:ty, $variant:expr, $expected_str:expr) => {
            #[test]
            fn $name() {
                let val = $variant;
                let json = serde_json::to_string(&val).unwrap();
                assert_eq!(json, format!("\"{}\"", $expected_str));
                let recovered: $ty = serde_json::from_str(&json).unwrap();
                assert_eq!(recovered, val);
            }
        };
    }

    test_serde_roundtrip!(fix_status_pending, FixStatus, FixStatus::Pending, "pending");
    test_serde_roundtrip!(fix_status_applied, FixStatus, FixStatus::Applied, "applied");
    test_serde_roundtrip!(
        fix_status_published,
        FixStatus,
        FixStatus::Published,
        "published"
    );

    test_serde_roundtrip!(severity_critical, Severity, Severity::Critical, "critical");
    test_serde_roundtrip!(severity_notice, Severity, Severity::Notice, "notice");

    test_serde_roundtrip!(
        fix_field_meta_description,
        FixField,
        FixField::MetaDescription,
        "meta_description"
    );

    test_serde_roundtrip!(platform_sanity, Platform, Platform::Sanity, "sanity");
    test_serde_roundtrip!(
        platform_wordpress,
        Platform,
        Platform::Wordpress,
        "wordpress"
    );

    test_serde_roundtrip!(plugin_rank_math, SeoPlugin, SeoPlugin::RankMath, "rank_math");

    test_serde_roundtrip!(
        activity_write_failed,
        ActivityAction,
        ActivityAction::WriteFailed,
        "write_failed"
    );

    test_serde_roundtrip!(entity_type_fix, EntityType, EntityType::Fix, "fix");

    // --- Transition tests ---

    #[test]
    fn fix_valid_transitions() {
        assert!(FixStatus::Pending.can_transition_to(FixStatus::Approved));
        assert!(FixStatus::Pending.can_transition_to(FixStatus::Published));
        assert!(FixStatus::Pending.can_transition_to(FixStatus::Rejected));
        assert!(FixStatus::Approved.can_transition_to(FixStatus::Applied));
        assert!(FixStatus::Approved.can_transition_to(FixStatus::Published));
        assert!(FixStatus::Applied.can_transition_to(FixStatus::Published));
        assert!(FixStatus::Failed.can_transition_to(FixStatus::Approved));
        assert!(FixStatus::Failed.can_transition_to(FixStatus::Published));
        assert!(FixStatus::Failed.can_transition_to(FixStatus::Failed));
    }

    #[test]
    fn fix_invalid_transitions() {
        assert!(!FixStatus::Pending.can_transition_to(FixStatus::Applied));
        assert!(!FixStatus::Published.can_transition_to(FixStatus::Rejected));
        assert!(!FixStatus::Published.can_transition_to(FixStatus::Published));
        assert!(!FixStatus::Rejected.can_transition_to(FixStatus::Approved));
        assert!(!FixStatus::Rejected.can_transition_to(FixStatus::Published));
        assert!(!FixStatus::Applied.can_transition_to(FixStatus::Approved));
    }

    #[test]
    fn fix_terminal_states() {
        assert!(FixStatus::Published.allowed_next_states().is_empty());
        assert!(FixStatus::Rejected.allowed_next_states().is_empty());
        assert!(FixStatus::Published.is_terminal());
        assert!(FixStatus::Rejected.is_terminal());
        assert!(!FixStatus::Failed.is_terminal());
    }

    #[test]
    fn actionable_states() {
        assert!(FixStatus::Pending.is_actionable());
        assert!(FixStatus::Approved.is_actionable());
        assert!(FixStatus::Failed.is_actionable());
        assert!(!FixStatus::Applied.is_actionable());
        assert!(!FixStatus::Published.is_actionable());
        assert!(!FixStatus::Rejected.is_actionable());
    }

    #[test]
    fn failed_write_reachable_from_every_writing_state() {
        for from in [
            FixStatus::Pending,
            FixStatus::Approved,
            FixStatus::Applied,
            FixStatus::Failed,
        ] {
            assert!(from.can_transition_to(FixStatus::Failed), "from {from}");
        }
    }

    // --- Display / as_str tests ---

    #[test]
    fn display_matches_as_str() {
        assert_eq!(format!("{}", FixStatus::Pending), "pending");
        assert_eq!(format!("{}", Severity::Warning), "warning");
        assert_eq!(format!("{}", FixField::MetaDescription), "meta_description");
        assert_eq!(format!("{}", Platform::Wordpress), "wordpress");
        assert_eq!(format!("{}", SeoPlugin::RankMath), "rank_math");
        assert_eq!(format!("{}", ActivityAction::WriteFailed), "write_failed");
        assert_eq!(format!("{}", EntityType::Fix), "fix");
    }

    #[test]
    fn plugin_meta_keys() {
        assert_eq!(
            SeoPlugin::Yoast.meta_description_key(),
            "_yoast_wpseo_metadesc"
        );
        assert_eq!(
            SeoPlugin::RankMath.meta_description_key(),
            "rank_math_description"
        );
    }
}
