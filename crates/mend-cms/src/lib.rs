//! # mend-cms
//!
//! CMS write adapters for sitemend.
//!
//! Pushes reviewed fix values into the site's content platform:
//! - Sanity Content Lake (draft-capable: GROQ reads, mutate-API writes)
//! - WordPress REST v2 (publish-only: live entity updates, SEO-plugin meta)
//!
//! The engine holds a single `Arc<dyn CmsAdapter>` chosen once from
//! configuration. Capability gaps surface as [`CmsError::Unsupported`],
//! never as silent no-ops.

pub mod sanity;
pub mod wordpress;

mod error;
mod http;

pub use error::CmsError;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use mend_config::MendConfig;
use mend_core::enums::{FixField, Platform};
use mend_core::field_path::FieldPath;

use sanity::SanityAdapter;
use wordpress::WordPressAdapter;

/// User agent sent on every CMS request.
pub(crate) const USER_AGENT: &str = "sitemend/0.1";

// ── Types ──────────────────────────────────────────────────────────

/// A document fetched from the CMS, with its platform-native content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmsDocument {
    /// Platform document id (published form, never a draft id).
    pub id: String,
    /// Logical content type, e.g. `landingPage`.
    pub doc_type: String,
    /// Full document body as returned by the platform.
    pub content: serde_json::Value,
}

/// A numeric entity handle on collection-style platforms (WordPress).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityRef {
    pub id: i64,
    /// REST collection the id lives in, e.g. `pages` or `posts`.
    pub collection: String,
}

/// One field assignment within a patch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldWrite {
    pub path: FieldPath,
    pub value: String,
}

// ── Field access ───────────────────────────────────────────────────

/// Walk `content` down `path`, returning the value at the leaf.
///
/// Returns `None` as soon as any segment is missing or the current value
/// is not an object.
#[must_use]
pub fn field_value<'a>(
    content: &'a serde_json::Value,
    path: &FieldPath,
) -> Option<&'a serde_json::Value> {
    let mut current = content;
    for segment in path.segments() {
        current = current.get(segment)?;
    }
    Some(current)
}

/// Render a leaf value as comparable text. Strings come back as-is, numbers
/// and booleans via their display form; null and containers have no text
/// form and return `None`.
#[must_use]
pub fn value_to_text(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        serde_json::Value::Null | serde_json::Value::Array(_) | serde_json::Value::Object(_) => {
            None
        }
    }
}

// ── Adapter trait ──────────────────────────────────────────────────

/// Uniform write surface over the supported CMS platforms.
///
/// Object-safe so the engine can hold `Arc<dyn CmsAdapter>`. Operations a
/// platform cannot express return [`CmsError::Unsupported`].
#[async_trait]
pub trait CmsAdapter: Send + Sync {
    /// Which platform this adapter talks to.
    fn platform(&self) -> Platform;

    /// Whether writes can land in a draft layer separate from the live site.
    fn supports_draft(&self) -> bool;

    /// Fetch all published documents of a logical type.
    async fn documents_by_type(&self, doc_type: &str) -> Result<Vec<CmsDocument>, CmsError>;

    /// Write field values into the draft variant of a document, creating
    /// the draft from the published document if it does not exist yet.
    async fn patch_draft(
        &self,
        document_id: &str,
        fields: &[FieldWrite],
    ) -> Result<(), CmsError>;

    /// Write field values directly into the published document.
    async fn patch_published(
        &self,
        document_id: &str,
        fields: &[FieldWrite],
    ) -> Result<(), CmsError>;

    /// Resolve a URL path to an entity handle, if the platform supports
    /// path lookup. `Ok(None)` means nothing matched.
    async fn locate_by_path(&self, url_path: &str) -> Result<Option<EntityRef>, CmsError>;
}

impl std::fmt::Debug for dyn CmsAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CmsAdapter")
            .field("platform", &self.platform())
            .finish_non_exhaustive()
    }
}

// ── Construction ───────────────────────────────────────────────────

/// Build the adapter for the configured platform.
///
/// The platform is selected exactly once, here; engine code never inspects
/// it again at runtime.
///
/// # Errors
///
/// Returns [`CmsError::Config`] if the selected platform's section is
/// missing required fields, or [`CmsError::Http`] if the HTTP client
/// cannot be built.
pub fn adapter_from_config(config: &MendConfig) -> Result<Arc<dyn CmsAdapter>, CmsError> {
    let timeout = Duration::from_secs(config.general.http_timeout_secs);
    match config.platform {
        Platform::Sanity => Ok(Arc::new(SanityAdapter::new(&config.sanity, timeout)?)),
        Platform::Wordpress => Ok(Arc::new(WordPressAdapter::new(&config.wordpress, timeout)?)),
    }
}

/// Map a field-path leaf onto the direct-write field set, for platforms
/// that address fields by name rather than by path.
#[must_use]
pub fn fix_field_for_leaf(leaf: &str) -> Option<FixField> {
    match leaf {
        "title" | "metaTitle" => Some(FixField::Title),
        "metaDescription" => Some(FixField::MetaDescription),
        _ => None,
    }
}
