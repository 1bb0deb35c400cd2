use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A page captured during the crawl. Its on-page text is the evidence the
/// proposal generator works from.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CrawledPage {
    pub id: String,
    pub audit_id: String,
    pub url: String,
    /// URL path component, e.g. `/pricing`. The homepage is `/`.
    pub path: String,
    pub title: Option<String>,
    pub meta_description: Option<String>,
    /// Whether the page blocked indexing (robots meta or header).
    pub noindex: bool,
    pub created_at: DateTime<Utc>,
}
