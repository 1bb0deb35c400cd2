use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One crawl of a site, owned by the external audit pipeline. Findings and
/// crawled pages hang off it; fix records are generated against it.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SiteAudit {
    pub id: String,
    pub site_url: String,
    pub site_title: Option<String>,
    pub created_at: DateTime<Utc>,
}
