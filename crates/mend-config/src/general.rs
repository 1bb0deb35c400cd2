//! General application configuration.

use serde::{Deserialize, Serialize};

/// Default local database path.
fn default_db_path() -> String {
    ".sitemend/sitemend.db".into()
}

/// Default outbound HTTP timeout in seconds. Remote CMS calls must fail
/// closed rather than hang.
const fn default_http_timeout_secs() -> u64 {
    15
}

/// Default result limit.
const fn default_limit() -> u32 {
    20
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Path to the local libSQL database file.
    #[serde(default = "default_db_path")]
    pub db_path: String,

    /// Timeout applied to every outbound CMS HTTP call, in seconds.
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,

    /// Default result limit for list commands.
    #[serde(default = "default_limit")]
    pub default_limit: u32,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            http_timeout_secs: default_http_timeout_secs(),
            default_limit: default_limit(),
        }
    }
}
