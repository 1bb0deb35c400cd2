//! WordPress (publish-only CMS) configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct WordPressConfig {
    /// Site root, e.g. `https://blog.acme.dev`. The REST API lives under
    /// `{base_url}/wp-json/wp/v2`.
    #[serde(default)]
    pub base_url: String,

    /// WordPress account the application password belongs to.
    #[serde(default)]
    pub username: String,

    /// Application password (the spaced form WordPress issues works as-is).
    #[serde(default)]
    pub app_password: String,
}

impl WordPressConfig {
    /// Check if the section has the fields required for REST access.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.base_url.is_empty() && !self.username.is_empty() && !self.app_password.is_empty()
    }

    /// Base URL with any trailing slash removed, ready for path joining.
    #[must_use]
    pub fn trimmed_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}
