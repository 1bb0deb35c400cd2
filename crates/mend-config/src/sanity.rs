//! Sanity (draft-capable CMS) configuration.

use serde::{Deserialize, Serialize};

/// Default dataset name.
fn default_dataset() -> String {
    "production".into()
}

/// Default Sanity API version date.
fn default_api_version() -> String {
    "2024-01-01".into()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SanityConfig {
    /// Sanity project id, the subdomain of `*.api.sanity.io`.
    #[serde(default)]
    pub project_id: String,

    /// Dataset to read and mutate.
    #[serde(default = "default_dataset")]
    pub dataset: String,

    /// API token with write access to the dataset. Received already usable;
    /// storage/encryption is the caller's concern.
    #[serde(default)]
    pub token: String,

    /// Versioned API date, e.g. `2024-01-01`.
    #[serde(default = "default_api_version")]
    pub api_version: String,
}

impl Default for SanityConfig {
    fn default() -> Self {
        Self {
            project_id: String::new(),
            dataset: default_dataset(),
            token: String::new(),
            api_version: default_api_version(),
        }
    }
}

impl SanityConfig {
    /// Check if the section has the minimum required fields for API access.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.project_id.is_empty() && !self.dataset.is_empty() && !self.token.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_not_configured() {
        let config = SanityConfig::default();
        assert!(!config.is_configured());
        assert_eq!(config.dataset, "production");
        assert_eq!(config.api_version, "2024-01-01");
    }

    #[test]
    fn configured_when_project_and_token_set() {
        let config = SanityConfig {
            project_id: "abc123".into(),
            token: "sk-token".into(),
            ..Default::default()
        };
        assert!(config.is_configured());
    }
}
