//! # mend-config
//!
//! Layered configuration loading for sitemend using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`SITEMEND_*` prefix, `__` as separator)
//! 2. Project-level `.sitemend/config.toml`
//! 3. User-level `~/.config/sitemend/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `SITEMEND_SANITY__PROJECT_ID` -> `sanity.project_id`,
//! `SITEMEND_WORDPRESS__BASE_URL` -> `wordpress.base_url`, etc. The `__`
//! (double underscore) separates nested config sections. The top-level
//! platform selector is `SITEMEND_PLATFORM`.
//!
//! # Usage
//!
//! ```no_run
//! use mend_config::MendConfig;
//!
//! // Load from all sources (dotenvy + TOML + env):
//! let config = MendConfig::load_with_dotenv().expect("config");
//!
//! // Or without dotenvy (env vars must already be set):
//! let config = MendConfig::load().expect("config");
//!
//! if config.sanity.is_configured() {
//!     println!("Sanity project: {}", config.sanity.project_id);
//! }
//! ```

mod error;
mod general;
mod sanity;
mod wordpress;

pub use error::ConfigError;
pub use general::GeneralConfig;
pub use sanity::SanityConfig;
pub use wordpress::WordPressConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use mend_core::enums::Platform;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MendConfig {
    /// Which CMS adapter to target. The engine picks the adapter once from
    /// this value; it never inspects the platform at runtime.
    #[serde(default = "default_platform")]
    pub platform: Platform,
    #[serde(default)]
    pub sanity: SanityConfig,
    #[serde(default)]
    pub wordpress: WordPressConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

const fn default_platform() -> Platform {
    Platform::Sanity
}

impl Default for MendConfig {
    fn default() -> Self {
        Self {
            platform: default_platform(),
            sanity: SanityConfig::default(),
            wordpress: WordPressConfig::default(),
            general: GeneralConfig::default(),
        }
    }
}

impl MendConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    ///
    /// Precedence (highest to lowest):
    /// 1. Environment variables (`SITEMEND_*` prefix)
    /// 2. `.sitemend/config.toml` (project-local)
    /// 3. `~/.config/sitemend/config.toml` (user-global)
    /// 4. Default values
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support.
    ///
    /// Calls `dotenvy` to load the `.env` file from the workspace root before
    /// building the figment. This is the typical entry point for the CLI.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv_from_workspace();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".sitemend/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment = figment.merge(Env::prefixed("SITEMEND_").split("__"));

        figment
    }

    /// The section backing the selected platform is configured.
    #[must_use]
    pub fn platform_configured(&self) -> bool {
        match self.platform {
            Platform::Sanity => self.sanity.is_configured(),
            Platform::Wordpress => self.wordpress.is_configured(),
        }
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("sitemend").join("config.toml"))
    }

    /// Load `.env` from the workspace root.
    ///
    /// Walks up from `CARGO_MANIFEST_DIR` (if available) or current dir looking
    /// for a `.env` file. Silently does nothing if no `.env` is found.
    fn load_dotenv_from_workspace() {
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            // Walk up at most 3 levels (crate -> crates/ -> workspace root)
            for _ in 0..3 {
                let env_path = dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                    return;
                }
                if !dir.pop() {
                    break;
                }
            }
        }

        // Fallback: try current directory
        let _ = dotenvy::dotenv();
    }
}
