use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use mend_cms::adapter_from_config;
use mend_config::MendConfig;
use mend_db::service::MendService;
use mend_engine::FixEngine;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub config: MendConfig,
    pub service: Arc<MendService>,
}

impl AppContext {
    /// Open the backing store at the configured database path.
    pub async fn init(config: MendConfig) -> anyhow::Result<Self> {
        let db_path = config.general.db_path.clone();
        ensure_parent_dir(&db_path)?;

        let service = MendService::new_local(&db_path)
            .await
            .with_context(|| format!("failed to open sitemend database at {db_path}"))?;

        Ok(Self {
            config,
            service: Arc::new(service),
        })
    }

    /// Build the fix engine for commands that reach the CMS.
    ///
    /// Fails when the selected platform's credentials are missing, so
    /// read-only commands never call this.
    pub fn engine(&self) -> anyhow::Result<FixEngine> {
        let adapter = adapter_from_config(&self.config)
            .context("failed to build the CMS adapter from configuration")?;
        Ok(FixEngine::new(Arc::clone(&self.service), adapter))
    }
}

/// Warn once at startup when the selected platform has no credentials.
pub fn warn_unconfigured(config: &MendConfig) {
    if !config.platform_configured() {
        tracing::warn!(
            "platform '{}' is not configured; commands that reach the CMS will fail",
            config.platform
        );
    }
}

fn ensure_parent_dir(db_path: &str) -> anyhow::Result<()> {
    if db_path == ":memory:" {
        return Ok(());
    }
    if let Some(parent) = Path::new(db_path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("failed to create database directory {}", parent.display())
            })?;
        }
    }
    Ok(())
}
