use anyhow::Context;
use mend_config::MendConfig;

use crate::cli::GlobalFlags;

/// Load layered configuration, then apply command-line overrides on top.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<MendConfig> {
    let mut config =
        MendConfig::load_with_dotenv().context("failed to load sitemend configuration")?;

    if let Some(db_path) = &flags.db {
        config.general.db_path = db_path.clone();
    }

    Ok(config)
}
