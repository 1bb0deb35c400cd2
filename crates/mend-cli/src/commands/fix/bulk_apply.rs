use std::time::Duration;

use anyhow::Context;
use mend_cms::wordpress::WordPressAdapter;
use mend_core::enums::Platform;
use mend_engine::bulk::{self, BulkInstruction};

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

pub async fn run(file: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let instructions = read_instructions(file)?;

    if ctx.config.platform != Platform::Wordpress {
        anyhow::bail!(
            "bulk-apply writes through the WordPress adapter; set platform = \"wordpress\""
        );
    }
    let timeout = Duration::from_secs(ctx.config.general.http_timeout_secs);
    let adapter = WordPressAdapter::new(&ctx.config.wordpress, timeout)
        .context("failed to build the WordPress adapter from configuration")?;

    let total = instructions.len().min(bulk::BULK_FIX_LIMIT);
    let progress = Progress::bar(
        u64::try_from(total).unwrap_or(u64::MAX),
        "applying fixes",
        flags,
    );
    let report = bulk::bulk_apply_with_progress(&adapter, instructions, |outcome| {
        progress.set_message(&outcome.target_url);
        progress.inc(1);
    })
    .await;

    if report.all_succeeded() {
        progress.finish_clear();
    } else {
        progress.finish_err("batch finished with failures");
    }

    output(&report, flags.format)?;

    if !report.all_succeeded() {
        anyhow::bail!("{} of {} writes failed", report.failed, report.attempted);
    }
    Ok(())
}

fn read_instructions(file: &str) -> anyhow::Result<Vec<BulkInstruction>> {
    let raw = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read instruction file {file}"))?;
    serde_json::from_str(&raw).with_context(|| format!("invalid instruction file {file}"))
}
