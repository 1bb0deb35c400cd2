//! Sequential bulk apply for publish-only targets.
//!
//! Instructions address entities by URL, not by fix record; this is the
//! path an automation feed uses against a WordPress site. The batch is
//! capped, processed strictly one at a time with a politeness delay, and
//! every item gets an independent outcome. Partial completion is the
//! designed result of a mid-batch failure, never a rollback.

use std::time::Duration;

use async_trait::async_trait;
use mend_cms::wordpress::WordPressAdapter;
use mend_cms::{CmsAdapter, CmsError, EntityRef};
use mend_core::enums::FixField;
use mend_core::responses::{BulkApplyReport, BulkOutcome};
use serde::{Deserialize, Serialize};

/// Hard cap per batch. Excess instructions are dropped, not queued.
pub const BULK_FIX_LIMIT: usize = 50;

/// Politeness delay between consecutive writes.
const WRITE_DELAY: Duration = Duration::from_millis(250);

/// One instruction from a bulk-apply file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BulkInstruction {
    /// Page URL (or bare path) identifying the target entity.
    pub target_url: String,
    pub field: FixField,
    pub new_value: String,
}

/// What bulk apply needs from a platform: path resolution and a direct
/// per-field write. Implemented by [`WordPressAdapter`] and by test
/// doubles.
#[async_trait]
pub trait BulkTarget: Send + Sync {
    async fn locate_by_path(&self, url_path: &str) -> Result<Option<EntityRef>, CmsError>;

    async fn write_field(
        &self,
        entity: &EntityRef,
        field: FixField,
        value: &str,
    ) -> Result<(), CmsError>;
}

#[async_trait]
impl BulkTarget for WordPressAdapter {
    async fn locate_by_path(&self, url_path: &str) -> Result<Option<EntityRef>, CmsError> {
        CmsAdapter::locate_by_path(self, url_path).await
    }

    async fn write_field(
        &self,
        entity: &EntityRef,
        field: FixField,
        value: &str,
    ) -> Result<(), CmsError> {
        self.apply_field(entity, field, value).await
    }
}

/// Apply a batch of field writes, strictly sequentially.
///
/// One failed item never aborts the rest; its error lands in that item's
/// [`BulkOutcome`] and processing continues.
pub async fn bulk_apply<T: BulkTarget>(
    target: &T,
    instructions: Vec<BulkInstruction>,
) -> BulkApplyReport {
    bulk_apply_with_progress(target, instructions, |_| {}).await
}

/// [`bulk_apply`] with a per-item completion hook, so callers can drive a
/// progress display without the engine knowing about one.
pub async fn bulk_apply_with_progress<T, F>(
    target: &T,
    mut instructions: Vec<BulkInstruction>,
    mut on_item: F,
) -> BulkApplyReport
where
    T: BulkTarget,
    F: FnMut(&BulkOutcome),
{
    if instructions.len() > BULK_FIX_LIMIT {
        tracing::warn!(
            "Bulk apply capped at {BULK_FIX_LIMIT} items; dropping {}",
            instructions.len() - BULK_FIX_LIMIT
        );
        instructions.truncate(BULK_FIX_LIMIT);
    }

    let mut results = Vec::with_capacity(instructions.len());
    for (i, instruction) in instructions.iter().enumerate() {
        if i > 0 {
            tokio::time::sleep(WRITE_DELAY).await;
        }
        let error = match apply_instruction(target, instruction).await {
            Ok(()) => None,
            Err(e) => {
                tracing::warn!("Bulk item {} failed: {e}", instruction.target_url);
                Some(e.to_string())
            }
        };
        let outcome = BulkOutcome {
            target_url: instruction.target_url.clone(),
            field: instruction.field,
            success: error.is_none(),
            error,
        };
        on_item(&outcome);
        results.push(outcome);
    }

    let succeeded = results.iter().filter(|r| r.success).count();
    let report = BulkApplyReport {
        attempted: u32::try_from(results.len()).unwrap_or(u32::MAX),
        succeeded: u32::try_from(succeeded).unwrap_or(u32::MAX),
        failed: u32::try_from(results.len() - succeeded).unwrap_or(u32::MAX),
        results,
    };
    tracing::info!(
        "Bulk apply finished: {}/{} succeeded",
        report.succeeded,
        report.attempted
    );
    report
}

async fn apply_instruction<T: BulkTarget>(
    target: &T,
    instruction: &BulkInstruction,
) -> Result<(), CmsError> {
    let path = path_of(&instruction.target_url);
    let entity = target
        .locate_by_path(path)
        .await?
        .ok_or_else(|| CmsError::NotFound(format!("no entity matches {path}")))?;
    target
        .write_field(&entity, instruction.field, &instruction.new_value)
        .await
}

/// Path component of a target URL; bare paths pass through.
fn path_of(target_url: &str) -> &str {
    let stripped = target_url
        .trim()
        .trim_start_matches("https://")
        .trim_start_matches("http://");
    stripped.find('/').map_or("/", |i| &stripped[i..])
}
