use mend_core::entities::FixRecord;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::commands::shared::lookup::or_not_found;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct FixDetailResponse {
    fix: FixRecord,
}

pub async fn run(id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let fix = or_not_found(ctx.service.get_fix(id).await, "fix", id)?;
    output(&FixDetailResponse { fix }, flags.format)
}
