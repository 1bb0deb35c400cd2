use mend_core::responses::FixActionResponse;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let engine = ctx.engine()?;
    let fix = engine.approve_fix(id).await?;
    output(&FixActionResponse { fix }, flags.format)
}
