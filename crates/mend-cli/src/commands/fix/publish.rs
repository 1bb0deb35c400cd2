use mend_core::responses::FixActionResponse;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    id: &str,
    value: Option<&str>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let engine = ctx.engine()?;
    let fix = engine.publish_fix(id, value).await?;
    output(&FixActionResponse { fix }, flags.format)
}
