use mend_core::responses::GenerateResponse;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

pub async fn run(audit: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let engine = ctx.engine()?;

    let progress = Progress::spinner("generating fixes", flags);
    let created = match engine.generate_fixes(audit).await {
        Ok(created) => created,
        Err(error) => {
            progress.finish_err("generation failed");
            return Err(error.into());
        }
    };
    progress.finish_clear();

    output(
        &GenerateResponse {
            audit_id: audit.to_string(),
            created,
        },
        flags.format,
    )
}
