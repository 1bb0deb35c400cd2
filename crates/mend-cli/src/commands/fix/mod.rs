mod apply;
mod approve;
mod bulk_apply;
mod generate;
mod get;
mod history;
mod list;
mod publish;
mod reject;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::FixCommands;
use crate::context::AppContext;

/// Handle `smd fix`.
pub async fn handle(
    action: &FixCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        FixCommands::Generate { audit } => generate::run(audit, ctx, flags).await,
        FixCommands::List {
            audit,
            status,
            actionable,
        } => list::run(audit, status.as_deref(), *actionable, ctx, flags).await,
        FixCommands::Get { id } => get::run(id, ctx, flags).await,
        FixCommands::History { id } => history::run(id, ctx, flags).await,
        FixCommands::Approve { id } => approve::run(id, ctx, flags).await,
        FixCommands::Reject { id } => reject::run(id, ctx, flags).await,
        FixCommands::Apply { id, value } => apply::run(id, value.as_deref(), ctx, flags).await,
        FixCommands::Publish { id, value } => publish::run(id, value.as_deref(), ctx, flags).await,
        FixCommands::BulkApply { file } => bulk_apply::run(file, ctx, flags).await,
    }
}
