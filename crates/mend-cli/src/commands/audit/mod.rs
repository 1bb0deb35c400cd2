mod get;
mod import;
mod list;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::AuditCommands;
use crate::context::AppContext;

/// Handle `smd audit`.
pub async fn handle(
    action: &AuditCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        AuditCommands::Import { file } => import::run(file, ctx, flags).await,
        AuditCommands::List { limit } => list::run(*limit, ctx, flags).await,
        AuditCommands::Get { id } => get::run(id, ctx, flags).await,
    }
}
