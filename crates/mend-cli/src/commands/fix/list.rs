use mend_core::entities::FixRecord;
use mend_core::enums::FixStatus;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::commands::shared::lookup::or_not_found;
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct FixListResponse {
    fixes: Vec<FixRecord>,
}

pub async fn run(
    audit: &str,
    status: Option<&str>,
    actionable: bool,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    or_not_found(ctx.service.get_audit(audit).await, "audit", audit)?;

    let fixes = if actionable {
        ctx.service.list_actionable_fixes(audit).await?
    } else {
        let status = status
            .map(|value| parse_enum::<FixStatus>(value, "status"))
            .transpose()?;
        ctx.service.list_fixes(audit, status).await?
    };

    output(&FixListResponse { fixes }, flags.format)
}
