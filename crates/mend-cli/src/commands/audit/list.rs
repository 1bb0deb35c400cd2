use mend_core::entities::SiteAudit;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::commands::shared::limit::effective_limit;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct AuditListResponse {
    audits: Vec<SiteAudit>,
}

pub async fn run(limit: Option<u32>, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let limit = effective_limit(limit, flags.limit, ctx.config.general.default_limit);
    let audits = ctx.service.list_audits(limit).await?;
    output(&AuditListResponse { audits }, flags.format)
}
