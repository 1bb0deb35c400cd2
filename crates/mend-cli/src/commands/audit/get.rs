use mend_core::entities::{CrawledPage, Finding, SiteAudit};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::commands::shared::lookup::or_not_found;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct AuditDetailResponse {
    audit: SiteAudit,
    pages: Vec<CrawledPage>,
    findings: Vec<Finding>,
}

pub async fn run(id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let audit = or_not_found(ctx.service.get_audit(id).await, "audit", id)?;
    let pages = ctx.service.list_pages(id).await?;
    let findings = ctx.service.list_findings(id).await?;

    output(
        &AuditDetailResponse {
            audit,
            pages,
            findings,
        },
        flags.format,
    )
}
