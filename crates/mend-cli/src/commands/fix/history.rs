use mend_core::entities::ActivityEntry;
use mend_core::enums::EntityType;
use mend_db::repos::activity::ActivityFilter;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::commands::shared::lookup::or_not_found;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct FixHistoryResponse {
    fix_id: String,
    history: Vec<ActivityEntry>,
}

pub async fn run(id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    or_not_found(ctx.service.get_fix(id).await, "fix", id)?;

    let history = ctx
        .service
        .query_activity(&ActivityFilter {
            entity_type: Some(EntityType::Fix),
            entity_id: Some(id.to_string()),
            ..ActivityFilter::default()
        })
        .await?;

    output(
        &FixHistoryResponse {
            fix_id: id.to_string(),
            history,
        },
        flags.format,
    )
}
