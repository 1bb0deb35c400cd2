//! Site audit repository.

use chrono::Utc;

use mend_core::activity_detail::GeneratedDetail;
use mend_core::entities::{ActivityEntry, SiteAudit};
use mend_core::enums::{ActivityAction, EntityType};
use mend_core::ids::{PREFIX_ACTIVITY, PREFIX_AUDIT};

use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, parse_datetime};
use crate::service::MendService;

const SELECT_COLS: &str = "id, site_url, site_title, created_at";

fn row_to_audit(row: &libsql::Row) -> Result<SiteAudit, DatabaseError> {
    Ok(SiteAudit {
        id: row.get(0)?,
        site_url: row.get(1)?,
        site_title: get_opt_string(row, 2)?,
        created_at: parse_datetime(&row.get::<String>(3)?)?,
    })
}

impl MendService {
    pub async fn create_audit(
        &self,
        site_url: &str,
        site_title: Option<&str>,
    ) -> Result<SiteAudit, DatabaseError> {
        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_AUDIT).await?;

        self.db()
            .conn()
            .execute(
                "INSERT INTO audits (id, site_url, site_title, created_at) VALUES (?1, ?2, ?3, ?4)",
                libsql::params![id.as_str(), site_url, site_title, now.to_rfc3339()],
            )
            .await?;

        let audit = SiteAudit {
            id: id.clone(),
            site_url: site_url.to_string(),
            site_title: site_title.map(String::from),
            created_at: now,
        };

        let activity_id = self.db().generate_id(PREFIX_ACTIVITY).await?;
        self.append_activity(&ActivityEntry {
            id: activity_id,
            entity_type: EntityType::Audit,
            entity_id: id,
            action: ActivityAction::Created,
            detail: None,
            created_at: now,
        })
        .await?;

        Ok(audit)
    }

    pub async fn get_audit(&self, id: &str) -> Result<SiteAudit, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM audits WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_audit(&row)
    }

    pub async fn list_audits(&self, limit: u32) -> Result<Vec<SiteAudit>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM audits ORDER BY created_at DESC LIMIT {limit}"
                ),
                (),
            )
            .await?;

        let mut audits = Vec::new();
        while let Some(row) = rows.next().await? {
            audits.push(row_to_audit(&row)?);
        }
        Ok(audits)
    }

    /// Record a completed generation pass against an audit.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the activity INSERT fails.
    pub async fn log_generated(
        &self,
        audit_id: &str,
        detail: &GeneratedDetail,
    ) -> Result<(), DatabaseError> {
        let detail = serde_json::to_value(detail).map_err(|e| DatabaseError::Other(e.into()))?;
        let activity_id = self.db().generate_id(PREFIX_ACTIVITY).await?;
        self.append_activity(&ActivityEntry {
            id: activity_id,
            entity_type: EntityType::Audit,
            entity_id: audit_id.to_string(),
            action: ActivityAction::Generated,
            detail: Some(detail),
            created_at: Utc::now(),
        })
        .await
    }
}
