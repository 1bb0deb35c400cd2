//! Finding repository. Findings are read-only after import.

use chrono::Utc;

use mend_core::entities::Finding;
use mend_core::enums::Severity;
use mend_core::ids::PREFIX_FINDING;

use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, parse_datetime, parse_enum, parse_optional_json};
use crate::service::MendService;

const SELECT_COLS: &str = "id, audit_id, issue_type, severity, title, description, evidence, created_at";

fn row_to_finding(row: &libsql::Row) -> Result<Finding, DatabaseError> {
    Ok(Finding {
        id: row.get(0)?,
        audit_id: row.get(1)?,
        issue_type: row.get(2)?,
        severity: parse_enum(&row.get::<String>(3)?)?,
        title: row.get(4)?,
        description: get_opt_string(row, 5)?,
        evidence: parse_optional_json(get_opt_string(row, 6)?.as_deref())?,
        created_at: parse_datetime(&row.get::<String>(7)?)?,
    })
}

/// Input for [`MendService::record_finding`].
#[derive(Debug, Clone)]
pub struct NewFinding {
    pub issue_type: String,
    pub severity: Severity,
    pub title: String,
    pub description: Option<String>,
    pub evidence: Option<serde_json::Value>,
}

impl MendService {
    pub async fn record_finding(
        &self,
        audit_id: &str,
        finding: &NewFinding,
    ) -> Result<Finding, DatabaseError> {
        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_FINDING).await?;

        self.db()
            .conn()
            .execute(
                "INSERT INTO findings (id, audit_id, issue_type, severity, title, description, evidence, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                libsql::params![
                    id.as_str(),
                    audit_id,
                    finding.issue_type.as_str(),
                    finding.severity.as_str(),
                    finding.title.as_str(),
                    finding.description.as_deref(),
                    finding
                        .evidence
                        .as_ref()
                        .map(std::string::ToString::to_string)
                        .as_deref(),
                    now.to_rfc3339()
                ],
            )
            .await?;

        Ok(Finding {
            id,
            audit_id: audit_id.to_string(),
            issue_type: finding.issue_type.clone(),
            severity: finding.severity,
            title: finding.title.clone(),
            description: finding.description.clone(),
            evidence: finding.evidence.clone(),
            created_at: now,
        })
    }

    /// List findings for an audit in insertion order. The generation pass
    /// depends on this ordering to keep fix ids stable across runs.
    pub async fn list_findings(&self, audit_id: &str) -> Result<Vec<Finding>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM findings WHERE audit_id = ?1 ORDER BY created_at, id"
                ),
                [audit_id],
            )
            .await?;

        let mut findings = Vec::new();
        while let Some(row) = rows.next().await? {
            findings.push(row_to_finding(&row)?);
        }
        Ok(findings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{seeded_audit, test_service};

    #[tokio::test]
    async fn record_finding_roundtrip() {
        let svc = test_service().await;
        let audit = seeded_audit(&svc).await;

        let finding = svc
            .record_finding(
                &audit.id,
                &NewFinding {
                    issue_type: "missing_meta_description".into(),
                    severity: Severity::Warning,
                    title: "Missing meta description".into(),
                    description: Some("The homepage has no meta description.".into()),
                    evidence: Some(serde_json::json!({ "path": "/" })),
                },
            )
            .await
            .unwrap();
        assert!(finding.id.starts_with("fnd-"));

        let listed = svc.list_findings(&audit.id).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0], finding);
    }

    #[tokio::test]
    async fn unknown_issue_types_are_stored_verbatim() {
        let svc = test_service().await;
        let audit = seeded_audit(&svc).await;

        svc.record_finding(
            &audit.id,
            &NewFinding {
                issue_type: "some_future_analyzer".into(),
                severity: Severity::Notice,
                title: "Novel issue".into(),
                description: None,
                evidence: None,
            },
        )
        .await
        .unwrap();

        let listed = svc.list_findings(&audit.id).await.unwrap();
        assert_eq!(listed[0].issue_type, "some_future_analyzer");
        assert!(listed[0].evidence.is_none());
    }
}
