//! Fix ledger repository.
//!
//! Inserts are guarded by the `(audit_id, issue_type, field_path)` uniqueness
//! key, and status moves are compare-and-swap UPDATEs keyed on the expected
//! current status, so a concurrent reviewer cannot double-apply a fix.

use chrono::Utc;

use mend_core::activity_detail::{StatusChangedDetail, WriteFailedDetail};
use mend_core::entities::{ActivityEntry, FixRecord};
use mend_core::enums::{ActivityAction, EntityType, FixStatus, Severity};
use mend_core::field_path::FieldPath;
use mend_core::ids::{PREFIX_ACTIVITY, PREFIX_FIX};

use crate::error::DatabaseError;
use crate::helpers::{
    encode_field_path, get_opt_string, parse_datetime, parse_enum, parse_field_path,
    parse_optional_datetime,
};
use crate::service::MendService;

/// Rows per multi-row INSERT. 12 columns each keeps the placeholder count
/// well under SQLite's variable limit.
const INSERT_CHUNK: usize = 25;

const SELECT_COLS: &str = "id, audit_id, issue_type, severity, title, description, document_type, \
     document_id, field_path, current_value, proposed_value, status, error_message, \
     created_at, applied_at, published_at";

fn row_to_fix(row: &libsql::Row) -> Result<FixRecord, DatabaseError> {
    Ok(FixRecord {
        id: row.get(0)?,
        audit_id: row.get(1)?,
        issue_type: row.get(2)?,
        severity: parse_enum(&row.get::<String>(3)?)?,
        title: row.get(4)?,
        description: get_opt_string(row, 5)?,
        document_type: row.get(6)?,
        document_id: get_opt_string(row, 7)?,
        field_path: parse_field_path(&row.get::<String>(8)?)?,
        current_value: get_opt_string(row, 9)?,
        proposed_value: row.get(10)?,
        status: parse_enum(&row.get::<String>(11)?)?,
        error_message: get_opt_string(row, 12)?,
        created_at: parse_datetime(&row.get::<String>(13)?)?,
        applied_at: parse_optional_datetime(get_opt_string(row, 14)?.as_deref())?,
        published_at: parse_optional_datetime(get_opt_string(row, 15)?.as_deref())?,
    })
}

fn text_or_null(value: Option<&str>) -> libsql::Value {
    value.map_or(libsql::Value::Null, |s| libsql::Value::Text(s.to_string()))
}

/// Input for [`MendService::insert_fixes`]. Status starts at `pending`;
/// ids and timestamps are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewFix {
    pub audit_id: String,
    pub issue_type: String,
    pub severity: Severity,
    pub title: String,
    pub description: Option<String>,
    pub document_type: String,
    pub document_id: Option<String>,
    pub field_path: FieldPath,
    pub current_value: Option<String>,
    pub proposed_value: String,
}

impl MendService {
    /// Insert fix records, skipping any whose `(audit_id, issue_type,
    /// field_path)` tuple already exists. Returns the number actually
    /// inserted, which is how the generation pass stays idempotent even
    /// when two passes race.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if an INSERT fails for any reason other
    /// than the uniqueness key.
    pub async fn insert_fixes(&self, fixes: &[NewFix]) -> Result<u64, DatabaseError> {
        let mut inserted = 0u64;

        for chunk in fixes.chunks(INSERT_CHUNK) {
            let mut placeholders = Vec::with_capacity(chunk.len());
            let mut params: Vec<libsql::Value> = Vec::with_capacity(chunk.len() * 12);

            for fix in chunk {
                let id = self.db().generate_id(PREFIX_FIX).await?;
                let base = params.len();
                placeholders.push(format!(
                    "({})",
                    (base + 1..=base + 12)
                        .map(|i| format!("?{i}"))
                        .collect::<Vec<_>>()
                        .join(", ")
                ));
                params.push(libsql::Value::Text(id));
                params.push(libsql::Value::Text(fix.audit_id.clone()));
                params.push(libsql::Value::Text(fix.issue_type.clone()));
                params.push(libsql::Value::Text(fix.severity.as_str().to_string()));
                params.push(libsql::Value::Text(fix.title.clone()));
                params.push(text_or_null(fix.description.as_deref()));
                params.push(libsql::Value::Text(fix.document_type.clone()));
                params.push(text_or_null(fix.document_id.as_deref()));
                params.push(libsql::Value::Text(encode_field_path(&fix.field_path)?));
                params.push(text_or_null(fix.current_value.as_deref()));
                params.push(libsql::Value::Text(fix.proposed_value.clone()));
                params.push(libsql::Value::Text(Utc::now().to_rfc3339()));
            }

            let sql = format!(
                "INSERT INTO fixes (id, audit_id, issue_type, severity, title, description, \
                 document_type, document_id, field_path, current_value, proposed_value, created_at)
                 VALUES {}
                 ON CONFLICT (audit_id, issue_type, field_path) DO NOTHING",
                placeholders.join(", ")
            );
            inserted += self
                .db()
                .conn()
                .execute(&sql, libsql::params_from_iter(params))
                .await?;
        }

        Ok(inserted)
    }

    /// Fast-path dedupe check for the generation pass. The uniqueness
    /// constraint remains the authority; this only avoids proposing values
    /// for tuples that already have a record.
    pub async fn fix_exists(
        &self,
        audit_id: &str,
        issue_type: &str,
        field_path: &FieldPath,
    ) -> Result<bool, DatabaseError> {
        let encoded = encode_field_path(field_path)?;
        let mut rows = self
            .db()
            .conn()
            .query(
                "SELECT 1 FROM fixes WHERE audit_id = ?1 AND issue_type = ?2 AND field_path = ?3 LIMIT 1",
                libsql::params![audit_id, issue_type, encoded.as_str()],
            )
            .await?;
        Ok(rows.next().await?.is_some())
    }

    pub async fn get_fix(&self, id: &str) -> Result<FixRecord, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(&format!("SELECT {SELECT_COLS} FROM fixes WHERE id = ?1"), [id])
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        row_to_fix(&row)
    }

    /// List fixes for an audit in generation order, optionally filtered
    /// by status.
    pub async fn list_fixes(
        &self,
        audit_id: &str,
        status: Option<FixStatus>,
    ) -> Result<Vec<FixRecord>, DatabaseError> {
        let mut conditions = vec!["audit_id = ?1".to_string()];
        let mut params: Vec<libsql::Value> = vec![libsql::Value::Text(audit_id.to_string())];

        if let Some(status) = status {
            params.push(libsql::Value::Text(status.as_str().to_string()));
            conditions.push(format!("status = ?{}", params.len()));
        }

        let sql = format!(
            "SELECT {SELECT_COLS} FROM fixes WHERE {} ORDER BY created_at, id",
            conditions.join(" AND ")
        );
        let mut rows = self
            .db()
            .conn()
            .query(&sql, libsql::params_from_iter(params))
            .await?;

        let mut fixes = Vec::new();
        while let Some(row) = rows.next().await? {
            fixes.push(row_to_fix(&row)?);
        }
        Ok(fixes)
    }

    /// List fixes still awaiting review action.
    pub async fn list_actionable_fixes(
        &self,
        audit_id: &str,
    ) -> Result<Vec<FixRecord>, DatabaseError> {
        // Keep the IN list in sync with FixStatus::is_actionable.
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM fixes
                     WHERE audit_id = ?1 AND status IN ('pending', 'approved', 'failed')
                     ORDER BY created_at, id"
                ),
                [audit_id],
            )
            .await?;

        let mut fixes = Vec::new();
        while let Some(row) = rows.next().await? {
            fixes.push(row_to_fix(&row)?);
        }
        Ok(fixes)
    }

    /// Persist a reviewer-edited proposed value.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if no fix has the given id.
    pub async fn set_proposed_value(
        &self,
        fix_id: &str,
        value: &str,
    ) -> Result<(), DatabaseError> {
        let affected = self
            .db()
            .conn()
            .execute(
                "UPDATE fixes SET proposed_value = ?1 WHERE id = ?2",
                libsql::params![value, fix_id],
            )
            .await?;
        if affected == 0 {
            return Err(DatabaseError::NoResult);
        }
        Ok(())
    }

    /// Move a fix along the success path of its state machine.
    ///
    /// The UPDATE is keyed on both id and the expected `from` status; zero
    /// affected rows means either the fix is gone (`NoResult`) or another
    /// actor moved it first (`Conflict`). Entering `applied` or `published`
    /// stamps the matching timestamp; leaving `failed` clears the stored
    /// error. Appends an activity entry and returns the updated record.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::InvalidState` if the state machine forbids
    /// `from` → `to`, `NoResult`/`Conflict` as above.
    pub async fn transition_fix(
        &self,
        fix_id: &str,
        from: FixStatus,
        to: FixStatus,
    ) -> Result<FixRecord, DatabaseError> {
        // `failed` is written by fail_fix so the error message lands in the
        // same UPDATE; nothing transitions back into `pending`.
        let action = match to {
            FixStatus::Approved => ActivityAction::Approved,
            FixStatus::Rejected => ActivityAction::Rejected,
            FixStatus::Applied => ActivityAction::Applied,
            FixStatus::Published => ActivityAction::Published,
            FixStatus::Pending | FixStatus::Failed => {
                return Err(DatabaseError::InvalidState(format!(
                    "No direct transition to {to}"
                )));
            }
        };
        if !from.can_transition_to(to) {
            return Err(DatabaseError::InvalidState(format!(
                "Cannot transition fix {fix_id} from {from} to {to}"
            )));
        }

        let now = Utc::now();
        let mut sets = vec!["status = ?1".to_string()];
        let mut params: Vec<libsql::Value> =
            vec![libsql::Value::Text(to.as_str().to_string())];

        if to == FixStatus::Applied {
            params.push(libsql::Value::Text(now.to_rfc3339()));
            sets.push(format!("applied_at = ?{}", params.len()));
        }
        if to == FixStatus::Published {
            params.push(libsql::Value::Text(now.to_rfc3339()));
            sets.push(format!("published_at = ?{}", params.len()));
        }
        if from == FixStatus::Failed {
            sets.push("error_message = NULL".to_string());
        }

        params.push(libsql::Value::Text(fix_id.to_string()));
        let id_idx = params.len();
        params.push(libsql::Value::Text(from.as_str().to_string()));
        let from_idx = params.len();

        let sql = format!(
            "UPDATE fixes SET {} WHERE id = ?{id_idx} AND status = ?{from_idx}",
            sets.join(", ")
        );
        let affected = self
            .db()
            .conn()
            .execute(&sql, libsql::params_from_iter(params))
            .await?;
        if affected == 0 {
            return Err(self.cas_failure(fix_id, from).await);
        }

        self.log_fix_transition(fix_id, from, to, action, now).await?;
        self.get_fix(fix_id).await
    }

    /// Record a remote-write failure: CAS the fix into `failed` with the
    /// error message, keeping any `applied_at` already earned. Appends a
    /// `write_failed` activity entry naming the operation that broke.
    ///
    /// # Errors
    ///
    /// Same CAS semantics as [`MendService::transition_fix`].
    pub async fn fail_fix(
        &self,
        fix_id: &str,
        from: FixStatus,
        operation: &str,
        message: &str,
    ) -> Result<FixRecord, DatabaseError> {
        if !from.can_transition_to(FixStatus::Failed) {
            return Err(DatabaseError::InvalidState(format!(
                "Cannot transition fix {fix_id} from {from} to failed"
            )));
        }

        let now = Utc::now();
        let affected = self
            .db()
            .conn()
            .execute(
                "UPDATE fixes SET status = 'failed', error_message = ?1 WHERE id = ?2 AND status = ?3",
                libsql::params![message, fix_id, from.as_str()],
            )
            .await?;
        if affected == 0 {
            return Err(self.cas_failure(fix_id, from).await);
        }

        let detail = serde_json::to_value(WriteFailedDetail {
            operation: operation.to_string(),
            message: message.to_string(),
        })
        .map_err(|e| DatabaseError::Other(e.into()))?;
        let activity_id = self.db().generate_id(PREFIX_ACTIVITY).await?;
        self.append_activity(&ActivityEntry {
            id: activity_id,
            entity_type: EntityType::Fix,
            entity_id: fix_id.to_string(),
            action: ActivityAction::WriteFailed,
            detail: Some(detail),
            created_at: now,
        })
        .await?;

        self.get_fix(fix_id).await
    }

    /// Classify a zero-row CAS update: row missing vs. moved concurrently.
    async fn cas_failure(&self, fix_id: &str, from: FixStatus) -> DatabaseError {
        match self.get_fix(fix_id).await {
            Ok(current) => DatabaseError::Conflict(format!(
                "Fix {fix_id} moved from {from} to {} during update",
                current.status
            )),
            Err(e) => e,
        }
    }

    async fn log_fix_transition(
        &self,
        fix_id: &str,
        from: FixStatus,
        to: FixStatus,
        action: ActivityAction,
        now: chrono::DateTime<Utc>,
    ) -> Result<(), DatabaseError> {
        let detail = serde_json::to_value(StatusChangedDetail {
            from: from.as_str().to_string(),
            to: to.as_str().to_string(),
        })
        .map_err(|e| DatabaseError::Other(e.into()))?;
        let activity_id = self.db().generate_id(PREFIX_ACTIVITY).await?;
        self.append_activity(&ActivityEntry {
            id: activity_id,
            entity_type: EntityType::Fix,
            entity_id: fix_id.to_string(),
            action,
            detail: Some(detail),
            created_at: now,
        })
        .await
    }
}
