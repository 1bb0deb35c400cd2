//! The review workflow: approve, reject, apply, publish.
//!
//! Every mutation loads the record, checks the operation guard against the
//! current status, then goes through the store's compare-and-swap
//! transition. A concurrent caller that moved the record first wins; the
//! loser gets a `Conflict` from the store rather than clobbering the row.

use mend_cms::{CmsError, FieldWrite};
use mend_core::entities::{ActivityEntry, FixRecord};
use mend_core::enums::{EntityType, FixStatus};
use mend_db::repos::activity::ActivityFilter;

use crate::{EngineError, FixEngine};

impl FixEngine {
    /// Move a pending fix to approved.
    ///
    /// # Errors
    ///
    /// `InvalidState` from any status but `pending`; `NotFound` for an
    /// unknown id.
    pub async fn approve_fix(&self, fix_id: &str) -> Result<FixRecord, EngineError> {
        let fix = self.load_fix(fix_id).await?;
        if fix.status != FixStatus::Pending {
            return Err(EngineError::InvalidState {
                fix_id: fix.id,
                status: fix.status,
                operation: "approve",
            });
        }
        Ok(self
            .store()
            .transition_fix(fix_id, FixStatus::Pending, FixStatus::Approved)
            .await?)
    }

    /// Reject a fix. Terminal: once rejected, apply and publish refuse.
    ///
    /// Rejecting an already rejected fix is a no-op success.
    ///
    /// # Errors
    ///
    /// `InvalidState` from `published`; `NotFound` for an unknown id.
    pub async fn reject_fix(&self, fix_id: &str) -> Result<FixRecord, EngineError> {
        let fix = self.load_fix(fix_id).await?;
        match fix.status {
            FixStatus::Published => Err(EngineError::InvalidState {
                fix_id: fix.id,
                status: fix.status,
                operation: "reject",
            }),
            FixStatus::Rejected => Ok(fix),
            from => Ok(self
                .store()
                .transition_fix(fix_id, from, FixStatus::Rejected)
                .await?),
        }
    }

    /// Write the proposed value into the target document's draft variant.
    ///
    /// One-step semantics: a `pending` or `failed` fix is auto-approved
    /// first, so a reviewer can apply straight from the list. The approval
    /// sticks even when the draft write is then refused as unsupported.
    ///
    /// # Errors
    ///
    /// `InvalidState` unless the fix is pending, approved or failed.
    /// `NotFound` when the target document was never resolved.
    /// `Unsupported` when the platform has no draft layer (nothing was
    /// written, the record is not marked failed). `RemoteWrite` when the
    /// CMS write fails; by then the record is `failed` with the message
    /// persisted.
    pub async fn apply_fix(
        &self,
        fix_id: &str,
        override_value: Option<&str>,
    ) -> Result<FixRecord, EngineError> {
        let fix = self.load_fix(fix_id).await?;
        if !matches!(
            fix.status,
            FixStatus::Pending | FixStatus::Approved | FixStatus::Failed
        ) {
            return Err(EngineError::InvalidState {
                fix_id: fix.id,
                status: fix.status,
                operation: "apply",
            });
        }
        let Some(document_id) = fix.document_id.clone() else {
            return Err(EngineError::NotFound {
                entity: "target document",
                id: fix.id,
            });
        };

        let fix = if fix.status == FixStatus::Approved {
            fix
        } else {
            self.store()
                .transition_fix(fix_id, fix.status, FixStatus::Approved)
                .await?
        };

        let value = self.persist_override(&fix, override_value).await?;
        let fields = [FieldWrite {
            path: fix.field_path.clone(),
            value,
        }];
        match self.adapter.patch_draft(&document_id, &fields).await {
            Ok(()) => {
                tracing::info!("Applied fix {fix_id} to draft of {document_id}");
                Ok(self
                    .store()
                    .transition_fix(fix_id, FixStatus::Approved, FixStatus::Applied)
                    .await?)
            }
            Err(CmsError::Unsupported(reason)) => Err(EngineError::Unsupported(reason)),
            Err(e) => {
                self.store()
                    .fail_fix(fix_id, FixStatus::Approved, "apply", &e.to_string())
                    .await?;
                Err(EngineError::RemoteWrite(e))
            }
        }
    }

    /// Write the proposed value directly into the published document.
    ///
    /// Idempotent: publishing an already published fix succeeds without
    /// touching the CMS again.
    ///
    /// # Errors
    ///
    /// `InvalidState` from `rejected`; `NotFound`, `Unsupported` and
    /// `RemoteWrite` as for [`FixEngine::apply_fix`].
    pub async fn publish_fix(
        &self,
        fix_id: &str,
        override_value: Option<&str>,
    ) -> Result<FixRecord, EngineError> {
        let fix = self.load_fix(fix_id).await?;
        match fix.status {
            FixStatus::Rejected => Err(EngineError::InvalidState {
                fix_id: fix.id,
                status: fix.status,
                operation: "publish",
            }),
            FixStatus::Published => Ok(fix),
            from => {
                let Some(document_id) = fix.document_id.clone() else {
                    return Err(EngineError::NotFound {
                        entity: "target document",
                        id: fix.id,
                    });
                };

                let value = self.persist_override(&fix, override_value).await?;
                let fields = [FieldWrite {
                    path: fix.field_path.clone(),
                    value,
                }];
                match self.adapter.patch_published(&document_id, &fields).await {
                    Ok(()) => {
                        tracing::info!("Published fix {fix_id} to {document_id}");
                        Ok(self
                            .store()
                            .transition_fix(fix_id, from, FixStatus::Published)
                            .await?)
                    }
                    Err(CmsError::Unsupported(reason)) => Err(EngineError::Unsupported(reason)),
                    Err(e) => {
                        self.store()
                            .fail_fix(fix_id, from, "publish", &e.to_string())
                            .await?;
                        Err(EngineError::RemoteWrite(e))
                    }
                }
            }
        }
    }

    /// Fixes for an audit, optionally filtered by status.
    ///
    /// # Errors
    ///
    /// `NotFound` if the audit does not exist.
    pub async fn list_fixes(
        &self,
        audit_id: &str,
        status: Option<FixStatus>,
    ) -> Result<Vec<FixRecord>, EngineError> {
        self.load_audit(audit_id).await?;
        Ok(self.store().list_fixes(audit_id, status).await?)
    }

    /// Fixes the review surface should offer actions on.
    ///
    /// # Errors
    ///
    /// `NotFound` if the audit does not exist.
    pub async fn list_actionable_fixes(
        &self,
        audit_id: &str,
    ) -> Result<Vec<FixRecord>, EngineError> {
        self.load_audit(audit_id).await?;
        Ok(self.store().list_actionable_fixes(audit_id).await?)
    }

    /// A single fix record.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown id.
    pub async fn get_fix(&self, fix_id: &str) -> Result<FixRecord, EngineError> {
        self.load_fix(fix_id).await
    }

    /// Activity entries for a fix, newest first.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown id.
    pub async fn fix_history(&self, fix_id: &str) -> Result<Vec<ActivityEntry>, EngineError> {
        self.load_fix(fix_id).await?;
        Ok(self
            .store()
            .query_activity(&ActivityFilter {
                entity_type: Some(EntityType::Fix),
                entity_id: Some(fix_id.to_string()),
                ..Default::default()
            })
            .await?)
    }

    /// Persist a reviewer override when it differs from the stored
    /// proposal, so the value written always matches what was last
    /// explicitly approved or overridden. Returns the value to write.
    async fn persist_override(
        &self,
        fix: &FixRecord,
        override_value: Option<&str>,
    ) -> Result<String, EngineError> {
        match override_value {
            Some(value) if value != fix.proposed_value => {
                self.store().set_proposed_value(&fix.id, value).await?;
                Ok(value.to_string())
            }
            Some(value) => Ok(value.to_string()),
            None => Ok(fix.proposed_value.clone()),
        }
    }
}
