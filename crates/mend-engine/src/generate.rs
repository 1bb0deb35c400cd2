//! The fix generation pass: findings in, pending fix records out.

use std::collections::{BTreeSet, HashMap};

use mend_cms::{CmsDocument, CmsError, field_value, value_to_text};
use mend_core::activity_detail::GeneratedDetail;
use mend_core::entities::{CrawledPage, Finding};
use mend_core::field_path::FieldPath;
use mend_db::repos::fix::NewFix;

use crate::mapping;
use crate::proposals::{self, SiteEvidence};
use crate::{EngineError, FixEngine};

/// The page whose path is `/`, else the first crawled page.
fn resolve_homepage(pages: &[CrawledPage]) -> Option<&CrawledPage> {
    pages.iter().find(|p| p.path == "/").or_else(|| pages.first())
}

impl FixEngine {
    /// Run the generation pass for an audit and return the number of fix
    /// records created.
    ///
    /// Idempotent: re-running against an already generated audit creates
    /// nothing and returns 0. A single finding's failure is logged and
    /// skipped, never aborting the pass; the store's uniqueness key
    /// absorbs races between concurrent passes.
    ///
    /// # Errors
    ///
    /// `NotFound` if the audit does not exist, `Store` if persistence
    /// fails outside per-finding work.
    pub async fn generate_fixes(&self, audit_id: &str) -> Result<u32, EngineError> {
        let audit = self.load_audit(audit_id).await?;
        let findings = self.store().list_findings(audit_id).await?;
        let pages = self.store().list_pages(audit_id).await?;

        let evidence = SiteEvidence::gather(&audit, resolve_homepage(&pages));
        let snapshots = self.snapshot_documents(&findings).await;

        let mut staged: Vec<NewFix> = Vec::new();
        for finding in &findings {
            if let Err(e) = self
                .stage_finding(audit_id, finding, &evidence, &snapshots, &mut staged)
                .await
            {
                tracing::warn!(
                    "Skipping finding {} ({}): {e}",
                    finding.id,
                    finding.issue_type
                );
            }
        }

        let created = u32::try_from(self.store().insert_fixes(&staged).await?).unwrap_or(u32::MAX);
        let findings_seen = u32::try_from(findings.len()).unwrap_or(u32::MAX);
        self.store()
            .log_generated(
                audit_id,
                &GeneratedDetail {
                    created,
                    findings_seen,
                },
            )
            .await?;
        tracing::info!(
            "Generated {created} fix records for audit {audit_id} ({findings_seen} findings seen)"
        );
        Ok(created)
    }

    /// Fetch one current-document snapshot per distinct mapped document
    /// type. Platforms without a document query, and failed fetches,
    /// degrade to an empty snapshot; generation proceeds without current
    /// values rather than failing the pass.
    async fn snapshot_documents(
        &self,
        findings: &[Finding],
    ) -> HashMap<&'static str, Option<CmsDocument>> {
        let mut doc_types = BTreeSet::new();
        for finding in findings {
            for target in mapping::lookup(&finding.issue_type) {
                doc_types.insert(target.document_type);
            }
        }

        let mut snapshots = HashMap::new();
        for doc_type in doc_types {
            let document = match self.adapter.documents_by_type(doc_type).await {
                Ok(documents) => documents.into_iter().next(),
                Err(CmsError::Unsupported(reason)) => {
                    tracing::debug!("No document snapshot for {doc_type}: {reason}");
                    None
                }
                Err(e) => {
                    tracing::warn!(
                        "Snapshot fetch for {doc_type} failed: {e}; generating without current values"
                    );
                    None
                }
            };
            snapshots.insert(doc_type, document);
        }
        snapshots
    }

    async fn stage_finding(
        &self,
        audit_id: &str,
        finding: &Finding,
        evidence: &SiteEvidence,
        snapshots: &HashMap<&'static str, Option<CmsDocument>>,
        staged: &mut Vec<NewFix>,
    ) -> Result<(), EngineError> {
        for target in mapping::lookup(&finding.issue_type) {
            let path = FieldPath::new(
                target.path_segments.iter().map(|s| (*s).to_string()).collect(),
            )?;

            // Fast-path dedupe; the store's uniqueness key stays the authority.
            if self
                .store()
                .fix_exists(audit_id, &finding.issue_type, &path)
                .await?
            {
                continue;
            }

            let document = snapshots.get(target.document_type).and_then(Option::as_ref);
            let current = document
                .and_then(|doc| field_value(&doc.content, &path))
                .and_then(value_to_text);

            let Some(proposed) = proposals::propose(target.kind, evidence, current.as_deref())
            else {
                continue;
            };

            // No-op suppression: the CMS already holds this value.
            if current
                .as_deref()
                .is_some_and(|cur| cur.trim() == proposed.trim())
            {
                continue;
            }

            staged.push(NewFix {
                audit_id: audit_id.to_string(),
                issue_type: finding.issue_type.clone(),
                severity: finding.severity,
                title: finding.title.clone(),
                description: finding.description.clone(),
                document_type: target.document_type.to_string(),
                document_id: document.map(|doc| doc.id.clone()),
                field_path: path,
                current_value: current,
                proposed_value: proposed,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use mend_core::enums::FixStatus;
    use pretty_assertions::assert_eq;

    use crate::EngineError;
    use crate::mapping::DOC_LANDING_PAGE;
    use crate::test_support::helpers::{MockAdapter, add_finding, seeded_audit, test_engine};

    #[tokio::test]
    async fn creates_pending_records_for_mapped_findings() {
        let adapter = Arc::new(MockAdapter::draft_capable().with_document(
            DOC_LANDING_PAGE,
            "home",
            serde_json::json!({ "seo": { "metaDescription": "Too short." } }),
        ));
        let engine = test_engine(adapter).await;
        let audit = seeded_audit(&engine).await;
        add_finding(&engine, &audit.id, "missing_meta_description").await;
        add_finding(&engine, &audit.id, "broken_internal_links").await;

        let created = engine.generate_fixes(&audit.id).await.unwrap();
        assert_eq!(created, 1, "the unmapped finding produces nothing");

        let fixes = engine.store().list_fixes(&audit.id, None).await.unwrap();
        assert_eq!(fixes.len(), 1);
        let fix = &fixes[0];
        assert_eq!(fix.status, FixStatus::Pending);
        assert_eq!(fix.document_id.as_deref(), Some("home"));
        assert_eq!(fix.current_value.as_deref(), Some("Too short."));
        assert!(fix.proposed_value.contains("Acme"));
    }

    #[tokio::test]
    async fn regeneration_creates_nothing() {
        let adapter = Arc::new(MockAdapter::draft_capable());
        let engine = test_engine(adapter).await;
        let audit = seeded_audit(&engine).await;
        add_finding(&engine, &audit.id, "missing_meta_description").await;

        assert_eq!(engine.generate_fixes(&audit.id).await.unwrap(), 1);
        assert_eq!(engine.generate_fixes(&audit.id).await.unwrap(), 0);
        let fixes = engine.store().list_fixes(&audit.id, None).await.unwrap();
        assert_eq!(fixes.len(), 1);
    }

    #[tokio::test]
    async fn suppresses_noop_when_cms_already_holds_value() {
        // In the 120-160 window, so the policy keeps it verbatim and the
        // proposal equals the snapshot.
        let healthy = "Acme builds practical developer tools that help product teams plan, \
                       ship and measure their releases with less friction every single week.";
        let adapter = Arc::new(MockAdapter::draft_capable().with_document(
            DOC_LANDING_PAGE,
            "home",
            serde_json::json!({ "seo": { "metaDescription": healthy } }),
        ));
        let engine = test_engine(adapter).await;
        let audit = seeded_audit(&engine).await;
        add_finding(&engine, &audit.id, "missing_meta_description").await;

        assert_eq!(engine.generate_fixes(&audit.id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn open_graph_finding_fans_out() {
        let adapter = Arc::new(MockAdapter::draft_capable().with_document(
            DOC_LANDING_PAGE,
            "home",
            serde_json::json!({ "seo": {} }),
        ));
        let engine = test_engine(adapter).await;
        let audit = seeded_audit(&engine).await;
        add_finding(&engine, &audit.id, "missing_open_graph").await;

        assert_eq!(engine.generate_fixes(&audit.id).await.unwrap(), 2);

        let fixes = engine.store().list_fixes(&audit.id, None).await.unwrap();
        let mut paths: Vec<String> = fixes.iter().map(|f| f.field_path.dotted()).collect();
        paths.sort();
        assert_eq!(paths, ["seo.ogDescription", "seo.ogTitle"]);
    }

    #[tokio::test]
    async fn unsupported_snapshot_degrades_to_unresolved_targets() {
        let adapter = Arc::new(MockAdapter::publish_only());
        let engine = test_engine(adapter).await;
        let audit = seeded_audit(&engine).await;
        add_finding(&engine, &audit.id, "missing_meta_description").await;

        assert_eq!(engine.generate_fixes(&audit.id).await.unwrap(), 1);

        let fixes = engine.store().list_fixes(&audit.id, None).await.unwrap();
        assert_eq!(fixes[0].document_id, None);
        assert_eq!(fixes[0].current_value, None);
    }

    #[tokio::test]
    async fn unknown_audit_is_not_found() {
        let engine = test_engine(Arc::new(MockAdapter::draft_capable())).await;
        let err = engine.generate_fixes("aud-missing").await.unwrap_err();
        assert!(
            matches!(err, EngineError::NotFound { entity: "audit", .. }),
            "got {err:?}"
        );
    }

    #[tokio::test]
    async fn logs_one_generated_activity_entry() {
        use mend_core::enums::ActivityAction;
        use mend_db::repos::activity::ActivityFilter;

        let adapter = Arc::new(MockAdapter::draft_capable());
        let engine = test_engine(adapter).await;
        let audit = seeded_audit(&engine).await;
        add_finding(&engine, &audit.id, "missing_title").await;
        add_finding(&engine, &audit.id, "missing_twitter_card").await;

        engine.generate_fixes(&audit.id).await.unwrap();

        let entries = engine
            .store()
            .query_activity(&ActivityFilter {
                entity_id: Some(audit.id.clone()),
                action: Some(ActivityAction::Generated),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(entries.len(), 1);
        let detail = entries[0].detail.as_ref().unwrap();
        assert_eq!(detail["created"], 2);
        assert_eq!(detail["findings_seen"], 2);
    }
}
