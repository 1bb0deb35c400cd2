//! Shared fixtures for engine tests.

pub(crate) mod helpers {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use mend_cms::{CmsAdapter, CmsDocument, CmsError, EntityRef, FieldWrite};
    use mend_core::entities::SiteAudit;
    use mend_core::enums::{Platform, Severity};
    use mend_db::repos::finding::NewFinding;
    use mend_db::repos::page::NewPage;
    use mend_db::service::MendService;

    use crate::FixEngine;

    /// In-memory CMS double. Serves canned documents and records every
    /// write so tests can assert on exactly what was sent.
    pub struct MockAdapter {
        platform: Platform,
        publish_only: bool,
        /// Serve documents but refuse the draft path.
        draft_refused: bool,
        documents: HashMap<String, Vec<CmsDocument>>,
        /// When set, both patch paths fail with this message.
        fail_writes_with: Option<String>,
        pub draft_writes: Mutex<Vec<(String, Vec<FieldWrite>)>>,
        pub published_writes: Mutex<Vec<(String, Vec<FieldWrite>)>>,
    }

    impl MockAdapter {
        pub fn draft_capable() -> Self {
            Self {
                platform: Platform::Sanity,
                publish_only: false,
                draft_refused: false,
                documents: HashMap::new(),
                fail_writes_with: None,
                draft_writes: Mutex::new(Vec::new()),
                published_writes: Mutex::new(Vec::new()),
            }
        }

        pub fn publish_only() -> Self {
            Self {
                platform: Platform::Wordpress,
                publish_only: true,
                ..Self::draft_capable()
            }
        }

        pub fn refusing_drafts(mut self) -> Self {
            self.draft_refused = true;
            self
        }

        pub fn with_document(
            mut self,
            doc_type: &str,
            id: &str,
            content: serde_json::Value,
        ) -> Self {
            self.documents
                .entry(doc_type.to_string())
                .or_default()
                .push(CmsDocument {
                    id: id.to_string(),
                    doc_type: doc_type.to_string(),
                    content,
                });
            self
        }

        pub fn failing(mut self, message: &str) -> Self {
            self.fail_writes_with = Some(message.to_string());
            self
        }

        pub fn draft_write_count(&self) -> usize {
            self.draft_writes.lock().unwrap().len()
        }

        pub fn published_write_count(&self) -> usize {
            self.published_writes.lock().unwrap().len()
        }

        fn check_failure(&self) -> Result<(), CmsError> {
            match &self.fail_writes_with {
                Some(message) => Err(CmsError::Api {
                    status: 500,
                    message: message.clone(),
                }),
                None => Ok(()),
            }
        }
    }

    #[async_trait]
    impl CmsAdapter for MockAdapter {
        fn platform(&self) -> Platform {
            self.platform
        }

        fn supports_draft(&self) -> bool {
            !self.publish_only && !self.draft_refused
        }

        async fn documents_by_type(&self, doc_type: &str) -> Result<Vec<CmsDocument>, CmsError> {
            if self.publish_only {
                return Err(CmsError::Unsupported(
                    "no document-by-type query".to_string(),
                ));
            }
            Ok(self.documents.get(doc_type).cloned().unwrap_or_default())
        }

        async fn patch_draft(
            &self,
            document_id: &str,
            fields: &[FieldWrite],
        ) -> Result<(), CmsError> {
            if self.publish_only || self.draft_refused {
                return Err(CmsError::Unsupported("no draft layer".to_string()));
            }
            self.check_failure()?;
            self.draft_writes
                .lock()
                .unwrap()
                .push((document_id.to_string(), fields.to_vec()));
            Ok(())
        }

        async fn patch_published(
            &self,
            document_id: &str,
            fields: &[FieldWrite],
        ) -> Result<(), CmsError> {
            self.check_failure()?;
            self.published_writes
                .lock()
                .unwrap()
                .push((document_id.to_string(), fields.to_vec()));
            Ok(())
        }

        async fn locate_by_path(&self, _url_path: &str) -> Result<Option<EntityRef>, CmsError> {
            Ok(None)
        }
    }

    pub async fn test_engine(adapter: Arc<dyn CmsAdapter>) -> FixEngine {
        let store = MendService::new_local(":memory:").await.unwrap();
        FixEngine::new(Arc::new(store), adapter)
    }

    /// Audit for `https://acme.dev` with its homepage crawled: a too-short
    /// title and no meta description, so both title and description
    /// findings have evidence to work from.
    pub async fn seeded_audit(engine: &FixEngine) -> SiteAudit {
        let audit = engine
            .store()
            .create_audit("https://acme.dev", Some("Acme"))
            .await
            .unwrap();
        engine
            .store()
            .record_page(
                &audit.id,
                &NewPage {
                    url: "https://acme.dev/".to_string(),
                    path: "/".to_string(),
                    title: Some("Acme home".to_string()),
                    meta_description: None,
                    noindex: false,
                },
            )
            .await
            .unwrap();
        audit
    }

    pub async fn add_finding(engine: &FixEngine, audit_id: &str, issue_type: &str) {
        engine
            .store()
            .record_finding(
                audit_id,
                &NewFinding {
                    issue_type: issue_type.to_string(),
                    severity: Severity::Warning,
                    title: format!("Issue: {issue_type}"),
                    description: Some("Reported by the audit pipeline.".to_string()),
                    evidence: None,
                },
            )
            .await
            .unwrap();
    }
}
