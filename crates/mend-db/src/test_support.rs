//! Shared test utilities for mend-db repo tests.

pub(crate) mod helpers {
    use mend_core::entities::{FixRecord, SiteAudit};
    use mend_core::enums::Severity;
    use mend_core::field_path::FieldPath;

    use crate::repos::fix::NewFix;
    use crate::service::MendService;

    /// Create an in-memory service with migrations applied.
    pub async fn test_service() -> MendService {
        MendService::new_local(":memory:").await.unwrap()
    }

    /// Create an audit to hang pages, findings and fixes off.
    pub async fn seeded_audit(svc: &MendService) -> SiteAudit {
        svc.create_audit("https://acme.dev", Some("Acme"))
            .await
            .unwrap()
    }

    /// A representative pending fix input for `audit_id`.
    pub fn sample_fix(audit_id: &str) -> NewFix {
        NewFix {
            audit_id: audit_id.to_string(),
            issue_type: "missing_meta_description".into(),
            severity: Severity::Warning,
            title: "Missing meta description".into(),
            description: Some("The homepage has no meta description.".into()),
            document_type: "landingPage".into(),
            document_id: Some("home".into()),
            field_path: FieldPath::from_dotted("seo.metaDescription").unwrap(),
            current_value: None,
            proposed_value: "Acme builds developer tools for teams that ship fast.".into(),
        }
    }

    /// Seed an audit with one pending fix and return the stored record.
    pub async fn seeded_fix(svc: &MendService) -> FixRecord {
        let audit = seeded_audit(svc).await;
        svc.insert_fixes(&[sample_fix(&audit.id)]).await.unwrap();
        svc.list_fixes(&audit.id, None).await.unwrap().remove(0)
    }
}
