//! Serde roundtrip and JsonSchema validation tests for all entity types.

use chrono::Utc;
use mend_core::activity_detail::{GeneratedDetail, StatusChangedDetail, WriteFailedDetail};
use mend_core::entities::*;
use mend_core::enums::*;
use mend_core::field_path::FieldPath;
use mend_core::responses::*;
use schemars::schema_for;

/// Validate a JSON value against a schemars-generated schema.
fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

macro_rules! roundtrip_and_validate {
    ($name:ident, $ty:ty, $instance:expr) => {
        #[test]
        fn $name() {
            let val: $ty = $instance;

            // Serde roundtrip
            let json_str = serde_json::to_string_pretty(&val).unwrap();
            let recovered: $ty = serde_json::from_str(&json_str).unwrap();
            assert_eq!(
                recovered,
                val,
                "serde roundtrip failed for {}",
                stringify!($ty)
            );

            // Schema validation
            let schema = serde_json::to_value(schema_for!($ty)).unwrap();
            let instance = serde_json::to_value(&val).unwrap();
            let errors = validate_against_schema(&schema, &instance);
            assert!(
                errors.is_empty(),
                "Schema validation failed for {}: {:?}",
                stringify!($ty),
                errors
            );
        }
    };
}

fn sample_fix() -> FixRecord {
    FixRecord {
        id: "fix-a3f8b2c1".into(),
        audit_id: "aud-11aa22bb".into(),
        issue_type: "missing_meta_description".into(),
        severity: Severity::Warning,
        title: "Missing meta description".into(),
        description: Some("The homepage has no meta description tag.".into()),
        document_type: "landingPage".into(),
        document_id: Some("home".into()),
        field_path: FieldPath::from_dotted("seo.metaDescription").unwrap(),
        current_value: None,
        proposed_value: "Acme helps teams ship faster. Explore products, pricing, and \
                         support, and see why customers choose acme.dev for their work."
            .into(),
        status: FixStatus::Pending,
        error_message: None,
        created_at: Utc::now(),
        applied_at: None,
        published_at: None,
    }
}

roundtrip_and_validate!(
    audit_roundtrip,
    SiteAudit,
    SiteAudit {
        id: "aud-11aa22bb".into(),
        site_url: "https://acme.dev".into(),
        site_title: Some("Acme".into()),
        created_at: Utc::now(),
    }
);

roundtrip_and_validate!(
    page_roundtrip,
    CrawledPage,
    CrawledPage {
        id: "pag-0c1d2e3f".into(),
        audit_id: "aud-11aa22bb".into(),
        url: "https://acme.dev/pricing".into(),
        path: "/pricing".into(),
        title: Some("Pricing | Acme".into()),
        meta_description: None,
        noindex: false,
        created_at: Utc::now(),
    }
);

roundtrip_and_validate!(
    finding_roundtrip,
    Finding,
    Finding {
        id: "fnd-5e6f7a8b".into(),
        audit_id: "aud-11aa22bb".into(),
        issue_type: "missing_og_tags".into(),
        severity: Severity::Notice,
        title: "Open Graph tags missing".into(),
        description: None,
        evidence: Some(serde_json::json!({ "pages": ["/", "/pricing"] })),
        created_at: Utc::now(),
    }
);

roundtrip_and_validate!(fix_roundtrip, FixRecord, sample_fix());

roundtrip_and_validate!(
    fix_failed_roundtrip,
    FixRecord,
    FixRecord {
        status: FixStatus::Failed,
        error_message: Some("CMS API error (HTTP 403): insufficient permissions".into()),
        ..sample_fix()
    }
);

roundtrip_and_validate!(
    activity_roundtrip,
    ActivityEntry,
    ActivityEntry {
        id: "act-9b8c7d6e".into(),
        entity_type: EntityType::Fix,
        entity_id: "fix-a3f8b2c1".into(),
        action: ActivityAction::Applied,
        detail: Some(
            serde_json::to_value(StatusChangedDetail {
                from: "approved".into(),
                to: "applied".into(),
            })
            .unwrap()
        ),
        created_at: Utc::now(),
    }
);

roundtrip_and_validate!(
    status_changed_detail_roundtrip,
    StatusChangedDetail,
    StatusChangedDetail {
        from: "pending".into(),
        to: "approved".into(),
    }
);

roundtrip_and_validate!(
    generated_detail_roundtrip,
    GeneratedDetail,
    GeneratedDetail {
        created: 7,
        findings_seen: 12,
    }
);

roundtrip_and_validate!(
    write_failed_detail_roundtrip,
    WriteFailedDetail,
    WriteFailedDetail {
        operation: "publish".into(),
        message: "request timed out".into(),
    }
);

roundtrip_and_validate!(
    audit_import_response_roundtrip,
    AuditImportResponse,
    AuditImportResponse {
        audit: SiteAudit {
            id: "aud-11aa22bb".into(),
            site_url: "https://acme.dev".into(),
            site_title: None,
            created_at: Utc::now(),
        },
        pages: 14,
        findings: 9,
    }
);

roundtrip_and_validate!(
    generate_response_roundtrip,
    GenerateResponse,
    GenerateResponse {
        audit_id: "aud-11aa22bb".into(),
        created: 5,
    }
);

roundtrip_and_validate!(
    bulk_report_roundtrip,
    BulkApplyReport,
    BulkApplyReport {
        attempted: 2,
        succeeded: 1,
        failed: 1,
        results: vec![
            BulkOutcome {
                target_url: "https://acme.dev/pricing".into(),
                field: FixField::Title,
                success: true,
                error: None,
            },
            BulkOutcome {
                target_url: "https://acme.dev/missing".into(),
                field: FixField::MetaDescription,
                success: false,
                error: Some("no content found for path: /missing".into()),
            },
        ],
    }
);

#[test]
fn bulk_report_batch_success_requires_every_item() {
    let report = BulkApplyReport {
        attempted: 3,
        succeeded: 3,
        failed: 0,
        results: vec![],
    };
    assert!(report.all_succeeded());

    let report = BulkApplyReport {
        attempted: 3,
        succeeded: 2,
        failed: 1,
        results: vec![],
    };
    assert!(!report.all_succeeded());
}

#[test]
fn field_path_inside_fix_serializes_as_array() {
    let fix = sample_fix();
    let json = serde_json::to_value(&fix).unwrap();
    assert_eq!(
        json["field_path"],
        serde_json::json!(["seo", "metaDescription"])
    );
}
