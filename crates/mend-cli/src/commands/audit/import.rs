use anyhow::Context;
use mend_core::enums::Severity;
use mend_core::responses::AuditImportResponse;
use mend_db::repos::finding::NewFinding;
use mend_db::repos::page::NewPage;
use serde::Deserialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

/// On-disk shape of the crawl pipeline's export file.
#[derive(Debug, Deserialize)]
struct CrawlExport {
    site: CrawlSite,
    #[serde(default)]
    pages: Vec<CrawlPage>,
    #[serde(default)]
    findings: Vec<CrawlFinding>,
}

#[derive(Debug, Deserialize)]
struct CrawlSite {
    url: String,
    title: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CrawlPage {
    url: String,
    path: String,
    title: Option<String>,
    meta_description: Option<String>,
    #[serde(default)]
    noindex: bool,
}

#[derive(Debug, Deserialize)]
struct CrawlFinding {
    issue_type: String,
    severity: Severity,
    title: String,
    description: Option<String>,
    evidence: Option<serde_json::Value>,
}

pub async fn run(file: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read crawl export {file}"))?;
    let export: CrawlExport =
        serde_json::from_str(&raw).with_context(|| format!("invalid crawl export {file}"))?;

    let audit = ctx
        .service
        .create_audit(&export.site.url, export.site.title.as_deref())
        .await?;

    for page in &export.pages {
        ctx.service
            .record_page(
                &audit.id,
                &NewPage {
                    url: page.url.clone(),
                    path: page.path.clone(),
                    title: page.title.clone(),
                    meta_description: page.meta_description.clone(),
                    noindex: page.noindex,
                },
            )
            .await?;
    }

    for finding in &export.findings {
        ctx.service
            .record_finding(
                &audit.id,
                &NewFinding {
                    issue_type: finding.issue_type.clone(),
                    severity: finding.severity,
                    title: finding.title.clone(),
                    description: finding.description.clone(),
                    evidence: finding.evidence.clone(),
                },
            )
            .await?;
    }

    let response = AuditImportResponse {
        audit,
        pages: u32::try_from(export.pages.len()).unwrap_or(u32::MAX),
        findings: u32::try_from(export.findings.len()).unwrap_or(u32::MAX),
    };
    output(&response, flags.format)
}

#[cfg(test)]
mod tests {
    use mend_core::enums::Severity;
    use pretty_assertions::assert_eq;

    use super::CrawlExport;

    #[test]
    fn parses_a_full_crawl_export() {
        let raw = r#"{
            "site": { "url": "https://acme.dev", "title": "Acme" },
            "pages": [
                {
                    "url": "https://acme.dev/",
                    "path": "/",
                    "title": "Acme home",
                    "meta_description": null,
                    "noindex": false
                }
            ],
            "findings": [
                {
                    "issue_type": "missing_meta_description",
                    "severity": "warning",
                    "title": "Homepage has no meta description",
                    "description": null,
                    "evidence": { "selector": "head > meta[name=description]" }
                }
            ]
        }"#;

        let export: CrawlExport = serde_json::from_str(raw).expect("export should parse");
        assert_eq!(export.site.url, "https://acme.dev");
        assert_eq!(export.pages.len(), 1);
        assert_eq!(export.pages[0].path, "/");
        assert_eq!(export.findings.len(), 1);
        assert_eq!(export.findings[0].severity, Severity::Warning);
        assert!(export.findings[0].evidence.is_some());
    }

    #[test]
    fn pages_and_findings_default_to_empty() {
        let raw = r#"{ "site": { "url": "https://acme.dev", "title": null } }"#;
        let export: CrawlExport = serde_json::from_str(raw).expect("export should parse");
        assert!(export.pages.is_empty());
        assert!(export.findings.is_empty());
    }

    #[test]
    fn noindex_defaults_to_false() {
        let raw = r#"{
            "site": { "url": "https://acme.dev", "title": "Acme" },
            "pages": [{ "url": "https://acme.dev/about", "path": "/about" }]
        }"#;
        let export: CrawlExport = serde_json::from_str(raw).expect("export should parse");
        assert!(!export.pages[0].noindex);
        assert!(export.pages[0].title.is_none());
    }
}
