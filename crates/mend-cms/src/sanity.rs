//! Sanity Content Lake adapter.
//!
//! Reads go through the GROQ query endpoint, writes through the mutate
//! endpoint. The draft layer uses Sanity's id convention: the draft variant
//! of document `home` is `drafts.home`.

use std::time::Duration;

use async_trait::async_trait;
use mend_config::SanityConfig;
use mend_core::enums::Platform;

use crate::error::CmsError;
use crate::http::check_response;
use crate::{CmsAdapter, CmsDocument, EntityRef, FieldWrite};

/// Sanity's draft id prefix.
const DRAFT_PREFIX: &str = "drafts.";

#[derive(serde::Deserialize)]
struct SanityQueryResponse {
    #[serde(default)]
    result: serde_json::Value,
}

/// Draft variant of a document id. Idempotent: an id that already carries
/// the draft prefix is returned unchanged.
fn draft_id(id: &str) -> String {
    if id.starts_with(DRAFT_PREFIX) {
        id.to_string()
    } else {
        format!("{DRAFT_PREFIX}{id}")
    }
}

/// Published variant of a document id (the draft prefix stripped).
fn published_id(id: &str) -> &str {
    id.strip_prefix(DRAFT_PREFIX).unwrap_or(id)
}

/// Coerce a stored fix value into its mutation form. Fix values are text,
/// but boolean-looking text (the robots `index` flag) must land as a JSON
/// boolean or Sanity schemas reject the patch.
fn set_value(raw: &str) -> serde_json::Value {
    match raw {
        "true" => serde_json::Value::Bool(true),
        "false" => serde_json::Value::Bool(false),
        _ => serde_json::Value::String(raw.to_string()),
    }
}

/// Build the `set` map for a patch: dotted field paths as keys.
fn set_entries(fields: &[FieldWrite]) -> serde_json::Map<String, serde_json::Value> {
    fields
        .iter()
        .map(|f| (f.path.dotted(), set_value(&f.value)))
        .collect()
}

/// A `patch`/`set` mutation targeting `target_id`.
fn patch_mutation(target_id: &str, fields: &[FieldWrite]) -> serde_json::Value {
    serde_json::json!({
        "patch": { "id": target_id, "set": set_entries(fields) }
    })
}

/// Adapter for Sanity-hosted sites. Draft-capable.
pub struct SanityAdapter {
    http: reqwest::Client,
    /// `https://{project_id}.api.sanity.io/v{api_version}`
    base_url: String,
    dataset: String,
    token: String,
}

impl SanityAdapter {
    /// Build an adapter from the `[sanity]` config section.
    ///
    /// # Errors
    ///
    /// Returns [`CmsError::Config`] if required fields are missing, or
    /// [`CmsError::Http`] if the HTTP client cannot be built.
    pub fn new(config: &SanityConfig, timeout: Duration) -> Result<Self, CmsError> {
        if !config.is_configured() {
            return Err(CmsError::Config(
                "sanity requires project_id, dataset and token".into(),
            ));
        }
        let http = reqwest::Client::builder()
            .user_agent(crate::USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: format!(
                "https://{}.api.sanity.io/v{}",
                config.project_id, config.api_version
            ),
            dataset: config.dataset.clone(),
            token: config.token.clone(),
        })
    }

    /// Run a GROQ query and return its raw `result`.
    async fn query(&self, groq: &str) -> Result<serde_json::Value, CmsError> {
        let url = format!(
            "{}/data/query/{}?query={}",
            self.base_url,
            self.dataset,
            urlencoding::encode(groq)
        );
        let resp = check_response(self.http.get(&url).bearer_auth(&self.token).send().await?)
            .await?;
        let data: SanityQueryResponse = resp.json().await?;
        Ok(data.result)
    }

    /// Fetch one document by exact id. `Ok(None)` when it does not exist.
    async fn fetch_document(
        &self,
        document_id: &str,
    ) -> Result<Option<serde_json::Value>, CmsError> {
        let groq = format!(r#"*[_id == "{document_id}"][0]"#);
        let result = self.query(&groq).await?;
        if result.is_null() {
            return Ok(None);
        }
        Ok(Some(result))
    }

    /// POST a mutation list to the mutate endpoint.
    async fn mutate(&self, mutations: serde_json::Value) -> Result<(), CmsError> {
        let url = format!("{}/data/mutate/{}", self.base_url, self.dataset);
        check_response(
            self.http
                .post(&url)
                .bearer_auth(&self.token)
                .json(&serde_json::json!({ "mutations": mutations }))
                .send()
                .await?,
        )
        .await?;
        Ok(())
    }
}

#[async_trait]
impl CmsAdapter for SanityAdapter {
    fn platform(&self) -> Platform {
        Platform::Sanity
    }

    fn supports_draft(&self) -> bool {
        true
    }

    async fn documents_by_type(&self, doc_type: &str) -> Result<Vec<CmsDocument>, CmsError> {
        // Published variants only; drafts are addressed explicitly on write.
        let groq = format!(r#"*[_type == "{doc_type}" && !(_id in path("drafts.**"))]"#);
        let result = self.query(&groq).await?;
        let serde_json::Value::Array(items) = result else {
            return Err(CmsError::Parse(format!(
                "query for type '{doc_type}' did not return an array"
            )));
        };

        let mut docs = Vec::with_capacity(items.len());
        for item in items {
            let Some(id) = item.get("_id").and_then(|v| v.as_str()).map(str::to_owned) else {
                tracing::warn!(doc_type, "skipping document without a string _id");
                continue;
            };
            docs.push(CmsDocument {
                id,
                doc_type: doc_type.to_string(),
                content: item,
            });
        }
        Ok(docs)
    }

    async fn patch_draft(
        &self,
        document_id: &str,
        fields: &[FieldWrite],
    ) -> Result<(), CmsError> {
        let published = published_id(document_id).to_string();
        let draft = draft_id(&published);

        // 1. Seed the draft from the published document. createIfNotExists
        //    is a no-op when a draft already exists, so prior draft edits
        //    survive and only the patch below lands.
        let Some(mut content) = self.fetch_document(&published).await? else {
            return Err(CmsError::NotFound(format!("document {published}")));
        };
        let Some(obj) = content.as_object_mut() else {
            return Err(CmsError::Parse(format!(
                "document {published} is not an object"
            )));
        };
        obj.insert("_id".into(), serde_json::Value::String(draft.clone()));

        // 2. Create-then-patch in one transaction.
        self.mutate(serde_json::json!([
            { "createIfNotExists": content },
            patch_mutation(&draft, fields),
        ]))
        .await
    }

    async fn patch_published(
        &self,
        document_id: &str,
        fields: &[FieldWrite],
    ) -> Result<(), CmsError> {
        let target = published_id(document_id).to_string();
        self.mutate(serde_json::json!([patch_mutation(&target, fields)]))
            .await
    }

    async fn locate_by_path(&self, _url_path: &str) -> Result<Option<EntityRef>, CmsError> {
        Err(CmsError::Unsupported(
            "sanity documents are located by type, not URL path".into(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mend_core::field_path::FieldPath;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn write(dotted: &str, value: &str) -> FieldWrite {
        FieldWrite {
            path: FieldPath::from_dotted(dotted).unwrap(),
            value: value.to_string(),
        }
    }

    #[test]
    fn draft_id_is_idempotent() {
        assert_eq!(draft_id("home"), "drafts.home");
        assert_eq!(draft_id("drafts.home"), "drafts.home");
    }

    #[test]
    fn published_id_strips_prefix() {
        assert_eq!(published_id("drafts.home"), "home");
        assert_eq!(published_id("home"), "home");
    }

    #[test]
    fn boolean_text_becomes_json_bool() {
        assert_eq!(set_value("true"), json!(true));
        assert_eq!(set_value("false"), json!(false));
        assert_eq!(set_value("True"), json!("True"));
        assert_eq!(set_value("Acme | Official Website"), json!("Acme | Official Website"));
    }

    #[test]
    fn set_entries_use_dotted_keys() {
        let fields = [
            write("seo.metaTitle", "Acme | Official Website"),
            write("seo.robots.index", "true"),
        ];
        let patch = patch_mutation("drafts.home", &fields);
        assert_eq!(
            patch,
            json!({
                "patch": {
                    "id": "drafts.home",
                    "set": {
                        "seo.metaTitle": "Acme | Official Website",
                        "seo.robots.index": true
                    }
                }
            })
        );
    }

    #[test]
    fn parse_query_response() {
        const FIXTURE: &str = r#"{
            "ms": 3,
            "query": "*[_type == \"landingPage\"]",
            "result": [
                {
                    "_id": "home",
                    "_type": "landingPage",
                    "seo": { "metaTitle": "Acme" }
                },
                {
                    "_id": "pricing",
                    "_type": "landingPage"
                }
            ]
        }"#;
        let data: SanityQueryResponse = serde_json::from_str(FIXTURE).unwrap();
        let items = data.result.as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["_id"], "home");
        assert_eq!(items[0]["seo"]["metaTitle"], "Acme");
    }

    #[test]
    fn parse_empty_and_null_results() {
        let data: SanityQueryResponse =
            serde_json::from_str(r#"{"ms": 1, "result": []}"#).unwrap();
        assert_eq!(data.result, json!([]));

        // A [0] query on no matches yields null.
        let data: SanityQueryResponse =
            serde_json::from_str(r#"{"ms": 1, "result": null}"#).unwrap();
        assert!(data.result.is_null());

        // Some error payloads omit result entirely.
        let data: SanityQueryResponse = serde_json::from_str(r#"{"ms": 1}"#).unwrap();
        assert!(data.result.is_null());
    }

    #[tokio::test]
    #[ignore] // requires network and configured Sanity credentials
    async fn live_documents_by_type() {
        let config = mend_config::MendConfig::load_with_dotenv().unwrap();
        if !config.sanity.is_configured() {
            println!("sanity not configured; skipping");
            return;
        }
        let adapter =
            SanityAdapter::new(&config.sanity, Duration::from_secs(15)).unwrap();
        let docs = adapter.documents_by_type("landingPage").await.unwrap();
        println!("landingPage documents: {}", docs.len());
        for doc in &docs {
            println!("  {} ({})", doc.id, doc.doc_type);
        }
    }
}
