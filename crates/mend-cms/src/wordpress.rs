//! WordPress REST adapter.
//!
//! Publish-only: WordPress exposes no third-party draft layer, so every
//! write goes straight to the live entity. Titles are core REST fields;
//! meta descriptions belong to whichever SEO plugin the site runs, detected
//! once per adapter from the API index and cached.

use std::time::Duration;

use async_trait::async_trait;
use mend_config::WordPressConfig;
use mend_core::enums::{FixField, Platform, SeoPlugin};
use tokio::sync::OnceCell;

use crate::error::CmsError;
use crate::http::check_response;
use crate::{CmsAdapter, CmsDocument, EntityRef, FieldWrite, fix_field_for_leaf};

#[derive(serde::Deserialize)]
struct WpApiIndex {
    #[serde(default)]
    namespaces: Vec<String>,
}

#[derive(serde::Deserialize)]
struct WpEntity {
    id: i64,
}

/// Slug for a URL path: the last non-empty segment, lowercased, with any
/// query string or fragment stripped. The root path has no slug.
fn path_slug(url_path: &str) -> Option<String> {
    let path = url_path
        .split(['?', '#'])
        .next()
        .unwrap_or(url_path);
    path.rsplit('/')
        .find(|segment| !segment.is_empty())
        .map(str::to_lowercase)
}

/// Identify the SEO plugin from the API index namespace list.
fn plugin_from_namespaces(namespaces: &[String]) -> Option<SeoPlugin> {
    if namespaces.iter().any(|ns| ns.starts_with("yoast")) {
        return Some(SeoPlugin::Yoast);
    }
    if namespaces.iter().any(|ns| ns.starts_with("rankmath")) {
        return Some(SeoPlugin::RankMath);
    }
    None
}

/// Parse the stored document id form `{collection}:{id}`, e.g. `pages:41`.
fn parse_entity_ref(document_id: &str) -> Result<EntityRef, CmsError> {
    let (collection, id) = document_id.split_once(':').ok_or_else(|| {
        CmsError::Parse(format!(
            "wordpress document id '{document_id}' is not in collection:id form"
        ))
    })?;
    let id = id.parse::<i64>().map_err(|_| {
        CmsError::Parse(format!("wordpress document id '{document_id}' has a non-numeric id"))
    })?;
    Ok(EntityRef {
        id,
        collection: collection.to_string(),
    })
}

/// Adapter for WordPress sites. Publish-only.
pub struct WordPressAdapter {
    http: reqwest::Client,
    /// Site root without a trailing slash.
    base_url: String,
    username: String,
    app_password: String,
    /// Detected once per adapter; `None` inside means detection ran and
    /// found no SEO plugin.
    seo_plugin: OnceCell<Option<SeoPlugin>>,
}

impl WordPressAdapter {
    /// Build an adapter from the `[wordpress]` config section.
    ///
    /// # Errors
    ///
    /// Returns [`CmsError::Config`] if required fields are missing, or
    /// [`CmsError::Http`] if the HTTP client cannot be built.
    pub fn new(config: &WordPressConfig, timeout: Duration) -> Result<Self, CmsError> {
        if !config.is_configured() {
            return Err(CmsError::Config(
                "wordpress requires base_url, username and app_password".into(),
            ));
        }
        let http = reqwest::Client::builder()
            .user_agent(crate::USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self {
            http,
            base_url: config.trimmed_base_url().to_string(),
            username: config.username.clone(),
            app_password: config.app_password.clone(),
            seo_plugin: OnceCell::new(),
        })
    }

    fn rest_url(&self, route: &str) -> String {
        format!("{}/wp-json/wp/v2/{route}", self.base_url)
    }

    /// Detect the site's SEO plugin from the API index namespaces. Cached
    /// after the first successful detection; a transport failure is not
    /// cached, so the next call retries.
    pub async fn detect_seo_plugin(&self) -> Result<Option<SeoPlugin>, CmsError> {
        self.seo_plugin
            .get_or_try_init(|| async {
                let url = format!("{}/wp-json/", self.base_url);
                let resp = check_response(self.http.get(&url).send().await?).await?;
                let index: WpApiIndex = resp.json().await?;
                let plugin = plugin_from_namespaces(&index.namespaces);
                match plugin {
                    Some(p) => tracing::debug!(plugin = %p, "detected SEO plugin"),
                    None => tracing::debug!("no SEO plugin namespace found"),
                }
                Ok(plugin)
            })
            .await
            .copied()
    }

    /// Query one collection for an entity with the given slug.
    async fn find_by_slug(
        &self,
        collection: &str,
        slug: &str,
    ) -> Result<Option<EntityRef>, CmsError> {
        let url = format!(
            "{}?slug={}",
            self.rest_url(collection),
            urlencoding::encode(slug)
        );
        let resp = check_response(
            self.http
                .get(&url)
                .basic_auth(&self.username, Some(&self.app_password))
                .send()
                .await?,
        )
        .await?;
        let entities: Vec<WpEntity> = resp.json().await?;
        Ok(entities.first().map(|e| EntityRef {
            id: e.id,
            collection: collection.to_string(),
        }))
    }

    /// Write one field on one entity. `Title` is a core REST field; meta
    /// descriptions need a detected SEO plugin to know the meta key.
    ///
    /// # Errors
    ///
    /// Returns [`CmsError::Unsupported`] for a meta description write when
    /// no SEO plugin is installed.
    pub async fn apply_field(
        &self,
        target: &EntityRef,
        field: FixField,
        value: &str,
    ) -> Result<(), CmsError> {
        let body = match field {
            FixField::Title => serde_json::json!({ "title": value }),
            FixField::MetaDescription => {
                let Some(plugin) = self.detect_seo_plugin().await? else {
                    return Err(CmsError::Unsupported(
                        "no SEO plugin detected; cannot write a meta description".into(),
                    ));
                };
                serde_json::json!({ "meta": { plugin.meta_description_key(): value } })
            }
        };

        let url = format!("{}/{}", self.rest_url(&target.collection), target.id);
        check_response(
            self.http
                .post(&url)
                .basic_auth(&self.username, Some(&self.app_password))
                .json(&body)
                .send()
                .await?,
        )
        .await?;
        Ok(())
    }
}

#[async_trait]
impl CmsAdapter for WordPressAdapter {
    fn platform(&self) -> Platform {
        Platform::Wordpress
    }

    fn supports_draft(&self) -> bool {
        false
    }

    async fn documents_by_type(&self, doc_type: &str) -> Result<Vec<CmsDocument>, CmsError> {
        Err(CmsError::Unsupported(format!(
            "wordpress has no document snapshot for type '{doc_type}'; entities are located by path"
        )))
    }

    async fn patch_draft(
        &self,
        _document_id: &str,
        _fields: &[FieldWrite],
    ) -> Result<(), CmsError> {
        Err(CmsError::Unsupported(
            "wordpress has no draft layer; writes go to the live entity".into(),
        ))
    }

    async fn patch_published(
        &self,
        document_id: &str,
        fields: &[FieldWrite],
    ) -> Result<(), CmsError> {
        let target = parse_entity_ref(document_id)?;
        for field in fields {
            let Some(fix_field) = fix_field_for_leaf(field.path.leaf()) else {
                return Err(CmsError::Unsupported(format!(
                    "wordpress cannot write field path '{}'",
                    field.path
                )));
            };
            self.apply_field(&target, fix_field, &field.value).await?;
        }
        Ok(())
    }

    async fn locate_by_path(&self, url_path: &str) -> Result<Option<EntityRef>, CmsError> {
        let Some(slug) = path_slug(url_path) else {
            return Ok(None);
        };

        // Pages first: fix targets are almost always pages. Posts only as
        // a fallback.
        if let Some(entity) = self.find_by_slug("pages", &slug).await? {
            return Ok(Some(entity));
        }
        self.find_by_slug("posts", &slug).await
    }
}
