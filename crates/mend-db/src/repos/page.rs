//! Crawled page repository.

use chrono::Utc;

use mend_core::entities::CrawledPage;
use mend_core::ids::PREFIX_PAGE;

use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, parse_datetime};
use crate::service::MendService;

const SELECT_COLS: &str = "id, audit_id, url, path, title, meta_description, noindex, created_at";

fn row_to_page(row: &libsql::Row) -> Result<CrawledPage, DatabaseError> {
    Ok(CrawledPage {
        id: row.get(0)?,
        audit_id: row.get(1)?,
        url: row.get(2)?,
        path: row.get(3)?,
        title: get_opt_string(row, 4)?,
        meta_description: get_opt_string(row, 5)?,
        noindex: row.get::<i64>(6)? != 0,
        created_at: parse_datetime(&row.get::<String>(7)?)?,
    })
}

/// Input for [`MendService::record_page`]. Field names mirror the entity;
/// ids and timestamps are assigned by the store.
#[derive(Debug, Clone)]
pub struct NewPage {
    pub url: String,
    pub path: String,
    pub title: Option<String>,
    pub meta_description: Option<String>,
    pub noindex: bool,
}

impl MendService {
    pub async fn record_page(
        &self,
        audit_id: &str,
        page: &NewPage,
    ) -> Result<CrawledPage, DatabaseError> {
        let now = Utc::now();
        let id = self.db().generate_id(PREFIX_PAGE).await?;

        self.db()
            .conn()
            .execute(
                "INSERT INTO pages (id, audit_id, url, path, title, meta_description, noindex, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                libsql::params![
                    id.as_str(),
                    audit_id,
                    page.url.as_str(),
                    page.path.as_str(),
                    page.title.as_deref(),
                    page.meta_description.as_deref(),
                    i64::from(page.noindex),
                    now.to_rfc3339()
                ],
            )
            .await?;

        Ok(CrawledPage {
            id,
            audit_id: audit_id.to_string(),
            url: page.url.clone(),
            path: page.path.clone(),
            title: page.title.clone(),
            meta_description: page.meta_description.clone(),
            noindex: page.noindex,
            created_at: now,
        })
    }

    /// List pages for an audit in insertion order, so the homepage stays
    /// first when the import file listed it first.
    pub async fn list_pages(&self, audit_id: &str) -> Result<Vec<CrawledPage>, DatabaseError> {
        let mut rows = self
            .db()
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM pages WHERE audit_id = ?1 ORDER BY created_at, id"
                ),
                [audit_id],
            )
            .await?;

        let mut pages = Vec::new();
        while let Some(row) = rows.next().await? {
            pages.push(row_to_page(&row)?);
        }
        Ok(pages)
    }
}
