//! # mend-engine
//!
//! The fix remediation engine for sitemend.
//!
//! Turns audit findings into reviewable fix records and pushes approved
//! values into the CMS:
//! - static issue-type → field mapping ([`mapping`])
//! - deterministic value proposals ([`proposals`])
//! - the generation pass (`FixEngine::generate_fixes`)
//! - the approve/apply/publish/reject workflow, gated by the fix state
//!   machine and the store's compare-and-swap transitions
//! - sequential bulk apply for publish-only targets ([`bulk`])
//!
//! Every mutation goes through the store; the engine never touches SQL and
//! never caches fix state between calls.

pub mod bulk;
pub mod mapping;
pub mod proposals;

mod error;
mod generate;
mod workflow;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::EngineError;
pub use proposals::SiteEvidence;

use std::sync::Arc;

use mend_cms::CmsAdapter;
use mend_core::entities::{FixRecord, SiteAudit};
use mend_db::error::DatabaseError;
use mend_db::service::MendService;

/// Orchestrates generation and the review workflow against one store and
/// one CMS adapter.
pub struct FixEngine {
    store: Arc<MendService>,
    adapter: Arc<dyn CmsAdapter>,
}

impl FixEngine {
    #[must_use]
    pub fn new(store: Arc<MendService>, adapter: Arc<dyn CmsAdapter>) -> Self {
        Self { store, adapter }
    }

    /// The backing store, for read paths that never touch the CMS
    /// (audit import, listings).
    #[must_use]
    pub fn store(&self) -> &MendService {
        &self.store
    }

    async fn load_audit(&self, audit_id: &str) -> Result<SiteAudit, EngineError> {
        self.store.get_audit(audit_id).await.map_err(|e| match e {
            DatabaseError::NoResult => EngineError::NotFound {
                entity: "audit",
                id: audit_id.to_string(),
            },
            other => EngineError::Store(other),
        })
    }

    async fn load_fix(&self, fix_id: &str) -> Result<FixRecord, EngineError> {
        self.store.get_fix(fix_id).await.map_err(|e| match e {
            DatabaseError::NoResult => EngineError::NotFound {
                entity: "fix",
                id: fix_id.to_string(),
            },
            other => EngineError::Store(other),
        })
    }
}
