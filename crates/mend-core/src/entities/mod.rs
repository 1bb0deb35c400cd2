//! Entity structs for all sitemend domain objects.
//!
//! Each entity maps to a table in the libSQL database. All structs derive
//! `Serialize`, `Deserialize`, and `JsonSchema` for JSON roundtrip and schema
//! validation.

mod activity;
mod audit;
mod finding;
mod fix;
mod page;

pub use activity::ActivityEntry;
pub use audit::SiteAudit;
pub use finding::Finding;
pub use fix::FixRecord;
pub use page::CrawledPage;
