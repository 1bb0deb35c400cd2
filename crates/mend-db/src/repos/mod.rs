//! Repository modules implementing CRUD operations for all sitemend entities.
//!
//! Each module adds methods to `MendService` via `impl MendService` blocks.

pub mod activity;
pub mod audit;
pub mod finding;
pub mod fix;
pub mod page;
