//! Service layer orchestrating database mutations with the activity log.
//!
//! `MendService` wraps `MendDb` (raw database access). All repo methods are
//! implemented as `impl MendService` blocks in [`crate::repos`]. Every
//! mutation method executes its SQL, then appends an activity entry.

use crate::MendDb;
use crate::error::DatabaseError;

/// Orchestrates database mutations with activity logging.
pub struct MendService {
    db: MendDb,
}

impl MendService {
    /// Create a new service wrapping a local database.
    ///
    /// # Arguments
    ///
    /// * `db_path`: path to the libSQL database file, or `":memory:"` for tests.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn new_local(db_path: &str) -> Result<Self, DatabaseError> {
        let db = MendDb::open_local(db_path).await?;
        Ok(Self { db })
    }

    /// Create from an existing `MendDb` (for testing).
    #[must_use]
    pub const fn from_db(db: MendDb) -> Self {
        Self { db }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &MendDb {
        &self.db
    }
}
