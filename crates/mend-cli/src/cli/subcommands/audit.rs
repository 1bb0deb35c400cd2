use clap::Subcommand;

/// Audit ingestion commands.
#[derive(Clone, Debug, Subcommand)]
pub enum AuditCommands {
    /// Import a crawl export file as a new audit.
    Import {
        /// Path to the crawl export JSON (site, pages, findings).
        #[arg(long)]
        file: String,
    },
    /// List imported audits, newest first.
    List {
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Get an audit with its pages and findings.
    Get { id: String },
}
