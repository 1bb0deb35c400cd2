use clap::Subcommand;

use crate::cli::subcommands::{AuditCommands, FixCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Imported site audits.
    Audit {
        #[command(subcommand)]
        action: AuditCommands,
    },
    /// Fix records and the review workflow.
    Fix {
        #[command(subcommand)]
        action: FixCommands,
    },
}
