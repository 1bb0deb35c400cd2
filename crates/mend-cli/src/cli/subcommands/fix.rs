use clap::Subcommand;

/// Fix record commands.
#[derive(Clone, Debug, Subcommand)]
pub enum FixCommands {
    /// Generate fix records from an audit's findings.
    Generate {
        #[arg(long)]
        audit: String,
    },
    /// List fix records for an audit.
    List {
        #[arg(long)]
        audit: String,
        /// Filter by status (pending, approved, applied, published, rejected, failed).
        #[arg(long, conflicts_with = "actionable")]
        status: Option<String>,
        /// Only fixes that still accept an action.
        #[arg(long)]
        actionable: bool,
    },
    /// Get a fix record by ID.
    Get { id: String },
    /// Review history for a fix record.
    History { id: String },
    /// Approve a pending fix.
    Approve { id: String },
    /// Reject a fix. Terminal.
    Reject { id: String },
    /// Write the proposed value to the CMS draft layer.
    Apply {
        id: String,
        /// Replace the stored proposed value before writing.
        #[arg(long)]
        value: Option<String>,
    },
    /// Write the proposed value to the live CMS content.
    Publish {
        id: String,
        /// Replace the stored proposed value before writing.
        #[arg(long)]
        value: Option<String>,
    },
    /// Apply a batch of field writes from an instruction file.
    #[command(name = "bulk-apply")]
    BulkApply {
        /// Path to the instructions JSON: an array of
        /// {target_url, field, new_value} objects.
        #[arg(long)]
        file: String,
    },
}
