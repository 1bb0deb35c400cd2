use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `smd` binary.
#[derive(Debug, Parser)]
#[command(name = "smd", version, about = "Sitemend - SEO fix remediation engine")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Max results to return
    #[arg(short, long, global = true)]
    pub limit: Option<u32>,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Database file path (defaults to the configured general.db_path)
    #[arg(short, long, global = true)]
    pub db: Option<String>,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            limit: self.limit,
            quiet: self.quiet,
            verbose: self.verbose,
            db: self.db.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::subcommands::{AuditCommands, FixCommands};
    use super::{Cli, Commands, GlobalFlags, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from([
            "smd", "--format", "table", "--limit", "10", "--verbose", "audit", "list",
        ])
        .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Table);
        assert_eq!(cli.limit, Some(10));
        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Commands::Audit {
                action: AuditCommands::List { .. }
            }
        ));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["smd", "audit", "list", "--format", "raw", "--quiet"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.quiet);
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        let parsed = Cli::try_parse_from(["smd", "--format", "xml", "audit", "list"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn bulk_apply_requires_file() {
        let parsed = Cli::try_parse_from(["smd", "fix", "bulk-apply"]);
        assert!(parsed.is_err());

        let cli = Cli::try_parse_from(["smd", "fix", "bulk-apply", "--file", "batch.json"])
            .expect("cli should parse");
        assert!(matches!(
            cli.command,
            Commands::Fix {
                action: FixCommands::BulkApply { .. }
            }
        ));
    }

    #[test]
    fn fix_list_status_conflicts_with_actionable() {
        let parsed = Cli::try_parse_from([
            "smd",
            "fix",
            "list",
            "--audit",
            "aud-1",
            "--status",
            "pending",
            "--actionable",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn apply_accepts_value_override() {
        let cli = Cli::try_parse_from(["smd", "fix", "apply", "fix-1", "--value", "New title"])
            .expect("cli should parse");
        let Commands::Fix {
            action: FixCommands::Apply { id, value },
        } = cli.command
        else {
            panic!("expected fix apply");
        };
        assert_eq!(id, "fix-1");
        assert_eq!(value.as_deref(), Some("New title"));
    }

    #[test]
    fn global_flags_extraction_copies_values() {
        let cli = Cli::try_parse_from(["smd", "--db", "/tmp/demo.db", "audit", "list"])
            .expect("cli should parse");
        let flags: GlobalFlags = cli.global_flags();
        assert_eq!(flags.db.as_deref(), Some("/tmp/demo.db"));
    }
}
