use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `canvass` binary.
#[derive(Debug, Parser)]
#[command(name = "canvass", version, about = "canvass - survey lifecycle manager")]
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

    /// Database path (overrides `database.path` from config)
    #[arg(long, global = true)]
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
    use pretty_assertions::assert_eq;

    use super::subcommands::{BankCommands, QuestionCommands, ResponseCommands, SurveyCommands};
    use super::{Cli, Commands, GlobalFlags, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from([
            "canvass",
            "--format",
            "table",
            "--limit",
            "10",
            "--verbose",
            "bank",
            "types",
        ])
        .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Table);
        assert_eq!(cli.limit, Some(10));
        assert!(cli.verbose);
        assert!(matches!(
            cli.command,
            Commands::Bank {
                action: BankCommands::Types
            }
        ));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["canvass", "survey", "list", "--format", "raw", "--quiet"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.quiet);
        assert!(matches!(
            cli.command,
            Commands::Survey {
                action: SurveyCommands::List { .. }
            }
        ));
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        let parsed = Cli::try_parse_from(["canvass", "--format", "xml", "bank", "types"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn global_flags_extraction_copies_db_override() {
        let cli = Cli::try_parse_from(["canvass", "--db", ":memory:", "bank", "list"])
            .expect("cli should parse");
        let flags: GlobalFlags = cli.global_flags();
        assert_eq!(flags.db.as_deref(), Some(":memory:"));
    }

    #[test]
    fn survey_create_accepts_window_and_profile() {
        let cli = Cli::try_parse_from([
            "canvass",
            "survey",
            "create",
            "--name",
            "Q1",
            "--starts-at",
            "2025-01-01",
            "--ends-at",
            "2025-01-31",
            "--audience",
            "100",
            "--profile",
            "{}",
            "--admin",
            "admin-1",
        ])
        .expect("cli should parse");

        let Commands::Survey {
            action:
                SurveyCommands::Create {
                    name,
                    audience,
                    profile,
                    ..
                },
        } = cli.command
        else {
            panic!("expected survey create");
        };
        assert_eq!(name, "Q1");
        assert_eq!(audience, 100);
        assert_eq!(profile.as_deref(), Some("{}"));
    }

    #[test]
    fn survey_update_rejects_value_and_clear_together() {
        let parsed = Cli::try_parse_from([
            "canvass",
            "survey",
            "update",
            "svy-1",
            "--description",
            "x",
            "--clear-description",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn question_attach_inline_uses_type_flag() {
        let cli = Cli::try_parse_from([
            "canvass",
            "question",
            "attach-inline",
            "svy-1",
            "--text",
            "Age?",
            "--type",
            "numeric",
            "--position",
            "3",
        ])
        .expect("cli should parse");

        let Commands::Question {
            action:
                QuestionCommands::AttachInline {
                    type_name,
                    position,
                    discard,
                    ..
                },
        } = cli.command
        else {
            panic!("expected question attach-inline");
        };
        assert_eq!(type_name, "numeric");
        assert_eq!(position, 3);
        assert_eq!(discard, None);
    }

    #[test]
    fn response_submit_requires_file() {
        assert!(Cli::try_parse_from(["canvass", "response", "submit"]).is_err());
        let cli = Cli::try_parse_from(["canvass", "response", "submit", "--file", "-"])
            .expect("cli should parse");
        assert!(matches!(
            cli.command,
            Commands::Response {
                action: ResponseCommands::Submit { .. }
            }
        ));
    }

    #[test]
    fn response_list_takes_optional_respondent() {
        let cli = Cli::try_parse_from([
            "canvass",
            "response",
            "list",
            "svy-1",
            "--respondent",
            "user-7",
        ])
        .expect("cli should parse");
        let Commands::Response {
            action:
                ResponseCommands::List {
                    survey, respondent, ..
                },
        } = cli.command
        else {
            panic!("expected response list");
        };
        assert_eq!(survey, "svy-1");
        assert_eq!(respondent.as_deref(), Some("user-7"));

        assert!(Cli::try_parse_from(["canvass", "response", "reset", "user-7"]).is_err());
    }
}
