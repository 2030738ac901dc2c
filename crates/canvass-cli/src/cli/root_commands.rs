use clap::Subcommand;

use crate::cli::subcommands::{BankCommands, QuestionCommands, ResponseCommands, SurveyCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Survey lifecycle: create, edit, change state, copy, delete.
    Survey {
        #[command(subcommand)]
        action: SurveyCommands,
    },
    /// Questions attached to a survey.
    Question {
        #[command(subcommand)]
        action: QuestionCommands,
    },
    /// Reusable question bank and its catalogs.
    Bank {
        #[command(subcommand)]
        action: BankCommands,
    },
    /// Respondent sessions.
    Response {
        #[command(subcommand)]
        action: ResponseCommands,
    },
}
