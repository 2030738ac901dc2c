use clap::Subcommand;

/// Response session commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ResponseCommands {
    /// Record a completed session from a JSON file (`-` reads stdin).
    Submit {
        #[arg(long)]
        file: String,
    },
    /// Check whether a respondent has already answered a survey.
    Check { respondent: String, survey: String },
    /// List recorded answers to a survey.
    List {
        survey: String,
        /// Only this respondent's answers, in question order.
        #[arg(long)]
        respondent: Option<String>,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Discard a respondent's session so they can answer the survey again.
    Reset { respondent: String, survey: String },
}
