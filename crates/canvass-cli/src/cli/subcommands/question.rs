use clap::Subcommand;

/// Survey question link commands.
#[derive(Clone, Debug, Subcommand)]
pub enum QuestionCommands {
    /// Attach a bank question to a survey.
    AttachBank {
        survey: String,
        question: String,
        #[arg(long)]
        position: u32,
        /// Mark the link as a discard (screening) question.
        #[arg(long)]
        discard: Option<String>,
    },
    /// Attach a one-off question that lives only in this survey.
    AttachInline {
        survey: String,
        #[arg(long)]
        text: String,
        /// Question type name, e.g. `rating`.
        #[arg(long = "type")]
        type_name: String,
        #[arg(long)]
        classification: Option<String>,
        #[arg(long)]
        position: u32,
        #[arg(long)]
        discard: Option<String>,
    },
    /// Mark a link as a discard question.
    Discard { link: String, criterion: String },
    /// Clear the discard flag of a link.
    Undiscard { link: String },
    /// Move a link to another position.
    Move { link: String, position: u32 },
    /// Detach a question from its survey.
    Remove { link: String },
    /// List the questions of a survey in position order.
    List { survey: String },
    /// Show the link at a position.
    At { survey: String, position: u32 },
}
