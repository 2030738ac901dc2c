use clap::Subcommand;

/// Question bank commands.
#[derive(Clone, Debug, Subcommand)]
pub enum BankCommands {
    /// Register a question in the bank.
    Add {
        #[arg(long)]
        text: String,
        /// Question type name, e.g. `rating`.
        #[arg(long = "type")]
        type_name: String,
        #[arg(long)]
        classification: Option<String>,
        #[arg(long)]
        created_by: Option<String>,
    },
    /// Replace the text of a bank question.
    Edit {
        id: String,
        #[arg(long)]
        text: String,
    },
    /// Get a bank question by ID.
    Get { id: String },
    /// List bank questions.
    List {
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Search bank questions by text and/or type.
    Search {
        query: Option<String>,
        #[arg(long = "type")]
        type_name: Option<String>,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Change the availability of a bank question (active, inactive, draft).
    State { id: String, state: String },
    /// List question types.
    Types,
    /// List question classifications.
    Classifications,
}
