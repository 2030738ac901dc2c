use clap::Subcommand;

/// Survey lifecycle commands.
#[derive(Clone, Debug, Subcommand)]
pub enum SurveyCommands {
    /// Create a survey in the draft state.
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: Option<String>,
        /// Window start (RFC 3339 or YYYY-MM-DD).
        #[arg(long)]
        starts_at: String,
        /// Window end (RFC 3339 or YYYY-MM-DD).
        #[arg(long)]
        ends_at: String,
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        audience: i64,
        /// Target respondent profile, usually a JSON document.
        #[arg(long)]
        profile: Option<String>,
        /// Owning administrator. Defaults to `general.admin_id`.
        #[arg(long)]
        admin: Option<String>,
    },
    /// Edit survey metadata. Only the given fields change.
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long, conflicts_with = "description")]
        clear_description: bool,
        #[arg(long)]
        starts_at: Option<String>,
        #[arg(long)]
        ends_at: Option<String>,
        #[arg(long, allow_negative_numbers = true)]
        audience: Option<i64>,
        #[arg(long)]
        profile: Option<String>,
        #[arg(long, conflicts_with = "profile")]
        clear_profile: bool,
    },
    /// Move a survey to another state (draft, active, closed, or a custom label).
    State { id: String, state: String },
    /// Shorthand for `state <id> active`.
    Activate { id: String },
    /// Delete a survey and its question links.
    Delete { id: String },
    /// Copy a survey and its question links into a new draft.
    Copy {
        id: String,
        /// Owner of the copy. Defaults to `general.admin_id`.
        #[arg(long)]
        admin: Option<String>,
    },
    /// Get a survey with its questions.
    Get { id: String },
    /// List surveys ordered by name.
    List {
        #[arg(long)]
        state: Option<String>,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Active surveys a respondent has not answered yet.
    Available {
        respondent: String,
        #[arg(long)]
        limit: Option<u32>,
    },
}
