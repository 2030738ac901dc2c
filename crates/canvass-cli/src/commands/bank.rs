use canvass_engine::{BankQuestionDraft, QuestionBank};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::BankCommands;
use crate::commands::shared::limit::{effective_limit, truncate_to};
use crate::commands::shared::parse::parse_bank_state;
use crate::context::AppContext;
use crate::output::output;

/// Handle `canvass bank`.
pub async fn handle(
    action: BankCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let bank = QuestionBank::new(&ctx.db);
    let default_limit = ctx.config.general.default_limit;

    match action {
        BankCommands::Add {
            text,
            type_name,
            classification,
            created_by,
        } => {
            let type_id = bank.resolve_type(&type_name).await?.id;
            let classification_id = match classification {
                Some(name) => Some(bank.resolve_classification(&name).await?.id),
                None => None,
            };

            let entry = bank
                .register(BankQuestionDraft {
                    text,
                    type_id,
                    classification_id,
                    created_by,
                })
                .await?;
            output(&entry, flags.format)
        }
        BankCommands::Edit { id, text } => {
            let entry = bank.edit_text(&id, &text).await?;
            output(&entry, flags.format)
        }
        BankCommands::Get { id } => {
            let entry = bank.get(&id).await?;
            output(&entry, flags.format)
        }
        BankCommands::List { limit } => {
            let mut entries = bank.list().await?;
            truncate_to(&mut entries, effective_limit(limit, flags.limit, default_limit));
            output(&entries, flags.format)
        }
        BankCommands::Search {
            query,
            type_name,
            limit,
        } => {
            let mut entries = bank.search(query.as_deref(), type_name.as_deref()).await?;
            truncate_to(&mut entries, effective_limit(limit, flags.limit, default_limit));
            output(&entries, flags.format)
        }
        BankCommands::State { id, state } => {
            let entry = bank.change_state(&id, parse_bank_state(&state)?).await?;
            output(&entry, flags.format)
        }
        BankCommands::Types => output(&bank.question_types().await?, flags.format),
        BankCommands::Classifications => output(&bank.classifications().await?, flags.format),
    }
}
