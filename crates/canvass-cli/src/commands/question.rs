use anyhow::anyhow;
use canvass_engine::{InlineQuestionInput, LinkPlacement, QuestionAssociation};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::QuestionCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `canvass question`.
pub async fn handle(
    action: QuestionCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let association = QuestionAssociation::new(&ctx.db);

    match action {
        QuestionCommands::AttachBank {
            survey,
            question,
            position,
            discard,
        } => {
            let link = association
                .attach_bank_question(&survey, &question, placement(position, discard))
                .await?;
            output(&link, flags.format)
        }
        QuestionCommands::AttachInline {
            survey,
            text,
            type_name,
            classification,
            position,
            discard,
        } => {
            let input = InlineQuestionInput {
                text,
                type_name,
                classification_name: classification,
            };
            let link = association
                .attach_inline_question(&survey, input, placement(position, discard))
                .await?;
            output(&link, flags.format)
        }
        QuestionCommands::Discard { link, criterion } => {
            let link = association.mark_discard(&link, &criterion).await?;
            output(&link, flags.format)
        }
        QuestionCommands::Undiscard { link } => {
            let link = association.unmark_discard(&link).await?;
            output(&link, flags.format)
        }
        QuestionCommands::Move { link, position } => {
            let link = association.move_link(&link, position).await?;
            output(&link, flags.format)
        }
        QuestionCommands::Remove { link } => {
            association.remove_link(&link).await?;
            output(&serde_json::json!({ "removed": link }), flags.format)
        }
        QuestionCommands::List { survey } => {
            let details = association.link_details(&survey).await?;
            output(&details, flags.format)
        }
        QuestionCommands::At { survey, position } => {
            let link = association
                .link_at_position(&survey, position)
                .await?
                .ok_or_else(|| anyhow!("survey {survey} has no question at position {position}"))?;
            output(&link, flags.format)
        }
    }
}

fn placement(position: u32, discard: Option<String>) -> LinkPlacement {
    LinkPlacement {
        is_discard: discard.is_some(),
        discard_criterion: discard,
        ..LinkPlacement::at(position)
    }
}
