use anyhow::anyhow;
use canvass_core::enums::SurveyState;
use canvass_engine::{SurveyDraft, SurveyLifecycle, SurveyUpdateBuilder};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::SurveyCommands;
use crate::commands::shared::limit::{effective_limit, truncate_to};
use crate::commands::shared::parse::parse_datetime;
use crate::context::AppContext;
use crate::output::output;

/// Handle `canvass survey`.
pub async fn handle(
    action: SurveyCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let lifecycle = SurveyLifecycle::new(&ctx.db, &ctx.config.survey);
    let default_limit = ctx.config.general.default_limit;

    match action {
        SurveyCommands::Create {
            name,
            description,
            starts_at,
            ends_at,
            audience,
            profile,
            admin,
        } => {
            let draft = SurveyDraft {
                name,
                description,
                starts_at: Some(parse_datetime(&starts_at, "starts_at")?),
                ends_at: Some(parse_datetime(&ends_at, "ends_at")?),
                audience_size: audience,
                profile_definition: profile,
                admin_id: require_admin(ctx, admin.as_deref())?,
            };
            let survey = lifecycle.create_survey(draft).await?;
            output(&survey, flags.format)
        }
        SurveyCommands::Update {
            id,
            name,
            description,
            clear_description,
            starts_at,
            ends_at,
            audience,
            profile,
            clear_profile,
        } => {
            let mut builder = SurveyUpdateBuilder::new();
            if let Some(name) = name {
                builder = builder.name(name);
            }
            if clear_description {
                builder = builder.description(None);
            } else if let Some(description) = description {
                builder = builder.description(Some(description));
            }
            if let Some(raw) = starts_at {
                builder = builder.starts_at(parse_datetime(&raw, "starts_at")?);
            }
            if let Some(raw) = ends_at {
                builder = builder.ends_at(parse_datetime(&raw, "ends_at")?);
            }
            if let Some(audience) = audience {
                builder = builder.audience_size(audience);
            }
            if clear_profile {
                builder = builder.profile_definition(None);
            } else if let Some(profile) = profile {
                builder = builder.profile_definition(Some(profile));
            }

            let outcome = lifecycle.modify_metadata(&id, builder.build()).await?;
            output(&outcome, flags.format)
        }
        SurveyCommands::State { id, state } => {
            let survey = lifecycle.change_state(&id, SurveyState::parse(&state)).await?;
            output(&survey, flags.format)
        }
        SurveyCommands::Activate { id } => {
            let survey = lifecycle.activate(&id).await?;
            output(&survey, flags.format)
        }
        SurveyCommands::Delete { id } => {
            let deletion = lifecycle.delete_survey(&id).await?;
            output(&deletion, flags.format)
        }
        SurveyCommands::Copy { id, admin } => {
            let admin = require_admin(ctx, admin.as_deref())?;
            let outcome = lifecycle.copy_survey(&id, &admin).await?;
            output(&outcome, flags.format)
        }
        SurveyCommands::Get { id } => {
            let details = lifecycle.survey_details(&id).await?;
            output(&details, flags.format)
        }
        SurveyCommands::List { state, limit } => {
            let state = state.as_deref().map(SurveyState::parse);
            let mut surveys = lifecycle.list_surveys_sorted(state.as_ref()).await?;
            truncate_to(&mut surveys, effective_limit(limit, flags.limit, default_limit));
            output(&surveys, flags.format)
        }
        SurveyCommands::Available { respondent, limit } => {
            let mut surveys = lifecycle.available_for(&respondent).await?;
            truncate_to(&mut surveys, effective_limit(limit, flags.limit, default_limit));
            output(&surveys, flags.format)
        }
    }
}

fn require_admin(ctx: &AppContext, explicit: Option<&str>) -> anyhow::Result<String> {
    ctx.config
        .general
        .admin_or(explicit)
        .map(String::from)
        .ok_or_else(|| anyhow!("no administrator given: pass --admin or set general.admin_id"))
}
