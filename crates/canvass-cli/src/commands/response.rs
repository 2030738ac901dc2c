use std::io::Read;

use anyhow::Context;
use canvass_engine::{ParticipationRecorder, ResponseGuard, SessionSubmission};
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ResponseCommands;
use crate::commands::shared::limit::{effective_limit, truncate_to};
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct ResponseCheck {
    respondent_id: String,
    survey_id: String,
    responded: bool,
}

#[derive(Debug, Serialize)]
struct ResponseReset {
    respondent_id: String,
    survey_id: String,
    answers_removed: u64,
}

/// Handle `canvass response`.
pub async fn handle(
    action: ResponseCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        ResponseCommands::Submit { file } => {
            let submission = read_submission(&file)?;
            let receipt = ParticipationRecorder::new(&ctx.db)
                .record_session(submission)
                .await?;
            output(&receipt, flags.format)
        }
        ResponseCommands::Check { respondent, survey } => {
            let responded = ResponseGuard::new(&ctx.db)
                .has_responded(&respondent, &survey)
                .await?;
            output(
                &ResponseCheck {
                    respondent_id: respondent,
                    survey_id: survey,
                    responded,
                },
                flags.format,
            )
        }
        ResponseCommands::List {
            survey,
            respondent,
            limit,
        } => {
            let recorder = ParticipationRecorder::new(&ctx.db);
            let mut answers = match respondent {
                Some(respondent) => recorder.answers_for(&respondent, &survey).await?,
                None => recorder.answers_for_survey(&survey).await?,
            };
            truncate_to(
                &mut answers,
                effective_limit(limit, flags.limit, ctx.config.general.default_limit),
            );
            output(&answers, flags.format)
        }
        ResponseCommands::Reset { respondent, survey } => {
            let answers_removed = ParticipationRecorder::new(&ctx.db)
                .reset_session(&respondent, &survey)
                .await?;
            output(
                &ResponseReset {
                    respondent_id: respondent,
                    survey_id: survey,
                    answers_removed,
                },
                flags.format,
            )
        }
    }
}

/// Read a session from a JSON file, or from stdin when `file` is `-`.
fn read_submission(file: &str) -> anyhow::Result<SessionSubmission> {
    let raw = if file == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read session from stdin")?;
        buf
    } else {
        std::fs::read_to_string(file).with_context(|| format!("failed to read {file}"))?
    };
    parse_submission(&raw).with_context(|| format!("invalid session document in {file}"))
}

fn parse_submission(raw: &str) -> anyhow::Result<SessionSubmission> {
    Ok(serde_json::from_str(raw)?)
}
