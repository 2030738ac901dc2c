use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(
    command: Commands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match command {
        Commands::Survey { action } => commands::survey::handle(action, ctx, flags).await,
        Commands::Question { action } => commands::question::handle(action, ctx, flags).await,
        Commands::Bank { action } => commands::bank::handle(action, ctx, flags).await,
        Commands::Response { action } => commands::response::handle(action, ctx, flags).await,
    }
}

#[cfg(test)]
mod tests {
    use canvass_config::CanvassConfig;
    use clap::Parser;
    use pretty_assertions::assert_eq;

    use super::dispatch;
    use crate::cli::Cli;
    use crate::context::AppContext;

    async fn run(ctx: &AppContext, args: &[&str]) -> anyhow::Result<()> {
        let cli = Cli::try_parse_from(std::iter::once("canvass").chain(args.iter().copied()))?;
        let flags = cli.global_flags();
        dispatch(cli.command, ctx, &flags).await
    }

    async fn memory_ctx() -> AppContext {
        AppContext::init(CanvassConfig::default(), Some(":memory:"))
            .await
            .expect("context should open")
    }

    #[tokio::test]
    async fn survey_create_and_state_change_reach_the_store() {
        let ctx = memory_ctx().await;
        run(
            &ctx,
            &[
                "survey",
                "create",
                "--name",
                "Pulse",
                "--starts-at",
                "2025-01-01",
                "--ends-at",
                "2025-01-31",
                "--admin",
                "admin-1",
            ],
        )
        .await
        .expect("create should succeed");

        let surveys = ctx.db.list_surveys().await.expect("list");
        assert_eq!(surveys.len(), 1);
        assert_eq!(surveys[0].name, "Pulse");

        run(&ctx, &["survey", "state", &surveys[0].id, "Paused"])
            .await
            .expect("custom state should apply");
        let survey = ctx.db.get_survey(&surveys[0].id).await.expect("get");
        assert_eq!(survey.map(|s| s.state.to_string()).as_deref(), Some("Paused"));
    }

    #[tokio::test]
    async fn activation_without_questions_is_an_error() {
        let ctx = memory_ctx().await;
        run(
            &ctx,
            &[
                "survey",
                "create",
                "--name",
                "Empty",
                "--starts-at",
                "2025-01-01",
                "--ends-at",
                "2099-01-01",
                "--admin",
                "a",
            ],
        )
            .await
            .expect("create should succeed");
        let id = ctx.db.list_surveys().await.expect("list")[0].id.clone();

        let err = run(&ctx, &["survey", "activate", &id])
            .await
            .expect_err("activation should fail");
        assert!(err.to_string().contains("Validation error"));
    }

    #[tokio::test]
    async fn bank_add_resolves_catalog_names() {
        let ctx = memory_ctx().await;
        run(
            &ctx,
            &[
                "bank",
                "add",
                "--text",
                "How satisfied are you?",
                "--type",
                "rating",
                "--classification",
                "Satisfaction",
            ],
        )
        .await
        .expect("add should succeed");

        let err = run(&ctx, &["bank", "add", "--text", "x", "--type", "essay"])
            .await
            .expect_err("unknown type should fail");
        assert!(err.to_string().contains("unknown question type"));
    }

    #[tokio::test]
    async fn survey_create_falls_back_to_configured_admin() {
        let ctx = memory_ctx().await;
        let args = [
            "survey",
            "create",
            "--name",
            "Pulse",
            "--starts-at",
            "2025-01-01",
            "--ends-at",
            "2025-01-31",
        ];
        let err = run(&ctx, &args).await.expect_err("no admin anywhere");
        assert!(err.to_string().contains("--admin"));

        let mut config = CanvassConfig::default();
        config.general.admin_id = Some("ops".into());
        let ctx = AppContext::init(config, Some(":memory:"))
            .await
            .expect("context should open");
        run(&ctx, &args).await.expect("configured admin applies");
        assert_eq!(ctx.db.list_surveys().await.expect("list")[0].admin_id, "ops");
    }

    #[tokio::test]
    async fn missing_survey_surfaces_not_found() {
        let ctx = memory_ctx().await;
        let err = run(&ctx, &["survey", "get", "svy-missing"])
            .await
            .expect_err("should fail");
        assert!(err.to_string().contains("not found"));
    }

    #[tokio::test]
    async fn submitted_responses_can_be_listed_and_reset() {
        let ctx = memory_ctx().await;
        run(
            &ctx,
            &[
                "survey",
                "create",
                "--name",
                "Pulse",
                "--starts-at",
                "2025-01-01",
                "--ends-at",
                "2025-01-31",
                "--admin",
                "admin-1",
            ],
        )
        .await
        .expect("create should succeed");
        let survey_id = ctx.db.list_surveys().await.expect("list")[0].id.clone();
        run(
            &ctx,
            &[
                "question",
                "attach-inline",
                &survey_id,
                "--text",
                "Rate us",
                "--type",
                "rating",
                "--position",
                "1",
            ],
        )
        .await
        .expect("attach should succeed");
        let link_id = ctx
            .db
            .list_links_for_survey(&survey_id)
            .await
            .expect("links")[0]
            .id
            .clone();

        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("session.json");
        let session = serde_json::json!({
            "survey_id": survey_id,
            "started_at": "2025-01-10T09:00:00Z",
            "answers": [{ "link_id": link_id, "respondent_id": "user-7", "value": "5" }]
        });
        std::fs::write(&path, session.to_string()).expect("write session");
        let file = path.to_string_lossy().to_string();
        run(&ctx, &["response", "submit", "--file", &file])
            .await
            .expect("submit should succeed");

        run(&ctx, &["response", "list", &survey_id])
            .await
            .expect("list should succeed");
        run(&ctx, &["response", "list", &survey_id, "--respondent", "user-7"])
            .await
            .expect("respondent list should succeed");

        run(&ctx, &["response", "reset", "user-7", &survey_id])
            .await
            .expect("reset should succeed");
        assert!(
            !ctx.db
                .has_responded("user-7", &survey_id)
                .await
                .expect("check")
        );
        run(&ctx, &["response", "submit", "--file", &file])
            .await
            .expect("a reset respondent can answer again");

        let err = run(&ctx, &["response", "reset", "user-7", "svy-missing"])
            .await
            .expect_err("should fail");
        assert!(err.to_string().contains("not found"));
    }
}
