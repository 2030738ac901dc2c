//! Environment variables sit on top of every other layer.

use canvass_config::CanvassConfig;
use figment::Jail;

#[test]
fn env_var_overrides_default() {
    Jail::expect_with(|jail| {
        jail.set_env("CANVASS_GENERAL__DEFAULT_LIMIT", "42");

        let config = CanvassConfig::load().expect("config loads");
        assert_eq!(config.general.default_limit, 42);
        Ok(())
    });
}

#[test]
fn admin_id_comes_from_env() {
    Jail::expect_with(|jail| {
        jail.set_env("CANVASS_GENERAL__ADMIN_ID", "ops-team");

        let config = CanvassConfig::load().expect("config loads");
        assert_eq!(config.general.admin_or(None), Some("ops-team"));
        Ok(())
    });
}

#[test]
fn env_var_overrides_project_toml() {
    Jail::expect_with(|jail| {
        jail.create_dir(".canvass")?;
        jail.create_file(
            ".canvass/config.toml",
            "[database]\npath = \"from-toml.db\"\n",
        )?;
        jail.set_env("CANVASS_DATABASE__PATH", "from-env.db");

        let config = CanvassConfig::load().expect("config loads");
        assert_eq!(config.database.path, "from-env.db");
        Ok(())
    });
}

#[test]
fn typo_env_var_silently_ignored() {
    Jail::expect_with(|jail| {
        jail.set_env("CANVASS_SURVEY__COPY_PREFX", "Typo ");

        let config = CanvassConfig::load().expect("config loads");
        assert_eq!(config.survey.copy_prefix, "Copy of ");
        Ok(())
    });
}

#[test]
fn bad_env_value_is_a_figment_error() {
    Jail::expect_with(|jail| {
        jail.set_env("CANVASS_GENERAL__DEFAULT_LIMIT", "lots");

        let err = CanvassConfig::load().unwrap_err();
        assert!(err.to_string().starts_with("Configuration error"));
        Ok(())
    });
}
