//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for safe, sandboxed env var manipulation.

use canvass_config::CanvassConfig;
use figment::{
    Figment, Jail,
    providers::{Format, Serialized, Toml},
};
use pretty_assertions::assert_eq;

#[test]
fn loads_full_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[database]
path = "/var/lib/canvass/surveys.db"

[survey]
copy_prefix = "Copia de "

[general]
default_limit = 50
"#,
        )?;

        let config: CanvassConfig = Figment::from(Serialized::defaults(CanvassConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.database.path, "/var/lib/canvass/surveys.db");
        assert_eq!(config.survey.copy_prefix, "Copia de ");
        assert_eq!(config.general.default_limit, 50);
        Ok(())
    });
}

#[test]
fn partial_toml_keeps_other_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file("config.toml", "[survey]\ncopy_prefix = \"Clone: \"\n")?;

        let config: CanvassConfig = Figment::from(Serialized::defaults(CanvassConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.survey.copy_prefix, "Clone: ");
        assert_eq!(config.database.path, ".canvass/canvass.db");
        assert_eq!(config.general.default_limit, 20);
        Ok(())
    });
}

#[test]
fn project_local_file_is_picked_up() {
    Jail::expect_with(|jail| {
        jail.create_dir(".canvass")?;
        jail.create_file(".canvass/config.toml", "[database]\npath = \":memory:\"\n")?;

        let config = CanvassConfig::load().expect("config loads");
        assert!(config.database.is_in_memory());
        Ok(())
    });
}

#[test]
fn invalid_values_fail_validation() {
    Jail::expect_with(|jail| {
        jail.create_file("config.toml", "[general]\ndefault_limit = 0\n")?;

        let figment = Figment::from(Serialized::defaults(CanvassConfig::default()))
            .merge(Toml::file("config.toml"));
        let err = CanvassConfig::from_figment(&figment).unwrap_err();
        assert!(err.to_string().contains("default_limit"));
        Ok(())
    });
}
