use anyhow::Context;
use canvass_config::CanvassConfig;
use canvass_db::CanvassDb;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub db: CanvassDb,
    pub config: CanvassConfig,
}

impl AppContext {
    /// Open the database named by `db_override` or by `database.path`,
    /// creating its parent directory when needed.
    pub async fn init(mut config: CanvassConfig, db_override: Option<&str>) -> anyhow::Result<Self> {
        if let Some(path) = db_override {
            config.database.path = path.to_string();
        }

        if let Some(parent) = config.database.parent_dir() {
            std::fs::create_dir_all(&parent).with_context(|| {
                format!("failed to create database directory {}", parent.display())
            })?;
        }

        let path = config.database.path.as_str();
        let db = CanvassDb::open_local(path)
            .await
            .with_context(|| format!("failed to open canvass database at {path}"))?;
        tracing::debug!(path, "application context ready");

        Ok(Self { db, config })
    }
}
