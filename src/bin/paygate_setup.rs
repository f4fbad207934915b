//! 初始化：写出默认配置文件，创建数据库并运行迁移

use std::path::Path;

use anyhow::{Context, Result};
use paygate::{
    config::{Config, StorageBackend},
    infrastructure::{db, logging},
};

const DEFAULT_CONFIG_PATH: &str = "./config.toml";

fn write_config(config: &Config, path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(path, config.to_toml()?)
        .with_context(|| format!("Failed to write config file {}", path.display()))?;
    Ok(true)
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config_path =
        std::env::var("CONFIG_PATH").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let config = Config::from_env_and_file(Some(&config_path))?;
    config.validate()?;

    logging::init_logging(&config.logging)?;

    if write_config(&config, Path::new(&config_path))? {
        tracing::info!(path = %config_path, "Config file written");
    } else {
        tracing::info!(path = %config_path, "Config file already exists, leaving it untouched");
    }

    if config.database.backend == StorageBackend::Memory {
        tracing::info!("In-memory storage configured, skipping database setup");
        return Ok(());
    }

    db::ensure_database_exists(&config.database.url).await?;
    let pool = db::init_pool(&config.database)
        .await
        .context("Failed to connect to database")?;
    db::run_migrations(&pool).await?;
    pool.close().await;

    tracing::info!("Setup finished successfully");
    Ok(())
}
