//! SQLx Postgres 连接池初始化、建库与迁移
//!
//! 用法：
//! let pool = init_pool(&config.database).await?;
//! run_migrations(&pool).await?;

use std::time::Duration;

use anyhow::Result;

use crate::config::DatabaseConfig;

pub type PgPool = sqlx::Pool<sqlx::Postgres>;

/// 初始化连接池并做一次健康检查
pub async fn init_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections.min(config.max_connections))
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .test_before_acquire(true)
        .connect(&config.url)
        .await
        .map_err(|e| {
            tracing::error!("Failed to connect to Postgres: {}", e);
            e
        })?;

    health_check(&pool).await?;

    Ok(pool)
}

/// 运行内嵌的迁移脚本（transactions 表）
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    tracing::info!("Database migrations completed");
    Ok(())
}

/// 确保数据库存在（如果不存在则创建）
///
/// 从数据库URL中提取数据库名，连接到 postgres 默认库后创建目标库
pub async fn ensure_database_exists(database_url: &str) -> Result<()> {
    let Some(db_name) = database_name(database_url) else {
        tracing::debug!("Using default database, no need to create");
        return Ok(());
    };

    let default_url = replace_database_name(database_url, "postgres");

    let default_pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(1)
        .connect(&default_url)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to connect to default database: {}", e))?;

    let exists: bool =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
            .bind(&db_name)
            .fetch_one(&default_pool)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to check database existence: {}", e))?;

    if !exists {
        tracing::info!(database = %db_name, "Database does not exist, creating");
        let create_query = format!("CREATE DATABASE \"{}\"", db_name.replace('"', "\"\""));
        sqlx::query(&create_query)
            .execute(&default_pool)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to create database '{}': {}", db_name, e))?;
    } else {
        tracing::debug!(database = %db_name, "Database already exists");
    }

    default_pool.close().await;
    Ok(())
}

/// 健康检查
pub async fn health_check(pool: &PgPool) -> Result<(), sqlx::Error> {
    let _: (chrono::DateTime<chrono::Utc>,) = sqlx::query_as("SELECT CURRENT_TIMESTAMP")
        .fetch_one(pool)
        .await?;
    Ok(())
}

/// postgres://user@host:port/dbname?params → dbname（默认库返回 None）
fn database_name(database_url: &str) -> Option<String> {
    let path = database_url.splitn(4, '/').nth(3)?;
    let name = path.split('?').next().unwrap_or(path).trim();
    if name.is_empty() || name.contains('@') || name == "postgres" {
        return None;
    }
    Some(name.to_string())
}

fn replace_database_name(database_url: &str, new_name: &str) -> String {
    let mut parts = database_url.splitn(4, '/');
    let base = parts.by_ref().take(3).collect::<Vec<_>>().join("/");
    let query = parts
        .next()
        .and_then(|path| path.split_once('?').map(|(_, q)| q));
    match query {
        Some(q) => format!("{}/{}?{}", base, new_name, q),
        None => format!("{}/{}", base, new_name),
    }
}
