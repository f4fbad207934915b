// Repository 抽象层
pub mod in_memory;
pub mod transaction_repository;

use std::sync::Arc;

use anyhow::{Context, Result};

pub use in_memory::InMemoryTransactionStore;
pub use transaction_repository::{PgTransactionStore, StoreError, TransactionStore};

use crate::{
    config::{DatabaseConfig, StorageBackend},
    infrastructure::db::{self, PgPool},
};

/// 按配置选出的存储；Postgres 后端附带连接池，退出时需要关闭
pub struct ConnectedStore {
    pub store: Arc<dyn TransactionStore>,
    pub pool: Option<PgPool>,
}

impl ConnectedStore {
    pub async fn close(self) {
        if let Some(pool) = self.pool {
            pool.close().await;
        }
    }
}

/// 根据 `database.backend` 构造交易存储（Postgres 会连接并运行迁移）
pub async fn connect_store(config: &DatabaseConfig) -> Result<ConnectedStore> {
    match config.backend {
        StorageBackend::Postgres => {
            let pool = db::init_pool(config)
                .await
                .context("Failed to connect to database")?;
            db::run_migrations(&pool).await?;
            tracing::info!("Database ready");
            Ok(ConnectedStore {
                store: Arc::new(PgTransactionStore::new(pool.clone())),
                pool: Some(pool),
            })
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory transaction store, records are lost on restart");
            Ok(ConnectedStore {
                store: Arc::new(InMemoryTransactionStore::new()),
                pool: None,
            })
        }
    }
}
