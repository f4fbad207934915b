// 已提交交易的持久化 Repository

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use thiserror::Error;

use crate::{
    domain::{Currency, Transaction},
    infrastructure::db::PgPool,
    service::context::Interrupted,
};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("corrupted transaction row: {0}")]
    Corrupted(String),
    #[error("store operation interrupted: {0}")]
    Interrupted(#[from] Interrupted),
}

// ============ Repository Trait ============

/// 只追加的交易存储
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// 写入一条交易记录，不去重
    async fn commit(&self, tx: &Transaction) -> Result<(), StoreError>;

    /// 读取全部交易记录（不保证顺序）
    async fn list(&self) -> Result<Vec<Transaction>, StoreError>;
}

// ============ PostgreSQL 实现 ============

pub struct PgTransactionStore {
    pool: PgPool,
}

impl PgTransactionStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct TransactionRow {
    id: String,
    currency: String,
    amount: f64,
    fee: i64,
    from_address: String,
    to_address: String,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl TryFrom<TransactionRow> for Transaction {
    type Error = StoreError;

    fn try_from(r: TransactionRow) -> Result<Self, Self::Error> {
        let currency = Currency::parse(&r.currency)
            .map_err(|e| StoreError::Corrupted(format!("transaction {}: {}", r.id, e)))?;

        Ok(Transaction {
            id: r.id,
            currency,
            amount: r.amount,
            fee: r.fee,
            from: r.from_address,
            to: r.to_address,
            created_at: r.created_at,
        })
    }
}

#[async_trait]
impl TransactionStore for PgTransactionStore {
    async fn commit(&self, tx: &Transaction) -> Result<(), StoreError> {
        sqlx::query(
            r#"INSERT INTO transactions (id, currency, amount, fee, fromAddress, toAddress, created_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7)"#,
        )
        .bind(&tx.id)
        .bind(tx.currency.code())
        .bind(tx.amount)
        .bind(tx.fee)
        .bind(&tx.from)
        .bind(&tx.to)
        .bind(tx.created_at)
        .execute(&self.pool)
        .await?;

        tracing::debug!(tx_id = %tx.id, currency = %tx.currency, "Transaction row inserted");
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Transaction>, StoreError> {
        let rows = sqlx::query_as::<_, TransactionRow>(
            r#"SELECT id, currency, amount, fee, fromAddress AS from_address,
                    toAddress AS to_address, created_at
             FROM transactions"#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Transaction::try_from).collect()
    }
}
