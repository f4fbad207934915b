//! 内存交易存储，用于测试与本地运行

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::transaction_repository::{StoreError, TransactionStore};
use crate::domain::Transaction;

/// 按写入顺序保存交易，可在多个任务间共享
#[derive(Debug, Default, Clone)]
pub struct InMemoryTransactionStore {
    transactions: Arc<RwLock<Vec<Transaction>>>,
}

impl InMemoryTransactionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.transactions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.transactions.read().await.is_empty()
    }
}

#[async_trait]
impl TransactionStore for InMemoryTransactionStore {
    async fn commit(&self, tx: &Transaction) -> Result<(), StoreError> {
        let mut transactions = self.transactions.write().await;
        transactions.push(tx.clone());
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Transaction>, StoreError> {
        let transactions = self.transactions.read().await;
        Ok(transactions.clone())
    }
}
