//! 交易提交编排
//!
//! 唯一入口：校验币种 → 分发到引擎 → 上链 → 落库。
//! 调用方只看到两类错误：调用方输入错误（Validation）与其他一切（Internal）。

use std::sync::Arc;

use thiserror::Error;

use super::{
    payments::{EngineError, PaymentProvider},
    CommitContext,
};
use crate::{
    domain::{Currency, Transaction, Transfer, TransferRequest},
    repository::{StoreError, TransactionStore},
};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ServiceError {
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

pub struct CommitService {
    provider: PaymentProvider,
    store: Arc<dyn TransactionStore>,
}

impl CommitService {
    pub fn new(provider: PaymentProvider, store: Arc<dyn TransactionStore>) -> Self {
        Self { provider, store }
    }

    /// 提交一笔转账并落库
    ///
    /// 上链成功但落库失败时不回滚链上交易，错误日志中带有链上交易 ID。
    /// 落库同样受 `ctx` 约束：广播成功后若上下文被取消或截止时间已到，
    /// 交易已在链上但不会有对应的记录，按落库失败处理
    pub async fn commit_transaction(
        &self,
        ctx: &CommitContext,
        request: TransferRequest,
    ) -> Result<Transaction, ServiceError> {
        let currency = Currency::parse(&request.currency)
            .map_err(|e| ServiceError::Validation(e.to_string()))?;
        let engine = self
            .provider
            .resolve(currency)
            .map_err(|e| ServiceError::Validation(e.to_string()))?;

        let transfer = Transfer {
            currency,
            amount: request.amount,
            to: request.to,
        };

        let tx = engine
            .commit(ctx, transfer)
            .await
            .map_err(|e| match e {
                EngineError::Validation(msg) => ServiceError::Validation(msg),
                other => {
                    tracing::warn!(currency = %currency, error = %other, "Chain engine commit failed");
                    ServiceError::Internal(
                        anyhow::Error::new(other)
                            .context(format!("{} engine failed to commit transfer", currency.name())),
                    )
                }
            })?;

        let persisted = ctx
            .run(self.store.commit(&tx))
            .await
            .map_err(StoreError::from)
            .and_then(|r| r);

        if let Err(e) = persisted {
            tracing::error!(
                tx_id = %tx.id,
                currency = %tx.currency,
                error = %e,
                "Transaction submitted on-chain but could not be persisted"
            );
            return Err(ServiceError::Internal(
                anyhow::Error::new(e).context(format!("failed to persist transaction {}", tx.id)),
            ));
        }

        tracing::info!(tx_id = %tx.id, currency = %tx.currency, amount = tx.amount, "Transaction committed");
        Ok(tx)
    }

    /// 全部交易记录
    pub async fn list_transactions(
        &self,
        ctx: &CommitContext,
    ) -> Result<Vec<Transaction>, ServiceError> {
        ctx.run(self.store.list())
            .await
            .map_err(StoreError::from)
            .and_then(|r| r)
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to list transactions");
                ServiceError::Internal(anyhow::Error::new(e).context("failed to list transactions"))
            })
    }
}
