//! 链交易引擎
//!
//! 每个币种一个引擎实例：计算佣金、构造并签名交易、广播到链上，
//! 成功后返回最终的 [`Transaction`]。引擎不写库，持久化由 `CommitService` 负责。

pub mod bitcoin;
pub mod ethereum;
pub mod provider;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use thiserror::Error;

pub use bitcoin::BitcoinEngine;
pub use ethereum::EthereumEngine;
pub use provider::PaymentProvider;

use super::{context::Interrupted, eth_client::RpcError, CommitContext};
use crate::domain::{Currency, Transaction, Transfer};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// 调用方输入有误（目标地址、金额）
    #[error("invalid transfer: {0}")]
    Validation(String),
    #[error("network error: {0}")]
    Network(#[from] RpcError),
    /// 私钥解析或签名失败
    #[error("signing key error: {0}")]
    Key(String),
    /// 引擎配置不可用（运维问题，不是调用方输入）
    #[error("engine misconfigured: {0}")]
    Config(String),
    #[error("{0} transactions are not implemented")]
    NotImplemented(Currency),
    #[error("commit interrupted: {0}")]
    Interrupted(#[from] Interrupted),
}

impl EngineError {
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait ChainEngine: Send + Sync {
    fn currency(&self) -> Currency;

    /// 提交一笔转账；失败时不会产生任何 Transaction
    async fn commit(&self, ctx: &CommitContext, transfer: Transfer)
        -> Result<Transaction, EngineError>;
}
