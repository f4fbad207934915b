//! Bitcoin 引擎：只有接口形态，尚未实现链上逻辑

use async_trait::async_trait;

use super::{ChainEngine, EngineError};
use crate::{
    config::EngineConfig,
    domain::{CommissionRate, Currency, Transaction, Transfer},
    service::CommitContext,
};

pub struct BitcoinEngine {
    _config: EngineConfig,
    _commission: CommissionRate,
}

impl BitcoinEngine {
    pub fn new(config: EngineConfig, commission: CommissionRate) -> Self {
        Self {
            _config: config,
            _commission: commission,
        }
    }
}

#[async_trait]
impl ChainEngine for BitcoinEngine {
    fn currency(&self) -> Currency {
        Currency::Bitcoin
    }

    async fn commit(
        &self,
        _ctx: &CommitContext,
        transfer: Transfer,
    ) -> Result<Transaction, EngineError> {
        tracing::debug!(to = %transfer.to, "Bitcoin commit requested but not implemented");
        Err(EngineError::NotImplemented(Currency::Bitcoin))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_commit_is_not_implemented() {
        let engine = BitcoinEngine::new(
            EngineConfig {
                endpoint: "http://127.0.0.1:8332".into(),
                private_key: String::new(),
                fee_limit: 0,
                fee_price_override: 0,
            },
            CommissionRate::new(1.5),
        );

        let transfer = Transfer {
            currency: Currency::Bitcoin,
            amount: 1.0,
            to: "bc1qexample".into(),
        };
        let err = engine
            .commit(&CommitContext::background(), transfer)
            .await
            .unwrap_err();
        assert_eq!(err, EngineError::NotImplemented(Currency::Bitcoin));
        assert_eq!(engine.currency(), Currency::Bitcoin);
    }
}
