//! 币种 → 引擎 的分发

use std::sync::Arc;

use super::ChainEngine;
use crate::domain::{Currency, CurrencyError};

/// 构造时固定映射，之后只读
#[derive(Clone)]
pub struct PaymentProvider {
    ethereum: Arc<dyn ChainEngine>,
    bitcoin: Arc<dyn ChainEngine>,
}

impl PaymentProvider {
    pub fn new(ethereum: Arc<dyn ChainEngine>, bitcoin: Arc<dyn ChainEngine>) -> Self {
        Self { ethereum, bitcoin }
    }

    /// 新增币种时这里的 match 必须同步补全
    pub fn resolve(&self, currency: Currency) -> Result<Arc<dyn ChainEngine>, CurrencyError> {
        let engine = match currency {
            Currency::Ethereum => &self.ethereum,
            Currency::Bitcoin => &self.bitcoin,
        };
        Ok(Arc::clone(engine))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::payments::MockChainEngine;

    fn engine(currency: Currency) -> Arc<dyn ChainEngine> {
        let mut mock = MockChainEngine::new();
        mock.expect_currency().return_const(currency);
        Arc::new(mock)
    }

    #[test]
    fn test_resolve_every_currency() {
        let provider = PaymentProvider::new(engine(Currency::Ethereum), engine(Currency::Bitcoin));

        for currency in Currency::ALL {
            let resolved = provider.resolve(currency).unwrap();
            assert_eq!(resolved.currency(), currency);
        }
    }
}
