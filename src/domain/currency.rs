//! 支持的转账币种
//!
//! 币种集合是封闭的：只有 `eth` 与 `btc`，且只能通过严格解析得到

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CurrencyError {
    #[error("payment currency not supported: {0:?}")]
    Unsupported(String),
}

/// 转账币种
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    #[serde(rename = "eth")]
    Ethereum,
    #[serde(rename = "btc")]
    Bitcoin,
}

impl Currency {
    pub const ALL: [Currency; 2] = [Currency::Ethereum, Currency::Bitcoin];

    /// 严格解析币种代码
    ///
    /// 区分大小写、不做 trim：`"ETH"`、`" eth"` 都会被拒绝
    pub fn parse(raw: &str) -> Result<Self, CurrencyError> {
        match raw {
            "eth" => Ok(Self::Ethereum),
            "btc" => Ok(Self::Bitcoin),
            other => Err(CurrencyError::Unsupported(other.to_string())),
        }
    }

    /// 币种代码（请求体与数据库中使用的形式）
    pub fn code(&self) -> &'static str {
        match self {
            Self::Ethereum => "eth",
            Self::Bitcoin => "btc",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Ethereum => "ethereum",
            Self::Bitcoin => "bitcoin",
        }
    }
}

impl FromStr for Currency {
    type Err = CurrencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_supported_codes() {
        assert_eq!(Currency::parse("eth"), Ok(Currency::Ethereum));
        assert_eq!(Currency::parse("btc"), Ok(Currency::Bitcoin));

        for currency in Currency::ALL {
            assert_eq!(Currency::parse(currency.code()), Ok(currency));
        }
    }

    #[test]
    fn test_parse_is_strict() {
        for raw in ["ETH", "Btc", " eth", "eth ", "", "xyz", "ethereum", "usdt"] {
            assert_eq!(
                Currency::parse(raw),
                Err(CurrencyError::Unsupported(raw.to_string())),
                "{raw:?} must be rejected"
            );
        }
    }

    #[test]
    fn test_serde_uses_codes() {
        assert_eq!(serde_json::to_string(&Currency::Ethereum).unwrap(), "\"eth\"");
        let parsed: Currency = serde_json::from_str("\"btc\"").unwrap();
        assert_eq!(parsed, Currency::Bitcoin);
        assert!(serde_json::from_str::<Currency>("\"BTC\"").is_err());
    }

    #[test]
    fn test_display_and_from_str() {
        assert_eq!(Currency::Bitcoin.to_string(), "btc");
        assert_eq!("eth".parse::<Currency>().unwrap(), Currency::Ethereum);
    }
}
