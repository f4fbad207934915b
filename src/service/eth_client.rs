//! Ethereum JSON-RPC 客户端
//!
//! 引擎只依赖 [`EthereumRpc`] 的四个调用；生产实现基于 ethers `Provider<Http>`

use std::sync::Arc;

use async_trait::async_trait;
use ethers::{
    providers::{Http, Middleware, Provider},
    types::{Address, BlockNumber, Bytes, H256, U256},
};
#[cfg(test)]
use mockall::automock;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RpcError {
    #[error("invalid rpc endpoint {endpoint}: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },
    #[error("rpc call {method} failed: {reason}")]
    Call {
        method: &'static str,
        reason: String,
    },
    #[error("unexpected rpc response for {method}: {value}")]
    InvalidResponse {
        method: &'static str,
        value: String,
    },
}

impl RpcError {
    fn call(method: &'static str, err: impl std::fmt::Display) -> Self {
        Self::Call {
            method,
            reason: err.to_string(),
        }
    }
}

/// 转账提交所需的链上能力
#[cfg_attr(test, automock)]
#[async_trait]
pub trait EthereumRpc: Send + Sync {
    /// 账户的 pending nonce（包含交易池中未打包的交易）
    async fn pending_nonce(&self, address: Address) -> Result<U256, RpcError>;

    /// 节点建议的 gas price（wei）
    async fn suggest_gas_price(&self) -> Result<U256, RpcError>;

    /// 网络 ID（`net_version`），用于 EIP-155 签名
    async fn network_id(&self) -> Result<u64, RpcError>;

    /// 广播已签名的原始交易，返回节点回报的交易哈希
    async fn send_raw_transaction(&self, raw: Bytes) -> Result<H256, RpcError>;
}

/// 基于 ethers HTTP Provider 的客户端，可在请求间共享
#[derive(Debug, Clone)]
pub struct EthereumClient {
    provider: Arc<Provider<Http>>,
}

impl EthereumClient {
    /// 创建 Provider（不会发起网络请求）
    pub fn connect(endpoint: &str) -> Result<Self, RpcError> {
        let provider =
            Provider::<Http>::try_from(endpoint).map_err(|e| RpcError::InvalidEndpoint {
                endpoint: endpoint.to_string(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            provider: Arc::new(provider),
        })
    }
}

#[async_trait]
impl EthereumRpc for EthereumClient {
    async fn pending_nonce(&self, address: Address) -> Result<U256, RpcError> {
        self.provider
            .get_transaction_count(address, Some(BlockNumber::Pending.into()))
            .await
            .map_err(|e| RpcError::call("eth_getTransactionCount", e))
    }

    async fn suggest_gas_price(&self) -> Result<U256, RpcError> {
        self.provider
            .get_gas_price()
            .await
            .map_err(|e| RpcError::call("eth_gasPrice", e))
    }

    async fn network_id(&self) -> Result<u64, RpcError> {
        let version = self
            .provider
            .get_net_version()
            .await
            .map_err(|e| RpcError::call("net_version", e))?;

        parse_net_version(&version)
    }

    async fn send_raw_transaction(&self, raw: Bytes) -> Result<H256, RpcError> {
        let pending = self
            .provider
            .send_raw_transaction(raw)
            .await
            .map_err(|e| RpcError::call("eth_sendRawTransaction", e))?;

        Ok(pending.tx_hash())
    }
}

/// `net_version` 返回十进制字符串，个别节点会返回 0x 前缀的十六进制
fn parse_net_version(version: &str) -> Result<u64, RpcError> {
    let version = version.trim();
    let parsed = match version
        .strip_prefix("0x")
        .or_else(|| version.strip_prefix("0X"))
    {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => version.parse(),
    };

    parsed.map_err(|_| RpcError::InvalidResponse {
        method: "net_version",
        value: version.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_net_version() {
        assert_eq!(parse_net_version("4").unwrap(), 4);
        assert_eq!(parse_net_version("1337").unwrap(), 1337);
        assert_eq!(parse_net_version("0x2a").unwrap(), 42);
        assert!(matches!(
            parse_net_version("rinkeby"),
            Err(RpcError::InvalidResponse { method: "net_version", .. })
        ));
    }

    #[test]
    fn test_connect_rejects_malformed_endpoint() {
        assert!(matches!(
            EthereumClient::connect("not a url"),
            Err(RpcError::InvalidEndpoint { .. })
        ));
        assert!(EthereumClient::connect("http://127.0.0.1:8545").is_ok());
    }
}
