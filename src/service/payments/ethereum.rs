//! Ethereum 转账引擎
//!
//! 流程：派生发送地址 → 校验目标地址与金额（不访问网络）→ pending nonce →
//! 佣金后金额换算为 wei → gas price（固定值或节点建议）→ 构造 legacy 交易 →
//! net_version → EIP-155 签名 → 广播原始交易。
//!
//! 所有网络调用都经过 [`CommitContext`]，被取消或超时时立即返回，不产生 Transaction。

use std::{str::FromStr, sync::Arc};

use async_trait::async_trait;
use chrono::Utc;
use ethers::{
    signers::{LocalWallet, Signer},
    types::{transaction::eip2718::TypedTransaction, TransactionRequest, U256},
    utils::to_checksum,
};

use super::{ChainEngine, EngineError};
use crate::{
    config::EngineConfig,
    domain::{CommissionRate, Currency, Transaction, Transfer},
    service::{
        eth_client::{EthereumClient, EthereumRpc, RpcError},
        CommitContext,
    },
    utils::{units::to_wei, AddressValidator},
};

pub struct EthereumEngine {
    config: EngineConfig,
    commission: CommissionRate,
    rpc: Arc<dyn EthereumRpc>,
}

impl EthereumEngine {
    pub fn new(config: EngineConfig, commission: CommissionRate, rpc: Arc<dyn EthereumRpc>) -> Self {
        Self {
            config,
            commission,
            rpc,
        }
    }

    /// 使用 `config.endpoint` 创建 ethers HTTP 客户端
    pub fn connect(config: EngineConfig, commission: CommissionRate) -> Result<Self, EngineError> {
        let client = EthereumClient::connect(&config.endpoint)?;
        Ok(Self::new(config, commission, Arc::new(client)))
    }

    /// 每次提交时解析私钥，错误信息中不包含私钥内容
    fn wallet(&self) -> Result<LocalWallet, EngineError> {
        let key = self.config.private_key.trim();
        let key = key
            .strip_prefix("0x")
            .or_else(|| key.strip_prefix("0X"))
            .unwrap_or(key);

        LocalWallet::from_str(key)
            .map_err(|e| EngineError::Key(format!("failed to parse private key: {}", e)))
    }

    async fn resolve_gas_price(&self, ctx: &CommitContext) -> Result<(U256, i64), EngineError> {
        if self.config.fee_price_override != 0 {
            let price = self.config.fee_price_override;
            let fee = i64::try_from(price).map_err(|_| {
                EngineError::Config(format!("fee price override {} exceeds i64", price))
            })?;
            return Ok((U256::from(price), fee));
        }

        let suggested = ctx.run(self.rpc.suggest_gas_price()).await??;
        let fee = fee_as_i64(suggested).ok_or_else(|| RpcError::InvalidResponse {
            method: "eth_gasPrice",
            value: suggested.to_string(),
        })?;
        Ok((suggested, fee))
    }
}

fn fee_as_i64(price: U256) -> Option<i64> {
    if price > U256::from(u64::MAX) {
        return None;
    }
    i64::try_from(price.as_u64()).ok()
}

#[async_trait]
impl ChainEngine for EthereumEngine {
    fn currency(&self) -> Currency {
        Currency::Ethereum
    }

    async fn commit(
        &self,
        ctx: &CommitContext,
        transfer: Transfer,
    ) -> Result<Transaction, EngineError> {
        let wallet = self.wallet()?;
        let from = wallet.address();

        let to = AddressValidator::parse_hex_address(&transfer.to).ok_or_else(|| {
            EngineError::Validation(format!("invalid destination address: {:?}", transfer.to))
        })?;
        let amount = self.commission.apply(transfer.amount);
        let value = to_wei(amount).map_err(|e| EngineError::Validation(e.to_string()))?;

        let nonce = ctx.run(self.rpc.pending_nonce(from)).await??;
        let (gas_price, fee) = self.resolve_gas_price(ctx).await?;

        let mut tx: TypedTransaction = TransactionRequest::new()
            .from(from)
            .to(to)
            .value(value)
            .gas(self.config.fee_limit)
            .gas_price(gas_price)
            .nonce(nonce)
            .into();

        let network_id = ctx.run(self.rpc.network_id()).await??;
        tx.set_chain_id(network_id);

        let signature = wallet
            .with_chain_id(network_id)
            .sign_transaction_sync(&tx)
            .map_err(|e| EngineError::Key(format!("failed to sign transaction: {}", e)))?;
        let raw = tx.rlp_signed(&signature);
        let tx_hash = tx.hash(&signature);

        let reported = ctx.run(self.rpc.send_raw_transaction(raw)).await??;
        if reported != tx_hash {
            tracing::warn!(
                local = %format!("{:#x}", tx_hash),
                reported = %format!("{:#x}", reported),
                "Node reported a different transaction hash"
            );
        }

        let committed = Transaction {
            id: format!("{:#x}", tx_hash),
            currency: Currency::Ethereum,
            amount,
            fee,
            from: to_checksum(&from, None),
            to: transfer.to,
            created_at: Utc::now(),
        };

        tracing::info!(
            tx_id = %committed.id,
            from = %committed.from,
            to = %committed.to,
            nonce = %nonce,
            network_id,
            gas_price = fee,
            "Ethereum transfer submitted"
        );

        Ok(committed)
    }
}
