//! 测试辅助模块
//! 提供脚本化的 RPC 假实现和服务组装函数
#![allow(dead_code)]

use std::{
    sync::{
        atomic::{AtomicU64, AtomicUsize, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};

use async_trait::async_trait;
use ethers::{
    types::{Address, Bytes, H256, U256},
    utils::keccak256,
};
use paygate::{
    config::EngineConfig,
    domain::{CommissionRate, Transaction},
    repository::{StoreError, TransactionStore},
    service::{
        eth_client::{EthereumRpc, RpcError},
        payments::{BitcoinEngine, EthereumEngine, PaymentProvider},
        CommitService,
    },
};

/// Hardhat 默认账户 #0
pub const TEST_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
pub const TEST_KEY_ADDRESS: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";
pub const DEST: &str = "0x70997970C51812dc3A010C7d01b50e0d17dc79C8";

pub const SUGGESTED_GAS_PRICE: u64 = 30_000_000_000;
pub const NETWORK_ID: u64 = 4;

/// 测试数据库URL
pub fn test_database_url() -> String {
    std::env::var("TEST_DATABASE_URL")
        .unwrap_or_else(|_| "postgres://postgres@localhost:5432/paygate_test".into())
}

/// 脚本化的 Ethereum 节点：每次广播成功后 nonce 自增
#[derive(Default)]
pub struct FakeEthereumRpc {
    nonce: AtomicU64,
    calls: AtomicUsize,
    network_id_calls: AtomicUsize,
    sent: Mutex<Vec<Bytes>>,
    /// pending_nonce 调用前的延迟，用于测试取消
    nonce_delay: Option<Duration>,
    fail_send: bool,
}

impl FakeEthereumRpc {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_nonce_delay(delay: Duration) -> Self {
        Self {
            nonce_delay: Some(delay),
            ..Self::default()
        }
    }

    pub fn failing_send() -> Self {
        Self {
            fail_send: true,
            ..Self::default()
        }
    }

    /// 所有 RPC 调用次数
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn network_id_calls(&self) -> usize {
        self.network_id_calls.load(Ordering::SeqCst)
    }

    pub fn sent(&self) -> Vec<Bytes> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl EthereumRpc for FakeEthereumRpc {
    async fn pending_nonce(&self, _address: Address) -> Result<U256, RpcError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.nonce_delay {
            tokio::time::sleep(delay).await;
        }
        Ok(U256::from(self.nonce.load(Ordering::SeqCst)))
    }

    async fn suggest_gas_price(&self) -> Result<U256, RpcError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(U256::from(SUGGESTED_GAS_PRICE))
    }

    async fn network_id(&self) -> Result<u64, RpcError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.network_id_calls.fetch_add(1, Ordering::SeqCst);
        Ok(NETWORK_ID)
    }

    async fn send_raw_transaction(&self, raw: Bytes) -> Result<H256, RpcError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_send {
            return Err(RpcError::Call {
                method: "eth_sendRawTransaction",
                reason: "nonce too low".into(),
            });
        }
        let hash = H256::from(keccak256(&raw));
        self.sent.lock().unwrap().push(raw);
        self.nonce.fetch_add(1, Ordering::SeqCst);
        Ok(hash)
    }
}

/// 总是失败的存储，模拟上链成功但落库失败
pub struct FailingStore;

#[async_trait]
impl TransactionStore for FailingStore {
    async fn commit(&self, _tx: &Transaction) -> Result<(), StoreError> {
        Err(StoreError::Corrupted("simulated write failure".into()))
    }

    async fn list(&self) -> Result<Vec<Transaction>, StoreError> {
        Err(StoreError::Corrupted("simulated read failure".into()))
    }
}

/// 写入前先等待一段时间的存储，模拟广播后截止时间到期
pub struct SlowStore {
    pub delay: Duration,
}

#[async_trait]
impl TransactionStore for SlowStore {
    async fn commit(&self, _tx: &Transaction) -> Result<(), StoreError> {
        tokio::time::sleep(self.delay).await;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Transaction>, StoreError> {
        Ok(Vec::new())
    }
}

pub fn engine_config(fee_price_override: u64) -> EngineConfig {
    EngineConfig {
        endpoint: "http://127.0.0.1:8545".into(),
        private_key: TEST_KEY.into(),
        fee_limit: 21_000,
        fee_price_override,
    }
}

/// 组装 CommitService：Ethereum 走假节点，Bitcoin 为未实现引擎
pub fn build_service(
    rpc: Arc<FakeEthereumRpc>,
    store: Arc<dyn TransactionStore>,
    commission_percent: f64,
) -> CommitService {
    build_service_with_fee_override(rpc, store, commission_percent, 0)
}

pub fn build_service_with_fee_override(
    rpc: Arc<FakeEthereumRpc>,
    store: Arc<dyn TransactionStore>,
    commission_percent: f64,
    fee_price_override: u64,
) -> CommitService {
    let commission = CommissionRate::new(commission_percent);
    let ethereum = EthereumEngine::new(engine_config(fee_price_override), commission, rpc);
    let bitcoin = BitcoinEngine::new(
        EngineConfig {
            endpoint: "http://127.0.0.1:8332".into(),
            private_key: String::new(),
            fee_limit: 0,
            fee_price_override: 0,
        },
        commission,
    );
    CommitService::new(
        PaymentProvider::new(Arc::new(ethereum), Arc::new(bitcoin)),
        store,
    )
}
