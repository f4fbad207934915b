pub mod commit_service;
pub mod context;
pub mod eth_client; // ethers JSON-RPC 客户端
pub mod payments; // 各链交易引擎 + 币种分发

pub use commit_service::{CommitService, ServiceError};
pub use context::{CancelHandle, CommitContext, Interrupted};
