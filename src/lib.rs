//! paygate - 多币种转账提交服务
//!
//! 按币种分发到链交易引擎，扣除佣金后签名广播，并持久化已提交的交易

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod repository;
pub mod service;
pub mod utils;

// 重新导出常用类型
pub use app_state::AppState;
pub use error::{AppError, AppErrorCode};

pub mod prelude {
    pub use crate::{
        app_state::AppState,
        domain::{Currency, Transaction, TransferRequest},
        error::{AppError, AppErrorCode},
        service::{CommitContext, CommitService, ServiceError},
    };
}
