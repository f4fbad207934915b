//! Domain 模块
//!
//! 币种、佣金与交易记录等核心领域模型

pub mod commission;
pub mod currency;
pub mod transaction;

pub use commission::{apply_commission, CommissionRate};
pub use currency::{Currency, CurrencyError};
pub use transaction::{Transaction, Transfer, TransferRequest};
