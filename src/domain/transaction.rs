//! 转账请求与已提交交易的领域模型

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::currency::Currency;

/// 调用方提交的转账请求（币种尚未校验）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferRequest {
    pub currency: String,
    /// 调用方请求的总额，扣佣前
    pub amount: f64,
    pub to: String,
}

/// 币种已校验的转账，交给链引擎执行
#[derive(Debug, Clone, PartialEq)]
pub struct Transfer {
    pub currency: Currency,
    pub amount: f64,
    pub to: String,
}

/// 已上链提交的交易记录
///
/// 只由链引擎在广播成功后构造；`id`、`from`、`fee`、`created_at` 都由引擎填写
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// 已签名交易的哈希
    pub id: String,
    pub currency: Currency,
    /// 扣佣后实际转出的金额
    pub amount: f64,
    /// 网络手续费单价（链的最小单位，ETH 为 wei）
    pub fee: i64,
    pub from: String,
    pub to: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transfer_request_from_json() {
        let req: TransferRequest = serde_json::from_str(
            r#"{"currency":"eth","amount":100,"to":"0x1234567890123456789012345678901234567890"}"#,
        )
        .unwrap();
        assert_eq!(req.currency, "eth");
        assert_eq!(req.amount, 100.0);
    }

    #[test]
    fn test_transaction_json_shape() {
        let tx = Transaction {
            id: "0xabc".into(),
            currency: Currency::Ethereum,
            amount: 1.5,
            fee: 30_000_000_000,
            from: "0xfrom".into(),
            to: "0xto".into(),
            created_at: Utc::now(),
        };
        let value = serde_json::to_value(&tx).unwrap();
        assert_eq!(value["currency"], "eth");
        assert_eq!(value["fee"], 30_000_000_000i64);
        assert!(value.get("createdAt").is_some());
    }
}
