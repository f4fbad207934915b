//! 平台佣金计算

use serde::{Deserialize, Serialize};

/// 按百分比计算实际转出金额：`amount * rate / 100`
///
/// 使用原生 f64 运算，不做额外舍入
pub fn apply_commission(amount: f64, rate: f64) -> f64 {
    amount * rate / 100.0
}

/// 佣金比例（百分比，1.5 表示 1.5%），在 provider 生命周期内不变
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommissionRate(f64);

impl CommissionRate {
    pub fn new(percent: f64) -> Self {
        Self(percent)
    }

    pub fn percent(&self) -> f64 {
        self.0
    }

    pub fn apply(&self, amount: f64) -> f64 {
        apply_commission(amount, self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_commission() {
        assert_eq!(apply_commission(100.0, 1.5), 1.5);
        assert_eq!(apply_commission(0.0, 1.5), 0.0);
        assert_eq!(apply_commission(200.0, 0.0), 0.0);
        assert_eq!(apply_commission(50.0, 100.0), 50.0);
    }

    #[test]
    fn test_matches_formula() {
        for (amount, rate) in [(1.0, 2.5), (123.456, 0.3), (1e-6, 7.0), (42.0, 33.3)] {
            assert_eq!(apply_commission(amount, rate), amount * rate / 100.0);
        }
    }

    #[test]
    fn test_rate_wrapper() {
        let rate = CommissionRate::new(1.5);
        assert_eq!(rate.percent(), 1.5);
        assert_eq!(rate.apply(100.0), 1.5);
    }
}
