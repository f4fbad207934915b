//! 金额换算：ETH（十进制）→ wei（18 位定点整数）
//!
//! 输入金额是 f64。先取其最短十进制表示转成 `Decimal`，再乘以 10^18 并四舍五入，
//! 因此 1.5、0.1 这类十进制可精确表达的金额不会引入二进制误差。
//! 超过约 28 位有效数字的金额会丢失精度，小于 1 wei 的部分被舍入。

use std::str::FromStr;

use ethers::types::U256;
use rust_decimal::{prelude::ToPrimitive, Decimal, RoundingStrategy};
use thiserror::Error;

pub const WEI_PER_ETHER: u64 = 1_000_000_000_000_000_000;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum UnitsError {
    #[error("amount must be a finite non-negative number, got {0}")]
    InvalidAmount(f64),
    #[error("amount {0} is out of range for wei conversion")]
    OutOfRange(f64),
}

/// `round(amount * 10^18)`
pub fn to_wei(amount: f64) -> Result<U256, UnitsError> {
    if !amount.is_finite() || amount < 0.0 {
        return Err(UnitsError::InvalidAmount(amount));
    }

    // f64 的 Display 是可往返的最短十进制表示；位数超出 Decimal 容量时退回二进制换算
    let decimal = Decimal::from_str(&amount.to_string())
        .or_else(|_| Decimal::try_from(amount))
        .map_err(|_| UnitsError::OutOfRange(amount))?;
    let wei = decimal
        .checked_mul(Decimal::from(WEI_PER_ETHER))
        .ok_or(UnitsError::OutOfRange(amount))?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u128()
        .ok_or(UnitsError::OutOfRange(amount))?;

    Ok(U256::from(wei))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_decimal_amounts() {
        assert_eq!(to_wei(1.5).unwrap(), U256::from(1_500_000_000_000_000_000u128));
        assert_eq!(to_wei(0.1).unwrap(), U256::from(100_000_000_000_000_000u128));
        assert_eq!(to_wei(1.0).unwrap(), U256::from(WEI_PER_ETHER));
        assert_eq!(to_wei(0.0).unwrap(), U256::zero());
        assert_eq!(to_wei(0.000000001).unwrap(), U256::from(1_000_000_000u64));
    }

    #[test]
    fn test_invalid_amounts() {
        assert_eq!(to_wei(-1.0), Err(UnitsError::InvalidAmount(-1.0)));
        assert!(matches!(to_wei(f64::NAN), Err(UnitsError::InvalidAmount(_))));
        assert!(matches!(to_wei(f64::INFINITY), Err(UnitsError::InvalidAmount(_))));
    }

    #[test]
    fn test_out_of_range() {
        assert_eq!(to_wei(1e11), Err(UnitsError::OutOfRange(1e11)));
        assert_eq!(to_wei(1e30), Err(UnitsError::OutOfRange(1e30)));
    }
}
