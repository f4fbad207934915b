//! 地址验证模块
//!
//! 只做语法校验：EVM 地址为 20 字节 hex，可带 `0x`/`0X` 前缀，不强制 EIP-55 大小写

use std::str::FromStr;

use ethers::types::Address;

/// 地址验证器
pub struct AddressValidator;

impl AddressValidator {
    /// 是否为合法的 hex 地址
    pub fn is_hex_address(address: &str) -> bool {
        let hex_part = Self::strip_hex_prefix(address);
        hex_part.len() == 40 && hex_part.chars().all(|c| c.is_ascii_hexdigit())
    }

    /// 解析 hex 地址，语法不合法时返回 None
    pub fn parse_hex_address(address: &str) -> Option<Address> {
        if !Self::is_hex_address(address) {
            return None;
        }
        Address::from_str(Self::strip_hex_prefix(address)).ok()
    }

    fn strip_hex_prefix(s: &str) -> &str {
        s.strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s)
    }
}
