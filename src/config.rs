//! 配置管理模块
//! 支持从环境变量和配置文件加载配置

use std::{fmt, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// 应用配置结构体
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub payments: PaymentsConfig,
}

/// 交易记录存储后端
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Postgres,
    /// 进程内存储，重启即丢失，仅用于本地运行
    Memory,
}

impl std::str::FromStr for StorageBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" => Ok(Self::Postgres),
            "memory" => Ok(Self::Memory),
            other => anyhow::bail!("unknown storage backend: {}", other),
        }
    }
}

/// 数据库配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub backend: StorageBackend,
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
}

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind_addr: String,
    /// 单个请求（含链上广播与落库）的超时时间
    pub request_timeout_secs: u64,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String, // "json" or "text"
}

/// 支付配置：全局佣金比例 + 各链引擎配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentsConfig {
    pub commission_percent: f64,
    pub ethereum: EngineConfig,
    pub bitcoin: EngineConfig,
}

/// 单链引擎配置，引擎生命周期内只读
#[derive(Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// RPC 节点地址
    pub endpoint: String,
    /// hex 编码的私钥
    pub private_key: String,
    /// gas limit / 手续费上限
    pub fee_limit: u64,
    /// 固定手续费单价（wei），0 表示向节点查询建议价格
    #[serde(default)]
    pub fee_price_override: u64,
}

// 私钥不进日志
impl fmt::Debug for EngineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineConfig")
            .field("endpoint", &self.endpoint)
            .field("private_key", &"<redacted>")
            .field("fee_limit", &self.fee_limit)
            .field("fee_price_override", &self.fee_price_override)
            .finish()
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            backend: env_or("STORAGE_BACKEND", StorageBackend::Postgres),
            url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "postgres://postgres@localhost:5432/paygate".into()),
            max_connections: env_or("DB_MAX_CONNS", 16),
            min_connections: env_or("DB_MIN_CONNS", 2),
            acquire_timeout_secs: env_or("DB_ACQ_TIMEOUT_SECS", 5),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8081".into()),
            request_timeout_secs: env_or("REQUEST_TIMEOUT_SECS", 60),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            format: std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".into()),
        }
    }
}

impl Default for PaymentsConfig {
    fn default() -> Self {
        Self {
            commission_percent: env_or("COMMISSION_PERCENT", 0.0),
            ethereum: EngineConfig {
                endpoint: std::env::var("ETH_RPC_URL")
                    .unwrap_or_else(|_| "http://127.0.0.1:8545".into()),
                private_key: std::env::var("ETH_PRIVATE_KEY").unwrap_or_default(),
                fee_limit: env_or("ETH_GAS_LIMIT", 21_000),
                fee_price_override: env_or("ETH_GAS_PRICE_WEI", 0),
            },
            bitcoin: EngineConfig {
                endpoint: std::env::var("BTC_RPC_URL")
                    .unwrap_or_else(|_| "http://127.0.0.1:8332".into()),
                private_key: std::env::var("BTC_PRIVATE_KEY").unwrap_or_default(),
                fee_limit: env_or("BTC_FEE_LIMIT", 0),
                fee_price_override: env_or("BTC_FEE_PRICE", 0),
            },
        }
    }
}

impl Config {
    /// 从环境变量加载配置
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            database: DatabaseConfig::default(),
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
            payments: PaymentsConfig::default(),
        })
    }

    /// 从配置文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;

        let config: Config =
            toml::from_str(&content).with_context(|| "Failed to parse config file as TOML")?;

        Ok(config)
    }

    /// 从环境变量和配置文件合并加载（配置文件存在时优先）
    pub fn from_env_and_file<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        match path {
            Some(path) if path.as_ref().exists() => Self::from_file(path),
            _ => Self::from_env(),
        }
    }

    /// 序列化为 TOML（setup 命令写默认配置用）
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config as TOML")
    }

    /// 验证配置有效性
    pub fn validate(&self) -> Result<()> {
        if self.database.backend == StorageBackend::Postgres
            && !self.database.url.starts_with("postgres://")
            && !self.database.url.starts_with("postgresql://")
        {
            anyhow::bail!("DATABASE_URL must start with postgres:// or postgresql://");
        }

        let commission = self.payments.commission_percent;
        if !commission.is_finite() || !(0.0..=100.0).contains(&commission) {
            anyhow::bail!("commission_percent must be within [0, 100], got {}", commission);
        }

        for (name, engine) in [
            ("ethereum", &self.payments.ethereum),
            ("bitcoin", &self.payments.bitcoin),
        ] {
            if i64::try_from(engine.fee_price_override).is_err() {
                anyhow::bail!(
                    "payments.{}.fee_price_override must not exceed {}",
                    name,
                    i64::MAX
                );
            }
        }

        if self.server.request_timeout_secs == 0 {
            anyhow::bail!("request_timeout_secs must be greater than zero");
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.to_lowercase().as_str()) {
            anyhow::bail!("LOG_LEVEL must be one of: {:?}", valid_levels);
        }

        if self.logging.format != "json" && self.logging.format != "text" {
            anyhow::bail!("LOG_FORMAT must be 'json' or 'text'");
        }

        Ok(())
    }
}
