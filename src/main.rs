//! paygate 主入口

use std::{sync::Arc, time::Duration};

use anyhow::{Context, Result};
use paygate::{
    api,
    app_state::AppState,
    config::Config,
    domain::CommissionRate,
    infrastructure::logging,
    repository,
    service::{
        payments::{BitcoinEngine, EthereumEngine, PaymentProvider},
        CommitService,
    },
};

#[tokio::main]
async fn main() -> Result<()> {
    // 1. 加载环境变量与配置文件
    dotenvy::dotenv().ok();
    let config_path = std::env::var("CONFIG_PATH").ok();
    let config = Config::from_env_and_file(config_path.as_deref())?;
    config.validate()?;

    // 2. 初始化日志
    logging::init_logging(&config.logging)?;
    tracing::info!(config = ?config_path, "Starting paygate");

    // 3. 存储
    let storage = repository::connect_store(&config.database).await?;
    tracing::info!(backend = ?config.database.backend, "Transaction store ready");

    // 4. 链引擎 + 分发
    let commission = CommissionRate::new(config.payments.commission_percent);
    let ethereum = EthereumEngine::connect(config.payments.ethereum.clone(), commission)
        .context("Failed to set up ethereum engine")?;
    let bitcoin = BitcoinEngine::new(config.payments.bitcoin.clone(), commission);
    let provider = PaymentProvider::new(Arc::new(ethereum), Arc::new(bitcoin));
    tracing::info!(
        commission_percent = commission.percent(),
        ethereum_endpoint = %config.payments.ethereum.endpoint,
        "Payment engines configured"
    );

    // 5. 服务 + 路由
    let service = CommitService::new(provider, storage.store.clone());
    let state = Arc::new(AppState::new(
        Arc::new(service),
        Duration::from_secs(config.server.request_timeout_secs),
    ));
    let app = api::routes(state);

    // 6. 启动服务器
    let listener = tokio::net::TcpListener::bind(&config.server.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.server.bind_addr))?;
    tracing::info!("Server listening on http://{}", config.server.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    storage.close().await;
    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
