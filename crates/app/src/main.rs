mod logging;
mod settings;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use stockpick_analysis::cancel;
use stockpick_analysis::pipeline::AnalysisPipeline;
use stockpick_analysis::score::InvestmentScorer;
use stockpick_analysis::service::AnalysisService;
use stockpick_analysis::stock_service::StockService;
use stockpick_api::server::{AppState, start_server};
use stockpick_bus::handler::LoggingEventHandler;
use stockpick_bus::memory::InMemoryEventBus;
use stockpick_core::common::time::RealTimeProvider;
use stockpick_core::stock::event::STOCK_ANALYZED_TOPIC;
use stockpick_feed::client::AnalystFeedClient;
use stockpick_store::stock::SqliteStockRepository;
use tracing::{debug, info, warn};

/// # Summary
/// 应用启动入口，纯粹的 DI 容器。
/// 负责实例化所有具体实现组件并通过 Arc<dyn Trait> 注入到应用服务。
///
/// # Logic
/// 1. 加载 `.env` 与分层配置，初始化全局日志。
/// 2. 实例化基础设施层 (Store、Feed、事件总线)。
/// 3. 构造应用服务层 (StockService、AnalysisService)。
/// 4. 启动 HTTP 服务，收到退出信号后取消进行中的任务并优雅退出。
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // 1. 配置与日志
    let dotenv_loaded = dotenvy::dotenv().is_ok();
    let config = settings::load(settings::DEFAULT_CONFIG_FILE, None)?;
    let _log_guard = logging::init(config.logging.directory.as_deref());
    debug!(dotenv_loaded, "Configuration loaded");
    info!("Stockpick starting...");

    // 2. 实例化基础设施层
    stockpick_store::config::set_root_dir(PathBuf::from(&config.database.data_dir));
    let repository = Arc::new(SqliteStockRepository::new().await?);
    let feed = Arc::new(AnalystFeedClient::new(
        config.feed.base_url.clone(),
        config.feed.auth_token.clone(),
        Duration::from_secs(config.feed.timeout_secs),
    )?);
    let clock = Arc::new(RealTimeProvider);

    let bus = Arc::new(InMemoryEventBus::new());
    bus.subscribe(STOCK_ANALYZED_TOPIC, Arc::new(LoggingEventHandler));

    // 3. 构造应用服务层
    let freshness_window = chrono::Duration::try_hours(config.analysis.freshness_window_hours)
        .filter(|window| *window > chrono::Duration::zero())
        .ok_or("analysis.freshness_window_hours must be a positive number of hours")?;
    let pipeline = AnalysisPipeline::new(InvestmentScorer::standard(), freshness_window);
    let mut analysis_service = AnalysisService::new(repository.clone(), clock.clone(), pipeline);
    if config.analysis.publish_events {
        analysis_service = analysis_service.with_publisher(bus);
    }
    let stock_service = StockService::new(repository, feed, InvestmentScorer::standard(), clock);

    // 4. 退出信号：取消进行中的同步与分析，并让 HTTP 服务优雅退出
    let (shutdown_tx, shutdown_rx) = cancel::channel();
    tokio::spawn(async move {
        wait_for_signal().await;
        info!("Shutdown signal received. Exiting...");
        if shutdown_tx.send(true).is_err() {
            warn!("No shutdown listeners left");
        }
    });

    let state = AppState {
        stock_service: Arc::new(stock_service),
        analysis_service: Arc::new(analysis_service),
        shutdown: shutdown_rx.clone(),
    };
    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    start_server(
        state,
        &bind_addr,
        &config.server.allowed_origin,
        cancel::cancelled(shutdown_rx),
    )
    .await?;

    info!("Server stopped correctly");
    Ok(())
}

/// 等待 Ctrl-C，Unix 下同时监听 SIGTERM。
async fn wait_for_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
