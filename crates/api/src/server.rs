//! # API 服务启动器
//!
//! 组装 axum 路由、挂载 Swagger UI、配置 CORS 并绑定 TCP 端口对外提供服务。
//! 本模块不直接启动 `main()`, 而是由 `crates/app` 的 DI 容器持有并调用。

use std::future::Future;
use std::sync::Arc;

use axum::Router;
use axum::http::HeaderValue;
use axum::http::header::InvalidHeaderValue;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;
use utoipa_swagger_ui::SwaggerUi;

use stockpick_analysis::cancel::CancelSignal;
use stockpick_analysis::service::AnalysisService;
use stockpick_analysis::stock_service::StockService;

use crate::routes::{analysis, stocks};

// ============================================================
//  共享应用状态
// ============================================================

/// 全局应用状态，通过 axum 的 `State` 提取器注入到每个 Handler 中。
///
/// # Invariants
/// - 两个服务在启动前由 DI 容器注入，生命周期与进程等同。
/// - `shutdown` 在进程收到退出信号后变为 `true`，进行中的同步与分析随之取消。
#[derive(Clone)]
pub struct AppState {
    /// 同步、列表与单条查询
    pub stock_service: Arc<StockService>,
    /// 完整分析流程
    pub analysis_service: Arc<AnalysisService>,
    /// 进程级取消信号
    pub shutdown: CancelSignal,
}

// ============================================================
//  OpenAPI 文档定义
// ============================================================

/// 全局 OpenAPI 文档结构
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Stockpick 评级分析 API",
        version = "0.1.0",
        description = "聚合分析师评级变动，按投资评分给出推荐。",
        license(name = "MIT")
    ),
    tags(
        (name = "评级 (Stocks)", description = "评级记录的同步与查询"),
        (name = "分析 (Analysis)", description = "完整分析流程与推荐结果")
    )
)]
pub struct ApiDoc;

// ============================================================
//  服务构建与启动
// ============================================================

/// 根据配置构建 CORS 层，`"*"` 表示允许任意来源。
fn cors_layer(allowed_origin: &str) -> Result<CorsLayer, InvalidHeaderValue> {
    let origin = if allowed_origin.trim() == "*" {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::exact(HeaderValue::from_str(allowed_origin.trim())?)
    };

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(Any)
        .allow_headers(Any))
}

/// 构建完整的 axum 应用路由树 (业务路由、Swagger UI、CORS 与请求日志)。
///
/// # Arguments
/// * `state` - 由外部 DI 容器注入的共享状态
/// * `allowed_origin` - CORS 允许的来源
///
/// # Returns
/// 来源不是合法的 Header 值时返回错误。
pub fn build_router(state: AppState, allowed_origin: &str) -> Result<Router, InvalidHeaderValue> {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(stocks::list_stocks, stocks::sync_stocks))
        .routes(routes!(analysis::recommended_analysis))
        .routes(routes!(stocks::get_stock))
        .with_state(state)
        .split_for_parts();

    let app = router
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(allowed_origin)?);

    Ok(app)
}

/// 绑定端口并启动 HTTP 服务，`shutdown` 完成后优雅退出。
///
/// # Arguments
/// * `state` - 由外部 DI 容器注入的共享状态
/// * `bind_addr` - 监听的地址与端口，如 `"0.0.0.0:8080"`
/// * `allowed_origin` - CORS 允许的来源
/// * `shutdown` - 退出信号
pub async fn start_server(
    state: AppState,
    bind_addr: &str,
    allowed_origin: &str,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let app = build_router(state, allowed_origin)?;

    tracing::info!("Stockpick API Server listening on {}", bind_addr);
    tracing::info!("Swagger UI: http://{}/swagger-ui/", bind_addr);

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}
