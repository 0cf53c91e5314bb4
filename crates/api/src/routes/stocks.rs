//! # 评级记录路由控制器
//!
//! 实现 `/api/stocks` 路径下的查询与同步接口。

use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;

use crate::error::ApiError;
use crate::server::AppState;
use crate::types::{MessageResponse, RankedStockResponse, StockListResponse, StockResponse};

#[derive(Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListStocksQuery {
    /// 为 `true` 时返回按投资评分排序的推荐列表
    pub recommended: Option<String>,
}

/// 列出评级记录
///
/// `recommended=true` 时返回全部记录按投资评分降序的排序结果 (带评分)，
/// 不做过期过滤与校验；否则返回全部记录。
#[utoipa::path(
    get,
    path = "/api/stocks",
    tag = "评级 (Stocks)",
    params(ListStocksQuery),
    responses(
        (status = 200, description = "记录列表获取成功", body = StockListResponse),
        (status = 500, description = "仓储读取失败")
    )
)]
pub async fn list_stocks(
    State(state): State<AppState>,
    Query(query): Query<ListStocksQuery>,
) -> Result<Json<StockListResponse>, ApiError> {
    if query.recommended.as_deref() == Some("true") {
        let ranked = state.stock_service.recommended_stocks().await?;
        return Ok(Json(StockListResponse::Ranked(
            ranked.iter().map(RankedStockResponse::from).collect(),
        )));
    }

    let stocks = state.stock_service.all_stocks().await?;
    Ok(Json(StockListResponse::Plain(
        stocks.iter().map(StockResponse::from).collect(),
    )))
}

/// 从外部评级接口同步数据
///
/// 拉取全部分页并按 ticker 写入仓储。
#[utoipa::path(
    post,
    path = "/api/stocks",
    tag = "评级 (Stocks)",
    responses(
        (status = 200, description = "同步成功", body = MessageResponse),
        (status = 500, description = "拉取或保存失败"),
        (status = 503, description = "服务关闭中，同步被取消")
    )
)]
pub async fn sync_stocks(State(state): State<AppState>) -> Result<Json<MessageResponse>, ApiError> {
    let count = state
        .stock_service
        .sync_from_feed(state.shutdown.clone())
        .await?;
    tracing::info!(count, "Stocks synchronized via API");

    Ok(Json(MessageResponse {
        message: "Stocks synchronized successfully".to_string(),
    }))
}

/// 按股票代码查询单条记录
#[utoipa::path(
    get,
    path = "/api/stocks/{symbol}",
    tag = "评级 (Stocks)",
    params(
        ("symbol" = String, Path, description = "股票代码")
    ),
    responses(
        (status = 200, description = "记录详情", body = StockResponse),
        (status = 404, description = "记录不存在")
    )
)]
pub async fn get_stock(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
) -> Result<Json<StockResponse>, ApiError> {
    if symbol.trim().is_empty() {
        return Err(ApiError::BadRequest("symbol is required".to_string()));
    }
    let stock = state.stock_service.stock_by_ticker(&symbol).await?;
    Ok(Json(StockResponse::from(&stock)))
}
