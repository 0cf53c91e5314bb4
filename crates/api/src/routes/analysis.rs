//! # 分析路由控制器

use axum::Json;
use axum::extract::State;

use crate::error::ApiError;
use crate::server::AppState;
use crate::types::AnalysisResponse;

/// 运行完整分析流程并返回推荐列表
///
/// 只包含未过期且通过校验的记录，按评分降序。
/// 全部记录过期或仓储为空时返回 422。
#[utoipa::path(
    get,
    path = "/api/stocks/recommended",
    tag = "分析 (Analysis)",
    responses(
        (status = 200, description = "分析结果", body = Vec<AnalysisResponse>),
        (status = 422, description = "数据过期或不足以分析"),
        (status = 500, description = "仓储读取失败")
    )
)]
pub async fn recommended_analysis(
    State(state): State<AppState>,
) -> Result<Json<Vec<AnalysisResponse>>, ApiError> {
    let run = state
        .analysis_service
        .analyze_stocks(state.shutdown.clone())
        .await?;
    Ok(Json(run.analyses.iter().map(AnalysisResponse::from).collect()))
}
