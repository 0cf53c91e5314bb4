//! # DTO (Data Transfer Object) 层
//!
//! 将内部领域模型转化为面向前端 JSON 输出的轻量结构体。
//! 所有 DTO 必须派生 `utoipa::ToSchema` 以自动进入 Swagger 文档。

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use stockpick_analysis::ranking::RankedStock;
use stockpick_core::analysis::entity::{Indicators, Recommendation, StockAnalysis};
use stockpick_core::stock::entity::StockRecord;
use utoipa::ToSchema;
use uuid::Uuid;

// ============================================================
//  评级记录 DTO
// ============================================================

/// 单条评级记录
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StockResponse {
    /// 记录 ID
    pub id: Uuid,
    /// 股票代码
    #[schema(example = "NVDA")]
    pub ticker: String,
    /// 调整前目标价
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 100.0)]
    pub target_from: Decimal,
    /// 调整后目标价
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64, example = 150.0)]
    pub target_to: Decimal,
    /// 目标价币种
    #[schema(example = "USD")]
    pub currency: String,
    #[schema(example = "NVIDIA Corporation")]
    pub company: String,
    #[schema(example = "target raised by")]
    pub action: String,
    #[schema(example = "Morgan Stanley")]
    pub brokerage: String,
    #[schema(example = "Hold")]
    pub rating_from: String,
    #[schema(example = "Buy")]
    pub rating_to: String,
    /// 评级发布时间
    pub time: DateTime<Utc>,
}

impl From<&StockRecord> for StockResponse {
    fn from(stock: &StockRecord) -> Self {
        Self {
            id: stock.id,
            ticker: stock.ticker.clone(),
            target_from: stock.target.from.amount,
            target_to: stock.target.to.amount,
            currency: stock.target.to.currency.clone(),
            company: stock.company.clone(),
            action: stock.action.clone(),
            brokerage: stock.brokerage.clone(),
            rating_from: stock.rating.from.to_string(),
            rating_to: stock.rating.to.to_string(),
            time: stock.observed_at,
        }
    }
}

/// 推荐排序中的一条记录：评级记录加投资评分
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RankedStockResponse {
    pub stock: StockResponse,
    /// 投资评分，范围 [0, 1]
    #[schema(example = 0.73)]
    pub score: f64,
}

impl From<&RankedStock> for RankedStockResponse {
    fn from(ranked: &RankedStock) -> Self {
        Self {
            stock: StockResponse::from(&ranked.stock),
            score: ranked.score,
        }
    }
}

/// `GET /api/stocks` 的响应：普通列表或带评分的推荐排序
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum StockListResponse {
    Ranked(Vec<RankedStockResponse>),
    Plain(Vec<StockResponse>),
}

// ============================================================
//  分析结果 DTO
// ============================================================

/// 完整分析流程的单条输出
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AnalysisResponse {
    pub stock: StockResponse,
    #[schema(example = 0.73)]
    pub score: f64,
    pub indicators: Indicators,
    pub recommendation: Recommendation,
}

impl From<&StockAnalysis> for AnalysisResponse {
    fn from(analysis: &StockAnalysis) -> Self {
        Self {
            stock: StockResponse::from(&analysis.stock),
            score: analysis.score,
            indicators: analysis.indicators,
            recommendation: analysis.recommendation,
        }
    }
}

// ============================================================
//  通用响应
// ============================================================

/// 仅含提示信息的响应
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Stocks synchronized successfully")]
    pub message: String,
}

/// 失败响应
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiErrorResponse {
    /// 固定为 false
    pub success: bool,
    /// 错误描述信息
    pub error: String,
}

impl ApiErrorResponse {
    /// 从错误信息构建
    pub fn from_msg(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            error: msg.into(),
        }
    }
}
