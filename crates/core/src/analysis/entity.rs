use crate::stock::entity::StockRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// # Summary
/// 投资建议的五档离散标签。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum Recommendation {
    #[serde(rename = "Strong Buy")]
    StrongBuy,
    #[serde(rename = "Buy")]
    Buy,
    #[serde(rename = "Hold")]
    Hold,
    #[serde(rename = "Sell")]
    Sell,
    #[serde(rename = "Strong Sell")]
    StrongSell,
}

impl Recommendation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Recommendation::StrongBuy => "Strong Buy",
            Recommendation::Buy => "Buy",
            Recommendation::Hold => "Hold",
            Recommendation::Sell => "Sell",
            Recommendation::StrongSell => "Strong Sell",
        }
    }
}

impl std::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// # Summary
/// 解释性指标，随评分一并输出，不参与评分计算。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Indicators {
    /// 目标价涨幅 (百分比)
    #[schema(example = 50.0)]
    pub price_target_growth: f64,
    /// 评级变动带来的影响分 (`to` 分值减 `from` 分值)
    #[schema(example = 0.2)]
    pub rating_impact: f64,
    /// 券商置信度，范围 [0, 1]
    #[schema(example = 0.91)]
    pub broker_confidence: f64,
}

impl Indicators {
    /// 以 (名称, 数值) 形式遍历全部指标
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> {
        [
            ("price_target_growth", self.price_target_growth),
            ("rating_impact", self.rating_impact),
            ("broker_confidence", self.broker_confidence),
        ]
        .into_iter()
    }
}

/// # Summary
/// 单条评级记录的分析结果，是一次分析运行中的临时视图，不做持久化。
///
/// # Invariants
/// - `score` 位于 [0, 1]。
/// - 只为未过期、数据完整、评级跨度合法且目标价确有变动的记录生成。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockAnalysis {
    pub stock: StockRecord,
    pub score: f64,
    pub indicators: Indicators,
    pub recommendation: Recommendation,
    pub computed_at: DateTime<Utc>,
}
