use crate::analysis::entity::Indicators;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 分析完成事件的主题名
pub const STOCK_ANALYZED_TOPIC: &str = "stock.analyzed";

/// # Summary
/// 单只股票分析完成后发布的领域事件。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockAnalyzedEvent {
    // 事件唯一标识
    pub id: Uuid,
    // 被分析的评级记录 ID
    pub stock_id: Uuid,
    // 投资评分
    pub score: f64,
    // 解释性指标
    pub indicators: Indicators,
    // 事件发生时间
    pub occurred_at: DateTime<Utc>,
}

impl StockAnalyzedEvent {
    pub fn new(stock_id: Uuid, score: f64, indicators: Indicators, occurred_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            stock_id,
            score,
            indicators,
            occurred_at,
        }
    }
}
