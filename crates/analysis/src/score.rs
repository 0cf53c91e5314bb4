use crate::broker::BrokerDirectory;
use crate::rating::RatingScale;
use chrono::{DateTime, Duration, Utc};
use rust_decimal::prelude::ToPrimitive;
use std::sync::Arc;
use stockpick_core::stock::entity::{StockRecord, TargetPrice};

/// 增长潜力权重
const GROWTH_WEIGHT: f64 = 0.30;

/// # Summary
/// 计算目标价的相对变动 `(to - from) / from`。
///
/// # Returns
/// `from` 非正或金额无法转为浮点数时返回 `None`，调用方不得再做除法。
pub fn target_growth_ratio(target: &TargetPrice) -> Option<f64> {
    let from = target.from.amount.to_f64()?;
    let to = target.to.amount.to_f64()?;
    if from <= 0.0 {
        return None;
    }
    Some((to - from) / from)
}

/// # Summary
/// 投资评分的五个因子，各自已乘以权重。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBreakdown {
    /// 目标价涨幅 × 0.30，可以为负
    pub growth: f64,
    /// 目标评级档位
    pub rating_level: f64,
    /// 评级上调幅度，下调记 0
    pub rating_improvement: f64,
    /// 券商声誉
    pub broker_reputation: f64,
    /// 评级发布时效
    pub timeliness: f64,
}

impl ScoreBreakdown {
    /// 五因子求和后截断到 [0, 1]。
    pub fn total(&self) -> f64 {
        let sum = self.growth
            + self.rating_level
            + self.rating_improvement
            + self.broker_reputation
            + self.timeliness;
        // 极端目标价可能得到无穷大，NaN 只会来自上游数据损坏
        if sum.is_nan() { 0.0 } else { sum.clamp(0.0, 1.0) }
    }
}

/// # Summary
/// 五因子投资评分器。
///
/// # Invariants
/// - 纯函数：相同记录在相同 `now` 下得分相同，没有副作用。
/// - 输出总是位于 [0, 1]。
/// - 查找表在构造后只读，多个评分器可共享同一份表。
#[derive(Debug, Clone)]
pub struct InvestmentScorer {
    scale: Arc<RatingScale>,
    brokers: Arc<BrokerDirectory>,
}

impl InvestmentScorer {
    pub fn new(scale: Arc<RatingScale>, brokers: Arc<BrokerDirectory>) -> Self {
        Self { scale, brokers }
    }

    /// 使用标准评级标尺与券商名单构造评分器
    pub fn standard() -> Self {
        Self::new(
            Arc::new(RatingScale::standard()),
            Arc::new(BrokerDirectory::standard()),
        )
    }

    pub fn scale(&self) -> &RatingScale {
        &self.scale
    }

    pub fn brokers(&self) -> &BrokerDirectory {
        &self.brokers
    }

    /// # Summary
    /// 计算记录的最终投资评分。
    ///
    /// # Arguments
    /// * `stock`: 评级记录。
    /// * `now`: 评估时刻，用于时效因子。
    ///
    /// # Returns
    /// [0, 1] 区间内的评分。
    pub fn score(&self, stock: &StockRecord, now: DateTime<Utc>) -> f64 {
        self.breakdown(stock, now).total()
    }

    /// # Summary
    /// 计算五个因子的分项贡献。
    ///
    /// # Logic
    /// 1. 增长潜力：目标价相对变动 × 0.30；`from` 非正时记 0。
    /// 2. 评级档位：查评级标尺中 `to` 的评分贡献。
    /// 3. 评级改善：仅当 `from != to` 时按层级差计分，>=3 记 0.15，2 记 0.12，1 记 0.08，其余记 0。
    /// 4. 券商声誉：S/A/B/C 四档分别记 0.20/0.15/0.10/0.05。
    /// 5. 时效：发布不超过 7 天记 0.10，不超过 30 天记 0.05，更早记 0。
    pub fn breakdown(&self, stock: &StockRecord, now: DateTime<Utc>) -> ScoreBreakdown {
        let growth = target_growth_ratio(&stock.target).map_or(0.0, |ratio| ratio * GROWTH_WEIGHT);

        let rating = &stock.rating;
        let rating_level = self.scale.level_score(&rating.to);

        let rating_improvement = if rating.from != rating.to {
            match self.scale.level(&rating.to) - self.scale.level(&rating.from) {
                diff if diff >= 3 => 0.15,
                2 => 0.12,
                1 => 0.08,
                _ => 0.0,
            }
        } else {
            0.0
        };

        let broker_reputation = self.brokers.tier(&stock.brokerage).reputation_score();

        let age = now - stock.observed_at;
        let timeliness = if age <= Duration::days(7) {
            0.10
        } else if age <= Duration::days(30) {
            0.05
        } else {
            0.0
        };

        ScoreBreakdown {
            growth,
            rating_level,
            rating_improvement,
            broker_reputation,
            timeliness,
        }
    }
}

impl Default for InvestmentScorer {
    fn default() -> Self {
        Self::standard()
    }
}
