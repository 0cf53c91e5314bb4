use crate::score::{InvestmentScorer, target_growth_ratio};
use stockpick_core::analysis::entity::Indicators;
use stockpick_core::stock::entity::{Rating, StockRecord};

/// 声望分权重
const PRESTIGE_WEIGHT: f64 = 0.4;
/// 评级一致性权重
const CONSISTENCY_WEIGHT: f64 = 0.3;
/// 目标价变动幅度权重
const PRICE_CHANGE_WEIGHT: f64 = 0.3;

/// 目标价涨幅百分比，`from` 非正时记 0。
pub fn price_target_growth(stock: &StockRecord) -> f64 {
    target_growth_ratio(&stock.target).map_or(0.0, |ratio| ratio * 100.0)
}

/// # Summary
/// 评级影响分：`to` 的影响分减去 `from` 的影响分。
///
/// # Returns
/// 任一标签未收录时返回 0。
pub fn rating_impact(scorer: &InvestmentScorer, stock: &StockRecord) -> f64 {
    let scale = scorer.scale();
    match (
        scale.impact_score(&stock.rating.from),
        scale.impact_score(&stock.rating.to),
    ) {
        (Some(from), Some(to)) => to - from,
        _ => 0.0,
    }
}

/// 评级一致性：未变动 1.0，合法变动 0.7，跨层级变动 0.3。
pub fn consistency_score(scorer: &InvestmentScorer, from: &Rating, to: &Rating) -> f64 {
    if from == to {
        1.0
    } else if scorer.scale().is_valid_transition(from, to) {
        0.7
    } else {
        0.3
    }
}

/// # Summary
/// 目标价变动幅度分。
///
/// # Logic
/// 相对变动落在 [-0.5, 1.0] 记 1.0；落在 (1.0, 2.0] 或 [-0.7, -0.5) 记 0.7；其余记 0.3。
pub fn price_change_score(relative_change: f64) -> f64 {
    if (-0.5..=1.0).contains(&relative_change) {
        1.0
    } else if (relative_change > 1.0 && relative_change <= 2.0)
        || (-0.7..-0.5).contains(&relative_change)
    {
        0.7
    } else {
        0.3
    }
}

/// # Summary
/// 券商置信度：声望 × 0.4 + 一致性 × 0.3 + 变动幅度 × 0.3，截断到 [0, 1]。
///
/// 与评分中的券商声誉因子相互独立，只用于解释，不回灌到评分。
pub fn broker_confidence(scorer: &InvestmentScorer, stock: &StockRecord) -> f64 {
    let prestige = scorer.brokers().tier(&stock.brokerage).prestige_score();
    let consistency = consistency_score(scorer, &stock.rating.from, &stock.rating.to);
    let price_change = target_growth_ratio(&stock.target).map_or(0.3, price_change_score);

    let confidence = prestige * PRESTIGE_WEIGHT
        + consistency * CONSISTENCY_WEIGHT
        + price_change * PRICE_CHANGE_WEIGHT;
    confidence.clamp(0.0, 1.0)
}

/// 计算记录的全部解释性指标
pub fn compute(scorer: &InvestmentScorer, stock: &StockRecord) -> Indicators {
    Indicators {
        price_target_growth: price_target_growth(stock),
        rating_impact: rating_impact(scorer, stock),
        broker_confidence: broker_confidence(scorer, stock),
    }
}
