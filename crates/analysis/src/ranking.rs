use crate::score::InvestmentScorer;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::cmp::Ordering;
use stockpick_core::stock::entity::StockRecord;

/// # Summary
/// 带评分的评级记录，用于推荐列表视图。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedStock {
    pub stock: StockRecord,
    pub score: f64,
}

/// # Summary
/// 排名比较器：评分降序，同分时发布时间较新的在前，再按 ticker 升序。
///
/// 分析流水线与推荐列表共用这一规则，保证同分记录的顺序确定。
pub fn compare_ranked(
    a_score: f64,
    a: &StockRecord,
    b_score: f64,
    b: &StockRecord,
) -> Ordering {
    b_score
        .total_cmp(&a_score)
        .then_with(|| b.observed_at.cmp(&a.observed_at))
        .then_with(|| a.ticker.cmp(&b.ticker))
}

/// # Summary
/// 轻量排序视图：对全部记录评分并按评分降序排列。
///
/// # Invariants
/// - 不做过期过滤，也不拒绝不合法的记录；完整流水线会排除的记录在这里同样出现。
/// - 每条记录只评分一次。
pub fn rank_by_score(
    scorer: &InvestmentScorer,
    stocks: Vec<StockRecord>,
    now: DateTime<Utc>,
) -> Vec<RankedStock> {
    let mut ranked: Vec<RankedStock> = stocks
        .into_iter()
        .map(|stock| RankedStock {
            score: scorer.score(&stock, now),
            stock,
        })
        .collect();

    ranked.sort_by(|a, b| compare_ranked(a.score, &a.stock, b.score, &b.stock));
    ranked
}
