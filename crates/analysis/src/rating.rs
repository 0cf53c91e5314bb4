use std::collections::HashMap;
use stockpick_core::stock::entity::Rating;

/// # Summary
/// 评级的序数层级，数值越大越看多。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RatingTier {
    Negative = 1,
    Neutral = 2,
    Positive = 3,
    VeryPositive = 4,
}

impl RatingTier {
    pub fn level(self) -> i32 {
        self as i32
    }
}

/// # Summary
/// 评级标尺：评级标签到序数层级、评分贡献与影响分的只读查找表。
///
/// # Invariants
/// - 构造后不可变，可在多个分析任务之间共享而无需加锁。
/// - 词表之外的标签没有层级 (层级记为 0)，也没有评分贡献与影响分。
#[derive(Debug, Clone)]
pub struct RatingScale {
    tiers: HashMap<Rating, RatingTier>,
    level_scores: HashMap<Rating, f64>,
    impact_scores: HashMap<Rating, f64>,
}

impl RatingScale {
    /// # Summary
    /// 构造标准评级标尺。
    ///
    /// # Logic
    /// 1. 层级：Strong-Buy/Outperform/Overweight 为 4，Buy/Positive 为 3，
    ///    Hold/Neutral/Equal-Weight/Market-Perform 为 2，Underweight/Underperform/Sell 为 1。
    /// 2. 评分贡献 (已含 0.25 权重)：4 档 0.25，3 档 0.20，2 档 0.15，
    ///    Underweight/Underperform 0.05，Sell 0。
    /// 3. 影响分：逐个标签从 1.0 (Strong-Buy) 递减到 0.0 (Sell)。
    pub fn standard() -> Self {
        use Rating::*;

        let table: [(Rating, RatingTier, f64, f64); 12] = [
            (StrongBuy, RatingTier::VeryPositive, 0.25, 1.0),
            (Outperform, RatingTier::VeryPositive, 0.25, 0.9),
            (Overweight, RatingTier::VeryPositive, 0.25, 0.8),
            (Buy, RatingTier::Positive, 0.20, 0.7),
            (Positive, RatingTier::Positive, 0.20, 0.6),
            (Hold, RatingTier::Neutral, 0.15, 0.5),
            (Neutral, RatingTier::Neutral, 0.15, 0.4),
            (EqualWeight, RatingTier::Neutral, 0.15, 0.4),
            (MarketPerform, RatingTier::Neutral, 0.15, 0.3),
            (Underweight, RatingTier::Negative, 0.05, 0.2),
            (Underperform, RatingTier::Negative, 0.05, 0.1),
            (Sell, RatingTier::Negative, 0.0, 0.0),
        ];

        let mut tiers = HashMap::with_capacity(table.len());
        let mut level_scores = HashMap::with_capacity(table.len());
        let mut impact_scores = HashMap::with_capacity(table.len());
        for (rating, tier, level_score, impact_score) in table {
            tiers.insert(rating.clone(), tier);
            level_scores.insert(rating.clone(), level_score);
            impact_scores.insert(rating, impact_score);
        }

        Self {
            tiers,
            level_scores,
            impact_scores,
        }
    }

    /// 查询评级所属层级，未收录的标签返回 `None`。
    pub fn tier(&self, rating: &Rating) -> Option<RatingTier> {
        self.tiers.get(rating).copied()
    }

    /// 评级的序数层级，未收录的标签记为 0。
    pub fn level(&self, rating: &Rating) -> i32 {
        self.tier(rating).map_or(0, RatingTier::level)
    }

    /// 目标评级对投资评分的贡献 (已含权重)，未收录的标签贡献 0。
    pub fn level_score(&self, rating: &Rating) -> f64 {
        self.level_scores.get(rating).copied().unwrap_or(0.0)
    }

    /// 标签的影响分，未收录返回 `None`。
    pub fn impact_score(&self, rating: &Rating) -> Option<f64> {
        self.impact_scores.get(rating).copied()
    }

    /// # Summary
    /// 判断一次评级变动是否可信。
    ///
    /// # Logic
    /// 1. 把两个标签映射为层级 (未收录为 0)。
    /// 2. 层级差的绝对值不超过 1 即为合法；单次更新跨越多个层级视为不可信数据。
    ///
    /// # Arguments
    /// * `from`: 调整前评级。
    /// * `to`: 调整后评级。
    ///
    /// # Returns
    /// 合法返回 true。该判断与方向无关。
    pub fn is_valid_transition(&self, from: &Rating, to: &Rating) -> bool {
        (self.level(from) - self.level(to)).abs() <= 1
    }
}

impl Default for RatingScale {
    fn default() -> Self {
        Self::standard()
    }
}
