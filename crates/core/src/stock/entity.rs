use crate::common::Money;
use crate::stock::error::StockError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// # Summary
/// 分析师评级标签。
///
/// 固定词表覆盖券商常用的十二种评级；词表之外的标签原样保存在 `Other` 中，
/// 在评级层级计算时视为缺失。
///
/// # Invariants
/// - `as_str()` 与 `From<&str>` 互为逆运算，持久化与反序列化不会丢失原始文本。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Rating {
    StrongBuy,
    Outperform,
    Overweight,
    Buy,
    Positive,
    Hold,
    Neutral,
    EqualWeight,
    MarketPerform,
    Underweight,
    Underperform,
    Sell,
    /// 词表之外的标签 (包括空字符串)
    Other(String),
}

impl Rating {
    /// 返回标签的原始文本
    pub fn as_str(&self) -> &str {
        match self {
            Rating::StrongBuy => "Strong-Buy",
            Rating::Outperform => "Outperform",
            Rating::Overweight => "Overweight",
            Rating::Buy => "Buy",
            Rating::Positive => "Positive",
            Rating::Hold => "Hold",
            Rating::Neutral => "Neutral",
            Rating::EqualWeight => "Equal-Weight",
            Rating::MarketPerform => "Market-Perform",
            Rating::Underweight => "Underweight",
            Rating::Underperform => "Underperform",
            Rating::Sell => "Sell",
            Rating::Other(label) => label,
        }
    }

    /// 标签是否为空 (空串或纯空白)
    pub fn is_empty(&self) -> bool {
        matches!(self, Rating::Other(label) if label.trim().is_empty())
    }
}

impl From<&str> for Rating {
    fn from(label: &str) -> Self {
        match label {
            "Strong-Buy" => Rating::StrongBuy,
            "Outperform" => Rating::Outperform,
            "Overweight" => Rating::Overweight,
            "Buy" => Rating::Buy,
            "Positive" => Rating::Positive,
            "Hold" => Rating::Hold,
            "Neutral" => Rating::Neutral,
            "Equal-Weight" => Rating::EqualWeight,
            "Market-Perform" => Rating::MarketPerform,
            "Underweight" => Rating::Underweight,
            "Underperform" => Rating::Underperform,
            "Sell" => Rating::Sell,
            other => Rating::Other(other.to_string()),
        }
    }
}

impl From<String> for Rating {
    fn from(label: String) -> Self {
        Rating::from(label.as_str())
    }
}

impl From<Rating> for String {
    fn from(rating: Rating) -> Self {
        rating.as_str().to_string()
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// # Summary
/// 目标价变动：分析师把目标价从 `from` 调整到 `to`。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetPrice {
    pub from: Money,
    pub to: Money,
}

/// # Summary
/// 评级变动：分析师把评级从 `from` 调整到 `to`。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingChange {
    pub from: Rating,
    pub to: Rating,
}

/// # Summary
/// 分析师评级记录聚合根，对应一次券商发布的目标价/评级调整。
///
/// # Invariants
/// - `id` 在创建时分配，之后不再变化。
/// - `ticker` 非空，由 `StockRecord::new` 保证。
/// - 目标价正负不在创建时校验，分析流程会拒绝非正目标价。
/// - 同一 `ticker` 在仓储中只保留最新一条 (按 ticker upsert)。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockRecord {
    // 记录唯一标识
    pub id: Uuid,
    // 股票代码 (例如: AAPL)
    pub ticker: String,
    // 目标价变动
    pub target: TargetPrice,
    // 公司名称
    pub company: String,
    // 券商动作描述 (例如: "target raised by")
    pub action: String,
    // 发布评级的券商
    pub brokerage: String,
    // 评级变动
    pub rating: RatingChange,
    // 评级发布时间
    pub observed_at: DateTime<Utc>,
}

impl StockRecord {
    /// # Summary
    /// 创建新的评级记录并分配唯一 ID。
    ///
    /// # Logic
    /// 1. 校验 ticker 非空 (去除首尾空白后)。
    /// 2. 生成 UUID v4 作为记录 ID。
    /// 3. 描述性字段置空，由调用方后续填充。
    ///
    /// # Arguments
    /// * `ticker`: 股票代码。
    /// * `target`: 目标价变动。
    /// * `rating`: 评级变动。
    /// * `observed_at`: 评级发布时间。
    ///
    /// # Returns
    /// 成功返回记录，ticker 为空返回 `StockError::InvalidTicker`。
    pub fn new(
        ticker: impl Into<String>,
        target: TargetPrice,
        rating: RatingChange,
        observed_at: DateTime<Utc>,
    ) -> Result<Self, StockError> {
        let ticker = ticker.into();
        if ticker.trim().is_empty() {
            return Err(StockError::InvalidTicker);
        }

        Ok(Self {
            id: Uuid::new_v4(),
            ticker,
            target,
            company: String::new(),
            action: String::new(),
            brokerage: String::new(),
            rating,
            observed_at,
        })
    }

    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = company.into();
        self
    }

    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = action.into();
        self
    }

    pub fn with_brokerage(mut self, brokerage: impl Into<String>) -> Self {
        self.brokerage = brokerage.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn target() -> TargetPrice {
        TargetPrice {
            from: Money::usd(dec!(100)),
            to: Money::usd(dec!(120)),
        }
    }

    fn rating() -> RatingChange {
        RatingChange {
            from: Rating::Hold,
            to: Rating::Buy,
        }
    }

    #[test]
    fn test_new_rejects_empty_ticker() {
        let result = StockRecord::new("  ", target(), rating(), Utc::now());
        assert!(matches!(result, Err(StockError::InvalidTicker)));
    }

    #[test]
    fn test_new_assigns_distinct_ids() {
        let a = StockRecord::new("AAPL", target(), rating(), Utc::now()).unwrap();
        let b = StockRecord::new("AAPL", target(), rating(), Utc::now()).unwrap();
        assert_ne!(a.id, b.id);
        assert!(a.company.is_empty());
    }

    #[test]
    fn test_rating_label_round_trip_keeps_unknown_text() {
        assert_eq!(Rating::from("Equal-Weight"), Rating::EqualWeight);
        assert_eq!(Rating::from("Sector Perform"), Rating::Other("Sector Perform".into()));
        assert_eq!(Rating::from("Sector Perform").as_str(), "Sector Perform");

        let json = serde_json::to_string(&Rating::StrongBuy).unwrap();
        assert_eq!(json, "\"Strong-Buy\"");
    }

    #[test]
    fn test_rating_is_empty() {
        assert!(Rating::from("").is_empty());
        assert!(Rating::from("   ").is_empty());
        assert!(!Rating::Sell.is_empty());
    }
}
