pub mod time;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 缺省结算货币
pub const DEFAULT_CURRENCY: &str = "USD";

/// # Summary
/// 货币金额值对象，记录目标价等带币种的数值。
///
/// # Invariants
/// - `currency` 为 ISO 货币代码，解析时缺省为 `USD`。
/// - 金额正负不在创建时校验，由分析流程自行检查。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Money {
    // 金额
    #[schema(value_type = f64, example = 150.0)]
    pub amount: Decimal,
    // 币种
    #[schema(example = "USD")]
    pub currency: String,
}

impl Money {
    /// 创建指定币种的金额。
    pub fn new(amount: Decimal, currency: impl Into<String>) -> Self {
        Self {
            amount,
            currency: currency.into(),
        }
    }

    /// 创建美元金额。
    pub fn usd(amount: Decimal) -> Self {
        Self::new(amount, DEFAULT_CURRENCY)
    }

    /// 金额是否严格大于零
    pub fn is_positive(&self) -> bool {
        self.amount > Decimal::ZERO
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.amount, self.currency)
    }
}
