use rust_decimal::Decimal;
use std::str::FromStr;
use stockpick_core::common::{DEFAULT_CURRENCY, Money};
use stockpick_core::feed::error::FeedError;

/// # Summary
/// 解析外部接口返回的金额文本。
///
/// # Logic
/// 1. 去掉开头的 `$` 以及千分位逗号。
/// 2. 形如 `"<金额> <币种>"` 时使用给定币种。
/// 3. 只有数字时币种缺省为 `USD`。
/// 4. 多于两段的文本直接拒绝，不会忽略尾部多余内容。
///
/// # Arguments
/// * `raw`: 原始文本，例如 `"$1,234.50"`、`"98.5 EUR"`。
///
/// # Returns
/// 成功返回 `Money`，其余格式返回 `FeedError::Parse`。
pub fn parse_money(raw: &str) -> Result<Money, FeedError> {
    let cleaned = raw.trim();
    let cleaned = cleaned.strip_prefix('$').unwrap_or(cleaned).replace(',', "");

    let parse_amount = |text: &str| {
        Decimal::from_str(text)
            .map_err(|e| FeedError::Parse(format!("invalid money string '{raw}': {e}")))
    };

    let mut parts = cleaned.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(amount), None, None) => Ok(Money::new(parse_amount(amount)?, DEFAULT_CURRENCY)),
        (Some(amount), Some(currency), None) => Ok(Money::new(parse_amount(amount)?, currency)),
        _ => Err(FeedError::Parse(format!("invalid money string '{raw}'"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_dollar_prefix_and_thousands_separator() {
        let money = parse_money("$1,234.50").unwrap();
        assert_eq!(money.amount, dec!(1234.50));
        assert_eq!(money.currency, "USD");
    }

    #[test]
    fn test_explicit_currency() {
        let money = parse_money("98.5 EUR").unwrap();
        assert_eq!(money.amount, dec!(98.5));
        assert_eq!(money.currency, "EUR");
    }

    #[test]
    fn test_plain_number_defaults_to_usd() {
        let money = parse_money("42").unwrap();
        assert_eq!(money, Money::usd(dec!(42)));
    }

    #[test]
    fn test_trailing_token_after_currency_is_rejected() {
        let err = parse_money("12.5 EUR extra").unwrap_err();
        assert!(matches!(err, FeedError::Parse(msg) if msg.contains("12.5 EUR extra")));
    }

    #[test]
    fn test_garbage_is_parse_error() {
        for raw in ["", "$", "abc", "12.5 EUR extra", "EUR 12.5"] {
            assert!(
                matches!(parse_money(raw), Err(FeedError::Parse(_))),
                "expected parse error for {raw:?}"
            );
        }
    }
}
