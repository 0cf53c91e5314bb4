use stockpick_core::analysis::entity::Recommendation;

/// # Summary
/// 把投资评分映射为建议标签。
///
/// # Logic
/// 每档包含下边界：>=0.8 Strong Buy，>=0.6 Buy，>=0.4 Hold，>=0.2 Sell，其余 Strong Sell。
pub fn classify(score: f64) -> Recommendation {
    match score {
        s if s >= 0.8 => Recommendation::StrongBuy,
        s if s >= 0.6 => Recommendation::Buy,
        s if s >= 0.4 => Recommendation::Hold,
        s if s >= 0.2 => Recommendation::Sell,
        _ => Recommendation::StrongSell,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lower_edges_are_inclusive() {
        assert_eq!(classify(1.0), Recommendation::StrongBuy);
        assert_eq!(classify(0.8), Recommendation::StrongBuy);
        assert_eq!(classify(0.79999), Recommendation::Buy);
        assert_eq!(classify(0.6), Recommendation::Buy);
        assert_eq!(classify(0.4), Recommendation::Hold);
        assert_eq!(classify(0.2), Recommendation::Sell);
        assert_eq!(classify(0.19999), Recommendation::StrongSell);
        assert_eq!(classify(0.0), Recommendation::StrongSell);
    }

    #[test]
    fn test_every_score_maps_to_one_label_in_order() {
        let mut previous = classify(0.0);
        for step in 0..=1000u32 {
            let score = f64::from(step) / 1000.0;
            let label = classify(score);
            // 标签只会随评分单调上升
            let rank = |r: Recommendation| match r {
                Recommendation::StrongSell => 0,
                Recommendation::Sell => 1,
                Recommendation::Hold => 2,
                Recommendation::Buy => 3,
                Recommendation::StrongBuy => 4,
            };
            assert!(rank(label) >= rank(previous), "label dropped at {score}");
            previous = label;
        }
        assert_eq!(previous, Recommendation::StrongBuy);
    }

    #[test]
    fn test_labels_render_with_spaces() {
        assert_eq!(Recommendation::StrongBuy.to_string(), "Strong Buy");
        assert_eq!(Recommendation::StrongSell.as_str(), "Strong Sell");
    }
}
