//! Deterministic ordering of surviving candidates.

use std::cmp::Ordering;

use super::ButterflyCandidate;

/// Sort candidates by score descending; equal scores are ordered by
/// ascending max loss, preferring the lower-risk structure.
pub fn rank(candidates: &mut [ButterflyCandidate<'_>]) {
    candidates.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.max_loss.cmp(&b.max_loss))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{OptionType, Quote};
    use crate::scan::config::LegPricing;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn call_quote(strike: Decimal, mid: Decimal) -> Quote {
        Quote {
            symbol: "XYZ".to_string(),
            expiry: NaiveDate::from_ymd_opt(2025, 1, 17).unwrap(),
            dte: 5,
            strike,
            option_type: OptionType::Call,
            bid: mid,
            ask: mid,
            mid,
            delta: 0.30,
            iv: 0.23,
        }
    }

    #[test]
    fn test_orders_by_score_descending() {
        // 95/100/110 scores 5.7/4.3; 95/100/120 scores 6.3/13.7
        let low = call_quote(dec!(95), dec!(7.2));
        let body = call_quote(dec!(100), dec!(4.5));
        let high_near = call_quote(dec!(110), dec!(1.1));
        let high_far = call_quote(dec!(120), dec!(0.5));

        let mut candidates = vec![
            ButterflyCandidate::build(&low, &body, &high_far, LegPricing::Mid),
            ButterflyCandidate::build(&low, &body, &high_near, LegPricing::Mid),
        ];
        rank(&mut candidates);

        assert_eq!(candidates[0].high.quote.strike, dec!(110));
        assert!(candidates[0].score > candidates[1].score);
    }

    #[test]
    fn test_equal_scores_tie_break_on_lower_max_loss() {
        // Two structures with identical payoff profiles scaled 2x: equal
        // score, different absolute risk.
        let low_a = call_quote(dec!(95), dec!(7.2));
        let body_a = call_quote(dec!(100), dec!(4.5));
        let high_a = call_quote(dec!(110), dec!(1.1));

        // Doubled strikes and prices: credit 1.4, peak 11.4, loss 8.6
        let low_b = call_quote(dec!(190), dec!(14.4));
        let body_b = call_quote(dec!(200), dec!(9.0));
        let high_b = call_quote(dec!(220), dec!(2.2));

        let a = ButterflyCandidate::build(&low_a, &body_a, &high_a, LegPricing::Mid);
        let b = ButterflyCandidate::build(&low_b, &body_b, &high_b, LegPricing::Mid);
        assert_eq!(a.score, b.score);
        assert!(a.max_loss < b.max_loss);

        let mut candidates = vec![b, a];
        rank(&mut candidates);
        assert_eq!(candidates[0].low.quote.strike, dec!(95));
    }
}
