//! Expiry payoff analysis for 1:-2:1 call butterflies.
//!
//! The payoff is piecewise linear with breakpoints at the three strikes:
//! flat at `net_credit` below K1, slope +1 between K1 and K2, slope -1
//! between K2 and K3, flat at `(2*K2 - K1 - K3) + net_credit` above K3.
//! The global extremes therefore occur at the breakpoints or on the two
//! flat tails, so evaluating that finite set is exact.

use rust_decimal::Decimal;

use crate::data::Quote;

use super::config::LegPricing;

/// Net credit, max profit, and max loss per share for one candidate.
///
/// `max_loss` is a positive magnitude. A non-positive `max_loss` means the
/// structure has no downside; the numbers are still reported as computed,
/// and rejecting such degenerate candidates is the filter pipeline's call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayoffProfile {
    pub net_credit: Decimal,
    pub max_profit: Decimal,
    pub max_loss: Decimal,
}

/// Value received for entering the structure: two short body legs minus the
/// two long wings, priced per the configured policy.
pub fn net_credit(low: &Quote, body: &Quote, high: &Quote, pricing: LegPricing) -> Decimal {
    match pricing {
        LegPricing::Mid => Decimal::TWO * body.mid - low.mid - high.mid,
        LegPricing::Natural => Decimal::TWO * body.bid - low.ask - high.ask,
    }
}

/// Profit at expiry per share for terminal price `s`.
pub fn payoff_at(s: Decimal, k1: Decimal, k2: Decimal, k3: Decimal, net_credit: Decimal) -> Decimal {
    let call = |k: Decimal| (s - k).max(Decimal::ZERO);
    call(k1) - Decimal::TWO * call(k2) + call(k3) + net_credit
}

/// Evaluate one candidate's payoff extremes.
///
/// Assumes k1 < k2 < k3, which the generator guarantees.
pub fn evaluate(low: &Quote, body: &Quote, high: &Quote, pricing: LegPricing) -> PayoffProfile {
    let credit = net_credit(low, body, high, pricing);
    let (k1, k2, k3) = (low.strike, body.strike, high.strike);

    // Flat tail below K1 equals the credit; flat tail above K3 is the
    // plateau, negative for a broken wing.
    let lower_tail = credit;
    let upper_tail = Decimal::TWO * k2 - k1 - k3 + credit;

    let at_breakpoints = [
        payoff_at(k1, k1, k2, k3, credit),
        payoff_at(k2, k1, k2, k3, credit),
        payoff_at(k3, k1, k2, k3, credit),
    ];

    let mut max_payoff = lower_tail.max(upper_tail);
    let mut min_payoff = lower_tail.min(upper_tail);
    for value in at_breakpoints {
        max_payoff = max_payoff.max(value);
        min_payoff = min_payoff.min(value);
    }

    PayoffProfile {
        net_credit: credit,
        max_profit: max_payoff,
        max_loss: -min_payoff,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::OptionType;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn call_quote(strike: Decimal, bid: Decimal, ask: Decimal, mid: Decimal) -> Quote {
        Quote {
            symbol: "XYZ".to_string(),
            expiry: NaiveDate::from_ymd_opt(2025, 1, 17).unwrap(),
            dte: 5,
            strike,
            option_type: OptionType::Call,
            bid,
            ask,
            mid,
            delta: 0.30,
            iv: 0.23,
        }
    }

    #[test]
    fn test_payoff_shape_textbook_example() {
        // K1=95, K2=100, K3=110, credit 1.00
        let (k1, k2, k3) = (dec!(95), dec!(100), dec!(110));
        let credit = dec!(1.0);

        // Below the lower strike: just the credit
        assert_eq!(payoff_at(dec!(90), k1, k2, k3, credit), dec!(1.0));
        // At the body: peak profit (K2-K1) + credit
        assert_eq!(payoff_at(dec!(100), k1, k2, k3, credit), dec!(6.0));
        // Far above the upper strike: plateau (2*K2-K1-K3) + credit
        assert_eq!(payoff_at(dec!(200), k1, k2, k3, credit), dec!(-4.0));
    }

    #[test]
    fn test_payoff_continuous_at_breakpoints() {
        let (k1, k2, k3) = (dec!(95), dec!(100), dec!(110));
        let credit = dec!(0.7);
        let eps = dec!(0.0001);

        for k in [k1, k2, k3] {
            let below = payoff_at(k - eps, k1, k2, k3, credit);
            let at = payoff_at(k, k1, k2, k3, credit);
            let above = payoff_at(k + eps, k1, k2, k3, credit);
            assert!((at - below).abs() <= eps);
            assert!((above - at).abs() <= eps);
        }
    }

    #[test]
    fn test_evaluate_known_structure() {
        // 95/100/110 with mids 7.2 / 4.5 / 1.1: credit 0.7, peak 5.7, plateau -4.3
        let low = call_quote(dec!(95), dec!(7.0), dec!(7.4), dec!(7.2));
        let body = call_quote(dec!(100), dec!(4.3), dec!(4.7), dec!(4.5));
        let high = call_quote(dec!(110), dec!(1.0), dec!(1.2), dec!(1.1));

        let profile = evaluate(&low, &body, &high, LegPricing::Mid);
        assert_eq!(profile.net_credit, dec!(0.7));
        assert_eq!(profile.max_profit, dec!(5.7));
        assert_eq!(profile.max_loss, dec!(4.3));
    }

    #[test]
    fn test_max_profit_dominates_every_breakpoint() {
        let low = call_quote(dec!(95), dec!(7.0), dec!(7.4), dec!(7.2));
        let body = call_quote(dec!(100), dec!(4.3), dec!(4.7), dec!(4.5));
        let high = call_quote(dec!(120), dec!(0.4), dec!(0.6), dec!(0.5));

        let profile = evaluate(&low, &body, &high, LegPricing::Mid);
        let credit = profile.net_credit;
        for s in [dec!(95), dec!(100), dec!(120)] {
            let value = payoff_at(s, dec!(95), dec!(100), dec!(120), credit);
            assert!(profile.max_profit >= value);
            assert!(-profile.max_loss <= value);
        }
    }

    #[test]
    fn test_natural_pricing_uses_bid_for_shorts_and_ask_for_longs() {
        let low = call_quote(dec!(95), dec!(7.0), dec!(7.4), dec!(7.2));
        let body = call_quote(dec!(100), dec!(4.3), dec!(4.7), dec!(4.5));
        let high = call_quote(dec!(110), dec!(1.0), dec!(1.2), dec!(1.1));

        // 2*4.3 - 7.4 - 1.2 = 0.0
        let credit = net_credit(&low, &body, &high, LegPricing::Natural);
        assert_eq!(credit, Decimal::ZERO);
    }

    #[test]
    fn test_degenerate_structure_reported_not_rejected() {
        // Credit large enough that even the plateau stays positive
        let low = call_quote(dec!(95), dec!(1.0), dec!(1.0), dec!(1.0));
        let body = call_quote(dec!(100), dec!(4.0), dec!(4.0), dec!(4.0));
        let high = call_quote(dec!(106), dec!(0.5), dec!(0.5), dec!(0.5));

        // credit = 8 - 1 - 0.5 = 6.5; plateau = 2*100-95-106 = -1 -> +5.5
        let profile = evaluate(&low, &body, &high, LegPricing::Mid);
        assert_eq!(profile.net_credit, dec!(6.5));
        assert!(profile.max_loss <= Decimal::ZERO);
    }
}
