//! Accept/reject predicates applied to evaluated candidates.

use rust_decimal::Decimal;

use super::config::ScanConfig;
use super::ButterflyCandidate;

/// Apply the filter pipeline to one candidate.
///
/// Predicates run in a fixed order (DTE window, wing shape, minimum credit,
/// short-delta band, positive max loss). Each is independent, so the order
/// never changes the outcome; it is fixed for determinism and so the cheap
/// checks short-circuit first. A rejected candidate simply never appears in
/// the result set.
pub fn accept(candidate: &ButterflyCandidate<'_>, config: &ScanConfig) -> bool {
    let low = candidate.low.quote;
    let body = candidate.body.quote;
    let high = candidate.high.quote;

    if body.dte < config.min_dte || body.dte > config.max_dte {
        return false;
    }

    // Wing shape, re-asserted even though the generator already enforces it.
    let inner_wing = body.strike - low.strike;
    let outer_wing = high.strike - body.strike;
    if outer_wing <= inner_wing {
        return false;
    }

    if candidate.net_credit < config.min_credit {
        return false;
    }

    let short_delta = body.delta.abs();
    if short_delta < config.short_delta_min || short_delta > config.short_delta_max {
        return false;
    }

    // Risk sanity: a structure with no downside is degenerate, and scoring
    // it would divide by zero.
    candidate.max_loss > Decimal::ZERO
}
