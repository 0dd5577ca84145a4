//! Broken-wing butterfly scan pipeline.
//!
//! Runs the stages in a strict forward order:
//! 1. Restrict the quote set to one symbol/expiry call chain
//! 2. Enumerate broken-wing strike triples
//! 3. Evaluate each triple's payoff extremes
//! 4. Filter against the configured thresholds
//! 5. Rank survivors by risk/reward
//!
//! The whole pipeline is synchronous and pure: the same quotes and config
//! always produce the same ordered results, and nothing here mutates the
//! chain or a candidate after construction.

pub mod config;
pub mod filter;
pub mod generate;
pub mod payoff;
pub mod rank;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::data::{OptionsChain, Quote};

pub use config::{ConfigError, LegPricing, ScanConfig};
pub use generate::{strike_triples, StrikeTriples};
pub use payoff::{evaluate, net_credit, payoff_at, PayoffProfile};

/// One leg of a butterfly: a borrowed quote and a signed quantity.
#[derive(Debug, Clone, Copy)]
pub struct Leg<'a> {
    pub quote: &'a Quote,
    /// +1 long, -2 for the short body
    pub qty: i32,
}

/// A fully evaluated 1:-2:1 call butterfly candidate.
///
/// Built once per enumerated triple and never mutated afterwards; it is
/// either kept through the filters or discarded.
#[derive(Debug, Clone)]
pub struct ButterflyCandidate<'a> {
    pub low: Leg<'a>,
    pub body: Leg<'a>,
    pub high: Leg<'a>,
    pub net_credit: Decimal,
    pub max_profit: Decimal,
    pub max_loss: Decimal,
    /// max_profit / max_loss; 0.0 when max_loss is non-positive (such
    /// candidates never survive filtering)
    pub score: f64,
}

impl<'a> ButterflyCandidate<'a> {
    pub fn build(low: &'a Quote, body: &'a Quote, high: &'a Quote, pricing: LegPricing) -> Self {
        let profile = payoff::evaluate(low, body, high, pricing);

        let score = if profile.max_loss > Decimal::ZERO {
            let max_profit: f64 = profile.max_profit.try_into().unwrap_or(0.0);
            let max_loss: f64 = profile.max_loss.try_into().unwrap_or(1.0);
            max_profit / max_loss
        } else {
            0.0
        };

        Self {
            low: Leg { quote: low, qty: 1 },
            body: Leg { quote: body, qty: -2 },
            high: Leg { quote: high, qty: 1 },
            net_credit: profile.net_credit,
            max_profit: profile.max_profit,
            max_loss: profile.max_loss,
            score,
        }
    }
}

/// Owned scan result record, one per surviving candidate.
///
/// Values are per share and never rounded here; rounding belongs to the
/// presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ButterflyResult {
    pub symbol: String,
    pub expiry: NaiveDate,
    pub dte: i32,
    pub k1: Decimal,
    pub k2: Decimal,
    pub k3: Decimal,
    pub credit: Decimal,
    pub max_profit: Decimal,
    pub max_loss: Decimal,
    pub score: f64,
}

impl ButterflyResult {
    fn from_candidate(candidate: &ButterflyCandidate<'_>) -> Self {
        let body = candidate.body.quote;
        Self {
            symbol: body.symbol.clone(),
            expiry: body.expiry,
            dte: body.dte,
            k1: candidate.low.quote.strike,
            k2: body.strike,
            k3: candidate.high.quote.strike,
            credit: candidate.net_credit,
            max_profit: candidate.max_profit,
            max_loss: candidate.max_loss,
            score: candidate.score,
        }
    }
}

/// Scan a restricted call chain for broken-wing butterflies.
///
/// An empty result is the normal "no candidates" outcome: a chain with
/// fewer than three strikes, or thresholds nothing satisfies, is not an
/// error. Only a malformed config is.
pub fn scan_chain(
    chain: &OptionsChain,
    config: &ScanConfig,
) -> Result<Vec<ButterflyResult>, ConfigError> {
    config.validate()?;

    let mut generated = 0usize;
    let mut kept: Vec<ButterflyCandidate<'_>> = strike_triples(chain)
        .inspect(|_| generated += 1)
        .map(|[low, body, high]| ButterflyCandidate::build(low, body, high, config.pricing))
        .filter(|candidate| filter::accept(candidate, config))
        .collect();

    rank::rank(&mut kept);

    debug!(
        symbol = %chain.symbol,
        strikes = chain.len(),
        candidates = generated,
        survivors = kept.len(),
        "scan complete"
    );

    Ok(kept.iter().map(ButterflyResult::from_candidate).collect())
}

/// Scan a full quote set for one symbol and expiry.
///
/// Restricts the quotes down to the matching call chain, then runs the
/// pipeline over it.
pub fn scan(
    quotes: &[Quote],
    symbol: &str,
    expiry: NaiveDate,
    config: &ScanConfig,
) -> Result<Vec<ButterflyResult>, ConfigError> {
    config.validate()?;
    let chain = OptionsChain::select(quotes, symbol, expiry);
    scan_chain(&chain, config)
}
