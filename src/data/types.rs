//! Core data types for the butterfly scanner.
//!
//! A `Quote` is one normalized options-chain row; an `OptionsChain` is the
//! immutable call-side slice of the chain for a single symbol and expiry
//! that the scan pipeline consumes.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Option type (call or put).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    Call,
    Put,
}

impl OptionType {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "C" | "CALL" | "CALLS" => Some(Self::Call),
            "P" | "PUT" | "PUTS" => Some(Self::Put),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Call => "C",
            Self::Put => "P",
        }
    }
}

/// A single option quote.
///
/// Immutable once constructed; uniquely identified by
/// (symbol, expiry, strike, option_type). `mid` is always populated: the
/// loader derives it from bid/ask when the source omits it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quote {
    /// Underlying symbol (e.g., "XYZ")
    pub symbol: String,

    /// Option expiration date
    pub expiry: NaiveDate,

    /// Days to expiry
    pub dte: i32,

    /// Strike price
    pub strike: Decimal,

    /// Option type (call or put)
    pub option_type: OptionType,

    /// Bid price
    pub bid: Decimal,

    /// Ask price
    pub ask: Decimal,

    /// Mid price
    pub mid: Decimal,

    /// Delta, in [-1, 1]
    pub delta: f64,

    /// Implied volatility (pass-through only)
    pub iv: f64,
}

impl Quote {
    /// Bid-ask spread in price terms.
    pub fn spread(&self) -> Decimal {
        self.ask - self.bid
    }
}

/// The call-side options chain for one symbol and one expiry.
///
/// Calls are held sorted by strike with duplicate strikes removed, so index
/// order is strike order. This is the snapshot a scan runs against; nothing
/// in the pipeline mutates it.
#[derive(Debug, Clone, Default)]
pub struct OptionsChain {
    /// Underlying symbol
    pub symbol: String,

    /// Expiration date shared by every quote in the chain
    pub expiry: Option<NaiveDate>,

    /// Call quotes sorted by ascending strike
    pub calls: Vec<Quote>,
}

impl OptionsChain {
    /// Restrict a full quote set down to the calls for one symbol/expiry.
    ///
    /// Quotes for other symbols, other expiries, and puts are dropped.
    /// When the source carries more than one quote at the same strike the
    /// first one wins.
    pub fn select(quotes: &[Quote], symbol: &str, expiry: NaiveDate) -> Self {
        let mut calls: Vec<Quote> = quotes
            .iter()
            .filter(|q| {
                q.option_type == OptionType::Call && q.symbol == symbol && q.expiry == expiry
            })
            .cloned()
            .collect();
        calls.sort_by(|a, b| a.strike.cmp(&b.strike));
        calls.dedup_by_key(|q| q.strike);

        Self {
            symbol: symbol.to_string(),
            expiry: Some(expiry),
            calls,
        }
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    /// All distinct strikes, ascending.
    pub fn strikes(&self) -> Vec<Decimal> {
        self.calls.iter().map(|q| q.strike).collect()
    }

    /// Days to expiry shared by the chain; None for an empty chain.
    pub fn dte(&self) -> Option<i32> {
        self.calls.first().map(|q| q.dte)
    }
}
