//! Scan thresholds and pricing policy.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How a candidate's legs are priced when computing net credit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LegPricing {
    /// Mid price for every leg.
    #[default]
    Mid,
    /// Natural prices: bid for the short legs, ask for the long legs.
    Natural,
}

/// Thresholds applied by the filter pipeline.
///
/// The defaults are the service-wide defaults callers get when they leave
/// a threshold unset; there is no other source of ambient configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Minimum days to expiry.
    pub min_dte: i32,
    /// Maximum days to expiry.
    pub max_dte: i32,
    /// Minimum net credit received per share.
    pub min_credit: Decimal,
    /// Minimum delta for the short strike (absolute value).
    pub short_delta_min: f64,
    /// Maximum delta for the short strike (absolute value).
    pub short_delta_max: f64,
    /// Leg pricing policy for net credit.
    #[serde(default)]
    pub pricing: LegPricing,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            min_dte: 1,
            max_dte: 10,
            min_credit: dec!(0.50),
            short_delta_min: 0.20,
            short_delta_max: 0.35,
            pricing: LegPricing::Mid,
        }
    }
}

/// Malformed threshold configuration, rejected before any computation.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("min_dte ({min}) exceeds max_dte ({max})")]
    DteWindow { min: i32, max: i32 },

    #[error("min_dte must be non-negative, got {0}")]
    NegativeDte(i32),

    #[error("min_credit must be non-negative, got {0}")]
    NegativeCredit(Decimal),

    #[error("short delta band [{min}, {max}] is invalid")]
    DeltaBand { min: f64, max: f64 },
}

impl ScanConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_dte < 0 {
            return Err(ConfigError::NegativeDte(self.min_dte));
        }
        if self.min_dte > self.max_dte {
            return Err(ConfigError::DteWindow {
                min: self.min_dte,
                max: self.max_dte,
            });
        }
        if self.min_credit < Decimal::ZERO {
            return Err(ConfigError::NegativeCredit(self.min_credit));
        }
        let band_ok = self.short_delta_min >= 0.0
            && self.short_delta_max <= 1.0
            && self.short_delta_min <= self.short_delta_max;
        if !band_ok {
            return Err(ConfigError::DeltaBand {
                min: self.short_delta_min,
                max: self.short_delta_max,
            });
        }
        Ok(())
    }
}
