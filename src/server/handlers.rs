use std::sync::Arc;

use axum::{extract::State, Json};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::data::load_chain_csv;
use crate::scan::{scan, ButterflyResult, LegPricing, ScanConfig};
use crate::server::{error::AppError, AppState};

/// Scan request payload. Threshold fields are optional and overlay the
/// service defaults.
#[derive(Debug, Deserialize)]
pub struct ScanRequest {
    pub symbol: String,
    pub expiry: NaiveDate,
    /// Chain CSV, relative to the server's data directory.
    pub csv_path: Option<String>,
    pub min_dte: Option<i32>,
    pub max_dte: Option<i32>,
    pub min_credit: Option<Decimal>,
    pub short_delta_min: Option<f64>,
    pub short_delta_max: Option<f64>,
    pub pricing: Option<LegPricing>,
}

impl ScanRequest {
    /// Overlay the request's thresholds onto the defaults.
    pub fn config(&self) -> ScanConfig {
        let defaults = ScanConfig::default();
        ScanConfig {
            min_dte: self.min_dte.unwrap_or(defaults.min_dte),
            max_dte: self.max_dte.unwrap_or(defaults.max_dte),
            min_credit: self.min_credit.unwrap_or(defaults.min_credit),
            short_delta_min: self.short_delta_min.unwrap_or(defaults.short_delta_min),
            short_delta_max: self.short_delta_max.unwrap_or(defaults.short_delta_max),
            pricing: self.pricing.unwrap_or(defaults.pricing),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ScanResponse {
    pub results: Vec<ButterflyResult>,
}

/// # POST /api/scan
/// Loads the requested chain snapshot, runs the scan, and returns the
/// ranked candidates. Each request loads its own snapshot, so concurrent
/// scans never share mutable state.
pub async fn post_scan(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ScanRequest>,
) -> Result<Json<ScanResponse>, AppError> {
    let csv = request.csv_path.as_deref().unwrap_or(&state.default_csv);
    let path = state.data_dir.join(csv);

    let quotes = load_chain_csv(&path)?;
    let config = request.config();
    let results = scan(&quotes, &request.symbol, request.expiry, &config)?;

    tracing::info!(
        symbol = %request.symbol,
        expiry = %request.expiry,
        results = results.len(),
        "scan request served"
    );

    Ok(Json(ScanResponse { results }))
}
