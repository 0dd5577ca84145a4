//! Options-chain CSV loader.
//!
//! Loads a chain snapshot CSV into the type system for scanning. Expected
//! columns (case-insensitive): symbol, expiry, dte, strike, type, bid, ask,
//! mid (optional), delta, iv. When `mid` is absent it is derived as
//! `(bid + ask) / 2` here, once, so the scan pipeline never sees a quote
//! without one.
//!
//! Rows with missing or unparseable required fields are dropped rather than
//! failing the whole load, mirroring the lenient ingestion the rest of the
//! system expects from chain vendors.

use std::path::Path;

use chrono::NaiveDate;
use polars::prelude::*;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use thiserror::Error;

use super::types::{OptionType, Quote};

/// Columns that must be present after header normalization.
pub const REQUIRED_COLUMNS: &[&str] = &[
    "symbol", "expiry", "dte", "strike", "type", "bid", "ask", "delta", "iv",
];

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),

    #[error("Missing required columns in CSV: {0}")]
    MissingColumns(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Load an options-chain CSV into typed quotes.
pub fn load_chain_csv(path: impl AsRef<Path>) -> Result<Vec<Quote>, LoaderError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(LoaderError::FileNotFound(path.display().to_string()));
    }

    let lf = LazyCsvReader::new(path).with_has_header(true).finish()?;
    let mut df = lf.collect()?;

    normalize_headers(&mut df)?;

    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|n| n.to_string())
        .collect();
    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .filter(|c| !names.iter().any(|n| n == *c))
        .copied()
        .collect();
    if !missing.is_empty() {
        return Err(LoaderError::MissingColumns(missing.join(", ")));
    }

    let has_mid = names.iter().any(|n| n == "mid");

    // Coerce numeric columns up front so per-row extraction below only has
    // to deal with nulls.
    let mut casts = vec![
        col("dte").cast(DataType::Int32),
        col("strike").cast(DataType::Float64),
        col("bid").cast(DataType::Float64),
        col("ask").cast(DataType::Float64),
        col("delta").cast(DataType::Float64),
        col("iv").cast(DataType::Float64),
    ];
    if has_mid {
        casts.push(col("mid").cast(DataType::Float64));
    }
    let df = df.lazy().with_columns(casts).collect()?;

    dataframe_to_quotes(&df, has_mid)
}

/// Trim and lowercase column names in place.
fn normalize_headers(df: &mut DataFrame) -> Result<(), LoaderError> {
    let lowered: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|n| n.trim().to_lowercase())
        .collect();
    df.set_column_names(lowered)?;
    Ok(())
}

/// Convert a normalized DataFrame into typed quotes, one per valid row.
fn dataframe_to_quotes(df: &DataFrame, has_mid: bool) -> Result<Vec<Quote>, LoaderError> {
    let symbol_col = df.column("symbol")?.str()?;
    let expiry_col = df.column("expiry")?.str()?;
    let dte_col = df.column("dte")?.i32()?;
    let strike_col = df.column("strike")?.f64()?;
    let type_col = df.column("type")?.str()?;
    let bid_col = df.column("bid")?.f64()?;
    let ask_col = df.column("ask")?.f64()?;
    let delta_col = df.column("delta")?.f64()?;
    let iv_col = df.column("iv")?.f64()?;
    let mid_col = if has_mid {
        Some(df.column("mid")?.f64()?)
    } else {
        None
    };

    let mut quotes = Vec::with_capacity(df.height());

    for idx in 0..df.height() {
        let Some(symbol) = symbol_col.get(idx) else {
            continue;
        };
        let Some(expiry) = expiry_col
            .get(idx)
            .and_then(|s| NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok())
        else {
            continue;
        };
        let Some(dte) = dte_col.get(idx) else {
            continue;
        };
        // rows that can't be typed as call/put are dropped at this boundary
        let Some(option_type) = type_col.get(idx).and_then(OptionType::from_str) else {
            continue;
        };
        let Some(strike) = strike_col.get(idx).and_then(Decimal::from_f64) else {
            continue;
        };
        let Some(bid) = bid_col.get(idx).and_then(Decimal::from_f64) else {
            continue;
        };
        let Some(ask) = ask_col.get(idx).and_then(Decimal::from_f64) else {
            continue;
        };
        let Some(delta) = delta_col.get(idx) else {
            continue;
        };

        let mid = mid_col
            .as_ref()
            .and_then(|c| c.get(idx))
            .and_then(Decimal::from_f64)
            .unwrap_or_else(|| (bid + ask) / Decimal::TWO);

        quotes.push(Quote {
            symbol: symbol.trim().to_string(),
            expiry,
            dte,
            strike,
            option_type,
            bid,
            ask,
            mid,
            delta,
            iv: iv_col.get(idx).unwrap_or(0.0),
        });
    }

    Ok(quotes)
}
