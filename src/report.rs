//! Terminal table rendering for scan results.
//!
//! The only place values get rounded: money to two decimals, score to
//! four. The core hands over full-precision numbers.

use comfy_table::{presets::UTF8_FULL, Table};

use crate::scan::ButterflyResult;

/// Render ranked results as a table, in the core's output order.
pub fn results_table(results: &[ButterflyResult]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec![
        "symbol",
        "expiry",
        "dte",
        "k1",
        "k2",
        "k3",
        "credit",
        "max_profit",
        "max_loss",
        "score",
    ]);

    for r in results {
        table.add_row(vec![
            r.symbol.clone(),
            r.expiry.to_string(),
            r.dte.to_string(),
            format!("{:.2}", r.k1),
            format!("{:.2}", r.k2),
            format!("{:.2}", r.k3),
            format!("{:.2}", r.credit),
            format!("{:.2}", r.max_profit),
            format!("{:.2}", r.max_loss),
            format!("{:.4}", r.score),
        ]);
    }

    table
}
