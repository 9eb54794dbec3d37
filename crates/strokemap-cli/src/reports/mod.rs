//! Report command handlers for the CLI.
//!
//! Called from `main` once the analysis context is built. Every handler is
//! read-only and prints either a fixed-width table or, with `--json`, the
//! underlying rows.

mod filter;
mod network;
mod ranking;
mod summary;

use serde::Serialize;
use strokemap_core::CertificationTier;

pub(crate) use filter::{run_filter, Selection};
pub(crate) use network::{run_matrix, run_pathways, run_transfer};
pub(crate) use ranking::{run_deserts, run_rank, run_zero_capability};
pub(crate) use summary::run_summary;

const NAME_WIDTH: usize = 40;

/// Format a distance for display, returning `"N/A"` when `None`.
fn fmt_miles(miles: Option<f64>) -> String {
    miles.map_or_else(|| "N/A".to_string(), |m| format!("{m:.1}"))
}

fn fmt_tier(tier: Option<CertificationTier>) -> &'static str {
    tier.map_or("None", CertificationTier::code)
}

fn fmt_flag(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() > width {
        format!("{}...", text.chars().take(width).collect::<String>())
    } else {
        text.to_string()
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
