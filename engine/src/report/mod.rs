// Text report printed after each analysis
pub mod export;

use crate::analysis::statistics::{DualSummary, Measure};
use crate::analysis::AnalysisOutcome;
use shared::models::{RegionShares, RegionTotal};
use shared::utils::brazilian_format;

const TABLE_WIDTH: usize = 65;
const CURRENCY_PREFIX: &str = "R$";

/// The fixed-width statistics table plus the data type / missing values line.
pub fn render_table(summary: &DualSummary) -> String {
    let mut out = String::new();
    out.push_str(&"=".repeat(TABLE_WIDTH));
    out.push('\n');
    out.push_str(&format!("{:<12} | {:^22} | {:^22}\n", "Measure", "With zeros", "Without zeros"));
    out.push_str(&"-".repeat(TABLE_WIDTH));
    out.push('\n');
    for measure in Measure::ALL {
        let with_zeros = cell(measure.pick(&summary.with_zeros));
        let without_zeros = cell(measure.pick(&summary.without_zeros));
        out.push_str(&format!("{:<12} | {:>22} | {:>22}\n", measure.label(), with_zeros, without_zeros));
    }
    out.push_str(&"=".repeat(TABLE_WIDTH));
    out.push('\n');
    out.push_str(&format!("Data type: f64 | Missing values: {}\n", summary.missing));
    out
}

// Keeps "R$" flush left and the amount right-aligned inside the cell.
fn cell(value: Option<f64>) -> String {
    let text = brazilian_format::format_optional(value);
    match text.strip_prefix(CURRENCY_PREFIX) {
        Some(amount) => format!("{:<3}{:>18}", CURRENCY_PREFIX, amount),
        None => text,
    }
}

pub fn render_region_rollup(column: &str, rollup: &[RegionTotal]) -> String {
    let mut out = format!("Totals by region - {}\n", column);
    for entry in rollup {
        out.push_str(&format!(
            "  {:<14}{:>22}\n",
            entry.region.label(),
            brazilian_format::format_currency(entry.total)
        ));
    }
    out
}

pub fn render_region_shares(shares: Option<&RegionShares>) -> String {
    match shares {
        None => "No positive values to build the region shares.\n".to_string(),
        Some(shares) => {
            let mut out = format!("{}\n", shares.title);
            for slice in &shares.slices {
                out.push_str(&format!("  {:<14}{:>6.1}%\n", slice.region.label(), slice.percent));
            }
            out
        }
    }
}

pub fn render_outcome(outcome: &AnalysisOutcome) -> String {
    let mut out = format!(
        "\nColumn {} {} - {} rows\n",
        outcome.level.column_name(),
        outcome.charts.filter_title,
        outcome.rows
    );
    out.push_str(&render_table(&outcome.summary));
    out.push('\n');
    out.push_str(&render_region_rollup(&outcome.charts.column, &outcome.charts.region_rollup));
    out.push('\n');
    out.push_str(&render_region_shares(outcome.charts.region_shares.as_ref()));
    out
}
