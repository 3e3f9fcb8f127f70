// Statistics, regional mapping and chart data for one analysis run
pub mod charts;
pub mod region;
pub mod statistics;

use crate::data::dataset::Dataset;
use crate::data::filter::RecordFilter;
use region::RegionMapper;
use shared::models::{ChartBundle, EducationLevel};
use statistics::DualSummary;

/// Result of analysing one column of a filtered view.
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub level: EducationLevel,
    pub rows: usize,
    pub summary: DualSummary,
    pub charts: ChartBundle,
}

pub fn analyze(
    filtered: &Dataset,
    filter: &RecordFilter,
    level: EducationLevel,
    mapper: &RegionMapper,
) -> AnalysisOutcome {
    let columns = filtered.level_columns();
    let summary = statistics::summarize_dual(columns.get(level));
    tracing::info!(
        column = level.column_name(),
        rows = filtered.len(),
        missing = summary.missing,
        "Statistics computed"
    );
    AnalysisOutcome {
        level,
        rows: filtered.len(),
        summary,
        charts: charts::build_bundle(filtered, &columns, filter, level, mapper),
    }
}
