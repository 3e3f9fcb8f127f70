// Chart series handed to the plotting side. All values leave this module in reais.
use super::region::RegionMapper;
use super::statistics::to_reais;
use crate::data::dataset::{Dataset, LevelColumns};
use crate::data::filter::RecordFilter;
use shared::models::{
    ChartBundle, EducationLevel, LevelTotal, Region, RegionShares, RegionSlice, RegionTotal,
    ScatterPoint, ScatterSeries, StatePoint,
};
use shared::utils::brazilian_format;
use std::collections::BTreeMap;

/// Per-state sums of each level, in cents, keyed by state code.
pub type StateSums = BTreeMap<String, [f64; 3]>;

/// `columns` must come from `filtered.level_columns()`.
pub fn build_bundle(
    filtered: &Dataset,
    columns: &LevelColumns,
    filter: &RecordFilter,
    level: EducationLevel,
    mapper: &RegionMapper,
) -> ChartBundle {
    let title_suffix = format!(" - Level{}", filter.title());
    let values = columns.get(level);
    let sums = state_sums(filtered, columns);
    ChartBundle {
        generated_at: chrono::Utc::now(),
        filter_title: filter.title().trim().to_string(),
        column: level.column_name().to_string(),
        level_totals: level_totals(columns),
        region_rollup: region_rollup(filtered, values, mapper)
            .into_iter()
            .map(|rt| RegionTotal { region: rt.region, total: to_reais(rt.total) })
            .collect(),
        region_shares: region_shares(filtered, level, values, mapper, &title_suffix),
        state_distribution: state_distribution(&sums, mapper),
        scatter: state_scatter(&sums, mapper),
    }
}

/// Bar chart: total of each level over the filtered rows.
pub fn level_totals(columns: &LevelColumns) -> Vec<LevelTotal> {
    EducationLevel::ALL
        .iter()
        .map(|level| {
            let total = to_reais(sum_present(columns.get(*level)));
            LevelTotal {
                level: *level,
                column: level.column_name().to_string(),
                display_name: level.display_name().to_string(),
                total,
                value_label: brazilian_format::format_currency_whole(total),
            }
        })
        .collect()
}

/// Sum of one level column per region, in the normalized source unit (cents).
///
/// Every region is present in the fixed order, zero when nothing maps to it.
/// Rows whose state has no region are left out.
pub fn region_rollup(dataset: &Dataset, values: &[Option<f64>], mapper: &RegionMapper) -> Vec<RegionTotal> {
    let mut totals: BTreeMap<Region, f64> = BTreeMap::new();
    for (record, value) in dataset.records().iter().zip(values) {
        if let (Some(region), Some(value)) = (mapper.region_for(&record.state_code), value) {
            *totals.entry(region).or_insert(0.0) += value;
        }
    }
    Region::ALL
        .iter()
        .map(|region| RegionTotal {
            region: *region,
            total: totals.get(region).copied().unwrap_or(0.0),
        })
        .collect()
}

/// Pie chart: share of each region over strictly positive values.
///
/// `None` when there is nothing positive to show.
pub fn region_shares(
    dataset: &Dataset,
    level: EducationLevel,
    values: &[Option<f64>],
    mapper: &RegionMapper,
    title_suffix: &str,
) -> Option<RegionShares> {
    let mut totals: BTreeMap<Region, f64> = BTreeMap::new();
    for (record, value) in dataset.records().iter().zip(values) {
        let value = match value {
            Some(v) if *v > 0.0 => to_reais(*v),
            _ => continue,
        };
        if let Some(region) = mapper.region_for(&record.state_code) {
            *totals.entry(region).or_insert(0.0) += value;
        }
    }
    if totals.is_empty() {
        tracing::info!(column = level.column_name(), "No positive values for the region pie");
        return None;
    }

    let total: f64 = totals.values().sum();
    if total <= 0.0 {
        return None;
    }

    let slices = Region::ALL
        .iter()
        .map(|region| {
            let value = totals.get(region).copied().unwrap_or(0.0);
            let percent = value / total * 100.0;
            let amount = brazilian_format::format_currency_whole(value);
            RegionSlice {
                region: *region,
                total: value,
                percent,
                slice_label: format!("{:.1}%\n{}", percent, amount),
                legend_label: format!("{} - {}", region.label(), amount),
            }
        })
        .collect();

    Some(RegionShares {
        title: format!("Share by region - {}{}", level.column_name(), title_suffix),
        total,
        slices,
    })
}

/// Boxplot input: per-state totals of every level, one point per (level, state).
pub fn state_distribution(sums: &StateSums, mapper: &RegionMapper) -> Vec<StatePoint> {
    EducationLevel::ALL
        .iter()
        .flat_map(|level| {
            sums.iter().map(move |(state, values)| StatePoint {
                state_code: state.clone(),
                level: *level,
                value: to_reais(values[level.index()]),
                region: mapper.region_for(state),
            })
        })
        .collect()
}

/// Scatter input: per-state totals for each pair of levels.
pub fn state_scatter(sums: &StateSums, mapper: &RegionMapper) -> Vec<ScatterSeries> {
    EducationLevel::PAIRS
        .iter()
        .map(|(x_level, y_level)| ScatterSeries {
            x_level: *x_level,
            y_level: *y_level,
            x_label: format!("{} (R$)", x_level.display_name()),
            y_label: format!("{} (R$)", y_level.display_name()),
            points: sums
                .iter()
                .map(|(state, values)| ScatterPoint {
                    state_code: state.clone(),
                    x: to_reais(values[x_level.index()]),
                    y: to_reais(values[y_level.index()]),
                    region: mapper.region_for(state),
                })
                .collect(),
        })
        .collect()
}

pub fn state_sums(dataset: &Dataset, columns: &LevelColumns) -> StateSums {
    let mut sums = StateSums::new();
    for (row, record) in dataset.records().iter().enumerate() {
        let entry = sums.entry(record.state_code.clone()).or_insert([0.0; 3]);
        for level in EducationLevel::ALL {
            if let Some(Some(value)) = columns.get(level).get(row) {
                entry[level.index()] += value;
            }
        }
    }
    sums
}

fn sum_present(values: &[Option<f64>]) -> f64 {
    values.iter().flatten().sum()
}
