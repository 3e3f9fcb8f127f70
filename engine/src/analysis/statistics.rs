// Descriptive statistics over a cents series, reported in reais
use shared::models::StatsSummary;

/// One row of the report table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Measure {
    Mean,
    Median,
    Mode,
    Minimum,
    Maximum,
    TotalSum,
}

impl Measure {
    pub const ALL: [Measure; 6] = [
        Measure::Mean,
        Measure::Median,
        Measure::Mode,
        Measure::Minimum,
        Measure::Maximum,
        Measure::TotalSum,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Measure::Mean => "Mean",
            Measure::Median => "Median",
            Measure::Mode => "Mode",
            Measure::Minimum => "Minimum",
            Measure::Maximum => "Maximum",
            Measure::TotalSum => "Total sum",
        }
    }

    pub fn pick(&self, summary: &StatsSummary) -> Option<f64> {
        match self {
            Measure::Mean => summary.mean,
            Measure::Median => summary.median,
            Measure::Mode => summary.mode,
            Measure::Minimum => summary.min,
            Measure::Maximum => summary.max,
            Measure::TotalSum => Some(summary.sum),
        }
    }
}

/// The "with zeros" and "without zeros" views the report always shows together.
#[derive(Debug, Clone, PartialEq)]
pub struct DualSummary {
    pub with_zeros: StatsSummary,
    pub without_zeros: StatsSummary,
    pub count: usize,
    pub missing: usize,
}

pub fn to_reais(cents: f64) -> f64 {
    cents / 100.0
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Missing entries are skipped by every measure. An empty series has no
/// mean/median/mode/min/max, and a sum of zero.
pub fn summarize(cents: &[Option<f64>]) -> StatsSummary {
    let mut present: Vec<f64> = cents.iter().flatten().copied().filter(|v| !v.is_nan()).collect();
    present.sort_by(f64::total_cmp);

    let reais = |v: f64| round2(to_reais(v));
    let sum: f64 = present.iter().sum();

    StatsSummary {
        mean: mean(&present).map(reais),
        median: median(&present).map(reais),
        mode: mode(&present).map(reais),
        min: present.first().copied().map(reais),
        max: present.last().copied().map(reais),
        sum: reais(sum),
    }
}

pub fn summarize_dual(cents: &[Option<f64>]) -> DualSummary {
    let positive: Vec<Option<f64>> = cents
        .iter()
        .filter(|v| matches!(v, Some(x) if *x > 0.0))
        .copied()
        .collect();

    DualSummary {
        with_zeros: summarize(cents),
        without_zeros: summarize(&positive),
        count: cents.len(),
        missing: cents.iter().filter(|v| v.map_or(true, f64::is_nan)).count(),
    }
}

fn mean(sorted: &[f64]) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    Some(sorted.iter().sum::<f64>() / sorted.len() as f64)
}

fn median(sorted: &[f64]) -> Option<f64> {
    let n = sorted.len();
    match n {
        0 => None,
        _ if n % 2 == 0 => Some((sorted[n / 2 - 1] + sorted[n / 2]) / 2.0),
        _ => Some(sorted[n / 2]),
    }
}

// Smallest of the most frequent values.
fn mode(sorted: &[f64]) -> Option<f64> {
    let mut best: Option<(f64, usize)> = None;
    let mut i = 0;
    while i < sorted.len() {
        let value = sorted[i];
        let run = sorted[i..].iter().take_while(|v| **v == value).count();
        if best.map_or(true, |(_, count)| run > count) {
            best = Some((value, run));
        }
        i += run;
    }
    best.map(|(value, _)| value)
}
