use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One row of the PNATE transfers file.
///
/// The three monetary fields keep the raw cell text; they are normalized to
/// cents on demand so that a malformed cell only ever becomes a missing value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferRecord {
    pub state_code: String,
    pub municipality: String,
    pub executing_entity: Option<String>,
    pub infantile: String,
    pub fundamental: String,
    pub secondary: String,
}

impl TransferRecord {
    pub fn raw_value(&self, level: EducationLevel) -> &str {
        match level {
            EducationLevel::Infantile => &self.infantile,
            EducationLevel::Fundamental => &self.fundamental,
            EducationLevel::Secondary => &self.secondary,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EducationLevel {
    Infantile,
    Fundamental,
    Secondary,
}

impl EducationLevel {
    pub const ALL: [EducationLevel; 3] = [
        EducationLevel::Infantile,
        EducationLevel::Fundamental,
        EducationLevel::Secondary,
    ];

    /// Level pairs compared in the per-state scatter views.
    pub const PAIRS: [(EducationLevel, EducationLevel); 3] = [
        (EducationLevel::Infantile, EducationLevel::Fundamental),
        (EducationLevel::Infantile, EducationLevel::Secondary),
        (EducationLevel::Fundamental, EducationLevel::Secondary),
    ];

    /// Position in [`EducationLevel::ALL`].
    pub fn index(&self) -> usize {
        match self {
            EducationLevel::Infantile => 0,
            EducationLevel::Fundamental => 1,
            EducationLevel::Secondary => 2,
        }
    }

    /// Header of the matching column in the source CSV.
    pub fn column_name(&self) -> &'static str {
        match self {
            EducationLevel::Infantile => "Prev_ed_infantil",
            EducationLevel::Fundamental => "Prev_ens_fundamental",
            EducationLevel::Secondary => "Prev_ens_medio",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            EducationLevel::Infantile => "Educação Infantil",
            EducationLevel::Fundamental => "Ensino Fundamental",
            EducationLevel::Secondary => "Ensino Médio",
        }
    }

    /// Maps the column menu answer ("1", "2", "3") to a level.
    pub fn from_menu_choice(choice: &str) -> Option<Self> {
        match choice.trim() {
            "1" => Some(EducationLevel::Infantile),
            "2" => Some(EducationLevel::Fundamental),
            "3" => Some(EducationLevel::Secondary),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Region {
    North,
    Northeast,
    CentralWest,
    Southeast,
    South,
}

impl Region {
    /// Fixed presentation order used by every regional rollup.
    pub const ALL: [Region; 5] = [
        Region::North,
        Region::Northeast,
        Region::CentralWest,
        Region::Southeast,
        Region::South,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Region::North => "North",
            Region::Northeast => "Northeast",
            Region::CentralWest => "Central-West",
            Region::Southeast => "Southeast",
            Region::South => "South",
        }
    }
}

/// Descriptive statistics in reais, rounded to two decimals.
///
/// `None` means the series had no usable value, which is different from zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsSummary {
    pub mean: Option<f64>,
    pub median: Option<f64>,
    pub mode: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub sum: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelTotal {
    pub level: EducationLevel,
    pub column: String,
    pub display_name: String,
    pub total: f64,
    pub value_label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionTotal {
    pub region: Region,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionSlice {
    pub region: Region,
    pub total: f64,
    pub percent: f64,
    pub slice_label: String,
    pub legend_label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionShares {
    pub title: String,
    pub total: f64,
    pub slices: Vec<RegionSlice>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatePoint {
    pub state_code: String,
    pub level: EducationLevel,
    pub value: f64,
    pub region: Option<Region>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterPoint {
    pub state_code: String,
    pub x: f64,
    pub y: f64,
    pub region: Option<Region>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterSeries {
    pub x_level: EducationLevel,
    pub y_level: EducationLevel,
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<ScatterPoint>,
}

/// Everything the plotting side needs for one analysis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartBundle {
    pub generated_at: DateTime<Utc>,
    pub filter_title: String,
    pub column: String,
    pub level_totals: Vec<LevelTotal>,
    pub region_rollup: Vec<RegionTotal>,
    pub region_shares: Option<RegionShares>,
    pub state_distribution: Vec<StatePoint>,
    pub scatter: Vec<ScatterSeries>,
}

impl ChartBundle {
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_choice_maps_to_columns() {
        assert_eq!(EducationLevel::from_menu_choice(" 2 "), Some(EducationLevel::Fundamental));
        assert_eq!(
            EducationLevel::from_menu_choice("3").map(|l| l.column_name()),
            Some("Prev_ens_medio")
        );
        assert_eq!(EducationLevel::from_menu_choice("4"), None);
        assert_eq!(EducationLevel::from_menu_choice(""), None);
    }

    #[test]
    fn test_index_matches_all_order() {
        for (idx, level) in EducationLevel::ALL.iter().enumerate() {
            assert_eq!(level.index(), idx);
        }
    }

    #[test]
    fn test_record_raw_value_by_level() {
        let record = TransferRecord {
            state_code: "SP".to_string(),
            municipality: "CAMPINAS".to_string(),
            executing_entity: None,
            infantile: "R$1,00".to_string(),
            fundamental: "R$2,00".to_string(),
            secondary: "R$3,00".to_string(),
        };
        assert_eq!(record.raw_value(EducationLevel::Infantile), "R$1,00");
        assert_eq!(record.raw_value(EducationLevel::Secondary), "R$3,00");
    }

    #[test]
    fn test_region_order_is_fixed() {
        let labels: Vec<&str> = Region::ALL.iter().map(|r| r.label()).collect();
        assert_eq!(labels, vec!["North", "Northeast", "Central-West", "Southeast", "South"]);
    }
}
