use shared::models::Region;
use std::collections::HashMap;

const STATE_GROUPS: [(Region, &[&str]); 5] = [
    (Region::North, &["AC", "AP", "AM", "PA", "RO", "RR", "TO"]),
    (Region::Northeast, &["AL", "BA", "CE", "MA", "PB", "PE", "PI", "RN", "SE"]),
    (Region::CentralWest, &["DF", "GO", "MS", "MT"]),
    (Region::Southeast, &["ES", "MG", "RJ", "SP"]),
    (Region::South, &["PR", "RS", "SC"]),
];

/// State code to region lookup, built once and only read afterwards.
#[derive(Debug, Clone)]
pub struct RegionMapper {
    table: HashMap<&'static str, Region>,
}

impl RegionMapper {
    pub fn new() -> Self {
        let table = STATE_GROUPS
            .iter()
            .flat_map(|(region, codes)| codes.iter().map(move |code| (*code, *region)))
            .collect();
        RegionMapper { table }
    }

    /// `None` for codes outside the 27 federative units.
    pub fn region_for(&self, state_code: &str) -> Option<Region> {
        self.table.get(state_code.trim().to_uppercase().as_str()).copied()
    }

    pub fn state_count(&self) -> usize {
        self.table.len()
    }
}

impl Default for RegionMapper {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_27_codes_map_to_one_region() {
        let mapper = RegionMapper::new();
        assert_eq!(mapper.state_count(), 27);
        for (region, codes) in STATE_GROUPS {
            for code in codes {
                assert_eq!(mapper.region_for(code), Some(region), "{code}");
            }
        }
    }

    #[test]
    fn test_known_examples() {
        let mapper = RegionMapper::new();
        assert_eq!(mapper.region_for("SP"), Some(Region::Southeast));
        assert_eq!(mapper.region_for("df"), Some(Region::CentralWest));
        assert_eq!(mapper.region_for(" RS "), Some(Region::South));
    }

    #[test]
    fn test_unknown_codes_have_no_region() {
        let mapper = RegionMapper::new();
        for code in ["", "XX", "BR", "S", "SPP", "nan"] {
            assert_eq!(mapper.region_for(code), None, "{code}");
        }
    }
}
