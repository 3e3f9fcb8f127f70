// In-memory transfers dataset; every operation returns a new derived view
use super::filter::RecordFilter;
use shared::models::{EducationLevel, TransferRecord};
use shared::utils::brazilian_format;
use std::collections::BTreeSet;

/// Normalized cents of the three level columns, computed once per analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelColumns {
    columns: [Vec<Option<f64>>; 3],
}

impl LevelColumns {
    pub fn get(&self, level: EducationLevel) -> &[Option<f64>] {
        &self.columns[level.index()]
    }
}

#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<TransferRecord>,
}

impl Dataset {
    pub fn new(records: Vec<TransferRecord>) -> Self {
        Dataset { records }
    }

    pub fn records(&self) -> &[TransferRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Drops rows whose executing entity contains `keyword`, ignoring case.
    /// Rows without an entity are kept.
    pub fn without_entities_containing(&self, keyword: &str) -> Dataset {
        let keyword = keyword.to_uppercase();
        if keyword.is_empty() {
            return self.clone();
        }
        let kept: Vec<TransferRecord> = self
            .records
            .iter()
            .filter(|r| {
                r.executing_entity
                    .as_ref()
                    .map_or(true, |entity| !entity.to_uppercase().contains(&keyword))
            })
            .cloned()
            .collect();
        tracing::info!(
            keyword = %keyword,
            excluded = self.records.len() - kept.len(),
            remaining = kept.len(),
            "Excluded rows by executing entity"
        );
        Dataset::new(kept)
    }

    /// An empty result is a normal outcome, not an error.
    pub fn filter(&self, filter: &RecordFilter) -> Dataset {
        let records: Vec<TransferRecord> = self.records.iter().filter(|r| filter.matches(r)).cloned().collect();
        tracing::debug!(?filter, rows = records.len(), "Filter applied");
        Dataset::new(records)
    }

    /// Sorted unique state codes, for the state prompt.
    pub fn state_codes(&self) -> Vec<String> {
        self.records
            .iter()
            .map(|r| r.state_code.clone())
            .filter(|code| !code.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Normalized values of one level column in cents, `None` where the cell is unparseable.
    pub fn values(&self, level: EducationLevel) -> Vec<Option<f64>> {
        self.records
            .iter()
            .map(|r| brazilian_format::normalize_currency(r.raw_value(level)))
            .collect()
    }

    pub fn level_columns(&self) -> LevelColumns {
        LevelColumns {
            columns: EducationLevel::ALL.map(|level| self.values(level)),
        }
    }
}
