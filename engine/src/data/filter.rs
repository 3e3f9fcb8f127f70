use shared::models::TransferRecord;

/// Row selection chosen from the main menu.
///
/// State codes and municipality names are trimmed and uppercased on
/// construction, and compared against the equally normalized record fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordFilter {
    All,
    State(String),
    Municipality(String),
}

impl RecordFilter {
    pub fn state(code: &str) -> Self {
        RecordFilter::State(normalize(code))
    }

    pub fn municipality(name: &str) -> Self {
        RecordFilter::Municipality(normalize(name))
    }

    pub fn matches(&self, record: &TransferRecord) -> bool {
        match self {
            RecordFilter::All => true,
            RecordFilter::State(code) => normalize(&record.state_code) == *code,
            RecordFilter::Municipality(name) => normalize(&record.municipality) == *name,
        }
    }

    /// Suffix appended to chart titles.
    pub fn title(&self) -> String {
        match self {
            RecordFilter::All => " (Brasil)".to_string(),
            RecordFilter::State(code) => format!(" (Estado - {})", code),
            RecordFilter::Municipality(name) => format!(" (Municipio - {})", name),
        }
    }
}

fn normalize(text: &str) -> String {
    text.trim().to_uppercase()
}
