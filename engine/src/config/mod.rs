// Analysis configuration
pub mod settings;

pub use settings::AnalysisSettings;
