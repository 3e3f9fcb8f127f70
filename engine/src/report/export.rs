// Writes chart bundles as JSON for an external plotting tool
use crate::error::AnalysisError;
use shared::models::ChartBundle;
use std::path::{Path, PathBuf};

pub fn bundle_file_name(bundle: &ChartBundle) -> String {
    format!(
        "pnate_{}_{}.json",
        bundle.column,
        bundle.generated_at.format("%Y%m%dT%H%M%S")
    )
}

/// Creates `dir` if needed and returns the path written.
pub fn write_bundle(dir: &Path, bundle: &ChartBundle) -> Result<PathBuf, AnalysisError> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(bundle_file_name(bundle));
    std::fs::write(&path, bundle.to_json_pretty()?)?;
    tracing::info!(path = %path.display(), column = %bundle.column, "Chart data exported");
    Ok(path)
}
