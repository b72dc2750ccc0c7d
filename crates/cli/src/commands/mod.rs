pub mod analyze;
pub mod resolve;
pub mod rules;

use analyzer::AnalyzerConfig;
use analyzer::config::CONFIG_FILE_NAME;
use anyhow::{Context, Result};
use std::path::Path;
use symbols::SemanticModel;
use tracing::info;

pub fn load_model(path: &Path) -> Result<SemanticModel> {
    SemanticModel::from_path(path)
        .with_context(|| format!("Failed to load symbol model from {}", path.display()))
}

/// The explicit file if given, else `harmonize.toml` beside the model, else
/// defaults.
pub fn load_config(explicit: Option<&Path>, model: Option<&Path>) -> Result<AnalyzerConfig> {
    let discovered = model
        .and_then(Path::parent)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .filter(|path| path.is_file());

    match explicit.map(Path::to_path_buf).or(discovered) {
        Some(path) => {
            info!("Using configuration {}", path.display());
            AnalyzerConfig::from_path(&path)
                .with_context(|| format!("Invalid configuration in {}", path.display()))
        }
        None => Ok(AnalyzerConfig::default()),
    }
}
