use std::fs;
use std::path::{Path, PathBuf};

use symbols::SemanticModel;

/// Path of a file under the workspace `fixtures/` directory.
pub fn fixture_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("fixtures")
        .join(name)
}

pub fn load_fixture_model(name: &str) -> SemanticModel {
    SemanticModel::from_path(&fixture_path(name)).expect("Failed to load fixture model")
}

// copies a fixture into `dir` so tests can write next to it, e.g. a
// harmonize.toml, without touching the checked-in files
pub fn copy_fixture(dir: &Path, name: &str) -> PathBuf {
    let target = dir.join(name);
    fs::copy(fixture_path(name), &target).expect("Failed to copy fixture file");
    target
}

/// Writes `model` as a JSON dump into `dir`.
pub fn write_model(dir: &Path, name: &str, model: &SemanticModel) -> PathBuf {
    let target = dir.join(name);
    let json = model.to_json_string().expect("Failed to serialize model");
    fs::write(&target, json).expect("Failed to write model dump");
    target
}
