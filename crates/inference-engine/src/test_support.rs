//! Shared fixtures for inference-engine tests

use record_schema::EmployeeRecord;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Artifact directory shipped with the repository's test fixtures
pub(crate) fn fixture_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../fixtures/artifacts")
}

/// The documented sample employee
pub(crate) fn sample_record() -> EmployeeRecord {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../fixtures/sample_employee.json");
    let text = std::fs::read_to_string(path).unwrap();
    serde_json::from_str(&text).unwrap()
}

/// Temporary copy of the fixture artifacts, removed when dropped
pub(crate) fn scratch_fixtures() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for entry in std::fs::read_dir(fixture_dir()).unwrap() {
        let entry = entry.unwrap();
        std::fs::copy(entry.path(), dir.path().join(entry.file_name())).unwrap();
    }
    dir
}

/// Rewrite one JSON artifact in place
pub(crate) fn edit_artifact(dir: &Path, file: &str, edit: impl FnOnce(&mut serde_json::Value)) {
    let path = dir.join(file);
    let mut value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    edit(&mut value);
    std::fs::write(&path, value.to_string()).unwrap();
}
