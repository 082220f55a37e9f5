//! # File I/O Module
//!
//! Session snapshot persistence:
//! - **Atomic saves**: write to `.tmp`, fsync, rename over the target
//! - **Version validation**: refuse snapshots from an incompatible schema
//!
//! ## File Format
//!
//! Snapshots are pretty-printed JSON of [`SessionSnapshot`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use loadcalc_core::file_io::{load_snapshot, save_snapshot};
//! use loadcalc_core::scenarios::CalculatorKind;
//! use loadcalc_core::session::SessionSnapshot;
//! use std::path::Path;
//!
//! let snapshot = SessionSnapshot::new(CalculatorKind::Residential, "small_home");
//! let path = Path::new("loadcalc-session.json");
//!
//! save_snapshot(&snapshot, path)?;
//! let loaded = load_snapshot(path)?;
//! assert_eq!(loaded.session_id, snapshot.session_id);
//! # Ok::<(), loadcalc_core::errors::CalcError>(())
//! ```

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::errors::{CalcError, CalcResult};
use crate::session::{SessionSnapshot, SCHEMA_VERSION};

/// Temp path next to the target: `session.json` -> `session.json.tmp`
fn tmp_path_for(path: &Path) -> PathBuf {
    let mut tmp_path = path.to_path_buf();
    let extension = tmp_path
        .extension()
        .map(|e| format!("{}.tmp", e.to_string_lossy()))
        .unwrap_or_else(|| "tmp".to_string());
    tmp_path.set_extension(extension);
    tmp_path
}

/// Save a snapshot with atomic write semantics.
///
/// The snapshot is serialized, written to a temporary sibling file, synced
/// to disk, then renamed over `path`. An interrupted save leaves the
/// previous snapshot intact.
pub fn save_snapshot(snapshot: &SessionSnapshot, path: &Path) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(snapshot)?;

    let tmp_path = tmp_path_for(path);

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(json.as_bytes()).map_err(|e| {
        CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        CalcError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    info!(
        path = %path.display(),
        scenario = %snapshot.scenario_id,
        step = snapshot.step_index,
        "saved session snapshot"
    );
    Ok(())
}

/// Load a snapshot from a file.
///
/// # Returns
///
/// * `Ok(SessionSnapshot)` - Successfully loaded snapshot
/// * `Err(CalcError::VersionMismatch)` - File version is incompatible
/// * `Err(CalcError::SerializationError)` - Invalid JSON
/// * `Err(CalcError::FileError)` - I/O error
pub fn load_snapshot(path: &Path) -> CalcResult<SessionSnapshot> {
    let mut file = File::open(path)
        .map_err(|e| CalcError::file_error("open", path.display().to_string(), e.to_string()))?;

    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;

    let snapshot: SessionSnapshot =
        serde_json::from_str(&contents).map_err(|e| CalcError::SerializationError {
            reason: format!("Invalid JSON in {}: {}", path.display(), e),
        })?;

    validate_version(&snapshot.version)?;

    info!(
        path = %path.display(),
        session = %snapshot.session_id,
        scenario = %snapshot.scenario_id,
        "loaded session snapshot"
    );
    Ok(snapshot)
}

/// Validate that a file version is compatible with the current schema.
fn validate_version(file_version: &str) -> CalcResult<()> {
    let mismatch = || CalcError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let file_parts: Vec<u32> = file_version
        .split('.')
        .filter_map(|p| p.parse().ok())
        .collect();
    let current_parts: Vec<u32> = SCHEMA_VERSION
        .split('.')
        .filter_map(|p| p.parse().ok())
        .collect();

    if file_parts.is_empty() || current_parts.is_empty() {
        return Err(mismatch());
    }

    if file_parts[0] != current_parts[0] {
        return Err(mismatch());
    }

    // 0.x: a newer minor may carry breaking changes
    if current_parts[0] == 0
        && file_parts.len() > 1
        && current_parts.len() > 1
        && file_parts[1] > current_parts[1]
    {
        return Err(mismatch());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenarios::CalculatorKind;
    use crate::steps::{Answers, StepId};
    use std::env::temp_dir;

    fn temp_snapshot_path(name: &str) -> PathBuf {
        temp_dir().join(format!("loadcalc_test_{}.json", name))
    }

    #[test]
    fn test_tmp_path_generation() {
        assert_eq!(
            tmp_path_for(Path::new("/saves/session.json")),
            Path::new("/saves/session.json.tmp")
        );
        assert_eq!(tmp_path_for(Path::new("/saves/session")), Path::new("/saves/session.tmp"));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let path = temp_snapshot_path("roundtrip");

        let mut snapshot = SessionSnapshot::new(CalculatorKind::Residential, "small_home");
        let answers: Answers = [(StepId::new("general_lighting"), 3_600.0)].into_iter().collect();
        snapshot.record(1, &answers);
        save_snapshot(&snapshot, &path).unwrap();

        let loaded = load_snapshot(&path).unwrap();
        assert_eq!(loaded, snapshot);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_atomic_save_creates_no_tmp_file() {
        let path = temp_snapshot_path("atomic");
        let snapshot = SessionSnapshot::new(CalculatorKind::Commercial, "retail_store");

        save_snapshot(&snapshot, &path).unwrap();

        assert!(!tmp_path_for(&path).exists());
        assert!(path.exists());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_rejects_newer_schema() {
        let path = temp_snapshot_path("newer_schema");
        let mut snapshot = SessionSnapshot::new(CalculatorKind::Residential, "cottage");
        snapshot.version = "0.9.0".to_string();
        save_snapshot(&snapshot, &path).unwrap();

        let err = load_snapshot(&path).unwrap_err();
        assert_eq!(err.error_code(), "VERSION_MISMATCH");

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_missing_and_garbage() {
        let missing = temp_snapshot_path("does_not_exist");
        let _ = fs::remove_file(&missing);
        assert_eq!(load_snapshot(&missing).unwrap_err().error_code(), "FILE_ERROR");

        let garbage = temp_snapshot_path("garbage");
        fs::write(&garbage, "{ not json").unwrap();
        assert_eq!(load_snapshot(&garbage).unwrap_err().error_code(), "SERIALIZATION_ERROR");
        let _ = fs::remove_file(&garbage);
    }

    #[test]
    fn test_version_validation() {
        assert!(validate_version(SCHEMA_VERSION).is_ok());
        assert!(validate_version("0.1.0").is_ok());
        assert!(validate_version("0.1.7").is_ok());
        assert!(validate_version("0.0.9").is_ok());

        assert!(validate_version("1.0.0").is_err());
        assert!(validate_version("0.2.0").is_err());
        assert!(validate_version("invalid").is_err());
    }
}
