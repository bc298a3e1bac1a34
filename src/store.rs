//! Durable record store
//!
//! Generic load/save of JSON records with atomic-replace semantics. A
//! record is written to a temporary file in the destination directory and
//! renamed over the target, so readers never observe a truncated file.
//!
//! Load failures (missing file, unreadable content, schema mismatch) are
//! never fatal: the caller's default is substituted and a warning logged.
//! This trades strict durability for availability, which is the right
//! call for this low-stakes dataset.

use std::fs;
use std::io::Write;
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::AppResult;

/// Load a record from `path`, falling back to `default` on any failure.
pub fn load_or_default<T: DeserializeOwned>(path: &Path, default: T) -> T {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no prior state, using default");
            return default;
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "load failed, using default");
            return default;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "corrupt record, using default");
            default
        }
    }
}

/// Serialize `value` and atomically replace the file at `path`.
pub fn save<T: Serialize>(path: &Path, value: &T) -> AppResult<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir)?;

    let json = serde_json::to_vec_pretty(value)?;

    // Temp file must live in the same directory so the rename stays on
    // one filesystem.
    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(&json)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::collections::HashMap;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Record {
        count: u64,
        tags: HashMap<String, u64>,
    }

    fn sample() -> Record {
        let mut tags = HashMap::new();
        tags.insert("orca".to_string(), 3);
        Record { count: 42, tags }
    }

    #[test]
    fn missing_file_yields_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.json");
        let loaded = load_or_default(&path, sample());
        assert_eq!(loaded, sample());
    }

    #[test]
    fn corrupt_file_yields_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{not json at all").unwrap();
        let loaded = load_or_default(&path, sample());
        assert_eq!(loaded, sample());
    }

    #[test]
    fn schema_mismatch_yields_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wrong.json");
        fs::write(&path, r#"["a", "list", "not", "a", "record"]"#).unwrap();
        let loaded = load_or_default(&path, sample());
        assert_eq!(loaded, sample());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("record.json");
        let value = sample();
        save(&path, &value).unwrap();
        let loaded: Record = load_or_default(&path, Record { count: 0, tags: HashMap::new() });
        assert_eq!(loaded, value);

        // Saving the reloaded value is stable.
        save(&path, &loaded).unwrap();
        let again: Record = load_or_default(&path, Record { count: 0, tags: HashMap::new() });
        assert_eq!(again, value);
    }

    #[test]
    fn save_replaces_prior_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("record.json");
        save(&path, &sample()).unwrap();
        let updated = Record { count: 43, tags: HashMap::new() };
        save(&path, &updated).unwrap();
        let loaded: Record = load_or_default(&path, sample());
        assert_eq!(loaded, updated);
    }

    #[test]
    fn save_creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deep/nested/record.json");
        save(&path, &sample()).unwrap();
        assert_eq!(load_or_default(&path, Record { count: 0, tags: HashMap::new() }), sample());
    }
}
