//! JSON file backend for native builds

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{Backend, PersistenceError, Store};

/// Default score file name, relative to the working directory
pub const DEFAULT_SCORE_FILE: &str = "neon-dash-scores.json";

/// Scores kept in a single JSON file
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Backend for FileBackend {
    fn read(&self) -> Result<Option<String>, PersistenceError> {
        match fs::read_to_string(&self.path) {
            Ok(json) => Ok(Some(json)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write(&mut self, document: &str) -> Result<(), PersistenceError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        // Write beside the target then rename so a crash never leaves half a file
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, document)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// Score store persisted to a JSON file
pub type JsonFileStore = Store<FileBackend>;

impl JsonFileStore {
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Store::open(FileBackend::new(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::ScoreStore;

    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("neon-dash-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir.join("scores.json")
    }

    #[test]
    fn test_missing_file_starts_empty() {
        let path = scratch("missing");
        let store = JsonFileStore::at(&path);
        assert_eq!(store.high_score(), 0);
        assert!(!path.exists());
    }

    #[test]
    fn test_malformed_file_degrades_to_zero() {
        let path = scratch("malformed");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "[1, 2,").unwrap();

        let mut store = JsonFileStore::at(&path);
        assert_eq!(store.high_score(), 0);

        // The next write replaces the corrupt document
        store.record_run(120);
        let reopened = JsonFileStore::at(&path);
        assert_eq!(reopened.high_score(), 120);
    }

    #[test]
    fn test_round_trip_keeps_top_five() {
        let path = scratch("top5");
        let mut store = JsonFileStore::at(&path);
        for score in [10, 70, 30, 90, 50, 20, 80] {
            store.record_run(score);
        }

        let reopened = JsonFileStore::at(&path);
        let ranked: Vec<u64> = reopened.table().entries.iter().map(|e| e.score).collect();
        assert_eq!(ranked, vec![90, 80, 70, 50, 30]);
        assert_eq!(reopened.high_score(), 90);
    }

    #[test]
    fn test_legacy_document_without_best_field() {
        let path = scratch("legacy");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(
            &path,
            r#"{"entries":[{"score":40,"date":1.0},{"score":400,"date":2.0}]}"#,
        )
        .unwrap();

        let store = JsonFileStore::at(&path);
        assert_eq!(store.high_score(), 400);
        assert_eq!(store.table().top_score(), Some(400));
    }
}
