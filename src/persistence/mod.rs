//! Best score and leaderboard persistence
//!
//! Features:
//! - Versionless JSON document holding the best score and top-5 table
//! - Pluggable backends (memory, file, LocalStorage on web)
//! - Read once at startup, written once per finished run
//! - Missing or corrupt data degrades to an empty table, never an abort

pub mod file;
#[cfg(target_arch = "wasm32")]
pub mod local_storage;

pub use file::{FileBackend, JsonFileStore};
#[cfg(target_arch = "wasm32")]
pub use local_storage::{LocalStorageBackend, LocalStorageStore};

use thiserror::Error;

use crate::highscores::{HighScoreEntry, HighScores};
use crate::platform::time::now_ms;

/// Errors raised by storage backends
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("storage i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("stored scores are malformed: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Raw document storage
pub trait Backend {
    /// Stored document, or `None` if nothing was saved yet
    fn read(&self) -> Result<Option<String>, PersistenceError>;
    fn write(&mut self, document: &str) -> Result<(), PersistenceError>;
}

/// What the game needs from score storage
pub trait ScoreStore {
    fn high_score(&self) -> u64;
    fn set_high_score(&mut self, score: u64);
    /// Record a finished run; returns the leaderboard afterwards
    fn record_run(&mut self, score: u64) -> Vec<HighScoreEntry>;
}

/// In-memory backend (tests, storage-less hosts)
#[derive(Debug, Default, Clone)]
pub struct MemoryBackend {
    pub document: Option<String>,
}

impl Backend for MemoryBackend {
    fn read(&self) -> Result<Option<String>, PersistenceError> {
        Ok(self.document.clone())
    }

    fn write(&mut self, document: &str) -> Result<(), PersistenceError> {
        self.document = Some(document.to_string());
        Ok(())
    }
}

/// Score store over any backend; keeps the table cached after the first read
#[derive(Debug)]
pub struct Store<B: Backend> {
    backend: B,
    table: HighScores,
}

/// Store that never touches disk
pub type MemoryStore = Store<MemoryBackend>;

impl MemoryStore {
    pub fn in_memory() -> Self {
        Store::open(MemoryBackend::default())
    }
}

impl<B: Backend> Store<B> {
    /// Load the table from `backend`, falling back to an empty one
    pub fn open(backend: B) -> Self {
        let table = match Self::load(&backend) {
            Ok(Some(table)) => {
                log::info!("Loaded {} high scores (best {})", table.entries.len(), table.best);
                table
            }
            Ok(None) => {
                log::info!("No high scores found, starting fresh");
                HighScores::new()
            }
            Err(err) => {
                log::warn!("Ignoring stored high scores: {err}");
                HighScores::new()
            }
        };
        Self { backend, table }
    }

    fn load(backend: &B) -> Result<Option<HighScores>, PersistenceError> {
        let Some(json) = backend.read()? else {
            return Ok(None);
        };
        let table: HighScores = serde_json::from_str(&json)?;
        Ok(Some(table.normalized()))
    }

    fn save(&mut self) {
        let result = serde_json::to_string(&self.table)
            .map_err(PersistenceError::from)
            .and_then(|json| self.backend.write(&json));
        match result {
            Ok(()) => log::info!("High scores saved ({} entries)", self.table.entries.len()),
            Err(err) => log::warn!("Failed to save high scores: {err}"),
        }
    }

    pub fn table(&self) -> &HighScores {
        &self.table
    }
}

impl<B: Backend> ScoreStore for Store<B> {
    fn high_score(&self) -> u64 {
        self.table.best
    }

    fn set_high_score(&mut self, score: u64) {
        if score > self.table.best {
            self.table.best = score;
            self.save();
        }
    }

    fn record_run(&mut self, score: u64) -> Vec<HighScoreEntry> {
        if let Some(rank) = self.table.add_score(score, now_ms()) {
            log::info!("Run scored {score}, rank #{rank}");
        }
        self.save();
        self.table.entries.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenBackend;

    impl Backend for BrokenBackend {
        fn read(&self) -> Result<Option<String>, PersistenceError> {
            Err(PersistenceError::Unavailable("no storage".into()))
        }

        fn write(&mut self, _document: &str) -> Result<(), PersistenceError> {
            Err(PersistenceError::Unavailable("no storage".into()))
        }
    }

    #[test]
    fn test_empty_store_reads_zero() {
        let store = MemoryStore::in_memory();
        assert_eq!(store.high_score(), 0);
        assert!(store.table().is_empty());
    }

    #[test]
    fn test_malformed_document_degrades_to_zero() {
        let backend = MemoryBackend {
            document: Some("{ definitely not scores".into()),
        };
        let store = Store::open(backend);
        assert_eq!(store.high_score(), 0);
    }

    #[test]
    fn test_unavailable_backend_is_harmless() {
        let mut store = Store::open(BrokenBackend);
        assert_eq!(store.high_score(), 0);
        let board = store.record_run(42);
        assert_eq!(board.len(), 1);
        assert_eq!(store.high_score(), 42);
    }

    #[test]
    fn test_record_run_persists_and_reloads() {
        let mut store = MemoryStore::in_memory();
        store.record_run(300);
        store.record_run(900);
        let board = store.record_run(500);
        let ranked: Vec<u64> = board.iter().map(|e| e.score).collect();
        assert_eq!(ranked, vec![900, 500, 300]);

        let reopened = Store::open(store.backend.clone());
        assert_eq!(reopened.high_score(), 900);
        assert_eq!(reopened.table().entries.len(), 3);
    }

    #[test]
    fn test_set_high_score_only_raises() {
        let mut store = MemoryStore::in_memory();
        store.set_high_score(700);
        store.set_high_score(100);
        assert_eq!(store.high_score(), 700);
    }
}
