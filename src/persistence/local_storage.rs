//! Browser LocalStorage backend

use super::{Backend, PersistenceError, Store};

const STORAGE_KEY: &str = "neon_dash_scores";

fn storage() -> Result<web_sys::Storage, PersistenceError> {
    web_sys::window()
        .ok_or_else(|| PersistenceError::Unavailable("no window".into()))?
        .local_storage()
        .map_err(|_| PersistenceError::Unavailable("localStorage access denied".into()))?
        .ok_or_else(|| PersistenceError::Unavailable("localStorage missing".into()))
}

/// Scores kept under a single LocalStorage key
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalStorageBackend;

impl Backend for LocalStorageBackend {
    fn read(&self) -> Result<Option<String>, PersistenceError> {
        storage()?
            .get_item(STORAGE_KEY)
            .map_err(|_| PersistenceError::Unavailable("localStorage read failed".into()))
    }

    fn write(&mut self, document: &str) -> Result<(), PersistenceError> {
        storage()?
            .set_item(STORAGE_KEY, document)
            .map_err(|_| PersistenceError::Unavailable("localStorage quota exceeded".into()))
    }
}

/// Score store persisted in the browser
pub type LocalStorageStore = Store<LocalStorageBackend>;

impl LocalStorageStore {
    pub fn browser() -> Self {
        Store::open(LocalStorageBackend)
    }
}
