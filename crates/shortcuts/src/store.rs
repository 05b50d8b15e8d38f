use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::StoreError;
use crate::serde_value::{RawContent, content_from_json};
use crate::state::{EditorConfig, EditorState};

pub const EDITOR_CONTENT_KEY: &str = "editorContent";

pub const APP_DIR_NAME: &str = "manos-shortcuts";

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One file per key (`<dir>/<key>.json`).
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn in_data_dir() -> Result<Self, StoreError> {
        let base = dirs::data_dir().ok_or(StoreError::DataDirNotFound)?;
        Ok(Self::new(base.join(APP_DIR_NAME)))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        debug!(path = %path.display(), "wrote store entry");
        Ok(())
    }
}

/// Reads the stored snapshot once at startup. Anything short of a valid
/// snapshot yields an empty document.
pub fn load_editor_state(store: &impl KeyValueStore, config: EditorConfig) -> EditorState {
    let stored = match store.get(EDITOR_CONTENT_KEY) {
        Ok(Some(stored)) => stored,
        Ok(None) => {
            debug!("no stored document, starting empty");
            return EditorState::create_empty(config);
        }
        Err(err) => {
            warn!(error = %err, "failed to read stored document, starting empty");
            return EditorState::create_empty(config);
        }
    };

    match content_from_json(&stored) {
        Ok(content) => EditorState::create_with_content(content, config),
        Err(err) => {
            warn!(error = %err, "stored document is unreadable, starting empty");
            EditorState::create_empty(config)
        }
    }
}

pub fn save_editor_state(
    store: &mut impl KeyValueStore,
    state: &EditorState,
) -> Result<(), StoreError> {
    let json = RawContent::from_content(state.content()).to_json()?;
    store.set(EDITOR_CONTENT_KEY, &json)?;
    info!(blocks = state.content().blocks().len(), "saved document");
    Ok(())
}
