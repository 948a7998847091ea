use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use obtain_logging::{obtain_info, obtain_warn};
use tempfile::NamedTempFile;
use thiserror::Error;

const PREFERENCES_FILENAME: &str = "preferences.ron";

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("preference store io error: {0}")]
    Io(#[from] io::Error),
    #[error("could not encode preferences: {0}")]
    Encode(#[from] ron::Error),
}

/// Small string key/value store kept in `<state dir>/preferences.ron`.
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    dir: PathBuf,
}

impl PreferenceStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(PREFERENCES_FILENAME)
    }

    /// Missing or unreadable files read as empty.
    pub fn load(&self) -> BTreeMap<String, String> {
        let path = self.path();
        let content = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return BTreeMap::new(),
            Err(err) => {
                obtain_warn!("Failed to read preferences from {:?}: {}", path, err);
                return BTreeMap::new();
            }
        };

        match ron::from_str(&content) {
            Ok(entries) => entries,
            Err(err) => {
                obtain_warn!("Failed to parse preferences from {:?}: {}", path, err);
                BTreeMap::new()
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.load().remove(key)
    }

    pub fn set(&self, key: &str, value: &str) -> Result<(), PersistError> {
        let mut entries = self.load();
        entries.insert(key.to_string(), value.to_string());
        self.write(&entries)?;
        obtain_info!("Stored preference {}={}", key, value);
        Ok(())
    }

    fn write(&self, entries: &BTreeMap<String, String>) -> Result<(), PersistError> {
        fs::create_dir_all(&self.dir)?;
        let content = ron::ser::to_string_pretty(entries, ron::ser::PrettyConfig::new())?;
        write_atomic(&self.dir, &self.path(), content.as_bytes())
    }
}

fn write_atomic(dir: &Path, target: &Path, bytes: &[u8]) -> Result<(), PersistError> {
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file_mut().sync_all()?;
    tmp.persist(target).map_err(|err| err.error)?;
    Ok(())
}
