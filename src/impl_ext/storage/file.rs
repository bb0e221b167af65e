use std::{
    fs, io,
    path::{Path, PathBuf},
    sync::LazyLock,
};

use regex::Regex;

use crate::{entities::KeyValueStore, errors::LedgerError};

const KEY_REGEX: &str = r"^[A-Za-z0-9_-]+$";
static KEY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(KEY_REGEX).expect("valid key regex"));

/// Key-value store backed by one file per key inside a directory. Writes go
/// through a temporary file and a rename, so a reader never sees a partial
/// snapshot.
pub struct FileKeyValueStore {
    dir: PathBuf,
}

impl FileKeyValueStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Result<Self, LedgerError> {
        let dir = dir.as_ref().to_path_buf();
        let label = dir.display().to_string();
        fs::create_dir_all(&dir).map_err(|e| LedgerError::persistence(&label, &e))?;
        Ok(Self { dir })
    }

    fn path(&self, key: &str) -> Result<PathBuf, LedgerError> {
        if !KEY_PATTERN.is_match(key) {
            return Err(LedgerError::persistence(key, &"invalid key"));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, LedgerError> {
        match fs::read_to_string(self.path(key)?) {
            Ok(s) => Ok(Some(s)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(LedgerError::persistence(key, &e)),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), LedgerError> {
        let path = self.path(key)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).map_err(|e| LedgerError::persistence(key, &e))?;
        fs::rename(&tmp, &path).map_err(|e| LedgerError::persistence(key, &e))
    }

    fn remove(&self, key: &str) -> Result<(), LedgerError> {
        match fs::remove_file(self.path(key)?) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(LedgerError::persistence(key, &e)),
        }
    }
}
