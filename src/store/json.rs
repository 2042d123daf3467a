use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tempfile::NamedTempFile;
use tracing::{debug, trace};

use super::{ContactStore, create_file_parent};
use crate::domain::contact::Contact;
use crate::errors::AppError;

/// The contact list as a single pretty-printed JSON array on disk.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the parent directory and an empty list if the file is absent.
    /// Returns `true` when a new file was written.
    pub fn init(&self) -> Result<bool, AppError> {
        create_file_parent(&self.path)?;

        let mut file = match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
        {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => return Ok(false),
            Err(e) => return Err(AppError::storage(&self.path, e)),
        };

        file.write_all(b"[]")
            .map_err(|e| AppError::storage(&self.path, e))?;
        debug!(path = %self.path.display(), "initialized empty contact file");
        Ok(true)
    }

    fn lock_path(&self) -> PathBuf {
        let mut lock: OsString = self.path.clone().into_os_string();
        lock.push(".lock");
        PathBuf::from(lock)
    }

    /// The file a save should replace: the resolved target when the path
    /// is a symlink, the path itself when nothing exists there yet.
    fn write_target(&self) -> Result<PathBuf, AppError> {
        match fs::canonicalize(&self.path) {
            Ok(resolved) => Ok(resolved),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(self.path.clone()),
            Err(e) => Err(AppError::storage(&self.path, e)),
        }
    }
}

fn dir_of(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

impl ContactStore for JsonFileStore {
    fn load(&self) -> Result<Vec<Contact>, AppError> {
        let data = fs::read_to_string(&self.path).map_err(|e| AppError::storage(&self.path, e))?;

        serde_json::from_str(&data).map_err(|e| AppError::storage(&self.path, e))
    }

    fn save(&self, contacts: &[Contact]) -> Result<(), AppError> {
        let data =
            serde_json::to_string_pretty(contacts).map_err(|e| AppError::storage(&self.path, e))?;

        // Write beside the target and rename over it so readers never see a
        // half-written list. The replacement keeps the old file's mode.
        let target = self.write_target()?;
        let mut tmp =
            NamedTempFile::new_in(dir_of(&target)).map_err(|e| AppError::storage(&target, e))?;
        if let Ok(meta) = fs::metadata(&target) {
            tmp.as_file()
                .set_permissions(meta.permissions())
                .map_err(|e| AppError::storage(&target, e))?;
        }
        tmp.write_all(data.as_bytes())
            .and_then(|_| tmp.as_file().sync_all())
            .map_err(|e| AppError::storage(&target, e))?;
        tmp.persist(&target)
            .map_err(|e| AppError::storage(&target, e.error))?;

        trace!(path = %self.path.display(), count = contacts.len(), "contact file rewritten");
        Ok(())
    }

    fn medium(&self) -> &str {
        "json"
    }

    /// Holds an advisory lock on `<file>.lock` while `f` runs. The lock file
    /// is created on first use and left in place afterwards.
    fn exclusive<T, F>(&self, f: F) -> Result<T, AppError>
    where
        F: FnOnce(&Self) -> Result<T, AppError>,
    {
        let lock_path = self.lock_path();
        let lock: File = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&lock_path)
            .map_err(|e| AppError::storage(&lock_path, e))?;

        // Blocks while another writer, in this or any other process, holds it.
        lock.lock_exclusive()
            .map_err(|e| AppError::storage(&lock_path, e))?;

        // Released when `lock` is dropped.
        f(self)
    }
}
