pub mod json;
pub mod memory;

use std::fs;
use std::path::Path;

use crate::domain::contact::Contact;
use crate::errors::AppError;

pub use json::JsonFileStore;
pub use memory::MemStore;

/// Whole-list persistence seam. Every call reads or writes the entire
/// contact list; there is no partial update.
pub trait ContactStore: Send + Sync + 'static {
    fn load(&self) -> Result<Vec<Contact>, AppError>;

    fn save(&self, contacts: &[Contact]) -> Result<(), AppError>;

    fn medium(&self) -> &str;

    /// Run `f` while holding whatever exclusive access the medium offers.
    /// The default is no extra locking.
    fn exclusive<T, F>(&self, f: F) -> Result<T, AppError>
    where
        Self: Sized,
        F: FnOnce(&Self) -> Result<T, AppError>,
    {
        f(self)
    }
}

pub fn create_file_parent(path: &Path) -> Result<(), AppError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent).map_err(|e| AppError::storage(parent, e))?;
    }
    Ok(())
}
