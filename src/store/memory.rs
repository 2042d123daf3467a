use std::sync::{Mutex, PoisonError};

use super::ContactStore;
use crate::domain::contact::Contact;
use crate::errors::AppError;

/// In-memory list, for embedding hosts and tests that don't need a file.
#[derive(Debug, Default)]
pub struct MemStore {
    data: Mutex<Vec<Contact>>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contacts(contacts: Vec<Contact>) -> Self {
        Self {
            data: Mutex::new(contacts),
        }
    }
}

impl ContactStore for MemStore {
    fn load(&self) -> Result<Vec<Contact>, AppError> {
        Ok(self
            .data
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn save(&self, contacts: &[Contact]) -> Result<(), AppError> {
        *self.data.lock().unwrap_or_else(PoisonError::into_inner) = contacts.to_vec();
        Ok(())
    }

    fn medium(&self) -> &str {
        "mem"
    }
}
