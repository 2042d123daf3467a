use std::panic;
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::Mutex;
use tokio::task;
use tracing::{debug, info, warn};

use super::contact::Contact;
use super::validation::ContactSchema;
use crate::config::Config;
use crate::errors::AppError;
use crate::store::{ContactStore, JsonFileStore};

/// CRUD over a whole-list contact store.
///
/// Every call reloads the list from the store. Mutations run load, change and
/// save as one unit behind a writer gate, and also inside the store's
/// `exclusive` section. Two concurrent updates therefore both land instead
/// of one overwriting the other.
pub struct ContactManager<S: ContactStore> {
    store: Arc<S>,
    schema: ContactSchema,
    writer: Mutex<()>,
}

impl ContactManager<JsonFileStore> {
    /// Manager over the JSON file and schema named by `config`. The file is
    /// not created here; see [`JsonFileStore::init`].
    pub fn open(config: &Config) -> Result<Self, AppError> {
        let schema = ContactSchema::new(config.schema.clone())?;
        let store = JsonFileStore::new(&config.contacts_path);

        info!(path = %store.path().display(), "opened contact book");
        Ok(Self::new(store, schema))
    }
}

impl<S: ContactStore> ContactManager<S> {
    pub fn new(store: S, schema: ContactSchema) -> Self {
        Self {
            store: Arc::new(store),
            schema,
            writer: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub async fn list(&self) -> Result<Vec<Contact>, AppError> {
        let contacts = self.read().await?;
        debug!(count = contacts.len(), "listed contacts");
        Ok(contacts)
    }

    pub async fn get(&self, id: &str) -> Result<Option<Contact>, AppError> {
        let found = self.read().await?.into_iter().find(|c| c.id == id);
        debug!(id, found = found.is_some(), "looked up contact");
        Ok(found)
    }

    /// Validate `body`, give it a fresh id and put it at the front of the
    /// list. Nothing is written when validation fails.
    pub async fn add(&self, body: &Value) -> Result<Contact, AppError> {
        let new = self.schema.validate(body)?;
        let contact = Contact::from_new(new);

        let added = self
            .mutate(move |mut contacts| {
                contacts.insert(0, contact.clone());
                (Some(contacts), contact)
            })
            .await?;

        info!(id = %added.id, "added contact");
        Ok(added)
    }

    /// Replace the fields of contact `id` with the validated `body`. The
    /// updated record moves to the end of the list. Returns `None` without
    /// writing when no contact has that id.
    pub async fn update(&self, id: &str, body: &Value) -> Result<Option<Contact>, AppError> {
        let new = self.schema.validate(body)?;
        let target = id.to_string();

        let updated = self
            .mutate(move |mut contacts| {
                let Some(existing) = contacts.iter().find(|c| c.id == target).cloned() else {
                    return (None, None);
                };

                let updated = existing.merge(new);
                contacts.retain(|c| c.id != target);
                contacts.push(updated.clone());
                (Some(contacts), Some(updated))
            })
            .await?;

        match &updated {
            Some(_) => info!(id, "updated contact"),
            None => debug!(id, "update target not found"),
        }
        Ok(updated)
    }

    /// Drop contact `id` and return the remaining list, or `None` without
    /// writing when no contact has that id.
    pub async fn remove(&self, id: &str) -> Result<Option<Vec<Contact>>, AppError> {
        let target = id.to_string();

        let remaining = self
            .mutate(move |mut contacts| {
                if !contacts.iter().any(|c| c.id == target) {
                    return (None, None);
                }

                contacts.retain(|c| c.id != target);
                (Some(contacts.clone()), Some(contacts))
            })
            .await?;

        match &remaining {
            Some(_) => info!(id, "removed contact"),
            None => debug!(id, "remove target not found"),
        }
        Ok(remaining)
    }

    async fn read(&self) -> Result<Vec<Contact>, AppError> {
        let store = Arc::clone(&self.store);

        run_blocking(move || store.load())
            .await
            .inspect_err(|e| warn!(medium = self.store.medium(), error = %e, "failed to load contacts"))
    }

    /// Load, apply `change` and save if it hands back a new list. `change`
    /// returns the list to persist (`None` leaves storage untouched) and the
    /// caller's result.
    async fn mutate<T, F>(&self, change: F) -> Result<T, AppError>
    where
        T: Send + 'static,
        F: FnOnce(Vec<Contact>) -> (Option<Vec<Contact>>, T) + Send + 'static,
    {
        let _gate = self.writer.lock().await;
        let store = Arc::clone(&self.store);

        run_blocking(move || {
            store.exclusive(|s| {
                let (next, out) = change(s.load()?);
                if let Some(next) = next {
                    s.save(&next)?;
                }
                Ok(out)
            })
        })
        .await
        .inspect_err(|e| warn!(medium = self.store.medium(), error = %e, "contact write failed"))
    }
}

async fn run_blocking<T, F>(f: F) -> Result<T, AppError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, AppError> + Send + 'static,
{
    match task::spawn_blocking(f).await {
        Ok(result) => result,
        Err(e) if e.is_panic() => panic::resume_unwind(e.into_panic()),
        Err(e) => Err(AppError::Interrupted(e.to_string())),
    }
}
