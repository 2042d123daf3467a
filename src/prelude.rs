pub use crate::config::Config;
pub use crate::domain::{
    contact::{self, Contact, NewContact},
    manager::ContactManager,
    validation::{ContactSchema, SchemaConfig},
};
pub use crate::errors::{AppError, ErrorKind, StorageFault};
pub use crate::store::{self, ContactStore, JsonFileStore, MemStore};
