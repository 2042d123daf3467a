use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A persisted contact record. On disk it has exactly these four string
/// fields, in this order.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct Contact {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// Validated input body. Never carries an id; ids are assigned by the store.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct NewContact {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl Contact {
    pub fn new(name: String, email: String, phone: String) -> Self {
        Contact {
            id: generate_id(),
            name,
            email,
            phone,
        }
    }

    pub fn from_new(new: NewContact) -> Self {
        Contact::new(new.name, new.email, new.phone)
    }

    /// Overwrite the editable fields, keeping the id.
    pub fn merge(mut self, new: NewContact) -> Self {
        self.name = new.name;
        self.email = new.email;
        self.phone = new.phone;
        self
    }
}

pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}
