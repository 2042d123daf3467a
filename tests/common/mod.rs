#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use json_rolodex::prelude::*;
use tempfile::{TempDir, tempdir};
use tracing_subscriber::EnvFilter;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn contact(id: &str, name: &str, email: &str, phone: &str) -> Contact {
    Contact {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
    }
}

pub fn sample_contacts() -> Vec<Contact> {
    vec![
        contact("abc", "Jane", "jane@x.com", "1112223333"),
        contact(
            "AeHIrLTr6JkxGE6SN-0Rw",
            "Allen Raymond",
            "nulla.ante@vestibul.co.uk",
            "5559132345",
        ),
        contact(
            "qdggE76Jtbfd9eWJHrssH",
            "Chaim Lewis",
            "dui.in@egetlacus.ca",
            "5557568532",
        ),
    ]
}

/// A manager over a fresh file in its own temp dir, seeded with `contacts`.
pub fn seeded_book(contacts: &[Contact]) -> (TempDir, ContactManager<JsonFileStore>) {
    init_tracing();
    let dir = tempdir().unwrap();
    let path = dir.path().join("contacts.json");
    fs::write(&path, serde_json::to_string_pretty(contacts).unwrap()).unwrap();

    let config = Config {
        contacts_path: path,
        ..Config::default()
    };
    let manager = ContactManager::open(&config).unwrap();
    (dir, manager)
}

pub fn contacts_path(dir: &TempDir) -> PathBuf {
    dir.path().join("contacts.json")
}

pub fn raw(path: &Path) -> Vec<u8> {
    fs::read(path).unwrap()
}
