mod common;

use std::sync::Arc;

use common::{sample_contacts, seeded_book};
use json_rolodex::prelude::*;
use serde_json::json;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_adds_are_all_kept() -> Result<(), AppError> {
    let (_dir, book) = seeded_book(&[]);
    let book = Arc::new(book);

    let mut handles = Vec::new();
    for i in 0..16 {
        let book = Arc::clone(&book);
        handles.push(tokio::spawn(async move {
            book.add(&json!({
                "name": format!("User {i:02}"),
                "email": format!("user{i}@example.com"),
                "phone": format!("08000000{i:02}"),
            }))
            .await
        }));
    }

    let mut ids = Vec::new();
    for handle in handles {
        ids.push(handle.await.unwrap()?.id);
    }

    let stored = book.list().await?;
    assert_eq!(stored.len(), 16);
    assert!(ids.iter().all(|id| stored.iter().any(|c| &c.id == id)));
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_updates_to_different_ids_both_survive() -> Result<(), AppError> {
    let (_dir, book) = seeded_book(&sample_contacts());
    let book = Arc::new(book);

    let first = {
        let book = Arc::clone(&book);
        tokio::spawn(async move {
            book.update(
                "abc",
                &json!({"name": "Jane Doe", "email": "jane@x.com", "phone": "1112223333"}),
            )
            .await
        })
    };
    let second = {
        let book = Arc::clone(&book);
        tokio::spawn(async move {
            book.update(
                "qdggE76Jtbfd9eWJHrssH",
                &json!({"name": "Chaim Lewis Jr", "email": "dui.in@egetlacus.ca", "phone": "5557568532"}),
            )
            .await
        })
    };

    assert!(first.await.unwrap()?.is_some());
    assert!(second.await.unwrap()?.is_some());

    let stored = book.list().await?;
    assert_eq!(stored.len(), 3);
    assert_eq!(book.get("abc").await?.map(|c| c.name), Some("Jane Doe".to_string()));
    assert_eq!(
        book.get("qdggE76Jtbfd9eWJHrssH").await?.map(|c| c.name),
        Some("Chaim Lewis Jr".to_string())
    );
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_updates_to_same_id_leave_one_whole_record() -> Result<(), AppError> {
    let (_dir, book) = seeded_book(&sample_contacts());
    let book = Arc::new(book);

    let bodies = [
        json!({"name": "Jane Doe", "email": "jane@doe.com", "phone": "1112223333"}),
        json!({"name": "Jane Smith", "email": "jane@smith.com", "phone": "4445556666"}),
    ];

    let mut handles = Vec::new();
    for body in bodies.clone() {
        let book = Arc::clone(&book);
        handles.push(tokio::spawn(async move { book.update("abc", &body).await }));
    }
    for handle in handles {
        assert!(handle.await.unwrap()?.is_some());
    }

    let stored = book.list().await?;
    assert_eq!(stored.len(), 3);

    let jane = book.get("abc").await?.expect("abc is stored");
    let matches_body = |body: &serde_json::Value| {
        body["name"] == jane.name.as_str()
            && body["email"] == jane.email.as_str()
            && body["phone"] == jane.phone.as_str()
    };
    assert!(bodies.iter().any(matches_body));
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn separate_managers_on_one_file_do_not_lose_writes() -> Result<(), AppError> {
    let (dir, first) = seeded_book(&[]);
    let config = Config {
        contacts_path: dir.path().join("contacts.json"),
        ..Config::default()
    };
    let second = ContactManager::open(&config)?;
    let (first, second) = (Arc::new(first), Arc::new(second));

    let mut handles = Vec::new();
    for i in 0..8 {
        let book = if i % 2 == 0 { Arc::clone(&first) } else { Arc::clone(&second) };
        handles.push(tokio::spawn(async move {
            book.add(&json!({
                "name": format!("Writer {i}"),
                "email": format!("writer{i}@example.com"),
                "phone": format!("090000000{i}"),
            }))
            .await
        }));
    }
    for handle in handles {
        handle.await.unwrap()?;
    }

    assert_eq!(first.list().await?.len(), 8);
    Ok(())
}
