//! Integration tests for folder and tag CRUD, including how their deletes
//! ripple into notes.

use notekeep_core::{Error, FolderRepository, NoteRepository, TagRepository};
use notekeep_db::test_fixtures::TestDatabase;

async fn seeded() -> TestDatabase {
    dotenvy::dotenv().ok();
    TestDatabase::with_seed_data().await
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_folder_crud_roundtrip() {
    let test_db = seeded().await;
    let folders = &test_db.db.folders;

    let created = folders.create("Projects").await.expect("create folder");
    assert_eq!(created.name, "Projects");
    assert_eq!(created.id, 100);

    let fetched = folders.get(created.id).await.expect("get folder");
    assert_eq!(fetched.as_ref(), Some(&created));

    let renamed = folders
        .update(created.id, "Shipped")
        .await
        .expect("update folder");
    assert_eq!(renamed.id, created.id);
    assert_eq!(renamed.name, "Shipped");

    folders.delete(created.id).await.expect("delete folder");
    assert_eq!(folders.get(created.id).await.expect("get folder"), None);

    test_db.cleanup().await;
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_folder_list_is_ordered_by_id() {
    let test_db = seeded().await;

    let folders = test_db.db.folders.list().await.expect("list folders");
    let ids: Vec<i64> = folders.iter().map(|f| f.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4]);

    test_db.cleanup().await;
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_folder_update_missing_returns_not_found() {
    let test_db = seeded().await;

    let result = test_db.db.folders.update(10_000_000, "nope").await;
    assert!(matches!(result, Err(Error::NotFound(_))));

    test_db.cleanup().await;
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_folder_delete_detaches_notes() {
    let test_db = seeded().await;

    test_db.db.folders.delete(1).await.expect("delete folder 1");

    // Note 1 lived in folder 1; it survives with no folder.
    let note = test_db.db.notes.fetch(1).await.expect("fetch note 1");
    assert_eq!(note.folder, None);

    test_db.cleanup().await;
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_folder_delete_absent_is_a_noop() {
    let test_db = seeded().await;

    test_db
        .db
        .folders
        .delete(10_000_000)
        .await
        .expect("delete absent folder");

    test_db.cleanup().await;
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_tag_crud_roundtrip() {
    let test_db = seeded().await;
    let tags = &test_db.db.tags;

    let created = tags.create("reading").await.expect("create tag");
    assert_eq!(created.name, "reading");
    assert_eq!(created.id, 100);

    let fetched = tags.get(created.id).await.expect("get tag");
    assert_eq!(fetched.as_ref(), Some(&created));

    let renamed = tags
        .update(created.id, "to-read")
        .await
        .expect("update tag");
    assert_eq!(renamed.name, "to-read");

    let all = tags.list().await.expect("list tags");
    let ids: Vec<i64> = all.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 100]);

    tags.delete(created.id).await.expect("delete tag");
    assert_eq!(tags.get(created.id).await.expect("get tag"), None);

    test_db.cleanup().await;
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_tag_update_missing_returns_not_found() {
    let test_db = seeded().await;

    let result = test_db.db.tags.update(10_000_000, "nope").await;
    assert!(matches!(result, Err(Error::NotFound(_))));

    test_db.cleanup().await;
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database"]
async fn test_tag_delete_removes_it_from_notes() {
    let test_db = seeded().await;

    test_db.db.tags.delete(1).await.expect("delete tag 1");

    // Note 1 carried tags 1 and 2; only tag 2 remains.
    let note = test_db.db.notes.fetch(1).await.expect("fetch note 1");
    let names: Vec<&str> = note.tags.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["yay"]);

    // Note 9 carried only tag 1; it survives with an empty tag list.
    let note = test_db.db.notes.fetch(9).await.expect("fetch note 9");
    assert!(note.tags.is_empty());

    test_db.cleanup().await;
}
