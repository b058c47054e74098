//! Integration tests for `SqliteStore` against an in-memory database.

use readmark_core::{status::Status, store::StatusStore};

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

// ─── find ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn find_missing_returns_none() {
  let s = store().await;
  assert!(s.find("nope").await.unwrap().is_none());
}

#[tokio::test]
async fn find_has_no_side_effects() {
  let s = store().await;
  s.find("nope").await.unwrap();
  assert!(s.find("nope").await.unwrap().is_none());
}

// ─── upsert ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn upsert_inserts_with_equal_timestamps() {
  let s = store().await;

  let row = s.upsert("article-1", Status::Reading).await.unwrap();
  assert_eq!(row.article_id, "article-1");
  assert_eq!(row.status, Status::Reading);
  assert_eq!(row.created_at, row.updated_at);

  let fetched = s.find("article-1").await.unwrap().unwrap();
  assert_eq!(fetched, row);
}

#[tokio::test]
async fn upsert_overwrites_and_keeps_created_at() {
  let s = store().await;

  let first = s.upsert("article-1", Status::ToRead).await.unwrap();
  let second = s.upsert("article-1", Status::Read).await.unwrap();

  assert_eq!(second.status, Status::Read);
  assert_eq!(second.created_at, first.created_at);
  assert!(second.updated_at > first.updated_at);
  assert!(second.updated_at >= second.created_at);

  let fetched = s.find("article-1").await.unwrap().unwrap();
  assert_eq!(fetched.status, Status::Read);
}

#[tokio::test]
async fn updated_at_strictly_increases_on_rapid_writes() {
  let s = store().await;

  let mut last = s.upsert("a", Status::ToRead).await.unwrap().updated_at;
  for status in [Status::Reading, Status::Read, Status::Read, Status::ToRead] {
    let row = s.upsert("a", status).await.unwrap();
    assert!(row.updated_at > last);
    last = row.updated_at;
  }
}

#[tokio::test]
async fn same_status_write_still_refreshes_updated_at() {
  let s = store().await;

  let first = s.upsert("a", Status::Reading).await.unwrap();
  let second = s.upsert("a", Status::Reading).await.unwrap();
  assert_eq!(second.status, Status::Reading);
  assert!(second.updated_at > first.updated_at);
}

#[tokio::test]
async fn articles_are_isolated() {
  let s = store().await;

  s.upsert("article-a", Status::ToRead).await.unwrap();
  s.upsert("article-b", Status::Reading).await.unwrap();
  s.upsert("article-b", Status::Read).await.unwrap();

  assert_eq!(s.find("article-a").await.unwrap().unwrap().status, Status::ToRead);
  assert_eq!(s.find("article-b").await.unwrap().unwrap().status, Status::Read);
}

#[tokio::test]
async fn concurrent_upserts_on_one_key_leave_a_single_valid_row() {
  let s = store().await;

  let mut handles = Vec::new();
  for i in 0..16 {
    let s = s.clone();
    let status = match i % 3 {
      0 => Status::ToRead,
      1 => Status::Reading,
      _ => Status::Read,
    };
    handles.push(tokio::spawn(async move { s.upsert("shared", status).await }));
  }
  for h in handles {
    h.await.unwrap().unwrap();
  }

  let row = s.find("shared").await.unwrap().unwrap();
  assert!(row.updated_at >= row.created_at);
}

#[tokio::test]
async fn unusual_article_ids_are_stored_verbatim() {
  let s = store().await;

  for id in ["with space", "ünïcödé", "quote'd", "1234"] {
    s.upsert(id, Status::Read).await.unwrap();
    assert_eq!(s.find(id).await.unwrap().unwrap().article_id, id);
  }
}

// ─── create_if_absent ────────────────────────────────────────────────────────

#[tokio::test]
async fn create_if_absent_inserts_missing_row() {
  let s = store().await;

  let row = s.create_if_absent("fresh", Status::ToRead).await.unwrap();
  assert_eq!(row.status, Status::ToRead);
  assert_eq!(row.created_at, row.updated_at);
  assert_eq!(s.find("fresh").await.unwrap().unwrap(), row);
}

#[tokio::test]
async fn create_if_absent_never_overwrites_an_existing_row() {
  let s = store().await;

  let written = s.upsert("taken", Status::Read).await.unwrap();
  let got = s.create_if_absent("taken", Status::ToRead).await.unwrap();

  assert_eq!(got, written);
  assert_eq!(s.find("taken").await.unwrap().unwrap().status, Status::Read);
}

// ─── Constraints ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn out_of_range_status_is_rejected_by_the_table() {
  let s = store().await;

  let err = s
    .write("article-1".into(), "archived".into())
    .await
    .unwrap_err();
  assert!(matches!(err, Error::ConstraintViolation(_)), "got {err:?}");

  assert!(s.find("article-1").await.unwrap().is_none());
}

#[tokio::test]
async fn rejected_write_leaves_existing_row_untouched() {
  let s = store().await;

  let before = s.upsert("article-1", Status::Reading).await.unwrap();
  let err = s
    .write("article-1".into(), "invalid_status".into())
    .await
    .unwrap_err();
  assert!(matches!(err, Error::ConstraintViolation(_)), "got {err:?}");

  let after = s.find("article-1").await.unwrap().unwrap();
  assert_eq!(after, before);
}

// ─── Persistence ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn rows_survive_reopening_a_file_store() {
  let dir = std::env::temp_dir().join(format!(
    "readmark-store-test-{}-{}",
    std::process::id(),
    chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default()
  ));
  std::fs::create_dir_all(&dir).unwrap();
  let path = dir.join("status.db");

  let created = {
    let s = SqliteStore::open(&path).await.unwrap();
    s.upsert("kept", Status::Reading).await.unwrap()
  };

  let s = SqliteStore::open(&path).await.unwrap();
  assert_eq!(s.find("kept").await.unwrap().unwrap(), created);

  drop(s);
  let _ = std::fs::remove_dir_all(&dir);
}
