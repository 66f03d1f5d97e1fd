//! Integration tests for labor line create/read/update/list behaviour.
//!
//! Runs the repository against the in-memory item store.

use assert_matches::assert_matches;
use laborlines_core::labor_line::{CreateLaborLine, LaborLine, LaborLineKey, UpdateLaborLine};
use laborlines_db::memory::InMemoryItemStore;
use laborlines_db::repositories::LaborLineRepo;
use laborlines_db::DbError;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

fn new_line(account_id: &str, task_id: &str, notes: &[&str]) -> LaborLine {
    LaborLine::new(CreateLaborLine {
        contact_id: Some(new_id()),
        account_id: account_id.to_string(),
        task_id: task_id.to_string(),
        part_ids: Some(vec![new_id()]),
        notes: Some(notes.iter().map(|n| n.to_string()).collect()),
    })
}

fn update_for(line: &LaborLine, notes: &[&str]) -> UpdateLaborLine {
    UpdateLaborLine {
        labor_line_id: line.labor_line_id.clone(),
        contact_id: Some(line.contact_id.clone()),
        account_id: line.account_id.clone(),
        task_id: line.task_id.clone(),
        part_ids: None,
        notes: Some(notes.iter().map(|n| n.to_string()).collect()),
    }
}

// ---------------------------------------------------------------------------
// Test: create then find round-trips every field
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_create_then_find_round_trips() {
    let store = InMemoryItemStore::new();
    let line = new_line(&new_id(), &new_id(), &["n1"]);

    LaborLineRepo::create(&store, &line).await.unwrap();

    let found = LaborLineRepo::find_by_key(&store, &line.key())
        .await
        .unwrap()
        .expect("created line should be found");
    assert_eq!(found, line);
}

// ---------------------------------------------------------------------------
// Test: find_by_key returns None for an unknown key
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_find_unknown_key_returns_none() {
    let store = InMemoryItemStore::new();
    let key = LaborLineKey {
        account_id: new_id(),
        task_id: new_id(),
        labor_line_id: new_id(),
    };
    let found = LaborLineRepo::find_by_key(&store, &key).await.unwrap();
    assert!(found.is_none());
}

// ---------------------------------------------------------------------------
// Test: create against an occupied key fails and leaves the record intact
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_create_duplicate_key_conflicts() {
    let store = InMemoryItemStore::new();
    let line = new_line(&new_id(), &new_id(), &["original"]);
    LaborLineRepo::create(&store, &line).await.unwrap();

    let mut duplicate = line.clone();
    duplicate.notes = vec!["clobbered".to_string()];
    let result = LaborLineRepo::create(&store, &duplicate).await;
    assert_matches!(result, Err(DbError::ConditionFailed));

    let found = LaborLineRepo::find_by_key(&store, &line.key())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.notes, vec!["original".to_string()]);
}

// ---------------------------------------------------------------------------
// Test: update preserves created_at and replaces content
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_update_preserves_created_at() {
    let store = InMemoryItemStore::new();
    let mut line = new_line(&new_id(), &new_id(), &["n1"]);
    // Back-date so the preserved value is distinguishable from "now".
    line.created_at -= 3600;
    line.updated_at -= 3600;
    LaborLineRepo::create(&store, &line).await.unwrap();

    let mut updated = update_for(&line, &["n2"]).into_labor_line();
    LaborLineRepo::update(&store, &mut updated).await.unwrap();
    assert_eq!(updated.created_at, line.created_at);

    let found = LaborLineRepo::find_by_key(&store, &line.key())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.created_at, line.created_at);
    assert!(found.updated_at >= line.updated_at);
    assert_eq!(found.notes, vec!["n2".to_string()]);
    assert!(found.part_ids.is_empty());
}

// ---------------------------------------------------------------------------
// Test: update of a missing record is NotFound and writes nothing
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_update_missing_record_not_found() {
    let store = InMemoryItemStore::new();
    let line = new_line(&new_id(), &new_id(), &["n1"]);

    let mut updated = update_for(&line, &["n2"]).into_labor_line();
    let result = LaborLineRepo::update(&store, &mut updated).await;

    assert_matches!(result, Err(DbError::NotFound));
    assert!(store.is_empty().await);
}

// ---------------------------------------------------------------------------
// Test: list scopes by account and optional task, in sort key order
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_list_by_account_and_task() {
    let store = InMemoryItemStore::new();
    let account = new_id();
    let other_account = new_id();
    let task_a = new_id();
    let task_b = new_id();

    let a1 = new_line(&account, &task_a, &["a1"]);
    let a2 = new_line(&account, &task_a, &["a2"]);
    let b1 = new_line(&account, &task_b, &["b1"]);
    let other = new_line(&other_account, &task_a, &["other"]);
    for line in [&a1, &a2, &b1, &other] {
        LaborLineRepo::create(&store, line).await.unwrap();
    }

    let all = LaborLineRepo::list(&store, &account, None).await.unwrap();
    assert_eq!(all.len(), 3);
    assert!(all.iter().all(|l| l.account_id == account));
    let sort_keys: Vec<String> = all.iter().map(|l| l.sort_key()).collect();
    let mut sorted = sort_keys.clone();
    sorted.sort();
    assert_eq!(sort_keys, sorted, "list should follow sort key order");

    let task_only = LaborLineRepo::list(&store, &account, Some(&task_a))
        .await
        .unwrap();
    assert_eq!(task_only.len(), 2);
    assert!(task_only.iter().all(|l| l.task_id == task_a));
}

// ---------------------------------------------------------------------------
// Test: list of an unknown account is empty
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_list_unknown_account_is_empty() {
    let store = InMemoryItemStore::new();
    let lines = LaborLineRepo::list(&store, &new_id(), None).await.unwrap();
    assert!(lines.is_empty());
}
