//! Persistence tests against a scratch directory

use pretty_assertions::assert_eq;
use skyfetch::storage::{HISTORY_FILE, LAST_CITY_FILE, LocalStore, StorageError};

fn store() -> (tempfile::TempDir, LocalStore) {
    let dir = tempfile::tempdir().unwrap();
    let store = LocalStore::new(dir.path().join("skyfetch"));
    (dir, store)
}

#[tokio::test]
async fn test_missing_files_load_empty() {
    let (_dir, store) = store();

    assert!(store.load_history().await.unwrap().is_empty());
    assert_eq!(store.load_last_city().await.unwrap(), None);
}

#[tokio::test]
async fn test_history_round_trip() {
    let (_dir, store) = store();
    let cities = vec!["Paris".to_string(), "Oslo".to_string()];

    store.save_history(&cities).await.unwrap();

    let raw = std::fs::read_to_string(store.dir().join(HISTORY_FILE)).unwrap();
    assert_eq!(raw, r#"["Paris","Oslo"]"#);
    assert_eq!(store.load_history().await.unwrap().entries(), cities.as_slice());
}

#[tokio::test]
async fn test_loaded_history_is_sanitized() {
    let (_dir, store) = store();
    std::fs::create_dir_all(store.dir()).unwrap();
    std::fs::write(
        store.history_path(),
        r#"["Paris","paris","","Oslo","Rome","Lima","Kyiv","Doha"]"#,
    )
    .unwrap();

    let history = store.load_history().await.unwrap();

    assert_eq!(
        history.entries(),
        ["Paris", "Oslo", "Rome", "Lima", "Kyiv"].map(String::from)
    );
}

#[tokio::test]
async fn test_corrupt_history_is_an_error() {
    let (_dir, store) = store();
    std::fs::create_dir_all(store.dir()).unwrap();
    std::fs::write(store.history_path(), "{not json").unwrap();

    let error = store.load_history().await.unwrap_err();

    assert!(matches!(error, StorageError::Json(_)));
}

#[tokio::test]
async fn test_clear_history() {
    let (_dir, store) = store();
    store.save_history(&["Paris".to_string()]).await.unwrap();

    store.clear_history().await.unwrap();

    assert!(!store.history_path().exists());
    assert!(store.load_history().await.unwrap().is_empty());
    // Clearing twice is fine
    store.clear_history().await.unwrap();
}

#[tokio::test]
async fn test_clear_keeps_last_city() {
    let (_dir, store) = store();
    store.save_history(&["Paris".to_string()]).await.unwrap();
    store.save_last_city("Paris").await.unwrap();

    store.clear_history().await.unwrap();

    assert_eq!(store.load_last_city().await.unwrap().as_deref(), Some("Paris"));
}

#[tokio::test]
async fn test_last_city_round_trip() {
    let (_dir, store) = store();

    store.save_last_city("Tokyo").await.unwrap();

    let raw = std::fs::read_to_string(store.dir().join(LAST_CITY_FILE)).unwrap();
    assert_eq!(raw, "Tokyo");
    assert_eq!(store.load_last_city().await.unwrap().as_deref(), Some("Tokyo"));
}

#[tokio::test]
async fn test_blank_last_city_is_none() {
    let (_dir, store) = store();
    std::fs::create_dir_all(store.dir()).unwrap();
    std::fs::write(store.last_city_path(), "  \n").unwrap();

    assert_eq!(store.load_last_city().await.unwrap(), None);
}

#[tokio::test]
async fn test_clear_wins_over_earlier_save_finishing_late() {
    let (_dir, store) = store();
    store.save_history(&["Oslo".to_string()]).await.unwrap();

    let save = store.save_history(&["Paris".to_string(), "Oslo".to_string()]);
    let clear = store.clear_history();
    clear.await.unwrap();
    save.await.unwrap();

    assert!(!store.history_path().exists());
    assert!(store.load_history().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_later_save_wins_over_earlier_one() {
    let (_dir, store) = store();

    let first = store.save_history(&["Oslo".to_string()]);
    let second = store.save_history(&["Rome".to_string(), "Oslo".to_string()]);
    second.await.unwrap();
    first.await.unwrap();

    assert_eq!(
        store.load_history().await.unwrap().entries(),
        ["Rome", "Oslo"].map(String::from)
    );
}

#[tokio::test]
async fn test_history_and_last_city_are_ordered_separately() {
    let (_dir, store) = store();

    let city = store.save_last_city("Lima");
    store.clear_history().await.unwrap();
    city.await.unwrap();

    assert_eq!(store.load_last_city().await.unwrap().as_deref(), Some("Lima"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_aborted_save_cannot_bring_back_cleared_history() {
    let (_dir, store) = store();

    for _ in 0..200 {
        store.save_history(&["Oslo".to_string()]).await.unwrap();

        let save = tokio::spawn(store.save_history(&["Paris".to_string()]));
        save.abort();
        store.clear_history().await.unwrap();
        let _ = save.await;

        assert!(!store.history_path().exists());
    }
}
