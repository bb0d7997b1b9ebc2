use super::*;

fn third(top: &str, bottom: &str) -> LowerThird {
    LowerThird {
        id: LowerThirdId(0),
        top_text: top.to_string(),
        bottom_text: bottom.to_string(),
        display_order: 0,
    }
}

#[tokio::test]
async fn health_check_succeeds_for_live_pool() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    storage.health_check().await.expect("health check");
}

#[tokio::test]
async fn create_assigns_id_and_appends_to_rotation() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");

    let mut first = third("Alice", "Head Referee");
    storage.create_lower_third(&mut first).await.expect("create");
    assert!(first.id.0 > 0);
    assert_eq!(first.display_order, 1);

    let mut second = third("Bob", "Announcer");
    storage.create_lower_third(&mut second).await.expect("create");
    assert!(second.id.0 > first.id.0);
    assert_eq!(second.display_order, 2);
}

#[tokio::test]
async fn create_keeps_explicit_display_order() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    let mut record = third("Carol", "MC");
    record.display_order = 42;
    storage.create_lower_third(&mut record).await.expect("create");

    let stored = storage
        .lower_third_by_id(record.id)
        .await
        .expect("fetch")
        .expect("present");
    assert_eq!(stored.display_order, 42);
}

#[tokio::test]
async fn fetch_by_unknown_id_returns_none() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    let missing = storage
        .lower_third_by_id(LowerThirdId(999))
        .await
        .expect("fetch");
    assert!(missing.is_none());
}

#[tokio::test]
async fn all_lower_thirds_sorts_by_display_order() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    for (top, order) in [("C", 30), ("A", 10), ("B", 20)] {
        let mut record = third(top, "");
        record.display_order = order;
        storage.create_lower_third(&mut record).await.expect("create");
    }

    let all = storage.all_lower_thirds().await.expect("list");
    let tops: Vec<&str> = all.iter().map(|t| t.top_text.as_str()).collect();
    assert_eq!(tops, ["A", "B", "C"]);
}

#[tokio::test]
async fn save_replaces_every_field() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    let mut record = third("Before", "Old caption");
    storage.create_lower_third(&mut record).await.expect("create");

    record.top_text = "After".to_string();
    record.bottom_text = String::new();
    record.display_order = 7;
    storage.save_lower_third(&record).await.expect("save");

    let stored = storage
        .lower_third_by_id(record.id)
        .await
        .expect("fetch")
        .expect("present");
    assert_eq!(stored, record);
}

#[tokio::test]
async fn delete_removes_record_and_tolerates_absent_id() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    let mut record = third("Gone", "Soon");
    storage.create_lower_third(&mut record).await.expect("create");

    storage.delete_lower_third(record.id).await.expect("delete");
    assert!(storage
        .lower_third_by_id(record.id)
        .await
        .expect("fetch")
        .is_none());

    // Second delete of the same id is a no-op, not an error.
    storage.delete_lower_third(record.id).await.expect("delete");
}
