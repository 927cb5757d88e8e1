use super::*;

#[tokio::test]
async fn health_check_succeeds_for_live_pool() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    storage.health_check().await.expect("health check");
}

#[tokio::test]
async fn creates_database_file_when_missing() {
    let temp_root = tempfile::tempdir().expect("temp dir");
    let db_path = temp_root.path().join("nested").join("inventory.db");
    let database_url = format!("sqlite://{}", db_path.to_string_lossy().replace('\\', "/"));

    let storage = Storage::new(&database_url).await.expect("db");
    drop(storage);

    assert!(
        db_path.exists(),
        "database file should exist: {}",
        db_path.display()
    );
}

#[tokio::test]
async fn add_with_fresh_name_creates_exactly_one_record() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    storage.upsert("hammer", 3, 12.99).await.expect("upsert");

    let items = storage.list_all().await.expect("list");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].name, "hammer");
    assert_eq!(items[0].quantity, 3);
    assert_eq!(items[0].cost, 12.99);
}

#[tokio::test]
async fn repeated_upsert_sums_quantity_and_overwrites_cost() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    storage.upsert("bolt", 3, 1.25).await.expect("first upsert");
    storage.upsert("bolt", 4, 0.75).await.expect("second upsert");

    let item = storage
        .fetch("bolt")
        .await
        .expect("fetch")
        .expect("bolt exists");
    assert_eq!(item.quantity, 7, "quantities are summed");
    assert_eq!(item.cost, 0.75, "cost keeps only the second value");
}

#[tokio::test]
async fn replace_overwrites_both_fields_without_accumulation() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    storage.upsert("nail", 10, 0.10).await.expect("upsert");
    storage.replace("nail", 2, 0.20).await.expect("replace");

    let item = storage
        .fetch("nail")
        .await
        .expect("fetch")
        .expect("nail exists");
    assert_eq!(item.quantity, 2);
    assert_eq!(item.cost, 0.20);
}

#[tokio::test]
async fn replace_creates_missing_record() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    storage.replace("wrench", 1, 24.0).await.expect("replace");

    let item = storage
        .fetch("wrench")
        .await
        .expect("fetch")
        .expect("wrench exists");
    assert_eq!(item.quantity, 1);
    assert_eq!(item.cost, 24.0);
}

#[tokio::test]
async fn remove_deletes_record_from_subsequent_listings() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    storage.upsert("tape", 2, 3.5).await.expect("upsert");
    storage.remove("tape").await.expect("remove");

    let items = storage.list_all().await.expect("list");
    assert!(items.is_empty());
}

#[tokio::test]
async fn remove_of_absent_name_is_a_no_op() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    storage.remove("ghost").await.expect("remove absent");
    assert!(storage.list_all().await.expect("list").is_empty());
}

#[tokio::test]
async fn fetch_returns_none_for_absent_key() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    assert!(storage.fetch("missing").await.expect("fetch").is_none());
}

#[tokio::test]
async fn round_trips_added_item() {
    let storage = Storage::new("sqlite::memory:").await.expect("db");
    storage.upsert("Widget", 5, 2.50).await.expect("upsert");

    let items = storage.list_all().await.expect("list");
    assert_eq!(
        items,
        vec![InventoryItem::new("Widget", 5, 2.5)],
        "added item reads back exactly as entered"
    );
}

#[tokio::test]
async fn concurrent_upserts_of_one_key_lose_no_increment() {
    // File-backed so both pooled connections see the same database.
    let temp_root = tempfile::tempdir().expect("temp dir");
    let db_path = temp_root.path().join("race.db");
    let database_url = format!("sqlite://{}", db_path.to_string_lossy().replace('\\', "/"));
    let storage = Storage::new(&database_url).await.expect("db");

    let storage_a = storage.clone();
    let storage_b = storage.clone();
    let (left, right) = tokio::join!(
        async move { storage_a.upsert("race", 2, 1.0).await },
        async move { storage_b.upsert("race", 5, 2.0).await }
    );
    left.expect("left upsert");
    right.expect("right upsert");

    let item = storage
        .fetch("race")
        .await
        .expect("fetch")
        .expect("race exists");
    assert_eq!(item.quantity, 7, "both increments must survive");
}
