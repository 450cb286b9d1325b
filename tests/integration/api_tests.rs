//! Live API tests against a running server with a migrated database
//!
//! Run with: cargo test -- --ignored

use std::time::{SystemTime, UNIX_EPOCH};

use reqwest::{Client, StatusCode};
use serde_json::{json, Value};

const BASE_URL: &str = "http://localhost:3001/api";

/// Unique suffix so repeated runs never collide with earlier rows
fn unique(prefix: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    format!("{}{}", prefix, nanos % 1_000_000_000_000)
}

async fn post(client: &Client, path: &str, body: Value) -> (StatusCode, Value) {
    let response = client
        .post(format!("{}{}", BASE_URL, path))
        .json(&body)
        .send()
        .await
        .expect("Failed to send request");
    let status = response.status();
    (status, response.json().await.expect("Failed to parse response"))
}

async fn put(client: &Client, path: &str, body: Value) -> (StatusCode, Value) {
    let response = client
        .put(format!("{}{}", BASE_URL, path))
        .json(&body)
        .send()
        .await
        .expect("Failed to send request");
    let status = response.status();
    (status, response.json().await.expect("Failed to parse response"))
}

async fn get(client: &Client, path: &str, query: &[(&str, &str)]) -> (StatusCode, Value) {
    let response = client
        .get(format!("{}{}", BASE_URL, path))
        .query(query)
        .send()
        .await
        .expect("Failed to send request");
    let status = response.status();
    (status, response.json().await.expect("Failed to parse response"))
}

async fn delete(client: &Client, path: &str) -> (StatusCode, Value) {
    let response = client
        .delete(format!("{}{}", BASE_URL, path))
        .send()
        .await
        .expect("Failed to send request");
    let status = response.status();
    (status, response.json().await.expect("Failed to parse response"))
}

async fn create_workshop(client: &Client, name: &str) -> String {
    let id = unique("W");
    let (status, _) = post(client, "/workshop", json!({ "workshop_id": id, "workshop_name": name })).await;
    assert_eq!(status, StatusCode::OK);
    id
}

async fn create_equipment(client: &Client, workshop_id: &str, model: &str, status: &str) -> String {
    let id = unique("EQ");
    let (code, body) = post(
        client,
        "/equipment",
        json!({
            "equipment_id": id,
            "model": model,
            "factory_date": "2021-03-15",
            "purchase_price": 185000.5,
            "workshop_id": workshop_id,
            "responsible_person": "Li Wei",
            "status": status
        }),
    )
    .await;
    assert_eq!(code, StatusCode::OK, "body: {}", body);
    id
}

async fn create_maintenance(client: &Client, equipment_id: &str, time: &str, cost: f64) -> String {
    let id = unique("MT");
    let (code, body) = post(
        client,
        "/maintenance",
        json!({
            "maintenance_id": id,
            "equipment_id": equipment_id,
            "maintenance_time": time,
            "fault_description": "Spindle vibration",
            "fault_type": "mechanical",
            "maintenance_cost": cost
        }),
    )
    .await;
    assert_eq!(code, StatusCode::OK, "body: {}", body);
    id
}

#[tokio::test]
#[ignore]
async fn test_health_check() {
    let client = Client::new();
    let (status, body) = get(&client, "/health", &[]).await;

    assert!(status.is_success());
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
#[ignore]
async fn test_equipment_round_trip() {
    let client = Client::new();
    let workshop = create_workshop(&client, "Round trip shop").await;
    let id = create_equipment(&client, &workshop, "CK6150", "在用").await;

    let (status, body) = get(&client, &format!("/equipment/{}", id), &[]).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["model"], "CK6150");
    assert_eq!(body["data"]["factory_date"], "2021-03-15");
    assert_eq!(body["data"]["workshop_name"], "Round trip shop");
    assert_eq!(body["data"]["status"], "在用");

    let (status, body) = put(&client, &format!("/equipment/{}", id), json!({ "model": "CK6150A" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Updated successfully");

    let (_, body) = get(&client, &format!("/equipment/{}", id), &[]).await;
    assert_eq!(body["data"]["model"], "CK6150A");
    assert_eq!(body["data"]["responsible_person"], "Li Wei");

    let (status, body) = delete(&client, &format!("/equipment/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Deleted successfully");

    let (status, body) = get(&client, &format!("/equipment/{}", id), &[]).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
}

#[tokio::test]
#[ignore]
async fn test_duplicate_equipment_id_is_rejected() {
    let client = Client::new();
    let workshop = create_workshop(&client, "Duplicate shop").await;
    let id = create_equipment(&client, &workshop, "X1", "在用").await;

    let (status, body) = post(
        &client,
        "/equipment",
        json!({
            "equipment_id": id,
            "model": "X2",
            "purchase_price": 10,
            "workshop_id": workshop,
            "responsible_person": "Wang",
            "status": "维修"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Equipment ID already exists");
}

#[tokio::test]
#[ignore]
async fn test_in_use_equipment_must_be_repaired_before_retirement() {
    let client = Client::new();
    let workshop = create_workshop(&client, "Retirement shop").await;
    let id = create_equipment(&client, &workshop, "M7130", "在用").await;
    let path = format!("/equipment/{}", id);

    let (status, _) = put(&client, &path, json!({ "status": "报废" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = get(&client, &path, &[]).await;
    assert_eq!(body["data"]["status"], "在用");

    let (status, _) = put(&client, &path, json!({ "status": "维修" })).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = put(&client, &path, json!({ "status": "报废" })).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = get(&client, &path, &[]).await;
    assert_eq!(body["data"]["status"], "报废");
}

#[tokio::test]
#[ignore]
async fn test_equipment_with_maintenance_cannot_be_deleted() {
    let client = Client::new();
    let workshop = create_workshop(&client, "Delete guard shop").await;
    let id = create_equipment(&client, &workshop, "Z3050", "维修").await;
    let record = create_maintenance(&client, &id, "2024-05-10 08:30:00", 300.0).await;

    let (status, body) = delete(&client, &format!("/equipment/{}", id)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Equipment has maintenance records and cannot be deleted");

    let (status, _) = delete(&client, &format!("/maintenance/{}", record)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = delete(&client, &format!("/equipment/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
#[ignore]
async fn test_maintenance_requires_existing_equipment() {
    let client = Client::new();
    let (status, body) = post(
        &client,
        "/maintenance",
        json!({
            "maintenance_id": unique("MT"),
            "equipment_id": unique("NOPE"),
            "maintenance_time": "2024-05-10 08:30:00",
            "fault_description": "Ghost machine",
            "maintenance_cost": 1
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Equipment does not exist");
}

#[tokio::test]
#[ignore]
async fn test_equipment_filters_are_conjunctive() {
    let client = Client::new();
    let workshop = create_workshop(&client, "Filter shop").await;
    let lathe = create_equipment(&client, &workshop, "Lathe CK6140", "在用").await;
    create_equipment(&client, &workshop, "Lathe CK6150", "维修").await;
    create_equipment(&client, &workshop, "Mill X5032", "在用").await;

    let (status, body) = get(
        &client,
        "/equipment",
        &[("workshop_id", workshop.as_str()), ("status", "在用"), ("model", "lathe")],
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let rows = body["data"].as_array().expect("array");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["equipment_id"], lathe.as_str());

    let (_, body) = get(&client, "/equipment", &[("keyword", "Filter shop")]).await;
    assert_eq!(body["data"].as_array().expect("array").len(), 3);
}

#[tokio::test]
#[ignore]
async fn test_maintenance_history_and_time_filter() {
    let client = Client::new();
    let workshop = create_workshop(&client, "History shop").await;
    let id = create_equipment(&client, &workshop, "T68", "在用").await;
    create_maintenance(&client, &id, "2024-01-05 10:00:00", 100.0).await;
    let latest = create_maintenance(&client, &id, "2024-01-31 18:00:00", 50.0).await;
    create_maintenance(&client, &id, "2024-02-01 09:00:00", 75.0).await;

    let (_, body) = get(&client, &format!("/maintenance/equipment/{}", id), &[]).await;
    assert_eq!(body["data"].as_array().expect("array").len(), 3);
    assert_eq!(body["data"][0]["maintenance_time"], "2024-02-01 09:00:00");

    let (_, body) = get(
        &client,
        "/maintenance",
        &[
            ("equipment_id", id.as_str()),
            ("maintenance_time_start", "2024-01-01"),
            ("maintenance_time_end", "2024-01-31"),
        ],
    )
    .await;
    let rows = body["data"].as_array().expect("array");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["maintenance_id"], latest.as_str());
    assert_eq!(rows[0]["workshop_name"], "History shop");
}

#[tokio::test]
#[ignore]
async fn test_workshop_statistics_do_not_multiply_counts() {
    let client = Client::new();
    let workshop = create_workshop(&client, "Stats shop").await;
    let first = create_equipment(&client, &workshop, "S1", "在用").await;
    create_equipment(&client, &workshop, "S2", "维修").await;
    create_maintenance(&client, &first, "2024-03-01 08:00:00", 10.0).await;
    create_maintenance(&client, &first, "2024-03-02 08:00:00", 20.0).await;
    create_maintenance(&client, &first, "2024-03-03 08:00:00", 30.0).await;

    let (status, body) = get(&client, "/statistics/workshop", &[]).await;
    assert_eq!(status, StatusCode::OK);
    let row = body["data"]
        .as_array()
        .expect("array")
        .iter()
        .find(|r| r["workshop_id"] == workshop.as_str())
        .expect("workshop row")
        .clone();
    assert_eq!(row["total_equipment"], 2);
    assert_eq!(row["in_use_count"], 1);
    assert_eq!(row["total_maintenance_times"], 3);
}

#[tokio::test]
#[ignore]
async fn test_status_breakdown_sums_to_total() {
    let client = Client::new();
    let (_, all) = get(&client, "/equipment", &[]).await;
    let total = all["data"].as_array().expect("array").len() as i64;

    let (status, body) = get(&client, "/statistics/equipment-status", &[]).await;
    assert_eq!(status, StatusCode::OK);
    let sum: i64 = body["data"]
        .as_array()
        .expect("array")
        .iter()
        .map(|r| r["count"].as_i64().expect("count"))
        .sum();
    assert_eq!(sum, total);
}

#[tokio::test]
#[ignore]
async fn test_maintenance_trend_per_month() {
    let client = Client::new();
    let workshop = create_workshop(&client, "Trend shop").await;
    let id = create_equipment(&client, &workshop, "TR1", "在用").await;
    create_maintenance(&client, &id, "2023-07-02 08:00:00", 100.0).await;
    create_maintenance(&client, &id, "2023-07-20 08:00:00", 50.5).await;
    create_maintenance(&client, &id, "2023-08-01 08:00:00", 10.0).await;

    let (status, body) = get(
        &client,
        "/statistics/maintenance-trend",
        &[("equipment_id", id.as_str()), ("start_month", "2023-07"), ("end_month", "2023-08")],
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let rows = body["data"].as_array().expect("array");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["month"], "2023-07");
    assert_eq!(rows[0]["maintenance_count"], 2);
    assert_eq!(rows[1]["month"], "2023-08");
}

#[tokio::test]
#[ignore]
async fn test_updating_unknown_rows_is_not_found() {
    let client = Client::new();

    let (status, body) = put(&client, &format!("/equipment/{}", unique("NOPE")), json!({})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Equipment not found");

    let (status, body) = put(
        &client,
        &format!("/maintenance/{}", unique("NOPE")),
        json!({ "fault_type": null }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Maintenance record not found");
}

#[tokio::test]
#[ignore]
async fn test_blank_equipment_update_has_no_fields() {
    let client = Client::new();
    let workshop = create_workshop(&client, "Blank update shop").await;
    let id = create_equipment(&client, &workshop, "B665", "在用").await;
    let path = format!("/equipment/{}", id);

    let (status, body) = put(&client, &path, json!({ "model": "" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No fields to update");

    let (_, body) = get(&client, &path, &[]).await;
    assert_eq!(body["data"]["model"], "B665");
}

#[tokio::test]
#[ignore]
async fn test_partial_maintenance_update_persists() {
    let client = Client::new();
    let workshop = create_workshop(&client, "Maintenance update shop").await;
    let id = create_equipment(&client, &workshop, "X6132", "维修").await;
    let record = create_maintenance(&client, &id, "2024-04-01 08:00:00", 120.0).await;
    let path = format!("/maintenance/{}", record);
    let history = format!("/maintenance/equipment/{}", id);

    let (status, body) = put(&client, &path, json!({ "maintenance_cost": 420.5 })).await;
    assert_eq!(status, StatusCode::OK, "body: {}", body);
    assert_eq!(body["message"], "Updated successfully");

    let (_, body) = get(&client, &history, &[]).await;
    let row = &body["data"][0];
    assert_eq!(row["maintenance_id"], record.as_str());
    assert_eq!(amount(&row["maintenance_cost"]), 420.5);
    assert_eq!(row["fault_description"], "Spindle vibration");
    assert_eq!(row["fault_type"], "mechanical");
    assert_eq!(row["maintenance_time"], "2024-04-01 08:00:00");

    let (status, _) = put(&client, &path, json!({ "fault_type": null })).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = get(&client, &history, &[]).await;
    let row = &body["data"][0];
    assert!(row["fault_type"].is_null());
    assert_eq!(amount(&row["maintenance_cost"]), 420.5);
}

/// Decimal amounts serialize as strings; accept either form
fn amount(value: &Value) -> f64 {
    match value {
        Value::String(s) => s.parse().expect("decimal string"),
        other => other.as_f64().expect("number"),
    }
}
