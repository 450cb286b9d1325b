//! Aggregate queries against a migrated database, isolated in a rolled-back transaction
//!
//! Run with: cargo test -- --ignored

use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};

use equipment_ledger::{config::AppConfig, repository::statistics::count_by_status};

async fn pool() -> Pool<Postgres> {
    let url = std::env::var("DATABASE_URL").unwrap_or_else(|_| AppConfig::default().database.url);
    PgPoolOptions::new()
        .max_connections(1)
        .connect(&url)
        .await
        .expect("Failed to connect to database")
}

#[tokio::test]
#[ignore]
async fn test_status_breakdown_of_empty_table_is_empty() {
    let pool = pool().await;
    let mut tx = pool.begin().await.expect("begin");

    sqlx::query("DELETE FROM maintenance").execute(&mut *tx).await.expect("clear maintenance");
    sqlx::query("DELETE FROM equipment").execute(&mut *tx).await.expect("clear equipment");

    let rows = count_by_status(&mut *tx).await.expect("breakdown");
    assert!(rows.is_empty());

    tx.rollback().await.expect("rollback");
}

#[tokio::test]
#[ignore]
async fn test_status_breakdown_omits_zero_counts() {
    let pool = pool().await;
    let mut tx = pool.begin().await.expect("begin");

    sqlx::query("DELETE FROM maintenance").execute(&mut *tx).await.expect("clear maintenance");
    sqlx::query("DELETE FROM equipment").execute(&mut *tx).await.expect("clear equipment");
    sqlx::query("INSERT INTO workshop (workshop_id, workshop_name) VALUES ('WSTAT', 'Breakdown shop')")
        .execute(&mut *tx)
        .await
        .expect("insert workshop");
    sqlx::query(
        "INSERT INTO equipment \
         (equipment_id, model, purchase_price, workshop_id, responsible_person, status) \
         VALUES ('EQSTAT', 'B1', 10, 'WSTAT', 'Zhao', '维修')",
    )
    .execute(&mut *tx)
    .await
    .expect("insert equipment");

    let rows = count_by_status(&mut *tx).await.expect("breakdown");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].status, "维修");
    assert_eq!(rows[0].count, 1);

    tx.rollback().await.expect("rollback");
}
