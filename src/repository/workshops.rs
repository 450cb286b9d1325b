//! Workshops repository

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::workshop::Workshop,
};

#[derive(Clone)]
pub struct WorkshopsRepository {
    pool: Pool<Postgres>,
}

impl WorkshopsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all workshops
    pub async fn list(&self) -> AppResult<Vec<Workshop>> {
        let rows = sqlx::query_as::<_, Workshop>(
            "SELECT workshop_id, workshop_name FROM workshop ORDER BY workshop_id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Create a workshop
    pub async fn create(&self, data: &Workshop) -> AppResult<Workshop> {
        sqlx::query_as::<_, Workshop>(
            "INSERT INTO workshop (workshop_id, workshop_name) VALUES ($1, $2) RETURNING workshop_id, workshop_name",
        )
        .bind(&data.workshop_id)
        .bind(&data.workshop_name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::from(e).on_unique_violation("Workshop ID already exists"))
    }
}
