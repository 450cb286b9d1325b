//! Equipment repository

use sqlx::{PgConnection, Pool, Postgres, QueryBuilder};

use super::filter::Filter;
use crate::{
    error::{AppError, AppResult},
    models::equipment::{Equipment, EquipmentPatch, EquipmentQuery, EquipmentStatus, NewEquipment},
};

const SELECT_EQUIPMENT: &str = r#"
    SELECT e.equipment_id, e.model, e.factory_date, e.purchase_price, e.workshop_id,
           w.workshop_name, e.responsible_person, e.status
    FROM equipment e
    LEFT JOIN workshop w ON e.workshop_id = w.workshop_id"#;

pub const DUPLICATE_ID: &str = "Equipment ID already exists";
pub const UNKNOWN_WORKSHOP: &str = "Workshop does not exist";
pub const HAS_MAINTENANCE: &str = "Equipment has maintenance records and cannot be deleted";

#[derive(Clone)]
pub struct EquipmentRepository {
    pool: Pool<Postgres>,
}

impl EquipmentRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Build the list query for the given filters
    pub fn list_filter(query: &EquipmentQuery) -> Filter {
        let mut filter = Filter::new(SELECT_EQUIPMENT);
        filter
            .eq("e.equipment_id", query.equipment_id.as_deref())
            .contains("e.model", query.model.as_deref())
            .eq("e.workshop_id", query.workshop_id.as_deref())
            .eq("e.status", query.status.as_deref())
            .contains_any(
                &["e.equipment_id", "e.model", "w.workshop_name"],
                query.keyword.as_deref(),
            )
            .push("ORDER BY e.equipment_id");
        filter
    }

    /// List equipment matching every provided filter
    pub async fn list(&self, query: &EquipmentQuery) -> AppResult<Vec<Equipment>> {
        Ok(Self::list_filter(query).fetch_all(&self.pool).await?)
    }

    /// Get equipment by ID
    pub async fn get_by_id(&self, id: &str) -> AppResult<Equipment> {
        sqlx::query_as::<_, Equipment>(&format!("{} WHERE e.equipment_id = $1", SELECT_EQUIPMENT))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("Equipment not found".to_string()))
    }

    /// Insert equipment; the primary key decides duplicates
    pub async fn create(&self, data: &NewEquipment) -> AppResult<Equipment> {
        sqlx::query_as::<_, Equipment>(
            r#"
            WITH inserted AS (
                INSERT INTO equipment (equipment_id, model, factory_date, purchase_price,
                                       workshop_id, responsible_person, status)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                RETURNING *
            )
            SELECT e.equipment_id, e.model, e.factory_date, e.purchase_price, e.workshop_id,
                   w.workshop_name, e.responsible_person, e.status
            FROM inserted e
            LEFT JOIN workshop w ON e.workshop_id = w.workshop_id
            "#,
        )
        .bind(&data.equipment_id)
        .bind(&data.model)
        .bind(data.factory_date)
        .bind(data.purchase_price)
        .bind(&data.workshop_id)
        .bind(&data.responsible_person)
        .bind(data.status)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::from(e)
                .on_unique_violation(DUPLICATE_ID)
                .on_foreign_key_violation(UNKNOWN_WORKSHOP)
        })
    }

    /// Lock the row for the rest of the transaction and return its status
    pub async fn lock_status(&self, conn: &mut PgConnection, id: &str) -> AppResult<Option<EquipmentStatus>> {
        let status = sqlx::query_scalar::<_, EquipmentStatus>(
            "SELECT status FROM equipment WHERE equipment_id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(conn)
        .await?;
        Ok(status)
    }

    /// Build the partial UPDATE for a non-empty patch
    pub fn update_query(id: &str, patch: &EquipmentPatch) -> QueryBuilder<'static, Postgres> {
        let mut builder = QueryBuilder::new("UPDATE equipment SET ");
        let mut sets = builder.separated(", ");

        if let Some(v) = &patch.equipment_id {
            sets.push("equipment_id = ").push_bind_unseparated(v.clone());
        }
        if let Some(v) = &patch.model {
            sets.push("model = ").push_bind_unseparated(v.clone());
        }
        if let Some(v) = patch.factory_date {
            sets.push("factory_date = ").push_bind_unseparated(v);
        }
        if let Some(v) = patch.purchase_price {
            sets.push("purchase_price = ").push_bind_unseparated(v);
        }
        if let Some(v) = &patch.workshop_id {
            sets.push("workshop_id = ").push_bind_unseparated(v.clone());
        }
        if let Some(v) = &patch.responsible_person {
            sets.push("responsible_person = ").push_bind_unseparated(v.clone());
        }
        if let Some(v) = patch.status {
            sets.push("status = ").push_bind_unseparated(v);
        }

        builder.push(" WHERE equipment_id = ").push_bind(id.to_string());
        builder
    }

    /// Apply a partial update inside the caller's transaction
    pub async fn update(&self, conn: &mut PgConnection, id: &str, patch: &EquipmentPatch) -> AppResult<()> {
        Self::update_query(id, patch)
            .build()
            .execute(conn)
            .await
            .map_err(|e| {
                AppError::from(e)
                    .on_unique_violation(DUPLICATE_ID)
                    .on_foreign_key_violation(UNKNOWN_WORKSHOP)
            })?;
        Ok(())
    }

    /// Number of maintenance records referencing the equipment
    pub async fn count_maintenance(&self, conn: &mut PgConnection, id: &str) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM maintenance WHERE equipment_id = $1")
            .bind(id)
            .fetch_one(conn)
            .await?;
        Ok(count)
    }

    /// Delete equipment inside the caller's transaction
    pub async fn delete(&self, conn: &mut PgConnection, id: &str) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM equipment WHERE equipment_id = $1")
            .bind(id)
            .execute(conn)
            .await
            .map_err(|e| AppError::from(e).on_foreign_key_violation(HAS_MAINTENANCE))?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Equipment not found".to_string()));
        }
        Ok(())
    }
}
