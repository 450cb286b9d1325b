//! Maintenance records repository

use chrono::NaiveDateTime;
use sqlx::{PgConnection, Pool, Postgres, QueryBuilder};

use super::filter::Filter;
use crate::{
    error::{AppError, AppResult},
    models::maintenance::{Maintenance, MaintenancePatch, NewMaintenance},
};

const SELECT_MAINTENANCE: &str = r#"
    SELECT m.maintenance_id, m.equipment_id, m.maintenance_time, m.fault_description,
           m.fault_type, m.maintenance_cost, e.model, e.workshop_id, w.workshop_name
    FROM maintenance m
    LEFT JOIN equipment e ON m.equipment_id = e.equipment_id
    LEFT JOIN workshop w ON e.workshop_id = w.workshop_id"#;

pub const DUPLICATE_ID: &str = "Maintenance ID already exists";
pub const UNKNOWN_EQUIPMENT: &str = "Equipment does not exist";

/// Maintenance list filters with the time range already parsed
#[derive(Debug, Default)]
pub struct MaintenanceFilter {
    pub equipment_id: Option<String>,
    pub time_start: Option<NaiveDateTime>,
    pub time_end: Option<NaiveDateTime>,
    pub fault_type: Option<String>,
    pub workshop_id: Option<String>,
}

#[derive(Clone)]
pub struct MaintenanceRepository {
    pool: Pool<Postgres>,
}

impl MaintenanceRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub fn list_filter(f: &MaintenanceFilter) -> Filter {
        let mut filter = Filter::new(SELECT_MAINTENANCE);
        filter
            .eq("m.equipment_id", f.equipment_id.as_deref())
            .gte("m.maintenance_time", f.time_start)
            .lte("m.maintenance_time", f.time_end)
            .eq("m.fault_type", f.fault_type.as_deref())
            .eq("e.workshop_id", f.workshop_id.as_deref())
            .push("ORDER BY m.maintenance_time DESC");
        filter
    }

    /// List maintenance records, newest first
    pub async fn list(&self, f: &MaintenanceFilter) -> AppResult<Vec<Maintenance>> {
        Ok(Self::list_filter(f).fetch_all(&self.pool).await?)
    }

    /// Full maintenance history of one equipment, newest first
    pub async fn list_by_equipment(&self, equipment_id: &str) -> AppResult<Vec<Maintenance>> {
        let rows = sqlx::query_as::<_, Maintenance>(&format!(
            "{} WHERE m.equipment_id = $1 ORDER BY m.maintenance_time DESC",
            SELECT_MAINTENANCE
        ))
        .bind(equipment_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Take a key-share lock on the equipment so it cannot disappear before
    /// the insert commits. Returns false when the equipment does not exist.
    pub async fn lock_equipment(&self, conn: &mut PgConnection, equipment_id: &str) -> AppResult<bool> {
        let found: Option<i32> = sqlx::query_scalar(
            "SELECT 1 FROM equipment WHERE equipment_id = $1 FOR KEY SHARE",
        )
        .bind(equipment_id)
        .fetch_optional(conn)
        .await?;
        Ok(found.is_some())
    }

    /// Insert a maintenance record inside the caller's transaction
    pub async fn create(&self, conn: &mut PgConnection, data: &NewMaintenance) -> AppResult<Maintenance> {
        sqlx::query_as::<_, Maintenance>(
            r#"
            WITH inserted AS (
                INSERT INTO maintenance (maintenance_id, equipment_id, maintenance_time,
                                         fault_description, fault_type, maintenance_cost)
                VALUES ($1, $2, $3, $4, $5, $6)
                RETURNING *
            )
            SELECT m.maintenance_id, m.equipment_id, m.maintenance_time, m.fault_description,
                   m.fault_type, m.maintenance_cost, e.model, e.workshop_id, w.workshop_name
            FROM inserted m
            LEFT JOIN equipment e ON m.equipment_id = e.equipment_id
            LEFT JOIN workshop w ON e.workshop_id = w.workshop_id
            "#,
        )
        .bind(&data.maintenance_id)
        .bind(&data.equipment_id)
        .bind(data.maintenance_time)
        .bind(&data.fault_description)
        .bind(&data.fault_type)
        .bind(data.maintenance_cost)
        .fetch_one(conn)
        .await
        .map_err(|e| {
            AppError::from(e)
                .on_unique_violation(DUPLICATE_ID)
                .on_foreign_key_violation(UNKNOWN_EQUIPMENT)
        })
    }

    /// Lock a maintenance record; returns false when it does not exist
    pub async fn lock(&self, conn: &mut PgConnection, id: &str) -> AppResult<bool> {
        let found: Option<i32> = sqlx::query_scalar(
            "SELECT 1 FROM maintenance WHERE maintenance_id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(conn)
        .await?;
        Ok(found.is_some())
    }

    pub fn update_query(id: &str, patch: &MaintenancePatch) -> QueryBuilder<'static, Postgres> {
        let mut builder = QueryBuilder::new("UPDATE maintenance SET ");
        let mut sets = builder.separated(", ");

        if let Some(v) = &patch.maintenance_id {
            sets.push("maintenance_id = ").push_bind_unseparated(v.clone());
        }
        if let Some(v) = &patch.equipment_id {
            sets.push("equipment_id = ").push_bind_unseparated(v.clone());
        }
        if let Some(v) = patch.maintenance_time {
            sets.push("maintenance_time = ").push_bind_unseparated(v);
        }
        if let Some(v) = &patch.fault_description {
            sets.push("fault_description = ").push_bind_unseparated(v.clone());
        }
        if let Some(v) = &patch.fault_type {
            sets.push("fault_type = ").push_bind_unseparated(v.clone());
        }
        if let Some(v) = patch.maintenance_cost {
            sets.push("maintenance_cost = ").push_bind_unseparated(v);
        }

        builder.push(" WHERE maintenance_id = ").push_bind(id.to_string());
        builder
    }

    /// Apply a partial update inside the caller's transaction
    pub async fn update(&self, conn: &mut PgConnection, id: &str, patch: &MaintenancePatch) -> AppResult<()> {
        Self::update_query(id, patch)
            .build()
            .execute(conn)
            .await
            .map_err(|e| {
                AppError::from(e)
                    .on_unique_violation(DUPLICATE_ID)
                    .on_foreign_key_violation(UNKNOWN_EQUIPMENT)
            })?;
        Ok(())
    }

    /// Delete a maintenance record. Deleting a missing record is not an error.
    pub async fn delete(&self, id: &str) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM maintenance WHERE maintenance_id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
