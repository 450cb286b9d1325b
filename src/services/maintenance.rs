//! Maintenance records service

use chrono::NaiveDateTime;

use crate::{
    error::{AppError, AppResult},
    models::{
        fields::{parse_range_end, parse_range_start},
        maintenance::{CreateMaintenance, Maintenance, MaintenanceQuery, MaintenanceUpdateInput},
    },
    repository::{
        maintenance::{MaintenanceFilter, UNKNOWN_EQUIPMENT},
        Repository,
    },
};

#[derive(Clone)]
pub struct MaintenanceService {
    repository: Repository,
}

impl MaintenanceService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, query: MaintenanceQuery) -> AppResult<Vec<Maintenance>> {
        let filter = Self::filter_from_query(query)?;
        self.repository.maintenance.list(&filter).await
    }

    /// Parse the time range bounds; a bare end date covers the whole day.
    pub fn filter_from_query(query: MaintenanceQuery) -> AppResult<MaintenanceFilter> {
        Ok(MaintenanceFilter {
            equipment_id: query.equipment_id,
            time_start: time_bound(query.maintenance_time_start, parse_range_start, "maintenance_time_start")?,
            time_end: time_bound(query.maintenance_time_end, parse_range_end, "maintenance_time_end")?,
            fault_type: query.fault_type,
            workshop_id: query.workshop_id,
        })
    }

    pub async fn list_by_equipment(&self, equipment_id: &str) -> AppResult<Vec<Maintenance>> {
        self.repository.maintenance.list_by_equipment(equipment_id).await
    }

    /// Record a maintenance intervention on an existing equipment
    pub async fn create(&self, data: CreateMaintenance) -> AppResult<Maintenance> {
        let data = data.into_new()?;

        let mut tx = self.repository.begin().await?;

        if !self.repository.maintenance.lock_equipment(&mut tx, &data.equipment_id).await? {
            return Err(AppError::Validation(UNKNOWN_EQUIPMENT.to_string()));
        }

        let record = self.repository.maintenance.create(&mut tx, &data).await?;
        tx.commit().await?;

        tracing::info!(
            maintenance_id = %record.maintenance_id,
            equipment_id = %record.equipment_id,
            "Maintenance record created"
        );
        Ok(record)
    }

    pub async fn update(&self, id: &str, data: MaintenanceUpdateInput) -> AppResult<()> {
        let patch = data.clean()?.into_patch()?;

        let mut tx = self.repository.begin().await?;

        if !self.repository.maintenance.lock(&mut tx, id).await? {
            return Err(AppError::NotFound("Maintenance record not found".to_string()));
        }

        if patch.is_empty() {
            return Err(AppError::Validation("No fields to update".to_string()));
        }

        self.repository.maintenance.update(&mut tx, id, &patch).await?;
        tx.commit().await?;

        tracing::info!(maintenance_id = %id, "Maintenance record updated");
        Ok(())
    }

    /// Maintenance records have no dependents: deletion is unconditional and
    /// deleting an unknown ID still succeeds.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let deleted = self.repository.maintenance.delete(id).await?;
        tracing::info!(maintenance_id = %id, deleted, "Maintenance record deleted");
        Ok(())
    }
}

fn time_bound(
    value: Option<String>,
    parse: fn(&str) -> Option<NaiveDateTime>,
    name: &str,
) -> AppResult<Option<NaiveDateTime>> {
    match value.filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(v) => parse(&v)
            .map(Some)
            .ok_or_else(|| AppError::Validation(format!("{} must be a date or timestamp", name))),
    }
}
