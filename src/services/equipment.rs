//! Equipment service

use crate::{
    error::{AppError, AppResult},
    models::equipment::{CreateEquipment, Equipment, EquipmentQuery, EquipmentUpdateInput},
    repository::{equipment::HAS_MAINTENANCE, Repository},
};

#[derive(Clone)]
pub struct EquipmentService {
    repository: Repository,
}

impl EquipmentService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, query: &EquipmentQuery) -> AppResult<Vec<Equipment>> {
        self.repository.equipment.list(query).await
    }

    pub async fn get_by_id(&self, id: &str) -> AppResult<Equipment> {
        self.repository.equipment.get_by_id(id).await
    }

    pub async fn create(&self, data: CreateEquipment) -> AppResult<Equipment> {
        let data = data.into_new()?;
        let equipment = self.repository.equipment.create(&data).await?;
        tracing::info!(equipment_id = %equipment.equipment_id, "Equipment created");
        Ok(equipment)
    }

    /// Partial update. An in-use machine cannot be retired directly: it has
    /// to be put under repair first.
    pub async fn update(&self, id: &str, data: EquipmentUpdateInput) -> AppResult<()> {
        let patch = data.clean()?.into_patch()?;

        let mut tx = self.repository.begin().await?;

        let current = self
            .repository
            .equipment
            .lock_status(&mut tx, id)
            .await?
            .ok_or_else(|| AppError::NotFound("Equipment not found".to_string()))?;

        if let Some(next) = patch.status {
            if !current.can_transition_to(next) {
                tracing::warn!(equipment_id = %id, from = %current, to = %next, "Rejected status change");
                return Err(AppError::Validation(
                    "In-use equipment cannot be retired directly; set it under repair first".to_string(),
                ));
            }
        }

        if patch.is_empty() {
            return Err(AppError::Validation("No fields to update".to_string()));
        }

        self.repository.equipment.update(&mut tx, id, &patch).await?;
        tx.commit().await?;

        tracing::info!(equipment_id = %id, "Equipment updated");
        Ok(())
    }

    /// Delete equipment that has no maintenance history
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let mut tx = self.repository.begin().await?;

        if self.repository.equipment.lock_status(&mut tx, id).await?.is_none() {
            return Err(AppError::NotFound("Equipment not found".to_string()));
        }

        let records = self.repository.equipment.count_maintenance(&mut tx, id).await?;
        if records > 0 {
            tracing::warn!(equipment_id = %id, records, "Refused to delete equipment with maintenance history");
            return Err(AppError::Validation(HAS_MAINTENANCE.to_string()));
        }

        self.repository.equipment.delete(&mut tx, id).await?;
        tx.commit().await?;

        tracing::info!(equipment_id = %id, "Equipment deleted");
        Ok(())
    }
}
