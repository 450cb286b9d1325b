//! Business logic services

pub mod equipment;
pub mod maintenance;
pub mod stats;
pub mod workshops;

use crate::{error::AppResult, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub equipment: equipment::EquipmentService,
    pub maintenance: maintenance::MaintenanceService,
    pub workshops: workshops::WorkshopsService,
    pub stats: stats::StatsService,
    repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        Self {
            equipment: equipment::EquipmentService::new(repository.clone()),
            maintenance: maintenance::MaintenanceService::new(repository.clone()),
            workshops: workshops::WorkshopsService::new(repository.clone()),
            stats: stats::StatsService::new(repository.clone()),
            repository,
        }
    }

    /// Check that the database answers
    pub async fn ping(&self) -> AppResult<()> {
        self.repository.ping().await
    }

    /// Close the connection pool once the server has stopped
    pub async fn shutdown(&self) {
        self.repository.pool.close().await;
    }
}
