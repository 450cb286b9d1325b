//! Statistics service

use crate::{
    error::AppResult,
    models::statistics::{MaintenanceTrend, MaintenanceTrendQuery, StatusCount, WorkshopStatistics},
    repository::Repository,
};

#[derive(Clone)]
pub struct StatsService {
    repository: Repository,
}

impl StatsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn workshop(&self) -> AppResult<Vec<WorkshopStatistics>> {
        self.repository.statistics.workshop_statistics().await
    }

    pub async fn maintenance_trend(&self, query: MaintenanceTrendQuery) -> AppResult<Vec<MaintenanceTrend>> {
        let query = query.normalized()?;
        self.repository.statistics.maintenance_trend(&query).await
    }

    pub async fn equipment_status(&self) -> AppResult<Vec<StatusCount>> {
        self.repository.statistics.equipment_status().await
    }
}
