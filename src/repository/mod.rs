//! Repository layer for database operations

pub mod equipment;
pub mod filter;
pub mod maintenance;
pub mod statistics;
pub mod workshops;

use sqlx::{Pool, Postgres, Transaction};

use crate::error::AppResult;

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub equipment: equipment::EquipmentRepository,
    pub maintenance: maintenance::MaintenanceRepository,
    pub workshops: workshops::WorkshopsRepository,
    pub statistics: statistics::StatisticsRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            equipment: equipment::EquipmentRepository::new(pool.clone()),
            maintenance: maintenance::MaintenanceRepository::new(pool.clone()),
            workshops: workshops::WorkshopsRepository::new(pool.clone()),
            statistics: statistics::StatisticsRepository::new(pool.clone()),
            pool,
        }
    }

    /// Start a transaction for a check-then-write sequence
    pub async fn begin(&self) -> AppResult<Transaction<'static, Postgres>> {
        Ok(self.pool.begin().await?)
    }

    /// Round-trip to the database (readiness probe)
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
