//! Read-only aggregate queries

use sqlx::{Executor, Pool, Postgres};

use super::filter::Filter;
use crate::{
    error::AppResult,
    models::{
        equipment::EquipmentStatus,
        statistics::{MaintenanceTrend, MaintenanceTrendQuery, StatusCount, WorkshopStatistics},
    },
};

/// Equipment and maintenance are aggregated in separate subqueries so a
/// workshop's equipment count is not multiplied by its maintenance rows.
const WORKSHOP_STATISTICS: &str = r#"
    SELECT w.workshop_id,
           w.workshop_name,
           COALESCE(eq.total_equipment, 0) AS total_equipment,
           COALESCE(eq.in_use_count, 0) AS in_use_count,
           COALESCE(mt.total_maintenance_times, 0) AS total_maintenance_times
    FROM workshop w
    LEFT JOIN (
        SELECT workshop_id,
               COUNT(*) AS total_equipment,
               COUNT(*) FILTER (WHERE status = $1) AS in_use_count
        FROM equipment
        GROUP BY workshop_id
    ) eq ON eq.workshop_id = w.workshop_id
    LEFT JOIN (
        SELECT e.workshop_id, COUNT(*) AS total_maintenance_times
        FROM maintenance m
        JOIN equipment e ON m.equipment_id = e.equipment_id
        GROUP BY e.workshop_id
    ) mt ON mt.workshop_id = w.workshop_id
    ORDER BY w.workshop_id
"#;

const MAINTENANCE_TREND: &str = r#"
    SELECT to_char(m.maintenance_time, 'YYYY-MM') AS month,
           COUNT(*) AS maintenance_count,
           COALESCE(SUM(m.maintenance_cost), 0) AS total_cost
    FROM maintenance m
    LEFT JOIN equipment e ON m.equipment_id = e.equipment_id"#;

const MONTH_OF_MAINTENANCE: &str = "to_char(m.maintenance_time, 'YYYY-MM')";

const EQUIPMENT_STATUS: &str =
    "SELECT status, COUNT(*) AS count FROM equipment GROUP BY status ORDER BY status";

/// Equipment count per status; statuses with no equipment are omitted, so an
/// empty table yields no rows. Takes any executor so it can run inside a
/// transaction.
pub async fn count_by_status<'e, E>(executor: E) -> AppResult<Vec<StatusCount>>
where
    E: Executor<'e, Database = Postgres>,
{
    let rows = sqlx::query_as::<_, StatusCount>(EQUIPMENT_STATUS)
        .fetch_all(executor)
        .await?;
    Ok(rows)
}

#[derive(Clone)]
pub struct StatisticsRepository {
    pool: Pool<Postgres>,
}

impl StatisticsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Per-workshop equipment and maintenance counts, ordered by workshop
    pub async fn workshop_statistics(&self) -> AppResult<Vec<WorkshopStatistics>> {
        let rows = sqlx::query_as::<_, WorkshopStatistics>(WORKSHOP_STATISTICS)
            .bind(EquipmentStatus::InUse)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub fn maintenance_trend_filter(query: &MaintenanceTrendQuery) -> Filter {
        let mut filter = Filter::new(MAINTENANCE_TREND);
        filter
            .eq("m.equipment_id", query.equipment_id.as_deref())
            .eq("e.workshop_id", query.workshop_id.as_deref())
            .gte(MONTH_OF_MAINTENANCE, query.start_month.clone())
            .lte(MONTH_OF_MAINTENANCE, query.end_month.clone())
            .push("GROUP BY month ORDER BY month");
        filter
    }

    /// Monthly maintenance count and cost, oldest month first
    pub async fn maintenance_trend(&self, query: &MaintenanceTrendQuery) -> AppResult<Vec<MaintenanceTrend>> {
        Ok(Self::maintenance_trend_filter(query).fetch_all(&self.pool).await?)
    }

    /// Equipment count per status, ordered by status
    pub async fn equipment_status(&self) -> AppResult<Vec<StatusCount>> {
        count_by_status(&self.pool).await
    }
}
