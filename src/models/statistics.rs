//! Aggregate statistics rows

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::fields::first_error;
use crate::error::AppResult;

static MONTH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-(0[1-9]|1[0-2])$").expect("valid month pattern"));

/// Equipment and maintenance counts for one workshop
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct WorkshopStatistics {
    pub workshop_id: String,
    pub workshop_name: String,
    /// Number of equipment rows in the workshop
    pub total_equipment: i64,
    /// Number of those currently in use
    pub in_use_count: i64,
    /// Number of maintenance records on the workshop's equipment
    pub total_maintenance_times: i64,
}

/// Maintenance volume for one calendar month
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct MaintenanceTrend {
    /// YYYY-MM
    pub month: String,
    pub maintenance_count: i64,
    #[schema(value_type = String, example = "12800.00")]
    pub total_cost: Decimal,
}

/// Equipment count for one status value
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct StatusCount {
    pub status: String,
    pub count: i64,
}

/// Query parameters for the maintenance trend
#[derive(Debug, Default, Deserialize, Validate, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct MaintenanceTrendQuery {
    pub equipment_id: Option<String>,
    pub workshop_id: Option<String>,
    /// First month included (YYYY-MM)
    #[validate(regex(path = *MONTH_RE, message = "start_month must be formatted as YYYY-MM"))]
    pub start_month: Option<String>,
    /// Last month included (YYYY-MM)
    #[validate(regex(path = *MONTH_RE, message = "end_month must be formatted as YYYY-MM"))]
    pub end_month: Option<String>,
}

impl MaintenanceTrendQuery {
    const FIELDS: &'static [&'static str] = &["equipment_id", "workshop_id", "start_month", "end_month"];

    /// Blank parameters count as absent; present month bounds must be well formed.
    pub fn normalized(self) -> AppResult<Self> {
        let query = Self {
            equipment_id: self.equipment_id.filter(|s| !s.is_empty()),
            workshop_id: self.workshop_id.filter(|s| !s.is_empty()),
            start_month: self.start_month.filter(|s| !s.is_empty()),
            end_month: self.end_month.filter(|s| !s.is_empty()),
        };
        query.validate().map_err(|e| first_error(&e, Self::FIELDS))?;
        Ok(query)
    }
}
