//! Maintenance record model

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use super::fields::{
    amount_in_range, first_error, fits_varchar_50, non_negative, parse_timestamp, required,
    timestamp, timestamp_value, RawField,
};
use crate::error::{AppError, AppResult};

/// Maintenance record, joined with the equipment model and workshop
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Maintenance {
    pub maintenance_id: String,
    pub equipment_id: String,
    /// Time of the intervention (YYYY-MM-DD HH:MM:SS)
    #[serde(serialize_with = "timestamp::serialize")]
    #[schema(value_type = String, example = "2024-01-15 09:30:00")]
    pub maintenance_time: NaiveDateTime,
    pub fault_description: String,
    pub fault_type: Option<String>,
    #[schema(value_type = String, example = "3200.00")]
    pub maintenance_cost: Decimal,
    /// Model of the repaired equipment
    pub model: Option<String>,
    pub workshop_id: Option<String>,
    pub workshop_name: Option<String>,
}

/// Query parameters for the maintenance list
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct MaintenanceQuery {
    /// Exact equipment ID
    pub equipment_id: Option<String>,
    /// Inclusive lower bound (timestamp or YYYY-MM-DD)
    pub maintenance_time_start: Option<String>,
    /// Inclusive upper bound (timestamp, or YYYY-MM-DD for the whole day)
    pub maintenance_time_end: Option<String>,
    /// Exact fault type
    pub fault_type: Option<String>,
    /// Exact workshop ID of the repaired equipment
    pub workshop_id: Option<String>,
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

const TIME_MESSAGE: &str = "Maintenance time must be a valid timestamp";

/// Create maintenance record request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateMaintenance {
    #[validate(
        required(message = "Maintenance ID is required"),
        length(min = 1, message = "Maintenance ID must not be empty"),
        custom(function = "fits_varchar_50", message = "Maintenance ID must be at most 50 characters")
    )]
    pub maintenance_id: Option<String>,
    #[validate(
        required(message = "Equipment ID is required"),
        length(min = 1, message = "Equipment ID must not be empty"),
        custom(function = "fits_varchar_50", message = "Equipment ID must be at most 50 characters")
    )]
    pub equipment_id: Option<String>,
    /// YYYY-MM-DD HH:MM:SS (also accepts the T separator and RFC 3339)
    #[validate(
        required(message = "Maintenance time is required"),
        custom(function = "timestamp_value", message = "Maintenance time must be a valid timestamp")
    )]
    pub maintenance_time: Option<String>,
    #[validate(
        required(message = "Fault description is required"),
        length(min = 1, message = "Fault description must not be empty")
    )]
    pub fault_description: Option<String>,
    #[validate(custom(function = "fits_varchar_50", message = "Fault type must be at most 50 characters"))]
    pub fault_type: Option<String>,
    #[validate(
        required(message = "Maintenance cost is required"),
        custom(function = "non_negative", message = "Maintenance cost must be a non-negative number"),
        custom(function = "amount_in_range", message = "Maintenance cost must be less than 10000000000")
    )]
    #[schema(value_type = f64)]
    pub maintenance_cost: Option<Decimal>,
}

/// Validated maintenance record, ready to insert
#[derive(Debug, Clone, PartialEq)]
pub struct NewMaintenance {
    pub maintenance_id: String,
    pub equipment_id: String,
    pub maintenance_time: NaiveDateTime,
    pub fault_description: String,
    pub fault_type: Option<String>,
    pub maintenance_cost: Decimal,
}

impl CreateMaintenance {
    const FIELDS: &'static [&'static str] = &[
        "maintenance_id",
        "equipment_id",
        "maintenance_time",
        "fault_description",
        "fault_type",
        "maintenance_cost",
    ];

    pub fn into_new(self) -> AppResult<NewMaintenance> {
        self.validate().map_err(|e| first_error(&e, Self::FIELDS))?;

        let maintenance_time = parse_timestamp(&required(self.maintenance_time, "maintenance_time")?)
            .ok_or_else(|| AppError::Validation(TIME_MESSAGE.to_string()))?;

        Ok(NewMaintenance {
            maintenance_id: required(self.maintenance_id, "maintenance_id")?,
            equipment_id: required(self.equipment_id, "equipment_id")?,
            maintenance_time,
            fault_description: required(self.fault_description, "fault_description")?,
            fault_type: self.fault_type.filter(|t| !t.is_empty()),
            maintenance_cost: required(self.maintenance_cost, "maintenance_cost")?,
        })
    }
}

// ---------------------------------------------------------------------------
// Update: raw input -> cleaned update -> validated patch
// ---------------------------------------------------------------------------

/// Update maintenance record request, as received. Empty strings and nulls
/// mean "leave unchanged", except `fault_type` where they clear it.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct MaintenanceUpdateInput {
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub maintenance_id: RawField,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub equipment_id: RawField,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub maintenance_time: RawField,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub fault_description: RawField,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub fault_type: RawField,
    #[serde(default)]
    #[schema(value_type = Option<f64>)]
    pub maintenance_cost: RawField,
}

/// Cleaned update: only the fields the client actually provided
#[derive(Debug, Default, PartialEq, Validate)]
pub struct MaintenanceUpdate {
    #[validate(
        length(min = 1, message = "Maintenance ID must not be empty"),
        custom(function = "fits_varchar_50", message = "Maintenance ID must be at most 50 characters")
    )]
    pub maintenance_id: Option<String>,
    #[validate(
        length(min = 1, message = "Equipment ID must not be empty"),
        custom(function = "fits_varchar_50", message = "Equipment ID must be at most 50 characters")
    )]
    pub equipment_id: Option<String>,
    #[validate(custom(function = "timestamp_value", message = "Maintenance time must be a valid timestamp"))]
    pub maintenance_time: Option<String>,
    #[validate(length(min = 1, message = "Fault description must not be empty"))]
    pub fault_description: Option<String>,
    /// `Some(None)` clears the fault type
    #[validate(custom(function = "fits_varchar_50", message = "Fault type must be at most 50 characters"))]
    pub fault_type: Option<Option<String>>,
    #[validate(
        custom(function = "non_negative", message = "Maintenance cost must be a non-negative number"),
        custom(function = "amount_in_range", message = "Maintenance cost must be less than 10000000000")
    )]
    pub maintenance_cost: Option<Decimal>,
}

/// Validated partial update
#[derive(Debug, Default, Clone, PartialEq)]
pub struct MaintenancePatch {
    pub maintenance_id: Option<String>,
    pub equipment_id: Option<String>,
    pub maintenance_time: Option<NaiveDateTime>,
    pub fault_description: Option<String>,
    pub fault_type: Option<Option<String>>,
    pub maintenance_cost: Option<Decimal>,
}

impl MaintenanceUpdateInput {
    pub fn clean(self) -> AppResult<MaintenanceUpdate> {
        Ok(MaintenanceUpdate {
            maintenance_id: self.maintenance_id.decode("maintenance_id")?,
            equipment_id: self.equipment_id.decode("equipment_id")?,
            maintenance_time: self.maintenance_time.decode("maintenance_time")?,
            fault_description: self.fault_description.decode("fault_description")?,
            fault_type: self.fault_type.decode_nullable("fault_type")?,
            maintenance_cost: self.maintenance_cost.decode("maintenance_cost")?,
        })
    }
}

impl MaintenanceUpdate {
    pub fn into_patch(self) -> AppResult<MaintenancePatch> {
        self.validate()
            .map_err(|e| first_error(&e, CreateMaintenance::FIELDS))?;

        let maintenance_time = self
            .maintenance_time
            .map(|t| parse_timestamp(&t).ok_or_else(|| AppError::Validation(TIME_MESSAGE.to_string())))
            .transpose()?;

        Ok(MaintenancePatch {
            maintenance_id: self.maintenance_id,
            equipment_id: self.equipment_id,
            maintenance_time,
            fault_description: self.fault_description,
            fault_type: self.fault_type,
            maintenance_cost: self.maintenance_cost,
        })
    }
}

impl MaintenancePatch {
    pub fn is_empty(&self) -> bool {
        self.maintenance_id.is_none()
            && self.equipment_id.is_none()
            && self.maintenance_time.is_none()
            && self.fault_description.is_none()
            && self.fault_type.is_none()
            && self.maintenance_cost.is_none()
    }
}
