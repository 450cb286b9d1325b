//! Equipment model

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, FromRow, Postgres};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use super::fields::{
    amount_in_range, calendar_date, first_error, fits_varchar_100, fits_varchar_50, non_negative,
    parse_date, required, RawField,
};
use crate::error::{AppError, AppResult};

// ---------------------------------------------------------------------------
// EquipmentStatus
// ---------------------------------------------------------------------------

/// Lifecycle status. The Chinese literals are the stored and wire values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum EquipmentStatus {
    /// In use
    #[serde(rename = "在用")]
    InUse,
    /// Under repair
    #[serde(rename = "维修")]
    UnderRepair,
    /// Retired
    #[serde(rename = "报废")]
    Retired,
}

impl EquipmentStatus {
    pub const ALL: [EquipmentStatus; 3] = [
        EquipmentStatus::InUse,
        EquipmentStatus::UnderRepair,
        EquipmentStatus::Retired,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EquipmentStatus::InUse => "在用",
            EquipmentStatus::UnderRepair => "维修",
            EquipmentStatus::Retired => "报废",
        }
    }

    /// In-use equipment has to go through repair before it can be retired.
    pub fn can_transition_to(&self, next: EquipmentStatus) -> bool {
        !(*self == EquipmentStatus::InUse && next == EquipmentStatus::Retired)
    }
}

impl std::fmt::Display for EquipmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for EquipmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EquipmentStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| format!("Invalid equipment status: {}", s))
    }
}

impl sqlx::Type<Postgres> for EquipmentStatus {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<Postgres>>::compatible(ty)
    }
}

impl<'r> Decode<'r, Postgres> for EquipmentStatus {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for EquipmentStatus {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        <&str as Encode<Postgres>>::encode(self.as_str(), buf)
    }
}

fn equipment_status(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<EquipmentStatus>()
        .map(|_| ())
        .map_err(|_| ValidationError::new("status"))
}

const STATUS_MESSAGE: &str = "Status must be one of: 在用, 维修, 报废";

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// Equipment record, joined with its workshop name
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Equipment {
    pub equipment_id: String,
    pub model: String,
    /// Factory date (YYYY-MM-DD)
    pub factory_date: Option<NaiveDate>,
    #[schema(value_type = String, example = "185000.00")]
    pub purchase_price: Decimal,
    pub workshop_id: String,
    /// Name of the owning workshop (NULL when the workshop row is missing)
    pub workshop_name: Option<String>,
    pub responsible_person: String,
    pub status: EquipmentStatus,
}

/// Query parameters for the equipment list
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct EquipmentQuery {
    /// Exact equipment ID
    pub equipment_id: Option<String>,
    /// Substring of the model
    pub model: Option<String>,
    /// Exact workshop ID
    pub workshop_id: Option<String>,
    /// Exact status literal
    pub status: Option<String>,
    /// Substring matched against equipment ID, model and workshop name
    pub keyword: Option<String>,
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

/// Create equipment request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateEquipment {
    #[validate(
        required(message = "Equipment ID is required"),
        length(min = 1, message = "Equipment ID must not be empty"),
        custom(function = "fits_varchar_50", message = "Equipment ID must be at most 50 characters")
    )]
    pub equipment_id: Option<String>,
    #[validate(
        required(message = "Model is required"),
        length(min = 1, message = "Model must not be empty"),
        custom(function = "fits_varchar_100", message = "Model must be at most 100 characters")
    )]
    pub model: Option<String>,
    /// Factory date (YYYY-MM-DD), empty string for none
    #[validate(custom(function = "calendar_date", message = "Factory date must be a YYYY-MM-DD date"))]
    pub factory_date: Option<String>,
    #[validate(
        required(message = "Purchase price is required"),
        custom(function = "non_negative", message = "Purchase price must be a non-negative number"),
        custom(function = "amount_in_range", message = "Purchase price must be less than 10000000000")
    )]
    #[schema(value_type = f64)]
    pub purchase_price: Option<Decimal>,
    #[validate(
        required(message = "Workshop ID is required"),
        length(min = 1, message = "Workshop ID must not be empty"),
        custom(function = "fits_varchar_50", message = "Workshop ID must be at most 50 characters")
    )]
    pub workshop_id: Option<String>,
    #[validate(
        required(message = "Responsible person is required"),
        length(min = 1, message = "Responsible person must not be empty"),
        custom(function = "fits_varchar_50", message = "Responsible person must be at most 50 characters")
    )]
    pub responsible_person: Option<String>,
    #[validate(
        required(message = "Status is required"),
        custom(function = "equipment_status", message = "Status must be one of: 在用, 维修, 报废")
    )]
    pub status: Option<String>,
}

/// Validated equipment, ready to insert
#[derive(Debug, Clone, PartialEq)]
pub struct NewEquipment {
    pub equipment_id: String,
    pub model: String,
    pub factory_date: Option<NaiveDate>,
    pub purchase_price: Decimal,
    pub workshop_id: String,
    pub responsible_person: String,
    pub status: EquipmentStatus,
}

impl CreateEquipment {
    const FIELDS: &'static [&'static str] = &[
        "equipment_id",
        "model",
        "factory_date",
        "purchase_price",
        "workshop_id",
        "responsible_person",
        "status",
    ];

    pub fn into_new(self) -> AppResult<NewEquipment> {
        self.validate().map_err(|e| first_error(&e, Self::FIELDS))?;

        let status = required(self.status, "status")?
            .parse()
            .map_err(|_| AppError::Validation(STATUS_MESSAGE.to_string()))?;

        Ok(NewEquipment {
            equipment_id: required(self.equipment_id, "equipment_id")?,
            model: required(self.model, "model")?,
            factory_date: self.factory_date.as_deref().and_then(parse_date),
            purchase_price: required(self.purchase_price, "purchase_price")?,
            workshop_id: required(self.workshop_id, "workshop_id")?,
            responsible_person: required(self.responsible_person, "responsible_person")?,
            status,
        })
    }
}

// ---------------------------------------------------------------------------
// Update: raw input -> cleaned update -> validated patch
// ---------------------------------------------------------------------------

/// Update equipment request, as received. Every field is optional; empty
/// strings and nulls mean "leave unchanged", except `factory_date` where they
/// clear the date.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct EquipmentUpdateInput {
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub equipment_id: RawField,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub model: RawField,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub factory_date: RawField,
    #[serde(default)]
    #[schema(value_type = Option<f64>)]
    pub purchase_price: RawField,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub workshop_id: RawField,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub responsible_person: RawField,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub status: RawField,
}

/// Cleaned update: only the fields the client actually provided
#[derive(Debug, Default, PartialEq, Validate)]
pub struct EquipmentUpdate {
    #[validate(
        length(min = 1, message = "Equipment ID must not be empty"),
        custom(function = "fits_varchar_50", message = "Equipment ID must be at most 50 characters")
    )]
    pub equipment_id: Option<String>,
    #[validate(
        length(min = 1, message = "Model must not be empty"),
        custom(function = "fits_varchar_100", message = "Model must be at most 100 characters")
    )]
    pub model: Option<String>,
    /// `Some(None)` clears the date
    #[validate(custom(function = "calendar_date", message = "Factory date must be a YYYY-MM-DD date"))]
    pub factory_date: Option<Option<String>>,
    #[validate(
        custom(function = "non_negative", message = "Purchase price must be a non-negative number"),
        custom(function = "amount_in_range", message = "Purchase price must be less than 10000000000")
    )]
    pub purchase_price: Option<Decimal>,
    #[validate(
        length(min = 1, message = "Workshop ID must not be empty"),
        custom(function = "fits_varchar_50", message = "Workshop ID must be at most 50 characters")
    )]
    pub workshop_id: Option<String>,
    #[validate(
        length(min = 1, message = "Responsible person must not be empty"),
        custom(function = "fits_varchar_50", message = "Responsible person must be at most 50 characters")
    )]
    pub responsible_person: Option<String>,
    #[validate(custom(function = "equipment_status", message = "Status must be one of: 在用, 维修, 报废"))]
    pub status: Option<String>,
}

/// Validated partial update
#[derive(Debug, Default, Clone, PartialEq)]
pub struct EquipmentPatch {
    pub equipment_id: Option<String>,
    pub model: Option<String>,
    pub factory_date: Option<Option<NaiveDate>>,
    pub purchase_price: Option<Decimal>,
    pub workshop_id: Option<String>,
    pub responsible_person: Option<String>,
    pub status: Option<EquipmentStatus>,
}

impl EquipmentUpdateInput {
    pub fn clean(self) -> AppResult<EquipmentUpdate> {
        Ok(EquipmentUpdate {
            equipment_id: self.equipment_id.decode("equipment_id")?,
            model: self.model.decode("model")?,
            factory_date: self.factory_date.decode_nullable("factory_date")?,
            purchase_price: self.purchase_price.decode("purchase_price")?,
            workshop_id: self.workshop_id.decode("workshop_id")?,
            responsible_person: self.responsible_person.decode("responsible_person")?,
            status: self.status.decode("status")?,
        })
    }
}

impl EquipmentUpdate {
    pub fn into_patch(self) -> AppResult<EquipmentPatch> {
        self.validate()
            .map_err(|e| first_error(&e, CreateEquipment::FIELDS))?;

        let status = self
            .status
            .map(|s| s.parse::<EquipmentStatus>())
            .transpose()
            .map_err(|_| AppError::Validation(STATUS_MESSAGE.to_string()))?;

        Ok(EquipmentPatch {
            equipment_id: self.equipment_id,
            model: self.model,
            factory_date: self.factory_date.map(|d| d.as_deref().and_then(parse_date)),
            purchase_price: self.purchase_price,
            workshop_id: self.workshop_id,
            responsible_person: self.responsible_person,
            status,
        })
    }
}

impl EquipmentPatch {
    pub fn is_empty(&self) -> bool {
        self.equipment_id.is_none()
            && self.model.is_none()
            && self.factory_date.is_none()
            && self.purchase_price.is_none()
            && self.workshop_id.is_none()
            && self.responsible_person.is_none()
            && self.status.is_none()
    }
}
