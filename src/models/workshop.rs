//! Workshop model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::fields::{first_error, fits_varchar_100, fits_varchar_50, required};
use crate::error::AppResult;

/// Workshop record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Workshop {
    pub workshop_id: String,
    pub workshop_name: String,
}

/// Create workshop request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateWorkshop {
    #[validate(
        required(message = "Workshop ID is required"),
        length(min = 1, message = "Workshop ID must not be empty"),
        custom(function = "fits_varchar_50", message = "Workshop ID must be at most 50 characters")
    )]
    pub workshop_id: Option<String>,
    #[validate(
        required(message = "Workshop name is required"),
        length(min = 1, message = "Workshop name must not be empty"),
        custom(function = "fits_varchar_100", message = "Workshop name must be at most 100 characters")
    )]
    pub workshop_name: Option<String>,
}

impl CreateWorkshop {
    const FIELDS: &'static [&'static str] = &["workshop_id", "workshop_name"];

    pub fn into_new(self) -> AppResult<Workshop> {
        self.validate().map_err(|e| first_error(&e, Self::FIELDS))?;
        Ok(Workshop {
            workshop_id: required(self.workshop_id, "workshop_id")?,
            workshop_name: required(self.workshop_name, "workshop_name")?,
        })
    }
}
