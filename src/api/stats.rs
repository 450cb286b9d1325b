//! Statistics endpoints

use axum::{extract::State, Json};

use super::{
    ApiQuery, DataResponse, MaintenanceTrendResponse, StatusCountResponse,
    WorkshopStatisticsResponse,
};
use crate::{
    error::AppResult,
    models::statistics::MaintenanceTrendQuery,
    AppState,
};

/// Equipment and maintenance counts per workshop
#[utoipa::path(
    get,
    path = "/statistics/workshop",
    tag = "statistics",
    responses(
        (status = 200, description = "One row per workshop (in `data`)", body = WorkshopStatisticsResponse)
    )
)]
pub async fn workshop_statistics(
    State(state): State<AppState>,
) -> AppResult<Json<WorkshopStatisticsResponse>> {
    let rows = state.services.stats.workshop().await?;
    Ok(Json(DataResponse::new(rows)))
}

/// Monthly maintenance count and cost
#[utoipa::path(
    get,
    path = "/statistics/maintenance-trend",
    tag = "statistics",
    params(MaintenanceTrendQuery),
    responses(
        (status = 200, description = "One row per month (in `data`), oldest first", body = MaintenanceTrendResponse),
        (status = 400, description = "Malformed month bound", body = crate::error::ErrorResponse)
    )
)]
pub async fn maintenance_trend(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<MaintenanceTrendQuery>,
) -> AppResult<Json<MaintenanceTrendResponse>> {
    let rows = state.services.stats.maintenance_trend(query).await?;
    Ok(Json(DataResponse::new(rows)))
}

/// Equipment count per status
#[utoipa::path(
    get,
    path = "/statistics/equipment-status",
    tag = "statistics",
    responses(
        (status = 200, description = "One row per status present (in `data`)", body = StatusCountResponse)
    )
)]
pub async fn equipment_status(
    State(state): State<AppState>,
) -> AppResult<Json<StatusCountResponse>> {
    let rows = state.services.stats.equipment_status().await?;
    Ok(Json(DataResponse::new(rows)))
}
