//! Maintenance record API endpoints

use axum::{
    extract::{Path, State},
    Json,
};

use super::{
    ApiJson, ApiQuery, DataResponse, MaintenanceListResponse, MaintenanceResponse, MessageResponse,
};
use crate::{
    error::AppResult,
    models::maintenance::{CreateMaintenance, MaintenanceQuery, MaintenanceUpdateInput},
    AppState,
};

/// List maintenance records, newest first
#[utoipa::path(
    get,
    path = "/maintenance",
    tag = "maintenance",
    params(MaintenanceQuery),
    responses(
        (status = 200, description = "Maintenance records (in `data`)", body = MaintenanceListResponse),
        (status = 400, description = "Unparseable time range", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_maintenance(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<MaintenanceQuery>,
) -> AppResult<Json<MaintenanceListResponse>> {
    let records = state.services.maintenance.list(query).await?;
    Ok(Json(DataResponse::new(records)))
}

/// Full maintenance history of one equipment
#[utoipa::path(
    get,
    path = "/maintenance/equipment/{equipment_id}",
    tag = "maintenance",
    params(("equipment_id" = String, Path, description = "Equipment ID")),
    responses(
        (status = 200, description = "Maintenance records (in `data`), newest first", body = MaintenanceListResponse)
    )
)]
pub async fn list_equipment_maintenance(
    State(state): State<AppState>,
    Path(equipment_id): Path<String>,
) -> AppResult<Json<MaintenanceListResponse>> {
    let records = state.services.maintenance.list_by_equipment(&equipment_id).await?;
    Ok(Json(DataResponse::new(records)))
}

/// Create a maintenance record
#[utoipa::path(
    post,
    path = "/maintenance",
    tag = "maintenance",
    request_body = CreateMaintenance,
    responses(
        (status = 200, description = "Maintenance record created (in `data`)", body = MaintenanceResponse),
        (status = 400, description = "Invalid payload, unknown equipment or duplicate ID", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_maintenance(
    State(state): State<AppState>,
    ApiJson(data): ApiJson<CreateMaintenance>,
) -> AppResult<Json<MaintenanceResponse>> {
    let record = state.services.maintenance.create(data).await?;
    Ok(Json(DataResponse::new(record)))
}

/// Update a maintenance record
#[utoipa::path(
    put,
    path = "/maintenance/{id}",
    tag = "maintenance",
    params(("id" = String, Path, description = "Maintenance ID")),
    request_body = MaintenanceUpdateInput,
    responses(
        (status = 200, description = "Maintenance record updated", body = MessageResponse),
        (status = 400, description = "Invalid payload or empty update", body = crate::error::ErrorResponse),
        (status = 404, description = "Maintenance record not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_maintenance(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(data): ApiJson<MaintenanceUpdateInput>,
) -> AppResult<Json<MessageResponse>> {
    state.services.maintenance.update(&id, data).await?;
    Ok(Json(MessageResponse::new("Updated successfully")))
}

/// Delete a maintenance record
#[utoipa::path(
    delete,
    path = "/maintenance/{id}",
    tag = "maintenance",
    params(("id" = String, Path, description = "Maintenance ID")),
    responses(
        (status = 200, description = "Maintenance record deleted", body = MessageResponse)
    )
)]
pub async fn delete_maintenance(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    state.services.maintenance.delete(&id).await?;
    Ok(Json(MessageResponse::new("Deleted successfully")))
}
