//! Equipment API endpoints

use axum::{
    extract::{Path, State},
    Json,
};

use super::{
    ApiJson, ApiQuery, DataResponse, EquipmentListResponse, EquipmentResponse, MessageResponse,
};
use crate::{
    error::AppResult,
    models::equipment::{CreateEquipment, EquipmentQuery, EquipmentUpdateInput},
    AppState,
};

/// List equipment, filtered by any combination of query parameters
#[utoipa::path(
    get,
    path = "/equipment",
    tag = "equipment",
    params(EquipmentQuery),
    responses(
        (status = 200, description = "Equipment list (in `data`), ordered by equipment ID", body = EquipmentListResponse)
    )
)]
pub async fn list_equipment(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<EquipmentQuery>,
) -> AppResult<Json<EquipmentListResponse>> {
    let equipment = state.services.equipment.list(&query).await?;
    Ok(Json(DataResponse::new(equipment)))
}

/// Get equipment by ID
#[utoipa::path(
    get,
    path = "/equipment/{id}",
    tag = "equipment",
    params(("id" = String, Path, description = "Equipment ID")),
    responses(
        (status = 200, description = "Equipment details (in `data`)", body = EquipmentResponse),
        (status = 404, description = "Equipment not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_equipment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<EquipmentResponse>> {
    let equipment = state.services.equipment.get_by_id(&id).await?;
    Ok(Json(DataResponse::new(equipment)))
}

/// Create equipment
#[utoipa::path(
    post,
    path = "/equipment",
    tag = "equipment",
    request_body = CreateEquipment,
    responses(
        (status = 200, description = "Equipment created (in `data`)", body = EquipmentResponse),
        (status = 400, description = "Invalid payload or duplicate equipment ID", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_equipment(
    State(state): State<AppState>,
    ApiJson(data): ApiJson<CreateEquipment>,
) -> AppResult<Json<EquipmentResponse>> {
    let equipment = state.services.equipment.create(data).await?;
    Ok(Json(DataResponse::new(equipment)))
}

/// Update equipment
#[utoipa::path(
    put,
    path = "/equipment/{id}",
    tag = "equipment",
    params(("id" = String, Path, description = "Equipment ID")),
    request_body = EquipmentUpdateInput,
    responses(
        (status = 200, description = "Equipment updated", body = MessageResponse),
        (status = 400, description = "Invalid payload, empty update or forbidden status change", body = crate::error::ErrorResponse),
        (status = 404, description = "Equipment not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_equipment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(data): ApiJson<EquipmentUpdateInput>,
) -> AppResult<Json<MessageResponse>> {
    state.services.equipment.update(&id, data).await?;
    Ok(Json(MessageResponse::new("Updated successfully")))
}

/// Delete equipment without maintenance history
#[utoipa::path(
    delete,
    path = "/equipment/{id}",
    tag = "equipment",
    params(("id" = String, Path, description = "Equipment ID")),
    responses(
        (status = 200, description = "Equipment deleted", body = MessageResponse),
        (status = 400, description = "Equipment has maintenance records", body = crate::error::ErrorResponse),
        (status = 404, description = "Equipment not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_equipment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    state.services.equipment.delete(&id).await?;
    Ok(Json(MessageResponse::new("Deleted successfully")))
}
