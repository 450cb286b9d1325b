//! Workshop API endpoints

use axum::{extract::State, Json};

use super::{ApiJson, DataResponse, WorkshopListResponse, WorkshopResponse};
use crate::{
    error::AppResult,
    models::workshop::CreateWorkshop,
    AppState,
};

/// List all workshops
#[utoipa::path(
    get,
    path = "/workshop",
    tag = "workshop",
    responses(
        (status = 200, description = "Workshops (in `data`), ordered by workshop ID", body = WorkshopListResponse)
    )
)]
pub async fn list_workshops(
    State(state): State<AppState>,
) -> AppResult<Json<WorkshopListResponse>> {
    let workshops = state.services.workshops.list().await?;
    Ok(Json(DataResponse::new(workshops)))
}

/// Create a workshop
#[utoipa::path(
    post,
    path = "/workshop",
    tag = "workshop",
    request_body = CreateWorkshop,
    responses(
        (status = 200, description = "Workshop created (in `data`)", body = WorkshopResponse),
        (status = 400, description = "Invalid payload or duplicate workshop ID", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_workshop(
    State(state): State<AppState>,
    ApiJson(data): ApiJson<CreateWorkshop>,
) -> AppResult<Json<WorkshopResponse>> {
    let workshop = state.services.workshops.create(data).await?;
    Ok(Json(DataResponse::new(workshop)))
}
