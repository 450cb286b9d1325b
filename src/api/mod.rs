//! API handlers for the equipment ledger REST endpoints

pub mod equipment;
pub mod health;
pub mod maintenance;
pub mod openapi;
pub mod stats;
pub mod workshops;

use axum::{
    extract::{FromRequest, FromRequestParts},
    routing::get,
    Router,
};
use serde::Serialize;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::ToSchema;

use crate::{
    error::AppError,
    models::{Equipment, Maintenance, MaintenanceTrend, StatusCount, Workshop, WorkshopStatistics},
    AppState,
};

/// JSON body extractor whose rejections use the error envelope
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// Query-string extractor whose rejections use the error envelope
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct ApiQuery<T>(pub T);

/// Success envelope carrying data: `{ "success": true, "data": ... }`
#[derive(Serialize, ToSchema)]
#[aliases(
    EquipmentResponse = DataResponse<Equipment>,
    EquipmentListResponse = DataResponse<Vec<Equipment>>,
    MaintenanceResponse = DataResponse<Maintenance>,
    MaintenanceListResponse = DataResponse<Vec<Maintenance>>,
    WorkshopResponse = DataResponse<Workshop>,
    WorkshopListResponse = DataResponse<Vec<Workshop>>,
    WorkshopStatisticsResponse = DataResponse<Vec<WorkshopStatistics>>,
    MaintenanceTrendResponse = DataResponse<Vec<MaintenanceTrend>>,
    StatusCountResponse = DataResponse<Vec<StatusCount>>
)]
pub struct DataResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self { success: true, data }
    }
}

/// Success envelope carrying a message: `{ "success": true, "message": ... }`
#[derive(Serialize, ToSchema)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Self {
        Self {
            success: true,
            message: message.to_string(),
        }
    }
}

/// Create the application router with all routes
pub fn router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Equipment
        .route(
            "/equipment",
            get(equipment::list_equipment).post(equipment::create_equipment),
        )
        .route(
            "/equipment/:id",
            get(equipment::get_equipment)
                .put(equipment::update_equipment)
                .delete(equipment::delete_equipment),
        )
        // Maintenance
        .route(
            "/maintenance",
            get(maintenance::list_maintenance).post(maintenance::create_maintenance),
        )
        .route(
            "/maintenance/equipment/:equipment_id",
            get(maintenance::list_equipment_maintenance),
        )
        .route(
            "/maintenance/:id",
            axum::routing::put(maintenance::update_maintenance)
                .delete(maintenance::delete_maintenance),
        )
        // Workshops
        .route(
            "/workshop",
            get(workshops::list_workshops).post(workshops::create_workshop),
        )
        // Statistics
        .route("/statistics/workshop", get(stats::workshop_statistics))
        .route("/statistics/maintenance-trend", get(stats::maintenance_trend))
        .route("/statistics/equipment-status", get(stats::equipment_status))
        .with_state(state);

    Router::new()
        .nest("/api", api)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
