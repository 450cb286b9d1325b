//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{equipment, health, maintenance, stats, workshops};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Equipment Ledger API",
        version = "1.0.0",
        description = "Industrial equipment, maintenance history and workshop statistics. \
                       Successful responses are wrapped as `{ success: true, data }` or \
                       `{ success: true, message }`; failures as `{ success: false, error }`."
    ),
    servers(
        (url = "/api", description = "API")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Equipment
        equipment::list_equipment,
        equipment::get_equipment,
        equipment::create_equipment,
        equipment::update_equipment,
        equipment::delete_equipment,
        // Maintenance
        maintenance::list_maintenance,
        maintenance::list_equipment_maintenance,
        maintenance::create_maintenance,
        maintenance::update_maintenance,
        maintenance::delete_maintenance,
        // Workshops
        workshops::list_workshops,
        workshops::create_workshop,
        // Statistics
        stats::workshop_statistics,
        stats::maintenance_trend,
        stats::equipment_status,
    ),
    components(
        schemas(
            // Equipment
            crate::models::equipment::Equipment,
            crate::models::equipment::EquipmentStatus,
            crate::models::equipment::EquipmentQuery,
            crate::models::equipment::CreateEquipment,
            crate::models::equipment::EquipmentUpdateInput,
            // Maintenance
            crate::models::maintenance::Maintenance,
            crate::models::maintenance::MaintenanceQuery,
            crate::models::maintenance::CreateMaintenance,
            crate::models::maintenance::MaintenanceUpdateInput,
            // Workshops
            crate::models::workshop::Workshop,
            crate::models::workshop::CreateWorkshop,
            // Statistics
            crate::models::statistics::WorkshopStatistics,
            crate::models::statistics::MaintenanceTrend,
            crate::models::statistics::MaintenanceTrendQuery,
            crate::models::statistics::StatusCount,
            // Envelopes
            crate::api::EquipmentResponse,
            crate::api::EquipmentListResponse,
            crate::api::MaintenanceResponse,
            crate::api::MaintenanceListResponse,
            crate::api::WorkshopResponse,
            crate::api::WorkshopListResponse,
            crate::api::WorkshopStatisticsResponse,
            crate::api::MaintenanceTrendResponse,
            crate::api::StatusCountResponse,
            health::HealthResponse,
            crate::api::MessageResponse,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "equipment", description = "Equipment records"),
        (name = "maintenance", description = "Maintenance history"),
        (name = "workshop", description = "Workshops"),
        (name = "statistics", description = "Aggregate statistics")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
