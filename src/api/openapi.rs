//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, equipment, health, history, inspectors, users};
use crate::error::ErrorResponse;
use crate::models::{
    assignment::{Assignment, AssignmentDetails, ConditionChange},
    equipment::{CreateEquipment, Equipment, EquipmentDetails, EquipmentListItem},
    history::HistoryEntry,
    inspector::{CreateInspector, Inspector},
    user::{CreateUser, LoginRequest, LoginResponse, Role, User},
};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "EquipTrack API",
        version = "1.0.0",
        description = "Field Inspection Equipment Tracking REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        // Auth
        auth::login,
        auth::me,
        // Users
        users::create_user,
        users::get_user,
        // Equipment
        equipment::list_equipment,
        equipment::get_equipment,
        equipment::create_equipment,
        equipment::assign_equipment,
        equipment::return_equipment,
        equipment::update_condition,
        equipment::record_maintenance,
        equipment::deactivate_equipment,
        equipment::reactivate_equipment,
        equipment::list_assignments,
        // History
        history::get_history,
        history::add_notes,
        history::archive_entry,
        // Inspectors
        inspectors::list_inspectors,
        inspectors::get_inspector,
        inspectors::create_inspector,
        inspectors::deactivate_inspector,
        inspectors::get_inspector_assignments,
    ),
    components(schemas(
        ErrorResponse,
        Equipment,
        EquipmentDetails,
        EquipmentListItem,
        CreateEquipment,
        Assignment,
        AssignmentDetails,
        ConditionChange,
        HistoryEntry,
        Inspector,
        CreateInspector,
        LoginRequest,
        LoginResponse,
        Role,
        User,
        CreateUser,
        equipment::AssignRequest,
        equipment::ReturnRequest,
        equipment::ConditionRequest,
        equipment::MaintenanceRequest,
        equipment::AssignmentResponse,
        history::AddNotesRequest,
        health::HealthResponse,
    )),
    tags(
        (name = "health", description = "Service health"),
        (name = "auth", description = "Authentication"),
        (name = "users", description = "User accounts"),
        (name = "equipment", description = "Equipment lifecycle"),
        (name = "history", description = "Audit trail"),
        (name = "inspectors", description = "Field personnel")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
