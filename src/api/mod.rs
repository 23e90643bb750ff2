//! REST API layer: route handlers, DTOs, OpenAPI document.
//!
//! Endpoints are mounted at the root, next to the WebSocket upgrade.

pub mod dto;
pub mod handlers;

use axum::Router;
use utoipa::OpenApi;

use crate::app_state::AppState;

/// Path of the generated OpenAPI document.
pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

/// OpenAPI description of every REST endpoint.
#[derive(Debug, OpenApi)]
#[openapi(
    info(title = "gatekeeper-gateway"),
    paths(
        handlers::student::create_student,
        handlers::student::list_students,
        handlers::student::get_student,
        handlers::system::health_handler,
    ),
    components(schemas(
        crate::domain::Student,
        dto::CreateStudentRequest,
        dto::CreateStudentResponse,
        crate::error::ErrorResponse,
        handlers::system::HealthResponse,
    )),
    tags(
        (name = "Students", description = "Student registry"),
        (name = "System", description = "Operational endpoints"),
    )
)]
pub struct ApiDoc;

/// Builds the complete API router with all REST endpoints and the
/// OpenAPI document (plus Swagger UI with the `swagger-ui` feature).
pub fn build_router() -> Router<AppState> {
    let router = Router::new().merge(handlers::routes());

    #[cfg(feature = "swagger-ui")]
    let router = router.merge(
        utoipa_swagger_ui::SwaggerUi::new("/swagger-ui").url(OPENAPI_PATH, ApiDoc::openapi()),
    );

    #[cfg(not(feature = "swagger-ui"))]
    let router = router.route(OPENAPI_PATH, axum::routing::get(openapi_json));

    router
}

#[cfg(not(feature = "swagger-ui"))]
async fn openapi_json() -> axum::Json<utoipa::openapi::OpenApi> {
    axum::Json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_lists_student_paths() {
        let doc = ApiDoc::openapi();
        for path in ["/add-student", "/students", "/student/{student_id}", "/health"] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
