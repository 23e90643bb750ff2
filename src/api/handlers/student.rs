//! Student handlers: create, list, get by id.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::api::dto::{CreateStudentRequest, CreateStudentResponse};
use crate::app_state::AppState;
use crate::domain::{Student, StudentId};
use crate::error::{ErrorResponse, GatewayError};

/// `POST /add-student` — Register a new student.
///
/// # Errors
///
/// Returns [`GatewayError::MissingFields`] or [`GatewayError::InvalidRequest`]
/// for a bad body, and [`GatewayError::Store`] when the insert fails.
#[utoipa::path(
    post,
    path = "/add-student",
    tag = "Students",
    summary = "Register a student",
    description = "Stores a new student record and pushes a creation event to every connected WebSocket listener. All four fields are required.",
    request_body = CreateStudentRequest,
    responses(
        (status = 201, description = "Student created", body = CreateStudentResponse),
        (status = 400, description = "Missing field or malformed body", body = ErrorResponse),
        (status = 500, description = "Store failure, including duplicate id", body = ErrorResponse),
    )
)]
pub async fn create_student(
    State(state): State<AppState>,
    payload: Result<Json<CreateStudentRequest>, JsonRejection>,
) -> Result<impl IntoResponse, GatewayError> {
    let Json(req) = payload.map_err(|e| GatewayError::InvalidRequest(e.body_text()))?;
    let student = req.into_student()?;

    state.student_service.create_student(student).await?;

    Ok((StatusCode::CREATED, Json(CreateStudentResponse::default())))
}

/// `GET /students` — List every student.
///
/// # Errors
///
/// Returns [`GatewayError::Store`] when the store cannot be queried.
#[utoipa::path(
    get,
    path = "/students",
    tag = "Students",
    summary = "List students",
    description = "Returns all student records in store order. An empty table yields an empty array.",
    responses(
        (status = 200, description = "All students", body = Vec<Student>),
        (status = 500, description = "Store failure", body = ErrorResponse),
    )
)]
pub async fn list_students(
    State(state): State<AppState>,
) -> Result<Json<Vec<Student>>, GatewayError> {
    Ok(Json(state.student_service.list_students().await?))
}

/// `GET /student/{student_id}` — Fetch one student.
///
/// # Errors
///
/// Returns [`GatewayError::StudentNotFound`] if the id is unknown and
/// [`GatewayError::Store`] when the store cannot be queried.
#[utoipa::path(
    get,
    path = "/student/{student_id}",
    tag = "Students",
    summary = "Get a student",
    description = "Returns the student record with the given identifier.",
    params(
        ("student_id" = String, Path, description = "Student identifier"),
    ),
    responses(
        (status = 200, description = "Student record", body = Student),
        (status = 404, description = "Student not found", body = ErrorResponse),
        (status = 500, description = "Store failure", body = ErrorResponse),
    )
)]
pub async fn get_student(
    State(state): State<AppState>,
    Path(student_id): Path<String>,
) -> Result<Json<Student>, GatewayError> {
    let student = state
        .student_service
        .get_student(&StudentId::new(student_id))
        .await?;
    Ok(Json(student))
}

/// Student routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/add-student", post(create_student))
        .route("/students", get(list_students))
        .route("/student/{student_id}", get(get_student))
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, header};
    use tower::ServiceExt;

    use super::*;
    use crate::domain::NotificationHub;
    use crate::error::{MISSING_FIELDS_MESSAGE, STUDENT_NOT_FOUND_MESSAGE};
    use crate::persistence::MemoryStudentStore;
    use crate::service::StudentService;

    fn app() -> Router {
        let hub = NotificationHub::new(16);
        let service = StudentService::new(Arc::new(MemoryStudentStore::new()), hub.clone(), false);
        routes().with_state(AppState::new(Arc::new(service), hub))
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let Ok(response) = app.clone().oneshot(request).await else {
            panic!("router failed");
        };
        let status = response.status();
        let Ok(bytes) = axum::body::to_bytes(response.into_body(), usize::MAX).await else {
            panic!("body read failed");
        };
        let body = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, body)
    }

    fn post_json(body: &serde_json::Value) -> Request<Body> {
        let Ok(request) = Request::post("/add-student")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
        else {
            panic!("request build failed");
        };
        request
    }

    fn get_req(uri: &str) -> Request<Body> {
        let Ok(request) = Request::get(uri).body(Body::empty()) else {
            panic!("request build failed");
        };
        request
    }

    fn ana() -> serde_json::Value {
        serde_json::json!({
            "student_id": "S1",
            "name": "Ana",
            "profile_image": "img.png",
            "qr_code": "QR1",
        })
    }

    #[tokio::test]
    async fn create_list_and_get_scenario() {
        let app = app();

        let (status, body) = send(&app, post_json(&ana())).await;
        assert_eq!(status, StatusCode::CREATED);
        assert!(body["message"].is_string());

        let (status, body) = send(&app, get_req("/students")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!([ana()]));

        let (status, body) = send(&app, get_req("/student/S1")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, ana());

        let (status, body) = send(&app, get_req("/student/S2")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], STUDENT_NOT_FOUND_MESSAGE);
    }

    #[tokio::test]
    async fn empty_table_lists_empty_array() {
        let (status, body) = send(&app(), get_req("/students")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!([]));
    }

    #[tokio::test]
    async fn missing_field_is_bad_request_and_not_stored() {
        let app = app();
        let mut incomplete = ana();
        if let Some(obj) = incomplete.as_object_mut() {
            obj.remove("profile_image");
        }

        let (status, body) = send(&app, post_json(&incomplete)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], MISSING_FIELDS_MESSAGE);
        assert_eq!(body["details"], serde_json::json!(["profile_image"]));

        let (_, body) = send(&app, get_req("/students")).await;
        assert_eq!(body, serde_json::json!([]));
    }

    #[tokio::test]
    async fn non_string_field_is_accepted_as_present() {
        let app = app();
        let mut numeric_name = ana();
        numeric_name["name"] = serde_json::json!(123);

        let (status, _) = send(&app, post_json(&numeric_name)).await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = send(&app, get_req("/student/S1")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "123");
    }

    #[tokio::test]
    async fn malformed_body_is_bad_request() {
        let Ok(request) = Request::post("/add-student")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
        else {
            panic!("request build failed");
        };
        let (status, body) = send(&app(), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn duplicate_id_is_server_error_and_keeps_original() {
        let app = app();
        send(&app, post_json(&ana())).await;

        let mut dup = ana();
        dup["name"] = serde_json::json!("Bob");
        let (status, body) = send(&app, post_json(&dup)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"].is_string());

        let (_, body) = send(&app, get_req("/student/S1")).await;
        assert_eq!(body["name"], "Ana");
    }
}
