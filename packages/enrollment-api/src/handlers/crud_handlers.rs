//! CRUD (Create, Read, Update, Delete) handlers for students and courses.

use hyper::body::{Body, Bytes};
use hyper::{Request, Response};
use serde::Deserialize;

use crate::router::{AppState, RouterError};
use enrollment_core::{
    CoursePatch, EntityKind, EntityPatch, NewCourse, NewEntity, NewStudent, StudentPatch,
};
use enrollment_runtime::ApiRequest;

use super::request_utils::{
    build_empty_response, dispatch, json_response, non_empty, parse_id, parse_json,
    parse_query_params, read_request_body_with_timeout, MatchitParams,
};

/// Body of `POST /students`.
#[derive(Debug, Deserialize)]
struct CreateStudentRequest {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    email: Option<String>,
}

/// Body of `POST /courses`.
#[derive(Debug, Deserialize)]
struct CreateCourseRequest {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    teacher: Option<String>,
}

/// Parses a creation body, requiring every field to be a non-empty string.
fn parse_new_entity(kind: EntityKind, body: &[u8]) -> Result<NewEntity, RouterError> {
    match kind {
        EntityKind::Students => {
            let request: CreateStudentRequest = parse_json(body)?;
            match (non_empty(request.name), non_empty(request.email)) {
                (Some(name), Some(email)) => Ok(NewEntity::Student(NewStudent { name, email })),
                _ => Err(RouterError::BadRequest("name and email required".to_string())),
            }
        }
        EntityKind::Courses => {
            let request: CreateCourseRequest = parse_json(body)?;
            match (non_empty(request.title), non_empty(request.teacher)) {
                (Some(title), Some(teacher)) => {
                    Ok(NewEntity::Course(NewCourse { title, teacher }))
                }
                _ => Err(RouterError::BadRequest(
                    "title and teacher required".to_string(),
                )),
            }
        }
    }
}

/// Parses an update body; empty strings leave the field unchanged.
fn parse_patch(kind: EntityKind, body: &[u8]) -> Result<EntityPatch, RouterError> {
    match kind {
        EntityKind::Students => {
            let patch: StudentPatch = parse_json(body)?;
            Ok(EntityPatch::Student(StudentPatch {
                name: non_empty(patch.name),
                email: non_empty(patch.email),
            }))
        }
        EntityKind::Courses => {
            let patch: CoursePatch = parse_json(body)?;
            Ok(EntityPatch::Course(CoursePatch {
                title: non_empty(patch.title),
                teacher: non_empty(patch.teacher),
            }))
        }
    }
}

fn not_found_message(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Students => "Student not found",
        EntityKind::Courses => "Course not found",
    }
}

/// Lists records with optional filtering and pagination.
///
/// # Endpoint
/// `GET /students?name=&email=&page=1&limit=10`
/// `GET /courses?title=&teacher=&page=1&limit=10`
///
/// # Response
/// - **200 OK**
/// ```json
/// {"success": true, "data": {"students": [...], "total": 3}}
/// ```
///
/// # Errors
/// - **400 Bad Request**: Non-numeric `page` or `limit`
pub async fn list_records<B>(
    req: Request<B>,
    kind: EntityKind,
    state: &AppState,
) -> Result<Response<Bytes>, RouterError> {
    let query = parse_query_params(req.uri().query())?;

    let page = dispatch(state, |response| ApiRequest::List {
        kind,
        query,
        response,
    })
    .await?;

    let mut data = serde_json::Map::new();
    data.insert(
        kind.as_str().to_string(),
        serde_json::to_value(&page.items).map_err(|e| {
            RouterError::InternalError(format!("Failed to serialize records: {}", e))
        })?,
    );
    data.insert("total".to_string(), page.total.into());

    json_response(200, data)
}

/// Reads a record together with its enrollments.
///
/// # Endpoint
/// `GET /students/{id}` or `GET /courses/{id}`
///
/// # Response
/// - **200 OK**
/// ```json
/// {"success": true, "data": {"student": {...}, "courses": [...]}}
/// ```
///
/// # Errors
/// - **400 Bad Request**: Invalid id
/// - **404 Not Found**: Record not found
pub async fn read_record(
    params: MatchitParams<'_, '_>,
    kind: EntityKind,
    state: &AppState,
) -> Result<Response<Bytes>, RouterError> {
    let id = parse_id(&params, "id")?;

    let detail = dispatch(state, |response| ApiRequest::Get { kind, id, response }).await?;

    let data = match kind {
        EntityKind::Students => serde_json::json!({
            "student": detail.entity,
            "courses": detail.related,
        }),
        EntityKind::Courses => serde_json::json!({
            "course": detail.entity,
            "students": detail.related,
        }),
    };
    json_response(200, data)
}

/// Creates a record.
///
/// # Endpoint
/// `POST /students` with `{"name": "...", "email": "..."}`
/// `POST /courses` with `{"title": "...", "teacher": "..."}`
///
/// # Response
/// - **201 Created**: Returns the record with its assigned id
///
/// # Errors
/// - **400 Bad Request**: Missing field, malformed body, or duplicate
///   email/title
///
/// # Example
/// ```bash
/// curl -X POST http://localhost:3000/students \
///   -H "Content-Type: application/json" \
///   -d '{"name": "David", "email": "david@example.com"}'
/// ```
pub async fn create_record<B>(
    req: Request<B>,
    kind: EntityKind,
    state: &AppState,
) -> Result<Response<Bytes>, RouterError>
where
    B: Body,
    B::Error: std::fmt::Display,
{
    let body_bytes = read_request_body_with_timeout(req, state.config.request_timeout_ms).await?;
    let fields = parse_new_entity(kind, &body_bytes)?;

    let created = dispatch(state, |response| ApiRequest::Create { fields, response }).await?;

    json_response(201, created)
}

/// Partially updates a record.
///
/// # Endpoint
/// `PUT /students/{id}` with `{"name"?: "...", "email"?: "..."}`
/// `PUT /courses/{id}` with `{"title"?: "...", "teacher"?: "..."}`
///
/// # Response
/// - **200 OK**: Returns the updated record
///
/// # Errors
/// - **400 Bad Request**: Invalid id, malformed body, or the new
///   email/title belongs to another record
/// - **404 Not Found**: Record not found
pub async fn update_record<B>(
    req: Request<B>,
    params: MatchitParams<'_, '_>,
    kind: EntityKind,
    state: &AppState,
) -> Result<Response<Bytes>, RouterError>
where
    B: Body,
    B::Error: std::fmt::Display,
{
    let id = parse_id(&params, "id")?;
    let body_bytes = read_request_body_with_timeout(req, state.config.request_timeout_ms).await?;
    let patch = parse_patch(kind, &body_bytes)?;

    let updated = dispatch(state, |response| ApiRequest::Update {
        id,
        patch,
        response,
    })
    .await?;

    json_response(200, updated)
}

/// Deletes a record.
///
/// # Endpoint
/// `DELETE /students/{id}` or `DELETE /courses/{id}`
///
/// # Response
/// - **204 No Content**: Record deleted
///
/// # Errors
/// - **400 Bad Request**: Invalid id, or the record is referenced by an
///   enrollment
/// - **404 Not Found**: Record not found
pub async fn delete_record(
    params: MatchitParams<'_, '_>,
    kind: EntityKind,
    state: &AppState,
) -> Result<Response<Bytes>, RouterError> {
    let id = parse_id(&params, "id")?;

    let deleted = dispatch(state, |response| ApiRequest::Delete { kind, id, response }).await?;

    if !deleted {
        return Err(RouterError::NotFound(not_found_message(kind).to_string()));
    }
    build_empty_response(204)
}
