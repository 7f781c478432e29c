//! Enrollment handlers.

use hyper::{body::Bytes, Response};

use crate::router::{AppState, RouterError};
use enrollment_runtime::ApiRequest;

use super::request_utils::{build_empty_response, dispatch, json_response, parse_id, MatchitParams};
use super::response::EnrollmentResponse;

/// Enrolls a student in a course.
///
/// # Endpoint
/// `POST /courses/{course_id}/students/{student_id}`
///
/// # Response
/// - **201 Created**
/// ```json
/// {"success": true, "data": {"student_id": 1, "course_id": 2}}
/// ```
///
/// # Errors
/// - **400 Bad Request**: Invalid ids, already enrolled, or course is full
/// - **404 Not Found**: Student or course not found
///
/// # Example
/// ```bash
/// curl -X POST http://localhost:3000/courses/1/students/1
/// ```
pub async fn enroll_student(
    params: MatchitParams<'_, '_>,
    state: &AppState,
) -> Result<Response<Bytes>, RouterError> {
    let course_id = parse_id(&params, "course_id")?;
    let student_id = parse_id(&params, "student_id")?;

    dispatch(state, |response| ApiRequest::Enroll {
        student_id,
        course_id,
        response,
    })
    .await?;

    json_response(
        201,
        EnrollmentResponse {
            student_id,
            course_id,
        },
    )
}

/// Removes a student from a course.
///
/// # Endpoint
/// `DELETE /courses/{course_id}/students/{student_id}`
///
/// # Response
/// - **204 No Content**: Enrollment removed
///
/// # Errors
/// - **400 Bad Request**: Invalid ids
/// - **404 Not Found**: Enrollment not found
pub async fn unenroll_student(
    params: MatchitParams<'_, '_>,
    state: &AppState,
) -> Result<Response<Bytes>, RouterError> {
    let course_id = parse_id(&params, "course_id")?;
    let student_id = parse_id(&params, "student_id")?;

    dispatch(state, |response| ApiRequest::Unenroll {
        student_id,
        course_id,
        response,
    })
    .await?;

    build_empty_response(204)
}
