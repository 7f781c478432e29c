//! Administrative handlers for reinitialising the store.

use hyper::{body::Bytes, Response};

use crate::router::{AppState, RouterError};
use enrollment_runtime::ApiRequest;

use super::request_utils::{build_empty_response, dispatch};

/// Clears every record and enrollment and restarts id sequences.
///
/// # Endpoint
/// `POST /admin/reset`
///
/// # Response
/// - **204 No Content**
pub async fn reset_store(state: &AppState) -> Result<Response<Bytes>, RouterError> {
    dispatch(state, |response| ApiRequest::Reset { response }).await?;
    build_empty_response(204)
}

/// Adds the fixture students and courses.
///
/// # Endpoint
/// `POST /admin/seed`
///
/// # Response
/// - **204 No Content**
pub async fn seed_store(state: &AppState) -> Result<Response<Bytes>, RouterError> {
    dispatch(state, |response| ApiRequest::Seed { response }).await?;
    build_empty_response(204)
}
