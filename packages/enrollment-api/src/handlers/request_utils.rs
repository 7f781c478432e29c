//! Request utilities for HTTP endpoints.

use http_body_util::BodyExt;
use hyper::body::{Body, Bytes};
use hyper::{Request, Response};
use percent_encoding::percent_decode_str;
use serde::Serialize;
use tokio::sync::oneshot;
use tokio::time;

use crate::router::{AppState, RouterError};
use enrollment_core::{ErrorClass, StoreError};
use enrollment_runtime::{ApiRequest, QueryParams, ResponseSender};

/// Type alias for matchit parameters with explicit lifetimes
pub type MatchitParams<'a, 'b> = matchit::Params<'a, 'b>;

/// Helper function to read request body with timeout
pub async fn read_request_body_with_timeout<B>(
    req: Request<B>,
    timeout_ms: u64,
) -> Result<Bytes, RouterError>
where
    B: Body,
    B::Error: std::fmt::Display,
{
    let timeout_duration = time::Duration::from_millis(timeout_ms);
    let body = time::timeout(timeout_duration, req.into_body().collect())
        .await
        .map_err(|_| RouterError::Timeout)?
        .map_err(|e| RouterError::InternalError(format!("Failed to read request body: {}", e)))?;
    Ok(body.to_bytes())
}

/// Helper function to wait for response with timeout
pub async fn wait_for_response_with_timeout<T>(
    rx: oneshot::Receiver<T>,
    timeout_ms: u64,
) -> Result<T, RouterError> {
    let timeout_duration = time::Duration::from_millis(timeout_ms);
    time::timeout(timeout_duration, rx)
        .await
        .map_err(|_| RouterError::Timeout)?
        .map_err(|e| RouterError::InternalError(format!("Response channel closed: {}", e)))
}

/// Sends a request to the runtime and waits for its reply.
///
/// Store errors in the reply are mapped with
/// [`map_store_error_to_router_error`].
pub async fn dispatch<T, F>(state: &AppState, build: F) -> Result<T, RouterError>
where
    F: FnOnce(ResponseSender<T>) -> ApiRequest,
{
    let (tx, rx) = oneshot::channel();
    state
        .api_tx
        .send(build(tx))
        .await
        .map_err(|e| RouterError::InternalError(format!("Channel closed: {}", e)))?;

    let result = wait_for_response_with_timeout(rx, state.config.response_timeout_ms).await?;
    result.map_err(map_store_error_to_router_error)
}

/// Map StoreError to appropriate RouterError
///
/// Business-rule violations are client errors (400); missing entities
/// and enrollments are 404.
pub fn map_store_error_to_router_error(e: StoreError) -> RouterError {
    match e.class() {
        ErrorClass::NotFound => RouterError::NotFound(e.to_string()),
        ErrorClass::Conflict | ErrorClass::InvalidArgument => RouterError::BadRequest(e.to_string()),
    }
}

/// Parses a numeric path parameter.
pub fn parse_id(params: &MatchitParams<'_, '_>, name: &str) -> Result<u64, RouterError> {
    let raw = params
        .get(name)
        .ok_or_else(|| RouterError::BadRequest(format!("Missing path parameter '{}'", name)))?;
    raw.parse()
        .map_err(|e| RouterError::BadRequest(format!("Invalid {} '{}': {}", name, raw, e)))
}

/// Parses a JSON request body.
pub fn parse_json<T: serde::de::DeserializeOwned>(body: &[u8]) -> Result<T, RouterError> {
    serde_json::from_slice(body)
        .map_err(|e| RouterError::BadRequest(format!("Failed to parse request: {}", e)))
}

/// Helper to serialize a success envelope into a JSON response
pub fn json_response<T: Serialize>(status: u16, data: T) -> Result<Response<Bytes>, RouterError> {
    let api_response = super::response::success_response(data);
    let json = serde_json::to_vec(&api_response)
        .map_err(|e| RouterError::InternalError(format!("Failed to serialize response: {}", e)))?;
    build_response(status, json)
}

/// Helper to build HTTP response with proper error handling
pub fn build_response(status: u16, json: Vec<u8>) -> Result<Response<Bytes>, RouterError> {
    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .body(Bytes::from(json))
        .map_err(|e| RouterError::InternalError(format!("Failed to build response: {}", e)))
}

/// Helper to build empty HTTP response (for 204 No Content)
pub fn build_empty_response(status: u16) -> Result<Response<Bytes>, RouterError> {
    Response::builder()
        .status(status)
        .body(Bytes::new())
        .map_err(|e| RouterError::InternalError(format!("Failed to build response: {}", e)))
}

/// Treats empty strings like missing fields.
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Parse query parameters from URL query string.
///
/// `page` and `limit` must be non-negative integers; every other key is
/// kept as a substring filter.
pub fn parse_query_params(query_str: Option<&str>) -> Result<QueryParams, RouterError> {
    let mut page = None;
    let mut limit = None;
    let mut filters = std::collections::HashMap::new();

    if let Some(query_str) = query_str {
        for pair in query_str.split('&') {
            let Some((key, encoded_value)) = pair.split_once('=') else {
                continue;
            };
            let plus_decoded = encoded_value.replace('+', " ");
            let decoded_value = percent_decode_str(&plus_decoded).decode_utf8_lossy();

            match key {
                "page" => {
                    page = Some(decoded_value.parse().map_err(|e| {
                        RouterError::BadRequest(format!(
                            "Invalid page value '{}': {}",
                            decoded_value, e
                        ))
                    })?);
                }
                "limit" => {
                    limit = Some(decoded_value.parse().map_err(|e| {
                        RouterError::BadRequest(format!(
                            "Invalid limit value '{}': {}",
                            decoded_value, e
                        ))
                    })?);
                }
                _ => {
                    if !decoded_value.is_empty() {
                        filters.insert(key.to_string(), decoded_value.to_string());
                    }
                }
            }
        }
    }

    Ok(QueryParams {
        page,
        limit,
        filters,
    })
}
