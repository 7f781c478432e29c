//! Matchit routing configuration.

use std::sync::Arc;

use hyper::body::{Body, Bytes};
use hyper::{Method, Request, Response};
use matchit::Router as MatchitRouter;
use tokio::sync::mpsc;

use crate::handlers;
use enrollment_core::config::StoreConfig;
use enrollment_core::EntityKind;
use enrollment_runtime::ApiRequest;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Service configuration
    pub config: Arc<StoreConfig>,
    /// API request sender to runtime
    pub api_tx: mpsc::Sender<ApiRequest>,
}

/// HTTP request router.
pub struct Router {
    inner: MatchitRouter<RouteHandler>,
    state: AppState,
}

impl Router {
    /// Creates a new router with default routes.
    pub fn new(config: Arc<StoreConfig>, api_tx: mpsc::Sender<ApiRequest>) -> Self {
        let mut router = MatchitRouter::new();

        let routes = [
            ("/students", RouteHandler::Collection(EntityKind::Students)),
            ("/students/{id}", RouteHandler::Member(EntityKind::Students)),
            ("/courses", RouteHandler::Collection(EntityKind::Courses)),
            ("/courses/{id}", RouteHandler::Member(EntityKind::Courses)),
            (
                "/courses/{course_id}/students/{student_id}",
                RouteHandler::Enrollment,
            ),
            ("/admin/reset", RouteHandler::Reset),
            ("/admin/seed", RouteHandler::Seed),
        ];
        for (path, handler) in routes {
            router
                .insert(path, handler)
                .unwrap_or_else(|e| panic!("Failed to insert {} route: {}", path, e));
        }

        Self {
            inner: router,
            state: AppState { config, api_tx },
        }
    }

    /// Routes an incoming request to the appropriate handler.
    ///
    /// Handler failures are turned into JSON error responses here; an
    /// `Err` is only returned when even that response cannot be built.
    pub async fn route<B>(&self, req: Request<B>) -> Result<Response<Bytes>, RouterError>
    where
        B: Body,
        B::Error: std::fmt::Display,
    {
        let path = req.uri().path().to_string();
        let method = req.method().clone();

        let result = match self.inner.at(&path) {
            Ok(matched) => matched.value.handle(req, matched.params, &self.state).await,
            Err(_) => Err(RouterError::NotFound(format!(
                "No route found for {}",
                path
            ))),
        };

        match result {
            Ok(response) => {
                tracing::debug!("{} {} -> {}", method, path, response.status());
                Ok(response)
            }
            Err(err) => {
                match &err {
                    RouterError::InternalError(_) | RouterError::Timeout => {
                        tracing::error!("{} {} failed: {}", method, path, err)
                    }
                    _ => tracing::debug!("{} {} rejected: {}", method, path, err),
                }
                Ok(err.into())
            }
        }
    }
}

/// Route handler function.
enum RouteHandler {
    Collection(EntityKind),
    Member(EntityKind),
    Enrollment,
    Reset,
    Seed,
}

impl RouteHandler {
    /// Handles a request with the given route parameters.
    async fn handle<B>(
        &self,
        req: Request<B>,
        params: matchit::Params<'_, '_>,
        state: &AppState,
    ) -> Result<Response<Bytes>, RouterError>
    where
        B: Body,
        B::Error: std::fmt::Display,
    {
        let method = req.method().clone();
        match self {
            RouteHandler::Collection(kind) => match method {
                Method::GET => handlers::list_records(req, *kind, state).await,
                Method::POST => handlers::create_record(req, *kind, state).await,
                _ => Err(RouterError::MethodNotAllowed),
            },
            RouteHandler::Member(kind) => match method {
                Method::GET => handlers::read_record(params, *kind, state).await,
                Method::PUT => handlers::update_record(req, params, *kind, state).await,
                Method::DELETE => handlers::delete_record(params, *kind, state).await,
                _ => Err(RouterError::MethodNotAllowed),
            },
            RouteHandler::Enrollment => match method {
                Method::POST => handlers::enroll_student(params, state).await,
                Method::DELETE => handlers::unenroll_student(params, state).await,
                _ => Err(RouterError::MethodNotAllowed),
            },
            RouteHandler::Reset if method == Method::POST => handlers::reset_store(state).await,
            RouteHandler::Seed if method == Method::POST => handlers::seed_store(state).await,
            RouteHandler::Reset | RouteHandler::Seed => Err(RouterError::MethodNotAllowed),
        }
    }
}

/// Router error type.
#[derive(Debug)]
pub enum RouterError {
    MethodNotAllowed,
    InternalError(String),
    Timeout,
    BadRequest(String),
    NotFound(String),
}

impl std::fmt::Display for RouterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RouterError::MethodNotAllowed => write!(f, "Method Not Allowed"),
            RouterError::InternalError(msg) => write!(f, "Internal Error: {}", msg),
            RouterError::Timeout => write!(f, "Request Timeout"),
            RouterError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            RouterError::NotFound(msg) => write!(f, "Not Found: {}", msg),
        }
    }
}

impl std::error::Error for RouterError {}

impl From<RouterError> for Response<Bytes> {
    fn from(err: RouterError) -> Self {
        let (status, message) = match &err {
            RouterError::MethodNotAllowed => (405, "Method Not Allowed"),
            RouterError::InternalError(_) => (500, "Internal Server Error"),
            RouterError::Timeout => (408, "Request Timeout"),
            RouterError::BadRequest(msg) => (400, msg.as_str()),
            RouterError::NotFound(msg) => (404, msg.as_str()),
        };

        let error_response = crate::handlers::error_response(status, message.to_string(), None);
        let body = serde_json::to_vec(&error_response)
            .unwrap_or_else(|e| format!("{{\"success\":false,\"error\":{{\"code\":\"500\",\"message\":\"Failed to serialize error: {}\"}}}}", e).into_bytes());

        Response::builder()
            .status(status)
            .header("Content-Type", "application/json")
            .body(Bytes::from(body))
            .unwrap_or_else(|_| {
                let mut fallback = Response::new(Bytes::from("Internal Server Error"));
                *fallback.status_mut() = hyper::StatusCode::INTERNAL_SERVER_ERROR;
                fallback
            })
    }
}
