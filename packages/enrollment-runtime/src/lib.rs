//! Tick-based single-writer runtime for the enrollment store.
//!
//! The REST layer never touches the store directly. It sends an
//! [`ApiRequest`] over a channel and awaits the reply on a oneshot; the
//! runtime thread owns the store and applies requests one at a time, so
//! each operation's checks and mutation are atomic with respect to every
//! other request.

mod api_handlers;
mod api_request;
mod runtime;

use enrollment_core::StoreError;
use tokio::sync::oneshot;

pub use api_handlers::ApiHandlers;
pub use api_request::{ApiRequest, EntityDetail, Page, QueryParams};
pub use runtime::Runtime;

/// Result type for runtime operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// Response sender for API requests
pub type ResponseSender<T> = oneshot::Sender<Result<T>>;
