//! HTTP endpoint implementations for records, enrollments and administration.

mod admin_handlers;
mod crud_handlers;
mod enrollment_handlers;
pub mod request_utils;
pub mod response;

pub use admin_handlers::{reset_store, seed_store};
pub use crud_handlers::{create_record, delete_record, list_records, read_record, update_record};
pub use enrollment_handlers::{enroll_student, unenroll_student};
pub use response::{error_response, success_response, ApiResponse, ErrorResponse};
