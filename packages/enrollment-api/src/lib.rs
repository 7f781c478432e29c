//! REST API server for the enrollment service.
//!
//! Provides HTTP endpoints for students, courses, enrollments and
//! administrative reset/seed, plus request routing.

pub mod handlers;
pub mod router;
pub mod server;
