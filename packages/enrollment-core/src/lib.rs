//! Core storage engine for the enrollment service.
//!
//! Provides the student/course data model, the invariant-enforcing
//! [`store::EnrollmentStore`], the error taxonomy and configuration.

pub mod config;
pub mod error;
pub mod model;
pub mod store;

pub use error::{ErrorClass, Result, StoreError};
pub use model::{
    Course, CourseId, CoursePatch, Entity, EntityKind, EntityPatch, NewCourse, NewEntity,
    NewStudent, Student, StudentId, StudentPatch,
};
pub use store::EnrollmentStore;
