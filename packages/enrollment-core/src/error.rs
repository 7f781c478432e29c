//! Store error types.

use thiserror::Error;

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Store operation errors.
///
/// The `Display` output of each variant is the human-readable message
/// surfaced to API clients.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Entity kind tag not recognised
    #[error("Unknown entity kind '{0}'")]
    UnknownKind(String),

    /// Student not found
    #[error("Student not found")]
    StudentNotFound,

    /// Course not found
    #[error("Course not found")]
    CourseNotFound,

    /// Enrollment pair not found
    #[error("Enrollment not found")]
    EnrollmentNotFound,

    /// Another student already uses this email
    #[error("Email must be unique")]
    DuplicateEmail,

    /// Another course already uses this title
    #[error("Course title must be unique")]
    DuplicateTitle,

    /// Enrollment pair already exists
    #[error("Student already enrolled in this course")]
    AlreadyEnrolled,

    /// Course reached its capacity
    #[error("Course is full")]
    CourseFull,

    /// Student is referenced by an enrollment
    #[error("Cannot delete student: enrolled in a course")]
    StudentEnrolled,

    /// Course is referenced by an enrollment
    #[error("Cannot delete course: students are enrolled")]
    CourseHasStudents,
}

/// Broad classification of a [`StoreError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Referenced entity or enrollment does not exist
    NotFound,
    /// Uniqueness, capacity or referential-integrity violation
    Conflict,
    /// Invalid usage of the store API
    InvalidArgument,
}

impl StoreError {
    /// Returns the class this error belongs to.
    pub fn class(&self) -> ErrorClass {
        match self {
            StoreError::UnknownKind(_) => ErrorClass::InvalidArgument,
            StoreError::StudentNotFound
            | StoreError::CourseNotFound
            | StoreError::EnrollmentNotFound => ErrorClass::NotFound,
            StoreError::DuplicateEmail
            | StoreError::DuplicateTitle
            | StoreError::AlreadyEnrolled
            | StoreError::CourseFull
            | StoreError::StudentEnrolled
            | StoreError::CourseHasStudents => ErrorClass::Conflict,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_match_api_contract() {
        assert_eq!(StoreError::DuplicateEmail.to_string(), "Email must be unique");
        assert_eq!(
            StoreError::DuplicateTitle.to_string(),
            "Course title must be unique"
        );
        assert_eq!(
            StoreError::AlreadyEnrolled.to_string(),
            "Student already enrolled in this course"
        );
        assert_eq!(StoreError::CourseFull.to_string(), "Course is full");
        assert_eq!(
            StoreError::StudentEnrolled.to_string(),
            "Cannot delete student: enrolled in a course"
        );
        assert_eq!(
            StoreError::CourseHasStudents.to_string(),
            "Cannot delete course: students are enrolled"
        );
        assert_eq!(
            StoreError::EnrollmentNotFound.to_string(),
            "Enrollment not found"
        );
    }

    #[test]
    fn test_error_classes() {
        assert_eq!(StoreError::StudentNotFound.class(), ErrorClass::NotFound);
        assert_eq!(StoreError::CourseNotFound.class(), ErrorClass::NotFound);
        assert_eq!(StoreError::CourseFull.class(), ErrorClass::Conflict);
        assert_eq!(StoreError::StudentEnrolled.class(), ErrorClass::Conflict);
        assert_eq!(
            StoreError::UnknownKind("teachers".to_string()).class(),
            ErrorClass::InvalidArgument
        );
    }
}
