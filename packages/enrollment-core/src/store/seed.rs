//! Deterministic fixture data.

use crate::model::{EntityKind, NewCourse, NewStudent};

use super::EnrollmentStore;

/// Seeded students as (name, email), in insertion order.
pub const SEED_STUDENTS: &[(&str, &str)] = &[
    ("Alice", "alice@example.com"),
    ("Bob", "bob@example.com"),
    ("Charlie", "charlie@example.com"),
];

/// Seeded courses as (title, teacher), in insertion order.
pub const SEED_COURSES: &[(&str, &str)] = &[
    ("Math", "Mr. Smith"),
    ("Physics", "Mrs. Johnson"),
    ("History", "Dr. Brown"),
];

impl EnrollmentStore {
    /// Adds the fixture students and courses on top of the current state.
    ///
    /// Fixtures go through the regular create path; one that collides
    /// with an existing email or title is skipped.
    pub fn seed(&mut self) {
        for (name, email) in SEED_STUDENTS {
            let fields = NewStudent {
                name: name.to_string(),
                email: email.to_string(),
            };
            if let Err(e) = self.create_student(fields) {
                tracing::warn!("Skipping seeded student {}: {}", name, e);
            }
        }
        for (title, teacher) in SEED_COURSES {
            let fields = NewCourse {
                title: title.to_string(),
                teacher: teacher.to_string(),
            };
            if let Err(e) = self.create_course(fields) {
                tracing::warn!("Skipping seeded course {}: {}", title, e);
            }
        }
        tracing::debug!(
            students = self.len(EntityKind::Students),
            courses = self.len(EntityKind::Courses),
            "Fixture data seeded"
        );
    }
}
