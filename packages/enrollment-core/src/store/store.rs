//! Enrollment store holding students, courses and their enrollments.

use std::collections::BTreeSet;

use crate::config::{StoreConfig, DEFAULT_COURSE_CAPACITY};
use crate::error::{Result, StoreError};
use crate::model::{
    Course, CourseId, CoursePatch, Entity, EntityKind, EntityPatch, NewCourse, NewEntity,
    NewStudent, Student, StudentId, StudentPatch,
};

use super::table::Table;

/// In-memory registry of students, courses and enrollments.
///
/// Every mutating operation validates first and mutates last, so a call
/// that returns an error leaves the store unchanged. Mutation requires
/// `&mut self`; hosts sharing the store between threads must serialise
/// access to it (the runtime does this by owning it on a single thread).
#[derive(Debug, Clone)]
pub struct EnrollmentStore {
    students: Table<Student>,
    courses: Table<Course>,
    /// Enrolled (student, course) pairs
    enrollments: BTreeSet<(StudentId, CourseId)>,
    course_capacity: usize,
}

impl EnrollmentStore {
    /// Creates an empty store with the default course capacity.
    pub fn new() -> Self {
        Self::with_course_capacity(DEFAULT_COURSE_CAPACITY)
    }

    /// Creates an empty store using the capacity from `config`.
    pub fn with_config(config: &StoreConfig) -> Self {
        Self::with_course_capacity(config.course_capacity)
    }

    /// Creates an empty store allowing `course_capacity` students per course.
    pub fn with_course_capacity(course_capacity: usize) -> Self {
        Self {
            students: Table::new(),
            courses: Table::new(),
            enrollments: BTreeSet::new(),
            course_capacity,
        }
    }

    /// Maximum number of students per course.
    pub fn course_capacity(&self) -> usize {
        self.course_capacity
    }

    /// Returns all records of `kind` in insertion order.
    pub fn list(&self, kind: EntityKind) -> Vec<Entity> {
        match kind {
            EntityKind::Students => self.students().cloned().map(Entity::from).collect(),
            EntityKind::Courses => self.courses().cloned().map(Entity::from).collect(),
        }
    }

    pub fn students(&self) -> impl Iterator<Item = &Student> {
        self.students.iter()
    }

    pub fn courses(&self) -> impl Iterator<Item = &Course> {
        self.courses.iter()
    }

    /// Looks up a record; `None` when no record of `kind` has this id.
    pub fn get(&self, kind: EntityKind, id: u64) -> Option<Entity> {
        match kind {
            EntityKind::Students => self.student(id).cloned().map(Entity::from),
            EntityKind::Courses => self.course(id).cloned().map(Entity::from),
        }
    }

    pub fn student(&self, id: StudentId) -> Option<&Student> {
        self.students.get(id)
    }

    pub fn course(&self, id: CourseId) -> Option<&Course> {
        self.courses.get(id)
    }

    /// Number of records of `kind`.
    pub fn len(&self, kind: EntityKind) -> usize {
        match kind {
            EntityKind::Students => self.students.len(),
            EntityKind::Courses => self.courses.len(),
        }
    }

    /// Returns true when the store holds no records and no enrollments.
    pub fn is_empty(&self) -> bool {
        self.students.is_empty() && self.courses.is_empty() && self.enrollments.is_empty()
    }

    /// Creates a record and returns it with its assigned id.
    pub fn create(&mut self, fields: NewEntity) -> Result<Entity> {
        match fields {
            NewEntity::Student(fields) => self.create_student(fields).map(Entity::from),
            NewEntity::Course(fields) => self.create_course(fields).map(Entity::from),
        }
    }

    /// Creates a student.
    ///
    /// # Errors
    /// [`StoreError::DuplicateEmail`] if another student has the same email.
    pub fn create_student(&mut self, fields: NewStudent) -> Result<Student> {
        if self.students.any_other(None, |s| s.email == fields.email) {
            return Err(StoreError::DuplicateEmail);
        }
        let student = Student {
            id: self.students.allocate_id(),
            name: fields.name,
            email: fields.email,
        };
        self.students.insert(student.clone());
        Ok(student)
    }

    /// Creates a course.
    ///
    /// # Errors
    /// [`StoreError::DuplicateTitle`] if another course has the same title.
    pub fn create_course(&mut self, fields: NewCourse) -> Result<Course> {
        if self.courses.any_other(None, |c| c.title == fields.title) {
            return Err(StoreError::DuplicateTitle);
        }
        let course = Course {
            id: self.courses.allocate_id(),
            title: fields.title,
            teacher: fields.teacher,
        };
        self.courses.insert(course.clone());
        Ok(course)
    }

    /// Replaces the fields present in `patch` and returns the updated record.
    pub fn update(&mut self, id: u64, patch: EntityPatch) -> Result<Entity> {
        match patch {
            EntityPatch::Student(patch) => self.update_student(id, patch).map(Entity::from),
            EntityPatch::Course(patch) => self.update_course(id, patch).map(Entity::from),
        }
    }

    /// Updates a student in place.
    ///
    /// # Errors
    /// - [`StoreError::StudentNotFound`] if the id is unknown
    /// - [`StoreError::DuplicateEmail`] if another student has the new email
    pub fn update_student(&mut self, id: StudentId, patch: StudentPatch) -> Result<Student> {
        if !self.students.contains(id) {
            return Err(StoreError::StudentNotFound);
        }
        if let Some(email) = &patch.email {
            if self.students.any_other(Some(id), |s| &s.email == email) {
                return Err(StoreError::DuplicateEmail);
            }
        }
        let student = self
            .students
            .get_mut(id)
            .ok_or(StoreError::StudentNotFound)?;
        if let Some(name) = patch.name {
            student.name = name;
        }
        if let Some(email) = patch.email {
            student.email = email;
        }
        Ok(student.clone())
    }

    /// Updates a course in place.
    ///
    /// # Errors
    /// - [`StoreError::CourseNotFound`] if the id is unknown
    /// - [`StoreError::DuplicateTitle`] if another course has the new title
    pub fn update_course(&mut self, id: CourseId, patch: CoursePatch) -> Result<Course> {
        if !self.courses.contains(id) {
            return Err(StoreError::CourseNotFound);
        }
        if let Some(title) = &patch.title {
            if self.courses.any_other(Some(id), |c| &c.title == title) {
                return Err(StoreError::DuplicateTitle);
            }
        }
        let course = self.courses.get_mut(id).ok_or(StoreError::CourseNotFound)?;
        if let Some(title) = patch.title {
            course.title = title;
        }
        if let Some(teacher) = patch.teacher {
            course.teacher = teacher;
        }
        Ok(course.clone())
    }

    /// Deletes a record.
    ///
    /// Returns `Ok(false)` if no record of `kind` has this id and `Ok(true)`
    /// once it is deleted. Deletion never cascades: a record referenced by
    /// any enrollment is kept and an error is returned instead.
    pub fn remove(&mut self, kind: EntityKind, id: u64) -> Result<bool> {
        match kind {
            EntityKind::Students => {
                if !self.students.contains(id) {
                    return Ok(false);
                }
                if self.enrollments.iter().any(|&(s, _)| s == id) {
                    return Err(StoreError::StudentEnrolled);
                }
                self.students.remove(id);
            }
            EntityKind::Courses => {
                if !self.courses.contains(id) {
                    return Ok(false);
                }
                if self.enrollments.iter().any(|&(_, c)| c == id) {
                    return Err(StoreError::CourseHasStudents);
                }
                self.courses.remove(id);
            }
        }
        Ok(true)
    }

    /// Enrolls a student in a course.
    ///
    /// Checks, in order: student exists, course exists, pair not yet
    /// enrolled, course below capacity.
    pub fn enroll(&mut self, student_id: StudentId, course_id: CourseId) -> Result<()> {
        if !self.students.contains(student_id) {
            return Err(StoreError::StudentNotFound);
        }
        if !self.courses.contains(course_id) {
            return Err(StoreError::CourseNotFound);
        }
        if self.enrollments.contains(&(student_id, course_id)) {
            return Err(StoreError::AlreadyEnrolled);
        }
        if self.enrollment_count(course_id) >= self.course_capacity {
            return Err(StoreError::CourseFull);
        }
        self.enrollments.insert((student_id, course_id));
        Ok(())
    }

    /// Removes an enrollment.
    ///
    /// # Errors
    /// [`StoreError::EnrollmentNotFound`] if the pair is not enrolled.
    pub fn unenroll(&mut self, student_id: StudentId, course_id: CourseId) -> Result<()> {
        if self.enrollments.remove(&(student_id, course_id)) {
            Ok(())
        } else {
            Err(StoreError::EnrollmentNotFound)
        }
    }

    pub fn is_enrolled(&self, student_id: StudentId, course_id: CourseId) -> bool {
        self.enrollments.contains(&(student_id, course_id))
    }

    /// Number of students enrolled in a course.
    pub fn enrollment_count(&self, course_id: CourseId) -> usize {
        self.enrollments
            .iter()
            .filter(|&&(_, c)| c == course_id)
            .count()
    }

    /// Iterates all (student, course) pairs.
    pub fn enrollments(&self) -> impl Iterator<Item = (StudentId, CourseId)> + '_ {
        self.enrollments.iter().copied()
    }

    /// Courses the student is enrolled in.
    pub fn student_courses(&self, student_id: StudentId) -> Vec<Course> {
        self.enrollments
            .range((student_id, CourseId::MIN)..=(student_id, CourseId::MAX))
            .filter_map(|&(_, c)| self.courses.get(c).cloned())
            .collect()
    }

    /// Students enrolled in the course.
    pub fn course_students(&self, course_id: CourseId) -> Vec<Student> {
        self.enrollments
            .iter()
            .filter(|&&(_, c)| c == course_id)
            .filter_map(|&(s, _)| self.students.get(s).cloned())
            .collect()
    }

    /// Clears every record and enrollment and restarts both id sequences.
    pub fn reset(&mut self) {
        self.students.clear();
        self.courses.clear();
        self.enrollments.clear();
        tracing::debug!("Enrollment store reset");
    }
}

impl Default for EnrollmentStore {
    fn default() -> Self {
        Self::new()
    }
}
