//! Student and course records, creation fields and partial updates.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Student identifier.
pub type StudentId = u64;

/// Course identifier.
pub type CourseId = u64;

/// Entity kind managed by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Students,
    Courses,
}

impl EntityKind {
    /// Returns the collection tag used in paths and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Students => "students",
            EntityKind::Courses => "courses",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "students" => Ok(EntityKind::Students),
            "courses" => Ok(EntityKind::Courses),
            other => Err(StoreError::UnknownKind(other.to_string())),
        }
    }
}

/// A registered student.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: StudentId,
    pub name: String,
    pub email: String,
}

/// A course that students can enroll in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: CourseId,
    pub title: String,
    pub teacher: String,
}

/// A record of either kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Entity {
    Student(Student),
    Course(Course),
}

impl Entity {
    /// Returns the record id.
    pub fn id(&self) -> u64 {
        match self {
            Entity::Student(s) => s.id,
            Entity::Course(c) => c.id,
        }
    }

    /// Returns the kind of this record.
    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Student(_) => EntityKind::Students,
            Entity::Course(_) => EntityKind::Courses,
        }
    }

    pub fn as_student(&self) -> Option<&Student> {
        match self {
            Entity::Student(s) => Some(s),
            Entity::Course(_) => None,
        }
    }

    pub fn as_course(&self) -> Option<&Course> {
        match self {
            Entity::Course(c) => Some(c),
            Entity::Student(_) => None,
        }
    }
}

impl From<Student> for Entity {
    fn from(student: Student) -> Self {
        Entity::Student(student)
    }
}

impl From<Course> for Entity {
    fn from(course: Course) -> Self {
        Entity::Course(course)
    }
}

/// Fields required to create a student.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewStudent {
    pub name: String,
    pub email: String,
}

/// Fields required to create a course.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewCourse {
    pub title: String,
    pub teacher: String,
}

/// Creation fields for either kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NewEntity {
    Student(NewStudent),
    Course(NewCourse),
}

impl NewEntity {
    pub fn kind(&self) -> EntityKind {
        match self {
            NewEntity::Student(_) => EntityKind::Students,
            NewEntity::Course(_) => EntityKind::Courses,
        }
    }
}

/// Replacement fields for a student; `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StudentPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Replacement fields for a course; `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CoursePatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub teacher: Option<String>,
}

/// Partial update for either kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityPatch {
    Student(StudentPatch),
    Course(CoursePatch),
}

impl EntityPatch {
    pub fn kind(&self) -> EntityKind {
        match self {
            EntityPatch::Student(_) => EntityKind::Students,
            EntityPatch::Course(_) => EntityKind::Courses,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_parsing() {
        assert_eq!("students".parse::<EntityKind>(), Ok(EntityKind::Students));
        assert_eq!("courses".parse::<EntityKind>(), Ok(EntityKind::Courses));
        assert_eq!(
            "teachers".parse::<EntityKind>(),
            Err(StoreError::UnknownKind("teachers".to_string()))
        );
    }

    #[test]
    fn test_entity_serializes_as_plain_record() {
        let entity = Entity::from(Student {
            id: 1,
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
        });
        let json = serde_json::to_value(&entity).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": 1, "name": "Alice", "email": "alice@example.com"})
        );
    }
}
