use super::*;
use crate::error::StoreError;
use crate::model::{
    CoursePatch, Entity, EntityKind, EntityPatch, NewCourse, NewEntity, NewStudent, StudentPatch,
};
use proptest::prelude::*;

fn seeded_store() -> EnrollmentStore {
    let mut store = EnrollmentStore::new();
    store.reset();
    store.seed();
    store
}

fn new_student(name: &str, email: &str) -> NewStudent {
    NewStudent {
        name: name.to_string(),
        email: email.to_string(),
    }
}

fn new_course(title: &str, teacher: &str) -> NewCourse {
    NewCourse {
        title: title.to_string(),
        teacher: teacher.to_string(),
    }
}

#[test]
fn test_seed_lists_fixture_students() {
    let store = seeded_store();
    let students = store.list(EntityKind::Students);
    assert_eq!(students.len(), 3);
    assert_eq!(students[0].as_student().unwrap().name, "Alice");
    assert_eq!(store.len(EntityKind::Courses), SEED_COURSES.len());
}

#[test]
fn test_duplicate_course_title_rejected() {
    let mut store = seeded_store();
    let result = store.create(NewEntity::Course(new_course("Math", "Someone")));
    assert_eq!(result, Err(StoreError::DuplicateTitle));
    assert_eq!(
        result.unwrap_err().to_string(),
        "Course title must be unique"
    );
    assert_eq!(store.len(EntityKind::Courses), 3);
}

#[test]
fn test_create_student() {
    let mut store = seeded_store();
    let created = store
        .create(NewEntity::Student(new_student("David", "david@example.com")))
        .unwrap();
    assert_eq!(created.kind(), EntityKind::Students);
    assert_eq!(created.as_student().unwrap().name, "David");
    assert_eq!(created.id(), 4);
    assert_eq!(store.list(EntityKind::Students).len(), 4);
}

#[test]
fn test_duplicate_student_email_rejected() {
    let mut store = seeded_store();
    let result = store.create_student(new_student("Eve", "alice@example.com"));
    assert_eq!(result, Err(StoreError::DuplicateEmail));
    assert_eq!(store.len(EntityKind::Students), 3);
}

#[test]
fn test_get_returns_none_for_missing_entity() {
    let store = seeded_store();
    assert!(store.get(EntityKind::Students, 999).is_none());
    assert!(store.get(EntityKind::Courses, 999).is_none());
    match store.get(EntityKind::Courses, 1) {
        Some(Entity::Course(course)) => assert_eq!(course.title, "Math"),
        other => panic!("Expected Math course, got {:?}", other),
    }
}

#[test]
fn test_remove_student() {
    let mut store = seeded_store();
    let id = store.list(EntityKind::Students)[0].id();
    assert_eq!(store.remove(EntityKind::Students, id), Ok(true));
    assert!(store.student(id).is_none());
    assert_eq!(store.remove(EntityKind::Students, id), Ok(false));
}

#[test]
fn test_remove_missing_returns_false() {
    let mut store = seeded_store();
    assert_eq!(store.remove(EntityKind::Students, 999), Ok(false));
    assert_eq!(store.remove(EntityKind::Courses, 999), Ok(false));
}

#[test]
fn test_course_capacity_enforced() {
    let mut store = seeded_store();
    let course_id = store.list(EntityKind::Courses)[0].id();
    for i in 0..3 {
        store
            .create_student(new_student("Extra", &format!("extra{}@example.com", i)))
            .unwrap();
    }
    store.enroll(1, course_id).unwrap();
    store.enroll(2, course_id).unwrap();
    store.enroll(3, course_id).unwrap();

    assert_eq!(store.enroll(4, course_id), Err(StoreError::CourseFull));
    assert_eq!(store.enrollment_count(course_id), 3);
    assert!(!store.is_enrolled(4, course_id));
}

#[test]
fn test_configured_capacity() {
    let mut store = EnrollmentStore::with_course_capacity(1);
    store.seed();
    store.enroll(1, 1).unwrap();
    assert_eq!(store.enroll(2, 1), Err(StoreError::CourseFull));
    assert_eq!(store.course_capacity(), 1);
}

#[test]
fn test_course_with_students_cannot_be_removed() {
    let mut store = seeded_store();
    store.enroll(1, 1).unwrap();
    let result = store.remove(EntityKind::Courses, 1);
    assert_eq!(result, Err(StoreError::CourseHasStudents));
    assert_eq!(
        result.unwrap_err().to_string(),
        "Cannot delete course: students are enrolled"
    );
    assert!(store.course(1).is_some());
}

#[test]
fn test_enrolled_student_cannot_be_removed() {
    let mut store = seeded_store();
    store.enroll(1, 1).unwrap();
    let result = store.remove(EntityKind::Students, 1);
    assert_eq!(result, Err(StoreError::StudentEnrolled));
    assert_eq!(
        result.unwrap_err().to_string(),
        "Cannot delete student: enrolled in a course"
    );
}

#[test]
fn test_remove_succeeds_after_unenroll() {
    let mut store = seeded_store();
    store.enroll(1, 1).unwrap();
    store.enroll(2, 1).unwrap();
    store.unenroll(1, 1).unwrap();
    assert_eq!(
        store.remove(EntityKind::Courses, 1),
        Err(StoreError::CourseHasStudents)
    );
    store.unenroll(2, 1).unwrap();
    assert_eq!(store.remove(EntityKind::Courses, 1), Ok(true));
    assert_eq!(store.remove(EntityKind::Students, 1), Ok(true));
}

#[test]
fn test_enroll_missing_student() {
    let mut store = seeded_store();
    assert_eq!(store.enroll(999, 1), Err(StoreError::StudentNotFound));
}

#[test]
fn test_enroll_missing_course() {
    let mut store = seeded_store();
    assert_eq!(store.enroll(1, 999), Err(StoreError::CourseNotFound));
}

#[test]
fn test_enroll_checks_student_before_course() {
    let mut store = seeded_store();
    assert_eq!(store.enroll(999, 999), Err(StoreError::StudentNotFound));
}

#[test]
fn test_duplicate_enrollment_rejected() {
    let mut store = seeded_store();
    store.enroll(1, 1).unwrap();
    assert_eq!(store.enroll(1, 1), Err(StoreError::AlreadyEnrolled));
    assert_eq!(store.enrollments().count(), 1);
}

#[test]
fn test_duplicate_reported_before_full() {
    let mut store = seeded_store();
    store.enroll(1, 1).unwrap();
    store.enroll(2, 1).unwrap();
    store.enroll(3, 1).unwrap();
    assert_eq!(store.enroll(1, 1), Err(StoreError::AlreadyEnrolled));
}

#[test]
fn test_unenroll_twice() {
    let mut store = seeded_store();
    store.enroll(1, 1).unwrap();
    assert_eq!(store.unenroll(1, 1), Ok(()));
    assert_eq!(store.unenroll(1, 1), Err(StoreError::EnrollmentNotFound));
}

#[test]
fn test_student_courses() {
    let mut store = seeded_store();
    store.enroll(1, 1).unwrap();
    store.enroll(1, 2).unwrap();

    let titles: Vec<_> = store
        .student_courses(1)
        .into_iter()
        .map(|c| c.title)
        .collect();
    assert_eq!(titles.len(), 2);
    assert!(titles.contains(&"Math".to_string()));
    assert!(titles.contains(&"Physics".to_string()));
    assert!(store.student_courses(2).is_empty());
}

#[test]
fn test_course_students() {
    let mut store = seeded_store();
    store.enroll(1, 1).unwrap();
    store.enroll(2, 1).unwrap();

    let names: Vec<_> = store
        .course_students(1)
        .into_iter()
        .map(|s| s.name)
        .collect();
    assert!(names.contains(&"Alice".to_string()));
    assert!(names.contains(&"Bob".to_string()));
    assert_eq!(names.len(), 2);
}

#[test]
fn test_update_student() {
    let mut store = seeded_store();
    let updated = store
        .update(
            1,
            EntityPatch::Student(StudentPatch {
                name: Some("Alice Updated".to_string()),
                email: Some("alice@example.com".to_string()),
            }),
        )
        .unwrap();
    assert_eq!(updated.as_student().unwrap().name, "Alice Updated");

    let result = store.update_student(
        2,
        StudentPatch {
            name: None,
            email: Some("alice@example.com".to_string()),
        },
    );
    assert_eq!(result, Err(StoreError::DuplicateEmail));
    assert_eq!(store.student(2).unwrap().email, "bob@example.com");

    let result = store.update_student(999, StudentPatch::default());
    assert_eq!(result, Err(StoreError::StudentNotFound));
}

#[test]
fn test_update_course() {
    let mut store = seeded_store();
    let updated = store
        .update_course(
            1,
            CoursePatch {
                title: Some("Algebra".to_string()),
                teacher: Some("Prof. X".to_string()),
            },
        )
        .unwrap();
    assert_eq!(updated.title, "Algebra");
    assert_eq!(updated.teacher, "Prof. X");

    let result = store.update_course(
        2,
        CoursePatch {
            title: Some("Algebra".to_string()),
            teacher: None,
        },
    );
    assert_eq!(result, Err(StoreError::DuplicateTitle));
    assert_eq!(store.course(2).unwrap().title, "Physics");

    let result = store.update(999, EntityPatch::Course(CoursePatch::default()));
    assert_eq!(result, Err(StoreError::CourseNotFound));
}

#[test]
fn test_partial_update_keeps_other_fields() {
    let mut store = seeded_store();
    let updated = store
        .update_course(
            3,
            CoursePatch {
                title: None,
                teacher: Some("Dr. Jones".to_string()),
            },
        )
        .unwrap();
    assert_eq!(updated.title, "History");
    assert_eq!(updated.teacher, "Dr. Jones");
}

#[test]
fn test_reset_restarts_ids() {
    let mut store = seeded_store();
    store.enroll(1, 1).unwrap();
    store.reset();

    assert!(store.is_empty());
    assert!(store.list(EntityKind::Students).is_empty());
    assert!(store.list(EntityKind::Courses).is_empty());

    let student = store
        .create_student(new_student("Zed", "zed@example.com"))
        .unwrap();
    let course = store.create_course(new_course("Art", "Ms. Gray")).unwrap();
    assert_eq!(student.id, FIRST_ID);
    assert_eq!(course.id, FIRST_ID);
}

#[test]
fn test_seed_is_additive() {
    let mut store = EnrollmentStore::new();
    store
        .create_student(new_student("Zed", "zed@example.com"))
        .unwrap();
    store.seed();
    let students = store.list(EntityKind::Students);
    assert_eq!(students.len(), 4);
    assert_eq!(students[1].as_student().unwrap().name, "Alice");

    // A second seed collides with every fixture and adds nothing
    store.seed();
    assert_eq!(store.len(EntityKind::Students), 4);
    assert_eq!(store.len(EntityKind::Courses), 3);
}

#[test]
fn test_failed_operations_leave_store_unchanged() {
    let mut store = seeded_store();
    store.enroll(1, 1).unwrap();
    let before = format!("{:?}", store);

    let _ = store.create_student(new_student("Eve", "bob@example.com"));
    let _ = store.create_course(new_course("Physics", "Someone"));
    let _ = store.enroll(1, 1);
    let _ = store.enroll(999, 1);
    let _ = store.unenroll(2, 2);
    let _ = store.remove(EntityKind::Students, 1);
    let _ = store.remove(EntityKind::Courses, 1);
    let _ = store.update_student(
        2,
        StudentPatch {
            name: Some("Robert".to_string()),
            email: Some("alice@example.com".to_string()),
        },
    );

    assert_eq!(format!("{:?}", store), before);
}

proptest! {
    #[test]
    fn created_ids_strictly_increase(removals in proptest::collection::vec(any::<bool>(), 1..40)) {
        let mut store = EnrollmentStore::new();
        let mut last_id = 0;
        for (i, remove) in removals.into_iter().enumerate() {
            let student = store
                .create_student(new_student("S", &format!("s{}@example.com", i)))
                .unwrap();
            prop_assert!(student.id > last_id);
            last_id = student.id;
            if remove {
                prop_assert_eq!(store.remove(EntityKind::Students, student.id), Ok(true));
            }
        }
    }

    #[test]
    fn duplicate_email_never_changes_count(count in 1usize..20, pick in 0usize..20) {
        let mut store = EnrollmentStore::new();
        for i in 0..count {
            store
                .create_student(new_student("S", &format!("s{}@example.com", i)))
                .unwrap();
        }
        let email = format!("s{}@example.com", pick % count);
        let result = store.create_student(new_student("Dup", &email));
        prop_assert_eq!(result, Err(StoreError::DuplicateEmail));
        prop_assert_eq!(store.len(EntityKind::Students), count);
    }

    #[test]
    fn duplicate_title_never_changes_count(count in 1usize..20, pick in 0usize..20) {
        let mut store = EnrollmentStore::new();
        for i in 0..count {
            store.create_course(new_course(&format!("C{}", i), "T")).unwrap();
        }
        let title = format!("C{}", pick % count);
        let result = store.create_course(new_course(&title, "Other"));
        prop_assert_eq!(result, Err(StoreError::DuplicateTitle));
        prop_assert_eq!(store.len(EntityKind::Courses), count);
    }

    #[test]
    fn course_never_exceeds_capacity(capacity in 1usize..6, students in 1usize..12) {
        let mut store = EnrollmentStore::with_course_capacity(capacity);
        let course = store.create_course(new_course("Math", "T")).unwrap();
        for i in 0..students {
            let student = store
                .create_student(new_student("S", &format!("s{}@example.com", i)))
                .unwrap();
            let result = store.enroll(student.id, course.id);
            if i < capacity {
                prop_assert_eq!(result, Ok(()));
            } else {
                prop_assert_eq!(result, Err(StoreError::CourseFull));
            }
        }
        prop_assert_eq!(store.enrollment_count(course.id), students.min(capacity));
    }
}
