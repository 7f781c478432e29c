//! API request handlers

use std::collections::HashMap;

use enrollment_core::{EnrollmentStore, Entity, EntityKind, StoreError};

use crate::api_request::{ApiRequest, EntityDetail, Page, QueryParams};
use crate::Result;

/// Default page number for listings
pub const DEFAULT_PAGE: usize = 1;
/// Default page size for listings
pub const DEFAULT_LIMIT: usize = 10;

/// API request handlers
///
/// Owns the store. Filtering, pagination and related-record lookups for
/// the REST layer happen here, on top of the store's own operations.
#[derive(Debug)]
pub struct ApiHandlers {
    store: EnrollmentStore,
}

impl ApiHandlers {
    /// Create new API handlers
    pub fn new(store: EnrollmentStore) -> Self {
        Self { store }
    }

    /// Read-only access to the store
    pub fn store(&self) -> &EnrollmentStore {
        &self.store
    }

    /// Handle API request
    pub fn handle_api_request(&mut self, req: ApiRequest) {
        match req {
            ApiRequest::List {
                kind,
                query,
                response,
            } => {
                tracing::debug!("Listing {} with {:?}", kind, query);
                let _ = response.send(Ok(self.list_page(kind, &query)));
            }
            ApiRequest::Get { kind, id, response } => {
                tracing::debug!("Reading {} {}", kind, id);
                let _ = response.send(self.detail(kind, id));
            }
            ApiRequest::Create { fields, response } => {
                let kind = fields.kind();
                let result = self.store.create(fields);
                match &result {
                    Ok(entity) => tracing::info!("Created {} {}", kind, entity.id()),
                    Err(e) => tracing::warn!("Rejected {} creation: {}", kind, e),
                }
                let _ = response.send(result);
            }
            ApiRequest::Update {
                id,
                patch,
                response,
            } => {
                let kind = patch.kind();
                let result = self.store.update(id, patch);
                match &result {
                    Ok(_) => tracing::info!("Updated {} {}", kind, id),
                    Err(e) => tracing::warn!("Rejected update of {} {}: {}", kind, id, e),
                }
                let _ = response.send(result);
            }
            ApiRequest::Delete { kind, id, response } => {
                let result = self.store.remove(kind, id);
                match &result {
                    Ok(true) => tracing::info!("Deleted {} {}", kind, id),
                    Ok(false) => tracing::debug!("Nothing to delete for {} {}", kind, id),
                    Err(e) => tracing::warn!("Rejected deletion of {} {}: {}", kind, id, e),
                }
                let _ = response.send(result);
            }
            ApiRequest::Enroll {
                student_id,
                course_id,
                response,
            } => {
                let result = self.store.enroll(student_id, course_id);
                match &result {
                    Ok(()) => tracing::info!(student_id, course_id, "Student enrolled"),
                    Err(e) => tracing::warn!(student_id, course_id, "Enrollment rejected: {}", e),
                }
                let _ = response.send(result);
            }
            ApiRequest::Unenroll {
                student_id,
                course_id,
                response,
            } => {
                let result = self.store.unenroll(student_id, course_id);
                match &result {
                    Ok(()) => tracing::info!(student_id, course_id, "Student unenrolled"),
                    Err(e) => tracing::warn!(student_id, course_id, "Unenroll rejected: {}", e),
                }
                let _ = response.send(result);
            }
            ApiRequest::Reset { response } => {
                tracing::info!("Resetting store");
                self.store.reset();
                let _ = response.send(Ok(()));
            }
            ApiRequest::Seed { response } => {
                tracing::info!("Seeding store");
                self.store.seed();
                let _ = response.send(Ok(()));
            }
        }
    }

    /// Filters `kind` by substring and slices out the requested page.
    pub fn list_page(&self, kind: EntityKind, query: &QueryParams) -> Page {
        let matching: Vec<Entity> = self
            .store
            .list(kind)
            .into_iter()
            .filter(|entity| matches_filters(entity, &query.filters))
            .collect();
        let total = matching.len();

        let page = query.page.unwrap_or(DEFAULT_PAGE).max(1);
        let limit = query.limit.unwrap_or(DEFAULT_LIMIT);
        let start = (page - 1).saturating_mul(limit);
        let items = matching.into_iter().skip(start).take(limit).collect();

        Page { items, total }
    }

    /// Returns a record with its enrolled courses or students.
    pub fn detail(&self, kind: EntityKind, id: u64) -> Result<EntityDetail> {
        let entity = self.store.get(kind, id).ok_or(match kind {
            EntityKind::Students => StoreError::StudentNotFound,
            EntityKind::Courses => StoreError::CourseNotFound,
        })?;
        let related = match kind {
            EntityKind::Students => self
                .store
                .student_courses(id)
                .into_iter()
                .map(Entity::from)
                .collect(),
            EntityKind::Courses => self
                .store
                .course_students(id)
                .into_iter()
                .map(Entity::from)
                .collect(),
        };
        Ok(EntityDetail { entity, related })
    }
}

/// Returns the value of a filterable field, or `None` if the kind has no
/// such field.
fn field_value<'a>(entity: &'a Entity, field: &str) -> Option<&'a str> {
    match (entity, field) {
        (Entity::Student(s), "name") => Some(&s.name),
        (Entity::Student(s), "email") => Some(&s.email),
        (Entity::Course(c), "title") => Some(&c.title),
        (Entity::Course(c), "teacher") => Some(&c.teacher),
        _ => None,
    }
}

/// Unknown filter keys are ignored; empty needles match everything.
fn matches_filters(entity: &Entity, filters: &HashMap<String, String>) -> bool {
    filters.iter().all(|(field, needle)| {
        field_value(entity, field).map_or(true, |value| value.contains(needle.as_str()))
    })
}
