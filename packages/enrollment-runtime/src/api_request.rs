//! API request types and implementations

use std::collections::HashMap;

use enrollment_core::{CourseId, Entity, EntityKind, EntityPatch, NewEntity, StudentId};
use serde::Serialize;

use crate::ResponseSender;

/// API request from REST server
#[derive(Debug)]
pub enum ApiRequest {
    /// List records with filtering and pagination
    List {
        kind: EntityKind,
        query: QueryParams,
        response: ResponseSender<Page>,
    },
    /// Fetch one record and its related records
    Get {
        kind: EntityKind,
        id: u64,
        response: ResponseSender<EntityDetail>,
    },
    /// Create a record
    Create {
        fields: NewEntity,
        response: ResponseSender<Entity>,
    },
    /// Partially update a record
    Update {
        id: u64,
        patch: EntityPatch,
        response: ResponseSender<Entity>,
    },
    /// Delete a record; `false` means it did not exist
    Delete {
        kind: EntityKind,
        id: u64,
        response: ResponseSender<bool>,
    },
    /// Enroll a student in a course
    Enroll {
        student_id: StudentId,
        course_id: CourseId,
        response: ResponseSender<()>,
    },
    /// Remove an enrollment
    Unenroll {
        student_id: StudentId,
        course_id: CourseId,
        response: ResponseSender<()>,
    },
    /// Wipe all state
    Reset { response: ResponseSender<()> },
    /// Add fixture data
    Seed { response: ResponseSender<()> },
}

impl ApiRequest {
    /// Returns true once the caller has dropped its response receiver,
    /// e.g. after timing out. Such requests are never applied.
    pub fn is_abandoned(&self) -> bool {
        match self {
            ApiRequest::List { response, .. } => response.is_closed(),
            ApiRequest::Get { response, .. } => response.is_closed(),
            ApiRequest::Create { response, .. } => response.is_closed(),
            ApiRequest::Update { response, .. } => response.is_closed(),
            ApiRequest::Delete { response, .. } => response.is_closed(),
            ApiRequest::Enroll { response, .. } => response.is_closed(),
            ApiRequest::Unenroll { response, .. } => response.is_closed(),
            ApiRequest::Reset { response } => response.is_closed(),
            ApiRequest::Seed { response } => response.is_closed(),
        }
    }
}

/// Query parameters for filtering and pagination
#[derive(Debug, Clone, Default)]
pub struct QueryParams {
    /// 1-based page number (default 1)
    pub page: Option<usize>,
    /// Page size (default 10)
    pub limit: Option<usize>,
    /// Substring filters (field_name -> needle)
    pub filters: HashMap<String, String>,
}

/// One page of a filtered listing.
#[derive(Debug, Clone, Serialize)]
pub struct Page {
    /// Records on this page
    pub items: Vec<Entity>,
    /// Number of records matching the filters, before pagination
    pub total: usize,
}

/// A record together with the records it is enrolled with.
#[derive(Debug, Clone, Serialize)]
pub struct EntityDetail {
    /// The requested record
    pub entity: Entity,
    /// Courses of a student, or students of a course
    pub related: Vec<Entity>,
}
