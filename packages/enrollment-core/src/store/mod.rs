//! Record tables, the enrollment store and its fixture data.

mod seed;
#[allow(clippy::module_inception)]
mod store;
mod table;

pub use seed::{SEED_COURSES, SEED_STUDENTS};
pub use store::EnrollmentStore;
pub use table::{Record, Table, FIRST_ID};
