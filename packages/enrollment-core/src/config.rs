//! Service configuration.

/// Maximum number of students enrolled in one course.
pub const DEFAULT_COURSE_CAPACITY: usize = 3;

/// Store and runtime configuration.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Maximum distinct students per course
    pub course_capacity: usize,
    /// Tick rate in Hz (15-120)
    pub tickrate: u32,
    /// Maximum API requests per tick
    pub max_api_requests_per_tick: u32,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
    /// Response timeout in milliseconds
    pub response_timeout_ms: u64,
    /// Populate fixture data when the server starts
    pub seed_on_startup: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            course_capacity: DEFAULT_COURSE_CAPACITY,
            tickrate: 60,
            max_api_requests_per_tick: 600,
            request_timeout_ms: 5000,   // 5 seconds default
            response_timeout_ms: 10000, // 10 seconds default
            seed_on_startup: true,
        }
    }
}
