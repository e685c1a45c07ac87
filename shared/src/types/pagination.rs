//! Pagination related types for list endpoints

use serde::{Deserialize, Serialize};

/// Default number of items returned by a list endpoint
pub const DEFAULT_LIMIT: i64 = 20;

/// Upper bound on items returned by a list endpoint
pub const MAX_LIMIT: i64 = 100;

/// Limit/offset pagination parameters for list endpoints
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Pagination {
    /// Maximum number of items to return
    #[serde(default = "default_limit")]
    pub limit: i64,

    /// Number of items to skip from the start of the result set
    #[serde(default)]
    pub offset: i64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            offset: 0,
        }
    }
}

impl Pagination {
    /// Create pagination with custom values, clamped to sane bounds
    pub fn new(limit: i64, offset: i64) -> Self {
        Self {
            limit: limit.clamp(1, MAX_LIMIT),
            offset: offset.max(0),
        }
    }

    /// Validate and sanitize pagination parameters
    pub fn validate(mut self) -> Self {
        self.limit = self.limit.clamp(1, MAX_LIMIT);
        self.offset = self.offset.max(0);
        self
    }
}

/// Paginated response wrapper with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    /// The actual data items
    pub data: Vec<T>,

    /// Total number of items across all pages
    pub total: u64,

    /// Limit this page was fetched with
    pub limit: i64,

    /// Offset this page was fetched with
    pub offset: i64,
}

impl<T> PaginatedResponse<T> {
    /// Create a new paginated response
    pub fn new(data: Vec<T>, pagination: Pagination, total: u64) -> Self {
        Self {
            data,
            total,
            limit: pagination.limit,
            offset: pagination.offset,
        }
    }
}

fn default_limit() -> i64 {
    DEFAULT_LIMIT
}
