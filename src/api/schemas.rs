//! Request and response shapes shared across the HTTP routes.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::items::Item;
use crate::users::User;
use crate::validation::Normalize;

const DEFAULT_PAGE_LIMIT: usize = 10;

/// Offset/limit pagination parameters.
#[derive(Debug, Clone, Copy, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct Pagination {
    /// Number of records to skip.
    #[serde(default)]
    #[param(default = 0, minimum = 0)]
    pub skip: usize,
    /// Maximum number of records to return (1-100).
    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 100))]
    #[param(default = 10, minimum = 1, maximum = 100)]
    pub limit: usize,
}

fn default_limit() -> usize {
    DEFAULT_PAGE_LIMIT
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

impl Normalize for Pagination {
    fn normalize(self) -> Self {
        self
    }
}

/// One page of users.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserList {
    /// Users inside the requested window.
    pub users: Vec<User>,
    /// Number of users matching the filters before paging.
    pub total: usize,
    /// Number of records skipped.
    pub skip: usize,
    /// Maximum number of records returned.
    pub limit: usize,
}

/// One page of items.
#[derive(Debug, Serialize, ToSchema)]
pub struct ItemList {
    /// Items inside the requested window.
    pub items: Vec<Item>,
    /// Number of items matching the filters before paging.
    pub total: usize,
    /// Number of records skipped.
    pub skip: usize,
    /// Maximum number of records returned.
    pub limit: usize,
}

/// Plain confirmation message.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    /// Human-readable message.
    #[schema(example = "Operation completed successfully")]
    pub message: String,
    /// Whether the operation succeeded.
    pub success: bool,
}

/// Health and readiness probe payload.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthStatus {
    /// `healthy` or `ready`.
    #[schema(example = "healthy")]
    pub status: String,
    /// Server time when the probe ran.
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    /// API version.
    #[schema(example = "1.0.0")]
    pub version: String,
}

/// Error body for `400` and `404` responses.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorMessage {
    /// What went wrong.
    #[schema(example = "User with ID 42 not found")]
    pub detail: String,
}

/// Error body for `422` responses.
#[derive(Debug, Serialize, ToSchema)]
pub struct ValidationErrorBody {
    /// Every problem found in the request.
    pub detail: Vec<FieldIssue>,
}

/// A single validation problem.
#[derive(Debug, Serialize, ToSchema)]
pub struct FieldIssue {
    /// Request part: `body`, `query`, or `path`.
    pub location: String,
    /// Offending field, empty when the whole part failed to decode.
    pub field: String,
    /// Machine-readable code such as `length`, `range`, or `email`.
    pub code: String,
    /// Human-readable explanation.
    pub message: String,
}
