//! Error type shared by every HTTP handler and its mapping onto status codes.

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use validator::ValidationErrors;

use super::schemas::{ErrorMessage, FieldIssue, ValidationErrorBody};
use crate::store::StoreError;

/// Failure returned by a handler.
///
/// - [`StoreError::NotFound`] → `404 {"detail": "..."}`
/// - [`StoreError::Conflict`] → `400 {"detail": "..."}`
/// - validation failures and malformed input → `422 {"detail": [issue, ...]}`
#[derive(Debug)]
pub enum AppError {
    /// The resource store rejected the operation.
    Store(StoreError),
    /// The request decoded but broke a field constraint.
    Invalid {
        /// Part of the request that failed (`body`, `query`, `path`).
        location: &'static str,
        /// Per-field problems.
        errors: ValidationErrors,
    },
    /// The request could not be decoded at all.
    Malformed {
        /// Part of the request that failed (`body`, `query`, `path`).
        location: &'static str,
        /// Decoder message.
        message: String,
    },
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Store(StoreError::NotFound { .. }) => StatusCode::NOT_FOUND,
            Self::Store(StoreError::Conflict(_)) => StatusCode::BAD_REQUEST,
            Self::Invalid { .. } | Self::Malformed { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

fn issues(location: &'static str, errors: &ValidationErrors) -> Vec<FieldIssue> {
    let mut issues: Vec<FieldIssue> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, field_errors)| {
            let field = field.to_string();
            field_errors.iter().map(move |error| FieldIssue {
                location: location.to_string(),
                field: field.clone(),
                code: error.code.to_string(),
                message: error
                    .message
                    .as_ref()
                    .map(|message| message.to_string())
                    .unwrap_or_else(|| format!("invalid value for {field}")),
            })
        })
        .collect();
    issues.sort_by(|left, right| left.field.cmp(&right.field));
    issues
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            Self::Store(err) => {
                tracing::debug!(status = status.as_u16(), error = %err, "Request rejected");
                (
                    status,
                    Json(ErrorMessage {
                        detail: err.to_string(),
                    }),
                )
                    .into_response()
            }
            Self::Invalid { location, errors } => {
                let detail = issues(location, &errors);
                tracing::debug!(location, issues = detail.len(), "Validation failed");
                (status, Json(ValidationErrorBody { detail })).into_response()
            }
            Self::Malformed { location, message } => {
                tracing::debug!(location, %message, "Malformed request");
                let detail = vec![FieldIssue {
                    location: location.to_string(),
                    field: String::new(),
                    code: "parse".into(),
                    message,
                }];
                (status, Json(ValidationErrorBody { detail })).into_response()
            }
        }
    }
}

impl From<StoreError> for AppError {
    fn from(inner: StoreError) -> Self {
        Self::Store(inner)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Malformed {
            location: "body",
            message: rejection.body_text(),
        }
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Malformed {
            location: "query",
            message: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        Self::Malformed {
            location: "path",
            message: rejection.body_text(),
        }
    }
}
