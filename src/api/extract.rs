//! Extractors that decode, trim, and validate request input before a handler runs.
//!
//! Every failure becomes an [`AppError`], so malformed or out-of-range input is answered with
//! `422` instead of axum's default rejection statuses.

use async_trait::async_trait;
use axum::{
    Json,
    extract::{FromRequest, FromRequestParts, Path, Query, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationError, ValidationErrors};

use super::error::AppError;
use crate::validation::Normalize;

/// JSON body that has been trimmed and validated.
#[derive(Debug)]
pub struct ValidJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned + Validate + Normalize + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        let value = value.normalize();
        value.validate().map_err(|errors| AppError::Invalid {
            location: "body",
            errors,
        })?;
        Ok(Self(value))
    }
}

/// Query string that has been decoded and validated.
#[derive(Debug)]
pub struct ValidQuery<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ValidQuery<T>
where
    T: DeserializeOwned + Validate + Normalize + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state).await?;
        let value = value.normalize();
        value.validate().map_err(|errors| AppError::Invalid {
            location: "query",
            errors,
        })?;
        Ok(Self(value))
    }
}

/// Positive resource identifier taken from the `{id}` path segment.
#[derive(Debug, Clone, Copy)]
pub struct ResourceId(pub u64);

#[async_trait]
impl<S> FromRequestParts<S> for ResourceId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<u64>::from_request_parts(parts, state).await?;
        if id == 0 {
            let mut errors = ValidationErrors::new();
            errors.add(
                "id",
                ValidationError::new("range").with_message("must be greater than 0".into()),
            );
            return Err(AppError::Invalid {
                location: "path",
                errors,
            });
        }
        Ok(Self(id))
    }
}
