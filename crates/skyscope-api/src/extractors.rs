//! # Checked JSON Bodies
//!
//! [`CheckedJson`] decodes a request body and then checks that every
//! required text field is non-blank. Undecodable bodies are 400
//! `BAD_REQUEST`; a blank required field is 422 `VALIDATION_ERROR`.

use axum::extract::{FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::error::AppError;

/// Request bodies whose text fields must carry a value.
pub trait RequiredFields {
    /// Every required field as `(name, value)`.
    fn required_fields(&self) -> Vec<(&'static str, &str)>;

    /// The first required field that is empty after trimming.
    fn first_blank(&self) -> Option<BlankField> {
        self.required_fields()
            .into_iter()
            .find(|(_, value)| value.trim().is_empty())
            .map(|(field, _)| BlankField { field })
    }
}

/// A required field was empty or whitespace.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{field} must not be empty")]
pub struct BlankField {
    pub field: &'static str,
}

impl From<BlankField> for AppError {
    fn from(err: BlankField) -> Self {
        Self::Validation(err.to_string())
    }
}

/// JSON body extractor that enforces [`RequiredFields`].
#[derive(Debug)]
pub struct CheckedJson<T>(pub T);

impl<S, T> FromRequest<S> for CheckedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + RequiredFields,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
        match body.first_blank() {
            Some(blank) => Err(blank.into()),
            None => Ok(Self(body)),
        }
    }
}
