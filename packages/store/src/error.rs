//! Error types shared by the collaborator traits and the form buffers.

use thiserror::Error;

use crate::models::ChildId;

/// Failure reported by a [`crate::RecordBackend`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BackendError {
    #[error("no authenticated actor is bound to the backend")]
    Unauthenticated,
    #[error("child {0} not found")]
    NotFound(ChildId),
    #[error("backend call failed: {0}")]
    Remote(String),
}

/// Failure reported by an [`crate::IdentityClient`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IdentityError {
    #[error("login failed: {0}")]
    LoginFailed(String),
    #[error("identity provider call failed: {0}")]
    Remote(String),
}

/// Validation failure of a form buffer. The message is shown to the user as-is.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormError {
    #[error("{0} is required")]
    Missing(&'static str),
    #[error("Please select a gender")]
    InvalidGender,
    #[error("Weight must be a positive number of kilograms")]
    InvalidWeight,
    #[error("Birth date must be a valid date (YYYY-MM-DD)")]
    InvalidBirthDate,
    #[error("Please enter a valid email")]
    InvalidEmail,
}
