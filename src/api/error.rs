//! API Error Types
//!
//! Defines error types for the API layer and implements conversion to HTTP
//! responses. Service errors convert with `?`; the match below decides the
//! status code and stable error code per variant. A role mismatch carries
//! the caller's dashboard path so clients can redirect instead of rendering
//! protected content.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::auth::{AuthError, GuardError};
use crate::catalog::CatalogError;
use crate::listings::ListingError;
use crate::store::StoreError;
use crate::validate::ValidationError;
use crate::visits::VisitError;

/// API error types
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request validation failed
    #[error("Validation error: {0}")]
    Validation(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Route guard rejection (authn or role mismatch)
    #[error(transparent)]
    Guard(#[from] GuardError),

    /// Registration/login error
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Catalog service error
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Listing service error
    #[error(transparent)]
    Listing(#[from] ListingError),

    /// Visit service error
    #[error(transparent)]
    Visit(#[from] VisitError),

    /// Store layer error
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Validation(err.to_string())
    }
}

/// Error response body
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
    pub request_id: String,
    /// Dashboard the caller should be sent to on a role mismatch
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_to: Option<String>,
}

/// Error details
#[derive(Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl ApiError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),

            ApiError::Guard(e) => match e {
                GuardError::MissingToken | GuardError::InvalidToken => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED")
                }
                GuardError::RoleMismatch { .. } => (StatusCode::FORBIDDEN, "ROLE_MISMATCH"),
            },

            ApiError::Auth(e) => match e {
                AuthError::InvalidCredentials => {
                    (StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS")
                }
                AuthError::EmailTaken(_) => (StatusCode::CONFLICT, "EMAIL_TAKEN"),
                AuthError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
                AuthError::Store(e) => store_status(e),
                AuthError::Token(_) => (StatusCode::INTERNAL_SERVER_ERROR, "TOKEN_ERROR"),
            },

            ApiError::Catalog(e) => match e {
                CatalogError::DuplicateName { .. } => (StatusCode::CONFLICT, "DUPLICATE_NAME"),
                CatalogError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
                CatalogError::Store(e) => store_status(e),
            },

            ApiError::Listing(e) => match e {
                ListingError::InactiveReference(_) => {
                    (StatusCode::BAD_REQUEST, "INVALID_REFERENCE")
                }
                ListingError::NotOwner => (StatusCode::FORBIDDEN, "NOT_OWNER"),
                ListingError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
                ListingError::Store(e) => store_status(e),
            },

            ApiError::Visit(e) => match e {
                VisitError::CapacityExhausted => {
                    (StatusCode::BAD_REQUEST, "CAPACITY_EXHAUSTED")
                }
                VisitError::WindowClosed => (StatusCode::BAD_REQUEST, "WINDOW_CLOSED"),
                VisitError::InvalidTransition { .. } => {
                    (StatusCode::BAD_REQUEST, "INVALID_TRANSITION")
                }
                VisitError::NotOwner => (StatusCode::FORBIDDEN, "NOT_OWNER"),
                VisitError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
                VisitError::Store(e) => store_status(e),
            },

            ApiError::Store(e) => store_status(e),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }

    /// Dashboard path for the caller when the error is a role mismatch
    fn redirect_to(&self) -> Option<String> {
        match self {
            ApiError::Guard(GuardError::RoleMismatch { actual, .. }) => {
                Some(actual.dashboard_path().to_string())
            }
            _ => None,
        }
    }
}

fn store_status(err: &StoreError) -> (StatusCode, &'static str) {
    match err {
        StoreError::NotFound { .. } => (StatusCode::NOT_FOUND, "NOT_FOUND"),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, "STORE_ERROR"),
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let redirect_to = self.redirect_to();
        let request_id = uuid::Uuid::new_v4().to_string();

        tracing::error!(
            request_id = %request_id,
            error_code = %code,
            error_message = %self,
            "API error occurred"
        );

        let body = ErrorResponse {
            error: ErrorBody {
                code: code.to_string(),
                message: self.to_string(),
            },
            request_id,
            redirect_to,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Role;

    #[test]
    fn test_role_mismatch_maps_to_forbidden_with_redirect() {
        let err = ApiError::Guard(GuardError::RoleMismatch {
            required: Role::Admin,
            actual: Role::Seller,
        });
        assert_eq!(err.status_and_code().0, StatusCode::FORBIDDEN);
        assert_eq!(err.redirect_to().as_deref(), Some("/vendedor/dashboard"));
    }

    #[test]
    fn test_capacity_maps_to_bad_request() {
        let err = ApiError::Visit(VisitError::CapacityExhausted);
        assert_eq!(err.status_and_code().0, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_duplicate_maps_to_conflict() {
        let err = ApiError::Catalog(CatalogError::DuplicateName {
            kind: "category",
            name: "Casa".to_string(),
        });
        assert_eq!(err.status_and_code().0, StatusCode::CONFLICT);
    }

    #[test]
    fn test_store_not_found_maps_to_404() {
        let err = ApiError::Store(StoreError::not_found("property", 9));
        assert_eq!(err.status_and_code().0, StatusCode::NOT_FOUND);
    }
}
