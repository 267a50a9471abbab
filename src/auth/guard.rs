//! Route guard
//!
//! Turns a bearer token into an [`AuthUser`] and checks the route's role
//! requirement. A role mismatch never exposes protected content; the API
//! layer renders it as a 403 carrying the caller's own dashboard path, the
//! service rendition of redirect-on-mismatch.

use crate::auth::token::TokenKeys;
use crate::store::{Id, Role};
use thiserror::Error;

/// Guard errors
#[derive(Error, Debug)]
pub enum GuardError {
    /// No usable `Authorization: Bearer ...` header
    #[error("missing or malformed Authorization header")]
    MissingToken,

    /// Token failed verification
    #[error("invalid or expired session")]
    InvalidToken,

    /// Authenticated, but the wrong role for this route
    #[error("role {actual} cannot access a {required} route")]
    RoleMismatch { required: Role, actual: Role },
}

/// The authenticated caller, extracted from a verified token
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Id,
    pub role: Role,
    pub email: String,
}

impl AuthUser {
    /// The route requires exactly this role
    pub fn require(&self, required: Role) -> Result<(), GuardError> {
        if self.role == required {
            Ok(())
        } else {
            Err(GuardError::RoleMismatch {
                required,
                actual: self.role,
            })
        }
    }

    /// The route accepts any of the listed roles
    pub fn require_any(&self, allowed: &[Role]) -> Result<(), GuardError> {
        if allowed.contains(&self.role) {
            return Ok(());
        }
        Err(GuardError::RoleMismatch {
            required: *allowed.first().unwrap_or(&Role::Admin),
            actual: self.role,
        })
    }

    /// Dashboard the caller should land on
    pub fn dashboard_path(&self) -> &'static str {
        self.role.dashboard_path()
    }
}

/// Validate the raw `Authorization` header value against the keys
pub fn authorize(header: Option<&str>, keys: &TokenKeys) -> Result<AuthUser, GuardError> {
    let token = header
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or(GuardError::MissingToken)?;
    let claims = keys.verify(token).map_err(|_| GuardError::InvalidToken)?;
    Ok(AuthUser {
        id: claims.sub,
        role: claims.role,
        email: claims.email,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::User;
    use chrono::Utc;

    fn keys() -> TokenKeys {
        TokenKeys::new("test-secret", 1)
    }

    fn token_for(role: Role) -> String {
        keys()
            .issue(&User {
                id: 3,
                email: "ana@example.com".to_string(),
                full_name: "Ana".to_string(),
                phone: "3001234567".to_string(),
                role,
                password_hash: String::new(),
                created_at: Utc::now(),
            })
            .unwrap()
    }

    #[test]
    fn test_missing_header() {
        assert!(matches!(
            authorize(None, &keys()),
            Err(GuardError::MissingToken)
        ));
    }

    #[test]
    fn test_malformed_header() {
        let token = token_for(Role::Buyer);
        // no Bearer prefix
        assert!(matches!(
            authorize(Some(&token), &keys()),
            Err(GuardError::MissingToken)
        ));
    }

    #[test]
    fn test_valid_token_extracts_user() {
        let header = format!("Bearer {}", token_for(Role::Seller));
        let user = authorize(Some(&header), &keys()).unwrap();
        assert_eq!(user.id, 3);
        assert_eq!(user.role, Role::Seller);
    }

    #[test]
    fn test_role_mismatch_keeps_actual_role() {
        let header = format!("Bearer {}", token_for(Role::Buyer));
        let user = authorize(Some(&header), &keys()).unwrap();
        match user.require(Role::Admin) {
            Err(GuardError::RoleMismatch { required, actual }) => {
                assert_eq!(required, Role::Admin);
                assert_eq!(actual, Role::Buyer);
            }
            other => panic!("expected role mismatch, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_require_any() {
        let header = format!("Bearer {}", token_for(Role::Seller));
        let user = authorize(Some(&header), &keys()).unwrap();
        assert!(user.require_any(&[Role::Seller, Role::Admin]).is_ok());
        assert!(user.require_any(&[Role::Buyer]).is_err());
    }
}
