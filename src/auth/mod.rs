//! Accounts and sessions
//!
//! This module provides authentication for the marketplace:
//!
//! - **token**: Signed JWT session tokens carrying user id and role
//! - **guard**: Bearer-token extraction and per-route role checks
//! - [`AuthService`]: registration and login over the user collection
//!
//! Passwords are stored as salted SHA-256 digests (`salt$hash`, URL-safe
//! base64). Sessions live entirely in the token; logout is client-side
//! discard.

pub mod guard;
pub mod token;

pub use guard::{authorize, AuthUser, GuardError};
pub use token::{Claims, TokenError, TokenKeys};

use crate::store::{Id, MarketStore, Role, StoreError, User};
use crate::validate::{self, ValidationError};
use base64::Engine;
use chrono::{NaiveDate, Utc};
use rand::RngCore;
use sha2::{Digest, Sha256};
use std::sync::Arc;
use thiserror::Error;

/// Errors from registration and login
#[derive(Error, Debug)]
pub enum AuthError {
    /// Unknown email or wrong password; deliberately indistinct
    #[error("invalid email or password")]
    InvalidCredentials,

    /// Another account holds this email
    #[error("an account with email '{0}' already exists")]
    EmailTaken(String),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result type alias for auth operations
pub type AuthResult<T> = Result<T, AuthError>;

/// Fields supplied at registration
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub phone: String,
    pub role: Role,
    /// Checked against the 18-year minimum when supplied
    pub birth_date: Option<NaiveDate>,
}

/// Service over the user collection plus the token keys
#[derive(Clone)]
pub struct AuthService {
    store: Arc<MarketStore>,
    keys: TokenKeys,
}

impl AuthService {
    pub fn new(store: Arc<MarketStore>, keys: TokenKeys) -> Self {
        Self { store, keys }
    }

    pub fn keys(&self) -> &TokenKeys {
        &self.keys
    }

    /// Create an account and open a session for it
    pub async fn register(&self, account: NewAccount) -> AuthResult<(User, String)> {
        validate::email("email", &account.email)?;
        validate::length("full_name", &account.full_name, 3, 100)?;
        validate::phone("phone", &account.phone)?;
        validate::password_strength("password", &account.password)?;
        if let Some(birth_date) = account.birth_date {
            validate::min_age("birth_date", birth_date, 18)?;
        }

        let email = account.email.trim().to_string();
        let key = email.to_lowercase();
        let taken = self
            .store
            .users()
            .find(|u| u.email.to_lowercase() == key)
            .await
            .is_some();
        if taken {
            return Err(AuthError::EmailTaken(email));
        }

        let password_hash = hash_password(&account.password);
        let user = self
            .store
            .users()
            .insert(|id| User {
                id,
                email: email.clone(),
                full_name: account.full_name.trim().to_string(),
                phone: account.phone.trim().to_string(),
                role: account.role,
                password_hash,
                created_at: Utc::now(),
            })
            .await;

        let token = self.keys.issue(&user)?;
        tracing::info!(user_id = user.id, role = %user.role, "Registered account");
        Ok((user, token))
    }

    /// Verify credentials and open a session
    pub async fn login(&self, email: &str, password: &str) -> AuthResult<(User, String)> {
        let key = email.trim().to_lowercase();
        let user = self
            .store
            .users()
            .find(|u| u.email.to_lowercase() == key)
            .await
            .ok_or(AuthError::InvalidCredentials)?;

        if !verify_password(password, &user.password_hash) {
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.keys.issue(&user)?;
        tracing::info!(user_id = user.id, role = %user.role, "Opened session");
        Ok((user, token))
    }

    pub async fn user(&self, id: Id) -> AuthResult<User> {
        Ok(self.store.users().get(id).await?)
    }
}

/// Hash a password with a fresh random salt, `salt$hash` in URL-safe base64
pub fn hash_password(password: &str) -> String {
    let mut salt = [0u8; 16];
    rand::rngs::OsRng.fill_bytes(&mut salt);
    let engine = base64::engine::general_purpose::URL_SAFE_NO_PAD;
    format!(
        "{}${}",
        engine.encode(salt),
        engine.encode(digest(&salt, password))
    )
}

/// Check a password against a stored `salt$hash` value
pub fn verify_password(password: &str, stored: &str) -> bool {
    let engine = base64::engine::general_purpose::URL_SAFE_NO_PAD;
    let Some((salt_part, hash_part)) = stored.split_once('$') else {
        return false;
    };
    let (Ok(salt), Ok(expected)) = (engine.decode(salt_part), engine.decode(hash_part)) else {
        return false;
    };
    hashes_equal(&digest(&salt, password), &expected)
}

fn digest(salt: &[u8], password: &str) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(salt);
    hasher.update(password.as_bytes());
    hasher.finalize().into()
}

/// Constant-time-ish compare for digests
fn hashes_equal(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff: u8 = 0;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}
