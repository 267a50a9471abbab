//! User Routes
//!
//! - GET /api/v1/users/me - The authenticated account

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::dto::UserResponse;
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::auth::AuthUser;

/// GET /api/v1/users/me
///
/// Any authenticated role.
pub async fn me(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
) -> ApiResult<Json<UserResponse>> {
    let user = state.auth.user(auth.id).await?;
    Ok(Json(user.into()))
}
