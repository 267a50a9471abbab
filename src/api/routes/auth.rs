//! Auth Routes
//!
//! - POST /api/v1/auth/register - Create an account and open a session
//! - POST /api/v1/auth/login - Open a session for existing credentials
//!
//! Both return the token together with the role-appropriate dashboard path
//! the client should navigate to.

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::dto::{LoginRequest, RegisterRequest, SessionResponse};
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::auth::NewAccount;

/// POST /api/v1/auth/register
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<SessionResponse>)> {
    let (user, token) = state
        .auth
        .register(NewAccount {
            email: req.email,
            password: req.password,
            full_name: req.full_name,
            phone: req.phone,
            role: req.role,
            birth_date: req.birth_date,
        })
        .await?;

    let dashboard = user.role.dashboard_path().to_string();
    Ok((
        StatusCode::CREATED,
        Json(SessionResponse {
            token,
            user: user.into(),
            dashboard,
        }),
    ))
}

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<SessionResponse>> {
    let (user, token) = state.auth.login(&req.email, &req.password).await?;

    let dashboard = user.role.dashboard_path().to_string();
    Ok(Json(SessionResponse {
        token,
        user: user.into(),
        dashboard,
    }))
}
