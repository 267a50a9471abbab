//! Visit Routes
//!
//! Buyer bookings against visit windows. The buyer's email comes from the
//! session, never the request body. Capacity rejections surface as 400.
//!
//! - POST /api/v1/visits - Book a slot
//! - GET /api/v1/visits/mine - The buyer's own bookings
//! - PUT /api/v1/visits/:id/status - Confirm/complete a visit
//! - DELETE /api/v1/visits/:id - Cancel a visit

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::api::dto::{BookVisitRequest, VisitListResponse, VisitResponse, VisitStatusRequest};
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::auth::AuthUser;
use crate::store::{Id, Role};
use crate::visits::VisitError;

/// POST /api/v1/visits
pub async fn book_visit(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Json(req): Json<BookVisitRequest>,
) -> ApiResult<(StatusCode, Json<VisitResponse>)> {
    auth.require(Role::Buyer)?;
    let visit = state.visits.book_visit(req.schedule_id, &auth.email).await?;
    Ok((StatusCode::CREATED, Json(visit.into())))
}

/// GET /api/v1/visits/mine
pub async fn my_visits(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
) -> ApiResult<Json<VisitListResponse>> {
    auth.require(Role::Buyer)?;
    let visits: Vec<VisitResponse> = state
        .visits
        .visits_for_buyer(&auth.email)
        .await
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(VisitListResponse {
        total: visits.len(),
        visits,
    }))
}

/// PUT /api/v1/visits/:id/status
///
/// The seller owning the window, or an admin. Transitions outside the
/// visit lifecycle are rejected.
pub async fn update_visit_status(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Path(id): Path<Id>,
    Json(req): Json<VisitStatusRequest>,
) -> ApiResult<Json<VisitResponse>> {
    auth.require_any(&[Role::Seller, Role::Admin])?;
    ensure_seller_owns_visit(&state, &auth, id).await?;

    let visit = state.visits.update_visit_status(id, req.status).await?;
    Ok(Json(visit.into()))
}

/// DELETE /api/v1/visits/:id
///
/// The booking buyer, the window's seller, or an admin. The slot returns
/// to the window.
pub async fn cancel_visit(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Path(id): Path<Id>,
) -> ApiResult<Json<VisitResponse>> {
    match auth.role {
        Role::Buyer => {
            let visit = state.visits.visit(id).await?;
            if !visit.buyer_email.eq_ignore_ascii_case(&auth.email) {
                return Err(VisitError::NotOwner.into());
            }
        }
        Role::Seller => ensure_seller_owns_visit(&state, &auth, id).await?,
        Role::Admin => {}
    }

    let visit = state.visits.cancel_visit(id).await?;
    Ok(Json(visit.into()))
}

/// A seller may only touch visits booked against their own windows
async fn ensure_seller_owns_visit(
    state: &Arc<AppState>,
    auth: &AuthUser,
    visit_id: Id,
) -> ApiResult<()> {
    if auth.role != Role::Seller {
        return Ok(());
    }
    let visit = state.visits.visit(visit_id).await?;
    let schedule = state.visits.schedule(visit.schedule_id).await?;
    if schedule.seller_id != auth.id {
        return Err(VisitError::NotOwner.into());
    }
    Ok(())
}
