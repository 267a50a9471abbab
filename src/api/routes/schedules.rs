//! Visit Schedule Routes
//!
//! Windows a seller opens for visits. The list endpoint only ever returns
//! open windows (future, with remaining slots); the filtering happens once,
//! in the visit service.
//!
//! - GET /api/v1/visit-schedules - Available windows, with filters
//! - POST /api/v1/visit-schedules - Publish a window
//! - GET /api/v1/visit-schedules/mine - The seller's own windows
//! - GET /api/v1/visit-schedules/:id - Get a window
//! - GET /api/v1/visit-schedules/:id/visits - Bookings against a window

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::api::dto::{
    CreateScheduleRequest, ScheduleListResponse, ScheduleResponse, ScheduleSearchQuery,
    VisitListResponse, VisitResponse,
};
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::auth::AuthUser;
use crate::store::{Id, Role};
use crate::visits::{ScheduleFilter, VisitError};

/// GET /api/v1/visit-schedules
pub async fn available_schedules(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ScheduleSearchQuery>,
) -> ApiResult<Json<ScheduleListResponse>> {
    let filter = ScheduleFilter {
        from: query.from,
        to: query.to,
        location_id: query.location_id,
        seller_id: query.seller_id,
    };
    let schedules: Vec<ScheduleResponse> = state
        .visits
        .available_schedules(&filter)
        .await
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(ScheduleListResponse {
        total: schedules.len(),
        schedules,
    }))
}

/// POST /api/v1/visit-schedules
pub async fn create_schedule(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Json(req): Json<CreateScheduleRequest>,
) -> ApiResult<(StatusCode, Json<ScheduleResponse>)> {
    auth.require(Role::Seller)?;
    let schedule = state
        .visits
        .create_schedule(auth.id, req.property_id, req.start, req.end, req.slots)
        .await?;
    Ok((StatusCode::CREATED, Json(schedule.into())))
}

/// GET /api/v1/visit-schedules/mine
pub async fn my_schedules(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
) -> ApiResult<Json<ScheduleListResponse>> {
    auth.require(Role::Seller)?;
    let schedules: Vec<ScheduleResponse> = state
        .visits
        .schedules_for_seller(auth.id)
        .await
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(ScheduleListResponse {
        total: schedules.len(),
        schedules,
    }))
}

/// GET /api/v1/visit-schedules/:id
pub async fn get_schedule(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Id>,
) -> ApiResult<Json<ScheduleResponse>> {
    let schedule = state.visits.schedule(id).await?;
    Ok(Json(schedule.into()))
}

/// GET /api/v1/visit-schedules/:id/visits
///
/// The window's seller or an admin.
pub async fn schedule_visits(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Path(id): Path<Id>,
) -> ApiResult<Json<VisitListResponse>> {
    auth.require_any(&[Role::Seller, Role::Admin])?;

    let schedule = state.visits.schedule(id).await?;
    if auth.role == Role::Seller && schedule.seller_id != auth.id {
        return Err(VisitError::NotOwner.into());
    }

    let visits: Vec<VisitResponse> = state
        .visits
        .visits_for_schedule(id)
        .await
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(VisitListResponse {
        total: visits.len(),
        visits,
    }))
}
