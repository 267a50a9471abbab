//! Location Routes
//!
//! CRUD endpoints for city/department locations, mirroring the category
//! surface. Writes are admin-only and deletes are soft.
//!
//! - GET /api/v1/locations - List locations
//! - POST /api/v1/locations - Create a location
//! - GET /api/v1/locations/:id - Get a location
//! - PUT /api/v1/locations/:id - Update a location
//! - DELETE /api/v1/locations/:id - Deactivate a location

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::api::dto::{CatalogListQuery, LocationListResponse, LocationRequest, LocationResponse};
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::auth::AuthUser;
use crate::store::{Id, Role};

/// GET /api/v1/locations
pub async fn list_locations(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CatalogListQuery>,
) -> ApiResult<Json<LocationListResponse>> {
    let locations: Vec<LocationResponse> = state
        .catalog
        .list_locations(query.include_inactive)
        .await
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(LocationListResponse {
        total: locations.len(),
        locations,
    }))
}

/// GET /api/v1/locations/:id
pub async fn get_location(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Id>,
) -> ApiResult<Json<LocationResponse>> {
    let location = state.catalog.location(id).await?;
    Ok(Json(location.into()))
}

/// POST /api/v1/locations
pub async fn create_location(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Json(req): Json<LocationRequest>,
) -> ApiResult<(StatusCode, Json<LocationResponse>)> {
    auth.require(Role::Admin)?;
    let location = state
        .catalog
        .create_location(
            &req.city,
            &req.city_description,
            &req.department,
            &req.department_description,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(location.into())))
}

/// PUT /api/v1/locations/:id
pub async fn update_location(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Path(id): Path<Id>,
    Json(req): Json<LocationRequest>,
) -> ApiResult<Json<LocationResponse>> {
    auth.require(Role::Admin)?;
    let location = state
        .catalog
        .update_location(
            id,
            &req.city,
            &req.city_description,
            &req.department,
            &req.department_description,
        )
        .await?;
    Ok(Json(location.into()))
}

/// DELETE /api/v1/locations/:id
pub async fn delete_location(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Path(id): Path<Id>,
) -> ApiResult<StatusCode> {
    auth.require(Role::Admin)?;
    state.catalog.deactivate_location(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
