//! Category Routes
//!
//! CRUD endpoints for property categories. Writes are admin-only; deletes
//! are soft (the record stays and keeps blocking duplicate names).
//!
//! - GET /api/v1/categories - List categories
//! - POST /api/v1/categories - Create a category
//! - GET /api/v1/categories/:id - Get a category
//! - PUT /api/v1/categories/:id - Update a category
//! - DELETE /api/v1/categories/:id - Deactivate a category

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::api::dto::{CatalogListQuery, CategoryListResponse, CategoryRequest, CategoryResponse};
use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::auth::AuthUser;
use crate::store::{Id, Role};

/// GET /api/v1/categories
pub async fn list_categories(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CatalogListQuery>,
) -> ApiResult<Json<CategoryListResponse>> {
    let categories: Vec<CategoryResponse> = state
        .catalog
        .list_categories(query.include_inactive)
        .await
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(CategoryListResponse {
        total: categories.len(),
        categories,
    }))
}

/// GET /api/v1/categories/:id
pub async fn get_category(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Id>,
) -> ApiResult<Json<CategoryResponse>> {
    let category = state.catalog.category(id).await?;
    Ok(Json(category.into()))
}

/// POST /api/v1/categories
pub async fn create_category(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Json(req): Json<CategoryRequest>,
) -> ApiResult<(StatusCode, Json<CategoryResponse>)> {
    auth.require(Role::Admin)?;
    let category = state
        .catalog
        .create_category(&req.name, &req.description)
        .await?;
    Ok((StatusCode::CREATED, Json(category.into())))
}

/// PUT /api/v1/categories/:id
pub async fn update_category(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Path(id): Path<Id>,
    Json(req): Json<CategoryRequest>,
) -> ApiResult<Json<CategoryResponse>> {
    auth.require(Role::Admin)?;
    let category = state
        .catalog
        .update_category(id, &req.name, &req.description)
        .await?;
    Ok(Json(category.into()))
}

/// DELETE /api/v1/categories/:id
pub async fn delete_category(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Path(id): Path<Id>,
) -> ApiResult<StatusCode> {
    auth.require(Role::Admin)?;
    state.catalog.deactivate_category(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
