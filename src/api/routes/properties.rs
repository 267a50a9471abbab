//! Property Routes
//!
//! Listing endpoints. Search is open; every mutation is seller-only and
//! checked against ownership in the service.
//!
//! - GET /api/v1/properties - Search listings
//! - POST /api/v1/properties - List a property
//! - GET /api/v1/properties/:id - Get a property
//! - PUT /api/v1/properties/:id - Update a property
//! - PUT /api/v1/properties/:id/status - Change publication status
//! - DELETE /api/v1/properties/:id - Remove a property

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::api::dto::{
    PropertyListResponse, PropertyRequest, PropertyResponse, PropertySearchQuery,
    PropertyStatusRequest,
};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::auth::AuthUser;
use crate::listings::{PropertyDraft, PropertyFilter, PropertySort};
use crate::store::{Id, Role};

/// GET /api/v1/properties
pub async fn search_properties(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PropertySearchQuery>,
) -> ApiResult<Json<PropertyListResponse>> {
    let filter = to_filter(query)?;
    let properties: Vec<PropertyResponse> = state
        .listings
        .search(&filter)
        .await
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(PropertyListResponse {
        total: properties.len(),
        properties,
    }))
}

/// GET /api/v1/properties/:id
pub async fn get_property(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Id>,
) -> ApiResult<Json<PropertyResponse>> {
    let property = state.listings.property(id).await?;
    Ok(Json(property.into()))
}

/// POST /api/v1/properties
pub async fn create_property(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Json(req): Json<PropertyRequest>,
) -> ApiResult<(StatusCode, Json<PropertyResponse>)> {
    auth.require(Role::Seller)?;
    let property = state
        .listings
        .create_property(auth.id, to_draft(req))
        .await?;
    Ok((StatusCode::CREATED, Json(property.into())))
}

/// PUT /api/v1/properties/:id
pub async fn update_property(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Path(id): Path<Id>,
    Json(req): Json<PropertyRequest>,
) -> ApiResult<Json<PropertyResponse>> {
    auth.require(Role::Seller)?;
    let property = state
        .listings
        .update_property(auth.id, id, to_draft(req))
        .await?;
    Ok(Json(property.into()))
}

/// PUT /api/v1/properties/:id/status
pub async fn set_property_status(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Path(id): Path<Id>,
    Json(req): Json<PropertyStatusRequest>,
) -> ApiResult<Json<PropertyResponse>> {
    auth.require(Role::Seller)?;
    let property = state.listings.set_status(auth.id, id, req.status).await?;
    Ok(Json(property.into()))
}

/// DELETE /api/v1/properties/:id
pub async fn delete_property(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    Path(id): Path<Id>,
) -> ApiResult<StatusCode> {
    auth.require(Role::Seller)?;
    state.listings.delete_property(auth.id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

fn to_draft(req: PropertyRequest) -> PropertyDraft {
    PropertyDraft {
        name: req.name,
        description: req.description,
        rooms: req.rooms,
        baths: req.baths,
        price: req.price,
        category_id: req.category_id,
        location_id: req.location_id,
    }
}

fn to_filter(query: PropertySearchQuery) -> ApiResult<PropertyFilter> {
    let sort = match query.sort.as_deref() {
        None => None,
        Some(s) => Some(parse_sort(s)?),
    };
    Ok(PropertyFilter {
        category_id: query.category_id,
        location_id: query.location_id,
        seller_id: query.seller_id,
        min_price: query.min_price,
        max_price: query.max_price,
        min_rooms: query.min_rooms,
        status: query.status,
        sort,
    })
}

/// Parse sort order string
fn parse_sort(s: &str) -> ApiResult<PropertySort> {
    match s.to_lowercase().as_str() {
        "price_asc" => Ok(PropertySort::PriceAsc),
        "price_desc" => Ok(PropertySort::PriceDesc),
        "newest" => Ok(PropertySort::Newest),
        _ => Err(ApiError::Validation(format!(
            "Invalid sort: {}. Use price_asc, price_desc, or newest",
            s
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sort() {
        assert!(matches!(parse_sort("price_asc"), Ok(PropertySort::PriceAsc)));
        assert!(matches!(parse_sort("NEWEST"), Ok(PropertySort::Newest)));
        assert!(parse_sort("sideways").is_err());
    }
}
