use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::identity::AdminActor;
use super::{bad_request, gadget_response, not_found, review_response, ApiError, LimitParam, Pagination};
use crate::models::{GadgetCreate, GadgetDetail, GadgetResponse, GadgetUpdate, ReviewInGadget, ReviewResponse, ReviewStatus};
use crate::search::{self, GadgetSearch};
use crate::state::AppState;

/// Query parameters for GET /api/gadgets
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GadgetFilterParams {
    pub category: Option<String>,
    /// Comma-separated brand names
    pub brand: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub min_rating: Option<f64>,
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

/// Query parameters for GET /api/gadgets/search
#[derive(Debug, Clone, Deserialize)]
pub struct SearchParams {
    pub query: String,
    pub category: Option<String>,
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

/// GET /api/gadgets - Filter gadgets by category, brand, price and rating
pub async fn list_gadgets(
    State(state): State<AppState>,
    Query(params): Query<GadgetFilterParams>,
) -> Result<Json<Vec<GadgetResponse>>, ApiError> {
    let window = Pagination {
        skip: params.skip,
        limit: params.limit,
    }
    .window()?;

    let category = params
        .category
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty());
    let brands: Vec<&str> = params
        .brand
        .as_deref()
        .map(|b| b.split(',').map(str::trim).filter(|b| !b.is_empty()).collect())
        .unwrap_or_default();

    let db = state.db.read();
    let matched: Vec<GadgetResponse> = db
        .gadgets
        .iter()
        .filter(|g| category.is_none_or(|c| g.category.eq_ignore_ascii_case(c)))
        .filter(|g| brands.is_empty() || brands.contains(&g.brand.as_str()))
        .filter(|g| params.min_price.is_none_or(|min| g.price >= min))
        .filter(|g| params.max_price.is_none_or(|max| g.price <= max))
        .map(|g| gadget_response(&db, g))
        .filter(|g| params.min_rating.is_none_or(|min| g.average_rating >= min))
        .collect();

    Ok(Json(window.apply(matched)))
}

/// GET /api/gadgets/search - Relevance-ranked free-text search
pub async fn search_gadgets(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<GadgetResponse>>, ApiError> {
    let window = Pagination {
        skip: params.skip,
        limit: params.limit,
    }
    .window()?;

    let search = GadgetSearch {
        query: &params.query,
        category: params.category.as_deref(),
        window,
    };

    let db = state.db.read();
    let ranked = search::search_gadgets(&db.gadgets, &search);
    tracing::debug!(
        query = %params.query,
        category = ?params.category,
        returned = ranked.len(),
        "gadget search"
    );

    Ok(Json(ranked.into_iter().map(|g| gadget_response(&db, g)).collect()))
}

/// GET /api/gadgets/featured - Best-rated gadgets
pub async fn featured_gadgets(
    State(state): State<AppState>,
    Query(params): Query<LimitParam>,
) -> Json<Vec<GadgetResponse>> {
    let limit = params.limit.unwrap_or(state.config.featured_limit);
    let db = state.db.read();
    let mut ranked: Vec<GadgetResponse> = db.gadgets.iter().map(|g| gadget_response(&db, g)).collect();
    // unreviewed gadgets sort after every reviewed one
    ranked.sort_by(|a, b| {
        (b.review_count > 0)
            .cmp(&(a.review_count > 0))
            .then(b.average_rating.total_cmp(&a.average_rating))
            .then(b.review_count.cmp(&a.review_count))
    });
    ranked.truncate(limit);
    Json(ranked)
}

/// GET /api/gadgets/all - Every gadget in id order, up to `limit`
pub async fn all_gadgets(
    State(state): State<AppState>,
    Query(params): Query<LimitParam>,
) -> Json<Vec<GadgetResponse>> {
    let limit = params.limit.unwrap_or(search::ranker::DEFAULT_LIMIT);
    let db = state.db.read();
    Json(
        db.gadgets
            .iter()
            .take(limit)
            .map(|g| gadget_response(&db, g))
            .collect(),
    )
}

/// GET /api/gadgets/{id} - A gadget with its visible reviews, newest first
pub async fn get_gadget(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<GadgetDetail>, ApiError> {
    let db = state.db.read();
    let gadget = db.gadget(id).ok_or_else(|| not_found("Gadget"))?;

    let reviews = db
        .reviews_newest_first(|r| r.gadget_id == id && r.status != ReviewStatus::Rejected)
        .into_iter()
        .map(|r| ReviewInGadget {
            review: r.clone(),
            user_name: db
                .user(r.user_id)
                .map(|u| u.username.clone())
                .unwrap_or_else(|| "Unknown".to_string()),
        })
        .collect();

    Ok(Json(GadgetDetail {
        gadget: gadget_response(&db, gadget),
        reviews,
    }))
}

/// GET /api/gadgets/{id}/reviews - Paginated reviews of one gadget
pub async fn gadget_reviews(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<ReviewResponse>>, ApiError> {
    let window = page.window()?;
    let db = state.db.read();
    if db.gadget(id).is_none() {
        return Err(not_found("Gadget"));
    }
    let reviews = db.reviews_newest_first(|r| r.gadget_id == id && r.status != ReviewStatus::Rejected);
    Ok(Json(
        window
            .apply(reviews)
            .into_iter()
            .map(|r| review_response(&db, r))
            .collect(),
    ))
}

fn validate_gadget_fields(name: &str, brand: &str, category: &str, price: f64) -> Result<(), ApiError> {
    if name.trim().is_empty() || brand.trim().is_empty() || category.trim().is_empty() {
        return Err(bad_request("Name, brand and category are required"));
    }
    if !price.is_finite() || price < 0.0 {
        return Err(bad_request("Price must be a non-negative number"));
    }
    Ok(())
}

/// POST /api/gadgets - Create a gadget with its specs (admin only)
pub async fn create_gadget(
    State(state): State<AppState>,
    AdminActor(admin): AdminActor,
    Json(req): Json<GadgetCreate>,
) -> Result<(StatusCode, Json<GadgetResponse>), ApiError> {
    validate_gadget_fields(&req.name, &req.brand, &req.category, req.price)?;

    let created = {
        let mut db = state.db.write();
        let gadget = db.insert_gadget(req);
        gadget_response(&db, &gadget)
    };
    state.persist();
    tracing::info!("Admin {} created gadget {} ({})", admin.id, created.gadget.id, created.gadget.name);

    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /api/gadgets/{id} - Update a gadget (admin only)
pub async fn update_gadget(
    State(state): State<AppState>,
    _admin: AdminActor,
    Path(id): Path<u64>,
    Json(update): Json<GadgetUpdate>,
) -> Result<Json<GadgetResponse>, ApiError> {
    let updated = {
        let mut db = state.db.write();
        let current = db.gadget(id).ok_or_else(|| not_found("Gadget"))?;
        validate_gadget_fields(
            update.name.as_deref().unwrap_or(&current.name),
            update.brand.as_deref().unwrap_or(&current.brand),
            update.category.as_deref().unwrap_or(&current.category),
            update.price.unwrap_or(current.price),
        )?;
        let gadget = db.update_gadget(id, update).ok_or_else(|| not_found("Gadget"))?;
        gadget_response(&db, &gadget)
    };
    state.persist();
    Ok(Json(updated))
}

/// DELETE /api/gadgets/{id} - Delete a gadget and its reviews (admin only)
pub async fn delete_gadget(
    State(state): State<AppState>,
    AdminActor(admin): AdminActor,
    Path(id): Path<u64>,
) -> Result<Json<GadgetResponse>, ApiError> {
    let removed = {
        let mut db = state.db.write();
        let response = db
            .gadget(id)
            .map(|g| gadget_response(&db, g))
            .ok_or_else(|| not_found("Gadget"))?;
        db.remove_gadget(id);
        response
    };
    state.persist();
    tracing::info!("Admin {} deleted gadget {id}", admin.id);
    Ok(Json(removed))
}
