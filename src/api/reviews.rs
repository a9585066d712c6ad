use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::identity::Actor;
use super::{bad_request, forbidden, not_found, review_response, ApiError, LimitParam};
use crate::db::Database;
use crate::listing::{self, ReviewFilter, ReviewRow};
use crate::models::{
    ReviewCreate, ReviewPage, ReviewResponse, ReviewStatus, ReviewUpdate, MAX_RATING, MIN_RATING,
};
use crate::state::AppState;

const DEFAULT_RECENT_LIMIT: usize = 10;

/// Query parameters for GET /api/reviews
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReviewListParams {
    pub search: Option<String>,
    pub category: Option<String>,
    /// Minimum rating; 0 disables the filter
    pub rating: Option<i64>,
    pub sort: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

pub(crate) fn validate_rating(rating: f64) -> Result<(), ApiError> {
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(bad_request(format!(
            "Rating must be between {MIN_RATING} and {MAX_RATING}"
        )));
    }
    Ok(())
}

pub(crate) fn validate_text(field: &str, value: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(bad_request(format!("{field} is required")));
    }
    Ok(())
}

/// Joined rows for every review whose author and gadget still exist.
pub(crate) fn visible_rows(db: &Database) -> Vec<ReviewRow<'_>> {
    db.reviews
        .iter()
        .filter(|r| r.status != ReviewStatus::Rejected)
        .filter_map(|review| {
            Some(ReviewRow {
                review,
                author: db.user(review.user_id)?,
                gadget: db.gadget(review.gadget_id)?,
            })
        })
        .collect()
}

/// GET /api/reviews - Filtered, sorted and paginated review listing
pub async fn list_reviews(
    State(state): State<AppState>,
    Query(params): Query<ReviewListParams>,
) -> Result<Json<ReviewPage>, ApiError> {
    let filter = ReviewFilter::new(
        params.search,
        params.category,
        params.rating,
        params.sort.as_deref(),
        params.page,
        params.limit,
    )
    .map_err(bad_request)?;

    let db = state.db.read();
    let page = listing::list_reviews(visible_rows(&db), &filter);

    Ok(Json(ReviewPage {
        reviews: page
            .items
            .iter()
            .map(|row| review_response(&db, row.review))
            .collect(),
        total: page.total,
        total_pages: page.total_pages,
        current_page: page.current_page,
        limit: page.limit,
    }))
}

/// GET /api/reviews/recent - Newest visible reviews
pub async fn recent_reviews(
    State(state): State<AppState>,
    Query(params): Query<LimitParam>,
) -> Json<Vec<ReviewResponse>> {
    let limit = params.limit.unwrap_or(DEFAULT_RECENT_LIMIT);
    let db = state.db.read();
    Json(
        db.reviews_newest_first(|r| r.status != ReviewStatus::Rejected)
            .into_iter()
            .take(limit)
            .map(|r| review_response(&db, r))
            .collect(),
    )
}

/// POST /api/reviews - Review a gadget as the acting user
pub async fn create_review(
    State(state): State<AppState>,
    actor: Actor,
    Json(req): Json<ReviewCreate>,
) -> Result<(StatusCode, Json<ReviewResponse>), ApiError> {
    validate_text("Title", &req.title)?;
    validate_text("Content", &req.content)?;
    validate_rating(req.rating)?;

    let created = {
        let mut db = state.db.write();
        if db.gadget(req.gadget_id).is_none() {
            return Err(not_found("Gadget"));
        }
        let review = db.insert_review(actor.id(), req);
        review_response(&db, &review)
    };
    state.persist();
    tracing::info!(
        "User {} reviewed gadget {} (review {})",
        actor.id(),
        created.review.gadget_id,
        created.review.id
    );

    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /api/reviews/{id} - Edit a review (owner or admin; status is admin-only)
pub async fn update_review(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<u64>,
    Json(update): Json<ReviewUpdate>,
) -> Result<Json<ReviewResponse>, ApiError> {
    if let Some(rating) = update.rating {
        validate_rating(rating)?;
    }
    if let Some(title) = &update.title {
        validate_text("Title", title)?;
    }
    if let Some(content) = &update.content {
        validate_text("Content", content)?;
    }
    if update.status.is_some() && !actor.is_admin() {
        return Err(forbidden());
    }

    let updated = {
        let mut db = state.db.write();
        let owner = db.review(id).ok_or_else(|| not_found("Review"))?.user_id;
        if !actor.can_modify(owner) {
            return Err(forbidden());
        }
        let review = db.update_review(id, update).ok_or_else(|| not_found("Review"))?;
        review_response(&db, &review)
    };
    state.persist();
    Ok(Json(updated))
}

/// DELETE /api/reviews/{id} - Delete a review (owner or admin)
pub async fn delete_review(
    State(state): State<AppState>,
    actor: Actor,
    Path(id): Path<u64>,
) -> Result<Json<ReviewResponse>, ApiError> {
    let removed = {
        let mut db = state.db.write();
        let review = db.review(id).ok_or_else(|| not_found("Review"))?;
        if !actor.can_modify(review.user_id) {
            return Err(forbidden());
        }
        let response = review_response(&db, review);
        db.remove_review(id);
        response
    };
    state.persist();
    Ok(Json(removed))
}
