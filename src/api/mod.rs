//! Axum HTTP handlers and the router that mounts them under `/api`.

pub mod admin;
pub mod gadgets;
pub mod identity;
pub mod reviews;
pub mod users;

use axum::http::StatusCode;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::Deserialize;

use crate::db::Database;
use crate::models::{Gadget, GadgetResponse, HealthResponse, Review, ReviewResponse};
use crate::search::PageWindow;
use crate::state::AppState;

/// Error half of every handler result.
pub type ApiError = (StatusCode, String);

pub(crate) fn bad_request(msg: impl Into<String>) -> ApiError {
    (StatusCode::BAD_REQUEST, msg.into())
}

pub(crate) fn not_found(what: &str) -> ApiError {
    (StatusCode::NOT_FOUND, format!("{what} not found"))
}

pub(crate) fn forbidden() -> ApiError {
    (StatusCode::FORBIDDEN, "Not enough permissions".to_string())
}

/// `skip`/`limit` query parameters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Pagination {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

impl Pagination {
    pub fn window(&self) -> Result<PageWindow, ApiError> {
        PageWindow::from_params(self.skip, self.limit).map_err(bad_request)
    }
}

/// A lone `limit` query parameter.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LimitParam {
    pub limit: Option<usize>,
}

pub(crate) fn gadget_response(db: &Database, gadget: &Gadget) -> GadgetResponse {
    let stats = db.rating_stats(gadget.id);
    GadgetResponse {
        gadget: gadget.clone(),
        average_rating: stats.average_or_zero(),
        review_count: stats.count,
    }
}

pub(crate) fn review_response(db: &Database, review: &Review) -> ReviewResponse {
    let author = db.user(review.user_id);
    ReviewResponse {
        review: review.clone(),
        user_name: author
            .map(|u| u.username.clone())
            .unwrap_or_else(|| "Unknown".to_string()),
        user: author.map(Into::into),
        gadget: db.gadget(review.gadget_id).map(Into::into),
    }
}

/// GET / - Liveness probe
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "API is running",
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health))
        // Users
        .route("/api/users", post(users::register))
        .route(
            "/api/users/profile",
            get(users::get_profile).put(users::update_profile),
        )
        .route("/api/users/reviews", get(users::my_reviews))
        // Gadgets
        .route(
            "/api/gadgets",
            get(gadgets::list_gadgets).post(gadgets::create_gadget),
        )
        .route("/api/gadgets/search", get(gadgets::search_gadgets))
        .route("/api/gadgets/featured", get(gadgets::featured_gadgets))
        .route("/api/gadgets/all", get(gadgets::all_gadgets))
        .route(
            "/api/gadgets/{id}",
            get(gadgets::get_gadget)
                .put(gadgets::update_gadget)
                .delete(gadgets::delete_gadget),
        )
        .route("/api/gadgets/{id}/reviews", get(gadgets::gadget_reviews))
        // Reviews
        .route(
            "/api/reviews",
            get(reviews::list_reviews).post(reviews::create_review),
        )
        .route("/api/reviews/recent", get(reviews::recent_reviews))
        .route(
            "/api/reviews/{id}",
            put(reviews::update_review).delete(reviews::delete_review),
        )
        // Admin
        .route(
            "/api/admin/users",
            get(admin::list_users).post(admin::create_user),
        )
        .route(
            "/api/admin/users/{id}",
            get(admin::get_user)
                .put(admin::update_user)
                .delete(admin::delete_user),
        )
        .route("/api/admin/reviews", get(admin::list_reviews))
        .route(
            "/api/admin/reviews/{id}",
            get(admin::get_review)
                .put(admin::update_review)
                .delete(admin::delete_review),
        )
        .route("/api/admin/reviews/{id}/approve", put(admin::approve_review))
        .route("/api/admin/reviews/{id}/reject", put(admin::reject_review))
        .route(
            "/api/admin/gadgets",
            get(admin::list_gadgets).post(gadgets::create_gadget),
        )
        .route(
            "/api/admin/gadgets/{id}",
            put(gadgets::update_gadget).delete(admin::delete_gadget),
        )
        .route("/api/admin/dashboard/stats", get(admin::dashboard_stats))
        .with_state(state)
}
