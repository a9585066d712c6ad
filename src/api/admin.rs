//! Admin-only management endpoints. Every handler takes an [`AdminActor`].

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use super::identity::AdminActor;
use super::reviews::{validate_rating, validate_text};
use super::users::check_identity;
use super::{bad_request, gadget_response, not_found, review_response, ApiError, Pagination};
use crate::models::{
    DashboardStats, GadgetResponse, MessageResponse, ReviewResponse, ReviewStatus, ReviewUpdate,
    User, UserCreate, UserUpdate,
};
use crate::state::AppState;

// ─── Users ───────────────────────────────────────────────

/// GET /api/admin/users
pub async fn list_users(
    State(state): State<AppState>,
    _admin: AdminActor,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<User>>, ApiError> {
    let window = page.window()?;
    let db = state.db.read();
    Ok(Json(window.apply(db.users.clone())))
}

/// GET /api/admin/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    _admin: AdminActor,
    Path(id): Path<u64>,
) -> Result<Json<User>, ApiError> {
    let db = state.db.read();
    db.user(id)
        .cloned()
        .map(Json)
        .ok_or_else(|| not_found("User"))
}

/// POST /api/admin/users - Create a user, optionally an admin
pub async fn create_user(
    State(state): State<AppState>,
    AdminActor(admin): AdminActor,
    Json(mut req): Json<UserCreate>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    req.email = req.email.trim().to_string();
    req.username = req.username.trim().to_string();

    let user = {
        let mut db = state.db.write();
        check_identity(&db, Some(&req.email), Some(&req.username), None)?;
        db.insert_user(req)
    };
    state.persist();
    tracing::info!(
        "Admin {} created user {} (admin: {})",
        admin.id,
        user.id,
        user.is_admin
    );

    Ok((StatusCode::CREATED, Json(user)))
}

/// PUT /api/admin/users/{id} - Update any user; admins cannot change their own admin flag
pub async fn update_user(
    State(state): State<AppState>,
    admin: AdminActor,
    Path(id): Path<u64>,
    Json(mut update): Json<UserUpdate>,
) -> Result<Json<User>, ApiError> {
    if id == admin.id() && update.is_admin == Some(false) {
        return Err(bad_request("Cannot remove your own admin privileges"));
    }
    update.email = update.email.map(|e| e.trim().to_string());
    update.username = update.username.map(|u| u.trim().to_string());

    let user = {
        let mut db = state.db.write();
        if db.user(id).is_none() {
            return Err(not_found("User"));
        }
        check_identity(
            &db,
            update.email.as_deref(),
            update.username.as_deref(),
            Some(id),
        )?;
        db.update_user(id, update, true)
            .ok_or_else(|| not_found("User"))?
    };
    state.persist();
    Ok(Json(user))
}

/// DELETE /api/admin/users/{id} - Delete a user and their reviews
pub async fn delete_user(
    State(state): State<AppState>,
    admin: AdminActor,
    Path(id): Path<u64>,
) -> Result<Json<MessageResponse>, ApiError> {
    if id == admin.id() {
        return Err(bad_request("Cannot delete your own account"));
    }
    let removed = state
        .db
        .write()
        .remove_user(id)
        .ok_or_else(|| not_found("User"))?;
    state.persist();
    tracing::info!("Admin {} deleted user {} ({})", admin.id(), removed.id, removed.username);

    Ok(Json(MessageResponse::new("User deleted successfully")))
}

// ─── Reviews ─────────────────────────────────────────────

/// GET /api/admin/reviews - Every review regardless of status, newest first
pub async fn list_reviews(
    State(state): State<AppState>,
    _admin: AdminActor,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<ReviewResponse>>, ApiError> {
    let window = page.window()?;
    let db = state.db.read();
    let all = db.reviews_newest_first(|_| true);
    Ok(Json(
        window
            .apply(all)
            .into_iter()
            .map(|r| review_response(&db, r))
            .collect(),
    ))
}

/// GET /api/admin/reviews/{id}
pub async fn get_review(
    State(state): State<AppState>,
    _admin: AdminActor,
    Path(id): Path<u64>,
) -> Result<Json<ReviewResponse>, ApiError> {
    let db = state.db.read();
    let review = db.review(id).ok_or_else(|| not_found("Review"))?;
    Ok(Json(review_response(&db, review)))
}

/// PUT /api/admin/reviews/{id} - Edit any review, including its status
pub async fn update_review(
    State(state): State<AppState>,
    _admin: AdminActor,
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

    let updated = {
        let mut db = state.db.write();
        let review = db.update_review(id, update).ok_or_else(|| not_found("Review"))?;
        review_response(&db, &review)
    };
    state.persist();
    Ok(Json(updated))
}

/// DELETE /api/admin/reviews/{id}
pub async fn delete_review(
    State(state): State<AppState>,
    AdminActor(admin): AdminActor,
    Path(id): Path<u64>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .db
        .write()
        .remove_review(id)
        .ok_or_else(|| not_found("Review"))?;
    state.persist();
    tracing::info!("Admin {} deleted review {id}", admin.id);

    Ok(Json(MessageResponse::new("Review deleted successfully")))
}

fn moderate(state: &AppState, id: u64, status: ReviewStatus) -> Result<ReviewResponse, ApiError> {
    let moderated = {
        let mut db = state.db.write();
        let review = db
            .set_review_status(id, status)
            .ok_or_else(|| not_found("Review"))?;
        review_response(&db, &review)
    };
    state.persist();
    tracing::info!("Review {id} marked {status:?}");
    Ok(moderated)
}

/// PUT /api/admin/reviews/{id}/approve
pub async fn approve_review(
    State(state): State<AppState>,
    _admin: AdminActor,
    Path(id): Path<u64>,
) -> Result<Json<ReviewResponse>, ApiError> {
    moderate(&state, id, ReviewStatus::Approved).map(Json)
}

/// PUT /api/admin/reviews/{id}/reject - Hide a review from public listings
pub async fn reject_review(
    State(state): State<AppState>,
    _admin: AdminActor,
    Path(id): Path<u64>,
) -> Result<Json<ReviewResponse>, ApiError> {
    moderate(&state, id, ReviewStatus::Rejected).map(Json)
}

// ─── Gadgets ─────────────────────────────────────────────

/// GET /api/admin/gadgets - Every gadget in id order
pub async fn list_gadgets(
    State(state): State<AppState>,
    _admin: AdminActor,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<GadgetResponse>>, ApiError> {
    let window = page.window()?;
    let db = state.db.read();
    let all: Vec<GadgetResponse> = db.gadgets.iter().map(|g| gadget_response(&db, g)).collect();
    Ok(Json(window.apply(all)))
}

/// DELETE /api/admin/gadgets/{id} - Delete a gadget and its reviews
pub async fn delete_gadget(
    State(state): State<AppState>,
    AdminActor(admin): AdminActor,
    Path(id): Path<u64>,
) -> Result<Json<MessageResponse>, ApiError> {
    let removed = state
        .db
        .write()
        .remove_gadget(id)
        .ok_or_else(|| not_found("Gadget"))?;
    state.persist();
    tracing::info!("Admin {} deleted gadget {} ({})", admin.id, removed.id, removed.name);

    Ok(Json(MessageResponse::new("Gadget deleted successfully")))
}

/// GET /api/admin/dashboard/stats
pub async fn dashboard_stats(
    State(state): State<AppState>,
    _admin: AdminActor,
) -> Json<DashboardStats> {
    let stats = state.db.read().stats();
    Json(stats)
}
