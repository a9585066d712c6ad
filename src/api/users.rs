use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;

use super::identity::Actor;
use super::{bad_request, not_found, ApiError, Pagination};
use crate::db::Database;
use crate::models::{ReviewWithDetails, User, UserCreate, UserUpdate};
use crate::state::AppState;

/// Reject malformed or already-taken email/username. `except` skips the
/// user being updated.
pub(crate) fn check_identity(
    db: &Database,
    email: Option<&str>,
    username: Option<&str>,
    except: Option<u64>,
) -> Result<(), ApiError> {
    if let Some(email) = email {
        let email = email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(bad_request("A valid email address is required"));
        }
        if db.user_by_email(email).is_some_and(|u| Some(u.id) != except) {
            return Err((
                StatusCode::CONFLICT,
                "User with this email already exists".to_string(),
            ));
        }
    }
    if let Some(username) = username {
        if username.trim().is_empty() {
            return Err(bad_request("Username is required"));
        }
        if db
            .user_by_username(username.trim())
            .is_some_and(|u| Some(u.id) != except)
        {
            return Err((StatusCode::CONFLICT, "Username already taken".to_string()));
        }
    }
    Ok(())
}

fn normalize_identity(mut req: UserCreate) -> UserCreate {
    req.email = req.email.trim().to_string();
    req.username = req.username.trim().to_string();
    req
}

/// POST /api/users - Register a new (non-admin) user
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<UserCreate>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let mut req = normalize_identity(req);
    req.is_admin = false;

    let user = {
        let mut db = state.db.write();
        check_identity(&db, Some(&req.email), Some(&req.username), None)?;
        db.insert_user(req)
    };
    state.persist();
    tracing::info!("Registered user {} ({})", user.id, user.username);

    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /api/users/profile - The acting user's profile
pub async fn get_profile(Actor(user): Actor) -> Json<User> {
    Json(user)
}

/// PUT /api/users/profile - Update the acting user's profile
pub async fn update_profile(
    State(state): State<AppState>,
    actor: Actor,
    Json(mut update): Json<UserUpdate>,
) -> Result<Json<User>, ApiError> {
    update.email = update.email.map(|e| e.trim().to_string());
    update.username = update.username.map(|u| u.trim().to_string());

    let user = {
        let mut db = state.db.write();
        check_identity(
            &db,
            update.email.as_deref(),
            update.username.as_deref(),
            Some(actor.id()),
        )?;
        db.update_user(actor.id(), update, false)
            .ok_or_else(|| not_found("User"))?
    };
    state.persist();
    Ok(Json(user))
}

/// GET /api/users/reviews - The acting user's reviews with gadget details
pub async fn my_reviews(
    State(state): State<AppState>,
    actor: Actor,
    Query(page): Query<Pagination>,
) -> Result<Json<Vec<ReviewWithDetails>>, ApiError> {
    let window = page.window()?;
    let db = state.db.read();
    let mine = db.reviews_newest_first(|r| r.user_id == actor.id());

    Ok(Json(
        window
            .apply(mine)
            .into_iter()
            .filter_map(|review| {
                let gadget = db.gadget(review.gadget_id)?;
                Some(ReviewWithDetails {
                    review: review.clone(),
                    user_name: actor.0.username.clone(),
                    gadget_name: gadget.name.clone(),
                    gadget_brand: gadget.brand.clone(),
                    gadget_category: gadget.category.clone(),
                })
            })
            .collect(),
    ))
}
