//! Acting-user extractors.
//!
//! The caller names itself with the `X-User-Id` header; the id is resolved
//! against the store on every request. Credential checks live in front of
//! this service, not in it.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::StatusCode;

use super::{forbidden, ApiError};
use crate::models::User;
use crate::state::AppState;

pub const USER_ID_HEADER: &str = "x-user-id";

/// Any registered user.
#[derive(Debug, Clone)]
pub struct Actor(pub User);

/// A registered user with `is_admin` set.
#[derive(Debug, Clone)]
pub struct AdminActor(pub User);

impl Actor {
    pub fn id(&self) -> u64 {
        self.0.id
    }

    pub fn is_admin(&self) -> bool {
        self.0.is_admin
    }

    /// Owners may touch their own rows; admins may touch anything.
    pub fn can_modify(&self, owner_id: u64) -> bool {
        self.0.id == owner_id || self.0.is_admin
    }
}

impl AdminActor {
    pub fn id(&self) -> u64 {
        self.0.id
    }
}

fn parse_user_id(parts: &Parts) -> Result<u64, ApiError> {
    let raw = parts
        .headers
        .get(USER_ID_HEADER)
        .ok_or_else(|| {
            (
                StatusCode::UNAUTHORIZED,
                format!("Missing {USER_ID_HEADER} header"),
            )
        })?;
    raw.to_str()
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .ok_or_else(|| {
            (
                StatusCode::UNAUTHORIZED,
                format!("Malformed {USER_ID_HEADER} header"),
            )
        })
}

impl FromRequestParts<AppState> for Actor {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let id = parse_user_id(parts)?;
        let user = state
            .db
            .read()
            .user(id)
            .cloned()
            .ok_or_else(|| super::not_found("User"))?;
        Ok(Actor(user))
    }
}

impl FromRequestParts<AppState> for AdminActor {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let Actor(user) = Actor::from_request_parts(parts, state).await?;
        if !user.is_admin {
            tracing::debug!("User {} denied admin access", user.id);
            return Err(forbidden());
        }
        Ok(AdminActor(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with(header: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/api/users/profile");
        if let Some(value) = header {
            builder = builder.header(USER_ID_HEADER, value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[test]
    fn test_parse_user_id() {
        assert_eq!(parse_user_id(&parts_with(Some("42"))).unwrap(), 42);
        assert_eq!(parse_user_id(&parts_with(Some(" 7 "))).unwrap(), 7);
        let err = parse_user_id(&parts_with(None)).unwrap_err();
        assert_eq!(err.0, StatusCode::UNAUTHORIZED);
        let err = parse_user_id(&parts_with(Some("abc"))).unwrap_err();
        assert_eq!(err.0, StatusCode::UNAUTHORIZED);
    }
}
