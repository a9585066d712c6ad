use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::search::SearchRecord;

/// A registered platform user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: u64,
    pub email: String,
    pub username: String,
    pub full_name: Option<String>,
    pub bio: Option<String>,
    pub profile_photo: Option<String>,
    pub is_admin: bool,
    pub joined_date: DateTime<Utc>,
}

/// A single name/value specification line, e.g. "RAM" / "8GB"
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GadgetSpec {
    pub name: String,
    pub value: String,
}

/// A reviewable product
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Gadget {
    pub id: u64,
    pub name: String,
    pub brand: String,
    /// "Smartphones", "Laptops" or "Tablets" in the seeded catalogue
    pub category: String,
    pub description: Option<String>,
    pub price: f64,
    pub release_date: DateTime<Utc>,
    pub image_url: Option<String>,
    #[serde(default)]
    pub specs: Vec<GadgetSpec>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SearchRecord for Gadget {
    fn name(&self) -> &str {
        &self.name
    }

    fn brand(&self) -> &str {
        &self.brand
    }

    fn category(&self) -> &str {
        &self.category
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    Pending,
    #[default]
    Approved,
    Rejected,
}

/// A user's review of a gadget
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Review {
    pub id: u64,
    pub user_id: u64,
    pub gadget_id: u64,
    pub title: String,
    pub content: String,
    /// 1.0 ..= 5.0 stars
    pub rating: f64,
    pub pros: Option<String>,
    pub cons: Option<String>,
    #[serde(default)]
    pub status: ReviewStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub const MIN_RATING: f64 = 1.0;
pub const MAX_RATING: f64 = 5.0;

// ─── Requests ────────────────────────────────────────────

/// Register request (also used by admins, who may set `is_admin`)
#[derive(Debug, Clone, Deserialize)]
pub struct UserCreate {
    pub email: String,
    pub username: String,
    pub full_name: Option<String>,
    pub bio: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
}

/// Profile update; absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserUpdate {
    pub email: Option<String>,
    pub username: Option<String>,
    pub full_name: Option<String>,
    pub bio: Option<String>,
    pub profile_photo: Option<String>,
    /// Honoured only on the admin route
    pub is_admin: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GadgetCreate {
    pub name: String,
    pub brand: String,
    pub category: String,
    pub description: Option<String>,
    pub price: f64,
    pub release_date: DateTime<Utc>,
    pub image_url: Option<String>,
    #[serde(default)]
    pub specs: Vec<GadgetSpec>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GadgetUpdate {
    pub name: Option<String>,
    pub brand: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub release_date: Option<DateTime<Utc>>,
    pub image_url: Option<String>,
    pub specs: Option<Vec<GadgetSpec>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReviewCreate {
    pub gadget_id: u64,
    pub title: String,
    pub content: String,
    pub rating: f64,
    pub pros: Option<String>,
    pub cons: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReviewUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub rating: Option<f64>,
    pub pros: Option<String>,
    pub cons: Option<String>,
    pub status: Option<ReviewStatus>,
}

// ─── Responses ───────────────────────────────────────────

/// Gadget plus its aggregated review stats
#[derive(Debug, Clone, Serialize)]
pub struct GadgetResponse {
    #[serde(flatten)]
    pub gadget: Gadget,
    pub average_rating: f64,
    pub review_count: usize,
}

/// Review as embedded in a gadget detail page
#[derive(Debug, Clone, Serialize)]
pub struct ReviewInGadget {
    #[serde(flatten)]
    pub review: Review,
    pub user_name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GadgetDetail {
    #[serde(flatten)]
    pub gadget: GadgetResponse,
    pub reviews: Vec<ReviewInGadget>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserSummary {
    pub id: u64,
    pub username: String,
    pub full_name: Option<String>,
    pub profile_photo: Option<String>,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            full_name: user.full_name.clone(),
            profile_photo: user.profile_photo.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GadgetSummary {
    pub id: u64,
    pub name: String,
    pub category: String,
    pub brand: String,
}

impl From<&Gadget> for GadgetSummary {
    fn from(gadget: &Gadget) -> Self {
        Self {
            id: gadget.id,
            name: gadget.name.clone(),
            category: gadget.category.clone(),
            brand: gadget.brand.clone(),
        }
    }
}

/// Review with author name and optional author/gadget summaries
#[derive(Debug, Clone, Serialize)]
pub struct ReviewResponse {
    #[serde(flatten)]
    pub review: Review,
    pub user_name: String,
    pub user: Option<UserSummary>,
    pub gadget: Option<GadgetSummary>,
}

/// Review listed on its author's profile
#[derive(Debug, Clone, Serialize)]
pub struct ReviewWithDetails {
    #[serde(flatten)]
    pub review: Review,
    pub user_name: String,
    pub gadget_name: String,
    pub gadget_brand: String,
    pub gadget_category: String,
}

/// One page of the public review listing
#[derive(Debug, Clone, Serialize)]
pub struct ReviewPage {
    pub reviews: Vec<ReviewResponse>,
    pub total: usize,
    pub total_pages: usize,
    pub current_page: usize,
    pub limit: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_users: usize,
    pub total_gadgets: usize,
    pub total_reviews: usize,
    pub pending_reviews: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_review_status_serializes_to_snake_case() {
        let json = serde_json::to_value(ReviewStatus::Pending).unwrap();
        assert_eq!(json, "pending");
    }

    #[test]
    fn test_review_status_defaults_to_approved_when_missing() {
        let json = serde_json::json!({
            "id": 1,
            "user_id": 2,
            "gadget_id": 3,
            "title": "Great",
            "content": "Really great",
            "rating": 5.0,
            "pros": null,
            "cons": null,
            "created_at": "2025-06-01T00:00:00Z",
            "updated_at": "2025-06-01T00:00:00Z"
        });
        let review: Review = serde_json::from_value(json).unwrap();
        assert_eq!(review.status, ReviewStatus::Approved);
    }

    #[test]
    fn test_dashboard_stats_use_camel_case_keys() {
        let stats = DashboardStats {
            total_users: 1,
            total_gadgets: 2,
            total_reviews: 3,
            pending_reviews: 0,
        };
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["totalUsers"], 1);
        assert_eq!(json["pendingReviews"], 0);
    }

    #[test]
    fn test_gadget_response_flattens_gadget_fields() {
        let now = Utc::now();
        let gadget = Gadget {
            id: 9,
            name: "Pixel 8".to_string(),
            brand: "Google".to_string(),
            category: "Smartphones".to_string(),
            description: None,
            price: 699.0,
            release_date: now,
            image_url: None,
            specs: vec![],
            created_at: now,
            updated_at: now,
        };
        let json = serde_json::to_value(GadgetResponse {
            gadget,
            average_rating: 4.5,
            review_count: 2,
        })
        .unwrap();
        assert_eq!(json["id"], 9);
        assert_eq!(json["name"], "Pixel 8");
        assert_eq!(json["review_count"], 2);
    }
}
