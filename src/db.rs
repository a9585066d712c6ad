//! In-memory relational store for users, gadgets and reviews.
//!
//! Every table is a `Vec` kept in primary-key order, which is the retrieval
//! order callers (and the search ranker) rely on for deterministic output.
//! The whole struct serializes to the JSON data file.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::models::{
    DashboardStats, Gadget, GadgetCreate, GadgetUpdate, Review, ReviewCreate, ReviewStatus,
    ReviewUpdate, User, UserCreate, UserUpdate,
};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Database {
    pub users: Vec<User>,
    pub gadgets: Vec<Gadget>,
    pub reviews: Vec<Review>,
    next_user_id: u64,
    next_gadget_id: u64,
    next_review_id: u64,
}

/// Average rating and review count for one gadget
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RatingStats {
    /// `None` when the gadget has no reviews
    pub average: Option<f64>,
    pub count: usize,
}

impl RatingStats {
    pub fn average_or_zero(&self) -> f64 {
        self.average.unwrap_or(0.0)
    }
}

fn next_id(counter: &mut u64) -> u64 {
    *counter += 1;
    *counter
}

impl Database {
    pub fn is_empty(&self) -> bool {
        self.users.is_empty() && self.gadgets.is_empty() && self.reviews.is_empty()
    }

    // ─── Users ───────────────────────────────────────────

    pub fn user(&self, id: u64) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn user_by_email(&self, email: &str) -> Option<&User> {
        self.users.iter().find(|u| u.email.eq_ignore_ascii_case(email))
    }

    pub fn user_by_username(&self, username: &str) -> Option<&User> {
        self.users.iter().find(|u| u.username == username)
    }

    pub fn insert_user(&mut self, req: UserCreate) -> User {
        let user = User {
            id: next_id(&mut self.next_user_id),
            email: req.email,
            username: req.username,
            full_name: req.full_name,
            bio: req.bio,
            profile_photo: None,
            is_admin: req.is_admin,
            joined_date: Utc::now(),
        };
        self.users.push(user.clone());
        user
    }

    /// Apply `update` to a user. `is_admin` is applied only when `allow_admin_flag`.
    pub fn update_user(&mut self, id: u64, update: UserUpdate, allow_admin_flag: bool) -> Option<User> {
        let user = self.users.iter_mut().find(|u| u.id == id)?;
        if let Some(email) = update.email {
            user.email = email;
        }
        if let Some(username) = update.username {
            user.username = username;
        }
        if let Some(full_name) = update.full_name {
            user.full_name = Some(full_name);
        }
        if let Some(bio) = update.bio {
            user.bio = Some(bio);
        }
        if let Some(photo) = update.profile_photo {
            user.profile_photo = Some(photo);
        }
        if allow_admin_flag {
            if let Some(is_admin) = update.is_admin {
                user.is_admin = is_admin;
            }
        }
        Some(user.clone())
    }

    /// Remove a user together with the reviews they wrote.
    pub fn remove_user(&mut self, id: u64) -> Option<User> {
        let idx = self.users.iter().position(|u| u.id == id)?;
        self.reviews.retain(|r| r.user_id != id);
        Some(self.users.remove(idx))
    }

    // ─── Gadgets ─────────────────────────────────────────

    pub fn gadget(&self, id: u64) -> Option<&Gadget> {
        self.gadgets.iter().find(|g| g.id == id)
    }

    pub fn insert_gadget(&mut self, req: GadgetCreate) -> Gadget {
        let now = Utc::now();
        let gadget = Gadget {
            id: next_id(&mut self.next_gadget_id),
            name: req.name,
            brand: req.brand,
            category: req.category,
            description: req.description,
            price: req.price,
            release_date: req.release_date,
            image_url: req.image_url,
            specs: req.specs,
            created_at: now,
            updated_at: now,
        };
        self.gadgets.push(gadget.clone());
        gadget
    }

    pub fn update_gadget(&mut self, id: u64, update: GadgetUpdate) -> Option<Gadget> {
        let gadget = self.gadgets.iter_mut().find(|g| g.id == id)?;
        if let Some(name) = update.name {
            gadget.name = name;
        }
        if let Some(brand) = update.brand {
            gadget.brand = brand;
        }
        if let Some(category) = update.category {
            gadget.category = category;
        }
        if let Some(description) = update.description {
            gadget.description = Some(description);
        }
        if let Some(price) = update.price {
            gadget.price = price;
        }
        if let Some(release_date) = update.release_date {
            gadget.release_date = release_date;
        }
        if let Some(image_url) = update.image_url {
            gadget.image_url = Some(image_url);
        }
        if let Some(specs) = update.specs {
            gadget.specs = specs;
        }
        gadget.updated_at = Utc::now();
        Some(gadget.clone())
    }

    /// Remove a gadget and cascade to its reviews.
    pub fn remove_gadget(&mut self, id: u64) -> Option<Gadget> {
        let idx = self.gadgets.iter().position(|g| g.id == id)?;
        self.reviews.retain(|r| r.gadget_id != id);
        Some(self.gadgets.remove(idx))
    }

    /// Rating stats over all of a gadget's reviews except rejected ones.
    pub fn rating_stats(&self, gadget_id: u64) -> RatingStats {
        let (sum, count) = self
            .reviews
            .iter()
            .filter(|r| r.gadget_id == gadget_id && r.status != ReviewStatus::Rejected)
            .fold((0.0, 0usize), |(sum, count), r| (sum + r.rating, count + 1));
        RatingStats {
            average: (count > 0).then(|| sum / count as f64),
            count,
        }
    }

    // ─── Reviews ─────────────────────────────────────────

    pub fn review(&self, id: u64) -> Option<&Review> {
        self.reviews.iter().find(|r| r.id == id)
    }

    pub fn insert_review(&mut self, user_id: u64, req: ReviewCreate) -> Review {
        let now = Utc::now();
        let review = Review {
            id: next_id(&mut self.next_review_id),
            user_id,
            gadget_id: req.gadget_id,
            title: req.title,
            content: req.content,
            rating: req.rating,
            pros: req.pros,
            cons: req.cons,
            status: ReviewStatus::Approved,
            created_at: now,
            updated_at: now,
        };
        self.reviews.push(review.clone());
        review
    }

    pub fn update_review(&mut self, id: u64, update: ReviewUpdate) -> Option<Review> {
        let review = self.reviews.iter_mut().find(|r| r.id == id)?;
        if let Some(title) = update.title {
            review.title = title;
        }
        if let Some(content) = update.content {
            review.content = content;
        }
        if let Some(rating) = update.rating {
            review.rating = rating;
        }
        if let Some(pros) = update.pros {
            review.pros = Some(pros);
        }
        if let Some(cons) = update.cons {
            review.cons = Some(cons);
        }
        if let Some(status) = update.status {
            review.status = status;
        }
        review.updated_at = Utc::now();
        Some(review.clone())
    }

    pub fn set_review_status(&mut self, id: u64, status: ReviewStatus) -> Option<Review> {
        self.update_review(
            id,
            ReviewUpdate {
                status: Some(status),
                ..Default::default()
            },
        )
    }

    pub fn remove_review(&mut self, id: u64) -> Option<Review> {
        let idx = self.reviews.iter().position(|r| r.id == id)?;
        Some(self.reviews.remove(idx))
    }

    /// Reviews matching `pred`, newest first (ties newest id first).
    pub fn reviews_newest_first<F>(&self, pred: F) -> Vec<&Review>
    where
        F: Fn(&Review) -> bool,
    {
        let mut found: Vec<&Review> = self.reviews.iter().filter(|r| pred(r)).collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        found
    }

    pub fn stats(&self) -> DashboardStats {
        DashboardStats {
            total_users: self.users.len(),
            total_gadgets: self.gadgets.len(),
            total_reviews: self.reviews.len(),
            pending_reviews: self
                .reviews
                .iter()
                .filter(|r| r.status == ReviewStatus::Pending)
                .count(),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn test_ids_are_sequential_per_table() {
        let mut db = Database::default();
        let u1 = db.insert_user(user_req("alice"));
        let u2 = db.insert_user(user_req("bob"));
        let g1 = db.insert_gadget(gadget_req("Pixel 8", "Google", "Smartphones"));
        assert_eq!((u1.id, u2.id, g1.id), (1, 2, 1));
    }

    #[test]
    fn test_ids_not_reused_after_delete() {
        let mut db = Database::default();
        let g1 = db.insert_gadget(gadget_req("A", "X", "Tablets"));
        db.remove_gadget(g1.id);
        let g2 = db.insert_gadget(gadget_req("B", "X", "Tablets"));
        assert_eq!(g2.id, 2);
    }

    #[test]
    fn test_remove_gadget_cascades_reviews() {
        let mut db = Database::default();
        let u = db.insert_user(user_req("alice"));
        let keep = db.insert_gadget(gadget_req("Keep", "X", "Tablets"));
        let gone = db.insert_gadget(gadget_req("Gone", "X", "Tablets"));
        db.insert_review(u.id, review_req(keep.id, "fine", 4.0));
        db.insert_review(u.id, review_req(gone.id, "meh", 2.0));

        db.remove_gadget(gone.id);
        assert_eq!(db.reviews.len(), 1);
        assert_eq!(db.reviews[0].gadget_id, keep.id);
    }

    #[test]
    fn test_remove_user_drops_their_reviews() {
        let mut db = Database::default();
        let alice = db.insert_user(user_req("alice"));
        let bob = db.insert_user(user_req("bob"));
        let g = db.insert_gadget(gadget_req("Pixel", "Google", "Smartphones"));
        db.insert_review(alice.id, review_req(g.id, "a", 5.0));
        db.insert_review(bob.id, review_req(g.id, "b", 3.0));

        assert!(db.remove_user(alice.id).is_some());
        assert!(db.user(alice.id).is_none());
        assert!(db.reviews.iter().all(|r| r.user_id == bob.id));
    }

    #[test]
    fn test_rating_stats_ignore_rejected() {
        let mut db = Database::default();
        let u = db.insert_user(user_req("alice"));
        let g = db.insert_gadget(gadget_req("Pixel", "Google", "Smartphones"));
        assert_eq!(db.rating_stats(g.id), RatingStats { average: None, count: 0 });

        db.insert_review(u.id, review_req(g.id, "a", 5.0));
        db.insert_review(u.id, review_req(g.id, "b", 3.0));
        let spam = db.insert_review(u.id, review_req(g.id, "spam", 1.0));
        db.set_review_status(spam.id, ReviewStatus::Rejected);

        let stats = db.rating_stats(g.id);
        assert_eq!(stats.count, 2);
        assert_eq!(stats.average, Some(4.0));
    }

    #[test]
    fn test_update_user_admin_flag_requires_permission() {
        let mut db = Database::default();
        let u = db.insert_user(user_req("alice"));
        let update = UserUpdate {
            is_admin: Some(true),
            bio: Some("hi".to_string()),
            ..Default::default()
        };
        let updated = db.update_user(u.id, update.clone(), false).unwrap();
        assert!(!updated.is_admin);
        assert_eq!(updated.bio.as_deref(), Some("hi"));
        assert!(db.update_user(u.id, update, true).unwrap().is_admin);
    }

    #[test]
    fn test_reviews_newest_first() {
        let mut db = Database::default();
        let u = db.insert_user(user_req("alice"));
        let g = db.insert_gadget(gadget_req("Pixel", "Google", "Smartphones"));
        let old = aged_review(&mut db, u.id, review_req(g.id, "old", 3.0), 60);
        let new = aged_review(&mut db, u.id, review_req(g.id, "new", 4.0), 1);
        let ids: Vec<u64> = db
            .reviews_newest_first(|r| r.gadget_id == g.id)
            .iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec![new, old]);
    }

    #[test]
    fn test_stats_count_pending() {
        let mut db = Database::default();
        let u = db.insert_user(user_req("alice"));
        let g = db.insert_gadget(gadget_req("Pixel", "Google", "Smartphones"));
        let r = db.insert_review(u.id, review_req(g.id, "a", 5.0));
        db.set_review_status(r.id, ReviewStatus::Pending);
        let stats = db.stats();
        assert_eq!(stats.total_users, 1);
        assert_eq!(stats.total_gadgets, 1);
        assert_eq!(stats.total_reviews, 1);
        assert_eq!(stats.pending_reviews, 1);
    }
}
