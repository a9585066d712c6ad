//! Filtered, sorted and paginated review listing.
//!
//! Works over joined rows (review + author + gadget) borrowed from the
//! store; the HTTP layer turns the resulting page into response structs.

use std::cmp::Ordering;

use crate::models::{Gadget, Review, User};

pub const DEFAULT_PAGE_LIMIT: usize = 12;
pub const MAX_PAGE_LIMIT: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReviewSort {
    #[default]
    Newest,
    Oldest,
    RatingHigh,
    RatingLow,
}

impl ReviewSort {
    /// Unknown or missing values fall back to `Newest`.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("oldest") => ReviewSort::Oldest,
            Some("rating_high") => ReviewSort::RatingHigh,
            Some("rating_low") => ReviewSort::RatingLow,
            _ => ReviewSort::Newest,
        }
    }

    fn compare(self, a: &Review, b: &Review) -> Ordering {
        let newest = || b.created_at.cmp(&a.created_at);
        match self {
            ReviewSort::Newest => newest(),
            ReviewSort::Oldest => a.created_at.cmp(&b.created_at),
            ReviewSort::RatingHigh => b.rating.total_cmp(&a.rating).then_with(newest),
            ReviewSort::RatingLow => a.rating.total_cmp(&b.rating).then_with(newest),
        }
    }
}

/// A review joined with its author and gadget
#[derive(Debug, Clone, Copy)]
pub struct ReviewRow<'a> {
    pub review: &'a Review,
    pub author: &'a User,
    pub gadget: &'a Gadget,
}

#[derive(Debug, Clone, Default)]
pub struct ReviewFilter {
    pub search: Option<String>,
    pub category: Option<String>,
    pub min_rating: Option<i64>,
    pub sort: ReviewSort,
    pub page: usize,
    pub limit: usize,
}

impl ReviewFilter {
    /// Validate `page >= 1` and `1 <= limit <= 100`, applying defaults.
    pub fn new(
        search: Option<String>,
        category: Option<String>,
        min_rating: Option<i64>,
        sort: Option<&str>,
        page: Option<i64>,
        limit: Option<i64>,
    ) -> Result<Self, String> {
        let page = page.unwrap_or(1);
        if page < 1 {
            return Err(format!("page must be >= 1, got {page}"));
        }
        let limit = limit.unwrap_or(DEFAULT_PAGE_LIMIT as i64);
        if !(1..=MAX_PAGE_LIMIT as i64).contains(&limit) {
            return Err(format!("limit must be between 1 and {MAX_PAGE_LIMIT}, got {limit}"));
        }
        Ok(Self {
            search,
            category,
            min_rating,
            sort: ReviewSort::parse(sort),
            page: page as usize,
            limit: limit as usize,
        })
    }

    fn search_term(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
    }

    fn category_term(&self) -> Option<String> {
        self.category
            .as_deref()
            .map(|c| c.trim().to_lowercase())
            .filter(|c| !c.is_empty() && c != "all")
    }

    fn accepts(&self, row: &ReviewRow<'_>, search: Option<&str>, category: Option<&str>) -> bool {
        if let Some(term) = search {
            if !row_mentions(row, term) {
                return false;
            }
        }
        if let Some(cat) = category {
            if !row.gadget.category.to_lowercase().contains(cat) {
                return false;
            }
        }
        match self.min_rating {
            Some(min) if min != 0 => row.review.rating >= min as f64,
            _ => true,
        }
    }
}

fn contains_ci(field: &str, term: &str) -> bool {
    field.to_lowercase().contains(term)
}

fn row_mentions(row: &ReviewRow<'_>, term: &str) -> bool {
    let r = row.review;
    contains_ci(&r.content, term)
        || contains_ci(&r.title, term)
        || r.pros.as_deref().is_some_and(|p| contains_ci(p, term))
        || r.cons.as_deref().is_some_and(|c| contains_ci(c, term))
        || contains_ci(&row.gadget.name, term)
        || contains_ci(&row.gadget.brand, term)
        || contains_ci(&row.author.username, term)
        || row
            .author
            .full_name
            .as_deref()
            .is_some_and(|n| contains_ci(n, term))
}

#[derive(Debug, Clone)]
pub struct ListedPage<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub total_pages: usize,
    pub current_page: usize,
    pub limit: usize,
}

/// Filter, sort and paginate `rows`.
///
/// Sorting is stable, so rows that compare equal keep their input order.
pub fn list_reviews<'a>(rows: Vec<ReviewRow<'a>>, filter: &ReviewFilter) -> ListedPage<ReviewRow<'a>> {
    let search = filter.search_term();
    let category = filter.category_term();

    let mut matched: Vec<ReviewRow<'a>> = rows
        .into_iter()
        .filter(|row| filter.accepts(row, search.as_deref(), category.as_deref()))
        .collect();
    matched.sort_by(|a, b| filter.sort.compare(a.review, b.review));

    let total = matched.len();
    let limit = filter.limit.max(1);
    let total_pages = total.div_ceil(limit);
    let skip = (filter.page.saturating_sub(1)).saturating_mul(limit);
    let items = matched.into_iter().skip(skip).take(limit).collect();

    ListedPage {
        items,
        total,
        total_pages,
        current_page: filter.page,
        limit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::fixtures::*;
    use crate::db::Database;

    /// Three users, three gadgets, five reviews with distinct ages.
    fn seeded() -> Database {
        let mut db = Database::default();
        let alice = db.insert_user(user_req("alice")).id;
        let mut bob_req = user_req("bob");
        bob_req.full_name = Some("Robert Stone".to_string());
        let bob = db.insert_user(bob_req).id;

        let phone = db.insert_gadget(gadget_req("Pixel 8 Pro", "Google", "Smartphones")).id;
        let laptop = db.insert_gadget(gadget_req("XPS 15", "Dell", "Laptops")).id;
        let tablet = db.insert_gadget(gadget_req("iPad Air", "Apple", "Tablets")).id;

        aged_review(&mut db, alice, review_req(phone, "Great camera", 5.0), 50);
        aged_review(&mut db, bob, review_req(laptop, "Runs hot", 3.0), 40);
        let mut with_pros = review_req(tablet, "Light", 4.0);
        with_pros.pros = Some("battery lasts forever".to_string());
        aged_review(&mut db, alice, with_pros, 30);
        aged_review(&mut db, bob, review_req(phone, "Solid phone", 4.0), 20);
        aged_review(&mut db, alice, review_req(laptop, "Bad keyboard", 2.0), 10);
        db
    }

    fn rows(db: &Database) -> Vec<ReviewRow<'_>> {
        db.reviews
            .iter()
            .map(|review| ReviewRow {
                review,
                author: db.user(review.user_id).unwrap(),
                gadget: db.gadget(review.gadget_id).unwrap(),
            })
            .collect()
    }

    fn titles(page: &ListedPage<ReviewRow<'_>>) -> Vec<String> {
        page.items.iter().map(|r| r.review.title.clone()).collect()
    }

    fn filter() -> ReviewFilter {
        ReviewFilter::new(None, None, None, None, None, None).unwrap()
    }

    #[test]
    fn test_default_is_newest_first() {
        let db = seeded();
        let page = list_reviews(rows(&db), &filter());
        assert_eq!(
            titles(&page),
            vec!["Bad keyboard", "Solid phone", "Light", "Runs hot", "Great camera"]
        );
        assert_eq!(page.total, 5);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.limit, DEFAULT_PAGE_LIMIT);
    }

    #[test]
    fn test_sort_orders() {
        let db = seeded();
        let mut f = filter();

        f.sort = ReviewSort::Oldest;
        assert_eq!(titles(&list_reviews(rows(&db), &f))[0], "Great camera");

        f.sort = ReviewSort::RatingHigh;
        // 4.0 tie broken by newest
        assert_eq!(
            titles(&list_reviews(rows(&db), &f)),
            vec!["Great camera", "Solid phone", "Light", "Runs hot", "Bad keyboard"]
        );

        f.sort = ReviewSort::RatingLow;
        assert_eq!(
            titles(&list_reviews(rows(&db), &f)),
            vec!["Bad keyboard", "Runs hot", "Solid phone", "Light", "Great camera"]
        );
    }

    #[test]
    fn test_unknown_sort_falls_back_to_newest() {
        assert_eq!(ReviewSort::parse(Some("popular")), ReviewSort::Newest);
        assert_eq!(ReviewSort::parse(None), ReviewSort::Newest);
        assert_eq!(ReviewSort::parse(Some("rating_low")), ReviewSort::RatingLow);
    }

    #[test]
    fn test_search_covers_review_gadget_and_author_fields() {
        let db = seeded();
        let mut f = filter();

        f.search = Some("BATTERY".to_string());
        assert_eq!(titles(&list_reviews(rows(&db), &f)), vec!["Light"]);

        f.search = Some("dell".to_string());
        assert_eq!(titles(&list_reviews(rows(&db), &f)), vec!["Bad keyboard", "Runs hot"]);

        f.search = Some("stone".to_string());
        assert_eq!(titles(&list_reviews(rows(&db), &f)), vec!["Solid phone", "Runs hot"]);
    }

    #[test]
    fn test_category_and_rating_filters() {
        let db = seeded();
        let mut f = filter();

        f.category = Some("laptop".to_string());
        assert_eq!(list_reviews(rows(&db), &f).total, 2);

        f.category = Some("All".to_string());
        assert_eq!(list_reviews(rows(&db), &f).total, 5);

        f.category = None;
        f.min_rating = Some(4);
        assert_eq!(list_reviews(rows(&db), &f).total, 3);

        f.min_rating = Some(0);
        assert_eq!(list_reviews(rows(&db), &f).total, 5);
    }

    #[test]
    fn test_pagination_math() {
        let db = seeded();
        let f = ReviewFilter::new(None, None, None, None, Some(2), Some(2)).unwrap();
        let page = list_reviews(rows(&db), &f);
        assert_eq!(titles(&page), vec!["Light", "Runs hot"]);
        assert_eq!(page.total, 5);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.current_page, 2);

        let f = ReviewFilter::new(None, None, None, None, Some(9), Some(2)).unwrap();
        let page = list_reviews(rows(&db), &f);
        assert!(page.items.is_empty());
        assert_eq!(page.total, 5);
    }

    #[test]
    fn test_filter_validation() {
        assert!(ReviewFilter::new(None, None, None, None, Some(0), None).is_err());
        assert!(ReviewFilter::new(None, None, None, None, None, Some(0)).is_err());
        assert!(ReviewFilter::new(None, None, None, None, None, Some(101)).is_err());
        assert!(ReviewFilter::new(None, None, None, None, None, Some(100)).is_ok());
    }
}
