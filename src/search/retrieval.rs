//! Candidate retrieval: the broad textual pre-filter applied before scoring.
//!
//! Short queries (<= 2 chars) only look at name and brand, and only accept
//! an exact match, a prefix, or a space-preceded word prefix. Longer queries
//! accept a substring anywhere in name, brand or description.
//!
//! Retrieval never decides ordering; records come back in input order.

use super::query::NormalizedQuery;
use super::relevance::has_word_starting_with;
use super::SearchRecord;

/// Select the records of `records` matching `query` and the optional category filter.
pub fn retrieve<'a, R, I>(records: I, query: &NormalizedQuery, category: Option<&str>) -> Vec<&'a R>
where
    R: SearchRecord + 'a,
    I: IntoIterator<Item = &'a R>,
{
    let category = category
        .map(|c| c.trim().to_lowercase())
        .filter(|c| !c.is_empty());

    records
        .into_iter()
        .filter(|record| matches_query(query, *record))
        .filter(|record| match &category {
            Some(c) => record.category().to_lowercase().contains(c.as_str()),
            None => true,
        })
        .collect()
}

/// Whether `record` would be retrieved for `query`, ignoring category.
pub fn matches_query<R: SearchRecord + ?Sized>(query: &NormalizedQuery, record: &R) -> bool {
    let q = query.as_str();
    let name = record.name().to_lowercase();
    let brand = record.brand().to_lowercase();

    if query.is_short() {
        [name.as_str(), brand.as_str()]
            .iter()
            .any(|field| field.starts_with(q) || has_word_starting_with(field, q))
    } else {
        name.contains(q)
            || brand.contains(q)
            || record
                .description()
                .is_some_and(|d| d.to_lowercase().contains(q))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::test_support::{item, Item};

    fn ids(found: Vec<&Item>) -> Vec<u64> {
        found.iter().map(|i| i.id).collect()
    }

    #[test]
    fn test_short_query_ignores_description_and_inner_substrings() {
        let records = vec![
            item(1, "OnePlus 12", "OnePlus"),
            item(2, "Nothing Phone 2", "Nothing").with_description("one of a kind"),
            item(3, "Galaxy Phone", "Samsung"),
            item(4, "Phone", "Acme"),
        ];
        let q = NormalizedQuery::parse("on").unwrap();
        assert_eq!(ids(retrieve(&records, &q, None)), vec![1]);

        let q = NormalizedQuery::parse("ph").unwrap();
        assert_eq!(ids(retrieve(&records, &q, None)), vec![2, 3, 4]);
    }

    #[test]
    fn test_long_query_searches_description() {
        let records = vec![
            item(1, "Blade 16", "Razer").with_description("Thin gaming laptop"),
            item(2, "Gram 17", "LG"),
        ];
        let q = NormalizedQuery::parse("gaming").unwrap();
        assert_eq!(ids(retrieve(&records, &q, None)), vec![1]);
    }

    #[test]
    fn test_category_filter_applies_after_matching() {
        let records = vec![
            item(1, "iPad Air", "Apple").in_category("Tablets"),
            item(2, "iPhone 15", "Apple").in_category("Smartphones"),
        ];
        let q = NormalizedQuery::parse("apple").unwrap();
        assert_eq!(ids(retrieve(&records, &q, Some("tab"))), vec![1]);
        assert_eq!(ids(retrieve(&records, &q, Some("  "))), vec![1, 2]);
        assert!(retrieve(&records, &q, Some("laptop")).is_empty());
    }

    #[test]
    fn test_order_is_preserved() {
        let records = vec![
            item(7, "Surface Pro 9", "Microsoft"),
            item(3, "Surface Laptop", "Microsoft"),
        ];
        let q = NormalizedQuery::parse("surface").unwrap();
        assert_eq!(ids(retrieve(&records, &q, None)), vec![7, 3]);
    }
}
