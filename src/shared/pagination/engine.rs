//! Generic search, sort and windowing over a record set.

use std::cmp::Ordering;

use tracing::debug;

use super::page::PageResult;
use super::params::{PageRequest, SortDirection};

/// Ascending ordering between two records.
pub type Comparator<T> = fn(&T, &T) -> Ordering;

/// Per-entity search and sort rules.
///
/// Both hooks default to no-ops: every record matches and no field is
/// sortable.
pub trait QueryRules<T> {
    /// `term` is already trimmed and lower-cased.
    fn matches(&self, _record: &T, _term: &str) -> bool {
        true
    }

    /// `field` is already lower-cased. Return `None` for fields that cannot
    /// be sorted on.
    fn comparator(&self, _field: &str) -> Option<Comparator<T>> {
        None
    }
}

/// Rules for record types with no searchable or sortable fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRules;

impl<T> QueryRules<T> for NoRules {}

/// Case-insensitive substring test; `term` must already be lower-case.
pub fn contains_term(field: &str, term: &str) -> bool {
    field.to_lowercase().contains(term)
}

/// Like [`contains_term`] for optional fields.
pub fn contains_opt_term(field: Option<&str>, term: &str) -> bool {
    field.is_some_and(|f| contains_term(f, term))
}

/// Case-insensitive ordering, so sorting agrees with how search matches.
pub fn cmp_ignore_case(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
}

/// Like [`cmp_ignore_case`] for optional fields; missing values sort first.
pub fn cmp_opt_ignore_case(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => cmp_ignore_case(a, b),
        _ => a.is_some().cmp(&b.is_some()),
    }
}

/// Filter, order and slice `records` according to `request`.
///
/// Records arrive in the source's default order, which is kept for ties
/// and for unknown sort fields. Pages past the end come back empty.
pub fn paginate<T, R>(
    records: impl IntoIterator<Item = T>,
    request: &PageRequest,
    rules: &R,
) -> PageResult<T>
where
    R: QueryRules<T> + ?Sized,
{
    let mut view: Vec<T> = match request.search_term() {
        Some(term) => {
            let term = term.to_lowercase();
            records
                .into_iter()
                .filter(|record| rules.matches(record, &term))
                .collect()
        }
        None => records.into_iter().collect(),
    };

    if let Some(field) = request.sort_by() {
        match rules.comparator(&field.to_lowercase()) {
            Some(cmp) => match request.sort_direction() {
                SortDirection::Asc => view.sort_by(cmp),
                SortDirection::Desc => view.sort_by(|a, b| cmp(b, a)),
            },
            None => debug!(field, "Unknown sort field, keeping default order"),
        }
    }

    let total_items = view.len() as u64;
    let offset = usize::try_from(request.offset()).unwrap_or(usize::MAX);
    let items: Vec<T> = view
        .into_iter()
        .skip(offset)
        .take(request.page_size() as usize)
        .collect();

    debug!(
        page_number = request.page_number(),
        page_size = request.page_size(),
        total_items,
        returned = items.len(),
        "Paginated query"
    );

    PageResult::new(items, request.page_number(), request.page_size(), total_items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: u32,
        label: String,
        group: u32,
    }

    struct ItemRules;

    impl QueryRules<Item> for ItemRules {
        fn matches(&self, record: &Item, term: &str) -> bool {
            contains_term(&record.label, term)
        }

        fn comparator(&self, field: &str) -> Option<Comparator<Item>> {
            match field {
                "label" => Some(|a, b| a.label.cmp(&b.label)),
                "group" => Some(|a, b| a.group.cmp(&b.group)),
                _ => None,
            }
        }
    }

    fn items(n: u32) -> Vec<Item> {
        (1..=n)
            .map(|id| Item {
                id,
                label: format!("Item {id:02}"),
                group: id % 3,
            })
            .collect()
    }

    fn request(page: i64, size: i64) -> PageRequest {
        PageRequest::new(page, size).unwrap()
    }

    fn ids(page: &PageResult<Item>) -> Vec<u32> {
        page.items().iter().map(|i| i.id).collect()
    }

    #[test]
    fn first_page_of_twenty_three() {
        let page = paginate(items(23), &request(1, 10), &ItemRules);
        assert_eq!(page.items().len(), 10);
        assert_eq!(page.total_items(), 23);
        assert_eq!(page.total_pages(), 3);
        assert!(!page.has_previous_page());
        assert!(page.has_next_page());
        assert_eq!(ids(&page), (1..=10).collect::<Vec<_>>());
    }

    #[test]
    fn last_page_is_partial() {
        let page = paginate(items(23), &request(3, 10), &ItemRules);
        assert_eq!(ids(&page), vec![21, 22, 23]);
        assert!(page.has_previous_page());
        assert!(!page.has_next_page());
    }

    #[test]
    fn window_length_matches_remaining_items() {
        for size in 1..=7i64 {
            let total = 23u64;
            let pages = total.div_ceil(size as u64);
            for number in 1..=pages {
                let page = paginate(items(23), &request(number as i64, size), &NoRules);
                let remaining = total - (number - 1) * size as u64;
                assert_eq!(page.items().len() as u64, remaining.min(size as u64));
            }
        }
    }

    #[test]
    fn empty_source_yields_zero_pages() {
        let page = paginate(Vec::<Item>::new(), &request(1, 10), &ItemRules);
        assert!(page.items().is_empty());
        assert_eq!(page.total_items(), 0);
        assert_eq!(page.total_pages(), 0);
        assert!(!page.has_previous_page());
        assert!(!page.has_next_page());
    }

    #[test]
    fn page_past_the_end_is_empty() {
        let page = paginate(items(23), &request(5, 10), &ItemRules);
        assert!(page.items().is_empty());
        assert_eq!(page.total_items(), 23);
        assert_eq!(page.total_pages(), 3);
        assert_eq!(page.page_number(), 5);
    }

    #[test]
    fn huge_page_number_does_not_overflow() {
        let page = paginate(items(3), &request(i64::MAX, 100), &NoRules);
        assert!(page.items().is_empty());
        assert_eq!(page.total_items(), 3);
    }

    #[test]
    fn search_counts_only_matches() {
        let req = request(1, 10).with_search(Some("  ITEM 1 ".into()));
        let page = paginate(items(23), &req, &ItemRules);
        assert_eq!(ids(&page), (10..=19).collect::<Vec<_>>());
        assert_eq!(page.total_items(), 10);
    }

    #[test]
    fn default_rules_match_everything() {
        let req = request(1, 50).with_search(Some("nothing like this".into()));
        let page = paginate(items(4), &req, &NoRules);
        assert_eq!(page.total_items(), 4);
    }

    #[test]
    fn sort_descending_reverses() {
        let req = request(1, 3).with_sort(Some("Label".into()), SortDirection::Desc);
        let page = paginate(items(23), &req, &ItemRules);
        assert_eq!(ids(&page), vec![23, 22, 21]);
    }

    #[test]
    fn sort_is_stable_for_ties() {
        let req = request(1, 50).with_sort(Some("group".into()), SortDirection::Asc);
        let page = paginate(items(9), &req, &ItemRules);
        assert_eq!(ids(&page), vec![3, 6, 9, 1, 4, 7, 2, 5, 8]);

        let req = request(1, 50).with_sort(Some("group".into()), SortDirection::Desc);
        let page = paginate(items(9), &req, &ItemRules);
        assert_eq!(ids(&page), vec![2, 5, 8, 1, 4, 7, 3, 6, 9]);
    }

    #[test]
    fn unknown_sort_field_keeps_source_order() {
        let req = request(1, 5).with_sort(Some("colour".into()), SortDirection::Desc);
        let page = paginate(items(5), &req, &ItemRules);
        assert_eq!(ids(&page), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn text_ordering_ignores_case() {
        assert_eq!(cmp_ignore_case("alpha", "Zeta"), Ordering::Less);
        assert_eq!(cmp_ignore_case("ÁGUA", "água"), Ordering::Equal);
        assert_eq!(cmp_opt_ignore_case(None, Some("a")), Ordering::Less);
        assert_eq!(cmp_opt_ignore_case(Some("B"), Some("a")), Ordering::Greater);
    }

    #[test]
    fn optional_fields_only_match_when_present() {
        assert!(contains_opt_term(Some("Rua Augusta"), "augusta"));
        assert!(!contains_opt_term(None, "augusta"));
    }
}
