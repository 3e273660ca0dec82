//! Hypermedia link construction.

use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;
use url::Url;
use utoipa::ToSchema;

use super::page::PageMeta;
use super::params::{PAGE_NUMBER_PARAM, PAGE_SIZE_PARAM};

#[derive(Debug, Error)]
pub enum LinkError {
    #[error("invalid base url '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("base url '{0}' cannot carry a path")]
    NotAHierarchicalUrl(String),
}

/// Named links keyed by relation (`self`, `next`, `update`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(transparent)]
pub struct Links(BTreeMap<String, String>);

impl Links {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, rel: &str, href: impl Into<String>) -> Self {
        self.0.insert(rel.to_string(), href.into());
        self
    }

    pub fn get(&self, rel: &str) -> Option<&str> {
        self.0.get(rel).map(String::as_str)
    }

    pub fn contains(&self, rel: &str) -> bool {
        self.0.contains_key(rel)
    }

    pub fn rels(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, String)> for Links {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Build `self`/`first`/`last`/`prev`/`next` for a page.
///
/// `extra_params` are carried into every link, in key order, ahead of
/// `pageNumber` and `pageSize`. Blank values are skipped and pagination keys
/// in `extra_params` are ignored.
pub fn build_links(
    meta: &PageMeta,
    base_url: &str,
    extra_params: &BTreeMap<String, String>,
) -> Result<Links, LinkError> {
    let base = parse_base(base_url)?;
    let page_url = |page_number: u64| page_link(&base, extra_params, page_number, meta.page_size);

    let current = u64::from(meta.page_number);
    let mut links = vec![("self", page_url(current))];

    if meta.total_pages > 0 {
        links.push(("first", page_url(1)));
        links.push(("last", page_url(meta.total_pages)));
    }
    // A page requested past the end still reports hasPreviousPage, but its
    // neighbour would be out of range too.
    if meta.has_previous_page && current - 1 <= meta.total_pages {
        links.push(("prev", page_url(current - 1)));
    }
    if meta.has_next_page {
        links.push(("next", page_url(current + 1)));
    }

    Ok(links
        .into_iter()
        .map(|(rel, href)| (rel.to_string(), href))
        .collect())
}

/// Absolute URL of `segments` appended to the path of `base_url`.
pub fn resource_url(base_url: &str, segments: &[&str]) -> Result<String, LinkError> {
    let mut url = parse_base(base_url)?;
    url.path_segments_mut()
        .map_err(|_| LinkError::NotAHierarchicalUrl(base_url.to_string()))?
        .pop_if_empty()
        .extend(segments);
    Ok(url.to_string())
}

fn parse_base(base_url: &str) -> Result<Url, LinkError> {
    let url = Url::parse(base_url).map_err(|source| LinkError::InvalidBaseUrl {
        url: base_url.to_string(),
        source,
    })?;
    if url.cannot_be_a_base() {
        return Err(LinkError::NotAHierarchicalUrl(base_url.to_string()));
    }
    Ok(url)
}

fn page_link(
    base: &Url,
    extra_params: &BTreeMap<String, String>,
    page_number: u64,
    page_size: u32,
) -> String {
    let mut url = base.clone();
    {
        let mut query = url.query_pairs_mut();
        for (key, value) in extra_params {
            if value.trim().is_empty() || key == PAGE_NUMBER_PARAM || key == PAGE_SIZE_PARAM {
                continue;
            }
            query.append_pair(key, value);
        }
        query
            .append_pair(PAGE_NUMBER_PARAM, &page_number.to_string())
            .append_pair(PAGE_SIZE_PARAM, &page_size.to_string());
    }
    url.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "http://localhost:8080/api/v1/branches";

    fn rels(links: &Links) -> Vec<&str> {
        links.rels().collect()
    }

    fn no_params() -> BTreeMap<String, String> {
        BTreeMap::new()
    }

    #[test]
    fn first_page_links() {
        let links = build_links(&PageMeta::new(1, 10, 23), BASE, &no_params()).unwrap();
        assert_eq!(rels(&links), vec!["first", "last", "next", "self"]);
        assert_eq!(
            links.get("self"),
            Some("http://localhost:8080/api/v1/branches?pageNumber=1&pageSize=10")
        );
        assert_eq!(
            links.get("last"),
            Some("http://localhost:8080/api/v1/branches?pageNumber=3&pageSize=10")
        );
        assert_eq!(
            links.get("next"),
            Some("http://localhost:8080/api/v1/branches?pageNumber=2&pageSize=10")
        );
    }

    #[test]
    fn last_page_links() {
        let links = build_links(&PageMeta::new(3, 10, 23), BASE, &no_params()).unwrap();
        assert!(links.contains("prev"));
        assert!(!links.contains("next"));
        assert_eq!(
            links.get("prev"),
            Some("http://localhost:8080/api/v1/branches?pageNumber=2&pageSize=10")
        );
    }

    #[test]
    fn empty_result_only_links_self() {
        let links = build_links(&PageMeta::new(1, 10, 0), BASE, &no_params()).unwrap();
        assert_eq!(rels(&links), vec!["self"]);
    }

    #[test]
    fn page_past_the_end_stays_in_range() {
        let links = build_links(&PageMeta::new(5, 10, 23), BASE, &no_params()).unwrap();
        assert_eq!(rels(&links), vec!["first", "last", "self"]);
        assert_eq!(
            links.get("self"),
            Some("http://localhost:8080/api/v1/branches?pageNumber=5&pageSize=10")
        );

        let links = build_links(&PageMeta::new(4, 10, 23), BASE, &no_params()).unwrap();
        assert_eq!(
            links.get("prev"),
            Some("http://localhost:8080/api/v1/branches?pageNumber=3&pageSize=10")
        );
    }

    #[test]
    fn extra_params_are_sorted_encoded_and_blank_skipped() {
        let params = BTreeMap::from([
            ("sortBy".to_string(), "name".to_string()),
            ("searchTerm".to_string(), "são paulo&co".to_string()),
            ("sortDirection".to_string(), " ".to_string()),
            ("pageSize".to_string(), "99".to_string()),
        ]);
        let links = build_links(&PageMeta::new(1, 5, 3), BASE, &params).unwrap();
        assert_eq!(
            links.get("self"),
            Some(
                "http://localhost:8080/api/v1/branches\
                 ?searchTerm=s%C3%A3o+paulo%26co&sortBy=name&pageNumber=1&pageSize=5"
            )
        );
    }

    #[test]
    fn base_with_query_is_extended() {
        let links = build_links(
            &PageMeta::new(1, 10, 5),
            "http://localhost:8080/api/v1/vehicles/mileage?min=0&max=5000",
            &no_params(),
        )
        .unwrap();
        assert_eq!(
            links.get("self"),
            Some("http://localhost:8080/api/v1/vehicles/mileage?min=0&max=5000&pageNumber=1&pageSize=10")
        );
    }

    #[test]
    fn malformed_base_is_an_error() {
        let err = build_links(&PageMeta::new(1, 10, 5), "not a url", &no_params()).unwrap_err();
        assert!(matches!(err, LinkError::InvalidBaseUrl { .. }));

        let err = build_links(&PageMeta::new(1, 10, 5), "mailto:ops@example.com", &no_params())
            .unwrap_err();
        assert!(matches!(err, LinkError::NotAHierarchicalUrl(_)));
    }

    #[test]
    fn resource_url_appends_segments() {
        assert_eq!(
            resource_url("http://localhost:8080/api/v1/", &["branches", "7", "stats"]).unwrap(),
            "http://localhost:8080/api/v1/branches/7/stats"
        );
        assert_eq!(
            resource_url("http://localhost:8080", &["api", "v1", "employees", "3"]).unwrap(),
            "http://localhost:8080/api/v1/employees/3"
        );
    }

    #[test]
    fn links_serialize_as_a_flat_map() {
        let links = Links::new().with("self", "http://x/1").with("update", "http://x/1");
        let json = serde_json::to_value(&links).unwrap();
        assert_eq!(json["self"], "http://x/1");
        assert_eq!(json.as_object().map(|o| o.len()), Some(2));
    }
}
