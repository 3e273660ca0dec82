//! Turning a page of entities into the list body clients receive.
//!
//! Mapping keeps item order and page metadata; a failure on any item fails
//! the whole page.

use serde::Serialize;
use utoipa::ToSchema;

use super::links::Links;
use super::page::{PageMeta, PageResult};

/// A representation together with its own hypermedia links.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Resource<T> {
    #[serde(flatten)]
    pub data: T,
    pub links: Links,
}

impl<T> Resource<T> {
    pub fn new(data: T, links: Links) -> Self {
        Self { data, links }
    }
}

/// Body returned by every list endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PagedResponse<T> {
    pub data: Vec<T>,
    pub pagination: PageMeta,
    pub links: Links,
}

impl<T> PagedResponse<T> {
    pub fn new(page: PageResult<T>, links: Links) -> Self {
        let pagination = page.meta();
        Self {
            data: page.into_items(),
            pagination,
            links,
        }
    }
}

/// Map a page of entities into a page of DTOs, item for item.
pub fn assemble<E, D, F>(page: PageResult<E>, transform: F) -> PageResult<D>
where
    F: FnMut(E) -> D,
{
    page.map(transform)
}

/// Map a page and attach per-item links.
///
/// The first failing `item_links` call aborts the whole page.
pub fn assemble_with_links<E, D, F, L, Err>(
    page: PageResult<E>,
    transform: F,
    mut item_links: L,
) -> Result<PageResult<Resource<D>>, Err>
where
    F: FnMut(E) -> D,
    L: FnMut(&D) -> Result<Links, Err>,
{
    assemble(page, transform).try_map(|dto| {
        let links = item_links(&dto)?;
        Ok(Resource::new(dto, links))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::pagination::links::{build_links, resource_url, LinkError};
    use std::collections::BTreeMap;

    #[derive(Debug, Clone, PartialEq, Serialize)]
    struct Dto {
        id: u32,
    }

    #[test]
    fn identity_transform_preserves_items() {
        let page = PageResult::new(vec![4, 5, 6], 2, 3, 9);
        let out = assemble(page.clone(), |n| n);
        assert_eq!(out, page);
    }

    #[test]
    fn transform_runs_in_order() {
        let page = PageResult::new(vec![1, 2, 3], 1, 10, 3);
        let out = assemble(page, |id| Dto { id });
        let ids: Vec<u32> = out.items().iter().map(|d| d.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(out.total_items(), 3);
    }

    #[test]
    fn item_links_are_attached() {
        let page = PageResult::new(vec![1, 2], 1, 10, 2);
        let out = assemble_with_links(
            page,
            |id| Dto { id },
            |dto| {
                let href = resource_url("http://localhost/api/v1", &["things", &dto.id.to_string()])?;
                Ok::<_, LinkError>(Links::new().with("self", href))
            },
        )
        .unwrap();
        assert_eq!(
            out.items()[1].links.get("self"),
            Some("http://localhost/api/v1/things/2")
        );
    }

    #[test]
    fn failing_item_link_aborts_assembly() {
        let page = PageResult::new(vec![1, 2, 3], 1, 10, 3);
        let out = assemble_with_links(
            page,
            |id| Dto { id },
            |dto| {
                if dto.id == 2 {
                    Err("broken")
                } else {
                    Ok(Links::new())
                }
            },
        );
        assert_eq!(out.unwrap_err(), "broken");
    }

    #[test]
    fn paged_response_serializes_items_flattened() {
        let item = Resource::new(Dto { id: 1 }, Links::new().with("self", "http://x/1"));
        let page = PageResult::new(vec![item], 1, 10, 1);
        let links = build_links(&page.meta(), "http://x", &BTreeMap::new()).unwrap();
        let body = serde_json::to_value(PagedResponse::new(page, links)).unwrap();
        assert_eq!(body["data"][0]["id"], 1);
        assert_eq!(body["data"][0]["links"]["self"], "http://x/1");
        assert_eq!(body["pagination"]["totalItems"], 1);
        assert_eq!(body["links"]["self"], "http://x/?pageNumber=1&pageSize=10");
    }
}
