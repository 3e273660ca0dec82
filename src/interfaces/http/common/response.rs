//! Glue between handlers and the pagination core: page limits, absolute
//! URLs and paged response assembly.

use std::sync::Arc;

use crate::shared::pagination::{
    assemble_with_links, build_links, resource_url, LinkError, Links, PageLimits, PageRequest,
    PageResult, PagedResponse, PaginationParams, Resource,
};

use super::ApiError;

/// Version prefix of every resource route.
pub const API_PREFIX: &str = "/api/v1";

#[derive(Debug, Clone)]
pub struct ResponseContext {
    public_base_url: Arc<str>,
    limits: PageLimits,
}

impl ResponseContext {
    /// `public_base_url` is the externally visible origin, e.g.
    /// `https://fleet.example.com`.
    pub fn new(public_base_url: &str, limits: PageLimits) -> Self {
        Self {
            public_base_url: public_base_url.trim_end_matches('/').into(),
            limits,
        }
    }

    pub fn limits(&self) -> PageLimits {
        self.limits
    }

    pub fn page_request(&self, params: &PaginationParams) -> Result<PageRequest, ApiError> {
        Ok(params.to_request(self.limits)?)
    }

    /// Absolute URL for a request path (and optional query).
    pub fn absolute(&self, path_and_query: &str) -> String {
        format!("{}{}", self.public_base_url, path_and_query)
    }

    /// Absolute URL of a resource below [`API_PREFIX`].
    pub fn api_url(&self, segments: &[&str]) -> Result<String, LinkError> {
        resource_url(&self.absolute(API_PREFIX), segments)
    }

    /// Transform a page, link every item and add navigation links built
    /// against `base_url`.
    pub fn paged<E, D, F, L>(
        &self,
        page: PageResult<E>,
        request: &PageRequest,
        base_url: &str,
        transform: F,
        item_links: L,
    ) -> Result<PagedResponse<Resource<D>>, ApiError>
    where
        F: FnMut(E) -> D,
        L: FnMut(&D) -> Result<Links, LinkError>,
    {
        let page = assemble_with_links(page, transform, item_links)?;
        let links = build_links(&page.meta(), base_url, &request.preserved_params())?;
        Ok(PagedResponse::new(page, links))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed() {
        let ctx = ResponseContext::new("http://localhost:8080/", PageLimits::default());
        assert_eq!(
            ctx.absolute("/api/v1/branches"),
            "http://localhost:8080/api/v1/branches"
        );
        assert_eq!(
            ctx.api_url(&["branches", "3"]).unwrap(),
            "http://localhost:8080/api/v1/branches/3"
        );
    }

    #[test]
    fn paged_response_carries_preserved_params() {
        let ctx = ResponseContext::new("http://localhost:8080", PageLimits::default());
        let request = PageRequest::new(1, 2)
            .unwrap()
            .with_search(Some("honda".into()));
        let page = PageResult::new(vec![1, 2], 1, 2, 5);
        let body = ctx
            .paged(
                page,
                &request,
                &ctx.absolute("/api/v1/vehicles"),
                |n| n,
                |n| Ok(Links::new().with("self", ctx.api_url(&["vehicles", &n.to_string()])?)),
            )
            .unwrap();
        assert_eq!(
            body.links.get("next"),
            Some("http://localhost:8080/api/v1/vehicles?searchTerm=honda&pageNumber=2&pageSize=2")
        );
        assert_eq!(
            body.data[1].links.get("self"),
            Some("http://localhost:8080/api/v1/vehicles/2")
        );
    }
}
