//! Pagination parameters
//!
//! [`PaginationParams`] is what the transport layer deserializes from the
//! query string; [`PageRequest`] is the validated form the query engine
//! accepts. A `PageRequest` can only exist with a page size inside
//! `1..=MAX_PAGE_SIZE` and a page number of at least 1.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

/// Page size used when the client does not send one.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Upper bound for `pageSize`.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Names of the query parameters owned by the link builder.
pub const PAGE_NUMBER_PARAM: &str = "pageNumber";
pub const PAGE_SIZE_PARAM: &str = "pageSize";

const SEARCH_TERM_PARAM: &str = "searchTerm";
const SORT_BY_PARAM: &str = "sortBy";
const SORT_DIRECTION_PARAM: &str = "sortDirection";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("sortDirection must be 'asc' or 'desc', got '{0}'")]
pub struct InvalidSortDirection(pub String);

impl FromStr for SortDirection {
    type Err = InvalidSortDirection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(InvalidSortDirection(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("pageSize must be between 1 and {max}, got {value}")]
pub struct InvalidPageSize {
    pub value: i64,
    pub max: u32,
}

/// Deployment-level page size bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLimits {
    default_page_size: u32,
    max_page_size: u32,
}

impl PageLimits {
    /// `max_page_size` is capped at [`MAX_PAGE_SIZE`] and the default is
    /// kept inside `1..=max_page_size`.
    pub fn new(default_page_size: u32, max_page_size: u32) -> Self {
        let max_page_size = max_page_size.clamp(1, MAX_PAGE_SIZE);
        Self {
            default_page_size: default_page_size.clamp(1, max_page_size),
            max_page_size,
        }
    }

    pub fn default_page_size(&self) -> u32 {
        self.default_page_size
    }

    pub fn max_page_size(&self) -> u32 {
        self.max_page_size
    }
}

impl Default for PageLimits {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE)
    }
}

/// Query string parameters shared by every list endpoint.
#[derive(Debug, Clone, Default, Deserialize, Validate, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct PaginationParams {
    /// Page number (1-based). Values below 1 are treated as 1. Default: 1
    pub page_number: Option<i64>,
    /// Items per page (1–100). Default: 10
    #[validate(range(min = 1, max = 100, message = "pageSize must be between 1 and 100"))]
    pub page_size: Option<i64>,
    /// Free-text, case-insensitive search over the resource's text fields
    #[validate(length(max = 100, message = "searchTerm must be at most 100 characters"))]
    pub search_term: Option<String>,
    /// Field to sort by; unknown fields keep the default order
    #[validate(length(max = 50, message = "sortBy must be at most 50 characters"))]
    pub sort_by: Option<String>,
    /// `asc` or `desc`. Default: asc
    #[validate(custom(function = "validate_sort_direction"))]
    pub sort_direction: Option<String>,
}

fn validate_sort_direction(value: &str) -> Result<(), ValidationError> {
    value.parse::<SortDirection>().map(|_| ()).map_err(|e| {
        let mut err = ValidationError::new("sort_direction");
        err.message = Some(e.to_string().into());
        err
    })
}

impl PaginationParams {
    /// Convert into a [`PageRequest`] under the deployment's `limits`.
    ///
    /// Expects the params to have passed `validate()`; an unparseable sort
    /// direction that slipped through falls back to ascending.
    pub fn to_request(&self, limits: PageLimits) -> Result<PageRequest, InvalidPageSize> {
        let page_number = self.page_number.unwrap_or(1);
        let page_size = self
            .page_size
            .unwrap_or(i64::from(limits.default_page_size()));
        if page_size > i64::from(limits.max_page_size()) {
            return Err(InvalidPageSize {
                value: page_size,
                max: limits.max_page_size(),
            });
        }
        let direction = self
            .sort_direction
            .as_deref()
            .and_then(|d| d.parse().ok())
            .unwrap_or_default();

        Ok(PageRequest::new(page_number, page_size)?
            .with_search(self.search_term.clone())
            .with_sort(self.sort_by.clone(), direction))
    }
}

/// Validated pagination input for the query engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    page_number: u32,
    page_size: u32,
    search_term: Option<String>,
    sort_by: Option<String>,
    sort_direction: SortDirection,
}

impl PageRequest {
    /// Page numbers below 1 are clamped to 1; a page size outside
    /// `1..=MAX_PAGE_SIZE` is rejected.
    pub fn new(page_number: i64, page_size: i64) -> Result<Self, InvalidPageSize> {
        if !(1..=i64::from(MAX_PAGE_SIZE)).contains(&page_size) {
            return Err(InvalidPageSize {
                value: page_size,
                max: MAX_PAGE_SIZE,
            });
        }
        let page_number = page_number.clamp(1, i64::from(u32::MAX)) as u32;

        Ok(Self {
            page_number,
            page_size: page_size as u32,
            search_term: None,
            sort_by: None,
            sort_direction: SortDirection::Asc,
        })
    }

    /// Blank terms are dropped.
    pub fn with_search(mut self, term: Option<String>) -> Self {
        self.search_term = non_blank(term);
        self
    }

    /// Blank field names are dropped; the direction is kept either way.
    pub fn with_sort(mut self, field: Option<String>, direction: SortDirection) -> Self {
        self.sort_by = non_blank(field);
        self.sort_direction = direction;
        self
    }

    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn search_term(&self) -> Option<&str> {
        self.search_term.as_deref()
    }

    pub fn sort_by(&self) -> Option<&str> {
        self.sort_by.as_deref()
    }

    pub fn sort_direction(&self) -> SortDirection {
        self.sort_direction
    }

    /// Index of the first record of the window.
    pub fn offset(&self) -> u64 {
        u64::from(self.page_number - 1) * u64::from(self.page_size)
    }

    /// Non-pagination parameters to carry over into navigation links.
    ///
    /// `sortDirection` is only included when it differs from the default.
    pub fn preserved_params(&self) -> BTreeMap<String, String> {
        let mut params = BTreeMap::new();
        if let Some(term) = &self.search_term {
            params.insert(SEARCH_TERM_PARAM.to_string(), term.clone());
        }
        if let Some(field) = &self.sort_by {
            params.insert(SORT_BY_PARAM.to_string(), field.clone());
        }
        if self.sort_direction != SortDirection::Asc {
            params.insert(
                SORT_DIRECTION_PARAM.to_string(),
                self.sort_direction.to_string(),
            );
        }
        params
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page_number: 1,
            page_size: DEFAULT_PAGE_SIZE,
            search_term: None,
            sort_by: None,
            sort_direction: SortDirection::Asc,
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
