//! Paginated querying and response assembly shared by every resource.

pub mod assembler;
pub mod engine;
pub mod links;
pub mod page;
pub mod params;

pub use assembler::{assemble, assemble_with_links, PagedResponse, Resource};
pub use engine::{
    cmp_ignore_case, cmp_opt_ignore_case, contains_opt_term, contains_term, paginate, Comparator,
    NoRules, QueryRules,
};
pub use links::{build_links, resource_url, LinkError, Links};
pub use page::{PageMeta, PageResult};
pub use params::{
    InvalidPageSize, PageLimits, PageRequest, PaginationParams, SortDirection, DEFAULT_PAGE_SIZE,
    MAX_PAGE_SIZE,
};
