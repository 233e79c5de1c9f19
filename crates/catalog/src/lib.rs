//! Catalog browsing for the FF&E product line.
//!
//! Pure, synchronous logic (no IO besides parsing an in-memory JSON snapshot):
//! a category forest with breadcrumbs, a conjunctive product filter engine,
//! sorting, facets and a pagination slicer, composed by [`Catalog::browse`].

pub mod browse;
pub mod catalog;
pub mod category;
pub mod config;
pub mod facets;
pub mod filter;
pub mod pagination;
pub mod price;
pub mod product;
pub mod sort;

pub use browse::{BrowseState, CatalogView};
pub use catalog::{Catalog, CatalogSnapshot};
pub use category::{Breadcrumb, Category, CategoryNode, CategoryTree};
pub use config::CatalogConfig;
pub use facets::{FacetValue, Facets};
pub use filter::{FilterState, FilterSummary, filter_products};
pub use pagination::{Page, PageLink, Pagination, ViewMode, page_window, paginate, total_pages};
pub use price::{PriceRange, parse_price_range};
pub use product::{Availability, Product};
pub use sort::{SortOrder, sort_products};

pub use ffe_core::{CategoryId, DomainError, DomainResult, ProductId};
