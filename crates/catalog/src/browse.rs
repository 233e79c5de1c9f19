//! Browse session state and the view it produces.
//!
//! [`BrowseState`] is an immutable value: every transition returns a new
//! state. Transitions that change which products are listed (category,
//! filters, sort, page size) send the pager back to page 1.

use serde::Serialize;

use ffe_core::{CategoryId, DomainResult, ValueObject};

use crate::category::{Breadcrumb, Category};
use crate::config::CatalogConfig;
use crate::filter::{FilterState, FilterSummary};
use crate::pagination::{Page, PageLink, Pagination, ViewMode};
use crate::product::Product;
use crate::sort::SortOrder;

/// Pages shown on each side of the current one in pager controls.
pub const PAGE_WINDOW_RADIUS: usize = 2;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowseState {
    category: Option<CategoryId>,
    filters: FilterState,
    sort: SortOrder,
    pagination: Pagination,
}

impl ValueObject for BrowseState {}

impl BrowseState {
    /// Fresh state using configured page size, layout and sort.
    pub fn new(config: &CatalogConfig) -> DomainResult<Self> {
        let pagination = Pagination::new(config.page_size)?.with_view_mode(config.view_mode);
        Ok(Self {
            category: None,
            filters: FilterState::default(),
            sort: config.sort,
            pagination,
        })
    }

    pub fn category(&self) -> Option<&CategoryId> {
        self.category.as_ref()
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn sort(&self) -> SortOrder {
        self.sort
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    fn listing_changed(mut self) -> Self {
        self.pagination = self.pagination.reset();
        self
    }

    /// Select a category, or `None` for "all products".
    pub fn with_category(self, category: Option<CategoryId>) -> Self {
        if self.category == category {
            return self;
        }
        Self { category, ..self }.listing_changed()
    }

    pub fn clear_category(self) -> Self {
        self.with_category(None)
    }

    pub fn with_filters(self, filters: FilterState) -> Self {
        if self.filters == filters {
            return self;
        }
        Self { filters, ..self }.listing_changed()
    }

    /// Apply a change to the current filters, e.g. `|f| f.toggle_material("oak")`.
    pub fn update_filters(self, change: impl FnOnce(FilterState) -> FilterState) -> Self {
        let filters = change(self.filters.clone());
        self.with_filters(filters)
    }

    pub fn clear_filters(self) -> Self {
        self.with_filters(FilterState::default())
    }

    pub fn with_sort(self, sort: SortOrder) -> Self {
        if self.sort == sort {
            return self;
        }
        Self { sort, ..self }.listing_changed()
    }

    /// Fails for sizes outside `1..=MAX_PAGE_SIZE`.
    pub fn with_page_size(self, page_size: usize) -> DomainResult<Self> {
        if self.pagination.page_size() == page_size {
            return Ok(self);
        }
        let view_mode = self.pagination.view_mode();
        let pagination = Pagination::new(page_size)?.with_view_mode(view_mode);
        Ok(Self { pagination, ..self })
    }

    pub fn with_page(self, page: usize) -> Self {
        let pagination = self.pagination.go_to(page);
        Self { pagination, ..self }
    }

    pub fn next_page(self) -> Self {
        let pagination = self.pagination.next();
        Self { pagination, ..self }
    }

    pub fn previous_page(self) -> Self {
        let pagination = self.pagination.previous();
        Self { pagination, ..self }
    }

    pub fn with_view_mode(self, view_mode: ViewMode) -> Self {
        let pagination = self.pagination.with_view_mode(view_mode);
        Self { pagination, ..self }
    }
}

/// Everything the rendering layer needs for one listing screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogView<'a> {
    pub breadcrumbs: Vec<Breadcrumb>,
    /// Selected category, when it exists in the catalog.
    pub category: Option<&'a Category>,
    pub page: Page<&'a Product>,
    pub pages: Vec<PageLink>,
    pub summary: FilterSummary,
    pub sort: SortOrder,
    pub view_mode: ViewMode,
}

impl CatalogView<'_> {
    /// Nothing matched; distinct from "category has no products at all".
    pub fn is_empty_result(&self) -> bool {
        self.summary.filtered == 0
    }

    /// "Showing 13–24 of 40 products".
    pub fn showing_label(&self) -> String {
        if self.page.total_items == 0 {
            return "No products found".to_string();
        }
        format!(
            "Showing {}–{} of {} products",
            self.page.first_item, self.page.last_item, self.page.total_items
        )
    }
}
