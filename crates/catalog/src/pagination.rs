//! Pagination slicer and view-mode state for product listings.
//!
//! Page numbers are 1-based. Requests outside `[1, total_pages]` are clamped,
//! never rejected.

use serde::{Deserialize, Serialize};

use ffe_core::{DomainError, DomainResult, ValueObject};

/// Products per page when nothing else is configured.
pub const DEFAULT_PAGE_SIZE: usize = 12;
/// Upper bound for a single page.
pub const MAX_PAGE_SIZE: usize = 96;

/// Listing layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

impl core::fmt::Display for ViewMode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ViewMode::Grid => f.write_str("grid"),
            ViewMode::List => f.write_str("list"),
        }
    }
}

impl core::str::FromStr for ViewMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "grid" => Ok(ViewMode::Grid),
            "list" => Ok(ViewMode::List),
            other => Err(DomainError::validation(format!(
                "unknown view mode `{other}` (expected grid or list)"
            ))),
        }
    }
}

/// Number of pages needed for `len` items; at least 1, even when empty.
pub fn total_pages(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size.max(1)).max(1)
}

/// One page of a listing plus the numbers the pager controls need.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Effective (clamped) page number.
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub page_size: usize,
    pub has_previous: bool,
    pub has_next: bool,
    /// 1-based position of the first item on this page, 0 when empty.
    pub first_item: usize,
    /// 1-based position of the last item on this page, 0 when empty.
    pub last_item: usize,
}

/// Slice `items` into the requested page.
///
/// `page` is clamped to `[1, total_pages]`; a `page_size` of 0 is treated
/// as 1. The input is never modified.
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> Page<T> {
    let page_size = page_size.max(1);
    let total_items = items.len();
    let total_pages = total_pages(total_items, page_size);
    let page = page.clamp(1, total_pages);

    let start = ((page - 1) * page_size).min(total_items);
    let end = (start + page_size).min(total_items);
    let slice = &items[start..end];

    let (first_item, last_item) = if slice.is_empty() {
        (0, 0)
    } else {
        (start + 1, end)
    };

    Page {
        items: slice.to_vec(),
        page,
        total_pages,
        total_items,
        page_size,
        has_previous: page > 1,
        has_next: page < total_pages,
        first_item,
        last_item,
    }
}

/// Entry in a pager control strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "page", rename_all = "lowercase")]
pub enum PageLink {
    Page(usize),
    Gap,
}

/// Page numbers to render around `current`: the first and last page, the
/// pages within `radius` of `current`, and a gap marker where numbers are
/// skipped. A gap that would hide a single page shows that page instead.
pub fn page_window(current: usize, total: usize, radius: usize) -> Vec<PageLink> {
    let total = total.max(1);
    let current = current.clamp(1, total);
    let low = current.saturating_sub(radius).max(1);
    let high = (current + radius).min(total);

    let mut pages: Vec<usize> = Vec::with_capacity(high - low + 3);
    pages.push(1);
    pages.extend(low..=high);
    pages.push(total);
    pages.sort_unstable();
    pages.dedup();

    let mut links = Vec::with_capacity(pages.len() + 2);
    let mut previous: Option<usize> = None;
    for page in pages {
        match previous {
            Some(prev) if page == prev + 2 => links.push(PageLink::Page(prev + 1)),
            Some(prev) if page > prev + 2 => links.push(PageLink::Gap),
            _ => {}
        }
        links.push(PageLink::Page(page));
        previous = Some(page);
    }
    links
}

/// Pager state: page size, requested page and layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    page_size: usize,
    current_page: usize,
    view_mode: ViewMode,
}

impl ValueObject for Pagination {}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            current_page: 1,
            view_mode: ViewMode::default(),
        }
    }
}

impl Pagination {
    /// Page size must be between 1 and [`MAX_PAGE_SIZE`].
    pub fn new(page_size: usize) -> DomainResult<Self> {
        if page_size == 0 {
            return Err(DomainError::validation("page size must be at least 1"));
        }
        if page_size > MAX_PAGE_SIZE {
            return Err(DomainError::validation(format!(
                "page size must be at most {MAX_PAGE_SIZE}, got {page_size}"
            )));
        }
        Ok(Self {
            page_size,
            ..Self::default()
        })
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Requested page; may exceed the page count until clamped by [`Self::slice`].
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn go_to(self, page: usize) -> Self {
        Self {
            current_page: page.max(1),
            ..self
        }
    }

    pub fn next(self) -> Self {
        self.go_to(self.current_page.saturating_add(1))
    }

    pub fn previous(self) -> Self {
        self.go_to(self.current_page.saturating_sub(1))
    }

    /// Back to the first page; used whenever the listing itself changes.
    pub fn reset(self) -> Self {
        self.go_to(1)
    }

    pub fn with_view_mode(self, view_mode: ViewMode) -> Self {
        Self { view_mode, ..self }
    }

    pub fn slice<T: Clone>(&self, items: &[T]) -> Page<T> {
        paginate(items, self.current_page, self.page_size)
    }
}
