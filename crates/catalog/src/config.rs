//! Catalog listing defaults, overridable from the environment.

use serde::{Deserialize, Serialize};
use tracing::debug;

use ffe_core::{DomainError, DomainResult};

use crate::pagination::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, ViewMode};
use crate::sort::SortOrder;

pub const ENV_PAGE_SIZE: &str = "FFE_PAGE_SIZE";
pub const ENV_VIEW_MODE: &str = "FFE_VIEW_MODE";
pub const ENV_SORT: &str = "FFE_SORT";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CatalogConfig {
    pub page_size: usize,
    pub view_mode: ViewMode,
    pub sort: SortOrder,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            view_mode: ViewMode::Grid,
            sort: SortOrder::Default,
        }
    }
}

impl CatalogConfig {
    /// Read `FFE_PAGE_SIZE`, `FFE_VIEW_MODE` and `FFE_SORT`.
    ///
    /// Unset (or blank) variables keep their defaults; malformed values are
    /// validation errors rather than silently ignored.
    pub fn from_env() -> DomainResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> DomainResult<Self> {
        let mut config = Self::default();
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(raw) = var(ENV_PAGE_SIZE) {
            let page_size: usize = raw
                .trim()
                .parse()
                .map_err(|e| DomainError::validation(format!("{ENV_PAGE_SIZE}={raw}: {e}")))?;
            if page_size == 0 || page_size > MAX_PAGE_SIZE {
                return Err(DomainError::validation(format!(
                    "{ENV_PAGE_SIZE} must be between 1 and {MAX_PAGE_SIZE}, got {page_size}"
                )));
            }
            config.page_size = page_size;
        }
        if let Some(raw) = var(ENV_VIEW_MODE) {
            config.view_mode = raw.parse()?;
        }
        if let Some(raw) = var(ENV_SORT) {
            config.sort = raw.parse()?;
        }

        debug!(page_size = config.page_size, view_mode = %config.view_mode, sort = %config.sort, "catalog config loaded");
        Ok(config)
    }
}
