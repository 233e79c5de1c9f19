//! `ffe-browse`: inspect a catalog snapshot from the command line.
//!
//! Loads a JSON export (`{ "categories": [...], "products": [...] }`), applies
//! the same browse pipeline the storefront uses and prints the result as JSON.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use serde_json::Value as JsonValue;

use ffe_catalog::{
    Availability, BrowseState, Catalog, CatalogConfig, CategoryId, FilterState, SortOrder,
    ViewMode,
};

#[derive(Debug, Clone, Parser)]
#[command(name = "ffe-browse", version, about = "Browse an FF&E catalog snapshot")]
pub struct Args {
    /// Path to the catalog JSON snapshot.
    pub catalog: PathBuf,

    /// Restrict the listing to a category and its descendants.
    #[arg(long)]
    pub category: Option<String>,

    /// Case-insensitive text search over name, description, SKU, materials and tags.
    #[arg(long)]
    pub search: Option<String>,

    #[arg(long = "material")]
    pub materials: Vec<String>,

    #[arg(long = "color")]
    pub colors: Vec<String>,

    #[arg(long = "tag")]
    pub tags: Vec<String>,

    /// in_stock, out_of_stock, pre_order or discontinued (repeatable).
    #[arg(long = "availability")]
    pub availability: Vec<Availability>,

    #[arg(long, value_parser = parse_price_bound)]
    pub min_price: Option<f64>,

    #[arg(long, value_parser = parse_price_bound)]
    pub max_price: Option<f64>,

    /// Only featured products.
    #[arg(long)]
    pub featured: bool,

    /// Overrides FFE_SORT.
    #[arg(long)]
    pub sort: Option<SortOrder>,

    #[arg(long, default_value_t = 1)]
    pub page: usize,

    /// Overrides FFE_PAGE_SIZE.
    #[arg(long)]
    pub page_size: Option<usize>,

    /// Overrides FFE_VIEW_MODE.
    #[arg(long)]
    pub view: Option<ViewMode>,

    /// Print the category tree (with product counts) instead of a listing.
    #[arg(long, conflicts_with = "facets")]
    pub tree: bool,

    /// Print filter options for the selected category instead of a listing.
    #[arg(long)]
    pub facets: bool,
}

fn parse_price_bound(raw: &str) -> Result<f64, String> {
    let value: f64 = raw.trim().parse().map_err(|e| format!("{e}"))?;
    if !value.is_finite() {
        return Err(format!("price bound must be a finite number, got `{raw}`"));
    }
    Ok(value)
}

impl Args {
    fn category_id(&self) -> anyhow::Result<Option<CategoryId>> {
        self.category
            .as_deref()
            .map(str::parse::<CategoryId>)
            .transpose()
            .context("invalid --category")
    }

    fn filters(&self) -> FilterState {
        let mut filters = FilterState::new().with_featured_only(self.featured);
        if let Some(search) = &self.search {
            filters = filters.with_search(search.clone());
        }
        filters.materials.extend(self.materials.iter().cloned());
        filters.colors.extend(self.colors.iter().cloned());
        filters.tags.extend(self.tags.iter().cloned());
        filters.availability.extend(self.availability.iter().copied());
        if self.min_price.is_some() || self.max_price.is_some() {
            filters = filters.with_price_range(
                self.min_price.unwrap_or(0.0),
                self.max_price.unwrap_or(f64::MAX),
            );
        }
        filters
    }

    /// Browse state from config defaults overridden by flags.
    pub fn browse_state(&self, config: &CatalogConfig) -> anyhow::Result<BrowseState> {
        let mut config = *config;
        if let Some(page_size) = self.page_size {
            config.page_size = page_size;
        }
        if let Some(view) = self.view {
            config.view_mode = view;
        }
        if let Some(sort) = self.sort {
            config.sort = sort;
        }

        let state = BrowseState::new(&config)
            .context("invalid listing settings")?
            .with_category(self.category_id()?)
            .with_filters(self.filters())
            .with_page(self.page);
        Ok(state)
    }
}

pub fn load_catalog(path: &Path) -> anyhow::Result<Catalog> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog snapshot {}", path.display()))?;
    Catalog::from_json(&json).with_context(|| format!("failed to load catalog {}", path.display()))
}

/// Produce the JSON document requested by `args`.
pub fn render(catalog: &Catalog, args: &Args, config: &CatalogConfig) -> anyhow::Result<JsonValue> {
    let value = if args.tree {
        serde_json::to_value(catalog.forest())?
    } else if args.facets {
        let category = args.category_id()?;
        serde_json::to_value(catalog.facets(category.as_ref()))?
    } else {
        let state = args.browse_state(config)?;
        let view = catalog.browse(&state);
        tracing::info!(
            filtered = view.summary.filtered,
            total = view.summary.total,
            page = view.page.page,
            "{}",
            view.showing_label()
        );
        serde_json::to_value(&view)?
    };
    Ok(value)
}

pub fn run(args: &Args, config: &CatalogConfig) -> anyhow::Result<JsonValue> {
    let catalog = load_catalog(&args.catalog)?;
    render(&catalog, args, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SNAPSHOT: &str = r#"{
      "categories": [
        { "id": "seating", "name": "Seating" },
        { "id": "lounge", "name": "Lounge", "parentId": "seating" },
        { "id": "lighting", "name": "Lighting" }
      ],
      "products": [
        { "id": "p1", "categoryId": "lounge", "name": "Sofa", "priceRange": "$500-$800", "materials": ["wood"] },
        { "id": "p2", "categoryId": "seating", "name": "Chair", "priceRange": "$100-$200", "materials": ["metal"] },
        { "id": "p3", "categoryId": "lighting", "name": "Pendant", "availability": "pre_order", "isFeatured": true }
      ]
    }"#;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["ffe-browse", "catalog.json"];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    fn catalog() -> Catalog {
        Catalog::from_json(SNAPSHOT).unwrap()
    }

    fn item_ids(value: &JsonValue) -> Vec<String> {
        value["page"]["items"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["id"].as_str().unwrap().to_string())
            .collect()
    }

    #[test]
    fn listing_applies_flags() {
        let value = render(
            &catalog(),
            &args(&["--material", "wood", "--material", "metal", "--max-price", "300"]),
            &CatalogConfig::default(),
        )
        .unwrap();
        assert_eq!(item_ids(&value), vec!["p2"]);
        assert_eq!(value["summary"]["activeFilters"], 2);
    }

    #[test]
    fn category_and_availability_flags() {
        let value = render(
            &catalog(),
            &args(&["--category", "seating", "--availability", "in_stock"]),
            &CatalogConfig::default(),
        )
        .unwrap();
        assert_eq!(item_ids(&value), vec!["p1", "p2"]);
        assert_eq!(value["breadcrumbs"][0]["id"], "seating");

        let featured = render(&catalog(), &args(&["--featured"]), &CatalogConfig::default()).unwrap();
        assert_eq!(item_ids(&featured), vec!["p3"]);
    }

    #[test]
    fn flags_override_config() {
        let config = CatalogConfig {
            page_size: 1,
            ..CatalogConfig::default()
        };
        let value = render(
            &catalog(),
            &args(&["--page-size", "2", "--page", "2", "--view", "list", "--sort", "name-asc"]),
            &config,
        )
        .unwrap();
        assert_eq!(value["page"]["pageSize"], 2);
        assert_eq!(value["viewMode"], "list");
        assert_eq!(item_ids(&value), vec!["p1"]);
    }

    #[test]
    fn tree_and_facets_outputs() {
        let tree = render(&catalog(), &args(&["--tree"]), &CatalogConfig::default()).unwrap();
        assert_eq!(tree[0]["id"], "seating");
        assert_eq!(tree[0]["totalProductCount"], 2);
        assert_eq!(tree[0]["children"][0]["id"], "lounge");

        let facets = render(
            &catalog(),
            &args(&["--facets", "--category", "seating"]),
            &CatalogConfig::default(),
        )
        .unwrap();
        assert_eq!(facets["materials"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn rejects_bad_flags() {
        let argv = ["ffe-browse", "catalog.json", "--availability", "sold"];
        assert!(Args::try_parse_from(argv).is_err());
        let argv = ["ffe-browse", "catalog.json", "--tree", "--facets"];
        assert!(Args::try_parse_from(argv).is_err());

        let err = render(&catalog(), &args(&["--page-size", "0"]), &CatalogConfig::default()).unwrap_err();
        assert!(format!("{err:#}").contains("page size must be at least 1"));
    }

    #[test]
    fn oversized_page_size_matches_env_bounds() {
        let err = render(&catalog(), &args(&["--page-size", "200"]), &CatalogConfig::default()).unwrap_err();
        assert!(format!("{err:#}").contains("page size must be at most 96"));

        let value = render(&catalog(), &args(&["--page-size", "96"]), &CatalogConfig::default()).unwrap();
        assert_eq!(value["page"]["pageSize"], 96);
    }

    #[test]
    fn non_finite_price_bounds_are_rejected() {
        for bound in ["NaN", "inf", "-inf", "cheap"] {
            let argv = ["ffe-browse", "catalog.json", "--min-price", bound];
            assert!(Args::try_parse_from(argv).is_err(), "{bound}");
        }
        assert_eq!(args(&["--max-price", " 250.5 "]).max_price, Some(250.5));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = run(&args(&[]), &CatalogConfig::default()).unwrap_err();
        assert!(err.to_string().contains("catalog.json"));
    }
}
