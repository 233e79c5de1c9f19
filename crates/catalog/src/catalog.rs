//! Loaded catalog: validated categories and products, and the browse pipeline
//! (scope → filter → sort → paginate) over them.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use ffe_core::{CategoryId, DomainError, DomainResult, ProductId, first_duplicate_id};

use crate::browse::{BrowseState, CatalogView, PAGE_WINDOW_RADIUS};
use crate::category::{Category, CategoryNode, CategoryTree};
use crate::facets::Facets;
use crate::filter::{FilterSummary, filter_products};
use crate::pagination::page_window;
use crate::product::Product;
use crate::sort::sort_products;

/// Wire shape of a catalog export: `{ "categories": [...], "products": [...] }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub products: Vec<Product>,
}

#[derive(Debug, Clone)]
pub struct Catalog {
    tree: CategoryTree,
    products: Vec<Product>,
}

impl Catalog {
    /// Build the category tree and check every product against it.
    ///
    /// Category data problems (dangling or cyclic parents, duplicates) are
    /// repaired by the tree builder. Product problems are rejected: blank
    /// names, duplicate ids and unknown categories.
    pub fn new(categories: Vec<Category>, products: Vec<Product>) -> DomainResult<Self> {
        let tree = CategoryTree::build(categories);

        if let Some(id) = first_duplicate_id(&products) {
            return Err(DomainError::validation(format!("duplicate product id `{id}`")));
        }
        for product in &products {
            if product.name.trim().is_empty() {
                return Err(DomainError::validation(format!(
                    "product `{}` has an empty name",
                    product.id
                )));
            }
            if !tree.contains(&product.category_id) {
                return Err(DomainError::validation(format!(
                    "product `{}` references unknown category `{}`",
                    product.id, product.category_id
                )));
            }
        }

        info!(categories = tree.len(), products = products.len(), "catalog loaded");
        Ok(Self { tree, products })
    }

    pub fn from_snapshot(snapshot: CatalogSnapshot) -> DomainResult<Self> {
        Self::new(snapshot.categories, snapshot.products)
    }

    pub fn from_json(json: &str) -> DomainResult<Self> {
        let snapshot: CatalogSnapshot = serde_json::from_str(json)
            .map_err(|e| DomainError::validation(format!("malformed catalog snapshot: {e}")))?;
        Self::from_snapshot(snapshot)
    }

    pub fn tree(&self) -> &CategoryTree {
        &self.tree
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn product(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    pub fn category(&self, id: &CategoryId) -> DomainResult<&Category> {
        self.tree
            .get(id)
            .ok_or_else(|| DomainError::not_found(format!("category `{id}`")))
    }

    /// Category forest with product counts.
    pub fn forest(&self) -> Vec<CategoryNode> {
        self.tree.forest_with_counts(&self.products)
    }

    /// Products in the selected category and all of its descendants.
    ///
    /// `None`, or an id that is not in the tree, means "all products".
    pub fn products_in_category(&self, category: Option<&CategoryId>) -> Vec<&Product> {
        let Some(id) = category else {
            return self.products.iter().collect();
        };
        if !self.tree.contains(id) {
            debug!(category_id = %id, "unknown category selected; showing all products");
            return self.products.iter().collect();
        }

        let scope = self.tree.subtree_ids(id);
        self.products
            .iter()
            .filter(|p| scope.contains(&p.category_id))
            .collect()
    }

    /// Filter options for the products in scope.
    pub fn facets(&self, category: Option<&CategoryId>) -> Facets {
        let scoped = self.products_in_category(category);
        Facets::collect(scoped.iter().copied())
    }

    /// Run the full listing pipeline for one browse state.
    pub fn browse(&self, state: &BrowseState) -> CatalogView<'_> {
        let selected = state.category();
        let scoped = self.products_in_category(selected);

        let mut kept = filter_products(scoped.iter().copied(), state.filters());
        sort_products(&mut kept, state.sort());

        let summary = FilterSummary::new(scoped.len(), kept.len(), state.filters());
        let page = state.pagination().slice(&kept);
        let pages = page_window(page.page, page.total_pages, PAGE_WINDOW_RADIUS);

        debug!(
            category = ?selected,
            scoped = summary.total,
            filtered = summary.filtered,
            page = page.page,
            total_pages = page.total_pages,
            "browse"
        );

        CatalogView {
            breadcrumbs: self.tree.breadcrumbs(selected),
            category: selected.and_then(|id| self.tree.get(id)),
            page,
            pages,
            summary,
            sort: state.sort(),
            view_mode: state.pagination().view_mode(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn categories() -> Vec<Category> {
        vec![
            Category::new("seating", "Seating"),
            Category::new("lounge", "Lounge Seating").child_of("seating"),
            Category::new("lighting", "Lighting"),
        ]
    }

    #[test]
    fn rejects_products_in_unknown_categories() {
        let err = Catalog::new(categories(), vec![Product::new("p1", "spa", "Towel Rack")]).unwrap_err();
        assert_eq!(
            err,
            DomainError::validation("product `p1` references unknown category `spa`")
        );
    }

    #[test]
    fn rejects_duplicate_and_unnamed_products() {
        let dup = vec![
            Product::new("p1", "seating", "Chair"),
            Product::new("p1", "lighting", "Lamp"),
        ];
        assert!(matches!(Catalog::new(categories(), dup), Err(DomainError::Validation(_))));

        let blank = vec![Product::new("p2", "seating", "  ")];
        assert!(matches!(Catalog::new(categories(), blank), Err(DomainError::Validation(_))));
    }

    #[test]
    fn scoping_includes_descendants() {
        let catalog = Catalog::new(
            categories(),
            vec![
                Product::new("p1", "seating", "Bench"),
                Product::new("p2", "lounge", "Club Chair"),
                Product::new("p3", "lighting", "Floor Lamp"),
            ],
        )
        .unwrap();

        let ids = |v: Vec<&Product>| v.iter().map(|p| p.id.to_string()).collect::<Vec<_>>();
        assert_eq!(ids(catalog.products_in_category(Some(&"seating".into()))), vec!["p1", "p2"]);
        assert_eq!(ids(catalog.products_in_category(Some(&"lounge".into()))), vec!["p2"]);
        assert_eq!(catalog.products_in_category(None).len(), 3);
        assert_eq!(catalog.products_in_category(Some(&"nope".into())).len(), 3);
    }

    #[test]
    fn lookups() {
        let catalog = Catalog::new(categories(), vec![Product::new("p1", "seating", "Bench")]).unwrap();
        assert_eq!(catalog.product(&"p1".into()).map(|p| p.name.as_str()), Some("Bench"));
        assert!(catalog.product(&"p9".into()).is_none());
        assert_eq!(catalog.category(&"lounge".into()).unwrap().name, "Lounge Seating");
        assert!(matches!(catalog.category(&"x".into()), Err(DomainError::NotFound(_))));
        assert_eq!(catalog.forest()[0].total_product_count, 1);
    }

    #[test]
    fn malformed_json_is_a_validation_error() {
        assert!(matches!(Catalog::from_json("{ nope"), Err(DomainError::Validation(_))));
        let empty = Catalog::from_json("{}").unwrap();
        assert!(empty.tree().is_empty());
        assert!(empty.products().is_empty());
    }
}
