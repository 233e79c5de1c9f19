//! Product filter engine.
//!
//! A [`FilterState`] is a conjunction of predicates, one per dimension. A
//! dimension with an empty or unset value is inactive and accepts everything.
//! Within a multi-value dimension (materials, colors, tags, availability) any
//! selected value is enough.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use ffe_core::ValueObject;

use crate::price::PriceRange;
use crate::product::{Availability, Product};

/// Current filter selections for a catalog page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterState {
    pub search: String,
    pub materials: BTreeSet<String>,
    pub colors: BTreeSet<String>,
    pub tags: BTreeSet<String>,
    pub availability: BTreeSet<Availability>,
    /// Inclusive bounds; `None` leaves price unconstrained.
    pub price_range: Option<PriceRange>,
    pub featured_only: bool,
}

impl ValueObject for FilterState {}

fn toggle<T: Ord>(set: &mut BTreeSet<T>, value: T) {
    if !set.remove(&value) {
        set.insert(value);
    }
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, query: impl Into<String>) -> Self {
        self.search = query.into();
        self
    }

    pub fn with_material(mut self, material: impl Into<String>) -> Self {
        self.materials.insert(material.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.colors.insert(color.into());
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    pub fn with_availability(mut self, status: Availability) -> Self {
        self.availability.insert(status);
        self
    }

    pub fn with_price_range(mut self, min: f64, max: f64) -> Self {
        self.price_range = Some(PriceRange::new(min, max));
        self
    }

    pub fn with_featured_only(mut self, featured_only: bool) -> Self {
        self.featured_only = featured_only;
        self
    }

    /// Checkbox semantics: select if absent, deselect if present.
    pub fn toggle_material(mut self, material: impl Into<String>) -> Self {
        toggle(&mut self.materials, material.into());
        self
    }

    pub fn toggle_color(mut self, color: impl Into<String>) -> Self {
        toggle(&mut self.colors, color.into());
        self
    }

    pub fn toggle_tag(mut self, tag: impl Into<String>) -> Self {
        toggle(&mut self.tags, tag.into());
        self
    }

    pub fn toggle_availability(mut self, status: Availability) -> Self {
        toggle(&mut self.availability, status);
        self
    }

    /// Reset every dimension.
    pub fn clear(self) -> Self {
        Self::default()
    }

    fn normalized_query(&self) -> Option<String> {
        let query = self.search.trim();
        (!query.is_empty()).then(|| query.to_lowercase())
    }

    /// Number of dimensions that currently constrain results.
    pub fn active_filter_count(&self) -> usize {
        [
            self.normalized_query().is_some(),
            !self.materials.is_empty(),
            !self.colors.is_empty(),
            !self.tags.is_empty(),
            !self.availability.is_empty(),
            self.price_range.is_some(),
            self.featured_only,
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }

    pub fn is_active(&self) -> bool {
        self.active_filter_count() > 0
    }

    /// True when every active predicate holds for `product`.
    pub fn matches(&self, product: &Product) -> bool {
        self.matches_query(self.normalized_query().as_deref(), product)
    }

    fn matches_query(&self, query: Option<&str>, product: &Product) -> bool {
        query.is_none_or(|q| product.search_text().contains(q))
            && (!self.featured_only || product.is_featured)
            && intersects(&self.materials, &product.materials)
            && intersects(&self.colors, &product.colors)
            && intersects(&self.tags, &product.tags)
            && (self.availability.is_empty() || self.availability.contains(&product.availability))
            && self.matches_price(product)
    }

    // Unknown prices are never excluded.
    fn matches_price(&self, product: &Product) -> bool {
        match (self.price_range, product.price_span()) {
            (Some(wanted), Some(span)) => span.overlaps(&wanted),
            _ => true,
        }
    }
}

fn intersects(selected: &BTreeSet<String>, values: &[String]) -> bool {
    selected.is_empty() || values.iter().any(|v| selected.contains(v))
}

/// Keep the products that satisfy `state`, in their original order.
pub fn filter_products<'a, I>(products: I, state: &FilterState) -> Vec<&'a Product>
where
    I: IntoIterator<Item = &'a Product>,
{
    let query = state.normalized_query();
    let mut total = 0usize;
    let kept: Vec<&Product> = products
        .into_iter()
        .inspect(|_| total += 1)
        .filter(|p| state.matches_query(query.as_deref(), p))
        .collect();
    debug!(total, kept = kept.len(), active = state.active_filter_count(), "filtered products");
    kept
}

/// Counts for a "showing N of M" line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSummary {
    /// Products considered (after category scoping).
    pub total: usize,
    /// Products that passed the filters.
    pub filtered: usize,
    pub is_filtered: bool,
    pub active_filters: usize,
}

impl FilterSummary {
    pub fn new(total: usize, filtered: usize, state: &FilterState) -> Self {
        let active_filters = state.active_filter_count();
        Self {
            total,
            filtered,
            is_filtered: active_filters > 0,
            active_filters,
        }
    }
}
