//! Filter-panel options derived from a product list.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::price::PriceRange;
use crate::product::{Availability, Product};

/// One selectable value and how many products carry it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetValue {
    pub value: String,
    pub count: usize,
}

/// Distinct attribute values present in a product list.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Facets {
    pub materials: Vec<FacetValue>,
    pub colors: Vec<FacetValue>,
    pub tags: Vec<FacetValue>,
    pub availability: Vec<(Availability, usize)>,
    /// Span covering every parsable price; seeds the price slider.
    pub price_bounds: Option<PriceRange>,
}

fn tally<'a>(values: impl Iterator<Item = &'a [String]>) -> Vec<FacetValue> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for product_values in values {
        let mut seen: Vec<&str> = Vec::new();
        for value in product_values {
            // A product listing "oak" twice still counts once.
            if !seen.contains(&value.as_str()) {
                seen.push(value.as_str());
                *counts.entry(value.as_str()).or_default() += 1;
            }
        }
    }
    counts
        .into_iter()
        .map(|(value, count)| FacetValue { value: value.to_string(), count })
        .collect()
}

impl Facets {
    pub fn collect<'a, I>(products: I) -> Self
    where
        I: IntoIterator<Item = &'a Product>,
        I::IntoIter: Clone,
    {
        let products = products.into_iter();

        let mut availability: BTreeMap<Availability, usize> = BTreeMap::new();
        let mut price_bounds: Option<PriceRange> = None;
        for product in products.clone() {
            *availability.entry(product.availability).or_default() += 1;
            if let Some(span) = product.price_span() {
                price_bounds = Some(match price_bounds {
                    Some(bounds) => bounds.union(&span),
                    None => span,
                });
            }
        }

        Self {
            materials: tally(products.clone().map(|p| p.materials.as_slice())),
            colors: tally(products.clone().map(|p| p.colors.as_slice())),
            tags: tally(products.map(|p| p.tags.as_slice())),
            availability: availability.into_iter().collect(),
            price_bounds,
        }
    }
}
