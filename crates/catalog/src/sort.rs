//! Result ordering for catalog listings.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use ffe_core::DomainError;

use crate::product::Product;

/// How a filtered listing is ordered. Every order is stable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    /// Input order, as delivered by the data layer.
    #[default]
    Default,
    /// Featured products first.
    Featured,
    NameAsc,
    NameDesc,
    /// By lower price bound; unpriced products last.
    PriceLowToHigh,
    /// By upper price bound; unpriced products last.
    PriceHighToLow,
    /// Most recent `created_at` first; undated products last.
    Newest,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Default => "default",
            SortOrder::Featured => "featured",
            SortOrder::NameAsc => "name-asc",
            SortOrder::NameDesc => "name-desc",
            SortOrder::PriceLowToHigh => "price-low-to-high",
            SortOrder::PriceHighToLow => "price-high-to-low",
            SortOrder::Newest => "newest",
        }
    }
}

impl core::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for SortOrder {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "default" | "" => Ok(SortOrder::Default),
            "featured" => Ok(SortOrder::Featured),
            "name-asc" | "name" => Ok(SortOrder::NameAsc),
            "name-desc" => Ok(SortOrder::NameDesc),
            "price-low-to-high" | "price-asc" => Ok(SortOrder::PriceLowToHigh),
            "price-high-to-low" | "price-desc" => Ok(SortOrder::PriceHighToLow),
            "newest" => Ok(SortOrder::Newest),
            other => Err(DomainError::validation(format!("unknown sort order `{other}`"))),
        }
    }
}

// `None` sorts after every `Some`, whichever direction the values go.
fn missing_last<T>(a: Option<T>, b: Option<T>, cmp: impl Fn(T, T) -> Ordering) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => cmp(a, b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Reorder `products` in place.
pub fn sort_products(products: &mut [&Product], order: SortOrder) {
    match order {
        SortOrder::Default => {}
        SortOrder::Featured => products.sort_by_key(|p| !p.is_featured),
        SortOrder::NameAsc => products.sort_by_cached_key(|p| p.name.to_lowercase()),
        SortOrder::NameDesc => {
            products.sort_by(|a, b| b.name.to_lowercase().cmp(&a.name.to_lowercase()))
        }
        SortOrder::PriceLowToHigh => products.sort_by(|a, b| {
            missing_last(a.price_span(), b.price_span(), |x, y| x.min.total_cmp(&y.min))
        }),
        SortOrder::PriceHighToLow => products.sort_by(|a, b| {
            missing_last(a.price_span(), b.price_span(), |x, y| y.max.total_cmp(&x.max))
        }),
        SortOrder::Newest => {
            products.sort_by(|a, b| missing_last(a.created_at, b.created_at, |x, y| y.cmp(&x)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn catalog() -> Vec<Product> {
        vec![
            Product {
                price_range: Some("$900 - $1,400".to_string()),
                created_at: Some(Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap()),
                ..Product::new("a", "c", "armchair")
            },
            Product {
                price_range: None,
                is_featured: true,
                ..Product::new("b", "c", "Banquette")
            },
            Product {
                price_range: Some("$150".to_string()),
                created_at: Some(Utc.with_ymd_and_hms(2025, 1, 9, 0, 0, 0).unwrap()),
                is_featured: true,
                ..Product::new("c", "c", "Côte Stool")
            },
            Product {
                price_range: Some("$400 - $2,000".to_string()),
                ..Product::new("d", "c", "Daybed")
            },
        ]
    }

    fn order_of(products: &[Product], order: SortOrder) -> Vec<&str> {
        let mut refs: Vec<&Product> = products.iter().collect();
        sort_products(&mut refs, order);
        refs.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn default_keeps_input_order() {
        assert_eq!(order_of(&catalog(), SortOrder::Default), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn featured_first_is_stable() {
        assert_eq!(order_of(&catalog(), SortOrder::Featured), vec!["b", "c", "a", "d"]);
    }

    #[test]
    fn names_compare_case_insensitively() {
        assert_eq!(order_of(&catalog(), SortOrder::NameAsc), vec!["a", "b", "c", "d"]);
        assert_eq!(order_of(&catalog(), SortOrder::NameDesc), vec!["d", "c", "b", "a"]);
    }

    #[test]
    fn price_orders_put_unpriced_last() {
        assert_eq!(order_of(&catalog(), SortOrder::PriceLowToHigh), vec!["c", "d", "a", "b"]);
        assert_eq!(order_of(&catalog(), SortOrder::PriceHighToLow), vec!["d", "a", "c", "b"]);
    }

    #[test]
    fn newest_puts_undated_last() {
        assert_eq!(order_of(&catalog(), SortOrder::Newest), vec!["c", "a", "b", "d"]);
    }

    #[test]
    fn parses_aliases() {
        assert_eq!("price-asc".parse::<SortOrder>().unwrap(), SortOrder::PriceLowToHigh);
        assert_eq!(SortOrder::PriceHighToLow.to_string(), "price-high-to-low");
        assert!("cheapest".parse::<SortOrder>().is_err());
    }
}
