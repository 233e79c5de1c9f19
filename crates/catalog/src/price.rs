//! Numeric price spans and parsing of free-text price labels.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use ffe_core::ValueObject;

// Either a comma-grouped number ("1,250.00") or a plain one ("800", "12.5").
static PRICE_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d{1,3}(?:,\d{3})+(?:\.\d+)?|\d+(?:\.\d+)?").expect("price token pattern is valid")
});

/// Inclusive numeric price span.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "PriceBounds")]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

/// Wire form; deserialized spans go through [`PriceRange::new`].
#[derive(Deserialize)]
struct PriceBounds {
    min: f64,
    max: f64,
}

impl From<PriceBounds> for PriceRange {
    fn from(bounds: PriceBounds) -> Self {
        PriceRange::new(bounds.min, bounds.max)
    }
}

impl ValueObject for PriceRange {}

impl PriceRange {
    /// Build a span; bounds given in the wrong order are swapped.
    pub fn new(min: f64, max: f64) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    /// True unless one span lies entirely outside the other.
    pub fn overlaps(&self, other: &PriceRange) -> bool {
        self.max >= other.min && self.min <= other.max
    }

    /// Smallest span covering both.
    pub fn union(&self, other: &PriceRange) -> PriceRange {
        PriceRange {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }
}

/// Extract the numeric span from a price label such as `"$500 - $800"`.
///
/// Every numeric token in the label is considered; the span runs from the
/// smallest to the largest. Returns `None` when the label has no digits, which
/// callers treat as "price unknown".
pub fn parse_price_range(label: &str) -> Option<PriceRange> {
    let mut span: Option<PriceRange> = None;
    for token in PRICE_TOKEN.find_iter(label) {
        let Ok(value) = token.as_str().replace(',', "").parse::<f64>() else {
            continue;
        };
        let point = PriceRange { min: value, max: value };
        span = Some(match span {
            Some(acc) => acc.union(&point),
            None => point,
        });
    }
    span
}
