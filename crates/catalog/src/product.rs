use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use ffe_core::{CategoryId, DomainError, Entity, ProductId};

use crate::price::{PriceRange, parse_price_range};

/// Stock availability of a product.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    #[default]
    InStock,
    OutOfStock,
    PreOrder,
    Discontinued,
}

impl Availability {
    pub const ALL: [Availability; 4] = [
        Availability::InStock,
        Availability::OutOfStock,
        Availability::PreOrder,
        Availability::Discontinued,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Availability::InStock => "in_stock",
            Availability::OutOfStock => "out_of_stock",
            Availability::PreOrder => "pre_order",
            Availability::Discontinued => "discontinued",
        }
    }
}

impl core::fmt::Display for Availability {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for Availability {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "in_stock" => Ok(Availability::InStock),
            "out_of_stock" => Ok(Availability::OutOfStock),
            "pre_order" | "preorder" => Ok(Availability::PreOrder),
            "discontinued" => Ok(Availability::Discontinued),
            other => Err(DomainError::validation(format!(
                "unknown availability `{other}` (expected in_stock, out_of_stock, pre_order, discontinued)"
            ))),
        }
    }
}

/// Catalog product as supplied by the data-loading layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub category_id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub sku: Option<String>,
    /// Free-text price such as `"$500 - $800"` or `"From $1,200"`.
    #[serde(default)]
    pub price_range: Option<String>,
    #[serde(default)]
    pub materials: Vec<String>,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, alias = "availabilityStatus")]
    pub availability: Availability,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Minimal product: in stock, not featured, no price or attributes.
    pub fn new(id: impl Into<ProductId>, category_id: impl Into<CategoryId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            category_id: category_id.into(),
            name: name.into(),
            description: String::new(),
            sku: None,
            price_range: None,
            materials: Vec::new(),
            colors: Vec::new(),
            tags: Vec::new(),
            availability: Availability::default(),
            is_featured: false,
            created_at: None,
        }
    }

    /// Numeric span parsed out of `price_range`, if it has any digits.
    pub fn price_span(&self) -> Option<PriceRange> {
        self.price_range.as_deref().and_then(parse_price_range)
    }

    /// Lowercased text the free-text search runs against.
    pub fn search_text(&self) -> String {
        let mut parts: Vec<&str> = vec![self.name.as_str(), self.description.as_str()];
        if let Some(sku) = &self.sku {
            parts.push(sku.as_str());
        }
        parts.extend(self.materials.iter().map(String::as_str));
        parts.extend(self.tags.iter().map(String::as_str));
        parts.join(" ").to_lowercase()
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_storefront_payload() {
        let json = r#"{
            "id": "p-1",
            "categoryId": "seating",
            "name": "Lobby Sofa",
            "priceRange": "$500 - $800",
            "materials": ["wood", "velvet"],
            "availability": "pre_order",
            "isFeatured": true
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id.as_str(), "p-1");
        assert_eq!(product.category_id.as_str(), "seating");
        assert_eq!(product.availability, Availability::PreOrder);
        assert!(product.is_featured);
        assert!(product.tags.is_empty());
        assert_eq!(product.price_span(), Some(PriceRange::new(500.0, 800.0)));
    }

    #[test]
    fn availability_parses_loose_spellings() {
        assert_eq!("In-Stock".parse::<Availability>().unwrap(), Availability::InStock);
        assert_eq!("preorder".parse::<Availability>().unwrap(), Availability::PreOrder);
        assert!("sold".parse::<Availability>().is_err());
        assert_eq!(Availability::OutOfStock.to_string(), "out_of_stock");
    }

    #[test]
    fn search_text_covers_sku_materials_and_tags() {
        let product = Product {
            sku: Some("GR-118".to_string()),
            materials: vec!["Walnut".to_string()],
            tags: vec!["Boutique".to_string()],
            ..Product::new("p-2", "casegoods", "Nightstand")
        };

        let text = product.search_text();
        assert!(text.contains("gr-118"));
        assert!(text.contains("walnut"));
        assert!(text.contains("boutique"));
        assert!(!text.contains("casegoods"));
    }
}
