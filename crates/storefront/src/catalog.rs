//! Product catalog loaded from static content at startup.
//!
//! The storefront's product list is content, not runtime data: it ships as
//! a JSON file read once when the service starts. Filtering, searching, and
//! sorting all operate on the in-memory list; every sort is stable so that
//! products with equal keys keep their catalog (featured) order.

use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use terracotta_core::{Price, ProductDescriptor, ProductId};

/// Errors that can occur while loading the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("failed to read catalog file {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The catalog file is not valid catalog JSON.
    #[error("failed to parse catalog file {path}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// Two catalog entries share a product id.
    #[error("duplicate product id {0} in catalog")]
    DuplicateId(ProductId),
}

/// One product in the catalog.
///
/// Catalog order doubles as the "featured" sort order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogProduct {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Price,
    pub image: String,
    pub category: String,
}

impl CatalogProduct {
    /// Descriptor capturing this product for an add-to-cart, with the
    /// current name/price/image snapshotted.
    #[must_use]
    pub fn descriptor(&self) -> ProductDescriptor {
        ProductDescriptor {
            id: self.id,
            name: self.name.clone(),
            price: self.price,
            image: self.image.clone(),
        }
    }
}

/// Sort orders offered on the products page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Catalog order; the default, and the fallback for unknown keys.
    #[default]
    Featured,
    PriceLowToHigh,
    PriceHighToLow,
    /// Case-insensitive by product name.
    Name,
}

impl SortKey {
    /// Parse a query-string sort key. Unknown values fall back to featured.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "price-low" => Self::PriceLowToHigh,
            "price-high" => Self::PriceHighToLow,
            "name" => Self::Name,
            _ => Self::Featured,
        }
    }
}

/// Filter criteria for the product listing.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    /// Exact category match (case-insensitive); `None` matches everything.
    pub category: Option<String>,
    /// Case-insensitive substring over name, category, and description.
    pub query: Option<String>,
    /// Inclusive lower price bound.
    pub price_min: Option<Decimal>,
    /// Inclusive upper price bound.
    pub price_max: Option<Decimal>,
}

impl ProductFilter {
    /// Whether `product` satisfies every set criterion.
    #[must_use]
    pub fn matches(&self, product: &CatalogProduct) -> bool {
        if let Some(category) = &self.category {
            if !product.category.eq_ignore_ascii_case(category) {
                return false;
            }
        }

        if let Some(query) = &self.query {
            let needle = query.to_lowercase();
            let found = product.name.to_lowercase().contains(&needle)
                || product.category.to_lowercase().contains(&needle)
                || product.description.to_lowercase().contains(&needle);
            if !found {
                return false;
            }
        }

        if let Some(min) = self.price_min {
            if product.price.amount() < min {
                return false;
            }
        }

        if let Some(max) = self.price_max {
            if product.price.amount() > max {
                return false;
            }
        }

        true
    }
}

/// The product catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<CatalogProduct>,
}

impl Catalog {
    /// Load the catalog from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid catalog
    /// JSON, or contains duplicate product ids.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let display_path = path.display().to_string();
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: display_path.clone(),
            source,
        })?;
        let products: Vec<CatalogProduct> =
            serde_json::from_str(&raw).map_err(|source| CatalogError::Parse {
                path: display_path,
                source,
            })?;
        Self::from_products(products)
    }

    /// Build a catalog from already-parsed products.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateId`] if two products share an id.
    pub fn from_products(products: Vec<CatalogProduct>) -> Result<Self, CatalogError> {
        let mut seen = std::collections::HashSet::new();
        for product in &products {
            if !seen.insert(product.id) {
                return Err(CatalogError::DuplicateId(product.id));
            }
        }
        Ok(Self { products })
    }

    /// All products in catalog (featured) order.
    #[must_use]
    pub fn products(&self) -> &[CatalogProduct] {
        &self.products
    }

    /// Look up a product by id.
    #[must_use]
    pub fn get(&self, id: ProductId) -> Option<&CatalogProduct> {
        self.products.iter().find(|product| product.id == id)
    }

    /// Products matching `filter`, ordered by `sort`.
    #[must_use]
    pub fn filtered(&self, filter: &ProductFilter, sort: SortKey) -> Vec<&CatalogProduct> {
        let mut selected: Vec<&CatalogProduct> = self
            .products
            .iter()
            .filter(|product| filter.matches(product))
            .collect();

        match sort {
            SortKey::Featured => {}
            SortKey::PriceLowToHigh => selected.sort_by(|a, b| a.price.cmp(&b.price)),
            SortKey::PriceHighToLow => selected.sort_by(|a, b| b.price.cmp(&a.price)),
            SortKey::Name => {
                selected.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
            }
        }

        selected
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn product(id: i64, name: &str, price: &str, category: &str) -> CatalogProduct {
        CatalogProduct {
            id: ProductId::new(id),
            name: name.to_owned(),
            description: format!("A lovely {}", name.to_lowercase()),
            price: Price::parse(price).unwrap(),
            image: format!("/static/images/{}.jpg", name.to_lowercase()),
            category: category.to_owned(),
        }
    }

    fn catalog() -> Catalog {
        Catalog::from_products(vec![
            product(1, "Glazed Mug", "9.99", "ceramics"),
            product(2, "Linen Napkin Set", "24.00", "textiles"),
            product(3, "Serving Bowl", "32.50", "ceramics"),
            product(4, "Terracotta Planter", "18.00", "decor"),
            product(5, "Bud Vase", "9.99", "decor"),
        ])
        .unwrap()
    }

    fn ids(products: &[&CatalogProduct]) -> Vec<i64> {
        products.iter().map(|p| p.id.as_i64()).collect()
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let result = Catalog::from_products(vec![
            product(1, "Glazed Mug", "9.99", "ceramics"),
            product(1, "Bud Vase", "9.99", "decor"),
        ]);
        assert!(matches!(result, Err(CatalogError::DuplicateId(_))));
    }

    #[test]
    fn test_get_by_id() {
        let catalog = catalog();
        assert_eq!(catalog.get(ProductId::new(3)).unwrap().name, "Serving Bowl");
        assert!(catalog.get(ProductId::new(99)).is_none());
    }

    #[test]
    fn test_no_filter_keeps_catalog_order() {
        let catalog = catalog();
        let all = catalog.filtered(&ProductFilter::default(), SortKey::Featured);
        assert_eq!(ids(&all), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_filter_by_category() {
        let catalog = catalog();
        let filter = ProductFilter {
            category: Some("ceramics".to_owned()),
            ..ProductFilter::default()
        };
        assert_eq!(ids(&catalog.filtered(&filter, SortKey::Featured)), vec![1, 3]);
    }

    #[test]
    fn test_search_matches_description() {
        let catalog = catalog();
        let filter = ProductFilter {
            query: Some("NAPKIN".to_owned()),
            ..ProductFilter::default()
        };
        assert_eq!(ids(&catalog.filtered(&filter, SortKey::Featured)), vec![2]);
    }

    #[test]
    fn test_price_range_is_inclusive() {
        let catalog = catalog();
        let filter = ProductFilter {
            price_min: Some(Decimal::new(999, 2)),
            price_max: Some(Decimal::new(2400, 2)),
            ..ProductFilter::default()
        };
        assert_eq!(
            ids(&catalog.filtered(&filter, SortKey::Featured)),
            vec![1, 2, 4, 5]
        );
    }

    #[test]
    fn test_sort_price_low_is_stable() {
        let catalog = catalog();
        let sorted = catalog.filtered(&ProductFilter::default(), SortKey::PriceLowToHigh);
        // Products 1 and 5 share a price; catalog order breaks the tie.
        assert_eq!(ids(&sorted), vec![1, 5, 4, 2, 3]);
    }

    #[test]
    fn test_sort_price_high() {
        let catalog = catalog();
        let sorted = catalog.filtered(&ProductFilter::default(), SortKey::PriceHighToLow);
        assert_eq!(ids(&sorted), vec![3, 2, 4, 1, 5]);
    }

    #[test]
    fn test_sort_name_case_insensitive() {
        let catalog = Catalog::from_products(vec![
            product(1, "terracotta Planter", "18.00", "decor"),
            product(2, "Bud Vase", "9.99", "decor"),
            product(3, "Serving Bowl", "32.50", "ceramics"),
        ])
        .unwrap();
        let sorted = catalog.filtered(&ProductFilter::default(), SortKey::Name);
        assert_eq!(ids(&sorted), vec![2, 3, 1]);
    }

    #[test]
    fn test_unknown_sort_key_falls_back_to_featured() {
        assert_eq!(SortKey::parse("price-low"), SortKey::PriceLowToHigh);
        assert_eq!(SortKey::parse("price-high"), SortKey::PriceHighToLow);
        assert_eq!(SortKey::parse("name"), SortKey::Name);
        assert_eq!(SortKey::parse("featured"), SortKey::Featured);
        assert_eq!(SortKey::parse("definitely-not-a-sort"), SortKey::Featured);
    }

    #[test]
    fn test_descriptor_snapshots_product() {
        let catalog = catalog();
        let descriptor = catalog.get(ProductId::new(1)).unwrap().descriptor();
        assert_eq!(descriptor.name, "Glazed Mug");
        assert_eq!(descriptor.price, Price::parse("9.99").unwrap());
    }

    #[test]
    fn test_load_shipped_catalog() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("content/products.json");
        let catalog = Catalog::load(&path).unwrap();
        assert!(!catalog.products().is_empty());
    }
}
