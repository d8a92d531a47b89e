//! Product route handlers.
//!
//! The listing endpoint mirrors the filter bar on the products page:
//! category buttons, a sort select, free-text search, and a price-range
//! filter, all applied to the static catalog.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::instrument;

use terracotta_core::ProductId;

use crate::catalog::{CatalogProduct, ProductFilter, SortKey};
use crate::error::AppError;
use crate::state::AppState;

/// Deserialize empty strings as None for optional numeric fields.
fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        None => Ok(None),
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s.trim().parse().map(Some).map_err(serde::de::Error::custom),
    }
}

/// Product listing query parameters.
#[derive(Debug, Deserialize)]
pub struct ProductListQuery {
    /// Category filter; absent or `all` shows everything.
    #[serde(default)]
    pub category: Option<String>,
    /// Sort key: `featured`, `price-low`, `price-high`, or `name`.
    #[serde(default)]
    pub sort: Option<String>,
    /// Free-text search over name, category, and description.
    #[serde(default)]
    pub q: Option<String>,
    /// Inclusive lower price bound (dollars).
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub price_min: Option<Decimal>,
    /// Inclusive upper price bound (dollars).
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub price_max: Option<Decimal>,
}

/// Product display data.
#[derive(Debug, Clone, Serialize)]
pub struct ProductView {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: String,
    pub image: String,
    pub category: String,
}

impl From<&CatalogProduct> for ProductView {
    fn from(product: &CatalogProduct) -> Self {
        Self {
            id: product.id.as_i64(),
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price.to_string(),
            image: product.image.clone(),
            category: product.category.clone(),
        }
    }
}

/// Product listing response.
#[derive(Debug, Serialize)]
pub struct ProductListResponse {
    pub products: Vec<ProductView>,
    pub count: usize,
    /// Listing header label, e.g. "Showing 8 products".
    pub summary: String,
}

/// Display the product listing.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ProductListQuery>,
) -> Json<ProductListResponse> {
    let filter = ProductFilter {
        category: query
            .category
            .filter(|category| !category.is_empty() && category != "all"),
        query: query.q.filter(|q| !q.trim().is_empty()),
        price_min: query.price_min,
        price_max: query.price_max,
    };
    let sort = query.sort.as_deref().map(SortKey::parse).unwrap_or_default();

    let products: Vec<ProductView> = state
        .catalog()
        .filtered(&filter, sort)
        .into_iter()
        .map(ProductView::from)
        .collect();
    let count = products.len();

    Json(ProductListResponse {
        products,
        count,
        summary: product_count_summary(count),
    })
}

/// Display a single product.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ProductView>, AppError> {
    let product = state
        .catalog()
        .get(ProductId::new(id))
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    Ok(Json(ProductView::from(product)))
}

/// "Showing N product(s)" label used by the listing header.
fn product_count_summary(count: usize) -> String {
    let noun = if count == 1 { "product" } else { "products" };
    format!("Showing {count} {noun}")
}
