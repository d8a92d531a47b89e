//! The cart data model.
//!
//! A [`Cart`] is an ordered list of [`LineItem`]s keyed by product id, with
//! at most one line per id: adding a product that is already present
//! increments its quantity instead of appending a second line. Totals are
//! always derived from the current items, never cached, so they cannot
//! drift from the line data.
//!
//! This module is pure data logic. Persistence and notifications live in
//! the storefront crate.

use serde::{Deserialize, Serialize};

use crate::types::{Price, ProductId};

/// A product as captured at the moment it is added to the cart.
///
/// The name, price, and image are snapshotted here; later catalog changes
/// do not retroactively affect lines already in a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDescriptor {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub image: String,
}

/// One product entry in the cart, with quantity.
///
/// Invariant: `quantity >= 1` for every line held by a [`Cart`]. A line
/// whose quantity would drop to zero is removed instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub image: String,
    pub quantity: u32,
}

impl LineItem {
    /// `price × quantity` for this line.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.quantity)
    }
}

impl From<ProductDescriptor> for LineItem {
    fn from(product: ProductDescriptor) -> Self {
        Self {
            id: product.id,
            name: product.name,
            price: product.price,
            image: product.image,
            quantity: 1,
        }
    }
}

/// Outcome of [`Cart::update_quantity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    /// The line now holds this quantity.
    Updated(u32),
    /// The quantity dropped to zero or below and the line was removed.
    Removed,
    /// No line with the given id exists; nothing changed.
    NotFound,
}

/// Read-only derived view of the cart for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartSnapshot {
    pub items: Vec<LineItem>,
    pub total_item_count: u64,
    pub total_price: Price,
}

/// The ordered collection of line items for one visitor.
///
/// Serializes as a bare JSON array of line items, which is also the
/// persisted representation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from stored line items, repairing invariant violations
    /// left behind by older or foreign writers: lines with a zero quantity
    /// are dropped, and duplicate ids are merged into the first occurrence.
    #[must_use]
    pub fn from_items(items: Vec<LineItem>) -> Self {
        let mut cart = Self::default();
        for item in items {
            if item.quantity == 0 {
                continue;
            }
            match cart.items.iter_mut().find(|held| held.id == item.id) {
                Some(held) => held.quantity = held.quantity.saturating_add(item.quantity),
                None => cart.items.push(item),
            }
        }
        cart
    }

    /// The current line items, in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Whether the cart holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct lines (not units).
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Add one unit of `product`.
    ///
    /// If a line with the product's id already exists its quantity is
    /// incremented and its captured name/price/image are left untouched;
    /// otherwise a new line with quantity 1 is appended. Returns the
    /// resulting quantity of the affected line.
    pub fn add(&mut self, product: ProductDescriptor) -> u32 {
        if let Some(item) = self.items.iter_mut().find(|item| item.id == product.id) {
            item.quantity = item.quantity.saturating_add(1);
            return item.quantity;
        }
        self.items.push(LineItem::from(product));
        1
    }

    /// Adjust the quantity of the line with `id` by `delta`.
    ///
    /// A resulting quantity of zero or below removes the line entirely.
    /// An unknown id is a no-op reported as [`QuantityChange::NotFound`].
    pub fn update_quantity(&mut self, id: ProductId, delta: i64) -> QuantityChange {
        let Some(index) = self.items.iter().position(|item| item.id == id) else {
            return QuantityChange::NotFound;
        };

        let updated = match self.items.get(index) {
            Some(item) => i64::from(item.quantity).saturating_add(delta),
            None => return QuantityChange::NotFound,
        };

        if updated <= 0 {
            self.items.remove(index);
            return QuantityChange::Removed;
        }

        let quantity = u32::try_from(updated).unwrap_or(u32::MAX);
        if let Some(item) = self.items.get_mut(index) {
            item.quantity = quantity;
        }
        QuantityChange::Updated(quantity)
    }

    /// Delete the line with `id`, returning it when present.
    ///
    /// An unknown id is a no-op and returns `None`.
    pub fn remove(&mut self, id: ProductId) -> Option<LineItem> {
        let index = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(index))
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn total_item_count(&self) -> u64 {
        self.items
            .iter()
            .map(|item| u64::from(item.quantity))
            .sum()
    }

    /// Total price across all lines, recomputed from the items.
    #[must_use]
    pub fn total_price(&self) -> Price {
        self.items.iter().map(LineItem::line_total).sum()
    }

    /// Read-only projection of the cart for display.
    #[must_use]
    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            items: self.items.clone(),
            total_item_count: self.total_item_count(),
            total_price: self.total_price(),
        }
    }
}

impl<'de> Deserialize<'de> for Cart {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let items = Vec::<LineItem>::deserialize(deserializer)?;
        Ok(Self::from_items(items))
    }
}
