//! Cart route handlers.
//!
//! Every mutation responds with the refreshed cart view, an optional
//! human-readable notification for the toast UI, and an
//! `HX-Trigger: cart-updated` header so badge and panel consumers know to
//! refresh without a full page reload.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    response::{AppendHeaders, IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use terracotta_core::{CartSnapshot, LineItem, Price, ProductDescriptor, ProductId};

use crate::error::AppError;
use crate::services::CartStore;

/// Cart line display data.
#[derive(Debug, Clone, Serialize)]
pub struct CartItemView {
    pub id: i64,
    pub name: String,
    pub price: String,
    pub line_price: String,
    pub quantity: u32,
    pub image: String,
}

impl From<&LineItem> for CartItemView {
    fn from(item: &LineItem) -> Self {
        Self {
            id: item.id.as_i64(),
            name: item.name.clone(),
            price: item.price.to_string(),
            line_price: item.line_total().to_string(),
            quantity: item.quantity,
            image: item.image.clone(),
        }
    }
}

/// Cart display data.
#[derive(Debug, Clone, Serialize)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub item_count: u64,
    pub subtotal: String,
}

impl From<&CartSnapshot> for CartView {
    fn from(snapshot: &CartSnapshot) -> Self {
        Self {
            items: snapshot.items.iter().map(CartItemView::from).collect(),
            item_count: snapshot.total_item_count,
            subtotal: snapshot.total_price.to_string(),
        }
    }
}

/// Response to a cart mutation: the refreshed cart plus the notification.
#[derive(Debug, Serialize)]
pub struct CartResponse {
    pub cart: CartView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<String>,
}

/// Add-to-cart request body.
///
/// This is the product descriptor carried by add-to-cart buttons; the
/// price travels as a decimal string (`"9.99"`).
#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    pub id: i64,
    pub name: String,
    pub price: String,
    #[serde(default)]
    pub image: String,
}

impl AddToCartRequest {
    /// Validate the raw descriptor into a typed product.
    fn into_descriptor(self) -> Result<ProductDescriptor, String> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err("product name is required".to_owned());
        }

        let price =
            Price::parse(&self.price).map_err(|e| format!("invalid product price: {e}"))?;

        Ok(ProductDescriptor {
            id: ProductId::new(self.id),
            name: name.to_owned(),
            price,
            image: self.image,
        })
    }
}

/// Update-quantity request body.
#[derive(Debug, Deserialize)]
pub struct UpdateCartRequest {
    pub id: i64,
    /// Signed change applied to the held quantity.
    pub delta: i64,
}

/// Remove-from-cart request body.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartRequest {
    pub id: i64,
}

/// Cart count badge data.
#[derive(Debug, Serialize)]
pub struct CartCount {
    pub count: u64,
}

/// Checkout stub response.
#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub ready: bool,
    pub notification: String,
}

/// Attach the display-refresh trigger header consumed by cart badge and
/// panel fragments.
fn cart_updated(response: CartResponse) -> Response {
    (AppendHeaders([("HX-Trigger", "cart-updated")]), Json(response)).into_response()
}

/// Display the current cart snapshot.
#[instrument(skip(session))]
pub async fn show(session: Session) -> Json<CartView> {
    let store = CartStore::load(session).await;
    Json(CartView::from(&store.snapshot()))
}

/// Add an item to the cart.
///
/// Malformed descriptors are rejected with 400 and logged; they never
/// disturb the stored cart.
#[instrument(skip(session, body))]
pub async fn add(
    session: Session,
    body: Result<Json<AddToCartRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(request) = body.map_err(|e| {
        tracing::warn!(error = %e, "Rejected unreadable add-to-cart payload");
        AppError::BadRequest("malformed product descriptor".to_owned())
    })?;

    let product = request.into_descriptor().map_err(|reason| {
        tracing::warn!(%reason, "Rejected invalid add-to-cart descriptor");
        AppError::BadRequest(reason)
    })?;

    let mut store = CartStore::load(session).await;
    let notification = store.add(product).await;

    Ok(cart_updated(CartResponse {
        cart: CartView::from(&store.snapshot()),
        notification: Some(notification),
    }))
}

/// Update a cart line's quantity by a signed delta.
///
/// A drop to zero or below removes the line; unknown ids are a no-op.
#[instrument(skip(session))]
pub async fn update(session: Session, Json(request): Json<UpdateCartRequest>) -> Response {
    let mut store = CartStore::load(session).await;
    let notification = store
        .update_quantity(ProductId::new(request.id), request.delta)
        .await;

    cart_updated(CartResponse {
        cart: CartView::from(&store.snapshot()),
        notification,
    })
}

/// Remove an item from the cart. Unknown ids are a no-op.
#[instrument(skip(session))]
pub async fn remove(session: Session, Json(request): Json<RemoveFromCartRequest>) -> Response {
    let mut store = CartStore::load(session).await;
    let notification = store.remove(ProductId::new(request.id)).await;

    cart_updated(CartResponse {
        cart: CartView::from(&store.snapshot()),
        notification,
    })
}

/// Get the cart count badge value.
#[instrument(skip(session))]
pub async fn count(session: Session) -> Json<CartCount> {
    let store = CartStore::load(session).await;
    Json(CartCount {
        count: store.total_item_count(),
    })
}

/// Checkout stub.
///
/// There is no payment integration behind this endpoint; it only reports
/// whether checkout can begin for the current cart.
#[instrument(skip(session))]
pub async fn checkout(session: Session) -> Json<CheckoutResponse> {
    let store = CartStore::load(session).await;

    if store.is_empty() {
        Json(CheckoutResponse {
            ready: false,
            notification: "Your cart is empty".to_owned(),
        })
    } else {
        Json(CheckoutResponse {
            ready: true,
            notification: "Proceeding to checkout...".to_owned(),
        })
    }
}
