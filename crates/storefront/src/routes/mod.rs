//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Health check (registered in main)
//!
//! # Products
//! GET  /products               - Product listing (filter/sort/search query params)
//! GET  /products/{id}          - Product detail
//!
//! # Cart (JSON fragments)
//! GET  /cart                   - Cart snapshot
//! POST /cart/add               - Add product descriptor (triggers cart-updated)
//! POST /cart/update            - Update quantity by delta
//! POST /cart/remove            - Remove item
//! GET  /cart/count             - Cart count badge value
//!
//! # Checkout
//! GET  /checkout               - Checkout stub
//!
//! # Forms
//! POST /contact                - Contact form submission (logged, not mailed)
//! POST /newsletter/subscribe   - Newsletter signup (logged, not mailed)
//! ```

pub mod cart;
pub mod contact;
pub mod newsletter;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/count", get(cart::count))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Product routes
        .nest("/products", product_routes())
        // Cart routes
        .nest("/cart", cart_routes())
        // Checkout stub
        .route("/checkout", get(cart::checkout))
        // Contact form
        .route("/contact", post(contact::submit))
        // Newsletter signup
        .route("/newsletter/subscribe", post(newsletter::subscribe))
}
