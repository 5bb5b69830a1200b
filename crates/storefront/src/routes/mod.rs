//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check
//!
//! # Catalog
//! GET  /melons                 - All melons
//! GET  /melon/{id}             - Melon detail
//!
//! # Cart
//! GET  /cart                   - Cart page with totals
//! GET  /add_to_cart/{id}       - Add one melon, redirect to /cart
//! POST /add_to_cart/{id}       - Same, for the detail page form
//! GET  /checkout               - Login-gated checkout stub
//!
//! # Customers
//! GET  /login                  - Login page
//! POST /login                  - Login action
//! GET  /logout                 - Logout action
//! GET  /signup                 - Signup page
//! POST /signup                 - Signup action
//! ```

pub mod auth;
pub mod cart;
pub mod health;
pub mod home;
pub mod melons;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Create the catalog routes router.
pub fn melon_routes() -> Router<AppState> {
    Router::new()
        .route("/melons", get(melons::index))
        .route("/melon/{id}", get(melons::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/cart", get(cart::show))
        .route("/add_to_cart/{id}", get(cart::add).post(cart::add))
        .route("/checkout", get(cart::checkout))
}

/// Create the customer auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", get(auth::logout))
        .route("/signup", get(auth::signup_page).post(auth::signup))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .merge(melon_routes())
        .merge(cart_routes())
        .merge(auth_routes())
}
