//! Layout context shared by every rendered page.

use axum::{extract::FromRequestParts, http::request::Parts};
use tower_sessions::Session;

use super::auth::current_customer;
use super::flash::{Flash, take_flashes};
use crate::models::CurrentCustomer;
use crate::services::cart::load_cart;

/// Data the base layout needs: pending flashes, the logged-in customer and
/// the cart badge count.
///
/// Extracting this drains the flash queue, so only extract it in handlers
/// that render a page.
#[derive(Debug, Clone, Default)]
pub struct PageContext {
    pub flashes: Vec<Flash>,
    pub customer: Option<CurrentCustomer>,
    pub cart_count: u32,
}

impl<S> FromRequestParts<S> for PageContext
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(session) = parts.extensions.get::<Session>() else {
            return Ok(Self::default());
        };

        let flashes = take_flashes(session).await.unwrap_or_else(|e| {
            tracing::warn!("Failed to read flashes: {e}");
            Vec::new()
        });
        let cart_count = load_cart(session).await.map_or_else(
            |e| {
                tracing::warn!("Failed to read cart: {e}");
                0
            },
            |cart| cart.item_count(),
        );

        Ok(Self {
            flashes,
            customer: current_customer(session).await,
            cart_count,
        })
    }
}
