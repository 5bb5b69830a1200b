//! Cart operations.
//!
//! The cart lives in the session under [`session_keys::CART`]. Displaying it
//! joins each entry against the catalog to compute line and order totals.

use tower_sessions::Session;
use ubermelon_core::{MelonId, Price};

use crate::db::MelonCatalog;
use crate::models::{Cart, Melon, session_keys};

/// One cart line ready for display.
#[derive(Debug, Clone)]
pub struct CartLine {
    pub melon: Melon,
    pub quantity: u32,
    pub line_total: Price,
}

/// Cart display data for templates.
#[derive(Debug, Clone)]
pub struct CartView {
    pub lines: Vec<CartLine>,
    pub total: Price,
    pub item_count: u32,
}

impl CartView {
    /// Price every line of `cart` from the catalog.
    ///
    /// Entries whose melon has left the catalog are skipped.
    #[must_use]
    pub fn build(cart: &Cart, catalog: &MelonCatalog) -> Self {
        let lines: Vec<CartLine> = cart
            .iter()
            .filter_map(|(id, quantity)| {
                let Some(melon) = catalog.get_by_id(id) else {
                    tracing::warn!(melon_id = %id, "Cart references unknown melon, skipping");
                    return None;
                };
                Some(CartLine {
                    melon: melon.clone(),
                    quantity,
                    line_total: melon.price.times(quantity),
                })
            })
            .collect();

        let total = lines.iter().map(|line| line.line_total).sum();
        let item_count = lines
            .iter()
            .fold(0_u32, |acc, line| acc.saturating_add(line.quantity));

        Self {
            lines,
            total,
            item_count,
        }
    }

    /// Whether there is nothing to show.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

// =============================================================================
// Session Helpers
// =============================================================================

/// Get the cart from the session, or an empty one.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn load_cart(session: &Session) -> Result<Cart, tower_sessions::session::Error> {
    Ok(session
        .get::<Cart>(session_keys::CART)
        .await?
        .unwrap_or_default())
}

/// Store the cart in the session.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn save_cart(session: &Session, cart: &Cart) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CART, cart).await
}

/// Add one melon to the session cart, returning its new quantity.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn add_to_cart(
    session: &Session,
    melon_id: MelonId,
) -> Result<u32, tower_sessions::session::Error> {
    let mut cart = load_cart(session).await?;
    let quantity = cart.add(melon_id);
    save_cart(session, &cart).await?;
    Ok(quantity)
}
