//! Cart route handlers.
//!
//! The cart itself lives in the session (see [`crate::services::cart`]);
//! these handlers price it against the catalog and flash the outcome of
//! each action before redirecting.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::Redirect,
};
use tower_sessions::Session;
use tracing::instrument;

use super::melons::find_melon;
use crate::error::{Result, add_breadcrumb};
use crate::filters;
use crate::middleware::{FlashLevel, PageContext, RequireAuth, push_flash};
use crate::models::{Cart, session_keys};
use crate::services::cart::{self as cart_service, CartView};
use crate::state::AppState;

/// Flash shown after a melon is added.
pub const ADDED_MESSAGE: &str = "Melon successfully added to cart.";

/// Flash shown when a logged-in customer tries to check out.
pub const CHECKOUT_MESSAGE: &str = "Sorry! Checkout will be implemented in a future version.";

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub page: PageContext,
    pub cart: CartView,
}

/// Display the cart with line and order totals.
///
/// A visitor without a cart gets an empty one stored in their session.
#[instrument(skip(state, session, page))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    page: PageContext,
) -> Result<CartShowTemplate> {
    let cart = match session.get::<Cart>(session_keys::CART).await? {
        Some(cart) => cart,
        None => {
            let cart = Cart::new();
            cart_service::save_cart(&session, &cart).await?;
            cart
        }
    };

    Ok(CartShowTemplate {
        page,
        cart: CartView::build(&cart, state.catalog()),
    })
}

/// Add one melon to the cart and go to the cart page.
///
/// Wired to both GET and POST so plain links and the detail page form work.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    Path(id): Path<String>,
    session: Session,
) -> Result<Redirect> {
    let melon = find_melon(&state, &id)?;

    let quantity = cart_service::add_to_cart(&session, melon.id.clone()).await?;
    tracing::info!(melon_id = %melon.id, quantity, "Added melon to cart");
    add_breadcrumb(
        "cart",
        "Added melon to cart",
        Some(&[("melon_id", melon.id.as_str())]),
    );

    push_flash(&session, FlashLevel::Success, ADDED_MESSAGE).await?;
    Ok(Redirect::to("/cart"))
}

/// Checkout placeholder.
///
/// Anonymous visitors are sent to the login page by [`RequireAuth`].
#[instrument(skip_all, fields(customer = %customer.email))]
pub async fn checkout(RequireAuth(customer): RequireAuth, session: Session) -> Result<Redirect> {
    tracing::info!("Checkout requested");
    push_flash(&session, FlashLevel::Info, CHECKOUT_MESSAGE).await?;
    Ok(Redirect::to("/melons"))
}
