//! Melon catalog route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, State};
use tower_sessions::Session;
use tracing::instrument;
use ubermelon_core::MelonId;

use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::PageContext;
use crate::models::Melon;
use crate::services::cart::load_cart;
use crate::state::AppState;

/// Melon listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "melons/index.html")]
pub struct MelonsIndexTemplate {
    pub page: PageContext,
    pub melons: Vec<Melon>,
}

/// Melon detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "melons/show.html")]
pub struct MelonShowTemplate {
    pub page: PageContext,
    pub melon: Melon,
    pub in_cart: u32,
}

/// Display every melon in catalog order.
#[instrument(skip(state, page))]
pub async fn index(State(state): State<AppState>, page: PageContext) -> MelonsIndexTemplate {
    MelonsIndexTemplate {
        page,
        melons: state.catalog().get_all().to_vec(),
    }
}

/// Display one melon.
#[instrument(skip(state, session, page))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
    session: Session,
    page: PageContext,
) -> Result<MelonShowTemplate> {
    let melon = find_melon(&state, &id)?.clone();
    let in_cart = load_cart(&session).await?.quantity(&melon.id);

    Ok(MelonShowTemplate {
        page,
        melon,
        in_cart,
    })
}

/// Resolve a raw path segment to a catalog melon.
///
/// # Errors
///
/// Returns `AppError::NotFound` for malformed or unknown IDs.
pub(crate) fn find_melon<'a>(state: &'a AppState, raw_id: &str) -> Result<&'a Melon> {
    let not_found = || AppError::NotFound(format!("a melon called '{raw_id}'"));

    let id = MelonId::parse(raw_id).map_err(|_| not_found())?;
    state.catalog().get_by_id(&id).ok_or_else(not_found)
}
