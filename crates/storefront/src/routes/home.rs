//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use crate::filters;
use crate::middleware::PageContext;
use crate::models::Melon;
use crate::state::AppState;

/// Number of melons featured on the home page.
const FEATURED_COUNT: usize = 3;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub page: PageContext,
    pub featured: Vec<Melon>,
    pub melon_count: usize,
}

/// Display the home page.
#[instrument(skip(state, page))]
pub async fn home(State(state): State<AppState>, page: PageContext) -> impl IntoResponse {
    let catalog = state.catalog();

    HomeTemplate {
        page,
        featured: catalog.get_all().iter().take(FEATURED_COUNT).cloned().collect(),
        melon_count: catalog.len(),
    }
}
