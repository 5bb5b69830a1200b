//! Authentication extractors.
//!
//! Provides extractors for reading the logged-in customer in route handlers.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use super::flash::{FlashLevel, push_flash};
use crate::models::{CurrentCustomer, session_keys};

/// Extractor that requires a logged-in customer.
///
/// If nobody is logged in, flashes [`Self::LOGIN_REQUIRED_MESSAGE`] and
/// redirects to the login page.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAuth(customer): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", customer.first_name)
/// }
/// ```
pub struct RequireAuth(pub CurrentCustomer);

/// Error returned when login is required but the customer is not logged in.
pub enum AuthRejection {
    /// Redirect to login page.
    RedirectToLogin,
    /// Session layer missing (misconfigured router).
    Unauthorized,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to("/login").into_response(),
            Self::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
        }
    }
}

impl RequireAuth {
    /// Flash shown when a visitor is bounced to the login page.
    pub const LOGIN_REQUIRED_MESSAGE: &'static str = "Please log in to continue.";
}

impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Get the session from extensions (set by SessionManagerLayer)
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or(AuthRejection::Unauthorized)?;

        if let Some(customer) = current_customer(session).await {
            return Ok(Self(customer));
        }

        if let Err(e) = push_flash(session, FlashLevel::Info, Self::LOGIN_REQUIRED_MESSAGE).await {
            tracing::warn!("Failed to flash login prompt: {e}");
        }
        Err(AuthRejection::RedirectToLogin)
    }
}

/// Read the current customer, treating session errors as "not logged in".
pub(crate) async fn current_customer(session: &Session) -> Option<CurrentCustomer> {
    match session
        .get::<CurrentCustomer>(session_keys::CURRENT_CUSTOMER)
        .await
    {
        Ok(customer) => customer,
        Err(e) => {
            tracing::warn!("Failed to read current customer from session: {e}");
            None
        }
    }
}

/// Helper to set the current customer in the session.
///
/// The session ID is cycled first so a pre-login session ID cannot be reused.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_customer(
    session: &Session,
    customer: &CurrentCustomer,
) -> Result<(), tower_sessions::session::Error> {
    session.cycle_id().await?;
    session
        .insert(session_keys::CURRENT_CUSTOMER, customer)
        .await
}

/// Helper to clear the current customer from the session (logout).
///
/// The cart is kept.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_customer(
    session: &Session,
) -> Result<Option<CurrentCustomer>, tower_sessions::session::Error> {
    session
        .remove::<CurrentCustomer>(session_keys::CURRENT_CUSTOMER)
        .await
}
