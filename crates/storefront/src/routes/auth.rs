//! Customer login, logout and signup handlers.
//!
//! Every action answers with a flash message and a redirect; only the two
//! form pages render templates.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Form, extract::State, response::Redirect};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{Result, add_breadcrumb, clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::middleware::{
    FlashLevel, PageContext, clear_current_customer, push_flash, set_current_customer,
};
use crate::models::CurrentCustomer;
use crate::services::auth::{AuthError, AuthService, Signup};
use crate::state::AppState;

/// Flash shown after a successful login.
pub const LOGIN_MESSAGE: &str = "Login successful.";

/// Flash shown after logout.
pub const LOGOUT_MESSAGE: &str = "Logged out.";

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Signup form data.
#[derive(Deserialize)]
pub struct SignupForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub page: PageContext,
}

/// Signup page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/signup.html")]
pub struct SignupTemplate {
    pub page: PageContext,
}

// =============================================================================
// Login Routes
// =============================================================================

/// Display the login page.
#[instrument(skip_all)]
pub async fn login_page(page: PageContext) -> LoginTemplate {
    LoginTemplate { page }
}

/// Handle login form submission.
///
/// Unknown emails and wrong passwords are flashed separately and bounce back
/// to the login page.
#[instrument(skip_all, fields(email = %form.email))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Redirect> {
    let auth = AuthService::new(state.customers());

    let customer = match auth.login(&form.email, &form.password) {
        Ok(customer) => customer,
        Err(err) if err.is_user_error() => {
            tracing::info!(reason = %err, "Login rejected");
            // A malformed address can't belong to anyone.
            let message = match err {
                AuthError::InvalidEmail(_) => AuthError::UserNotFound.user_message(),
                other => other.user_message(),
            };
            push_flash(&session, FlashLevel::Error, message).await?;
            return Ok(Redirect::to("/login"));
        }
        Err(err) => return Err(err.into()),
    };

    set_current_customer(&session, &CurrentCustomer::from(&customer)).await?;
    set_sentry_user(customer.email.as_str());
    add_breadcrumb("auth", "Customer logged in", None);
    tracing::info!("Customer logged in");

    push_flash(&session, FlashLevel::Success, LOGIN_MESSAGE).await?;
    Ok(Redirect::to("/melons"))
}

/// Log out, keeping the cart.
#[instrument(skip_all)]
pub async fn logout(session: Session) -> Result<Redirect> {
    if let Some(customer) = clear_current_customer(&session).await? {
        tracing::info!(email = %customer.email, "Customer logged out");
    }
    clear_sentry_user();

    push_flash(&session, FlashLevel::Info, LOGOUT_MESSAGE).await?;
    Ok(Redirect::to("/melons"))
}

// =============================================================================
// Signup Routes
// =============================================================================

/// Display the signup page.
#[instrument(skip_all)]
pub async fn signup_page(page: PageContext) -> SignupTemplate {
    SignupTemplate { page }
}

/// Handle signup form submission.
///
/// The new account is not logged in; the customer is sent to the login page.
#[instrument(skip_all, fields(email = %form.email))]
pub async fn signup(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<SignupForm>,
) -> Result<Redirect> {
    let auth = AuthService::new(state.customers());

    let result = auth.signup(&Signup {
        first_name: &form.first_name,
        last_name: &form.last_name,
        email: &form.email,
        password: &form.password,
    });

    match result {
        Ok(customer) => {
            tracing::info!(email = %customer.email, "Customer signed up");
            push_flash(
                &session,
                FlashLevel::Success,
                format!("Account created for {}. Please log in.", customer.email),
            )
            .await?;
            Ok(Redirect::to("/login"))
        }
        Err(err) if err.is_user_error() => {
            tracing::info!(reason = %err, "Signup rejected");
            push_flash(&session, FlashLevel::Error, err.user_message()).await?;
            Ok(Redirect::to("/signup"))
        }
        Err(err) => Err(err.into()),
    }
}
