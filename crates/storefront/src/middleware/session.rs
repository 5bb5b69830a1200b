//! Session middleware configuration.
//!
//! Sessions are held in process memory and identified by a signed cookie.
//! They do not survive a restart.

use rand::RngCore;
use secrecy::{ExposeSecret, SecretString};
use tower_sessions::cookie::{Key, SameSite, time::Duration};
use tower_sessions::service::SignedCookie;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::config::StorefrontConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "ubermelon_session";

/// Session expiry time in seconds (7 days).
const SESSION_EXPIRY_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Build the cookie signing key.
///
/// Uses the configured secret when present, otherwise random bytes; with an
/// in-memory store a restart discards every session anyway.
#[must_use]
pub fn session_key(secret: Option<&SecretString>) -> Key {
    if let Some(secret) = secret {
        match Key::try_from(secret.expose_secret().as_bytes()) {
            Ok(key) => return key,
            Err(e) => tracing::warn!("Session secret unusable ({e}), using a random key"),
        }
    } else {
        tracing::info!("No session secret configured, using a random per-process key");
    }

    let mut bytes = [0_u8; 64];
    rand::rng().fill_bytes(&mut bytes);
    Key::from(&bytes)
}

/// Create the session layer with an in-memory store.
#[must_use]
pub fn create_session_layer(
    config: &StorefrontConfig,
) -> SessionManagerLayer<MemoryStore, SignedCookie> {
    let store = MemoryStore::default();

    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(Duration::seconds(SESSION_EXPIRY_SECONDS)))
        .with_secure(config.is_secure())
        .with_same_site(SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
        .with_signed(session_key(config.session_secret.as_ref()))
}
