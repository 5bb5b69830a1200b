//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. `TraceLayer` (request tracing, with a `request_id` span field)
//! 3. Request ID (reuse or generate `x-request-id`)
//! 4. Security headers (CSP, frame and sniffing protection)
//! 5. Session layer (tower-sessions with in-memory store)
//!
//! Extractors built on the session: [`PageContext`] and [`RequireAuth`].

pub mod auth;
pub mod flash;
pub mod page;
pub mod request_id;
pub mod security_headers;
pub mod session;

pub use auth::{RequireAuth, clear_current_customer, set_current_customer};
pub use flash::{Flash, FlashLevel, push_flash, take_flashes};
pub use page::PageContext;
pub use request_id::request_id_middleware;
pub use security_headers::security_headers_middleware;
pub use session::create_session_layer;
