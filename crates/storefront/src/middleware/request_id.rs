//! Request ID middleware for request tracing and correlation.
//!
//! Reuses an incoming `x-request-id` from a reverse proxy when it looks sane,
//! otherwise generates a UUID v4. The ID is recorded in the tracing span,
//! tagged on the Sentry scope and echoed back in the response headers.

use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};
use tracing::Span;
use uuid::Uuid;

/// The HTTP header name for request IDs.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Longest incoming request ID accepted from upstream.
const MAX_REQUEST_ID_LENGTH: usize = 128;

/// Middleware that ensures every request has a request ID.
pub async fn request_id_middleware(request: Request, next: Next) -> Response {
    let request_id = incoming_request_id(&request)
        .map_or_else(|| Uuid::new_v4().to_string(), String::from);

    Span::current().record("request_id", request_id.as_str());

    sentry::configure_scope(|scope| {
        scope.set_tag("request_id", &request_id);
    });

    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}

/// The upstream request ID, if present and made of safe characters.
fn incoming_request_id(request: &Request) -> Option<&str> {
    request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .filter(|id| {
            !id.is_empty()
                && id.len() <= MAX_REQUEST_ID_LENGTH
                && id
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::Body;

    use super::*;

    fn request_with(id: &str) -> Request {
        axum::http::Request::builder()
            .header(REQUEST_ID_HEADER, id)
            .body(Body::empty())
            .unwrap()
    }

    #[test]
    fn test_incoming_request_id_accepts_uuid() {
        let id = "0f8fad5b-d9cb-469f-a165-70867728950e";
        assert_eq!(incoming_request_id(&request_with(id)), Some(id));
    }

    #[test]
    fn test_incoming_request_id_rejects_junk() {
        assert_eq!(incoming_request_id(&request_with("<script>")), None);
        assert_eq!(incoming_request_id(&request_with(&"a".repeat(200))), None);
    }
}
