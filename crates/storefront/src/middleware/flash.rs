//! One-shot flash messages carried in the session.
//!
//! A handler pushes a message before redirecting; the next rendered page
//! drains and displays it.

use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::models::session_keys;

/// Severity of a flash message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlashLevel {
    Success,
    Info,
    Error,
}

impl FlashLevel {
    /// CSS class used by the layout.
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Success => "flash flash-success",
            Self::Info => "flash flash-info",
            Self::Error => "flash flash-error",
        }
    }
}

/// A message shown once on the next page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

/// Queue a flash message for the next rendered page.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn push_flash(
    session: &Session,
    level: FlashLevel,
    message: impl Into<String>,
) -> Result<(), tower_sessions::session::Error> {
    let mut flashes = session
        .get::<Vec<Flash>>(session_keys::FLASHES)
        .await?
        .unwrap_or_default();
    flashes.push(Flash {
        level,
        message: message.into(),
    });
    session.insert(session_keys::FLASHES, flashes).await
}

/// Remove and return all queued flash messages.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn take_flashes(session: &Session) -> Result<Vec<Flash>, tower_sessions::session::Error> {
    Ok(session
        .remove::<Vec<Flash>>(session_keys::FLASHES)
        .await?
        .unwrap_or_default())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use tower_sessions::MemoryStore;

    use super::*;

    #[tokio::test]
    async fn test_flashes_are_drained_once() {
        let session = Session::new(None, Arc::new(MemoryStore::default()), None);

        push_flash(&session, FlashLevel::Success, "Added").await.unwrap();
        push_flash(&session, FlashLevel::Error, "Oops").await.unwrap();

        let flashes = take_flashes(&session).await.unwrap();
        assert_eq!(
            flashes.iter().map(|f| f.message.as_str()).collect::<Vec<_>>(),
            vec!["Added", "Oops"]
        );
        assert_eq!(flashes.first().unwrap().level, FlashLevel::Success);

        assert!(take_flashes(&session).await.unwrap().is_empty());
    }
}
