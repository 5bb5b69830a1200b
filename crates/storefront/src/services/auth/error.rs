//! Authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;

/// Errors that can occur during signup and login.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] ubermelon_core::EmailError),

    /// Wrong password.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// No customer with that email.
    #[error("customer not found")]
    UserNotFound,

    /// A customer with that email already exists.
    #[error("customer already exists")]
    UserAlreadyExists,

    /// First or last name blank, too long or containing a field separator.
    #[error("a valid {0} is required")]
    InvalidName(&'static str),

    /// Password too weak or invalid.
    #[error("password validation failed: {0}")]
    WeakPassword(String),

    /// Repository error.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,
}

impl AuthError {
    /// Whether the shopper can fix this by changing what they typed.
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        !matches!(self, Self::Repository(_) | Self::PasswordHash)
    }

    /// Message safe to show the shopper in a flash.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidEmail(e) => format!("Please enter a valid email address ({e})."),
            Self::InvalidCredentials => "Incorrect password.".to_string(),
            Self::UserNotFound => "No customer with that email found.".to_string(),
            Self::UserAlreadyExists => "An account with that email already exists.".to_string(),
            Self::InvalidName(field) => format!("Please enter a valid {field}."),
            Self::WeakPassword(msg) => format!("Please choose a longer password: {msg}."),
            Self::Repository(_) | Self::PasswordHash => {
                "Something went wrong, please try again.".to_string()
            }
        }
    }
}
