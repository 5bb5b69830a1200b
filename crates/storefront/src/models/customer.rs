//! Customer domain types.

use std::fmt;

use secrecy::SecretString;
use ubermelon_core::Email;

/// A registered customer.
///
/// `password_hash` is an Argon2id PHC string; the plaintext is never kept.
#[derive(Clone)]
pub struct Customer {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Unique key of the customer store.
    pub email: Email,
    /// Argon2id hash of the password.
    pub password_hash: String,
}

impl fmt::Debug for Customer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Customer")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("email", &self.email)
            .field("password_hash", &"[REDACTED]")
            .finish()
    }
}

/// Input for creating a customer, before the password is hashed.
#[derive(Debug)]
pub struct NewCustomer {
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    pub password: SecretString,
}
