//! Session-related types.
//!
//! Types stored in the session for authentication state.

use serde::{Deserialize, Serialize};

use ubermelon_core::Email;

use super::Customer;

/// Session-stored customer identity.
///
/// Minimal data stored in the session to identify the logged-in customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentCustomer {
    /// Customer's email address (the customer store key).
    pub email: Email,
    /// Given name, for greetings.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
}

impl CurrentCustomer {
    /// Name shown in the page header.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.first_name.is_empty() {
            self.email.as_str()
        } else {
            &self.first_name
        }
    }
}

impl From<&Customer> for CurrentCustomer {
    fn from(customer: &Customer) -> Self {
        Self {
            email: customer.email.clone(),
            first_name: customer.first_name.clone(),
            last_name: customer.last_name.clone(),
        }
    }
}

/// Session keys.
pub mod keys {
    /// Key for storing the current logged-in customer.
    pub const CURRENT_CUSTOMER: &str = "current_customer";

    /// Key for the shopping cart.
    pub const CART: &str = "cart";

    /// Key for pending flash messages.
    pub const FLASHES: &str = "_flashes";
}
