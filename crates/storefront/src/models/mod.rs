//! Domain models for the storefront.
//!
//! - [`Melon`] - a catalog product
//! - [`Customer`] - a registered shopper with a hashed password
//! - [`Cart`] - melon quantities kept in the visitor's session
//! - [`CurrentCustomer`] - the login identity kept in the session

pub mod cart;
pub mod customer;
pub mod melon;
pub mod session;

pub use cart::Cart;
pub use customer::{Customer, NewCustomer};
pub use melon::Melon;
pub use session::{CurrentCustomer, keys as session_keys};
