//! Business logic services for storefront.
//!
//! # Services
//!
//! - `auth` - Customer signup and password login
//! - `cart` - Session cart persistence and price totals

pub mod auth;
pub mod cart;
