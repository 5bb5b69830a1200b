//! Ubermelon Core - Shared types library.
//!
//! This crate provides the domain newtypes used by the storefront and its
//! integration tests.
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no file access, no HTTP.
//! Parsing and validation live here so that every boundary (flat files,
//! form posts, URL paths) rejects bad input the same way.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for emails, melon IDs and prices

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
