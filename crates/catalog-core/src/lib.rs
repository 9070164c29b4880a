//! Core types and trait definitions for the product catalog.
//!
//! This crate is deliberately free of HTTP and database dependencies. It owns
//! the promotion lifecycle, the seasonal price sweep and checkout pricing; the
//! storage backend is reached only through [`store::CatalogStore`].

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod catalog;
pub mod category;
pub mod checkout;
pub mod error;
pub mod pricing;
pub mod product;
pub mod promotion;
pub mod store;
pub mod sweep;
pub mod validate;

#[cfg(test)]
mod testing;

pub use error::{Error, Result};
