//! Core types and trait definitions for the Folio reference library.
//!
//! This crate has no database dependencies. Storage backends implement
//! [`store::LibraryStore`]; front ends depend on that trait.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod collection;
pub mod error;
pub mod item;
pub mod store;

pub use error::{Error, Result};
