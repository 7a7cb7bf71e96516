//! Shared primitives and traits for the Physalia toolkit.
//!
//! `physalia-core` provides the foundation the domain crates build on:
//!
//! - **Error types** — [`PhysaliaError`] and [`Result`] for structured error handling
//! - **Traits** — Core abstractions like [`Sequence`] and [`Summarizable`]

pub mod error;
pub mod traits;

pub use error::{PhysaliaError, Result};
pub use traits::*;
