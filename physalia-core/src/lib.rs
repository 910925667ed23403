//! Shared primitives for the Physalia sequence-alignment ecosystem.
//!
//! `physalia-core` provides the foundation the engine crates build on:
//!
//! - **Error types** — [`PhysaliaError`] and [`Result`] for structured error handling
//! - **Traits** — the [`Scored`] abstraction implemented by domain types

pub mod error;
pub mod traits;

pub use error::{PhysaliaError, Result};
pub use traits::*;
