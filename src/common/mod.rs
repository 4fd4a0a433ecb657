//! Common types shared across the crate.
//!
//! - Configuration constants and [`TreeConfig`](config::TreeConfig)
//! - Error types

pub mod config;
pub mod error;

pub use error::{Error, Result};
