//! Geosift Core - Domain models and errors
//!
//! This crate contains the geometry, predicate, and document models shared
//! by the filter engine, along with the common error type.

pub mod error;
pub mod models;

pub use error::{GeosiftError, Result};
