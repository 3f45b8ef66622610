//! Core types and helpers for fauna-catalog
//!
//! This crate contains domain types shared across all other crates.

mod animal;
mod constants;
mod env_config;
mod error;

pub use animal::*;
pub use constants::*;
pub use env_config::*;
pub use error::*;
