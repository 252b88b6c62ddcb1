//! Core types for teleprompter
//!
//! This crate contains domain types shared across all other crates.

pub mod constants;
mod env_config;
mod error;
mod event;
mod prompt;

pub use env_config::{env_optional, env_parse_with_default};
pub use error::*;
pub use event::*;
pub use prompt::*;
