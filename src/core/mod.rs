//! Core module - configuration and error types shared by every board
//!
//! - `config` - per-board instantiation parameters read from a page URL
//! - `error` - configuration errors

pub mod config;
pub mod error;

pub use config::{BoardConfig, Lighting};
pub use error::{CoreError, CoreResult};
