//! Core types and configuration for sale-tracker
//!
//! This crate contains domain types shared across all other crates.

mod artifact;
mod config;
pub mod constants;
pub mod env_config;
mod error;
mod observation;
mod period;
mod response;

pub use artifact::*;
pub use config::*;
pub use error::*;
pub use observation::*;
pub use period::*;
pub use response::*;
