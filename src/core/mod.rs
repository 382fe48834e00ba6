//! Core utilities and common types for hashchain-lab.

pub mod config;
pub mod error;
pub mod types;

pub use config::ChainConfig;
pub use error::{Error, Result};
pub use types::*;
