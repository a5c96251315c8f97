//! # Traffic Screen
//!
//! Controller for the road traffic map screen: bring up the map, centre it on
//! the device, and fetch and draw the latest road information report.

mod config;
mod controller;
mod error;
mod state;
mod types;

pub mod provider;
pub mod render;

pub use self::config::*;
pub use self::controller::*;
pub use self::error::Error;
pub use self::provider::*;
pub use self::state::Phase;
pub use self::types::*;

/// Result type for controller operations.
pub type Result<T> = anyhow::Result<T, Error>;
