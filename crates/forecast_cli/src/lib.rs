//! Forecast CLI library
//!
//! Settings, report rendering and command implementations behind the
//! `forecast` binary. The engine itself lives in `forecast_engine`; this
//! crate only feeds it configuration and formats what comes back.

pub mod commands;
pub mod config;
pub mod error;
pub mod report;

pub use error::{CliError, Result};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
