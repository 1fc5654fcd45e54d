//! Error handling module
//!
//! This module defines the error types and result type aliases used in the crate.

use thiserror::Error;
use std::io;

use crate::engine::EngineError;

/// Router lifecycle manager error type
#[derive(Error, Debug)]
pub enum ManagerError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The router engine rejected or failed a lifecycle call
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    /// A proxy operation was requested while the router is not running
    #[error("Router is not running")]
    NotRunning,

    /// Proxy destination or listener construction failed
    #[error("Proxy start failed: {0}")]
    StartFailed(#[source] EngineError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias
///
/// This is a `Result` type alias that uses our custom `ManagerError`.
pub type Result<T> = std::result::Result<T, ManagerError>;
