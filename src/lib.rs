//! Anon Router Manager: lifecycle management for an embedded anonymity router
//!
//! This library serializes access to a singleton anonymity-routing engine and
//! the local HTTP/HTTPS proxy listeners built on top of it. The routing
//! protocol itself (tunnel building, destination cryptography, network
//! database) lives in an external engine consumed through the
//! [`engine::RouterEngine`] trait; this crate owns only the state machine
//! that makes starting, stopping, and re-entering those subsystems safe from
//! multiple threads.
//!
//! # Main Features
//!
//! - Idempotent init/start/stop/cleanup transitions for the router engine
//! - At most one HTTP and one HTTPS proxy listener, each bound to its own
//!   engine-provided local destination
//! - A single lock serializing every lifecycle operation, so callers may
//!   invoke the manager concurrently from any number of threads
//! - Guaranteed teardown ordering: proxies are released strictly before the
//!   engine is stopped or terminated
//!
//! # Example
//!
//! ```no_run
//! use anon_router_manager::{RouterManager, ProxyKind, Result};
//! use anon_router_manager::config::ManagerConfig;
//! use anon_router_manager::engine::{
//!     EngineResult, LocalDestination, ProxyListener, RouterEngine,
//! };
//! use std::path::Path;
//!
//! // A real embedder supplies an engine backed by the routing library.
//! struct NullEngine;
//! struct NullDestination;
//! struct NullListener(String);
//!
//! impl LocalDestination for NullDestination {
//!     fn id(&self) -> String { "null".to_string() }
//! }
//!
//! impl ProxyListener for NullListener {
//!     fn protocol(&self) -> &str { &self.0 }
//! }
//!
//! impl RouterEngine for NullEngine {
//!     fn init(&self, _args: &[String], _profile: &str) -> EngineResult<()> { Ok(()) }
//!     fn start(&self, _config: Option<&Path>) -> EngineResult<()> { Ok(()) }
//!     fn stop(&self) -> EngineResult<()> { Ok(()) }
//!     fn terminate(&self) -> EngineResult<()> { Ok(()) }
//!     fn create_local_destination(&self, _public: bool) -> EngineResult<Box<dyn LocalDestination>> {
//!         Ok(Box::new(NullDestination))
//!     }
//!     fn open_proxy_listener(
//!         &self,
//!         protocol: &str,
//!         _address: &str,
//!         _port: u16,
//!         _destination: &dyn LocalDestination,
//!     ) -> EngineResult<Box<dyn ProxyListener>> {
//!         Ok(Box::new(NullListener(protocol.to_string())))
//!     }
//! }
//!
//! fn main() -> Result<()> {
//!     let manager = RouterManager::new(Box::new(NullEngine), ManagerConfig::default());
//!
//!     manager.start()?;
//!     manager.start_proxy(ProxyKind::Http, None, None)?;
//!     manager.start_proxy(ProxyKind::Https, None, None)?;
//!
//!     assert!(manager.is_running());
//!
//!     // Tears the proxies down before the engine.
//!     manager.stop()?;
//!     Ok(())
//! }
//! ```

// Public modules
pub mod common;
pub mod config;
pub mod engine;
pub mod router;

// Re-export commonly used structures and functions for convenience
pub use common::{ManagerError, Result};
pub use router::{ProxyKind, RouterManager, RouterState};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
