//! Router engine abstraction
//!
//! This module defines the boundary to the external anonymity-routing
//! engine. The engine owns tunnel building, the network database, and
//! destination cryptography; this crate only drives its lifecycle and
//! consumes the handles it returns. Implementations typically wrap a
//! routing library linked into the embedding application.
//!
//! All calls are synchronous: they either complete or return an
//! [`EngineError`]. The lifecycle manager invokes them while holding its
//! guard lock, so implementations must not call back into the manager.

use thiserror::Error;
use std::path::Path;

/// Router engine error type
#[derive(Error, Debug)]
pub enum EngineError {
    /// A lifecycle entry point (init/start/stop/terminate) failed
    #[error("engine call failed: {0}")]
    Call(String),

    /// Local destination creation failed
    #[error("destination creation failed: {0}")]
    Destination(String),

    /// Proxy listener construction failed
    #[error("listener construction failed: {0}")]
    Listener(String),
}

/// Result type alias for engine calls
pub type EngineResult<T> = std::result::Result<T, EngineError>;

/// Opaque handle to an engine-managed local destination
///
/// Ownership of a destination transfers to the proxy entry that requested
/// it; dropping the handle releases the destination inside the engine.
pub trait LocalDestination: Send {
    /// Stable identifier for logging and diagnostics
    fn id(&self) -> String;
}

/// Opaque handle to a running proxy listener
///
/// Dropping the handle closes the listener socket and detaches it from its
/// destination.
pub trait ProxyListener: Send {
    /// Protocol label the listener was constructed with
    fn protocol(&self) -> &str;
}

/// Interface consumed from the external routing engine
///
/// The manager guarantees call ordering: `init` before `start`, proxies
/// released before `stop`, `stop` before `terminate`. Implementations do
/// not need to defend against out-of-order lifecycle calls.
pub trait RouterEngine: Send + Sync {
    /// Initialize the engine with argv-style startup arguments and a
    /// tunnel profile tag
    fn init(&self, args: &[String], profile: &str) -> EngineResult<()>;

    /// Start the engine
    ///
    /// `config` carries an override configuration file; `None` starts the
    /// engine with the configuration established at `init`.
    fn start(&self, config: Option<&Path>) -> EngineResult<()>;

    /// Stop the engine
    ///
    /// Callers must have released all destinations and listeners first.
    fn stop(&self) -> EngineResult<()>;

    /// Terminate the engine, releasing everything `init` allocated
    fn terminate(&self) -> EngineResult<()>;

    /// Create a new local destination
    ///
    /// `public` selects the tunnel-building variant; local proxy
    /// termination uses the non-anonymous variant (`false`), which does not
    /// build outbound tunnels per connection.
    fn create_local_destination(&self, public: bool) -> EngineResult<Box<dyn LocalDestination>>;

    /// Construct a proxy listener bound to `address:port` on top of the
    /// given destination
    fn open_proxy_listener(
        &self,
        protocol: &str,
        address: &str,
        port: u16,
        destination: &dyn LocalDestination,
    ) -> EngineResult<Box<dyn ProxyListener>>;
}
