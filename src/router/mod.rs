//! Router lifecycle module
//!
//! This module implements the lifecycle façade over the external routing
//! engine: the state machine that takes the engine through
//! init/start/stop/terminate, and the registry owning the HTTP and HTTPS
//! proxy listeners that depend on it. A single lock inside
//! [`RouterManager`] serializes every operation, so the whole surface is
//! safe to call from any thread.

mod controller;
mod registry;
mod state;

pub use controller::RouterManager;
pub use registry::ProxyKind;
pub use state::RouterState;
