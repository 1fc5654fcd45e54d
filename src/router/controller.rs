//! Router lifecycle controller
//!
//! This module implements the manager that owns the engine lifecycle and
//! the proxy registry. A single mutex serializes every operation, state
//! reads included, so the manager may be shared freely across threads.
//! Engine calls execute while the lock is held; a slow engine start or stop
//! therefore serializes all other lifecycle calls, which is acceptable for
//! operations that only happen at startup and shutdown.

use log::{debug, error, info, warn};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use crate::common::{ManagerError, Result};
use crate::config::{ManagerConfig, TUNNEL_PROFILE};
use crate::engine::RouterEngine;
use crate::APP_NAME;

use super::registry::{ProxyKind, ProxyRegistry};
use super::state::RouterState;

/// Router lifecycle manager
///
/// Owns the router state flag, the engine handle, and the two proxy slots.
/// All operations are idempotent and safe to call concurrently from any
/// number of threads; exactly one logical transition wins per call.
///
/// Dropping the manager performs a full [`cleanup`](Self::cleanup), so an
/// embedder that never calls it explicitly still releases the engine.
pub struct RouterManager {
    config: ManagerConfig,
    inner: Mutex<ManagerInner>,
}

struct ManagerInner {
    state: RouterState,
    engine: Box<dyn RouterEngine>,
    proxies: ProxyRegistry,
}

impl RouterManager {
    /// Create a manager around the given engine
    ///
    /// The configuration supplies the data directory and the proxy bind
    /// defaults used when callers pass `None` to [`init`](Self::init) and
    /// [`start_proxy`](Self::start_proxy).
    pub fn new(engine: Box<dyn RouterEngine>, config: ManagerConfig) -> Self {
        Self {
            config,
            inner: Mutex::new(ManagerInner {
                state: RouterState::Uninitialized,
                engine,
                proxies: ProxyRegistry::new(),
            }),
        }
    }

    /// Create a manager with the default configuration
    pub fn with_defaults(engine: Box<dyn RouterEngine>) -> Self {
        Self::new(engine, ManagerConfig::default())
    }

    /// The configuration this manager was built with
    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    fn lock(&self) -> MutexGuard<'_, ManagerInner> {
        // A poisoned lock means an engine call panicked mid-transition;
        // there is no state worth recovering at that point.
        self.inner.lock().unwrap()
    }

    /// Initialize the router engine
    ///
    /// No-op success when already initialized or running. `config_dir`
    /// overrides the configured data directory for this initialization.
    pub fn init(&self, config_dir: Option<&Path>) -> Result<()> {
        let mut inner = self.lock();
        self.init_locked(&mut inner, config_dir)
    }

    fn init_locked(&self, inner: &mut ManagerInner, config_dir: Option<&Path>) -> Result<()> {
        if inner.state.is_initialized() {
            debug!("Router engine already initialized");
            return Ok(());
        }

        let data_dir = config_dir.unwrap_or(&self.config.data_dir);
        let args = vec![
            APP_NAME.to_string(),
            "--datadir".to_string(),
            data_dir.display().to_string(),
        ];

        info!("Initializing router engine (data dir: {})", data_dir.display());
        inner.engine.init(&args, TUNNEL_PROFILE)?;
        inner.state = RouterState::Initialized;

        Ok(())
    }

    /// Start the router engine
    ///
    /// No-op success when already running. Performs an implicit
    /// `init(None)` first when the engine was never initialized.
    pub fn start(&self) -> Result<()> {
        let mut inner = self.lock();
        if inner.state.is_running() {
            debug!("Router engine already running");
            return Ok(());
        }

        self.init_locked(&mut inner, None)?;

        info!("Starting router engine");
        inner.engine.start(None)?;
        inner.state = RouterState::Running;
        info!("Router engine started");

        Ok(())
    }

    /// Start the router engine unless it is already running
    pub fn ensure_running(&self) -> Result<()> {
        if self.is_running() {
            return Ok(());
        }
        self.start()
    }

    /// Stop the router engine
    ///
    /// No-op success when not running. Both proxy entries are released
    /// before the engine stop call; the state retreats to `Initialized`
    /// even when that call fails, since the proxies are already gone and
    /// the engine is no longer serving.
    pub fn stop(&self) -> Result<()> {
        let mut inner = self.lock();
        Self::stop_locked(&mut inner)
    }

    fn stop_locked(inner: &mut ManagerInner) -> Result<()> {
        if !inner.state.is_running() {
            debug!("Router engine not running");
            return Ok(());
        }

        info!("Stopping router engine");

        // Proxies hold destinations whose validity depends on the engine
        // being alive; they go down first, unconditionally.
        inner.proxies.clear();

        let result = inner.engine.stop();
        inner.state = RouterState::Initialized;

        result?;
        info!("Router engine stopped");

        Ok(())
    }

    /// Full idempotent teardown
    ///
    /// Stops the engine if running, terminates it if initialized, and ends
    /// in `Uninitialized`. Never fails: engine errors during teardown are
    /// logged and swallowed. Safe to call any number of times from any
    /// state; also invoked on drop.
    pub fn cleanup(&self) {
        let mut inner = self.lock();

        if inner.state.is_running() {
            if let Err(e) = Self::stop_locked(&mut inner) {
                error!("Engine stop failed during cleanup: {}", e);
            }
        }

        if inner.state.is_initialized() {
            info!("Terminating router engine");
            if let Err(e) = inner.engine.terminate() {
                error!("Engine terminate failed during cleanup: {}", e);
            }
            inner.state = RouterState::Uninitialized;
        }
    }

    /// Snapshot of whether the engine is running
    pub fn is_running(&self) -> bool {
        self.lock().state.is_running()
    }

    /// Snapshot of the current lifecycle state
    pub fn state(&self) -> RouterState {
        self.lock().state
    }

    /// Start a proxy listener
    ///
    /// Fails with [`ManagerError::NotRunning`] unless the engine is
    /// running. No-op success when a listener of this kind already exists;
    /// in that case the requested bind parameters are ignored and the
    /// existing listener wins. `address` defaults to the configured listen
    /// address, `port` (absent or `0`) to the configured port for the kind.
    pub fn start_proxy(
        &self,
        kind: ProxyKind,
        address: Option<&str>,
        port: Option<u16>,
    ) -> Result<()> {
        let mut inner = self.lock();
        if !inner.state.is_running() {
            warn!("Cannot start {} proxy: router is not running", kind);
            return Err(ManagerError::NotRunning);
        }

        let (default_address, default_port) = self.config.proxy_defaults(kind);
        let address = address.unwrap_or(&default_address);
        let port = match port {
            Some(0) | None => default_port,
            Some(port) => port,
        };

        let ManagerInner { engine, proxies, .. } = &mut *inner;
        proxies.start(engine.as_ref(), kind, address, port)
    }

    /// Stop a proxy listener, if present
    pub fn stop_proxy(&self, kind: ProxyKind) {
        self.lock().proxies.stop(kind);
    }

    /// Snapshot of whether a proxy of the given kind is live
    pub fn proxy_running(&self, kind: ProxyKind) -> bool {
        self.lock().proxies.is_active(kind)
    }

    /// Bind address and port of the live proxy of the given kind, if any
    pub fn proxy_addr(&self, kind: ProxyKind) -> Option<(String, u16)> {
        self.lock().proxies.bound_addr(kind)
    }
}

impl Drop for RouterManager {
    fn drop(&mut self) {
        // Skip teardown when a panicked engine call poisoned the lock;
        // panicking again here would abort the unwind.
        if self.inner.is_poisoned() {
            return;
        }
        self.cleanup();
    }
}
