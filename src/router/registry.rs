//! Proxy listener registry
//!
//! This module owns the zero-or-one live entries for the HTTP and HTTPS
//! proxy listeners. Each entry couples a listener handle with the local
//! destination it terminates on; both are released together when the entry
//! is dropped. The registry performs no locking of its own; every call is
//! made by the manager while it holds the guard lock.

use log::{debug, info, warn};
use std::fmt;

use crate::common::{ManagerError, Result};
use crate::config::{HTTP_PROXY_PORT, HTTPS_PROXY_PORT};
use crate::engine::{LocalDestination, ProxyListener, RouterEngine};

/// Proxy listener kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProxyKind {
    /// Plaintext HTTP proxy
    Http,
    /// TLS-terminating HTTPS proxy
    Https,
}

impl ProxyKind {
    /// Protocol label handed to the listener constructor
    pub fn label(self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Https => "https",
        }
    }

    /// Conventional local port for this kind
    pub fn default_port(self) -> u16 {
        match self {
            Self::Http => HTTP_PROXY_PORT,
            Self::Https => HTTPS_PROXY_PORT,
        }
    }
}

impl fmt::Display for ProxyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A live proxy listener and the destination it terminates on
struct ProxyEntry {
    // Field order matters: the listener must be dropped before the
    // destination it is bound to.
    listener: Box<dyn ProxyListener>,
    destination: Box<dyn LocalDestination>,
    address: String,
    port: u16,
}

/// Registry of the per-kind proxy slots
///
/// At most one entry per kind exists at any time.
pub(crate) struct ProxyRegistry {
    http: Option<ProxyEntry>,
    https: Option<ProxyEntry>,
}

impl ProxyRegistry {
    pub(crate) fn new() -> Self {
        Self {
            http: None,
            https: None,
        }
    }

    fn slot(&self, kind: ProxyKind) -> &Option<ProxyEntry> {
        match kind {
            ProxyKind::Http => &self.http,
            ProxyKind::Https => &self.https,
        }
    }

    fn slot_mut(&mut self, kind: ProxyKind) -> &mut Option<ProxyEntry> {
        match kind {
            ProxyKind::Http => &mut self.http,
            ProxyKind::Https => &mut self.https,
        }
    }

    /// Start a proxy listener of the given kind
    ///
    /// No-op success when an entry already exists; the existing entry wins
    /// and the requested bind parameters are ignored. On failure no partial
    /// state is retained: a destination created for a listener that never
    /// came up is released before returning.
    pub(crate) fn start(
        &mut self,
        engine: &dyn RouterEngine,
        kind: ProxyKind,
        address: &str,
        port: u16,
    ) -> Result<()> {
        if let Some(entry) = self.slot(kind).as_ref() {
            debug!(
                "{} proxy already running on {}:{}, ignoring new bind parameters",
                kind, entry.address, entry.port
            );
            return Ok(());
        }

        let destination = engine
            .create_local_destination(false)
            .map_err(ManagerError::StartFailed)?;
        debug!("Created local destination {} for {} proxy", destination.id(), kind);

        // The destination is dropped here if the listener never comes up.
        let listener = match engine.open_proxy_listener(kind.label(), address, port, destination.as_ref()) {
            Ok(listener) => listener,
            Err(e) => {
                warn!("Failed to open {} proxy listener on {}:{}: {}", kind, address, port, e);
                return Err(ManagerError::StartFailed(e));
            }
        };

        info!("{} proxy listening on {}:{}", kind, address, port);
        *self.slot_mut(kind) = Some(ProxyEntry {
            listener,
            destination,
            address: address.to_string(),
            port,
        });

        Ok(())
    }

    /// Stop the proxy listener of the given kind, if present
    pub(crate) fn stop(&mut self, kind: ProxyKind) {
        match self.slot_mut(kind).take() {
            Some(entry) => {
                info!(
                    "Stopping {} proxy on {}:{}",
                    entry.listener.protocol(),
                    entry.address,
                    entry.port
                );
                debug!("Releasing destination {}", entry.destination.id());
            }
            None => debug!("No {} proxy to stop", kind),
        }
    }

    /// Release every entry, HTTP first
    pub(crate) fn clear(&mut self) {
        self.stop(ProxyKind::Http);
        self.stop(ProxyKind::Https);
    }

    /// Whether an entry of the given kind is live
    pub(crate) fn is_active(&self, kind: ProxyKind) -> bool {
        self.slot(kind).is_some()
    }

    /// Bind address and port of the live entry, if any
    pub(crate) fn bound_addr(&self, kind: ProxyKind) -> Option<(String, u16)> {
        self.slot(kind)
            .as_ref()
            .map(|entry| (entry.address.clone(), entry.port))
    }
}
