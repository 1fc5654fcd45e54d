//! Network utility functions
//!
//! This module provides utility functions for network operations.

use std::net::{IpAddr, SocketAddr, ToSocketAddrs};
use std::str::FromStr;

use super::error::{ManagerError, Result};

/// Parse a proxy bind address
///
/// Combines a listen address string with a port into a `SocketAddr`.
/// Plain IP addresses are parsed directly; anything else goes through
/// name resolution.
///
/// # Arguments
///
/// * `address` - The listen address, e.g. `127.0.0.1` or `localhost`
/// * `port` - The listen port
///
/// # Returns
///
/// The parsed `SocketAddr`
pub fn parse_bind_addr(address: &str, port: u16) -> Result<SocketAddr> {
    // Try direct parsing first
    if let Ok(ip) = IpAddr::from_str(address) {
        return Ok(SocketAddr::new(ip, port));
    }

    // Try using ToSocketAddrs trait
    match (address, port).to_socket_addrs() {
        Ok(mut addrs) => {
            if let Some(addr) = addrs.next() {
                Ok(addr)
            } else {
                Err(ManagerError::Config(format!(
                    "Failed to resolve bind address: {}",
                    address
                )))
            }
        }
        Err(e) => Err(ManagerError::Config(format!(
            "Failed to parse bind address {}: {}",
            address, e
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bind_addr() {
        // Test valid address
        let addr = parse_bind_addr("127.0.0.1", 4444);
        assert!(addr.is_ok(), "Should be able to parse a valid address");

        if let Ok(socket_addr) = addr {
            assert_eq!(socket_addr.port(), 4444);
            assert!(socket_addr.ip().is_loopback());
        }

        // Test wildcard address
        let addr = parse_bind_addr("0.0.0.0", 8443);
        assert!(addr.is_ok(), "Should be able to parse the wildcard address");

        // Test invalid address
        let addr = parse_bind_addr("not an address", 4444);
        assert!(addr.is_err(), "Should fail to parse an invalid address");
    }
}
