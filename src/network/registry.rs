use actix_web::http::Uri;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::error::{LedgerError, Result};

/// Host and port of a peer node. Ordered by host, then port.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PeerAddress {
    pub host: String,
    pub port: u16,
}

impl PeerAddress {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Parse `http://host:port`, `https://host` or bare `host:port`.
    ///
    /// Scheme defaults apply when the port is omitted (80/443); a bare
    /// host without port is rejected.
    pub fn parse(address: &str) -> Result<Self> {
        let invalid = |reason: &str| LedgerError::InvalidAddress {
            address: address.to_string(),
            reason: reason.to_string(),
        };

        let uri = address
            .trim()
            .parse::<Uri>()
            .map_err(|e| invalid(&e.to_string()))?;

        let host = uri
            .host()
            .filter(|h| !h.is_empty())
            .ok_or_else(|| invalid("missing host"))?;

        let port = match (uri.port_u16(), uri.scheme_str()) {
            (Some(port), _) => port,
            (None, Some("http")) => 80,
            (None, Some("https")) => 443,
            (None, _) => return Err(invalid("missing port")),
        };

        Ok(Self::new(host, port))
    }

    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

impl fmt::Display for PeerAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Set of known peers. Grows only; there is no removal path.
#[derive(Debug, Default)]
pub struct NodeRegistry {
    nodes: BTreeSet<PeerAddress>,
}

impl NodeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a peer; returns false if it was already known.
    pub fn register(&mut self, peer: PeerAddress) -> bool {
        self.nodes.insert(peer)
    }

    /// Parse and add a peer address string.
    pub fn register_address(&mut self, address: &str) -> Result<PeerAddress> {
        let peer = PeerAddress::parse(address)?;
        self.register(peer.clone());
        Ok(peer)
    }

    /// Peers in registry order.
    pub fn all(&self) -> Vec<PeerAddress> {
        self.nodes.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_url_with_port() {
        let peer = PeerAddress::parse("http://192.168.0.5:5000").unwrap();
        assert_eq!(peer, PeerAddress::new("192.168.0.5", 5000));
        assert_eq!(peer.to_string(), "192.168.0.5:5000");
        assert_eq!(peer.base_url(), "http://192.168.0.5:5000");
    }

    #[test]
    fn parses_bare_authority() {
        let peer = PeerAddress::parse("localhost:5001").unwrap();
        assert_eq!(peer, PeerAddress::new("localhost", 5001));
    }

    #[test]
    fn scheme_supplies_default_port() {
        assert_eq!(PeerAddress::parse("http://node.example").unwrap().port, 80);
        assert_eq!(PeerAddress::parse("https://node.example").unwrap().port, 443);
    }

    #[test]
    fn rejects_unparseable_addresses() {
        for bad in ["", "localhost", "/chain", "http://", "not a url"] {
            let err = PeerAddress::parse(bad).unwrap_err();
            assert!(
                matches!(err, LedgerError::InvalidAddress { .. }),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn duplicate_registration_is_noop() {
        let mut registry = NodeRegistry::new();
        assert!(registry.is_empty());
        registry.register_address("http://10.0.0.1:5000").unwrap();
        registry.register_address("10.0.0.1:5000").unwrap();
        assert!(!registry.register(PeerAddress::new("10.0.0.1", 5000)));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn all_is_ordered_by_host_then_port() {
        let mut registry = NodeRegistry::new();
        registry.register(PeerAddress::new("b", 1));
        registry.register(PeerAddress::new("a", 2));
        registry.register(PeerAddress::new("a", 1));
        assert_eq!(
            registry.all(),
            vec![
                PeerAddress::new("a", 1),
                PeerAddress::new("a", 2),
                PeerAddress::new("b", 1),
            ]
        );
    }
}
