//! Peer address records

use chrono::{DateTime, Utc};
use std::net::{IpAddr, Ipv6Addr, SocketAddr};

/// A known peer endpoint and when it was last seen.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PeerAddress {
    /// Socket address; IPv4-mapped IPv6 addresses are stored as IPv4
    pub addr: SocketAddr,
    /// Last time the peer was seen
    pub last_seen: DateTime<Utc>,
}

impl PeerAddress {
    /// Build from a raw 16-byte IPv6 address and port.
    pub fn from_ipv6_octets(octets: [u8; 16], port: u16, last_seen: DateTime<Utc>) -> Self {
        let ip = Ipv6Addr::from(octets);
        let ip = match ip.to_ipv4_mapped() {
            Some(v4) => IpAddr::V4(v4),
            None => IpAddr::V6(ip),
        };
        Self {
            addr: SocketAddr::new(ip, port),
            last_seen,
        }
    }

    /// Port number.
    pub fn port(&self) -> u16 {
        self.addr.port()
    }
}
