//! Compiled fixed seeds
//!
//! A node connects to only one or two fixed seeds: once connected it learns
//! a pile of addresses with newer timestamps. Fixed seeds are therefore
//! handed out with a random last-seen time between one and two weeks ago so
//! gossiped addresses replace them quickly.

use chrono::{DateTime, Duration, Utc};
use dach_primitives::PeerAddress;
use rand::Rng;
use tracing::debug;

/// Seconds in one week
pub const ONE_WEEK: i64 = 7 * 24 * 60 * 60;

/// One compiled seed: a 16-byte IPv6 address (IPv4 as mapped) and a port
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SeedSpec6 {
    /// IPv6 address bytes
    pub addr: [u8; 16],
    /// Port
    pub port: u16,
}

/// Fixed seeds for the production network
///
/// No addresses are compiled in yet; nodes bootstrap from the DNS seeds.
pub const MAIN_SEEDS: &[SeedSpec6] = &[];

/// Fixed seeds for the public test network
pub const TESTNET_SEEDS: &[SeedSpec6] = &[];

/// Convert a compiled seed table using the current time
pub fn convert_seed6(seeds: &[SeedSpec6]) -> Vec<PeerAddress> {
    convert_seed6_at(seeds, Utc::now(), &mut rand::thread_rng())
}

/// Convert a compiled seed table relative to `now`.
///
/// Each record's last-seen time is `now - 1 week - r` with `r` uniform in
/// `[0, 1 week)`.
pub fn convert_seed6_at<R: Rng + ?Sized>(
    seeds: &[SeedSpec6],
    now: DateTime<Utc>,
    rng: &mut R,
) -> Vec<PeerAddress> {
    let peers: Vec<PeerAddress> = seeds
        .iter()
        .map(|seed| {
            let age = ONE_WEEK + rng.gen_range(0..ONE_WEEK);
            PeerAddress::from_ipv6_octets(seed.addr, seed.port, now - Duration::seconds(age))
        })
        .collect();

    debug!("Converted {} fixed seeds", peers.len());
    peers
}
