//! Dachcoin block primitives
//!
//! Blocks, transactions and scripts are the `bitcoin` crate's types: Dachcoin
//! uses the legacy (pre-witness) encoding unchanged. This crate adds the seam
//! for the header proof-of-work hash, which differs per chain, and the peer
//! address record produced from compiled seed tables.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod address;
pub mod header;

pub use address::PeerAddress;
pub use header::{DoubleSha256, HeaderHasher};

pub use bitcoin;
