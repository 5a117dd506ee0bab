//! Test helpers
//!
//! The live networks hash headers with Quark, which this workspace does not
//! implement; a node supplies it through [`HeaderHasher`]. [`PinnedHeaderHasher`]
//! is a lookup table, not a hash function: it returns the published hash
//! for the exact 80-byte genesis header of each network and the double
//! SHA-256 block hash for any other header. Parameters built with it prove
//! that the genesis inputs reproduce the published header bytes, not that
//! those bytes hash to the published value.

use bitcoin::block::Header;
use bitcoin::consensus::encode::serialize;
use bitcoin::BlockHash;
use dach_primitives::HeaderHasher;

/// Serialized genesis headers and their published hashes
const PINNED_HEADERS: [(&str, &str); 3] = [
    (
        "0100000000000000000000000000000000000000000000000000000000000000000000007bd16b5ca220120ba33c095dfbfc609139318820fbf8899943644583efc6764a106c825bf0ff0f1e89132300",
        "0000060041642648c0cb6dc68b7c66645c5e39144cc3dc1cac7726c93e74fa9f",
    ),
    (
        "0100000000000000000000000000000000000000000000000000000000000000000000007bd16b5ca220120ba33c095dfbfc609139318820fbf8899943644583efc6764a116c825bf0ff0f1ecbd33400",
        "000006a645f816b89fe77f540d65ebea9d37aa35da8690f588395d05fbd9435f",
    ),
    (
        "0100000000000000000000000000000000000000000000000000000000000000000000007bd16b5ca220120ba33c095dfbfc609139318820fbf8899943644583efc6764a126c825bf0ff0f1e3af21600",
        "0000008045bd20aed2df810b292e36f495b4b5bfe6b33e4a9a5e1b747164fc4b",
    ),
];

/// Header hasher that looks up the published genesis hashes
#[derive(Debug, Clone, Copy, Default)]
pub struct PinnedHeaderHasher;

impl HeaderHasher for PinnedHeaderHasher {
    fn hash_header(&self, header: &Header) -> BlockHash {
        let encoded = hex::encode(serialize(header));
        PINNED_HEADERS
            .iter()
            .find(|(pinned, _)| *pinned == encoded)
            .and_then(|(_, hash)| hash.parse::<BlockHash>().ok())
            .unwrap_or_else(|| header.block_hash())
    }
}
