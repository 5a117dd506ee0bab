//! Block header proof-of-work hash

use bitcoin::block::Header;
use bitcoin::BlockHash;

/// Hash function identifying a block by its header
///
/// Dachcoin hashes headers with Quark. The implementation is supplied by the
/// embedding node.
pub trait HeaderHasher {
    /// Hash of the 80-byte serialized header
    fn hash_header(&self, header: &Header) -> BlockHash;
}

impl<H: HeaderHasher + ?Sized> HeaderHasher for &H {
    fn hash_header(&self, header: &Header) -> BlockHash {
        (**self).hash_header(header)
    }
}

/// Bitcoin's header hash, double SHA-256
#[derive(Debug, Clone, Copy, Default)]
pub struct DoubleSha256;

impl HeaderHasher for DoubleSha256 {
    fn hash_header(&self, header: &Header) -> BlockHash {
        header.block_hash()
    }
}
