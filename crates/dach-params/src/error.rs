//! Error types for chain parameter construction and selection
//!
//! Every error here means corrupted constant tables or a programming error
//! in how the parameters are selected. Embedding binaries treat them as
//! fatal; they are returned rather than panicking so test harnesses can
//! assert on them.

use crate::network::NetworkId;
use bitcoin::BlockHash;
use std::fmt;

/// Result type
pub type Result<T> = std::result::Result<T, Error>;

/// Which genesis value failed verification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenesisField {
    /// Header hash
    BlockHash,
    /// Merkle root of the coinbase transaction
    MerkleRoot,
}

impl fmt::Display for GenesisField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenesisField::BlockHash => write!(f, "block hash"),
            GenesisField::MerkleRoot => write!(f, "merkle root"),
        }
    }
}

/// Chain parameter errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Computed genesis value differs from the hardcoded literal
    #[error("Genesis {field} mismatch on {network}: expected {expected}, computed {computed}")]
    GenesisMismatch {
        /// Network whose genesis failed
        network: NetworkId,
        /// Value that differed
        field: GenesisField,
        /// Hardcoded literal
        expected: String,
        /// Value computed from the genesis inputs
        computed: String,
    },

    /// Checkpoint at height 0 is missing or differs from the genesis hash
    #[error("Checkpoint 0 on {network} is {checkpoint:?}, genesis hash is {genesis}")]
    CheckpointMismatch {
        /// Network whose checkpoint table is inconsistent
        network: NetworkId,
        /// Hash recorded for height 0, if any
        checkpoint: Option<BlockHash>,
        /// Computed genesis hash
        genesis: BlockHash,
    },

    /// Two checkpoints recorded for the same height
    #[error("Duplicate checkpoint at height {0}")]
    DuplicateCheckpoint(u32),

    /// Hardcoded hex constant failed to decode
    #[error("Invalid constant {field}: {source}")]
    InvalidLiteral {
        /// Name of the constant
        field: &'static str,
        /// Decoding error
        #[source]
        source: hex::FromHexError,
    },

    /// Genesis coinbase data too large for a single script push
    #[error("Genesis {field} of {len} bytes does not fit a script push")]
    OversizedPush {
        /// Which input
        field: &'static str,
        /// Its length
        len: usize,
    },

    /// Active parameters requested before selection
    #[error("Chain parameters used before a network was selected")]
    NotSelected,

    /// Mutation requested while a fixed network is active
    #[error("Chain parameters for {0} are not modifiable")]
    NotModifiable(NetworkId),

    /// Network id not recognized
    #[error("Unknown network: {0}")]
    UnknownNetwork(String),

    /// Process-wide parameters installed twice
    #[error("Chain parameters already installed")]
    AlreadyInstalled,

    /// Process-wide parameters used before installation
    #[error("Chain parameters not installed")]
    NotInstalled,
}

impl Error {
    /// Classify the error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::GenesisMismatch { .. } | Error::CheckpointMismatch { .. } => {
                ErrorKind::GenesisMismatch
            }
            Error::InvalidLiteral { .. }
            | Error::DuplicateCheckpoint(_)
            | Error::OversizedPush { .. }
            | Error::NotSelected
            | Error::NotModifiable(_)
            | Error::UnknownNetwork(_)
            | Error::AlreadyInstalled
            | Error::NotInstalled => ErrorKind::InvariantViolation,
        }
    }
}

/// Error kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Genesis block or its checkpoint disagrees with the hardcoded constants
    GenesisMismatch,
    /// Selection protocol or constant table misuse
    InvariantViolation,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::GenesisMismatch => write!(f, "GenesisMismatch"),
            ErrorKind::InvariantViolation => write!(f, "InvariantViolation"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bitcoin::hashes::Hash;

    #[test]
    fn test_error_kinds() {
        let mismatch = Error::GenesisMismatch {
            network: NetworkId::Main,
            field: GenesisField::BlockHash,
            expected: "00".repeat(32),
            computed: "11".repeat(32),
        };
        assert_eq!(mismatch.kind(), ErrorKind::GenesisMismatch);

        let checkpoint = Error::CheckpointMismatch {
            network: NetworkId::Testnet,
            checkpoint: None,
            genesis: BlockHash::all_zeros(),
        };
        assert_eq!(checkpoint.kind(), ErrorKind::GenesisMismatch);
        assert_eq!(Error::DuplicateCheckpoint(7).kind(), ErrorKind::InvariantViolation);

        assert_eq!(Error::NotSelected.kind(), ErrorKind::InvariantViolation);
        assert_eq!(
            Error::NotModifiable(NetworkId::Main).kind(),
            ErrorKind::InvariantViolation
        );
        assert_eq!(
            Error::UnknownNetwork("signet".to_string()).kind(),
            ErrorKind::InvariantViolation
        );
    }

    #[test]
    fn test_error_messages() {
        let err = Error::GenesisMismatch {
            network: NetworkId::Regtest,
            field: GenesisField::MerkleRoot,
            expected: "00".repeat(32),
            computed: "11".repeat(32),
        };
        let msg = err.to_string();
        assert!(msg.contains("merkle root"));
        assert!(msg.contains("regtest"));

        assert_eq!(
            Error::NotModifiable(NetworkId::Testnet).to_string(),
            "Chain parameters for test are not modifiable"
        );
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(ErrorKind::GenesisMismatch.to_string(), "GenesisMismatch");
        assert_eq!(ErrorKind::InvariantViolation.to_string(), "InvariantViolation");
    }
}
