//! Genesis block construction and self-verification
//!
//! The genesis block is rebuilt from its inputs at startup and its header
//! hash and merkle root are compared with the literals recorded next to the
//! network's other constants. A mismatch means the inputs were edited
//! without updating the literals.

use crate::consensus::NetworkConstants;
use crate::error::GenesisField;
use crate::network::NetworkId;
use crate::{Error, Result};
use bitcoin::block::{Header, Version};
use bitcoin::hashes::Hash;
use bitcoin::opcodes::all::OP_CHECKSIG;
use bitcoin::script::{Builder, PushBytes};
use bitcoin::{
    absolute, transaction, Amount, Block, BlockHash, CompactTarget, OutPoint, Sequence,
    Transaction, TxIn, TxMerkleNode, TxOut, Witness,
};
use dach_primitives::HeaderHasher;
use std::fmt::Display;
use tracing::{debug, error};

/// Number pushed first in the genesis coinbase script
pub const GENESIS_SCRIPT_BITS: i64 = 486_604_799;

/// Byte pushed second in the genesis coinbase script
pub const GENESIS_SCRIPT_EXTRA_NONCE: u8 = 4;

/// Inputs that fully determine a genesis block
#[derive(Debug, Clone, Copy)]
pub struct GenesisInputs<'a> {
    /// Message committed to by the coinbase
    pub message: &'a str,
    /// Public key paid by the coinbase output
    pub output_pubkey: &'a [u8],
    /// Block version
    pub version: i32,
    /// Block timestamp
    pub time: u32,
    /// Compact difficulty
    pub bits: u32,
    /// Nonce
    pub nonce: u32,
    /// Coinbase output value
    pub reward: Amount,
}

impl<'a> GenesisInputs<'a> {
    /// Genesis inputs of a network, with a zero-value coinbase output
    pub fn from_constants(constants: &'a NetworkConstants) -> Self {
        Self {
            message: constants.genesis_message,
            output_pubkey: &constants.genesis_output_pubkey,
            version: constants.genesis_version,
            time: constants.genesis_time,
            bits: constants.genesis_bits,
            nonce: constants.genesis_nonce,
            reward: Amount::ZERO,
        }
    }
}

fn push_bytes<'a>(field: &'static str, bytes: &'a [u8]) -> Result<&'a PushBytes> {
    <&PushBytes>::try_from(bytes).map_err(|_| Error::OversizedPush {
        field,
        len: bytes.len(),
    })
}

/// The single coinbase transaction of a genesis block
pub fn genesis_coinbase(inputs: &GenesisInputs<'_>) -> Result<Transaction> {
    // The extra nonce is pushed as data, not as the OP_4 opcode.
    let script_sig = Builder::new()
        .push_int(GENESIS_SCRIPT_BITS)
        .push_slice(push_bytes("extra nonce", &[GENESIS_SCRIPT_EXTRA_NONCE])?)
        .push_slice(push_bytes("message", inputs.message.as_bytes())?)
        .into_script();

    let script_pubkey = Builder::new()
        .push_slice(push_bytes("output public key", inputs.output_pubkey)?)
        .push_opcode(OP_CHECKSIG)
        .into_script();

    Ok(Transaction {
        version: transaction::Version::ONE,
        lock_time: absolute::LockTime::ZERO,
        input: vec![TxIn {
            previous_output: OutPoint::null(),
            script_sig,
            sequence: Sequence::MAX,
            witness: Witness::default(),
        }],
        output: vec![TxOut {
            value: inputs.reward,
            script_pubkey,
        }],
    })
}

/// Build a genesis block; the merkle root is computed from its transaction
pub fn create_genesis_block(inputs: &GenesisInputs<'_>) -> Result<Block> {
    let mut block = Block {
        header: Header {
            version: Version::from_consensus(inputs.version),
            prev_blockhash: BlockHash::all_zeros(),
            merkle_root: TxMerkleNode::all_zeros(),
            time: inputs.time,
            bits: CompactTarget::from_consensus(inputs.bits),
            nonce: inputs.nonce,
        },
        txdata: vec![genesis_coinbase(inputs)?],
    };
    if let Some(root) = block.compute_merkle_root() {
        block.header.merkle_root = root;
    }
    Ok(block)
}

/// A genesis block whose hash and merkle root matched the literals
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedGenesis {
    /// The block
    pub block: Block,
    /// Its header hash
    pub hash: BlockHash,
}

/// Build the genesis block of `constants` and check it against the literals
pub fn build_verified_genesis<H>(constants: &NetworkConstants, hasher: &H) -> Result<VerifiedGenesis>
where
    H: HeaderHasher + ?Sized,
{
    let network = constants.network;
    let block = create_genesis_block(&GenesisInputs::from_constants(constants))?;
    let hash = hasher.hash_header(&block.header);

    check_literal(network, GenesisField::BlockHash, &constants.genesis_hash, &hash)?;
    check_literal(
        network,
        GenesisField::MerkleRoot,
        &constants.genesis_merkle_root,
        &block.header.merkle_root,
    )?;

    debug!("Verified {} genesis block {}", network, hash);
    Ok(VerifiedGenesis { block, hash })
}

fn check_literal<T>(network: NetworkId, field: GenesisField, expected: &T, computed: &T) -> Result<()>
where
    T: PartialEq + Display,
{
    if expected == computed {
        return Ok(());
    }
    error!(
        "Genesis {} mismatch on {}: expected {}, computed {}",
        field, network, expected, computed
    );
    Err(Error::GenesisMismatch {
        network,
        field,
        expected: expected.to_string(),
        computed: computed.to_string(),
    })
}
