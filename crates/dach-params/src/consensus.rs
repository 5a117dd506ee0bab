//! Per-network constant records and variant overrides
//!
//! A network is described by one flat [`NetworkConstants`] record. Derived
//! networks are produced by applying a [`ConstantsOverride`] to a parent
//! record: every field set on the override replaces the parent's value
//! outright, every other field is copied from the parent.

use crate::checkpoints::CheckpointData;
use crate::network::{DnsSeed, MessageStart, NetworkId};
use crate::seeds::SeedSpec6;
use bitcoin::{BlockHash, TxMerkleNode};
use primitive_types::U256;

/// Number of base units in one coin
pub const COIN: i64 = 100_000_000;

macro_rules! network_constants {
    ($( $(#[$doc:meta])* $field:ident : $ty:ty, )*) => {
        /// Every constant that distinguishes one network from another
        #[derive(Debug, Clone, PartialEq)]
        pub struct NetworkConstants {
            $( $(#[$doc])* pub $field: $ty, )*
        }

        /// Field-level replacements applied on top of a parent network
        #[derive(Debug, Clone, Default, PartialEq)]
        pub struct ConstantsOverride {
            $( $(#[$doc])* pub $field: Option<$ty>, )*
        }

        impl ConstantsOverride {
            $(
                $(#[$doc])*
                pub fn $field(mut self, value: $ty) -> Self {
                    self.$field = Some(value);
                    self
                }
            )*

            /// Names of the fields replaced by this override
            pub fn overridden_fields(&self) -> Vec<&'static str> {
                let mut fields = Vec::new();
                $(
                    if self.$field.is_some() {
                        fields.push(stringify!($field));
                    }
                )*
                fields
            }

            /// Copy `parent`, replacing every field set here
            pub fn apply(self, parent: &NetworkConstants) -> NetworkConstants {
                NetworkConstants {
                    $( $field: match self.$field {
                        Some(value) => value,
                        None => parent.$field.clone(),
                    }, )*
                }
            }
        }
    };
}

network_constants! {
    /// Network identifier
    network: NetworkId,
    /// Canonical network name
    name: &'static str,
    /// Wire message prefix
    message_start: MessageStart,
    /// Public key that signs network alerts
    alert_pubkey: Vec<u8>,
    /// Default P2P port
    default_port: u16,

    /// Highest allowed proof-of-work target
    pow_limit: U256,
    /// Blocks between subsidy halvings
    subsidy_halving_interval: u32,
    /// Deepest reorganization accepted
    max_reorganization_depth: u32,
    /// Upgraded-version blocks in the window before new rules are enforced
    enforce_block_upgrade_majority: u32,
    /// Upgraded-version blocks in the window before outdated blocks are rejected
    reject_block_outdated_majority: u32,
    /// Size of the block-version majority window
    to_check_block_upgrade_majority: u32,
    /// Default number of internal miner threads
    miner_threads: u32,
    /// Difficulty retarget timespan in seconds
    target_timespan: u32,
    /// Target block spacing in seconds
    target_spacing: u32,
    /// Confirmations before a coinbase can be spent
    maturity: u32,
    /// Allowed drift of the masternode count
    masternode_count_drift: u32,
    /// Maximum money supply in base units
    max_money_out: i64,
    /// Last height accepted under proof-of-work
    last_pow_block: u32,
    /// Height from which the stake modifier update applies
    modifier_update_block: u32,

    /// Message committed to by the genesis coinbase
    genesis_message: &'static str,
    /// Public key paid by the genesis coinbase output
    genesis_output_pubkey: Vec<u8>,
    /// Genesis block version
    genesis_version: i32,
    /// Genesis block timestamp
    genesis_time: u32,
    /// Genesis compact difficulty
    genesis_bits: u32,
    /// Genesis nonce
    genesis_nonce: u32,
    /// Expected genesis block hash
    genesis_hash: BlockHash,
    /// Expected genesis merkle root
    genesis_merkle_root: TxMerkleNode,

    /// Version byte of pay-to-pubkey-hash addresses
    pubkey_address_prefix: Vec<u8>,
    /// Version byte of pay-to-script-hash addresses
    script_address_prefix: Vec<u8>,
    /// Version byte of encoded private keys
    secret_key_prefix: Vec<u8>,
    /// Version bytes of BIP32 extended public keys
    ext_public_key_prefix: Vec<u8>,
    /// Version bytes of BIP32 extended private keys
    ext_secret_key_prefix: Vec<u8>,
    /// BIP44 coin type
    ext_coin_type: Vec<u8>,

    /// DNS seeds queried for peers
    dns_seeds: Vec<DnsSeed>,
    /// Compiled fixed seed table
    fixed_seeds: &'static [SeedSpec6],

    /// Mining needs connected peers
    mining_requires_peers: bool,
    /// Blocks at minimum difficulty are accepted
    allow_min_difficulty_blocks: bool,
    /// Expensive consistency checks run by default
    default_consistency_checks: bool,
    /// Only standard transactions are relayed and mined
    require_standard: bool,
    /// Blocks can be generated on demand
    mine_blocks_on_demand: bool,
    /// Proof-of-work is not checked
    skip_proof_of_work_check: bool,
    /// Report the deprecated `testnet` RPC field
    testnet_to_be_deprecated_field_rpc: bool,
    /// Headers-first synchronization is active
    headers_first_syncing_active: bool,

    /// Transactions per mixing pool
    pool_max_transactions: u32,
    /// Public key authorizing spork messages (hex)
    spork_key: &'static str,
    /// Dummy address used by the masternode pool
    masternode_pool_dummy_address: &'static str,
    /// Time masternode payments start
    start_masternode_payments: i64,
    /// Confirmations for the budget finalization fee
    budget_fee_confirmations: u32,

    /// Checkpoint table
    checkpoints: CheckpointData,
}

impl NetworkConstants {
    /// Derive a child network from this one
    pub fn derive(&self, overrides: ConstantsOverride) -> NetworkConstants {
        overrides.apply(self)
    }

    /// Blocks between difficulty adjustments
    pub fn difficulty_adjustment_interval(&self) -> u32 {
        if self.target_spacing == 0 {
            return 0;
        }
        self.target_timespan / self.target_spacing
    }

    /// Whether `amount` lies within `0..=max_money_out`
    pub fn money_range(&self, amount: i64) -> bool {
        (0..=self.max_money_out).contains(&amount)
    }
}
