//! Verified parameter set of one network

use crate::checkpoints::CheckpointData;
use crate::consensus::NetworkConstants;
use crate::genesis::build_verified_genesis;
use crate::network::{Base58Type, DnsSeed, MessageStart, NetworkId};
use crate::seeds::convert_seed6;
use crate::{Error, Result};
use bitcoin::{Block, BlockHash};
use dach_primitives::{HeaderHasher, PeerAddress};
use primitive_types::U256;
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

/// Chain parameters of one network
///
/// Built once from a [`NetworkConstants`] record. Construction rebuilds the
/// genesis block, checks it against the recorded literals and checks that
/// the checkpoint at height 0 is the genesis hash.
#[derive(Debug, Clone)]
pub struct ChainParams {
    constants: NetworkConstants,
    genesis: Block,
    genesis_hash: BlockHash,
    fixed_seeds: Vec<PeerAddress>,
}

impl ChainParams {
    /// Build and verify the parameters described by `constants`
    pub fn build<H>(constants: NetworkConstants, hasher: &H) -> Result<Self>
    where
        H: HeaderHasher + ?Sized,
    {
        let genesis = build_verified_genesis(&constants, hasher)?;

        let checkpoint = constants.checkpoints.expected_hash_at(0).copied();
        if checkpoint != Some(genesis.hash) {
            error!(
                "Checkpoint 0 on {} does not match genesis {}",
                constants.network, genesis.hash
            );
            return Err(Error::CheckpointMismatch {
                network: constants.network,
                checkpoint,
                genesis: genesis.hash,
            });
        }

        let fixed_seeds = convert_seed6(constants.fixed_seeds);

        Ok(Self {
            constants,
            genesis: genesis.block,
            genesis_hash: genesis.hash,
            fixed_seeds,
        })
    }

    /// Network identifier
    pub fn network(&self) -> NetworkId {
        self.constants.network
    }

    /// Canonical network name
    pub fn name(&self) -> &'static str {
        self.constants.name
    }

    /// Wire message prefix
    pub fn message_start(&self) -> &MessageStart {
        &self.constants.message_start
    }

    /// Public key that signs network alerts
    pub fn alert_pubkey(&self) -> &[u8] {
        &self.constants.alert_pubkey
    }

    /// Default P2P port
    pub fn default_port(&self) -> u16 {
        self.constants.default_port
    }

    /// Highest allowed proof-of-work target
    pub fn pow_limit(&self) -> &U256 {
        &self.constants.pow_limit
    }

    /// Blocks between subsidy halvings
    pub fn subsidy_halving_interval(&self) -> u32 {
        self.constants.subsidy_halving_interval
    }

    /// Deepest reorganization accepted
    pub fn max_reorganization_depth(&self) -> u32 {
        self.constants.max_reorganization_depth
    }

    /// Upgraded blocks needed before new rules are enforced
    pub fn enforce_block_upgrade_majority(&self) -> u32 {
        self.constants.enforce_block_upgrade_majority
    }

    /// Upgraded blocks needed before outdated blocks are rejected
    pub fn reject_block_outdated_majority(&self) -> u32 {
        self.constants.reject_block_outdated_majority
    }

    /// Size of the block-version majority window
    pub fn to_check_block_upgrade_majority(&self) -> u32 {
        self.constants.to_check_block_upgrade_majority
    }

    /// Default number of miner threads
    pub fn miner_threads(&self) -> u32 {
        self.constants.miner_threads
    }

    /// Difficulty retarget timespan in seconds
    pub fn target_timespan(&self) -> u32 {
        self.constants.target_timespan
    }

    /// Target block spacing in seconds
    pub fn target_spacing(&self) -> u32 {
        self.constants.target_spacing
    }

    /// Coinbase maturity in blocks
    pub fn maturity(&self) -> u32 {
        self.constants.maturity
    }

    /// Allowed masternode count drift
    pub fn masternode_count_drift(&self) -> u32 {
        self.constants.masternode_count_drift
    }

    /// Maximum money supply
    pub fn max_money_out(&self) -> i64 {
        self.constants.max_money_out
    }

    /// Last proof-of-work height
    pub fn last_pow_block(&self) -> u32 {
        self.constants.last_pow_block
    }

    /// Stake modifier update height
    pub fn modifier_update_block(&self) -> u32 {
        self.constants.modifier_update_block
    }

    /// Blocks between difficulty adjustments
    pub fn difficulty_adjustment_interval(&self) -> u32 {
        self.constants.difficulty_adjustment_interval()
    }

    /// Whether `amount` is a valid money amount on this network
    pub fn money_range(&self, amount: i64) -> bool {
        self.constants.money_range(amount)
    }

    /// Genesis block
    pub fn genesis_block(&self) -> &Block {
        &self.genesis
    }

    /// Genesis block hash
    pub fn genesis_hash(&self) -> BlockHash {
        self.genesis_hash
    }

    /// Base58 version bytes for `kind`
    pub fn base58_prefix(&self, kind: Base58Type) -> &[u8] {
        let c = &self.constants;
        match kind {
            Base58Type::PubkeyAddress => &c.pubkey_address_prefix,
            Base58Type::ScriptAddress => &c.script_address_prefix,
            Base58Type::SecretKey => &c.secret_key_prefix,
            Base58Type::ExtPublicKey => &c.ext_public_key_prefix,
            Base58Type::ExtSecretKey => &c.ext_secret_key_prefix,
            Base58Type::ExtCoinType => &c.ext_coin_type,
        }
    }

    /// DNS seeds
    pub fn dns_seeds(&self) -> &[DnsSeed] {
        &self.constants.dns_seeds
    }

    /// Fixed seeds, timestamped when these parameters were built
    pub fn fixed_seeds(&self) -> &[PeerAddress] {
        &self.fixed_seeds
    }

    /// Mining needs connected peers
    pub fn mining_requires_peers(&self) -> bool {
        self.constants.mining_requires_peers
    }

    /// Blocks at minimum difficulty are accepted
    pub fn allow_min_difficulty_blocks(&self) -> bool {
        self.constants.allow_min_difficulty_blocks
    }

    /// Consistency checks run by default
    pub fn default_consistency_checks(&self) -> bool {
        self.constants.default_consistency_checks
    }

    /// Only standard transactions are relayed
    pub fn require_standard(&self) -> bool {
        self.constants.require_standard
    }

    /// Blocks can be generated on demand
    pub fn mine_blocks_on_demand(&self) -> bool {
        self.constants.mine_blocks_on_demand
    }

    /// Proof-of-work is not checked
    pub fn skip_proof_of_work_check(&self) -> bool {
        self.constants.skip_proof_of_work_check
    }

    /// Report the deprecated `testnet` RPC field
    pub fn testnet_to_be_deprecated_field_rpc(&self) -> bool {
        self.constants.testnet_to_be_deprecated_field_rpc
    }

    /// Headers-first sync is active
    pub fn headers_first_syncing_active(&self) -> bool {
        self.constants.headers_first_syncing_active
    }

    /// Transactions per mixing pool
    pub fn pool_max_transactions(&self) -> u32 {
        self.constants.pool_max_transactions
    }

    /// Spork signing key (hex)
    pub fn spork_key(&self) -> &'static str {
        self.constants.spork_key
    }

    /// Masternode pool dummy address
    pub fn masternode_pool_dummy_address(&self) -> &'static str {
        self.constants.masternode_pool_dummy_address
    }

    /// Time masternode payments start
    pub fn start_masternode_payments(&self) -> i64 {
        self.constants.start_masternode_payments
    }

    /// Confirmations for the budget fee
    pub fn budget_fee_confirmations(&self) -> u32 {
        self.constants.budget_fee_confirmations
    }

    /// Checkpoint table
    pub fn checkpoints(&self) -> &CheckpointData {
        &self.constants.checkpoints
    }

    /// The underlying constant record
    pub fn constants(&self) -> &NetworkConstants {
        &self.constants
    }

    /// Serializable summary for diagnostics and RPC
    pub fn summary(&self) -> ParamsSummary {
        let c = &self.constants;
        ParamsSummary {
            network: c.network,
            message_start: hex::encode(c.message_start),
            default_port: c.default_port,
            genesis_hash: self.genesis_hash,
            genesis_time: c.genesis_time,
            pow_limit: {
                let mut bytes = [0u8; 32];
                c.pow_limit.to_big_endian(&mut bytes);
                hex::encode(bytes)
            },
            target_spacing: c.target_spacing,
            target_timespan: c.target_timespan,
            maturity: c.maturity,
            last_pow_block: c.last_pow_block,
            pubkey_address_prefix: c.pubkey_address_prefix.first().copied().unwrap_or_default(),
            script_address_prefix: c.script_address_prefix.first().copied().unwrap_or_default(),
            secret_key_prefix: c.secret_key_prefix.first().copied().unwrap_or_default(),
            dns_seeds: c.dns_seeds.iter().map(|seed| seed.host.clone()).collect(),
            fixed_seed_count: self.fixed_seeds.len(),
            checkpoint_count: c.checkpoints.len(),
            latest_checkpoint: c.checkpoints.latest().map(|(height, _)| height),
            mine_blocks_on_demand: c.mine_blocks_on_demand,
            require_standard: c.require_standard,
        }
    }
}

/// Serializable view of the parameters of one network
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamsSummary {
    /// Network identifier
    pub network: NetworkId,
    /// Message start bytes (hex)
    pub message_start: String,
    /// Default P2P port
    pub default_port: u16,
    /// Genesis block hash
    pub genesis_hash: BlockHash,
    /// Genesis timestamp
    pub genesis_time: u32,
    /// Proof-of-work limit (hex, big-endian)
    pub pow_limit: String,
    /// Target block spacing in seconds
    pub target_spacing: u32,
    /// Difficulty retarget timespan in seconds
    pub target_timespan: u32,
    /// Coinbase maturity
    pub maturity: u32,
    /// Last proof-of-work height
    pub last_pow_block: u32,
    /// P2PKH version byte
    pub pubkey_address_prefix: u8,
    /// P2SH version byte
    pub script_address_prefix: u8,
    /// WIF version byte
    pub secret_key_prefix: u8,
    /// DNS seed hosts
    pub dns_seeds: Vec<String>,
    /// Number of fixed seeds
    pub fixed_seed_count: usize,
    /// Number of checkpoints
    pub checkpoint_count: usize,
    /// Height of the latest checkpoint
    pub latest_checkpoint: Option<u32>,
    /// Blocks can be generated on demand
    pub mine_blocks_on_demand: bool,
    /// Only standard transactions are relayed
    pub require_standard: bool,
}

impl ParamsSummary {
    /// Pretty-printed JSON
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Mutable handle on the unit-test network's parameters
///
/// Only obtainable through the selector while unittest is active.
pub struct ModifiableParams<'a> {
    params: &'a mut ChainParams,
}

impl<'a> ModifiableParams<'a> {
    pub(crate) fn new(params: &'a mut ChainParams) -> Self {
        Self { params }
    }

    /// Override `subsidy_halving_interval`
    pub fn set_subsidy_halving_interval(&mut self, value: u32) {
        warn!("Overriding subsidy halving interval: {}", value);
        self.params.constants.subsidy_halving_interval = value;
    }

    /// Override `enforce_block_upgrade_majority`
    pub fn set_enforce_block_upgrade_majority(&mut self, value: u32) {
        warn!("Overriding enforce block upgrade majority: {}", value);
        self.params.constants.enforce_block_upgrade_majority = value;
    }

    /// Override `reject_block_outdated_majority`
    pub fn set_reject_block_outdated_majority(&mut self, value: u32) {
        warn!("Overriding reject block outdated majority: {}", value);
        self.params.constants.reject_block_outdated_majority = value;
    }

    /// Override `to_check_block_upgrade_majority`
    pub fn set_to_check_block_upgrade_majority(&mut self, value: u32) {
        warn!("Overriding block upgrade majority window: {}", value);
        self.params.constants.to_check_block_upgrade_majority = value;
    }

    /// Override `default_consistency_checks`
    pub fn set_default_consistency_checks(&mut self, value: bool) {
        warn!("Overriding default consistency checks: {}", value);
        self.params.constants.default_consistency_checks = value;
    }

    /// Override `allow_min_difficulty_blocks`
    pub fn set_allow_min_difficulty_blocks(&mut self, value: bool) {
        warn!("Overriding allow min difficulty blocks: {}", value);
        self.params.constants.allow_min_difficulty_blocks = value;
    }

    /// Override `skip_proof_of_work_check`
    pub fn set_skip_proof_of_work_check(&mut self, value: bool) {
        warn!("Overriding skip proof-of-work check: {}", value);
        self.params.constants.skip_proof_of_work_check = value;
    }

    /// Current state of the parameters being modified
    pub fn params(&self) -> &ChainParams {
        &*self.params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seeds::SeedSpec6;
    use crate::testing::PinnedHeaderHasher;
    use crate::{variants, ErrorKind};
    use bitcoin::hashes::Hash;

    fn main_params() -> ChainParams {
        ChainParams::build(variants::main_constants().unwrap(), &PinnedHeaderHasher).unwrap()
    }

    #[test]
    fn test_build_main() {
        let params = main_params();
        assert_eq!(params.network(), NetworkId::Main);
        assert_eq!(params.name(), "main");
        assert_eq!(params.message_start(), &[0xdd, 0x6c, 0xf0, 0x04]);
        assert_eq!(params.default_port(), 31601);
        assert_eq!(params.genesis_hash().to_string(), variants::MAIN_GENESIS_HASH);
        assert_eq!(params.genesis_block().header.nonce, 2_298_761);
        assert_eq!(params.checkpoints().expected_hash_at(0), Some(&params.genesis_hash()));
    }

    #[test]
    fn test_fixed_seeds_are_converted() {
        static SEEDS: &[SeedSpec6] = &[
            SeedSpec6 {
                addr: [0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0xff, 0xff, 192, 0, 2, 1],
                port: 31601,
            },
            SeedSpec6 {
                addr: [0x20, 0x01, 0x0d, 0xb8, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0x02],
                port: 31601,
            },
        ];
        let mut constants = variants::main_constants().unwrap();
        constants.fixed_seeds = SEEDS;

        let params = ChainParams::build(constants, &PinnedHeaderHasher).unwrap();
        let now = chrono::Utc::now();
        let seeds = params.fixed_seeds();
        assert_eq!(seeds.len(), 2);
        for seed in seeds {
            assert!(seed.last_seen <= now - chrono::Duration::weeks(1));
            assert!(seed.last_seen >= now - chrono::Duration::weeks(2));
        }
        assert_eq!(seeds[0].addr.to_string(), "192.0.2.1:31601");
        assert!(seeds[1].addr.is_ipv6());
        assert_eq!(params.summary().fixed_seed_count, 2);
    }

    #[test]
    fn test_params_are_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ChainParams>();
    }

    #[test]
    fn test_base58_prefixes() {
        let params = main_params();
        assert_eq!(params.base58_prefix(Base58Type::PubkeyAddress), &[30]);
        assert_eq!(params.base58_prefix(Base58Type::ScriptAddress), &[18]);
        assert_eq!(params.base58_prefix(Base58Type::SecretKey), &[28]);
        assert_eq!(params.base58_prefix(Base58Type::ExtPublicKey), &[0x04, 0x88, 0xB2, 0x1E]);
        assert_eq!(params.base58_prefix(Base58Type::ExtSecretKey), &[0x04, 0x88, 0xAD, 0xE4]);
        assert_eq!(params.base58_prefix(Base58Type::ExtCoinType), &[0x80, 0x00, 0x00, 0x77]);
    }

    #[test]
    fn test_missing_genesis_checkpoint_is_rejected() {
        let mut constants = variants::main_constants().unwrap();
        constants.checkpoints =
            crate::CheckpointData::new([(1, BlockHash::all_zeros())], 0, 0, 0.0).unwrap();

        let err = ChainParams::build(constants, &PinnedHeaderHasher).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::GenesisMismatch);
        assert!(matches!(err, Error::CheckpointMismatch { checkpoint: None, .. }));
    }

    #[test]
    fn test_wrong_genesis_checkpoint_is_rejected() {
        let mut constants = variants::main_constants().unwrap();
        constants.checkpoints = variants::testnet_checkpoints().unwrap();

        let err = ChainParams::build(constants, &PinnedHeaderHasher).unwrap_err();
        match err {
            Error::CheckpointMismatch { network, checkpoint, genesis } => {
                assert_eq!(network, NetworkId::Main);
                assert_eq!(
                    checkpoint.map(|h| h.to_string()).as_deref(),
                    Some(variants::TESTNET_GENESIS_HASH)
                );
                assert_eq!(genesis.to_string(), variants::MAIN_GENESIS_HASH);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_modifiable_setters() {
        let mut params = main_params();
        {
            let mut handle = ModifiableParams::new(&mut params);
            handle.set_subsidy_halving_interval(10);
            handle.set_enforce_block_upgrade_majority(1);
            handle.set_reject_block_outdated_majority(2);
            handle.set_to_check_block_upgrade_majority(3);
            handle.set_default_consistency_checks(true);
            handle.set_allow_min_difficulty_blocks(true);
            handle.set_skip_proof_of_work_check(true);
            assert_eq!(handle.params().subsidy_halving_interval(), 10);
        }
        assert_eq!(params.enforce_block_upgrade_majority(), 1);
        assert_eq!(params.reject_block_outdated_majority(), 2);
        assert_eq!(params.to_check_block_upgrade_majority(), 3);
        assert!(params.default_consistency_checks());
        assert!(params.allow_min_difficulty_blocks());
        assert!(params.skip_proof_of_work_check());
    }

    #[test]
    fn test_summary_json() {
        let summary = main_params().summary();
        assert_eq!(summary.message_start, "dd6cf004");
        assert_eq!(summary.pubkey_address_prefix, 30);
        assert_eq!(summary.latest_checkpoint, Some(0));
        assert!(summary.pow_limit.starts_with("0000ffff"));
        assert_eq!(summary.pow_limit.len(), 64);

        let json = summary.to_json_pretty().unwrap();
        assert!(json.contains("\"network\": \"main\""));
        assert!(json.contains(
            "\"genesis_hash\": \"0000060041642648c0cb6dc68b7c66645c5e39144cc3dc1cac7726c93e74fa9f\""
        ));
        let back: ParamsSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(back, summary);
    }
}
