//! Constant tables of the four networks
//!
//! Main is written out in full. Testnet derives from main, regtest from
//! testnet and unittest from main, each replacing only what differs.

use crate::checkpoints::CheckpointData;
use crate::consensus::{ConstantsOverride, NetworkConstants, COIN};
use crate::network::{DnsSeed, NetworkId};
use crate::seeds::{MAIN_SEEDS, TESTNET_SEEDS};
use crate::{Error, Result};
use bitcoin::hashes::Hash;
use bitcoin::{BlockHash, TxMerkleNode};
use primitive_types::U256;

/// Main genesis block hash
pub const MAIN_GENESIS_HASH: &str =
    "0000060041642648c0cb6dc68b7c66645c5e39144cc3dc1cac7726c93e74fa9f";
/// Testnet genesis block hash
pub const TESTNET_GENESIS_HASH: &str =
    "000006a645f816b89fe77f540d65ebea9d37aa35da8690f588395d05fbd9435f";
/// Regtest genesis block hash
pub const REGTEST_GENESIS_HASH: &str =
    "0000008045bd20aed2df810b292e36f495b4b5bfe6b33e4a9a5e1b747164fc4b";
/// Merkle root shared by every genesis block
pub const GENESIS_MERKLE_ROOT: &str =
    "4a76c6ef834564439989f8fb208831399160fcfb5d093ca30b1220a25c6bd17b";

const GENESIS_MESSAGE: &str = "Mars is home to the tallest mountain in the solar system";
const GENESIS_OUTPUT_PUBKEY: &str = "04d6a1c7390eca9630026f945986aa2c4a226cec7964e46100df576c672f4f017a301ad10fef98d89b9f44124b7117de1bcbdef33c83c90a2a9911c7a2fa70336a";

const MAIN_GENESIS_TIME: u32 = 1_535_274_000;
const TESTNET_GENESIS_TIME: u32 = 1_535_274_001;
const REGTEST_GENESIS_TIME: u32 = 1_535_274_002;

// Masternode payments start four hours after genesis.
const MASTERNODE_PAYMENT_DELAY: i64 = 14_400;

fn decode(field: &'static str, literal: &str) -> Result<Vec<u8>> {
    hex::decode(literal).map_err(|source| Error::InvalidLiteral { field, source })
}

/// Parse a hash written in display order (byte-reversed hex)
pub fn parse_hash<T>(field: &'static str, literal: &str) -> Result<T>
where
    T: Hash<Bytes = [u8; 32]>,
{
    let mut bytes = [0u8; 32];
    hex::decode_to_slice(literal, &mut bytes)
        .map_err(|source| Error::InvalidLiteral { field, source })?;
    bytes.reverse();
    Ok(T::from_byte_array(bytes))
}

fn genesis_hash(field: &'static str, literal: &str) -> Result<BlockHash> {
    parse_hash(field, literal)
}

/// Checkpoints of the production network
pub fn main_checkpoints() -> Result<CheckpointData> {
    CheckpointData::new(
        [(0, genesis_hash("main checkpoint 0", MAIN_GENESIS_HASH)?)],
        1_535_274_000, // UNIX timestamp of last checkpoint block
        0,             // transactions between genesis and last checkpoint
        2_000.0,       // estimated transactions per day after checkpoint
    )
}

/// Checkpoints of the public test network
pub fn testnet_checkpoints() -> Result<CheckpointData> {
    CheckpointData::new(
        [(0, genesis_hash("test checkpoint 0", TESTNET_GENESIS_HASH)?)],
        1_535_274_001,
        0,
        250.0,
    )
}

/// Checkpoints of the regression-test network
pub fn regtest_checkpoints() -> Result<CheckpointData> {
    CheckpointData::new(
        [(0, genesis_hash("regtest checkpoint 0", REGTEST_GENESIS_HASH)?)],
        1_535_274_002,
        0,
        100.0,
    )
}

/// Production network constants
pub fn main_constants() -> Result<NetworkConstants> {
    Ok(NetworkConstants {
        network: NetworkId::Main,
        name: "main",
        // Rarely used upper ASCII, not valid as UTF-8, and a large 4-byte
        // int at any alignment.
        message_start: [0xdd, 0x6c, 0xf0, 0x04],
        alert_pubkey: decode(
            "alert_pubkey",
            "0400acad3e94eea458d6553f77c155ba5c02f4510273433879cd052af61b9b552539ef93909f8d4455664c32443300cc3fb67ae5dd10ce9fb0ecaa464bc422fa04",
        )?,
        default_port: 31601,

        pow_limit: U256::MAX >> 16u32,
        subsidy_halving_interval: 1_050_000,
        max_reorganization_depth: 100,
        enforce_block_upgrade_majority: 750,
        reject_block_outdated_majority: 950,
        to_check_block_upgrade_majority: 1000,
        miner_threads: 0,
        target_timespan: 60,
        target_spacing: 60,
        maturity: 10,
        masternode_count_drift: 20,
        max_money_out: 38_000_000 * COIN,
        last_pow_block: 500,
        modifier_update_block: 1,

        genesis_message: GENESIS_MESSAGE,
        genesis_output_pubkey: decode("genesis_output_pubkey", GENESIS_OUTPUT_PUBKEY)?,
        genesis_version: 1,
        genesis_time: MAIN_GENESIS_TIME,
        genesis_bits: 0x1e0f_fff0,
        genesis_nonce: 2_298_761,
        genesis_hash: genesis_hash("main genesis_hash", MAIN_GENESIS_HASH)?,
        genesis_merkle_root: parse_hash::<TxMerkleNode>("genesis_merkle_root", GENESIS_MERKLE_ROOT)?,

        pubkey_address_prefix: vec![30],  // 'D'
        script_address_prefix: vec![18],  // '8'
        secret_key_prefix: vec![28],      // 'C'
        ext_public_key_prefix: vec![0x04, 0x88, 0xB2, 0x1E], // xpub
        ext_secret_key_prefix: vec![0x04, 0x88, 0xAD, 0xE4], // xprv
        ext_coin_type: vec![0x80, 0x00, 0x00, 0x77],

        dns_seeds: vec![
            DnsSeed::new("seed1.dachcoin.live"),
            DnsSeed::new("seed2.dachcoin.live"),
            DnsSeed::new("seed3.dachcoin.live"),
            DnsSeed::new("seed4.dachcoin.live"),
        ],
        fixed_seeds: MAIN_SEEDS,

        mining_requires_peers: true,
        allow_min_difficulty_blocks: false,
        default_consistency_checks: false,
        require_standard: true,
        mine_blocks_on_demand: false,
        skip_proof_of_work_check: false,
        testnet_to_be_deprecated_field_rpc: false,
        headers_first_syncing_active: false,

        pool_max_transactions: 3,
        spork_key: "047d4136504b2568f24b1f35eb20416be10ec319562a2f84ca55736cf92c503bf28ab5e682385d9a76da5b7891d72f7d972baa5fae285c5ea594f7f1ee933d327b",
        masternode_pool_dummy_address: "DEKDMyd3vzWzzDaz3SQ1jTP4kxWFfPiGh7",
        start_masternode_payments: MAIN_GENESIS_TIME as i64 + MASTERNODE_PAYMENT_DELAY,
        budget_fee_confirmations: 6,

        checkpoints: main_checkpoints()?,
    })
}

/// What the public test network changes relative to main
pub fn testnet_overrides() -> Result<ConstantsOverride> {
    Ok(ConstantsOverride::default()
        .network(NetworkId::Testnet)
        .name("test")
        .message_start([0xed, 0x7d, 0xb1, 0x05])
        .alert_pubkey(decode(
            "testnet alert_pubkey",
            "042f19826cc5bf9bdcf91f12e24fce4869ad546922d2f2b0b7bd9ad25c0d82df1e639c8310a5e66110d7334177ce978c248691e38f46157dc1191f44cfa4166d9d",
        )?)
        .default_port(32701)
        .enforce_block_upgrade_majority(51)
        .reject_block_outdated_majority(75)
        .to_check_block_upgrade_majority(100)
        .miner_threads(0)
        .target_timespan(60)
        .target_spacing(60)
        .last_pow_block(20_100)
        .maturity(30)
        .masternode_count_drift(4)
        .modifier_update_block(1)
        .max_money_out(38_000_000 * COIN)
        .genesis_time(TESTNET_GENESIS_TIME)
        .genesis_nonce(3_462_091)
        .genesis_hash(genesis_hash("test genesis_hash", TESTNET_GENESIS_HASH)?)
        .pubkey_address_prefix(vec![127]) // 't'
        .script_address_prefix(vec![12])
        .secret_key_prefix(vec![113])
        .ext_public_key_prefix(vec![0x04, 0x35, 0x87, 0xCF]) // tpub
        .ext_secret_key_prefix(vec![0x04, 0x35, 0x83, 0x94]) // tprv
        .ext_coin_type(vec![0x80, 0x00, 0x00, 0x01])
        .dns_seeds(Vec::new())
        .fixed_seeds(TESTNET_SEEDS)
        .mining_requires_peers(true)
        .allow_min_difficulty_blocks(false)
        .default_consistency_checks(false)
        .require_standard(false)
        .mine_blocks_on_demand(false)
        .testnet_to_be_deprecated_field_rpc(true)
        .pool_max_transactions(2)
        .spork_key("04f5a781f68716efa05231d8da248f3e8107bb24bb6a1f1c119894a912af9fad0f9ed6a2fa773e1f80b390a07c244fe8c19dce8c6d87303498388f976b5fd65b59")
        .masternode_pool_dummy_address("DEKDMyd3vzWzzDaz3SQ1jTP4kxWFfPiGh7")
        .start_masternode_payments(TESTNET_GENESIS_TIME as i64 + MASTERNODE_PAYMENT_DELAY)
        // Short: testnet only has an 8 block finalization window.
        .budget_fee_confirmations(3)
        .checkpoints(testnet_checkpoints()?))
}

/// What the regression-test network changes relative to testnet
pub fn regtest_overrides() -> Result<ConstantsOverride> {
    Ok(ConstantsOverride::default()
        .network(NetworkId::Regtest)
        .name("regtest")
        .message_start([0xf1, 0xc2, 0xb1, 0xc4])
        .subsidy_halving_interval(150)
        .enforce_block_upgrade_majority(750)
        .reject_block_outdated_majority(950)
        .to_check_block_upgrade_majority(1000)
        .miner_threads(1)
        .target_timespan(24 * 60 * 60)
        .target_spacing(60)
        .pow_limit(U256::MAX >> 1u32)
        .genesis_time(REGTEST_GENESIS_TIME)
        .genesis_bits(0x1e0f_fff0)
        .genesis_nonce(1_503_802)
        .genesis_hash(genesis_hash("regtest genesis_hash", REGTEST_GENESIS_HASH)?)
        .default_port(49113)
        .pubkey_address_prefix(vec![140]) // 'y'
        .script_address_prefix(vec![19])
        .secret_key_prefix(vec![239])
        .ext_public_key_prefix(vec![0x04, 0x5F, 0x1C, 0xF6]) // vpub
        .ext_secret_key_prefix(vec![0x04, 0x5F, 0x18, 0xBC]) // vprv
        .ext_coin_type(vec![0x80, 0x00, 0x00, 0x78])
        .dns_seeds(Vec::new())
        .fixed_seeds(&[])
        .mining_requires_peers(false)
        .allow_min_difficulty_blocks(true)
        .default_consistency_checks(true)
        .require_standard(false)
        .mine_blocks_on_demand(true)
        .testnet_to_be_deprecated_field_rpc(false)
        .checkpoints(regtest_checkpoints()?))
}

/// What the unit-test network changes relative to main
pub fn unittest_overrides() -> ConstantsOverride {
    ConstantsOverride::default()
        .network(NetworkId::UnitTest)
        .name("unittest")
        .default_port(34701)
        .dns_seeds(Vec::new())
        .fixed_seeds(&[])
        .mining_requires_peers(false)
        .default_consistency_checks(true)
        .allow_min_difficulty_blocks(false)
        .mine_blocks_on_demand(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all() -> [NetworkConstants; 4] {
        let main = main_constants().unwrap();
        let testnet = main.derive(testnet_overrides().unwrap());
        let regtest = testnet.derive(regtest_overrides().unwrap());
        let unittest = main.derive(unittest_overrides());
        [main, testnet, regtest, unittest]
    }

    #[test]
    fn test_testnet_inherits_untouched_fields() {
        let [main, testnet, _, _] = all();
        let overridden = testnet_overrides().unwrap().overridden_fields();

        assert!(!overridden.contains(&"subsidy_halving_interval"));
        assert_eq!(testnet.subsidy_halving_interval, main.subsidy_halving_interval);
        assert!(!overridden.contains(&"pow_limit"));
        assert_eq!(testnet.pow_limit, main.pow_limit);
        assert!(!overridden.contains(&"genesis_message"));
        assert_eq!(testnet.genesis_message, main.genesis_message);
        assert_eq!(testnet.genesis_bits, main.genesis_bits);
        assert_eq!(testnet.max_reorganization_depth, 100);
    }

    #[test]
    fn test_testnet_replaces_overridden_fields() {
        let [main, testnet, _, _] = all();
        assert_eq!(testnet.network, NetworkId::Testnet);
        assert_eq!(testnet.name, "test");
        assert_eq!(testnet.default_port, 32701);
        assert_eq!(testnet.maturity, 30);
        assert_eq!(testnet.last_pow_block, 20_100);
        assert_ne!(testnet.alert_pubkey, main.alert_pubkey);
        assert_ne!(testnet.spork_key, main.spork_key);
        assert!(testnet.dns_seeds.is_empty());
        assert!(testnet.testnet_to_be_deprecated_field_rpc);
    }

    #[test]
    fn test_regtest_layers_on_testnet() {
        let [_, testnet, regtest, _] = all();
        assert_eq!(regtest.subsidy_halving_interval, 150);
        assert_eq!(regtest.pow_limit.leading_zeros(), 1);
        assert_eq!(regtest.difficulty_adjustment_interval(), 1_440);

        // Inherited from testnet, not main.
        assert_eq!(regtest.maturity, testnet.maturity);
        assert_eq!(regtest.alert_pubkey, testnet.alert_pubkey);
        assert_ne!(regtest.ext_public_key_prefix, testnet.ext_public_key_prefix);
        assert_ne!(regtest.ext_coin_type, testnet.ext_coin_type);
        assert_eq!(regtest.start_masternode_payments, 1_535_288_401);
        assert_eq!(regtest.budget_fee_confirmations, 3);
        assert_eq!(regtest.pool_max_transactions, 2);
    }

    #[test]
    fn test_unittest_layers_on_main() {
        let [main, _, _, unittest] = all();
        assert_eq!(unittest.network, NetworkId::UnitTest);
        assert_eq!(unittest.default_port, 34701);
        assert_eq!(unittest.genesis_hash, main.genesis_hash);
        assert_eq!(unittest.message_start, main.message_start);
        assert_eq!(unittest.checkpoints, main.checkpoints);
        assert!(unittest.require_standard);
        assert!(unittest.mine_blocks_on_demand);
        assert!(!unittest.mining_requires_peers);
        assert!(unittest.fixed_seeds.is_empty());
    }

    #[test]
    fn test_main_constants() {
        let main = main_constants().unwrap();
        assert_eq!(main.pow_limit.leading_zeros(), 16);
        assert_eq!(main.max_money_out, 3_800_000_000_000_000);
        assert_eq!(main.start_masternode_payments, 1_535_288_400);
        assert_eq!(main.difficulty_adjustment_interval(), 1);
        assert_eq!(main.genesis_output_pubkey.len(), 65);
        assert_eq!(main.alert_pubkey.len(), 65);
        assert_eq!(main.dns_seeds.len(), 4);
    }

    #[test]
    fn test_money_range() {
        let main = main_constants().unwrap();
        assert!(main.money_range(0));
        assert!(main.money_range(main.max_money_out));
        assert!(!main.money_range(main.max_money_out + 1));
        assert!(!main.money_range(-1));
    }

    #[test]
    fn test_override_is_replacement_not_merge() {
        let main = main_constants().unwrap();
        let derived = main.derive(ConstantsOverride::default().dns_seeds(vec![DnsSeed::new("x.example")]));
        assert_eq!(derived.dns_seeds, vec![DnsSeed::new("x.example")]);
        assert_eq!(
            ConstantsOverride::default().dns_seeds(Vec::new()).overridden_fields(),
            vec!["dns_seeds"]
        );
    }

    #[test]
    fn test_parse_hash_is_display_order() {
        let hash: BlockHash = parse_hash("main", MAIN_GENESIS_HASH).unwrap();
        assert_eq!(hash.to_string(), MAIN_GENESIS_HASH);
        assert_eq!(hash.to_byte_array()[31], 0x00);
        assert_eq!(hash.to_byte_array()[0], 0x9f);

        let root: TxMerkleNode = parse_hash("root", GENESIS_MERKLE_ROOT).unwrap();
        assert_eq!(root.to_string(), GENESIS_MERKLE_ROOT);

        let err = parse_hash::<BlockHash>("short", "00ff").unwrap_err();
        assert!(matches!(err, Error::InvalidLiteral { field: "short", .. }));
    }

    #[test]
    fn test_empty_override_copies_parent() {
        let main = main_constants().unwrap();
        assert_eq!(main.derive(ConstantsOverride::default()), main);
        assert!(ConstantsOverride::default().overridden_fields().is_empty());
    }
}
