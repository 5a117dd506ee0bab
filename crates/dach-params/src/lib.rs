//! Dachcoin chain parameters
//!
//! This crate defines the per-network constants of Dachcoin (main, test,
//! regtest and unittest), builds and verifies each network's genesis block,
//! and tracks which network a process has selected.
//!
//! Networks are described as flat constant records; derived networks apply
//! field-level overrides to a parent record. Parameters are built once,
//! checked against their hardcoded genesis literals and read-only from then
//! on, except for the unittest network which tests may adjust through
//! [`ModifiableParams`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod chain_params;
pub mod checkpoints;
pub mod consensus;
pub mod error;
pub mod genesis;
pub mod global;
pub mod network;
pub mod registry;
pub mod seeds;
pub mod variants;

#[cfg(any(test, feature = "test-helpers"))]
pub mod testing;

pub use chain_params::{ChainParams, ModifiableParams, ParamsSummary};
pub use checkpoints::CheckpointData;
pub use consensus::{ConstantsOverride, NetworkConstants, COIN};
pub use error::{Error, ErrorKind, GenesisField, Result};
pub use genesis::{build_verified_genesis, create_genesis_block, GenesisInputs, VerifiedGenesis};
pub use network::{Base58Type, DnsSeed, MessageStart, NetworkId};
pub use registry::{ChainParamsRegistry, ParamsSelector};
pub use seeds::{convert_seed6, SeedSpec6};
