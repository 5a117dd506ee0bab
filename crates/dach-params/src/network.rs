//! Dachcoin network definitions

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Network identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NetworkId {
    /// Production network
    #[serde(rename = "main", alias = "mainnet")]
    Main,
    /// Public test network
    #[serde(rename = "test", alias = "testnet")]
    Testnet,
    /// Local regression-test network
    #[serde(rename = "regtest")]
    Regtest,
    /// In-process network for automated tests
    #[serde(rename = "unittest")]
    UnitTest,
}

impl NetworkId {
    /// All networks, in construction order
    pub const ALL: [NetworkId; 4] = [
        NetworkId::Main,
        NetworkId::Testnet,
        NetworkId::Regtest,
        NetworkId::UnitTest,
    ];

    /// Canonical string id
    pub const fn as_str(&self) -> &'static str {
        match self {
            NetworkId::Main => "main",
            NetworkId::Testnet => "test",
            NetworkId::Regtest => "regtest",
            NetworkId::UnitTest => "unittest",
        }
    }

    /// Iterate over all networks
    pub fn iter() -> impl Iterator<Item = NetworkId> {
        Self::ALL.into_iter()
    }
}

impl fmt::Display for NetworkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NetworkId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "main" | "mainnet" => Ok(NetworkId::Main),
            "test" | "testnet" => Ok(NetworkId::Testnet),
            "regtest" => Ok(NetworkId::Regtest),
            "unittest" => Ok(NetworkId::UnitTest),
            other => Err(Error::UnknownNetwork(other.to_string())),
        }
    }
}

/// Four bytes framing every wire message of a network
pub type MessageStart = [u8; 4];

/// Purpose of a base58 version prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Base58Type {
    /// Pay-to-pubkey-hash address
    PubkeyAddress,
    /// Pay-to-script-hash address
    ScriptAddress,
    /// WIF private key
    SecretKey,
    /// BIP32 extended public key
    ExtPublicKey,
    /// BIP32 extended private key
    ExtSecretKey,
    /// BIP44 coin type (hardened index bytes)
    ExtCoinType,
}

impl Base58Type {
    /// All prefix purposes
    pub const ALL: [Base58Type; 6] = [
        Base58Type::PubkeyAddress,
        Base58Type::ScriptAddress,
        Base58Type::SecretKey,
        Base58Type::ExtPublicKey,
        Base58Type::ExtSecretKey,
        Base58Type::ExtCoinType,
    ];
}

/// DNS seed entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsSeed {
    /// Display name
    pub name: String,
    /// Hostname to resolve
    pub host: String,
}

impl DnsSeed {
    /// Seed whose name is its host
    pub fn new(host: &str) -> Self {
        Self {
            name: host.to_string(),
            host: host.to_string(),
        }
    }
}
