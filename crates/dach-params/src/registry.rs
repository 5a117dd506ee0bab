//! Registry of every network's parameters and the active-network selector

use crate::chain_params::{ChainParams, ModifiableParams};
use crate::network::NetworkId;
use crate::variants;
use crate::{Error, Result};
use dach_primitives::HeaderHasher;
use tracing::{debug, info};

/// Verified parameters of all four networks
///
/// Main is built from its full table; testnet is derived from main, regtest
/// from testnet and unittest from main.
#[derive(Debug, Clone)]
pub struct ChainParamsRegistry {
    main: ChainParams,
    testnet: ChainParams,
    regtest: ChainParams,
    unittest: ChainParams,
}

impl ChainParamsRegistry {
    /// Build and verify every network
    pub fn new<H>(hasher: &H) -> Result<Self>
    where
        H: HeaderHasher + ?Sized,
    {
        let main_constants = variants::main_constants()?;
        let testnet_constants = main_constants.derive(variants::testnet_overrides()?);
        let regtest_constants = testnet_constants.derive(variants::regtest_overrides()?);
        let unittest_constants = main_constants.derive(variants::unittest_overrides());

        let registry = Self {
            main: ChainParams::build(main_constants, hasher)?,
            testnet: ChainParams::build(testnet_constants, hasher)?,
            regtest: ChainParams::build(regtest_constants, hasher)?,
            unittest: ChainParams::build(unittest_constants, hasher)?,
        };

        info!(
            "Chain parameters ready: main {}, test {}, regtest {}",
            registry.main.genesis_hash(),
            registry.testnet.genesis_hash(),
            registry.regtest.genesis_hash()
        );
        Ok(registry)
    }

    /// Parameters of `network`
    pub fn params_for(&self, network: NetworkId) -> &ChainParams {
        match network {
            NetworkId::Main => &self.main,
            NetworkId::Testnet => &self.testnet,
            NetworkId::Regtest => &self.regtest,
            NetworkId::UnitTest => &self.unittest,
        }
    }

    fn params_for_mut(&mut self, network: NetworkId) -> &mut ChainParams {
        match network {
            NetworkId::Main => &mut self.main,
            NetworkId::Testnet => &mut self.testnet,
            NetworkId::Regtest => &mut self.regtest,
            NetworkId::UnitTest => &mut self.unittest,
        }
    }
}

/// Tracks which network is active
///
/// No network is active until [`select_params`](Self::select_params) is
/// called. Reselection is allowed; the last selection wins.
#[derive(Debug, Clone)]
pub struct ParamsSelector {
    registry: ChainParamsRegistry,
    active: Option<NetworkId>,
}

impl ParamsSelector {
    /// Selector with nothing selected
    pub fn new(registry: ChainParamsRegistry) -> Self {
        Self {
            registry,
            active: None,
        }
    }

    /// Build a registry with `hasher` and wrap it
    pub fn with_hasher<H>(hasher: &H) -> Result<Self>
    where
        H: HeaderHasher + ?Sized,
    {
        Ok(Self::new(ChainParamsRegistry::new(hasher)?))
    }

    /// Make `network` the active network
    pub fn select_params(&mut self, network: NetworkId) {
        if let Some(previous) = self.active.replace(network) {
            if previous != network {
                debug!("Reselecting chain parameters: {} -> {}", previous, network);
            }
        }
        info!("Selected {} chain parameters", network);
    }

    /// Select by string id, as given on a command line or in a config file
    pub fn select_params_by_name(&mut self, name: &str) -> Result<NetworkId> {
        let network: NetworkId = name.parse()?;
        self.select_params(network);
        Ok(network)
    }

    /// Currently selected network
    pub fn active_network(&self) -> Option<NetworkId> {
        self.active
    }

    /// Parameters of the selected network
    pub fn active_params(&self) -> Result<&ChainParams> {
        let network = self.active.ok_or(Error::NotSelected)?;
        Ok(self.registry.params_for(network))
    }

    /// Parameters of any network, regardless of selection
    pub fn params_for(&self, network: NetworkId) -> &ChainParams {
        self.registry.params_for(network)
    }

    /// Mutable handle on the active parameters; only unittest allows this
    pub fn modifiable_params(&mut self) -> Result<ModifiableParams<'_>> {
        match self.active {
            None => Err(Error::NotSelected),
            Some(NetworkId::UnitTest) => Ok(ModifiableParams::new(
                self.registry.params_for_mut(NetworkId::UnitTest),
            )),
            Some(other) => Err(Error::NotModifiable(other)),
        }
    }

    /// The underlying registry
    pub fn registry(&self) -> &ChainParamsRegistry {
        &self.registry
    }
}
