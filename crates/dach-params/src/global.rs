//! Process-wide chain parameters
//!
//! Node code reads the active parameters from many places. The selector is
//! installed once at startup, then selected by network id; reads take a
//! shared lock and only unittest mutation takes the write lock.

use crate::chain_params::{ChainParams, ModifiableParams};
use crate::network::NetworkId;
use crate::registry::ParamsSelector;
use crate::{Error, Result};
use dach_primitives::HeaderHasher;
use once_cell::sync::OnceCell;
use parking_lot::{MappedRwLockReadGuard, RwLock, RwLockReadGuard};

static SELECTOR: OnceCell<RwLock<ParamsSelector>> = OnceCell::new();

fn selector() -> Result<&'static RwLock<ParamsSelector>> {
    SELECTOR.get().ok_or(Error::NotInstalled)
}

/// Build every network with `hasher` and install the process-wide selector
pub fn install<H>(hasher: &H) -> Result<()>
where
    H: HeaderHasher + ?Sized,
{
    install_selector(ParamsSelector::with_hasher(hasher)?)
}

/// Install an already-built selector
pub fn install_selector(selector: ParamsSelector) -> Result<()> {
    SELECTOR
        .set(RwLock::new(selector))
        .map_err(|_| Error::AlreadyInstalled)
}

/// Whether the process-wide selector has been installed
pub fn is_installed() -> bool {
    SELECTOR.get().is_some()
}

/// Make `network` the active network
pub fn select_params(network: NetworkId) -> Result<()> {
    selector()?.write().select_params(network);
    Ok(())
}

/// Select by string id
pub fn select_params_by_name(name: &str) -> Result<NetworkId> {
    selector()?.write().select_params_by_name(name)
}

/// Currently selected network
pub fn active_network() -> Result<Option<NetworkId>> {
    Ok(selector()?.read().active_network())
}

/// Read guard on the active parameters
///
/// Holding the guard blocks unittest mutation; drop it before calling
/// [`with_modifiable_params`].
pub fn params() -> Result<MappedRwLockReadGuard<'static, ChainParams>> {
    let guard = selector()?.read();
    RwLockReadGuard::try_map(guard, |s| s.active_params().ok()).map_err(|_| Error::NotSelected)
}

/// Read guard on the parameters of `network`
pub fn params_for(network: NetworkId) -> Result<MappedRwLockReadGuard<'static, ChainParams>> {
    let guard = selector()?.read();
    Ok(RwLockReadGuard::map(guard, |s| s.params_for(network)))
}

/// Run `f` with a mutable handle on the unittest parameters
pub fn with_modifiable_params<F, T>(f: F) -> Result<T>
where
    F: FnOnce(&mut ModifiableParams<'_>) -> T,
{
    let mut guard = selector()?.write();
    let mut handle = guard.modifiable_params()?;
    Ok(f(&mut handle))
}
