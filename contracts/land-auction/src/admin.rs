use soroban_sdk::{Address, Env};

use crate::errors::Error;
use crate::storage;
use crate::types::AuctionState;

/// Load the state and check that `admin` is the configured principal and
/// has signed the call.
pub fn require_admin(env: &Env, admin: &Address) -> Result<AuctionState, Error> {
    admin.require_auth();
    let state = storage::load_state(env)?;
    if state.admin != *admin {
        return Err(Error::Unauthorized);
    }
    Ok(state)
}

/// Whether `address` has an executable behind it (a deployed contract or
/// built-in asset contract).
pub fn is_contract(address: &Address) -> bool {
    address.executable().is_some()
}
