use soroban_sdk::{Address, Env};

use crate::errors::Error;
use crate::types::{
    AuctionState, DataKey, InitState, TokenPolicy, INSTANCE_TTL_AMOUNT, INSTANCE_TTL_THRESHOLD,
    PERSISTENT_TTL_AMOUNT, PERSISTENT_TTL_THRESHOLD,
};

// ============================================================================
// INITIALIZATION STORAGE
// ============================================================================

pub fn init_state(env: &Env) -> InitState {
    env.storage()
        .instance()
        .get(&DataKey::Init)
        .unwrap_or(InitState::Uninitialized)
}

pub fn set_initialized(env: &Env) {
    env.storage()
        .instance()
        .set(&DataKey::Init, &InitState::Initialized);
}

// ============================================================================
// AUCTION STATE STORAGE
// ============================================================================

/// Load the auction state, failing if `initialize` has not run.
pub fn load_state(env: &Env) -> Result<AuctionState, Error> {
    if init_state(env) != InitState::Initialized {
        return Err(Error::NotInitialized);
    }
    env.storage()
        .instance()
        .get(&DataKey::State)
        .ok_or(Error::NotInitialized)
}

pub fn save_state(env: &Env, state: &AuctionState) {
    env.storage().instance().set(&DataKey::State, state);
    extend_instance_ttl(env);
}

pub fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_AMOUNT);
}

// ============================================================================
// TOKEN POLICY STORAGE
// ============================================================================

pub fn get_token_policy(env: &Env, token: &Address) -> Option<TokenPolicy> {
    let key = DataKey::Token(token.clone());
    let policy = env.storage().persistent().get::<_, TokenPolicy>(&key);
    if policy.is_some() {
        env.storage()
            .persistent()
            .extend_ttl(&key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_AMOUNT);
    }
    policy
}

pub fn set_token_policy(env: &Env, token: &Address, policy: &TokenPolicy) {
    let key = DataKey::Token(token.clone());
    env.storage().persistent().set(&key, policy);
    env.storage()
        .persistent()
        .extend_ttl(&key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_AMOUNT);
}

pub fn remove_token_policy(env: &Env, token: &Address) {
    env.storage()
        .persistent()
        .remove(&DataKey::Token(token.clone()));
}
