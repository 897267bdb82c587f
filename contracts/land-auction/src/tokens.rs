use soroban_sdk::{Address, Env};

use crate::admin;
use crate::errors::Error;
use crate::events::{TokenAllowed, TokenDisallowed};
use crate::storage;
use crate::types::{AuctionState, DisposalStrategy, TokenPolicy, MAX_DECIMALS};

pub fn allow(
    env: &Env,
    token: &Address,
    decimals: u32,
    should_retain_portion: bool,
    disposal: DisposalStrategy,
) -> Result<(), Error> {
    if !admin::is_contract(token) {
        return Err(Error::NotAContract);
    }
    if decimals == 0 || decimals > MAX_DECIMALS {
        return Err(Error::InvalidDecimals);
    }
    if is_accepted(env, token) {
        return Err(Error::TokenAlreadyAllowed);
    }

    let policy = TokenPolicy {
        decimals,
        is_allowed: true,
        should_retain_portion,
        disposal,
    };
    storage::set_token_policy(env, token, &policy);

    TokenAllowed {
        token: token.clone(),
        decimals,
        should_retain_portion,
        disposal,
    }
    .publish(env);
    Ok(())
}

/// Drop the whole policy so nothing of it survives a later `allow`.
pub fn disallow(env: &Env, state: &AuctionState, token: &Address) -> Result<(), Error> {
    if *token == state.base_token {
        return Err(Error::CannotDisallowBaseToken);
    }
    if !is_accepted(env, token) {
        return Err(Error::TokenNotAllowed);
    }
    storage::remove_token_policy(env, token);

    TokenDisallowed {
        token: token.clone(),
    }
    .publish(env);
    Ok(())
}

pub fn is_accepted(env: &Env, token: &Address) -> bool {
    storage::get_token_policy(env, token).is_some_and(|p| p.is_allowed)
}

pub fn policy_of(env: &Env, token: &Address) -> Result<TokenPolicy, Error> {
    storage::get_token_policy(env, token).ok_or(Error::TokenNotAllowed)
}
