use soroban_sdk::{log, token, Address, Env};

use crate::errors::Error;
use crate::events::{TokenBurned, TokenTransferred};
use crate::storage;
use crate::types::{AuctionState, DisposalStrategy, TokenPolicy};

/// Move `amount` of `token` from `payer` into the auction.
pub fn collect(env: &Env, token: &Address, payer: &Address, amount: i128) -> Result<(), Error> {
    let client = token::TokenClient::new(env, token);
    match client.try_transfer(payer, &env.current_contract_address(), &amount) {
        Ok(Ok(())) => Ok(()),
        _ => Err(Error::TransferFailed),
    }
}

/// Dispose of everything collected for a bid paid in `token`.
///
/// A retained alternate-token portion goes first, then the whole base
/// currency balance. Returns the amount of base currency disposed.
pub fn dispose_funds(
    env: &Env,
    state: &AuctionState,
    bid_id: u64,
    token: &Address,
    policy: &TokenPolicy,
) -> Result<i128, Error> {
    if *token != state.base_token && policy.should_retain_portion {
        dispose_token(env, state, bid_id, token, policy.disposal)?;
    }

    let base_policy =
        storage::get_token_policy(env, &state.base_token).ok_or(Error::TokenNotAllowed)?;
    dispose_token(env, state, bid_id, &state.base_token, base_policy.disposal)
}

/// Empty the auction's balance of `token` according to `strategy`.
pub fn dispose_token(
    env: &Env,
    state: &AuctionState,
    bid_id: u64,
    token: &Address,
    strategy: DisposalStrategy,
) -> Result<i128, Error> {
    let client = token::TokenClient::new(env, token);
    let this = env.current_contract_address();

    let balance = client.balance(&this);
    if balance <= 0 {
        return Err(Error::NothingToDispose);
    }

    match strategy {
        DisposalStrategy::Burn => {
            client.burn(&this, &balance);
            TokenBurned {
                bid_id,
                token: token.clone(),
                amount: balance,
            }
            .publish(env);
        }
        DisposalStrategy::Sink => forward(env, &client, bid_id, token, &state.sink, balance),
        DisposalStrategy::Charity => {
            forward(env, &client, bid_id, token, &state.charity, balance)
        }
    }

    let residual = client.balance(&this);
    if residual != 0 {
        log!(env, "residual balance after disposal", token, residual);
        return Err(Error::ResidualBalance);
    }
    Ok(balance)
}

fn forward(
    env: &Env,
    client: &token::TokenClient,
    bid_id: u64,
    token: &Address,
    to: &Address,
    amount: i128,
) {
    client.transfer(&env.current_contract_address(), to, &amount);
    TokenTransferred {
        bid_id,
        token: token.clone(),
        to: to.clone(),
        amount,
    }
    .publish(env);
}
