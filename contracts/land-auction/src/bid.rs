use soroban_sdk::{Address, Env, Vec};

use crate::conversion;
use crate::errors::Error;
use crate::events::BidSuccessful;
use crate::interfaces::LandRegistryClient;
use crate::settlement;
use crate::storage;
use crate::types::{AuctionState, AuctionStatus, BidReceipt, TokenPolicy, COORDINATE_LIMIT};

/// Fulfil a bid for the parcels `(xs[i], ys[i])` paid by `bidder` in `token`.
///
/// Mutates `state` in place; the caller persists it on success.
pub fn submit_bid(
    env: &Env,
    state: &mut AuctionState,
    bidder: &Address,
    xs: &Vec<i32>,
    ys: &Vec<i32>,
    beneficiary: &Address,
    token: &Address,
) -> Result<BidReceipt, Error> {
    let policy = validate_bid(env, state, xs, ys, beneficiary, token)?;

    let bid_id = state.total_bids;
    let elapsed = env.ledger().timestamp() - state.start_time;
    let unit_price = state.curve.price(elapsed)?;
    let mut total_price = unit_price
        .checked_mul(i128::from(xs.len()))
        .ok_or(Error::ArithmeticOverflow)?;

    if *token == state.base_token {
        settlement::collect(env, token, bidder, total_price)?;
    } else {
        let conversion =
            conversion::convert_for_bid(env, state, bid_id, bidder, token, &policy, total_price)?;
        total_price = conversion.base_amount;
    }

    let disposed = settlement::dispose_funds(env, state, bid_id, token, &policy)?;

    // Bounds are checked after payment; a failure here unwinds the transfers.
    validate_coordinates(xs, ys)?;

    LandRegistryClient::new(env, &state.land_registry).assign_multiple_parcels(
        xs,
        ys,
        beneficiary,
    );

    state.total_bids = state
        .total_bids
        .checked_add(1)
        .ok_or(Error::ArithmeticOverflow)?;
    state.stats.total_lands_bid = state
        .stats
        .total_lands_bid
        .checked_add(u64::from(xs.len()))
        .ok_or(Error::ArithmeticOverflow)?;
    state.stats.total_base_disposed = state
        .stats
        .total_base_disposed
        .checked_add(disposed)
        .ok_or(Error::ArithmeticOverflow)?;

    BidSuccessful {
        bid_id,
        beneficiary: beneficiary.clone(),
        token: token.clone(),
        unit_price,
        total_price,
        xs: xs.clone(),
        ys: ys.clone(),
    }
    .publish(env);

    Ok(BidReceipt {
        bid_id,
        unit_price,
        total_price,
    })
}

/// Admission checks, in order; nothing has moved when one fails.
fn validate_bid(
    env: &Env,
    state: &AuctionState,
    xs: &Vec<i32>,
    ys: &Vec<i32>,
    beneficiary: &Address,
    token: &Address,
) -> Result<TokenPolicy, Error> {
    if state.status == AuctionStatus::Finished {
        return Err(Error::AuctionFinished);
    }
    let now = env.ledger().timestamp();
    if now < state.start_time {
        return Err(Error::AuctionNotStarted);
    }
    if now - state.start_time > state.curve.duration {
        return Err(Error::AuctionEnded);
    }

    // The host gives contracts no view of the transaction's fee bid, so
    // `gas_price_limit` has nothing to be compared against here.

    if *beneficiary == env.current_contract_address() {
        return Err(Error::InvalidBeneficiary);
    }
    if xs.is_empty() {
        return Err(Error::EmptyBid);
    }
    if xs.len() > state.lands_limit_per_bid {
        return Err(Error::LandsLimitExceeded);
    }
    if xs.len() != ys.len() {
        return Err(Error::CoordinatesMismatch);
    }

    match storage::get_token_policy(env, token) {
        Some(policy) if policy.is_allowed => Ok(policy),
        _ => Err(Error::TokenNotAllowed),
    }
}

fn validate_coordinates(xs: &Vec<i32>, ys: &Vec<i32>) -> Result<(), Error> {
    let in_bounds = |c: i32| (-COORDINATE_LIMIT..=COORDINATE_LIMIT).contains(&c);
    if xs.iter().zip(ys.iter()).all(|(x, y)| in_bounds(x) && in_bounds(y)) {
        Ok(())
    } else {
        Err(Error::CoordinateOutOfBounds)
    }
}
