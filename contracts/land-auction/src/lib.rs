#![no_std]

//! # LAND Auction
//!
//! Soroban contract selling parcels of a land registry through a Dutch
//! auction. The unit price falls along a piecewise-linear curve from the
//! scheduled start; each bid buys one or more parcels at the current price.
//!
//! Bids may be paid in the base currency or in any allowed alternate token.
//! Alternate tokens are swapped into base currency through an external
//! exchange with a deposit buffer, and unspent input is returned to the
//! bidder. Everything collected is disposed of within the same bid (burned,
//! or forwarded to a sink or charity address), so the contract never carries
//! a balance between bids.
//!
//! ## Modules
//!
//! - [`curve`] - price curve construction and evaluation.
//! - [`tokens`] - accepted payment tokens and their policies.
//! - [`conversion`] - alternate-token pricing and exchange settlement.
//! - [`settlement`] - payment collection and fund disposal.
//! - [`bid`] - bid admission and fulfilment.

mod admin;
mod bid;
pub mod conversion;
pub mod curve;
mod errors;
mod events;
pub mod interfaces;
pub mod settlement;
mod storage;
pub mod tokens;
mod types;

#[cfg(test)]
mod test;

use soroban_sdk::{contract, contractimpl, Address, Env, Vec};

pub use crate::errors::Error;
pub use crate::events::*;
pub use crate::types::*;

#[contract]
pub struct LandAuction;

#[contractimpl]
impl LandAuction {
    // ========================================================================
    // INITIALIZATION
    // ========================================================================

    /// Initialize the auction.
    ///
    /// # Arguments
    /// * `admin` - Address allowed to configure and finish the auction
    /// * `params` - Collaborators, schedule, price curve and limits
    ///
    /// # Errors
    /// * `Error::AlreadyInitialized` - If the contract has already been initialized
    /// * `Error::InvalidCurve` - If the breakpoints do not form a descending curve
    /// * `Error::InvalidLimit` - If either limit is zero
    /// * `Error::InvalidStartTime` - If the start time is in the past
    /// * `Error::NotAContract` - If a collaborator address is not deployed
    pub fn initialize(env: Env, admin: Address, params: AuctionParams) -> Result<(), Error> {
        admin.require_auth();

        if storage::init_state(&env) == InitState::Initialized {
            return Err(Error::AlreadyInitialized);
        }

        let curve = PriceCurve::build(&env, &params.times, &params.prices)?;

        if params.lands_limit_per_bid == 0 || params.gas_price_limit == 0 {
            return Err(Error::InvalidLimit);
        }
        if params.start_time < env.ledger().timestamp() {
            return Err(Error::InvalidStartTime);
        }
        if !admin::is_contract(&params.base_token) || !admin::is_contract(&params.land_registry)
        {
            return Err(Error::NotAContract);
        }
        if let Some(exchange) = &params.exchange {
            if !admin::is_contract(exchange) {
                return Err(Error::NotAContract);
            }
        }

        let state = AuctionState {
            admin: admin.clone(),
            base_token: params.base_token.clone(),
            land_registry: params.land_registry,
            exchange: params.exchange,
            sink: params.sink,
            charity: params.charity,
            status: AuctionStatus::Created,
            start_time: params.start_time,
            curve,
            lands_limit_per_bid: params.lands_limit_per_bid,
            gas_price_limit: params.gas_price_limit,
            conversion_fee: DEFAULT_CONVERSION_FEE,
            total_bids: 0,
            stats: AuctionStats::default(),
        };

        storage::set_token_policy(
            &env,
            &params.base_token,
            &TokenPolicy {
                decimals: MAX_DECIMALS,
                is_allowed: true,
                should_retain_portion: false,
                disposal: DisposalStrategy::Burn,
            },
        );
        storage::save_state(&env, &state);
        storage::set_initialized(&env);

        AuctionCreated {
            admin,
            start_time: state.start_time,
            initial_price: state.curve.initial_price,
            end_price: state.curve.end_price,
            duration: state.curve.duration,
        }
        .publish(&env);

        Ok(())
    }

    // ========================================================================
    // BIDDING
    // ========================================================================

    /// Buy the parcels `(xs[i], ys[i])` for `beneficiary` at the current
    /// price, paying in `token`.
    ///
    /// Returns the assigned bid id together with the unit price and the
    /// base-currency total actually credited. Any failure leaves balances and
    /// counters untouched.
    pub fn bid(
        env: Env,
        bidder: Address,
        xs: Vec<i32>,
        ys: Vec<i32>,
        beneficiary: Address,
        token: Address,
    ) -> Result<BidReceipt, Error> {
        bidder.require_auth();

        let mut state = storage::load_state(&env)?;
        let receipt = bid::submit_bid(&env, &mut state, &bidder, &xs, &ys, &beneficiary, &token)?;
        storage::save_state(&env, &state);

        Ok(receipt)
    }

    // ========================================================================
    // LIFECYCLE
    // ========================================================================

    /// Close the auction for good (admin only)
    pub fn finish_auction(env: Env, admin: Address) -> Result<(), Error> {
        let mut state = admin::require_admin(&env, &admin)?;

        if state.status == AuctionStatus::Finished {
            return Err(Error::AuctionFinished);
        }

        let now = env.ledger().timestamp();
        let unit_price = state.curve.price(now.saturating_sub(state.start_time))?;
        state.status = AuctionStatus::Finished;
        storage::save_state(&env, &state);

        AuctionFinished {
            admin,
            time: now,
            unit_price,
        }
        .publish(&env);

        Ok(())
    }

    // ========================================================================
    // TOKEN REGISTRY
    // ========================================================================

    /// Accept `token` as payment (admin only)
    ///
    /// # Arguments
    /// * `decimals` - Token decimals, `1..=18`
    /// * `should_retain_portion` - Keep 5% of each payment unconverted
    /// * `disposal` - How collected balances of the token are disposed of
    ///
    /// # Errors
    /// * `Error::NotAContract` - If `token` is not a deployed contract
    /// * `Error::InvalidDecimals` - If `decimals` is out of range
    /// * `Error::TokenAlreadyAllowed` - If the token is already accepted
    pub fn allow_token(
        env: Env,
        admin: Address,
        token: Address,
        decimals: u32,
        should_retain_portion: bool,
        disposal: DisposalStrategy,
    ) -> Result<(), Error> {
        admin::require_admin(&env, &admin)?;
        tokens::allow(&env, &token, decimals, should_retain_portion, disposal)?;
        storage::extend_instance_ttl(&env);
        Ok(())
    }

    /// Stop accepting `token` (admin only)
    pub fn disallow_token(env: Env, admin: Address, token: Address) -> Result<(), Error> {
        let state = admin::require_admin(&env, &admin)?;
        tokens::disallow(&env, &state, &token)?;
        storage::extend_instance_ttl(&env);
        Ok(())
    }

    pub fn is_token_accepted(env: Env, token: Address) -> bool {
        tokens::is_accepted(&env, &token)
    }

    pub fn token_policy(env: Env, token: Address) -> Result<TokenPolicy, Error> {
        tokens::policy_of(&env, &token)
    }

    // ========================================================================
    // CONFIGURATION
    // ========================================================================

    /// Update the gas price limit (admin only)
    pub fn set_gas_price_limit(env: Env, admin: Address, limit: u64) -> Result<(), Error> {
        let mut state = admin::require_admin(&env, &admin)?;

        if limit == 0 {
            return Err(Error::InvalidLimit);
        }

        let old_limit = state.gas_price_limit;
        state.gas_price_limit = limit;
        storage::save_state(&env, &state);

        GasPriceLimitChanged {
            old_limit,
            new_limit: limit,
        }
        .publish(&env);
        Ok(())
    }

    /// Update how many parcels a single bid may buy (admin only)
    pub fn set_lands_limit_per_bid(env: Env, admin: Address, limit: u32) -> Result<(), Error> {
        let mut state = admin::require_admin(&env, &admin)?;

        if limit == 0 {
            return Err(Error::InvalidLimit);
        }

        let old_limit = state.lands_limit_per_bid;
        state.lands_limit_per_bid = limit;
        storage::save_state(&env, &state);

        LandsLimitPerBidChanged {
            old_limit,
            new_limit: limit,
        }
        .publish(&env);
        Ok(())
    }

    /// Point alternate-token payments at a new exchange (admin only)
    pub fn set_exchange(env: Env, admin: Address, exchange: Address) -> Result<(), Error> {
        let mut state = admin::require_admin(&env, &admin)?;

        if !admin::is_contract(&exchange) {
            return Err(Error::NotAContract);
        }
        if state.exchange.as_ref() == Some(&exchange) {
            return Err(Error::ExchangeUnchanged);
        }

        let old_exchange = state.exchange.replace(exchange.clone());
        storage::save_state(&env, &state);

        ExchangeChanged {
            old_exchange,
            new_exchange: exchange,
        }
        .publish(&env);
        Ok(())
    }

    /// Update the deposit buffer applied before quoting (admin only)
    ///
    /// `fee` is a percentage multiplier: 105 quotes 5% above the price.
    pub fn set_conversion_fee(env: Env, admin: Address, fee: u32) -> Result<(), Error> {
        let mut state = admin::require_admin(&env, &admin)?;

        if !(MIN_CONVERSION_FEE..MAX_CONVERSION_FEE).contains(&fee) {
            return Err(Error::InvalidConversionFee);
        }

        let old_fee = state.conversion_fee;
        state.conversion_fee = fee;
        storage::save_state(&env, &state);

        ConversionFeeChanged {
            old_fee,
            new_fee: fee,
        }
        .publish(&env);
        Ok(())
    }

    // ========================================================================
    // QUERIES
    // ========================================================================

    pub fn get_state(env: Env) -> Result<AuctionState, Error> {
        storage::load_state(&env)
    }

    pub fn status(env: Env) -> Result<AuctionStatus, Error> {
        Ok(storage::load_state(&env)?.status)
    }

    pub fn start_time(env: Env) -> Result<u64, Error> {
        Ok(storage::load_state(&env)?.start_time)
    }

    pub fn end_time(env: Env) -> Result<u64, Error> {
        Ok(storage::load_state(&env)?.end_time())
    }

    /// Unit price right now; the initial price before the start.
    pub fn current_price(env: Env) -> Result<i128, Error> {
        let state = storage::load_state(&env)?;
        let elapsed = env.ledger().timestamp().saturating_sub(state.start_time);
        state.curve.price(elapsed)
    }

    /// Unit price `elapsed` seconds after the start.
    pub fn price_at(env: Env, elapsed: u64) -> Result<i128, Error> {
        storage::load_state(&env)?.curve.price(elapsed)
    }

    pub fn total_bids(env: Env) -> Result<u64, Error> {
        Ok(storage::load_state(&env)?.total_bids)
    }

    pub fn stats(env: Env) -> Result<AuctionStats, Error> {
        Ok(storage::load_state(&env)?.stats)
    }
}
