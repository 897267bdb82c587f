use soroban_sdk::{log, token, Address, Env, I256};

use crate::errors::Error;
use crate::events::BidConversion;
use crate::interfaces::ExchangeClient;
use crate::settlement;
use crate::types::{
    AuctionState, ConversionResult, TokenPolicy, MAX_DECIMALS, RATE_SCALE, RETAIN_PERCENTAGE,
};

/// `a * b / denominator` with a 256-bit intermediate.
pub fn mul_div(env: &Env, a: i128, b: i128, denominator: i128) -> Result<i128, Error> {
    I256::from_i128(env, a)
        .mul(&I256::from_i128(env, b))
        .div(&I256::from_i128(env, denominator))
        .to_i128()
        .ok_or(Error::ArithmeticOverflow)
}

/// Bid value plus the conversion deposit, `conversion_fee` percent of it.
pub fn with_deposit(env: &Env, total_price: i128, conversion_fee: u32) -> Result<i128, Error> {
    mul_div(env, total_price, i128::from(conversion_fee), 100)
}

/// Alternate-token amounts owed for a bid worth `total_price` base units.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConversionQuote {
    /// Base value the exchange was quoted for.
    pub total_with_deposit: i128,
    /// Amount collected from the payer, deposit buffer included.
    pub total_in_token: i128,
    /// Part of `total_in_token` kept instead of swapped.
    pub tokens_to_keep: i128,
    /// Base currency the swap has to produce.
    pub base_target: i128,
}

/// Price a bid in `policy`'s token from a base-to-token `rate`.
///
/// Both token amounts are computed in 18-decimal space and truncated to the
/// token's decimals with the same divisor.
pub fn quote_for_bid(
    env: &Env,
    total_price: i128,
    total_with_deposit: i128,
    rate: i128,
    policy: &TokenPolicy,
) -> Result<ConversionQuote, Error> {
    if rate <= 0 {
        return Err(Error::InvalidRate);
    }

    let mut base_target = total_price;
    let mut tokens_to_keep = 0;
    if policy.should_retain_portion {
        let full_in_token = mul_div(env, total_price, rate, RATE_SCALE)?;
        tokens_to_keep = mul_div(env, full_in_token, RETAIN_PERCENTAGE, 100)?;
        base_target = mul_div(env, total_price, 100 - RETAIN_PERCENTAGE, 100)?;
    }

    let mut total_in_token = mul_div(env, total_with_deposit, rate, RATE_SCALE)?;
    if policy.decimals < MAX_DECIMALS {
        let divisor = 10i128.pow(MAX_DECIMALS - policy.decimals);
        total_in_token /= divisor;
        tokens_to_keep /= divisor;
    }

    if total_in_token <= tokens_to_keep {
        return Err(Error::AmountTooSmall);
    }

    Ok(ConversionQuote {
        total_with_deposit,
        total_in_token,
        tokens_to_keep,
        base_target,
    })
}

/// Collect an alternate-token payment worth `total_price` base units and
/// swap it into base currency through the configured exchange.
pub fn convert_for_bid(
    env: &Env,
    state: &AuctionState,
    bid_id: u64,
    payer: &Address,
    token: &Address,
    policy: &TokenPolicy,
    total_price: i128,
) -> Result<ConversionResult, Error> {
    let exchange = state.exchange.clone().ok_or(Error::ExchangeNotSet)?;
    let dex = ExchangeClient::new(env, &exchange);
    let this = env.current_contract_address();

    let total_with_deposit = with_deposit(env, total_price, state.conversion_fee)?;
    let (rate, slippage_rate) = dex.quote(&state.base_token, token, &total_with_deposit);
    if slippage_rate <= 0 {
        log!(env, "exchange quoted no slippage rate", slippage_rate);
        return Err(Error::InvalidRate);
    }
    let quote = quote_for_bid(env, total_price, total_with_deposit, rate, policy)?;
    let to_swap = quote.total_in_token - quote.tokens_to_keep;

    let token_client = token::TokenClient::new(env, token);
    let base_client = token::TokenClient::new(env, &state.base_token);

    let token_before = token_client.balance(&this);
    settlement::collect(env, token, payer, quote.total_in_token)?;
    let base_before = base_client.balance(&this);

    let ledger = env.ledger().sequence();
    token_client.approve(&this, &exchange, &to_swap, &ledger);
    let swapped = dex.try_swap(&this, token, &state.base_token, &to_swap, &quote.base_target);
    token_client.approve(&this, &exchange, &0, &ledger);
    let bought = match swapped {
        Ok(Ok(bought)) => bought,
        _ => return Err(Error::SwapFailed),
    };

    if bought < quote.base_target {
        log!(env, "swap under target", bought, quote.base_target);
        return Err(Error::ConversionShortfall);
    }
    let received = base_client.balance(&this) - base_before;
    if received < bought {
        log!(env, "swap proceeds not received", received, bought);
        return Err(Error::BalanceMismatch);
    }

    let change = token_client.balance(&this) - token_before - quote.tokens_to_keep;
    if change < 0 {
        log!(env, "exchange drew more than allowed", change);
        return Err(Error::BalanceMismatch);
    }
    if change > 0 {
        token_client.transfer(&this, payer, &change);
    }

    let converted = to_swap - change;
    BidConversion {
        bid_id,
        token: token.clone(),
        base_amount: quote.base_target,
        converted,
        retained: quote.tokens_to_keep,
    }
    .publish(env);

    Ok(ConversionResult {
        collected: quote.total_in_token,
        retained: quote.tokens_to_keep,
        converted,
        change_returned: change,
        base_amount: quote.base_target,
    })
}
