use soroban_sdk::{contractevent, Address, Vec};

use crate::types::DisposalStrategy;

/// Event emitted when the auction is initialized
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AuctionCreated {
    #[topic]
    pub admin: Address,
    pub start_time: u64,
    pub initial_price: i128,
    pub end_price: i128,
    pub duration: u64,
}

/// Event emitted when the admin closes the auction
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AuctionFinished {
    #[topic]
    pub admin: Address,
    pub time: u64,
    pub unit_price: i128,
}

/// Event emitted once per fulfilled bid
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BidSuccessful {
    #[topic]
    pub bid_id: u64,
    #[topic]
    pub beneficiary: Address,
    pub token: Address,
    pub unit_price: i128,
    pub total_price: i128,
    pub xs: Vec<i32>,
    pub ys: Vec<i32>,
}

/// Event emitted when a bid was paid through the exchange
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BidConversion {
    #[topic]
    pub bid_id: u64,
    #[topic]
    pub token: Address,
    pub base_amount: i128,
    pub converted: i128,
    pub retained: i128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TokenBurned {
    #[topic]
    pub bid_id: u64,
    #[topic]
    pub token: Address,
    pub amount: i128,
}

/// Event emitted when collected funds are redirected instead of burned
#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TokenTransferred {
    #[topic]
    pub bid_id: u64,
    #[topic]
    pub token: Address,
    pub to: Address,
    pub amount: i128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LandsLimitPerBidChanged {
    pub old_limit: u32,
    pub new_limit: u32,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GasPriceLimitChanged {
    pub old_limit: u64,
    pub new_limit: u64,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExchangeChanged {
    pub old_exchange: Option<Address>,
    pub new_exchange: Address,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConversionFeeChanged {
    pub old_fee: u32,
    pub new_fee: u32,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TokenAllowed {
    #[topic]
    pub token: Address,
    pub decimals: u32,
    pub should_retain_portion: bool,
    pub disposal: DisposalStrategy,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TokenDisallowed {
    #[topic]
    pub token: Address,
}
