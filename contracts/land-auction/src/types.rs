use soroban_sdk::{contracttype, Address, Vec};

// ============================================================================
// Constants
// ============================================================================

/// Number of ledgers in a day (assuming ~5 second block time)
pub const DAY_IN_LEDGERS: u32 = 17280;

/// TTL extension amount for instance storage (30 days)
pub const INSTANCE_TTL_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;

/// TTL threshold before extending (29 days)
pub const INSTANCE_TTL_THRESHOLD: u32 = INSTANCE_TTL_AMOUNT - DAY_IN_LEDGERS;

/// TTL extension amount for persistent token policies (90 days)
pub const PERSISTENT_TTL_AMOUNT: u32 = 90 * DAY_IN_LEDGERS;

/// TTL threshold before extending persistent entries (89 days)
pub const PERSISTENT_TTL_THRESHOLD: u32 = PERSISTENT_TTL_AMOUNT - DAY_IN_LEDGERS;

/// Exchange rates are fixed point with 18 decimals.
pub const RATE_SCALE: i128 = 1_000_000_000_000_000_000;

/// Decimals of the base currency and of quoted rates.
pub const MAX_DECIMALS: u32 = 18;

/// Percentage of an alternate-token payment kept instead of converted
/// when the token's policy asks for it.
pub const RETAIN_PERCENTAGE: i128 = 5;

/// Conversion fee applied when none has been configured (105 = +5%).
pub const DEFAULT_CONVERSION_FEE: u32 = 105;

pub const MIN_CONVERSION_FEE: u32 = 100;
pub const MAX_CONVERSION_FEE: u32 = 200;

/// Parcels are addressable on both axes within `-150..=150`.
pub const COORDINATE_LIMIT: i32 = 150;

// ============================================================================
// Storage keys
// ============================================================================

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// Initialize-once guard
    Init,
    /// Aggregate auction state
    State,
    /// Payment policy by token address
    Token(Address),
}

// ============================================================================
// Lifecycle
// ============================================================================

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum InitState {
    Uninitialized = 0,
    Initialized = 1,
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum AuctionStatus {
    Created = 0,
    Finished = 1,
}

// ============================================================================
// Token registry
// ============================================================================

/// How collected funds of a token leave the auction after each bid.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum DisposalStrategy {
    /// Destroy the balance through the token's own burn.
    Burn = 0,
    /// Send the balance to the sink address; for tokens without burn.
    Sink = 1,
    /// Send the balance to the charity address.
    Charity = 2,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TokenPolicy {
    pub decimals: u32,
    pub is_allowed: bool,
    pub should_retain_portion: bool,
    pub disposal: DisposalStrategy,
}

// ============================================================================
// Price curve
// ============================================================================

/// One linear piece of the curve: `price(t) = base - slope * t` for
/// every elapsed `t` below `limit`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Segment {
    pub slope: i128,
    pub base: i128,
    pub limit: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PriceCurve {
    pub segments: Vec<Segment>,
    pub start_offset: u64,
    pub duration: u64,
    pub initial_price: i128,
    pub end_price: i128,
}

// ============================================================================
// Auction
// ============================================================================

/// Deployment parameters accepted by `initialize`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AuctionParams {
    pub base_token: Address,
    pub land_registry: Address,
    pub exchange: Option<Address>,
    pub sink: Address,
    pub charity: Address,
    pub start_time: u64,
    pub times: Vec<u64>,
    pub prices: Vec<i128>,
    pub lands_limit_per_bid: u32,
    pub gas_price_limit: u64,
}

#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct AuctionStats {
    pub total_lands_bid: u64,
    pub total_base_disposed: i128,
}

/// Everything the engine owns, loaded and saved once per call.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AuctionState {
    pub admin: Address,
    pub base_token: Address,
    pub land_registry: Address,
    pub exchange: Option<Address>,
    pub sink: Address,
    pub charity: Address,
    pub status: AuctionStatus,
    pub start_time: u64,
    pub curve: PriceCurve,
    pub lands_limit_per_bid: u32,
    pub gas_price_limit: u64,
    pub conversion_fee: u32,
    pub total_bids: u64,
    pub stats: AuctionStats,
}

impl AuctionState {
    pub fn end_time(&self) -> u64 {
        self.start_time.saturating_add(self.curve.duration)
    }
}

// ============================================================================
// Bid results
// ============================================================================

/// Accounting of one alternate-token payment.
///
/// `collected == retained + converted + change_returned` always holds.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConversionResult {
    pub collected: i128,
    pub retained: i128,
    pub converted: i128,
    pub change_returned: i128,
    pub base_amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BidReceipt {
    pub bid_id: u64,
    pub unit_price: i128,
    pub total_price: i128,
}
