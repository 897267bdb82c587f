
use crate::{AuctionParams, DisposalStrategy, LandAuction, LandAuctionClient, RATE_SCALE};
use soroban_sdk::{
    contract, contractimpl, contracttype, token,
    testutils::{Address as _, Events as _, Ledger, LedgerInfo},
    vec, Address, Env, Event, Val, Vec,
};

pub const START: u64 = 2_000;
pub const DURATION: u64 = 900;
pub const INITIAL_PRICE: i128 = 1_000;
pub const END_PRICE: i128 = 100;
pub const LANDS_LIMIT: u32 = 5;

// ============================================================================
// Mock land registry
// ============================================================================

#[contracttype]
#[derive(Clone)]
enum RegistryKey {
    Parcel(i32, i32),
}

#[contract]
pub struct MockLandRegistry;

#[contractimpl]
impl MockLandRegistry {
    pub fn assign_multiple_parcels(env: Env, xs: Vec<i32>, ys: Vec<i32>, beneficiary: Address) {
        for (x, y) in xs.iter().zip(ys.iter()) {
            let key = RegistryKey::Parcel(x, y);
            if env.storage().persistent().has(&key) {
                panic!("parcel already assigned");
            }
            env.storage().persistent().set(&key, &beneficiary);
        }
    }

    pub fn owner_of(env: Env, x: i32, y: i32) -> Option<Address> {
        env.storage().persistent().get(&RegistryKey::Parcel(x, y))
    }
}

// ============================================================================
// Mock exchange
// ============================================================================

/// How the mock settles a swap.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum SwapMode {
    /// Pays the requested amount and reports it.
    Honest = 0,
    /// Reports the requested amount but pays one unit less.
    ShortPay = 1,
    /// Pays and reports one unit less than requested.
    UnderDeliver = 2,
}

#[contracttype]
#[derive(Clone)]
enum ExchangeKey {
    Rate,
    Divisor,
    Mode,
}

#[contract]
pub struct MockExchange;

#[contractimpl]
impl MockExchange {
    /// `rate` is source units per destination unit scaled by 10^18, in
    /// 18-decimal space; `divisor` brings it down to the source decimals.
    pub fn configure(env: Env, rate: i128, divisor: i128, mode: SwapMode) {
        env.storage().instance().set(&ExchangeKey::Rate, &rate);
        env.storage().instance().set(&ExchangeKey::Divisor, &divisor);
        env.storage().instance().set(&ExchangeKey::Mode, &mode);
    }

    pub fn quote(
        env: Env,
        _src_token: Address,
        _dest_token: Address,
        _src_amount: i128,
    ) -> (i128, i128) {
        let rate: i128 = env.storage().instance().get(&ExchangeKey::Rate).unwrap();
        (rate, rate * 97 / 100)
    }

    pub fn swap(
        env: Env,
        caller: Address,
        src_token: Address,
        dest_token: Address,
        src_amount: i128,
        dest_amount: i128,
    ) -> i128 {
        let rate: i128 = env.storage().instance().get(&ExchangeKey::Rate).unwrap();
        let divisor: i128 = env.storage().instance().get(&ExchangeKey::Divisor).unwrap();
        let mode: SwapMode = env.storage().instance().get(&ExchangeKey::Mode).unwrap();
        let me = env.current_contract_address();

        let src = token::TokenClient::new(&env, &src_token);
        src.transfer_from(&me, &caller, &me, &src_amount);

        let spent = dest_amount * rate / RATE_SCALE / divisor;
        if src_amount > spent {
            src.transfer(&me, &caller, &(src_amount - spent));
        }

        let dest = token::TokenClient::new(&env, &dest_token);
        match mode {
            SwapMode::Honest => {
                dest.transfer(&me, &caller, &dest_amount);
                dest_amount
            }
            SwapMode::ShortPay => {
                dest.transfer(&me, &caller, &(dest_amount - 1));
                dest_amount
            }
            SwapMode::UnderDeliver => {
                dest.transfer(&me, &caller, &(dest_amount - 1));
                dest_amount - 1
            }
        }
    }
}

// ============================================================================
// Fixture
// ============================================================================

pub struct TestAuction {
    pub env: Env,
    pub client: LandAuctionClient<'static>,
    pub contract_id: Address,
    pub admin: Address,
    pub bidder: Address,
    pub base: token::TokenClient<'static>,
    pub base_admin: token::StellarAssetClient<'static>,
    pub registry: MockLandRegistryClient<'static>,
    pub exchange: MockExchangeClient<'static>,
    pub sink: Address,
    pub charity: Address,
}

impl TestAuction {
    /// Register an alternate token and mint `amount` of it to the bidder.
    pub fn new_token(
        &self,
        amount: i128,
    ) -> (
        token::TokenClient<'static>,
        token::StellarAssetClient<'static>,
    ) {
        let issuer = Address::generate(&self.env);
        let contract = self.env.register_stellar_asset_contract_v2(issuer);
        let client = token::TokenClient::new(&self.env, &contract.address());
        let admin_client = token::StellarAssetClient::new(&self.env, &contract.address());
        admin_client.mint(&self.bidder, &amount);
        (client, admin_client)
    }

    /// Allow a token, switch on the exchange and configure its rate.
    pub fn enable_token(
        &self,
        token: &Address,
        decimals: u32,
        retain: bool,
        disposal: DisposalStrategy,
        rate: i128,
    ) {
        self.client
            .allow_token(&self.admin, token, &decimals, &retain, &disposal);
        self.exchange
            .configure(&rate, &10i128.pow(18 - decimals), &SwapMode::Honest);
        if self.client.get_state().exchange.is_none() {
            self.client.set_exchange(&self.admin, &self.exchange.address);
        }
    }
}

pub fn setup_uninitialized() -> (TestAuction, AuctionParams) {
    let env = Env::default();
    env.mock_all_auths();

    env.ledger().set(LedgerInfo {
        timestamp: 1_000,
        protocol_version: 23,
        sequence_number: 1,
        network_id: Default::default(),
        base_reserve: 10,
        min_temp_entry_ttl: 100,
        min_persistent_entry_ttl: 100,
        max_entry_ttl: 3_110_400,
    });

    let contract_id = env.register(LandAuction, ());
    let client = LandAuctionClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    let bidder = Address::generate(&env);
    let sink = Address::generate(&env);
    let charity = Address::generate(&env);

    let base_issuer = Address::generate(&env);
    let base_contract = env.register_stellar_asset_contract_v2(base_issuer);
    let base = token::TokenClient::new(&env, &base_contract.address());
    let base_admin = token::StellarAssetClient::new(&env, &base_contract.address());
    base_admin.mint(&bidder, &10_000_000);

    let registry_id = env.register(MockLandRegistry, ());
    let registry = MockLandRegistryClient::new(&env, &registry_id);

    let exchange_id = env.register(MockExchange, ());
    let exchange = MockExchangeClient::new(&env, &exchange_id);
    base_admin.mint(&exchange_id, &10_000_000);

    let params = AuctionParams {
        base_token: base.address.clone(),
        land_registry: registry_id,
        exchange: None,
        sink: sink.clone(),
        charity: charity.clone(),
        start_time: START,
        times: vec![&env, 0, DURATION],
        prices: vec![&env, INITIAL_PRICE, END_PRICE],
        lands_limit_per_bid: LANDS_LIMIT,
        gas_price_limit: 1_000_000,
    };

    let ctx = TestAuction {
        env,
        client,
        contract_id,
        admin,
        bidder,
        base,
        base_admin,
        registry,
        exchange,
        sink,
        charity,
    };
    (ctx, params)
}

pub fn setup_test() -> TestAuction {
    let (ctx, params) = setup_uninitialized();
    ctx.client.initialize(&ctx.admin, &params);
    ctx
}

pub fn set_time(env: &Env, timestamp: u64) {
    env.ledger().set(LedgerInfo {
        timestamp,
        protocol_version: 23,
        sequence_number: env.ledger().sequence(),
        network_id: Default::default(),
        base_reserve: 10,
        min_temp_entry_ttl: 100,
        min_persistent_entry_ttl: 100,
        max_entry_ttl: 3_110_400,
    });
}

pub fn coords(env: &Env, points: &[(i32, i32)]) -> (Vec<i32>, Vec<i32>) {
    let mut xs = Vec::new(env);
    let mut ys = Vec::new(env);
    for (x, y) in points {
        xs.push_back(*x);
        ys.push_back(*y);
    }
    (xs, ys)
}

// ============================================================================
// Events
// ============================================================================

pub type RecordedEvent = (Address, Vec<Val>, Val);

/// `event` as the host records it when published by the auction.
pub fn recorded(t: &TestAuction, event: &impl Event) -> RecordedEvent {
    (t.contract_id.clone(), event.topics(&t.env), event.data(&t.env))
}

/// The auction's most recent events must be `expected`, in order.
pub fn assert_last_events(t: &TestAuction, expected: Vec<RecordedEvent>) {
    let mut published: Vec<RecordedEvent> = Vec::new(&t.env);
    for event in t.env.events().all().iter() {
        if event.0 == t.contract_id {
            published.push_back(event);
        }
    }
    assert!(published.len() >= expected.len());
    let tail = published.slice(published.len() - expected.len()..);
    assert_eq!(tail, expected);
}
