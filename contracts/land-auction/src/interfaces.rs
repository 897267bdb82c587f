use soroban_sdk::{contractclient, Address, Env, Vec};

/// Token exchange the auction converts alternate payments through.
#[contractclient(name = "ExchangeClient")]
pub trait Exchange {
    /// Rate of `src_token` to `dest_token` for `src_amount`, as
    /// `(expected_rate, slippage_rate)`, both scaled by 10^18. Read only.
    ///
    /// Payments are priced at `expected_rate`. A non-positive `slippage_rate`
    /// means the pair cannot be traded and the bid is refused.
    fn quote(env: Env, src_token: Address, dest_token: Address, src_amount: i128) -> (i128, i128);

    /// Pull `src_amount` of `src_token` from `caller` through its allowance,
    /// pay `caller` at least `dest_amount` of `dest_token` and send back any
    /// unspent `src_token`. Returns the amount of `dest_token` paid.
    fn swap(
        env: Env,
        caller: Address,
        src_token: Address,
        dest_token: Address,
        src_amount: i128,
        dest_amount: i128,
    ) -> i128;
}

/// Registry that owns the parcels being sold.
#[contractclient(name = "LandRegistryClient")]
pub trait LandRegistry {
    /// Assign every `(xs[i], ys[i])` parcel to `beneficiary`, all or nothing.
    fn assign_multiple_parcels(env: Env, xs: Vec<i32>, ys: Vec<i32>, beneficiary: Address);
}
