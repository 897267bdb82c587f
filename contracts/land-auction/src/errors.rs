use soroban_sdk::contracterror;

/// Error codes for the LAND auction contract.
///
/// Codes are grouped by class so that off-chain tooling can tell a
/// retryable admission failure from a faulty collaborator.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    // Lifecycle and access control
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,

    // Admission: nothing has moved when these are returned
    AuctionNotStarted = 10,
    AuctionEnded = 11,
    AuctionFinished = 12,
    InvalidBeneficiary = 13,
    EmptyBid = 14,
    LandsLimitExceeded = 15,
    CoordinatesMismatch = 16,
    TokenNotAllowed = 17,
    ExchangeNotSet = 18,
    CoordinateOutOfBounds = 19,

    // Transfers
    TransferFailed = 30,
    SwapFailed = 31,

    // Accounting invariants: a collaborator misbehaved
    ConversionShortfall = 40,
    BalanceMismatch = 41,
    ResidualBalance = 42,
    NothingToDispose = 43,
    InvalidRate = 44,
    AmountTooSmall = 45,
    ArithmeticOverflow = 46,
    EmptyCurve = 47,

    // Configuration
    InvalidCurve = 60,
    InvalidDecimals = 61,
    TokenAlreadyAllowed = 62,
    NotAContract = 63,
    InvalidConversionFee = 64,
    InvalidLimit = 65,
    InvalidStartTime = 66,
    ExchangeUnchanged = 67,
    CannotDisallowBaseToken = 68,
}
