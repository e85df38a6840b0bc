//! Error types for the issuance engine
use odra::prelude::*;

/// Errors that can occur in the issuance engine
#[odra::odra_error]
pub enum EngineError {
    /// Zero amount not allowed
    ZeroAmount = 1,

    /// Asset has no registered price feed
    UnsupportedCollateral = 2,

    /// Collateral and price feed lists differ in length
    LengthMismatch = 3,

    /// A collateral token transfer reported failure
    TransferFailed = 4,

    /// The synthetic token mint reported failure
    MintFailed = 5,

    /// Withdrawal or seizure exceeds deposited collateral
    InsufficientCollateral = 6,

    /// Burn or repayment exceeds recorded debt
    InsufficientDebt = 7,

    /// Health factor below minimum after the operation
    HealthFactorTooLow = 8,

    /// Target account is healthy, cannot liquidate
    HealthFactorOk = 9,

    /// Liquidation did not improve the target's health factor
    HealthFactorNotImproved = 10,

    /// Price feed reading is stale or zero
    StalePrice = 11,

    /// Caller is not authorized
    Unauthorized = 12,

    /// Contract reference not set during initialization
    InvalidConfiguration = 13,
}
