//! Events for the issuance engine
use odra::prelude::*;
use odra::casper_types::U256;

/// Event emitted when collateral is deposited
#[odra::event]
pub struct CollateralDeposited {
    /// Account that deposited
    pub account: Address,
    /// Collateral asset address
    pub asset: Address,
    /// Amount deposited
    pub amount: U256,
    /// Timestamp of deposit
    pub timestamp: u64,
}

/// Event emitted when collateral leaves an account's ledger entry,
/// either by withdrawal (from == to) or by liquidation seizure
#[odra::event]
pub struct CollateralRedeemed {
    /// Account the collateral is taken from
    pub from: Address,
    /// Account receiving the collateral
    pub to: Address,
    /// Collateral asset address
    pub asset: Address,
    /// Amount redeemed
    pub amount: U256,
    /// Timestamp of redemption
    pub timestamp: u64,
}

/// Event emitted when a price feed answer is updated
#[odra::event]
pub struct AnswerUpdated {
    /// New answer, scaled to the feed's decimals
    pub answer: U256,
    /// Timestamp of the update
    pub updated_at: u64,
}
