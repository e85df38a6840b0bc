//! CEP-18 token events
use odra::prelude::*;
use odra::casper_types::U256;

/// Event emitted on every token transfer, mint and burn
#[odra::event]
pub struct Transfer {
    /// Sender of the tokens
    pub from: Address,
    /// Recipient of the tokens
    pub to: Address,
    /// Amount transferred
    pub value: U256,
}

/// Event emitted when a spender allowance is set
#[odra::event]
pub struct Approval {
    /// Owner of the tokens
    pub owner: Address,
    /// Approved spender
    pub spender: Address,
    /// Approved amount
    pub value: U256,
}

/// Event emitted when the token owner changes
#[odra::event]
pub struct OwnershipTransferred {
    /// Previous owner
    pub previous_owner: Address,
    /// New owner
    pub new_owner: Address,
}
