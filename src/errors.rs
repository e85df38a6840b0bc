//! Error definitions shared by the token and math modules
use odra::prelude::*;

/// Custom errors for the CEP-18 token contracts
#[odra::odra_error]
pub enum TokenError {
    /// Insufficient allowance for transfer
    InsufficientAllowance = 100,

    /// Insufficient balance for operation
    InsufficientBalance = 101,

    /// Caller is not the token owner
    Unauthorized = 102,

    /// Zero amount not allowed
    ZeroAmount = 103,
}

/// Custom errors for checked U256 arithmetic
#[odra::odra_error]
#[derive(Debug)]
pub enum MathError {
    /// Overflow error
    Overflow = 200,

    /// Underflow error
    Underflow = 201,

    /// Division by zero
    DivisionByZero = 202,
}
