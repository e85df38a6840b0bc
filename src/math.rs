//! Checked U256 arithmetic for ledger and valuation math
//!
//! Every quantity and value computation in the engine goes through these
//! helpers; a silent wraparound on a balance or a USD value is a direct
//! solvency bug, so overflow and underflow are explicit errors.
use odra::casper_types::U256;
use crate::errors::MathError;

/// Safe math operations for U256
pub struct SafeMath;

impl SafeMath {
    /// Safe addition with overflow check
    pub fn add(a: U256, b: U256) -> Result<U256, MathError> {
        a.checked_add(b).ok_or(MathError::Overflow)
    }

    /// Safe subtraction with underflow check
    pub fn sub(a: U256, b: U256) -> Result<U256, MathError> {
        a.checked_sub(b).ok_or(MathError::Underflow)
    }

    /// Safe multiplication with overflow check
    pub fn mul(a: U256, b: U256) -> Result<U256, MathError> {
        a.checked_mul(b).ok_or(MathError::Overflow)
    }

    /// Safe division with zero check
    pub fn div(a: U256, b: U256) -> Result<U256, MathError> {
        if b.is_zero() {
            return Err(MathError::DivisionByZero);
        }
        Ok(a / b)
    }

    /// Returns the minimum of two U256 values
    pub fn min(a: U256, b: U256) -> U256 {
        if a < b { a } else { b }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_overflow() {
        assert!(SafeMath::add(U256::MAX, U256::one()).is_err());
        assert_eq!(SafeMath::add(U256::from(2), U256::from(3)).unwrap(), U256::from(5));
    }

    #[test]
    fn test_sub_underflow() {
        assert!(SafeMath::sub(U256::one(), U256::from(2)).is_err());
        assert_eq!(SafeMath::sub(U256::from(5), U256::from(3)).unwrap(), U256::from(2));
    }

    #[test]
    fn test_mul_overflow() {
        assert!(SafeMath::mul(U256::MAX, U256::from(2)).is_err());
        assert_eq!(SafeMath::mul(U256::from(4), U256::from(3)).unwrap(), U256::from(12));
    }

    #[test]
    fn test_div_by_zero() {
        assert!(SafeMath::div(U256::one(), U256::zero()).is_err());
        assert_eq!(SafeMath::div(U256::from(10), U256::from(3)).unwrap(), U256::from(3));
    }

    #[test]
    fn test_min() {
        assert_eq!(SafeMath::min(U256::from(1), U256::from(2)), U256::from(1));
        assert_eq!(SafeMath::min(U256::from(9), U256::from(2)), U256::from(2));
    }
}
