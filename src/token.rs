//! CEP-18 compatible synthetic dollar token
//!
//! The liability instrument of the engine. Balances and allowances follow the
//! CEP-18 standard; `mint` and `burn` are gated to the token owner, which is
//! handed over to the engine right after deployment so that issuance and
//! destruction can only happen through the engine's solvency checks.
use odra::prelude::*;
use odra::casper_types::U256;
use crate::events::{Transfer, Approval, OwnershipTransferred};
use crate::errors::TokenError;

/// Synthetic USD token module
#[odra::module]
pub struct SynthUsdToken {
    /// Token name
    name: Var<String>,
    /// Token symbol
    symbol: Var<String>,
    /// Token decimals
    decimals: Var<u8>,
    /// Total supply of tokens
    total_supply: Var<U256>,
    /// Balance mapping: owner -> balance
    balances: Mapping<Address, U256>,
    /// Allowance mapping: owner -> spender -> amount
    allowances: Mapping<(Address, Address), U256>,
    /// Account allowed to mint and burn
    owner: Var<Address>,
}

#[odra::module]
impl SynthUsdToken {
    /// Initialize the token; the deployer becomes the initial owner
    pub fn init(&mut self) {
        let caller = self.env().caller();
        self.name.set(String::from("Synthetic USD"));
        self.symbol.set(String::from("synUSD"));
        self.decimals.set(18);
        self.total_supply.set(U256::zero());
        self.owner.set(caller);
    }

    /// Get the token name
    pub fn name(&self) -> String {
        self.name.get_or_default()
    }

    /// Get the token symbol
    pub fn symbol(&self) -> String {
        self.symbol.get_or_default()
    }

    /// Get the token decimals
    pub fn decimals(&self) -> u8 {
        self.decimals.get_or_default()
    }

    /// Get the total supply
    pub fn total_supply(&self) -> U256 {
        self.total_supply.get_or_default()
    }

    /// Get the current owner
    pub fn owner(&self) -> Address {
        self.owner.get_or_revert_with(TokenError::Unauthorized)
    }

    /// Get the balance of an address
    pub fn balance_of(&self, owner: Address) -> U256 {
        self.balances.get(&owner).unwrap_or_default()
    }

    /// Get the allowance for a spender
    pub fn allowance(&self, owner: Address, spender: Address) -> U256 {
        self.allowances.get(&(owner, spender)).unwrap_or_default()
    }

    /// Transfer tokens to another address
    pub fn transfer(&mut self, to: Address, amount: U256) -> bool {
        let caller = self.env().caller();
        self.transfer_internal(caller, to, amount);
        true
    }

    /// Approve a spender to spend tokens
    pub fn approve(&mut self, spender: Address, amount: U256) -> bool {
        let caller = self.env().caller();
        self.approve_internal(caller, spender, amount);
        true
    }

    /// Transfer tokens from one address to another (requires approval)
    pub fn transfer_from(&mut self, from: Address, to: Address, amount: U256) -> bool {
        let caller = self.env().caller();
        let current_allowance = self.allowance(from, caller);

        if current_allowance < amount {
            self.env().revert(TokenError::InsufficientAllowance);
        }

        self.approve_internal(from, caller, current_allowance - amount);
        self.transfer_internal(from, to, amount);
        true
    }

    /// Mint new tokens; owner only
    pub fn mint(&mut self, to: Address, amount: U256) -> bool {
        self.only_owner();

        if amount.is_zero() {
            self.env().revert(TokenError::ZeroAmount);
        }

        let current_supply = self.total_supply();
        self.total_supply.set(current_supply + amount);

        let current_balance = self.balance_of(to);
        self.balances.set(&to, current_balance + amount);

        self.env().emit_event(Transfer {
            from: Address::from(self.env().self_address()),
            to,
            value: amount,
        });
        true
    }

    /// Burn tokens from the owner's own balance; owner only
    pub fn burn(&mut self, amount: U256) {
        self.only_owner();

        if amount.is_zero() {
            self.env().revert(TokenError::ZeroAmount);
        }

        let caller = self.env().caller();
        let current_balance = self.balance_of(caller);
        if current_balance < amount {
            self.env().revert(TokenError::InsufficientBalance);
        }

        self.balances.set(&caller, current_balance - amount);

        let current_supply = self.total_supply();
        self.total_supply.set(current_supply - amount);

        self.env().emit_event(Transfer {
            from: caller,
            to: Address::from(self.env().self_address()),
            value: amount,
        });
    }

    /// Hand ownership (mint/burn rights) to another account; owner only
    pub fn transfer_ownership(&mut self, new_owner: Address) {
        self.only_owner();

        let previous_owner = self.owner();
        self.owner.set(new_owner);

        self.env().emit_event(OwnershipTransferred {
            previous_owner,
            new_owner,
        });
    }

    /// Internal transfer function
    fn transfer_internal(&mut self, from: Address, to: Address, amount: U256) {
        let from_balance = self.balance_of(from);
        if from_balance < amount {
            self.env().revert(TokenError::InsufficientBalance);
        }

        self.balances.set(&from, from_balance - amount);
        let to_balance = self.balance_of(to);
        self.balances.set(&to, to_balance + amount);

        self.env().emit_event(Transfer {
            from,
            to,
            value: amount,
        });
    }

    /// Internal approve function
    fn approve_internal(&mut self, owner: Address, spender: Address, amount: U256) {
        self.allowances.set(&(owner, spender), amount);

        self.env().emit_event(Approval {
            owner,
            spender,
            value: amount,
        });
    }

    fn only_owner(&self) {
        let caller = self.env().caller();
        let owner = self.owner.get_or_revert_with(TokenError::Unauthorized);
        if caller != owner {
            self.env().revert(TokenError::Unauthorized);
        }
    }
}

/// External token interface for interacting with CEP-18 collateral assets
#[odra::external_contract]
pub trait Cep18Token {
    /// Get the balance of an address
    fn balance_of(&self, owner: Address) -> U256;

    /// Transfer tokens
    fn transfer(&mut self, to: Address, amount: U256) -> bool;

    /// Transfer tokens from another address
    fn transfer_from(&mut self, from: Address, to: Address, amount: U256) -> bool;

    /// Approve a spender
    fn approve(&mut self, spender: Address, amount: U256) -> bool;

    /// Get allowance
    fn allowance(&self, owner: Address, spender: Address) -> U256;

    /// Get total supply
    fn total_supply(&self) -> U256;
}
