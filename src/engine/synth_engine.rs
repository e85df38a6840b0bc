//! Synth Engine - collateral/debt bookkeeping, health factors, liquidation
//!
//! One contract holds the whole core:
//! - the supported-asset registry (asset -> price feed), fixed at init
//! - the collateral ledger ((account, asset) -> deposited quantity)
//! - the debt ledger (account -> minted synthetic dollars)
//! - health-factor enforcement after every state-changing call
//! - the liquidation path that repays debt and seizes bonused collateral
//!
//! Ordering discipline: every entry point commits its ledger writes before
//! making any external token call, and any revert unwinds the whole call, so
//! a collaborator re-entering mid-call only ever observes settled state.

use odra::prelude::*;
use odra::casper_types::U256;
use odra::ContractRef;
use super::errors::EngineError;
use super::events::*;
use super::price_feed::{PriceFeedContractRef, MAX_PRICE_AGE_MS};
use crate::math::SafeMath;
use crate::token::{Cep18TokenContractRef, SynthUsdTokenContractRef};

/// Engine fixed-point scale (18 decimals)
pub const PRECISION: u128 = 1_000_000_000_000_000_000;

/// Scale factor lifting an 8-decimal feed answer to 18 decimals
pub const ADDITIONAL_FEED_PRECISION: u128 = 10_000_000_000;

/// Share of collateral value that counts toward backing, in percent.
/// 50 means a 200% minimum collateralization ratio.
pub const LIQUIDATION_THRESHOLD: u128 = 50;

/// Denominator for LIQUIDATION_THRESHOLD and LIQUIDATION_BONUS
pub const LIQUIDATION_PRECISION: u128 = 100;

/// Extra collateral awarded to liquidators, in percent of the seized base
pub const LIQUIDATION_BONUS: u128 = 10;

/// Minimum healthy ratio: exactly 1.0 in engine fixed point
pub const MIN_HEALTH_FACTOR: u128 = 1_000_000_000_000_000_000;

/// Synth Engine contract
#[odra::module]
pub struct SynthEngine {
    /// Ordered list of supported collateral assets
    collateral_tokens: Var<Vec<Address>>,
    /// Registry: collateral asset -> price feed; set once at init
    price_feeds: Mapping<Address, Address>,
    /// Collateral ledger: (account, asset) -> deposited quantity
    collateral_deposited: Mapping<(Address, Address), U256>,
    /// Debt ledger: account -> synthetic dollars minted
    synth_minted: Mapping<Address, U256>,
    /// Synthetic dollar token owned by this engine
    synth_token: Var<Address>,
}

#[odra::module]
impl SynthEngine {
    /// Initialize the engine with parallel (asset, feed) lists and the
    /// synthetic token address. The registry is immutable afterwards.
    pub fn init(
        &mut self,
        collateral_tokens: Vec<Address>,
        price_feeds: Vec<Address>,
        synth_token: Address,
    ) {
        if collateral_tokens.len() != price_feeds.len() {
            self.env().revert(EngineError::LengthMismatch);
        }

        for (asset, feed) in collateral_tokens.iter().zip(price_feeds.iter()) {
            self.price_feeds.set(asset, *feed);
        }
        self.collateral_tokens.set(collateral_tokens);
        self.synth_token.set(synth_token);
    }

    // ========================================
    // Collateral
    // ========================================

    /// Deposit collateral into the caller's ledger entry
    pub fn deposit_collateral(&mut self, asset: Address, amount: U256) {
        self.ensure_positive(amount);
        self.ensure_supported(asset);

        let caller = self.env().caller();

        let balance = self.collateral_deposited.get(&(caller, asset)).unwrap_or_default();
        let new_balance = SafeMath::add(balance, amount).unwrap_or_revert(&self.env());
        self.collateral_deposited.set(&(caller, asset), new_balance);

        let timestamp = self.env().get_block_time();
        self.env().emit_event(CollateralDeposited {
            account: caller,
            asset,
            amount,
            timestamp,
        });

        let mut token = Cep18TokenContractRef::new(self.env(), asset);
        if !token.transfer_from(caller, Address::from(self.env().self_address()), amount) {
            self.env().revert(EngineError::TransferFailed);
        }
    }

    /// Withdraw collateral; the caller must stay healthy afterwards
    pub fn redeem_collateral(&mut self, asset: Address, amount: U256) {
        self.ensure_positive(amount);

        let caller = self.env().caller();
        self.redeem_internal(caller, caller, asset, amount);
        self.revert_if_health_factor_broken(caller);
    }

    // ========================================
    // Synthetic dollar
    // ========================================

    /// Mint synthetic dollars against the caller's collateral
    pub fn mint(&mut self, amount: U256) {
        self.ensure_positive(amount);

        let caller = self.env().caller();

        let debt = self.synth_minted.get(&caller).unwrap_or_default();
        let new_debt = SafeMath::add(debt, amount).unwrap_or_revert(&self.env());
        self.synth_minted.set(&caller, new_debt);

        self.revert_if_health_factor_broken(caller);

        let mut synth = SynthUsdTokenContractRef::new(self.env(), self.synth_token_address());
        if !synth.mint(caller, amount) {
            self.env().revert(EngineError::MintFailed);
        }
    }

    /// Burn synthetic dollars, reducing the caller's debt
    pub fn burn(&mut self, amount: U256) {
        self.ensure_positive(amount);

        let caller = self.env().caller();
        self.burn_internal(caller, caller, amount);

        // Cannot trip in practice since debt only decreased; kept so a
        // bookkeeping bug shows up here instead of in the next liquidation.
        self.revert_if_health_factor_broken(caller);
    }

    /// Deposit collateral and mint in one call; all-or-nothing
    pub fn deposit_collateral_and_mint(
        &mut self,
        asset: Address,
        amount: U256,
        synth_amount: U256,
    ) {
        self.deposit_collateral(asset, amount);
        self.mint(synth_amount);
    }

    /// Burn synthetic dollars and withdraw collateral in one call;
    /// all-or-nothing
    pub fn redeem_collateral_and_burn(
        &mut self,
        asset: Address,
        amount: U256,
        synth_amount: U256,
    ) {
        self.burn(synth_amount);
        self.redeem_collateral(asset, amount);
    }

    // ========================================
    // Liquidation
    // ========================================

    /// Repay part of an unhealthy account's debt and seize the equivalent
    /// collateral plus a bonus
    ///
    /// The liquidator supplies `debt_to_cover` synthetic dollars (which are
    /// destroyed) and receives the seized collateral directly; nothing is
    /// credited to the liquidator's internal ledger. Partial liquidation is
    /// supported. Known limitation: at or below 100% collateralization the
    /// bonus cannot be paid out of the target's remaining collateral and
    /// liquidation may become uneconomical.
    pub fn liquidate(&mut self, asset: Address, account: Address, debt_to_cover: U256) {
        self.ensure_positive(debt_to_cover);

        let liquidator = self.env().caller();

        let starting_health = self.health_factor(account);
        if starting_health >= U256::from(MIN_HEALTH_FACTOR) {
            self.env().revert(EngineError::HealthFactorOk);
        }

        // Stale-checked conversion; a liquidation priced on old data would
        // seize the wrong amount.
        let seized_base = self.get_token_amount_from_usd(asset, debt_to_cover);
        let bonus = SafeMath::div(
            SafeMath::mul(seized_base, U256::from(LIQUIDATION_BONUS))
                .unwrap_or_revert(&self.env()),
            U256::from(LIQUIDATION_PRECISION),
        )
        .unwrap_or_revert(&self.env());
        let total_seized = SafeMath::add(seized_base, bonus).unwrap_or_revert(&self.env());

        // Effects: both ledgers settle before any token moves
        let collateral = self.collateral_deposited.get(&(account, asset)).unwrap_or_default();
        if collateral < total_seized {
            self.env().revert(EngineError::InsufficientCollateral);
        }
        self.collateral_deposited.set(&(account, asset), collateral - total_seized);

        let debt = self.synth_minted.get(&account).unwrap_or_default();
        if debt < debt_to_cover {
            self.env().revert(EngineError::InsufficientDebt);
        }
        self.synth_minted.set(&account, debt - debt_to_cover);

        let timestamp = self.env().get_block_time();
        self.env().emit_event(CollateralRedeemed {
            from: account,
            to: liquidator,
            asset,
            amount: total_seized,
            timestamp,
        });

        // Interactions: seized collateral out, covered debt in and destroyed
        let mut token = Cep18TokenContractRef::new(self.env(), asset);
        if !token.transfer(liquidator, total_seized) {
            self.env().revert(EngineError::TransferFailed);
        }

        let engine = Address::from(self.env().self_address());
        let mut synth = SynthUsdTokenContractRef::new(self.env(), self.synth_token_address());
        if !synth.transfer_from(liquidator, engine, debt_to_cover) {
            self.env().revert(EngineError::TransferFailed);
        }
        synth.burn(debt_to_cover);

        let ending_health = self.health_factor(account);
        if ending_health < starting_health {
            self.env().revert(EngineError::HealthFactorNotImproved);
        }

        self.revert_if_health_factor_broken(liquidator);
    }

    // ========================================
    // View Functions
    // ========================================

    /// Get the ordered list of supported collateral assets
    pub fn get_collateral_tokens(&self) -> Vec<Address> {
        self.collateral_tokens.get_or_default()
    }

    /// Get the price feed registered for an asset, if any
    pub fn get_price_feed(&self, asset: Address) -> Option<Address> {
        self.price_feeds.get(&asset)
    }

    /// Get an account's deposited balance of one asset
    pub fn get_collateral_balance(&self, account: Address, asset: Address) -> U256 {
        self.collateral_deposited.get(&(account, asset)).unwrap_or_default()
    }

    /// Get an account's (debt, total collateral value) pair
    pub fn get_account_information(&self, account: Address) -> (U256, U256) {
        let debt = self.synth_minted.get(&account).unwrap_or_default();
        let collateral_value = self.get_account_collateral_value(account);
        (debt, collateral_value)
    }

    /// Get an account's total collateral value in USD (18 decimals)
    pub fn get_account_collateral_value(&self, account: Address) -> U256 {
        let assets = self.collateral_tokens.get_or_default();
        let mut total_value = U256::zero();

        for asset in assets {
            let amount = self.collateral_deposited.get(&(account, asset)).unwrap_or_default();
            if amount > U256::zero() {
                let value = self.get_usd_value(asset, amount);
                total_value = SafeMath::add(total_value, value).unwrap_or_revert(&self.env());
            }
        }

        total_value
    }

    /// Calculate an account's health factor
    ///
    /// Health Factor = (Collateral Value * Liquidation Threshold) / Debt,
    /// in engine fixed point. An account with no debt can never be
    /// liquidated, so it reports U256::MAX.
    pub fn health_factor(&self, account: Address) -> U256 {
        let debt = self.synth_minted.get(&account).unwrap_or_default();
        if debt.is_zero() {
            return U256::MAX;
        }

        let collateral_value = self.get_account_collateral_value(account);
        let adjusted = SafeMath::div(
            SafeMath::mul(collateral_value, U256::from(LIQUIDATION_THRESHOLD))
                .unwrap_or_revert(&self.env()),
            U256::from(LIQUIDATION_PRECISION),
        )
        .unwrap_or_revert(&self.env());

        SafeMath::div(
            SafeMath::mul(adjusted, U256::from(PRECISION)).unwrap_or_revert(&self.env()),
            debt,
        )
        .unwrap_or_revert(&self.env())
    }

    /// USD value (18 decimals) of a quantity of an asset, at the freshest
    /// available feed answer. Valuation reads are best-effort live and never
    /// staleness-guarded.
    pub fn get_usd_value(&self, asset: Address, amount: U256) -> U256 {
        let feed = self.feed_of(asset);
        let (price, _) = PriceFeedContractRef::new(self.env(), feed).latest_round_data();

        let scaled_price = SafeMath::mul(price, U256::from(ADDITIONAL_FEED_PRECISION))
            .unwrap_or_revert(&self.env());
        SafeMath::div(
            SafeMath::mul(scaled_price, amount).unwrap_or_revert(&self.env()),
            U256::from(PRECISION),
        )
        .unwrap_or_revert(&self.env())
    }

    /// Quantity of an asset worth a given USD amount (18 decimals), using a
    /// staleness-checked feed read. Backs liquidation sizing, so an old or
    /// zero answer reverts with StalePrice.
    pub fn get_token_amount_from_usd(&self, asset: Address, usd_amount: U256) -> U256 {
        let price = self.checked_price(asset);

        let scaled_price = SafeMath::mul(price, U256::from(ADDITIONAL_FEED_PRECISION))
            .unwrap_or_revert(&self.env());
        SafeMath::div(
            SafeMath::mul(usd_amount, U256::from(PRECISION)).unwrap_or_revert(&self.env()),
            scaled_price,
        )
        .unwrap_or_revert(&self.env())
    }

    /// Get the synthetic token address
    pub fn get_synth_token(&self) -> Address {
        self.synth_token_address()
    }

    /// Get the minimum health factor
    pub fn get_min_health_factor(&self) -> U256 {
        U256::from(MIN_HEALTH_FACTOR)
    }

    /// Get the liquidation threshold percentage
    pub fn get_liquidation_threshold(&self) -> U256 {
        U256::from(LIQUIDATION_THRESHOLD)
    }

    /// Get the liquidation bonus percentage
    pub fn get_liquidation_bonus(&self) -> U256 {
        U256::from(LIQUIDATION_BONUS)
    }

    // ========================================
    // Internals
    // ========================================

    /// Move collateral out of `from`'s ledger entry and transfer the tokens
    /// to `to`
    fn redeem_internal(&mut self, from: Address, to: Address, asset: Address, amount: U256) {
        let balance = self.collateral_deposited.get(&(from, asset)).unwrap_or_default();
        if balance < amount {
            self.env().revert(EngineError::InsufficientCollateral);
        }
        self.collateral_deposited.set(&(from, asset), balance - amount);

        let timestamp = self.env().get_block_time();
        self.env().emit_event(CollateralRedeemed {
            from,
            to,
            asset,
            amount,
            timestamp,
        });

        let mut token = Cep18TokenContractRef::new(self.env(), asset);
        if !token.transfer(to, amount) {
            self.env().revert(EngineError::TransferFailed);
        }
    }

    /// Reduce `on_behalf_of`'s debt by pulling synthetic dollars from `from`
    /// and destroying them
    fn burn_internal(&mut self, on_behalf_of: Address, from: Address, amount: U256) {
        let debt = self.synth_minted.get(&on_behalf_of).unwrap_or_default();
        if debt < amount {
            self.env().revert(EngineError::InsufficientDebt);
        }
        self.synth_minted.set(&on_behalf_of, debt - amount);

        let engine = Address::from(self.env().self_address());
        let mut synth = SynthUsdTokenContractRef::new(self.env(), self.synth_token_address());
        if !synth.transfer_from(from, engine, amount) {
            self.env().revert(EngineError::TransferFailed);
        }
        synth.burn(amount);
    }

    /// Staleness-checked feed read; zero answers are unusable too
    fn checked_price(&self, asset: Address) -> U256 {
        let feed = self.feed_of(asset);
        let (price, updated_at) = PriceFeedContractRef::new(self.env(), feed).latest_round_data();

        let now = self.env().get_block_time();
        if price.is_zero() || now.saturating_sub(updated_at) > MAX_PRICE_AGE_MS {
            self.env().revert(EngineError::StalePrice);
        }
        price
    }

    fn feed_of(&self, asset: Address) -> Address {
        self.price_feeds
            .get(&asset)
            .unwrap_or_revert_with(&self.env(), EngineError::UnsupportedCollateral)
    }

    fn synth_token_address(&self) -> Address {
        self.synth_token
            .get_or_revert_with(EngineError::InvalidConfiguration)
    }

    fn ensure_positive(&self, amount: U256) {
        if amount.is_zero() {
            self.env().revert(EngineError::ZeroAmount);
        }
    }

    fn ensure_supported(&self, asset: Address) {
        if self.price_feeds.get(&asset).is_none() {
            self.env().revert(EngineError::UnsupportedCollateral);
        }
    }

    fn revert_if_health_factor_broken(&self, account: Address) {
        let health = self.health_factor(account);
        if health < U256::from(MIN_HEALTH_FACTOR) {
            self.env().revert(EngineError::HealthFactorTooLow);
        }
    }
}
