//! Price feed contract, one instance per collateral asset
//!
//! Mirrors the aggregator interface the engine consumes on a live network:
//! an 8-decimal USD answer plus its last-update timestamp. The engine, not
//! the feed, decides where staleness is tolerable; the feed only reports.
use odra::prelude::*;
use odra::casper_types::U256;
use super::errors::EngineError;
use super::events::AnswerUpdated;

/// Number of decimals every feed answer carries
pub const FEED_DECIMALS: u8 = 8;

/// Maximum age of a feed answer, in milliseconds of block time, before the
/// engine's guarded read path rejects it
pub const MAX_PRICE_AGE_MS: u64 = 3 * 60 * 60 * 1000;

/// Price feed contract
#[odra::module]
pub struct PriceFeed {
    /// Human-readable pair description, e.g. "WETH / USD"
    description: Var<String>,
    /// Latest answer, scaled to FEED_DECIMALS
    latest_answer: Var<U256>,
    /// Block time of the latest update
    updated_at: Var<u64>,
    /// Account allowed to push answers
    admin: Var<Address>,
}

#[odra::module]
impl PriceFeed {
    /// Initialize the feed with a description and a first answer
    pub fn init(&mut self, description: String, initial_answer: U256) {
        let caller = self.env().caller();
        self.admin.set(caller);
        self.description.set(description);
        self.latest_answer.set(initial_answer);
        self.updated_at.set(self.env().get_block_time());
    }

    /// Push a new answer (admin only)
    ///
    /// A zero answer is accepted here and rejected by the engine's guarded
    /// read path; a broken upstream source looks exactly like that.
    pub fn set_answer(&mut self, answer: U256) {
        self.only_admin();

        let updated_at = self.env().get_block_time();
        self.latest_answer.set(answer);
        self.updated_at.set(updated_at);

        self.env().emit_event(AnswerUpdated { answer, updated_at });
    }

    /// Get the latest answer together with its update time
    pub fn latest_round_data(&self) -> (U256, u64) {
        (
            self.latest_answer.get_or_default(),
            self.updated_at.get_or_default(),
        )
    }

    /// Get the feed decimals
    pub fn decimals(&self) -> u8 {
        FEED_DECIMALS
    }

    /// Get the pair description
    pub fn description(&self) -> String {
        self.description.get_or_default()
    }

    fn only_admin(&self) {
        let caller = self.env().caller();
        let admin = self.admin.get_or_revert_with(EngineError::Unauthorized);
        if caller != admin {
            self.env().revert(EngineError::Unauthorized);
        }
    }
}
