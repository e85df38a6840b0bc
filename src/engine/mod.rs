//! Synthetic-dollar issuance engine
//!
//! Users lock CEP-18 collateral, mint a dollar-pegged synthetic token against
//! it, and third-party liquidators may close undercollateralized positions for
//! a bonus. The engine's single job is solvency: synthetic dollars in
//! circulation must stay backed by more collateral value than debt, enforced
//! through a health-factor check after every state-changing call.

pub mod synth_engine;
pub mod price_feed;
pub mod errors;
pub mod events;


pub use synth_engine::SynthEngine;
pub use price_feed::PriceFeed;
pub use errors::EngineError;
pub use events::*;
