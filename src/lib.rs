#![cfg_attr(not(test), no_std)]
#![cfg_attr(not(test), no_main)]
extern crate alloc;

// Synthetic-dollar issuance engine
pub mod engine;

// Token modules
pub mod token;
pub mod tokens;

// Shared support modules
pub mod errors;
pub mod events;
pub mod math;
