//! Liquidity pool for graduated sales.
//!
//! One native/token pair per sale, created once by the launchpad with the
//! sale's raised funds and its unsold token balance. Swaps use the constant
//! product rule with the fee retained in the reserves.

pub mod contract;
pub mod error;
pub mod msg;
pub mod state;

pub use crate::error::ContractError;
