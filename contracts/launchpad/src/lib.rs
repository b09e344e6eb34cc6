//! Omnichain Launchpad - bonding-curve token sales mirrored across chains
//!
//! Every sale lives on the chain it was created on (its origin) and is
//! mirrored, closed to trading, on every peer chain. Sales are addressed
//! across chains by their `SaleRef` (origin eid, origin index).
//!
//! # Launch
//! 1. `Create` registers an open sale and instantiates its cw20 with the full supply
//! 2. CREATE_TOKEN goes to every enabled peer chain through the messenger
//! 3. Each peer registers a closed mirror once, however often the message arrives
//!
//! # Trading
//! 1. `Buy` and cw20 `Send` + `Sell` move along the step curve
//! 2. `SyncSale` ships the gross trade deltas since the last sync (BRIDGE_TOKENS)
//! 3. Deltas only ever add, so mirrors converge whatever the delivery order
//!
//! # Graduation
//! 1. The buy that reaches the target freezes the sale
//! 2. Raised funds and the unsold supply seed the liquidity pool
//! 3. LIQUIDITY_CREATED closes the mirrors for good

pub mod contract;
pub mod curve;
pub mod error;
mod execute;
pub mod migrator;
pub mod msg;
pub mod outbound;
mod query;
pub mod state;

pub use crate::curve::CurveConfig;
pub use crate::error::ContractError;
