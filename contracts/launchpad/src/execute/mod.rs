//! Execute handlers for the launchpad.
//!
//! - `sale` - token creation and launch to remote chains
//! - `trade` - curve buys and sells
//! - `sync` - trade deltas and liquidity notices to mirroring chains
//! - `remote` - messages applied on behalf of the messenger
//! - `config` - collaborators and fees

mod config;
mod remote;
mod sale;
mod sync;
mod trade;

pub use config::*;
pub use remote::*;
pub use sale::*;
pub use sync::*;
pub use trade::*;
