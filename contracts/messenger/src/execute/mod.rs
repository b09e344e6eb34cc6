//! Execute handlers for the cross-chain messenger.
//!
//! - `send` - outbound batches from the launchpad
//! - `receive` - inbound delivery from the endpoint
//! - `config` - peers, launchpad and per-type options

mod config;
mod receive;
mod send;

pub use config::*;
pub use receive::*;
pub use send::*;
