//! Messaging endpoint used to run two chains side by side in one test app.
//!
//! Each endpoint owns one endpoint id. `Send` charges the quoted fee, assigns
//! the next nonce on the `(sender, dst_eid, receiver)` path and pushes the
//! packet to the endpoint registered for the receiver, which either delivers
//! it at once or queues it for an explicit `Deliver`.

pub mod contract;
pub mod error;
pub mod msg;
pub mod state;

pub use crate::error::ContractError;
