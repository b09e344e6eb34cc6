//! Cross-Chain Messenger - authenticated transport adapter for the launchpad
//!
//! The messenger is the only contract that talks to the messaging endpoint.
//! It owns the trusted peer of every remote chain and the per-message-type
//! execution options.
//!
//! # Outbound
//! 1. The launchpad calls `Send` with a batch of protocol messages and the fee
//! 2. Every destination is checked against the peer registry before anything is sent
//! 3. Each packet is quoted, then handed to the endpoint with exactly its fee
//! 4. Any excess is refunded; receipts are returned in the response data
//!
//! # Inbound
//! 1. The endpoint calls `LzReceive`
//! 2. The origin sender must be the registered peer for the source chain
//! 3. Replayed GUIDs succeed without side effects
//! 4. The decoded message is applied to the launchpad under the inbound gas budget

pub mod contract;
pub mod error;
mod execute;
pub mod msg;
pub mod peers;
mod query;
pub mod state;
pub mod transport;

#[cfg(test)]
mod tests;

pub use crate::error::ContractError;
pub use crate::transport::{EndpointTransport, MessageTransport};
