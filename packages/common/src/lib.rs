//! Common - Shared Types and Utilities for the Omnichain Launchpad Contracts
//!
//! This package provides the pieces every contract in the workspace must agree
//! on byte-for-byte:
//! - `protocol` - cross-chain message types and the wire codec
//! - `options` - messaging options, fees, receipts and packet origins
//! - `address` - 32-byte peer address encoding
//! - `admin` - pause switch and timelocked admin transfer
//! - `hash` - keccak256 and packet GUID derivation
//! - `interface` - cross-contract execute/query messages

pub mod address;
pub mod admin;
pub mod hash;
pub mod interface;
pub mod options;
pub mod protocol;

pub use address::{address_to_bytes32, bytes32_from_binary};
pub use hash::{bytes32_to_hex, compute_guid, keccak256};
pub use options::{MessagingFee, MessagingOptions, MessagingReceipt, Origin};
pub use protocol::{
    peek_message_type, MessageType, ProtocolMessage, SaleRef, TradeDirection, MAX_MESSAGE_SIZE,
};
