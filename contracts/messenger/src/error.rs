//! Error types for the cross-chain messenger

use common::admin::AdminError;
use cosmwasm_std::{StdError, Uint128};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error(transparent)]
    Admin(#[from] AdminError),

    // ========================================================================
    // Authorization Errors
    // ========================================================================
    #[error("Unauthorized: only admin can perform this action")]
    Unauthorized,

    #[error("Unauthorized: only the launchpad can send")]
    OnlyLaunchpad,

    #[error("Unauthorized: only the endpoint can deliver")]
    OnlyEndpoint,

    // ========================================================================
    // Admin Errors
    // ========================================================================
    #[error("Messenger is paused")]
    Paused,

    #[error("Launchpad not set")]
    LaunchpadNotSet,

    // ========================================================================
    // Peer Errors
    // ========================================================================
    #[error("No peer set for eid {eid}")]
    PeerNotSet { eid: u32 },

    #[error("Peer chain not enabled: {eid}")]
    PeerChainNotEnabled { eid: u32 },

    #[error("Invalid peer: {reason}")]
    InvalidPeer { reason: String },

    #[error("Untrusted sender {sender} for eid {src_eid}")]
    UntrustedSender { src_eid: u32, sender: String },

    // ========================================================================
    // Messaging Errors
    // ========================================================================
    #[error("Insufficient fee: required {required}, provided {provided}")]
    InsufficientFee { required: Uint128, provided: Uint128 },

    #[error("Empty message batch")]
    EmptyBatch,

    #[error("Invalid message: {reason}")]
    InvalidMessage { reason: String },

    #[error("Invalid options: {reason}")]
    InvalidOptions { reason: String },

    #[error("GUID does not match packet origin")]
    GuidMismatch,

    #[error("Inbound value {value} exceeds budget {budget} for {msg_type}")]
    BudgetExceeded {
        msg_type: String,
        value: Uint128,
        budget: Uint128,
    },
}
