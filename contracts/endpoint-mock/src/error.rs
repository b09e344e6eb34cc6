use cosmwasm_std::{StdError, Uint128};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("Unauthorized: only admin can perform this action")]
    Unauthorized,

    #[error("Insufficient fee: required {required}, provided {provided}")]
    InsufficientFee { required: Uint128, provided: Uint128 },

    #[error("No route for receiver {receiver} on eid {dst_eid}")]
    UnknownRoute { dst_eid: u32, receiver: String },

    #[error("Unknown endpoint: {endpoint}")]
    UnknownEndpoint { endpoint: String },

    #[error("Packet not found: {guid}")]
    PacketNotFound { guid: String },

    #[error("Invalid receiver: expected 32 bytes, got {len}")]
    InvalidReceiver { len: usize },
}
