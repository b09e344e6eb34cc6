//! Error types for the launchpad

use common::admin::AdminError;
use cosmwasm_std::{OverflowError, StdError, Uint128};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error(transparent)]
    Admin(#[from] AdminError),

    #[error("{0}")]
    Overflow(#[from] OverflowError),

    // ========================================================================
    // Authorization Errors
    // ========================================================================
    #[error("Unauthorized: only admin can perform this action")]
    Unauthorized,

    #[error("Unauthorized: only the messenger can apply remote messages")]
    OnlyMessenger,

    // ========================================================================
    // Admin Errors
    // ========================================================================
    #[error("Launchpad is paused")]
    Paused,

    #[error("Cross-chain messenger not set")]
    MessengerNotSet,

    #[error("Liquidity pool not set")]
    LiquidityPoolNotSet,

    // ========================================================================
    // Creation Errors
    // ========================================================================
    #[error("Invalid name: {reason}")]
    InvalidName { reason: String },

    #[error("Invalid symbol: {reason}")]
    InvalidSymbol { reason: String },

    #[error("Insufficient fee: required {required}, provided {provided}")]
    InsufficientFee { required: Uint128, provided: Uint128 },

    // ========================================================================
    // Sale Errors
    // ========================================================================
    #[error("Unknown sale {index} from eid {origin_eid}")]
    UnknownSale { origin_eid: u32, index: u64 },

    #[error("Sale {sale_index} is closed")]
    SaleClosed { sale_index: u64 },

    #[error("Sale {sale_index} reached its target")]
    TargetReached { sale_index: u64 },

    #[error("Sale {sale_index} already graduated")]
    AlreadyGraduated { sale_index: u64 },

    #[error("Sale {sale_index} has not graduated")]
    NotGraduated { sale_index: u64 },

    #[error("Sale {sale_index} is a mirror of a remote sale")]
    NotLocalSale { sale_index: u64 },

    #[error("Sale {sale_index} originates on this chain")]
    NotMirror { sale_index: u64 },

    #[error("Message from eid {src_eid} refers to a sale of eid {origin_eid}")]
    OriginMismatch { src_eid: u32, origin_eid: u32 },

    #[error("Token of sale {sale_index} is not instantiated yet")]
    TokenNotReady { sale_index: u64 },

    #[error("Token {token} does not belong to sale {sale_index}")]
    InvalidToken { sale_index: u64, token: String },

    // ========================================================================
    // Trading Errors
    // ========================================================================
    #[error("Amount {amount} outside buy bounds [{min}, {max}]")]
    AmountOutOfRange {
        amount: Uint128,
        min: Uint128,
        max: Uint128,
    },

    #[error("Curve exhausted: requested {requested}, remaining {remaining}")]
    CurveExhausted {
        requested: Uint128,
        remaining: Uint128,
    },

    #[error("Insufficient funds: required {required}, provided {provided}")]
    InsufficientFunds { required: Uint128, provided: Uint128 },

    #[error("Cannot sell {amount}: only {sold} sold")]
    InsufficientSold { amount: Uint128, sold: Uint128 },

    #[error("Slippage exceeded: minimum {min}, actual {actual}")]
    SlippageExceeded { min: Uint128, actual: Uint128 },

    #[error("Amount must be greater than zero")]
    ZeroAmount,

    #[error("Nothing to sync for sale {sale_index} to eid {dst_eid}")]
    NothingToSync { sale_index: u64, dst_eid: u32 },
}
