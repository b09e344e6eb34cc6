use cosmwasm_std::{StdError, Uint128};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("Unauthorized: only admin can perform this action")]
    Unauthorized,

    #[error("Unauthorized: only the launchpad can create pools")]
    OnlyLaunchpad,

    #[error("Pool already exists for sale {sale_index}")]
    PoolExists { sale_index: u64 },

    #[error("Pool not found for sale {sale_index}")]
    PoolNotFound { sale_index: u64 },

    #[error("Token {token} is not the pool token for sale {sale_index}")]
    WrongToken { sale_index: u64, token: String },

    #[error("Pool token balance {balance} below deposit {expected}")]
    TokenNotReceived { expected: Uint128, balance: Uint128 },

    #[error("Amount must be greater than zero")]
    ZeroAmount,

    #[error("Slippage exceeded: minimum {min_out}, got {return_amount}")]
    SlippageExceeded {
        min_out: Uint128,
        return_amount: Uint128,
    },

    #[error("Insufficient liquidity")]
    InsufficientLiquidity,
}
