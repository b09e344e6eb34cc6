//! Configuration management handlers.
//!
//! This module handles:
//! - Collaborator addresses (liquidity pool, cross-chain messenger)
//! - Creation fee and its recipient

use cosmwasm_std::{DepsMut, MessageInfo, Response, Uint128};

use crate::error::ContractError;
use crate::state::CONFIG;

// ============================================================================
// Collaborators
// ============================================================================

/// Set the pool that receives graduated sales.
pub fn execute_set_liquidity_pool(
    deps: DepsMut,
    info: MessageInfo,
    address: String,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    if info.sender != config.admin {
        return Err(ContractError::Unauthorized);
    }

    let pool = deps.api.addr_validate(&address)?;
    config.liquidity_pool = Some(pool);
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "set_liquidity_pool")
        .add_attribute("liquidity_pool", address))
}

/// Set the messenger used for outbound messages and trusted for inbound ones.
pub fn execute_set_cross_chain_messenger(
    deps: DepsMut,
    info: MessageInfo,
    address: String,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    if info.sender != config.admin {
        return Err(ContractError::Unauthorized);
    }

    let messenger = deps.api.addr_validate(&address)?;
    config.messenger = Some(messenger);
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "set_cross_chain_messenger")
        .add_attribute("messenger", address))
}

// ============================================================================
// Fees
// ============================================================================

pub fn execute_set_creation_fee(
    deps: DepsMut,
    info: MessageInfo,
    fee: Uint128,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    if info.sender != config.admin {
        return Err(ContractError::Unauthorized);
    }

    config.creation_fee = fee;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "set_creation_fee")
        .add_attribute("creation_fee", fee))
}

pub fn execute_set_fee_recipient(
    deps: DepsMut,
    info: MessageInfo,
    address: String,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    if info.sender != config.admin {
        return Err(ContractError::Unauthorized);
    }

    config.fee_recipient = deps.api.addr_validate(&address)?;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "set_fee_recipient")
        .add_attribute("fee_recipient", address))
}
