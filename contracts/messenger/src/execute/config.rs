//! Configuration handlers.
//!
//! This module handles:
//! - Peer management (set peer, enable/disable peer chains)
//! - Launchpad address
//! - Enforced outbound options and inbound budgets

use cosmwasm_std::{Binary, DepsMut, Env, MessageInfo, Response};

use crate::error::ContractError;
use crate::msg::OptionsEntry;
use crate::peers;
use crate::state::{CONFIG, ENFORCED_OPTIONS, INBOUND_BUDGETS};

// ============================================================================
// Peer Management
// ============================================================================

/// Set (or replace) the trusted remote messenger for a chain.
pub fn execute_set_peer(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    eid: u32,
    peer: Binary,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.admin {
        return Err(ContractError::Unauthorized);
    }

    let peer_config = peers::set_peer(deps.storage, eid, &peer, &info.sender, env.block.height)?;

    Ok(Response::new()
        .add_attribute("method", "set_peer")
        .add_attribute("eid", eid.to_string())
        .add_attribute("peer", format!("0x{}", hex::encode(peer.as_slice())))
        .add_attribute("version", peer_config.version.to_string()))
}

/// Enable a chain as a send target.
pub fn execute_add_peer_chain(
    deps: DepsMut,
    info: MessageInfo,
    eid: u32,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.admin {
        return Err(ContractError::Unauthorized);
    }

    let peer_config = peers::set_chain_enabled(deps.storage, eid, true)?;

    Ok(Response::new()
        .add_attribute("method", "add_peer_chain")
        .add_attribute("eid", eid.to_string())
        .add_attribute("peer_set", peer_config.peer.is_some().to_string()))
}

/// Disable a chain as a send target.
pub fn execute_remove_peer_chain(
    deps: DepsMut,
    info: MessageInfo,
    eid: u32,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.admin {
        return Err(ContractError::Unauthorized);
    }

    peers::set_chain_enabled(deps.storage, eid, false)?;

    Ok(Response::new()
        .add_attribute("method", "remove_peer_chain")
        .add_attribute("eid", eid.to_string()))
}

// ============================================================================
// Launchpad & Options
// ============================================================================

pub fn execute_set_launchpad(
    deps: DepsMut,
    info: MessageInfo,
    launchpad: String,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    if info.sender != config.admin {
        return Err(ContractError::Unauthorized);
    }

    let launchpad_addr = deps.api.addr_validate(&launchpad)?;
    config.launchpad = Some(launchpad_addr.clone());
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("method", "set_launchpad")
        .add_attribute("launchpad", launchpad_addr))
}

fn validate_entries(entries: &[OptionsEntry]) -> Result<(), ContractError> {
    if entries.is_empty() {
        return Err(ContractError::InvalidOptions {
            reason: "no entries".to_string(),
        });
    }
    if let Some(entry) = entries.iter().find(|e| e.options.gas == 0) {
        return Err(ContractError::InvalidOptions {
            reason: format!(
                "zero gas for {} on eid {}",
                entry.msg_type.as_str(),
                entry.eid
            ),
        });
    }
    Ok(())
}

pub fn execute_set_enforced_options(
    deps: DepsMut,
    info: MessageInfo,
    entries: Vec<OptionsEntry>,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.admin {
        return Err(ContractError::Unauthorized);
    }
    validate_entries(&entries)?;

    for entry in &entries {
        ENFORCED_OPTIONS.save(
            deps.storage,
            (entry.eid, entry.msg_type.as_u8()),
            &entry.options,
        )?;
    }

    Ok(Response::new()
        .add_attribute("method", "set_enforced_options")
        .add_attribute("entries", entries.len().to_string()))
}

pub fn execute_set_inbound_budgets(
    deps: DepsMut,
    info: MessageInfo,
    entries: Vec<OptionsEntry>,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.admin {
        return Err(ContractError::Unauthorized);
    }
    validate_entries(&entries)?;

    for entry in &entries {
        INBOUND_BUDGETS.save(
            deps.storage,
            (entry.eid, entry.msg_type.as_u8()),
            &entry.options,
        )?;
    }

    Ok(Response::new()
        .add_attribute("method", "set_inbound_budgets")
        .add_attribute("entries", entries.len().to_string()))
}
