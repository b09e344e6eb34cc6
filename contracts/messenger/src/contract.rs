//! Cross-Chain Messenger - Entry Points
//!
//! The implementation is modularized into:
//! - `execute/` - Execute message handlers
//! - `query` - Query message handlers
//! - `peers` - Peer registry
//! - `transport` - Endpoint adapter behind the `MessageTransport` trait

use common::interface::{EidResponse, EndpointQueryMsg};
use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult,
};
use cw2::set_contract_version;

use crate::error::ContractError;
use crate::execute::{
    execute_add_peer_chain, execute_lz_receive, execute_remove_peer_chain, execute_send,
    execute_set_enforced_options, execute_set_inbound_budgets, execute_set_launchpad,
    execute_set_peer,
};
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::query::{
    query_applied_packet, query_config, query_enforced_options, query_inbound_budget,
    query_is_trusted_sender, query_peer, query_peer_chains, query_peer_history,
    query_pending_admin, query_quote, query_quote_batch, query_sent_packet, query_stats,
};
use crate::state::{Config, Stats, ADMIN, CONFIG, CONTRACT_NAME, CONTRACT_VERSION, STATS};
use crate::transport::EndpointTransport;

// ============================================================================
// Instantiate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let admin = deps.api.addr_validate(&msg.admin)?;
    let endpoint = deps.api.addr_validate(&msg.endpoint)?;
    let launchpad = msg
        .launchpad
        .map(|l| deps.api.addr_validate(&l))
        .transpose()?;

    let local: EidResponse = deps
        .querier
        .query_wasm_smart(endpoint.to_string(), &EndpointQueryMsg::Eid {})?;

    let config = Config {
        admin,
        paused: false,
        endpoint,
        eid: local.eid,
        launchpad,
        native_denom: msg.native_denom,
    };
    CONFIG.save(deps.storage, &config)?;
    STATS.save(deps.storage, &Stats::default())?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("admin", config.admin)
        .add_attribute("endpoint", config.endpoint)
        .add_attribute("eid", config.eid.to_string()))
}

// ============================================================================
// Execute
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        // Messaging
        ExecuteMsg::Send {
            messages,
            refund_address,
        } => execute_send::<EndpointTransport>(deps, env, info, messages, refund_address),
        ExecuteMsg::LzReceive {
            origin,
            guid,
            message,
        } => execute_lz_receive::<EndpointTransport>(deps, env, info, origin, guid, message),

        // Peers
        ExecuteMsg::SetPeer { eid, peer } => execute_set_peer(deps, env, info, eid, peer),
        ExecuteMsg::AddPeerChain { eid } => execute_add_peer_chain(deps, info, eid),
        ExecuteMsg::RemovePeerChain { eid } => execute_remove_peer_chain(deps, info, eid),

        // Configuration
        ExecuteMsg::SetLaunchpad { launchpad } => execute_set_launchpad(deps, info, launchpad),
        ExecuteMsg::SetEnforcedOptions { entries } => {
            execute_set_enforced_options(deps, info, entries)
        }
        ExecuteMsg::SetInboundBudgets { entries } => {
            execute_set_inbound_budgets(deps, info, entries)
        }

        // Admin
        ExecuteMsg::Pause {} => Ok(ADMIN.set_paused(deps, info, true)?),
        ExecuteMsg::Unpause {} => Ok(ADMIN.set_paused(deps, info, false)?),
        ExecuteMsg::ProposeAdmin { new_admin } => Ok(ADMIN.propose(deps, env, info, new_admin)?),
        ExecuteMsg::AcceptAdmin {} => Ok(ADMIN.accept(deps, env, info)?),
        ExecuteMsg::CancelAdminProposal {} => Ok(ADMIN.cancel(deps, info)?),
    }
}

// ============================================================================
// Query
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::Stats {} => to_json_binary(&query_stats(deps)?),
        QueryMsg::PendingAdmin {} => to_json_binary(&query_pending_admin(deps)?),
        QueryMsg::Quote {
            dst_eid,
            message,
            options,
        } => to_json_binary(&query_quote::<EndpointTransport>(
            deps, dst_eid, message, options,
        )?),
        QueryMsg::QuoteBatch { messages } => {
            to_json_binary(&query_quote_batch::<EndpointTransport>(deps, messages)?)
        }
        QueryMsg::Peer { eid } => to_json_binary(&query_peer(deps, eid)?),
        QueryMsg::PeerChains {} => to_json_binary(&query_peer_chains(deps)?),
        QueryMsg::IsTrustedSender { eid, sender } => {
            to_json_binary(&query_is_trusted_sender(deps, eid, sender)?)
        }
        QueryMsg::PeerHistory {
            eid,
            start_after,
            limit,
        } => to_json_binary(&query_peer_history(deps, eid, start_after, limit)?),
        QueryMsg::EnforcedOptions { eid, msg_type } => {
            to_json_binary(&query_enforced_options(deps, eid, msg_type)?)
        }
        QueryMsg::InboundBudget { eid, msg_type } => {
            to_json_binary(&query_inbound_budget(deps, eid, msg_type)?)
        }
        QueryMsg::SentPacket { guid } => to_json_binary(&query_sent_packet(deps, guid)?),
        QueryMsg::AppliedPacket { guid } => to_json_binary(&query_applied_packet(deps, guid)?),
    }
}

// ============================================================================
// Migrate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    Ok(Response::new()
        .add_attribute("method", "migrate")
        .add_attribute("version", CONTRACT_VERSION))
}
