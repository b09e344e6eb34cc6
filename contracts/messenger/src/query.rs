//! Query handlers for the cross-chain messenger.

use common::interface::{OutboundMessage, PeerChainsResponse};
use common::{MessageType, MessagingFee, MessagingOptions, ProtocolMessage};
use cosmwasm_std::{Binary, Deps, StdResult};

use crate::execute::{prepare_message, quote_batch};
use crate::msg::{
    ConfigResponse, IsTrustedSenderResponse, PeerChangeEntry, PeerHistoryResponse,
    PeerResponse, PendingAdminResponse, StatsResponse,
};
use crate::peers;
use crate::state::{
    enforced_options, inbound_budget, AppliedPacket, SentPacket, APPLIED, CONFIG,
    PENDING_ADMIN, PEERS, SENT, STATS,
};
use crate::transport::MessageTransport;

// ============================================================================
// Core Queries
// ============================================================================

pub fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        admin: config.admin,
        paused: config.paused,
        endpoint: config.endpoint,
        eid: config.eid,
        launchpad: config.launchpad,
        native_denom: config.native_denom,
    })
}

pub fn query_stats(deps: Deps) -> StdResult<StatsResponse> {
    let stats = STATS.may_load(deps.storage)?.unwrap_or_default();
    Ok(StatsResponse {
        packets_sent: stats.packets_sent,
        packets_applied: stats.packets_applied,
        fees_paid: stats.fees_paid,
    })
}

pub fn query_pending_admin(deps: Deps) -> StdResult<Option<PendingAdminResponse>> {
    let pending = PENDING_ADMIN.may_load(deps.storage)?;
    Ok(pending.map(|p| PendingAdminResponse {
        new_address: p.new_address,
        execute_after: p.execute_after,
    }))
}

// ============================================================================
// Fee Queries
// ============================================================================

pub fn query_quote<T: MessageTransport>(
    deps: Deps,
    dst_eid: u32,
    message: ProtocolMessage,
    options: MessagingOptions,
) -> StdResult<MessagingFee> {
    let transport = T::connect(&CONFIG.load(deps.storage)?);
    let prepared = prepare_message(deps, &transport, dst_eid, &message, &options)?;
    Ok(MessagingFee {
        native_fee: prepared.fee,
    })
}

pub fn query_quote_batch<T: MessageTransport>(
    deps: Deps,
    messages: Vec<OutboundMessage>,
) -> StdResult<MessagingFee> {
    let transport = T::connect(&CONFIG.load(deps.storage)?);
    quote_batch(deps, &transport, &messages)
}

// ============================================================================
// Peer Queries
// ============================================================================

pub fn query_peer(deps: Deps, eid: u32) -> StdResult<PeerResponse> {
    let config = PEERS.may_load(deps.storage, eid)?.unwrap_or_default();
    Ok(PeerResponse {
        eid,
        peer: config.peer.map(|p| Binary::from(p.to_vec())),
        enabled: config.enabled,
        version: config.version,
    })
}

pub fn query_peer_chains(deps: Deps) -> StdResult<PeerChainsResponse> {
    Ok(PeerChainsResponse {
        eids: peers::enabled_peer_chains(deps.storage)?,
    })
}

pub fn query_is_trusted_sender(
    deps: Deps,
    eid: u32,
    sender: Binary,
) -> StdResult<IsTrustedSenderResponse> {
    Ok(IsTrustedSenderResponse {
        trusted: peers::is_trusted_sender(deps.storage, eid, sender.as_slice())?,
    })
}

pub fn query_peer_history(
    deps: Deps,
    eid: u32,
    start_after: Option<u64>,
    limit: Option<u32>,
) -> StdResult<PeerHistoryResponse> {
    let changes = peers::peer_history(deps.storage, eid, start_after, limit)?
        .into_iter()
        .map(|(version, change)| PeerChangeEntry {
            version,
            previous: change.previous.map(|p| Binary::from(p.to_vec())),
            peer: Binary::from(change.peer.to_vec()),
            changed_by: change.changed_by,
            height: change.height,
        })
        .collect();
    Ok(PeerHistoryResponse { changes })
}

// ============================================================================
// Options & Packet Queries
// ============================================================================

pub fn query_enforced_options(
    deps: Deps,
    eid: u32,
    msg_type: MessageType,
) -> StdResult<MessagingOptions> {
    enforced_options(deps.storage, eid, msg_type)
}

pub fn query_inbound_budget(
    deps: Deps,
    eid: u32,
    msg_type: MessageType,
) -> StdResult<MessagingOptions> {
    inbound_budget(deps.storage, eid, msg_type)
}

pub fn query_sent_packet(deps: Deps, guid: Binary) -> StdResult<Option<SentPacket>> {
    SENT.may_load(deps.storage, guid.as_slice())
}

pub fn query_applied_packet(deps: Deps, guid: Binary) -> StdResult<Option<AppliedPacket>> {
    APPLIED.may_load(deps.storage, guid.as_slice())
}
