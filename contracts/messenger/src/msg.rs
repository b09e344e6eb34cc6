//! Message types for the cross-chain messenger

use common::interface::{OutboundMessage, PeerChainsResponse};
use common::{MessageType, MessagingFee, MessagingOptions, Origin, ProtocolMessage};
use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Binary, Timestamp, Uint128};

use crate::state::{AppliedPacket, SentPacket};

// ============================================================================
// Instantiate & Migrate
// ============================================================================

#[cw_serde]
pub struct MigrateMsg {}

#[cw_serde]
pub struct InstantiateMsg {
    pub admin: String,
    /// Messaging endpoint of this chain
    pub endpoint: String,
    /// Launchpad allowed to send; can be set later with `SetLaunchpad`
    pub launchpad: Option<String>,
    /// Denom messaging fees are paid in (e.g. "uluna")
    pub native_denom: String,
}

// ============================================================================
// Execute Messages
// ============================================================================

/// Options entry for `SetEnforcedOptions` / `SetInboundBudgets`
#[cw_serde]
pub struct OptionsEntry {
    pub eid: u32,
    pub msg_type: MessageType,
    pub options: MessagingOptions,
}

#[cw_serde]
pub enum ExecuteMsg {
    // ========================================================================
    // Messaging
    // ========================================================================
    /// Launchpad only. Send a batch of protocol messages.
    Send {
        messages: Vec<OutboundMessage>,
        refund_address: String,
    },

    /// Endpoint only. Deliver an inbound packet.
    LzReceive {
        origin: Origin,
        guid: Binary,
        message: Binary,
    },

    // ========================================================================
    // Peers
    // ========================================================================
    /// Set the trusted remote messenger for `eid` (32 bytes)
    SetPeer { eid: u32, peer: Binary },

    /// Enable `eid` as a send target
    AddPeerChain { eid: u32 },

    /// Disable `eid` as a send target. Its peer stays trusted for inbound.
    RemovePeerChain { eid: u32 },

    // ========================================================================
    // Configuration
    // ========================================================================
    SetLaunchpad { launchpad: String },

    /// Outbound options enforced per `(dst_eid, msg_type)`
    SetEnforcedOptions { entries: Vec<OptionsEntry> },

    /// Inbound execution ceiling per `(src_eid, msg_type)`
    SetInboundBudgets { entries: Vec<OptionsEntry> },

    // ========================================================================
    // Admin
    // ========================================================================
    Pause {},
    Unpause {},
    ProposeAdmin { new_admin: String },
    AcceptAdmin {},
    CancelAdminProposal {},
}

// ============================================================================
// Query Messages
// ============================================================================

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ConfigResponse)]
    Config {},

    #[returns(StatsResponse)]
    Stats {},

    #[returns(Option<PendingAdminResponse>)]
    PendingAdmin {},

    /// Fee to send one message (same shape as the shared messenger interface)
    #[returns(MessagingFee)]
    Quote {
        dst_eid: u32,
        message: ProtocolMessage,
        options: MessagingOptions,
    },

    #[returns(MessagingFee)]
    QuoteBatch { messages: Vec<OutboundMessage> },

    #[returns(PeerResponse)]
    Peer { eid: u32 },

    #[returns(PeerChainsResponse)]
    PeerChains {},

    #[returns(IsTrustedSenderResponse)]
    IsTrustedSender { eid: u32, sender: Binary },

    #[returns(PeerHistoryResponse)]
    PeerHistory {
        eid: u32,
        start_after: Option<u64>,
        limit: Option<u32>,
    },

    #[returns(MessagingOptions)]
    EnforcedOptions { eid: u32, msg_type: MessageType },

    #[returns(MessagingOptions)]
    InboundBudget { eid: u32, msg_type: MessageType },

    #[returns(Option<SentPacket>)]
    SentPacket { guid: Binary },

    #[returns(Option<AppliedPacket>)]
    AppliedPacket { guid: Binary },
}

// ============================================================================
// Response Types
// ============================================================================

#[cw_serde]
pub struct ConfigResponse {
    pub admin: Addr,
    pub paused: bool,
    pub endpoint: Addr,
    pub eid: u32,
    pub launchpad: Option<Addr>,
    pub native_denom: String,
}

#[cw_serde]
pub struct StatsResponse {
    pub packets_sent: u64,
    pub packets_applied: u64,
    pub fees_paid: Uint128,
}

#[cw_serde]
pub struct PendingAdminResponse {
    pub new_address: Addr,
    pub execute_after: Timestamp,
}

#[cw_serde]
pub struct PeerResponse {
    pub eid: u32,
    pub peer: Option<Binary>,
    pub enabled: bool,
    pub version: u64,
}

#[cw_serde]
pub struct IsTrustedSenderResponse {
    pub trusted: bool,
}

#[cw_serde]
pub struct PeerChangeEntry {
    pub version: u64,
    pub previous: Option<Binary>,
    pub peer: Binary,
    pub changed_by: Addr,
    pub height: u64,
}

#[cw_serde]
pub struct PeerHistoryResponse {
    pub changes: Vec<PeerChangeEntry>,
}
