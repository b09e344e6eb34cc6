//! State definitions for the cross-chain messenger

use common::admin::{AdminControl, Administered, PendingAdmin};
use common::{MessageType, MessagingOptions, SaleRef};
use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, StdResult, Storage, Uint128};
use cw_storage_plus::{Item, Map};

pub const CONTRACT_NAME: &str = "crates.io:launchpad-messenger";
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Core Configuration
// ============================================================================

#[cw_serde]
pub struct Config {
    pub admin: Addr,
    pub paused: bool,
    /// Messaging endpoint; the only caller allowed to deliver packets
    pub endpoint: Addr,
    /// Endpoint id of this chain, read from the endpoint at instantiation
    pub eid: u32,
    /// The only caller allowed to send, and the target of inbound messages
    pub launchpad: Option<Addr>,
    /// Denom messaging fees are paid in
    pub native_denom: String,
}

impl Administered for Config {
    fn admin(&self) -> &Addr {
        &self.admin
    }

    fn set_admin(&mut self, admin: Addr) {
        self.admin = admin;
    }

    fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }
}

#[cw_serde]
#[derive(Default)]
pub struct Stats {
    pub packets_sent: u64,
    pub packets_applied: u64,
    pub fees_paid: Uint128,
}

// ============================================================================
// Peers
// ============================================================================

/// Trusted remote messenger of one chain.
#[cw_serde]
#[derive(Default)]
pub struct PeerConfig {
    /// 32-byte peer address; `None` until the first `SetPeer`
    pub peer: Option<[u8; 32]>,
    /// Whether the chain is a send target
    pub enabled: bool,
    /// Bumped on every `SetPeer`
    pub version: u64,
}

/// Audit entry appended on every `SetPeer`.
#[cw_serde]
pub struct PeerChange {
    pub previous: Option<[u8; 32]>,
    pub peer: [u8; 32],
    pub changed_by: Addr,
    pub height: u64,
}

// ============================================================================
// Packets
// ============================================================================

#[cw_serde]
pub struct SentPacket {
    pub dst_eid: u32,
    pub nonce: u64,
    pub msg_type: MessageType,
    pub sale: SaleRef,
    pub fee: Uint128,
    pub height: u64,
}

#[cw_serde]
pub struct AppliedPacket {
    pub src_eid: u32,
    pub nonce: u64,
    pub msg_type: MessageType,
    pub sale: SaleRef,
    pub height: u64,
}

// ============================================================================
// Storage
// ============================================================================

pub const CONFIG: Item<Config> = Item::new("config");
pub const PENDING_ADMIN: Item<PendingAdmin> = Item::new("pending_admin");
pub const ADMIN: AdminControl<Config> = AdminControl::new(CONFIG, PENDING_ADMIN);
pub const STATS: Item<Stats> = Item::new("stats");

/// eid => peer
pub const PEERS: Map<u32, PeerConfig> = Map::new("peers");

/// (eid, version) => change
pub const PEER_HISTORY: Map<(u32, u64), PeerChange> = Map::new("peer_history");

/// (dst_eid, msg_type tag) => enforced outbound options
pub const ENFORCED_OPTIONS: Map<(u32, u8), MessagingOptions> = Map::new("enforced_options");

/// (src_eid, msg_type tag) => inbound execution budget
pub const INBOUND_BUDGETS: Map<(u32, u8), MessagingOptions> = Map::new("inbound_budgets");

/// guid => outbound packet
pub const SENT: Map<&[u8], SentPacket> = Map::new("sent");

/// guid => applied inbound packet
pub const APPLIED: Map<&[u8], AppliedPacket> = Map::new("applied");

/// Gas for applying CREATE_TOKEN: the launchpad instantiates a cw20-base
/// mirror and stores its address from the instantiate reply, which costs
/// several hundred thousand SDK gas on a live chain.
pub const CREATE_TOKEN_GAS: u64 = 1_000_000;

/// Default execution options per message type, used for both the outbound
/// enforced options and the inbound budget until configured.
pub fn default_options(msg_type: MessageType) -> MessagingOptions {
    match msg_type {
        MessageType::CreateToken => MessagingOptions::new(CREATE_TOKEN_GAS, 0),
        MessageType::BridgeTokens => MessagingOptions::new(200_000, 0),
        MessageType::LiquidityCreated => MessagingOptions::new(100_000, 0),
    }
}

pub fn enforced_options(
    storage: &dyn Storage,
    eid: u32,
    msg_type: MessageType,
) -> StdResult<MessagingOptions> {
    Ok(ENFORCED_OPTIONS
        .may_load(storage, (eid, msg_type.as_u8()))?
        .unwrap_or_else(|| default_options(msg_type)))
}

pub fn inbound_budget(
    storage: &dyn Storage,
    eid: u32,
    msg_type: MessageType,
) -> StdResult<MessagingOptions> {
    Ok(INBOUND_BUDGETS
        .may_load(storage, (eid, msg_type.as_u8()))?
        .unwrap_or_else(|| default_options(msg_type)))
}
