use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Uint128};
use cw_storage_plus::{Item, Map};

use crate::msg::Packet;

pub const CONTRACT_NAME: &str = "crates.io:launchpad-endpoint-mock";
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DELIVERY_REPLY_ID: u64 = 1;

#[cw_serde]
pub struct Config {
    pub admin: Addr,
    pub eid: u32,
    pub native_denom: String,
    /// Flat fee per packet
    pub base_fee: Uint128,
    /// Fee per encoded message byte
    pub per_byte_fee: Uint128,
    /// Fee per unit of destination gas requested in the options
    pub gas_price: Uint128,
    /// Deliver inbound packets immediately instead of queueing them
    pub auto_deliver: bool,
}

/// Where packets for a remote receiver are pushed.
#[cw_serde]
pub struct Route {
    pub dst_eid: u32,
    pub oapp: String,
    pub endpoint: Addr,
}

pub const CONFIG: Item<Config> = Item::new("config");

/// receiver bytes32 => route to its endpoint
pub const ROUTES: Map<&[u8], Route> = Map::new("routes");

/// Endpoints allowed to push inbound packets here
pub const KNOWN_ENDPOINTS: Map<&Addr, bool> = Map::new("known_endpoints");

/// (sender, dst_eid, receiver bytes32) => last outbound nonce
pub const OUTBOUND_NONCES: Map<(&Addr, u32, &[u8]), u64> = Map::new("outbound_nonces");

/// guid => inbound packet
pub const INBOX: Map<&[u8], Packet> = Map::new("inbox");

/// guid of the packet whose automatic delivery is in flight
pub const PENDING_DELIVERY: Item<Vec<u8>> = Item::new("pending_delivery");
