use common::{MessagingFee, MessagingOptions, Origin};
use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Binary, Uint128};

#[cw_serde]
pub struct InstantiateMsg {
    pub admin: String,
    /// Endpoint id of the chain this endpoint serves
    pub eid: u32,
    pub native_denom: String,
    pub base_fee: Uint128,
    pub per_byte_fee: Uint128,
    pub gas_price: Uint128,
    pub auto_deliver: bool,
}

#[cw_serde]
pub struct MigrateMsg {}

/// Packet as pushed from the source endpoint to the destination endpoint.
#[cw_serde]
pub struct Packet {
    pub origin: Origin,
    pub receiver: Addr,
    pub guid: Binary,
    pub message: Binary,
    /// Native value delivered alongside the packet
    pub value: Uint128,
    pub delivered: bool,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Hand a packet to the transport (same shape as the shared endpoint interface)
    Send {
        dst_eid: u32,
        receiver: Binary,
        message: Binary,
        options: MessagingOptions,
        refund_address: String,
    },
    /// Inbound packet from a known endpoint
    Receive { packet: Packet },
    /// Deliver a queued packet, or deliver an already delivered one again
    Deliver { guid: Binary },
    /// Admin: route packets for `oapp` to the endpoint serving its chain
    SetDestEndpoint { oapp: String, endpoint: String },
    /// Admin: toggle immediate delivery of inbound packets
    SetAutoDeliver { enabled: bool },
    /// Admin: update the fee schedule
    SetFees {
        base_fee: Uint128,
        per_byte_fee: Uint128,
        gas_price: Uint128,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(MessagingFee)]
    Quote {
        dst_eid: u32,
        message: Binary,
        options: MessagingOptions,
    },
    #[returns(common::interface::NonceResponse)]
    OutboundNonce {
        sender: String,
        dst_eid: u32,
        receiver: Binary,
    },
    #[returns(common::interface::EidResponse)]
    Eid {},
    #[returns(ConfigResponse)]
    Config {},
    #[returns(Packet)]
    Packet { guid: Binary },
    /// Inbound packets not yet delivered
    #[returns(PendingPacketsResponse)]
    PendingPackets {},
}

#[cw_serde]
pub struct ConfigResponse {
    pub admin: Addr,
    pub eid: u32,
    pub native_denom: String,
    pub base_fee: Uint128,
    pub per_byte_fee: Uint128,
    pub gas_price: Uint128,
    pub auto_deliver: bool,
}

#[cw_serde]
pub struct PendingPacketsResponse {
    pub guids: Vec<Binary>,
}
