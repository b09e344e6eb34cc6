//! Cross-contract message shapes.
//!
//! Each contract's own `ExecuteMsg`/`QueryMsg` carries variants with the same
//! JSON shape as the subsets defined here, so a caller only needs this crate to
//! talk to its collaborators:
//!
//! - launchpad -> messenger: [`MessengerExecuteMsg`], [`MessengerQueryMsg`]
//! - messenger -> launchpad: [`LaunchpadHookMsg`]
//! - messenger -> transport endpoint: [`EndpointExecuteMsg`], [`EndpointQueryMsg`]
//! - transport endpoint -> messenger: [`OAppExecuteMsg`]
//! - launchpad -> liquidity pool: [`PoolExecuteMsg`]

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{to_json_binary, Binary, Coin, CosmosMsg, StdResult, Uint128, WasmMsg};

use crate::options::{MessagingOptions, MessagingReceipt, Origin};
use crate::protocol::ProtocolMessage;

// ============================================================================
// Messenger
// ============================================================================

/// One message of an outbound batch.
#[cw_serde]
pub struct OutboundMessage {
    pub dst_eid: u32,
    pub message: ProtocolMessage,
    /// Extra options on top of the enforced options for the message type
    pub options: MessagingOptions,
}

#[cw_serde]
pub enum MessengerExecuteMsg {
    /// Send a batch of protocol messages. Attached funds must cover the sum
    /// of the quoted fees; the excess goes back to `refund_address`.
    Send {
        messages: Vec<OutboundMessage>,
        refund_address: String,
    },
}

#[cw_serde]
pub enum MessengerQueryMsg {
    /// Fee to send one message. Returns `MessagingFee`.
    Quote {
        dst_eid: u32,
        message: ProtocolMessage,
        options: MessagingOptions,
    },
    /// Summed fee of a batch. Returns `MessagingFee`.
    QuoteBatch { messages: Vec<OutboundMessage> },
    /// Enabled peer chains. Returns [`PeerChainsResponse`].
    PeerChains {},
}

#[cw_serde]
pub struct PeerChainsResponse {
    pub eids: Vec<u32>,
}

/// Data set on the response of a messenger `Send`.
#[cw_serde]
pub struct SendResponse {
    pub receipts: Vec<MessagingReceipt>,
}

/// Build the messenger `Send` call carrying `fee` as funds.
pub fn messenger_send_msg(
    messenger: impl Into<String>,
    messages: Vec<OutboundMessage>,
    refund_address: impl Into<String>,
    fee: Vec<Coin>,
) -> StdResult<CosmosMsg> {
    Ok(WasmMsg::Execute {
        contract_addr: messenger.into(),
        msg: to_json_binary(&MessengerExecuteMsg::Send {
            messages,
            refund_address: refund_address.into(),
        })?,
        funds: fee,
    }
    .into())
}

// ============================================================================
// Launchpad
// ============================================================================

#[cw_serde]
pub enum LaunchpadHookMsg {
    /// Apply an authenticated inbound protocol message.
    ApplyRemote {
        src_eid: u32,
        guid: Binary,
        message: ProtocolMessage,
    },
}

// ============================================================================
// Transport endpoint
// ============================================================================

#[cw_serde]
pub enum EndpointExecuteMsg {
    /// Hand an encoded packet to the transport. Funds must cover the quote.
    Send {
        dst_eid: u32,
        /// Receiver on the destination chain as a 32-byte peer address
        receiver: Binary,
        message: Binary,
        options: MessagingOptions,
        refund_address: String,
    },
}

#[cw_serde]
pub enum EndpointQueryMsg {
    /// Returns `MessagingFee`
    Quote {
        dst_eid: u32,
        message: Binary,
        options: MessagingOptions,
    },
    /// Last nonce used on a path. Returns [`NonceResponse`].
    OutboundNonce {
        sender: String,
        dst_eid: u32,
        receiver: Binary,
    },
    /// Endpoint id of this chain. Returns [`EidResponse`].
    Eid {},
}

#[cw_serde]
pub struct NonceResponse {
    pub nonce: u64,
}

#[cw_serde]
pub struct EidResponse {
    pub eid: u32,
}

/// Receiver hook invoked by the endpoint on packet delivery.
#[cw_serde]
pub enum OAppExecuteMsg {
    LzReceive {
        origin: Origin,
        guid: Binary,
        message: Binary,
    },
}

// ============================================================================
// Liquidity pool
// ============================================================================

#[cw_serde]
pub enum PoolExecuteMsg {
    /// Seed the pool of a graduated sale. `token_amount` must already be
    /// transferred to the pool; the raised native funds are attached.
    CreatePool {
        sale_index: u64,
        token: String,
        token_amount: Uint128,
    },
}
