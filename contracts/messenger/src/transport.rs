//! Transport seam.
//!
//! Handlers are generic over [`MessageTransport`] and connect it from the
//! config they load; the deployed contract uses [`EndpointTransport`], unit
//! tests substitute an in-memory fake.

use common::interface::{EndpointExecuteMsg, EndpointQueryMsg, NonceResponse};
use common::{MessagingFee, MessagingOptions};
use crate::state::Config;
use cosmwasm_std::{
    coins, to_json_binary, Addr, Binary, CosmosMsg, Deps, StdResult, Uint128, WasmMsg,
};

/// Encoded packet ready to hand to the transport.
pub struct OutboundPacket {
    pub dst_eid: u32,
    pub receiver: [u8; 32],
    pub message: Vec<u8>,
    pub options: MessagingOptions,
}

pub trait MessageTransport {
    fn connect(config: &Config) -> Self
    where
        Self: Sized;

    /// Native fee to carry `message` to `dst_eid` with `options`.
    fn quote(
        &self,
        deps: Deps,
        dst_eid: u32,
        message: &[u8],
        options: &MessagingOptions,
    ) -> StdResult<MessagingFee>;

    /// Last nonce used on the `(sender, dst_eid, receiver)` path.
    fn outbound_nonce(
        &self,
        deps: Deps,
        sender: &Addr,
        dst_eid: u32,
        receiver: &[u8; 32],
    ) -> StdResult<u64>;

    /// Message handing `packet` to the transport with exactly `fee` attached.
    fn send(&self, packet: OutboundPacket, fee: Uint128, refund: &Addr) -> StdResult<CosmosMsg>;

    /// Whether `caller` may deliver inbound packets.
    fn is_endpoint(&self, caller: &Addr) -> bool;
}

/// Adapter for the messaging endpoint contract.
pub struct EndpointTransport {
    pub endpoint: Addr,
    pub native_denom: String,
}

impl MessageTransport for EndpointTransport {
    fn connect(config: &Config) -> Self {
        Self {
            endpoint: config.endpoint.clone(),
            native_denom: config.native_denom.clone(),
        }
    }

    fn quote(
        &self,
        deps: Deps,
        dst_eid: u32,
        message: &[u8],
        options: &MessagingOptions,
    ) -> StdResult<MessagingFee> {
        deps.querier.query_wasm_smart(
            self.endpoint.to_string(),
            &EndpointQueryMsg::Quote {
                dst_eid,
                message: Binary::from(message),
                options: *options,
            },
        )
    }

    fn outbound_nonce(
        &self,
        deps: Deps,
        sender: &Addr,
        dst_eid: u32,
        receiver: &[u8; 32],
    ) -> StdResult<u64> {
        let res: NonceResponse = deps.querier.query_wasm_smart(
            self.endpoint.to_string(),
            &EndpointQueryMsg::OutboundNonce {
                sender: sender.to_string(),
                dst_eid,
                receiver: Binary::from(receiver.to_vec()),
            },
        )?;
        Ok(res.nonce)
    }

    fn send(&self, packet: OutboundPacket, fee: Uint128, refund: &Addr) -> StdResult<CosmosMsg> {
        let funds = if fee.is_zero() {
            vec![]
        } else {
            coins(fee.u128(), &self.native_denom)
        };
        Ok(WasmMsg::Execute {
            contract_addr: self.endpoint.to_string(),
            msg: to_json_binary(&EndpointExecuteMsg::Send {
                dst_eid: packet.dst_eid,
                receiver: Binary::from(packet.receiver.to_vec()),
                message: Binary::from(packet.message),
                options: packet.options,
                refund_address: refund.to_string(),
            })?,
            funds,
        }
        .into())
    }

    fn is_endpoint(&self, caller: &Addr) -> bool {
        *caller == self.endpoint
    }
}
