//! Messaging options, fees and receipts exchanged with the transport.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Binary, Uint128};

/// Execution options attached to an outbound packet.
///
/// `gas` is the execution allowance requested for the receiver on the
/// destination chain; `value` is native currency the transport must deliver
/// alongside the packet (pre-paid in the fee).
#[cw_serde]
#[derive(Default, Copy)]
pub struct MessagingOptions {
    pub gas: u64,
    pub value: Uint128,
}

impl MessagingOptions {
    pub fn new(gas: u64, value: u128) -> Self {
        Self {
            gas,
            value: Uint128::new(value),
        }
    }

    /// Combine enforced options with caller-supplied extras. Allowances add up,
    /// so callers can only ever raise the enforced floor.
    pub fn combine(&self, extra: &MessagingOptions) -> MessagingOptions {
        MessagingOptions {
            gas: self.gas.saturating_add(extra.gas),
            value: self.value.saturating_add(extra.value),
        }
    }
}

/// Native fee required by the transport to carry one packet.
#[cw_serde]
#[derive(Default)]
pub struct MessagingFee {
    pub native_fee: Uint128,
}

/// Transport-assigned receipt for a packet handed over for delivery.
#[cw_serde]
pub struct MessagingReceipt {
    /// 32-byte packet id
    pub guid: Binary,
    /// Outbound nonce on the `(sender, dst_eid, receiver)` path
    pub nonce: u64,
    pub fee: MessagingFee,
}

/// Where an inbound packet came from, as attested by the transport.
#[cw_serde]
pub struct Origin {
    pub src_eid: u32,
    /// Sender messenger as a 32-byte peer address
    pub sender: Binary,
    pub nonce: u64,
}
