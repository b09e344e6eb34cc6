//! Outbound batches.

use std::collections::BTreeMap;

use common::interface::{OutboundMessage, SendResponse};
use common::{
    address_to_bytes32, bytes32_to_hex, compute_guid, MessagingFee, MessagingOptions,
    MessagingReceipt, ProtocolMessage,
};
use cosmwasm_std::{
    coins, to_json_binary, BankMsg, Binary, CosmosMsg, Deps, DepsMut, Env, Event, MessageInfo,
    Response, StdError, StdResult, Uint128,
};

use crate::error::ContractError;
use crate::peers;
use crate::state::{enforced_options, SentPacket, CONFIG, SENT, STATS};
use crate::transport::{MessageTransport, OutboundPacket};

/// A message encoded and priced for one destination.
pub struct PreparedMessage {
    pub encoded: Vec<u8>,
    pub options: MessagingOptions,
    pub fee: Uint128,
}

/// Encode `message` and quote it under the enforced options for its type
/// combined with the caller's `extra` options.
pub fn prepare_message(
    deps: Deps,
    transport: &dyn MessageTransport,
    dst_eid: u32,
    message: &ProtocolMessage,
    extra: &MessagingOptions,
) -> StdResult<PreparedMessage> {
    let encoded = message.encode()?;
    let options =
        enforced_options(deps.storage, dst_eid, message.message_type())?.combine(extra);
    let fee = transport.quote(deps, dst_eid, &encoded, &options)?;
    Ok(PreparedMessage {
        encoded,
        options,
        fee: fee.native_fee,
    })
}

/// Summed fee of a batch.
pub fn quote_batch(
    deps: Deps,
    transport: &dyn MessageTransport,
    messages: &[OutboundMessage],
) -> StdResult<MessagingFee> {
    let mut native_fee = Uint128::zero();
    for m in messages {
        let prepared = prepare_message(deps, transport, m.dst_eid, &m.message, &m.options)?;
        native_fee = native_fee.checked_add(prepared.fee)?;
    }
    Ok(MessagingFee { native_fee })
}

pub(crate) fn paid_amount(info: &MessageInfo, denom: &str) -> Uint128 {
    info.funds
        .iter()
        .filter(|c| c.denom == denom)
        .map(|c| c.amount)
        .sum()
}

/// Send a batch of protocol messages (launchpad only).
///
/// Peers of every destination are resolved first, then every message is
/// quoted; nothing reaches the transport unless the whole batch is paid for.
pub fn execute_send<T: MessageTransport>(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    messages: Vec<OutboundMessage>,
    refund_address: String,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if config.paused {
        return Err(ContractError::Paused);
    }
    let launchpad = config
        .launchpad
        .as_ref()
        .ok_or(ContractError::LaunchpadNotSet)?;
    if info.sender != *launchpad {
        return Err(ContractError::OnlyLaunchpad);
    }
    if messages.is_empty() {
        return Err(ContractError::EmptyBatch);
    }
    let refund = deps.api.addr_validate(&refund_address)?;
    let transport = T::connect(&config);

    let receivers = messages
        .iter()
        .map(|m| peers::send_target(deps.storage, m.dst_eid))
        .collect::<Result<Vec<_>, _>>()?;

    let prepared = messages
        .iter()
        .map(|m| prepare_message(deps.as_ref(), &transport, m.dst_eid, &m.message, &m.options))
        .collect::<StdResult<Vec<_>>>()?;

    let mut required = Uint128::zero();
    for p in &prepared {
        required = required.checked_add(p.fee).map_err(StdError::from)?;
    }
    let provided = paid_amount(&info, &config.native_denom);
    if provided < required {
        return Err(ContractError::InsufficientFee { required, provided });
    }

    let sender32 = address_to_bytes32(env.contract.address.as_str());
    let mut next_nonce: BTreeMap<u32, u64> = BTreeMap::new();
    let mut msgs: Vec<CosmosMsg> = Vec::with_capacity(messages.len() + 1);
    let mut events = Vec::with_capacity(messages.len());
    let mut receipts = Vec::with_capacity(messages.len());

    for ((outbound, receiver), p) in messages.into_iter().zip(receivers).zip(prepared) {
        let dst_eid = outbound.dst_eid;
        let nonce = match next_nonce.get(&dst_eid) {
            Some(n) => *n,
            None => {
                let last = transport.outbound_nonce(
                    deps.as_ref(),
                    &env.contract.address,
                    dst_eid,
                    &receiver,
                )?;
                last + 1
            }
        };
        next_nonce.insert(dst_eid, nonce + 1);

        let guid = compute_guid(nonce, config.eid, &sender32, dst_eid, &receiver);
        let msg_type = outbound.message.message_type();
        let sale = outbound.message.sale();
        SENT.save(
            deps.storage,
            guid.as_slice(),
            &SentPacket {
                dst_eid,
                nonce,
                msg_type,
                sale,
                fee: p.fee,
                height: env.block.height,
            },
        )?;

        msgs.push(transport.send(
            OutboundPacket {
                dst_eid,
                receiver,
                message: p.encoded,
                options: p.options,
            },
            p.fee,
            &refund,
        )?);

        events.push(
            Event::new("packet_sent")
                .add_attribute("guid", bytes32_to_hex(&guid))
                .add_attribute("dst_eid", dst_eid.to_string())
                .add_attribute("nonce", nonce.to_string())
                .add_attribute("msg_type", msg_type.as_str())
                .add_attribute("origin_eid", sale.origin_eid.to_string())
                .add_attribute("sale_index", sale.index.to_string())
                .add_attribute("fee", p.fee),
        );
        receipts.push(MessagingReceipt {
            guid: Binary::from(guid.to_vec()),
            nonce,
            fee: MessagingFee { native_fee: p.fee },
        });
    }

    let mut stats = STATS.may_load(deps.storage)?.unwrap_or_default();
    stats.packets_sent += receipts.len() as u64;
    stats.fees_paid += required;
    STATS.save(deps.storage, &stats)?;

    let excess = provided - required;
    if !excess.is_zero() {
        msgs.push(
            BankMsg::Send {
                to_address: refund.to_string(),
                amount: coins(excess.u128(), &config.native_denom),
            }
            .into(),
        );
    }

    let packet_count = receipts.len();
    Ok(Response::new()
        .add_messages(msgs)
        .add_events(events)
        .set_data(to_json_binary(&SendResponse { receipts })?)
        .add_attribute("method", "send")
        .add_attribute("packet_count", packet_count.to_string())
        .add_attribute("fee", required)
        .add_attribute("refund", excess))
}
