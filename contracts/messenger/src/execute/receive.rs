//! Inbound delivery.

use common::interface::LaunchpadHookMsg;
use common::{
    address_to_bytes32, bytes32_from_binary, compute_guid, Origin, ProtocolMessage,
    MAX_MESSAGE_SIZE,
};
use cosmwasm_std::{
    to_json_binary, Binary, DepsMut, Env, Event, MessageInfo, Response, SubMsg, WasmMsg,
};

use crate::error::ContractError;
use crate::execute::send::paid_amount;
use crate::peers;
use crate::state::{inbound_budget, AppliedPacket, APPLIED, CONFIG, STATS};
use crate::transport::MessageTransport;

/// Deliver an inbound packet (endpoint only).
///
/// Order of checks: caller, origin sender, GUID, replay, payload, budget.
/// A replayed GUID succeeds with `status=duplicate` and changes nothing. A
/// failing launchpad application reverts the whole delivery, so the GUID stays
/// unapplied and the packet can be delivered again.
pub fn execute_lz_receive<T: MessageTransport>(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    origin: Origin,
    guid: Binary,
    message: Binary,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if !T::connect(&config).is_endpoint(&info.sender) {
        return Err(ContractError::OnlyEndpoint);
    }

    if !peers::is_trusted_sender(deps.storage, origin.src_eid, origin.sender.as_slice())? {
        return Err(ContractError::UntrustedSender {
            src_eid: origin.src_eid,
            sender: format!("0x{}", hex::encode(origin.sender.as_slice())),
        });
    }

    let guid32 = bytes32_from_binary(&guid).map_err(|_| ContractError::InvalidMessage {
        reason: format!("guid must be 32 bytes, got {}", guid.len()),
    })?;
    let sender32 = bytes32_from_binary(&origin.sender)?;
    let receiver32 = address_to_bytes32(env.contract.address.as_str());
    let expected = compute_guid(origin.nonce, origin.src_eid, &sender32, config.eid, &receiver32);
    if expected != guid32 {
        return Err(ContractError::GuidMismatch);
    }

    if APPLIED.has(deps.storage, guid32.as_slice()) {
        return Ok(Response::new()
            .add_attribute("method", "lz_receive")
            .add_attribute("src_eid", origin.src_eid.to_string())
            .add_attribute("nonce", origin.nonce.to_string())
            .add_attribute("status", "duplicate"));
    }

    if message.len() > MAX_MESSAGE_SIZE {
        return Err(ContractError::InvalidMessage {
            reason: format!(
                "{} bytes exceeds maximum of {}",
                message.len(),
                MAX_MESSAGE_SIZE
            ),
        });
    }
    let decoded =
        ProtocolMessage::decode(message.as_slice()).map_err(|e| ContractError::InvalidMessage {
            reason: e.to_string(),
        })?;
    let msg_type = decoded.message_type();
    let sale = decoded.sale();

    let budget = inbound_budget(deps.storage, origin.src_eid, msg_type)?;
    let value = paid_amount(&info, &config.native_denom);
    if value > budget.value {
        return Err(ContractError::BudgetExceeded {
            msg_type: msg_type.as_str().to_string(),
            value,
            budget: budget.value,
        });
    }

    let launchpad = config.launchpad.ok_or(ContractError::LaunchpadNotSet)?;

    APPLIED.save(
        deps.storage,
        guid32.as_slice(),
        &AppliedPacket {
            src_eid: origin.src_eid,
            nonce: origin.nonce,
            msg_type,
            sale,
            height: env.block.height,
        },
    )?;
    let mut stats = STATS.may_load(deps.storage)?.unwrap_or_default();
    stats.packets_applied += 1;
    STATS.save(deps.storage, &stats)?;

    let apply = SubMsg::new(WasmMsg::Execute {
        contract_addr: launchpad.to_string(),
        msg: to_json_binary(&LaunchpadHookMsg::ApplyRemote {
            src_eid: origin.src_eid,
            guid: guid.clone(),
            message: decoded,
        })?,
        funds: vec![],
    })
    .with_gas_limit(budget.gas);

    Ok(Response::new()
        .add_submessage(apply)
        .add_event(
            Event::new("packet_received")
                .add_attribute("guid", format!("0x{}", hex::encode(guid32)))
                .add_attribute("src_eid", origin.src_eid.to_string())
                .add_attribute("nonce", origin.nonce.to_string())
                .add_attribute("msg_type", msg_type.as_str())
                .add_attribute("origin_eid", sale.origin_eid.to_string())
                .add_attribute("sale_index", sale.index.to_string()),
        )
        .add_attribute("method", "lz_receive")
        .add_attribute("status", "applied"))
}
