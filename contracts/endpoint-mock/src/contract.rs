use common::interface::{EidResponse, NonceResponse, OAppExecuteMsg};
use common::{address_to_bytes32, bytes32_from_binary, bytes32_to_hex, compute_guid};
use common::{MessagingFee, MessagingOptions, Origin};
use cosmwasm_std::{
    coins, entry_point, to_json_binary, BankMsg, Binary, CosmosMsg, Deps, DepsMut, Env,
    MessageInfo, Order, Reply, Response, StdError, StdResult, SubMsg, SubMsgResult, Uint128, WasmMsg,
};
use cw2::set_contract_version;

use crate::error::ContractError;
use crate::msg::{
    ConfigResponse, ExecuteMsg, InstantiateMsg, MigrateMsg, Packet, PendingPacketsResponse,
    QueryMsg,
};
use crate::state::{
    Config, Route, CONFIG, CONTRACT_NAME, CONTRACT_VERSION, DELIVERY_REPLY_ID, INBOX,
    KNOWN_ENDPOINTS, OUTBOUND_NONCES, PENDING_DELIVERY, ROUTES,
};

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let admin = deps.api.addr_validate(&msg.admin)?;
    let config = Config {
        admin,
        eid: msg.eid,
        native_denom: msg.native_denom,
        base_fee: msg.base_fee,
        per_byte_fee: msg.per_byte_fee,
        gas_price: msg.gas_price,
        auto_deliver: msg.auto_deliver,
    };
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("admin", config.admin)
        .add_attribute("eid", config.eid.to_string()))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::Send {
            dst_eid,
            receiver,
            message,
            options,
            refund_address,
        } => execute_send(
            deps,
            info,
            dst_eid,
            receiver,
            message,
            options,
            refund_address,
        ),
        ExecuteMsg::Receive { packet } => execute_receive(deps, info, packet),
        ExecuteMsg::Deliver { guid } => execute_deliver(deps, guid),
        ExecuteMsg::SetDestEndpoint { oapp, endpoint } => {
            execute_set_dest_endpoint(deps, info, oapp, endpoint)
        }
        ExecuteMsg::SetAutoDeliver { enabled } => execute_set_auto_deliver(deps, info, enabled),
        ExecuteMsg::SetFees {
            base_fee,
            per_byte_fee,
            gas_price,
        } => execute_set_fees(deps, info, base_fee, per_byte_fee, gas_price),
    }
}

fn compute_fee(
    config: &Config,
    message_len: usize,
    options: &MessagingOptions,
) -> StdResult<Uint128> {
    let bytes = Uint128::from(message_len as u128).checked_mul(config.per_byte_fee)?;
    let gas = Uint128::from(options.gas).checked_mul(config.gas_price)?;
    Ok(config
        .base_fee
        .checked_add(bytes)?
        .checked_add(gas)?
        .checked_add(options.value)?)
}

fn execute_send(
    deps: DepsMut,
    info: MessageInfo,
    dst_eid: u32,
    receiver: Binary,
    message: Binary,
    options: MessagingOptions,
    refund_address: String,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let receiver32 = bytes32_from_binary(&receiver)
        .map_err(|_| ContractError::InvalidReceiver { len: receiver.len() })?;

    let required = compute_fee(&config, message.len(), &options)?;
    let provided = info
        .funds
        .iter()
        .filter(|c| c.denom == config.native_denom)
        .map(|c| c.amount)
        .sum::<Uint128>();
    if provided < required {
        return Err(ContractError::InsufficientFee { required, provided });
    }

    let route = ROUTES
        .may_load(deps.storage, receiver32.as_slice())?
        .filter(|r| r.dst_eid == dst_eid)
        .ok_or_else(|| ContractError::UnknownRoute {
            dst_eid,
            receiver: bytes32_to_hex(&receiver32),
        })?;
    let refund_addr = deps.api.addr_validate(&refund_address)?;

    let nonce = OUTBOUND_NONCES
        .may_load(deps.storage, (&info.sender, dst_eid, receiver32.as_slice()))?
        .unwrap_or(0)
        + 1;
    OUTBOUND_NONCES.save(
        deps.storage,
        (&info.sender, dst_eid, receiver32.as_slice()),
        &nonce,
    )?;

    let sender32 = address_to_bytes32(info.sender.as_str());
    let guid = compute_guid(nonce, config.eid, &sender32, dst_eid, &receiver32);

    let packet = Packet {
        origin: Origin {
            src_eid: config.eid,
            sender: Binary::from(sender32.to_vec()),
            nonce,
        },
        receiver: deps.api.addr_validate(&route.oapp)?,
        guid: Binary::from(guid.to_vec()),
        message,
        value: options.value,
        delivered: false,
    };

    let funds = if options.value.is_zero() {
        vec![]
    } else {
        coins(options.value.u128(), &config.native_denom)
    };
    let mut msgs: Vec<CosmosMsg> = vec![WasmMsg::Execute {
        contract_addr: route.endpoint.to_string(),
        msg: to_json_binary(&ExecuteMsg::Receive { packet })?,
        funds,
    }
    .into()];

    let excess = provided - required;
    if !excess.is_zero() {
        msgs.push(
            BankMsg::Send {
                to_address: refund_addr.to_string(),
                amount: coins(excess.u128(), &config.native_denom),
            }
            .into(),
        );
    }

    Ok(Response::new()
        .add_messages(msgs)
        .add_attribute("action", "send")
        .add_attribute("src_eid", config.eid.to_string())
        .add_attribute("dst_eid", dst_eid.to_string())
        .add_attribute("nonce", nonce.to_string())
        .add_attribute("guid", bytes32_to_hex(&guid))
        .add_attribute("fee", required)
        .add_attribute("refund", excess))
}

fn execute_receive(
    deps: DepsMut,
    info: MessageInfo,
    packet: Packet,
) -> Result<Response, ContractError> {
    if !KNOWN_ENDPOINTS.has(deps.storage, &info.sender) {
        return Err(ContractError::UnknownEndpoint {
            endpoint: info.sender.to_string(),
        });
    }
    let config = CONFIG.load(deps.storage)?;
    let guid = packet.guid.to_vec();
    INBOX.save(deps.storage, guid.as_slice(), &packet)?;

    let res = Response::new()
        .add_attribute("action", "receive")
        .add_attribute("src_eid", packet.origin.src_eid.to_string())
        .add_attribute("nonce", packet.origin.nonce.to_string())
        .add_attribute("guid", hex_guid(&packet.guid));

    if !config.auto_deliver {
        return Ok(res.add_attribute("delivery", "queued"));
    }

    PENDING_DELIVERY.save(deps.storage, &guid)?;
    let msg = lz_receive_msg(&packet, &config.native_denom, true)?;
    Ok(res.add_submessage(SubMsg::reply_always(msg, DELIVERY_REPLY_ID)))
}

fn execute_deliver(deps: DepsMut, guid: Binary) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let mut packet = INBOX
        .may_load(deps.storage, guid.as_slice())?
        .ok_or_else(|| ContractError::PacketNotFound {
            guid: hex_guid(&guid),
        })?;

    // Value travels with the first successful delivery only.
    let msg = lz_receive_msg(&packet, &config.native_denom, !packet.delivered)?;
    let redelivery = packet.delivered;
    packet.delivered = true;
    INBOX.save(deps.storage, guid.as_slice(), &packet)?;

    Ok(Response::new()
        .add_message(msg)
        .add_attribute("action", "deliver")
        .add_attribute("guid", hex_guid(&guid))
        .add_attribute("redelivery", redelivery.to_string()))
}

fn execute_set_dest_endpoint(
    deps: DepsMut,
    info: MessageInfo,
    oapp: String,
    endpoint: String,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.admin {
        return Err(ContractError::Unauthorized);
    }

    let endpoint_addr = deps.api.addr_validate(&endpoint)?;
    let remote: EidResponse = deps
        .querier
        .query_wasm_smart(endpoint_addr.to_string(), &QueryMsg::Eid {})?;

    let receiver32 = address_to_bytes32(&oapp);
    ROUTES.save(
        deps.storage,
        receiver32.as_slice(),
        &Route {
            dst_eid: remote.eid,
            oapp: oapp.clone(),
            endpoint: endpoint_addr.clone(),
        },
    )?;
    KNOWN_ENDPOINTS.save(deps.storage, &endpoint_addr, &true)?;

    Ok(Response::new()
        .add_attribute("action", "set_dest_endpoint")
        .add_attribute("oapp", oapp)
        .add_attribute("endpoint", endpoint_addr)
        .add_attribute("dst_eid", remote.eid.to_string()))
}

fn execute_set_auto_deliver(
    deps: DepsMut,
    info: MessageInfo,
    enabled: bool,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    if info.sender != config.admin {
        return Err(ContractError::Unauthorized);
    }

    config.auto_deliver = enabled;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "set_auto_deliver")
        .add_attribute("enabled", enabled.to_string()))
}

fn execute_set_fees(
    deps: DepsMut,
    info: MessageInfo,
    base_fee: Uint128,
    per_byte_fee: Uint128,
    gas_price: Uint128,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    if info.sender != config.admin {
        return Err(ContractError::Unauthorized);
    }

    config.base_fee = base_fee;
    config.per_byte_fee = per_byte_fee;
    config.gas_price = gas_price;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "set_fees")
        .add_attribute("base_fee", base_fee)
        .add_attribute("per_byte_fee", per_byte_fee)
        .add_attribute("gas_price", gas_price))
}

fn lz_receive_msg(packet: &Packet, denom: &str, with_value: bool) -> StdResult<CosmosMsg> {
    let funds = if with_value && !packet.value.is_zero() {
        coins(packet.value.u128(), denom)
    } else {
        vec![]
    };
    Ok(WasmMsg::Execute {
        contract_addr: packet.receiver.to_string(),
        msg: to_json_binary(&OAppExecuteMsg::LzReceive {
            origin: packet.origin.clone(),
            guid: packet.guid.clone(),
            message: packet.message.clone(),
        })?,
        funds,
    }
    .into())
}

fn hex_guid(guid: &Binary) -> String {
    format!("0x{}", hex::encode(guid.as_slice()))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn reply(deps: DepsMut, _env: Env, msg: Reply) -> Result<Response, ContractError> {
    if msg.id != DELIVERY_REPLY_ID {
        return Ok(Response::new());
    }
    let guid = PENDING_DELIVERY.load(deps.storage)?;
    PENDING_DELIVERY.remove(deps.storage);

    match msg.result {
        SubMsgResult::Ok(_) => {
            INBOX.update(deps.storage, guid.as_slice(), |packet| -> StdResult<_> {
                let mut packet = packet.ok_or_else(|| StdError::not_found("packet"))?;
                packet.delivered = true;
                Ok(packet)
            })?;
            Ok(Response::new()
                .add_attribute("action", "delivery_result")
                .add_attribute("delivery", "delivered"))
        }
        // Left in the inbox for a later `Deliver`.
        SubMsgResult::Err(err) => Ok(Response::new()
            .add_attribute("action", "delivery_result")
            .add_attribute("delivery", "failed")
            .add_attribute("error", err)),
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Quote {
            dst_eid: _,
            message,
            options,
        } => to_json_binary(&query_quote(deps, message, options)?),
        QueryMsg::OutboundNonce {
            sender,
            dst_eid,
            receiver,
        } => to_json_binary(&query_outbound_nonce(deps, sender, dst_eid, receiver)?),
        QueryMsg::Eid {} => to_json_binary(&EidResponse {
            eid: CONFIG.load(deps.storage)?.eid,
        }),
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::Packet { guid } => to_json_binary(&INBOX.load(deps.storage, guid.as_slice())?),
        QueryMsg::PendingPackets {} => to_json_binary(&query_pending_packets(deps)?),
    }
}

fn query_quote(deps: Deps, message: Binary, options: MessagingOptions) -> StdResult<MessagingFee> {
    let config = CONFIG.load(deps.storage)?;
    Ok(MessagingFee {
        native_fee: compute_fee(&config, message.len(), &options)?,
    })
}

fn query_outbound_nonce(
    deps: Deps,
    sender: String,
    dst_eid: u32,
    receiver: Binary,
) -> StdResult<NonceResponse> {
    let sender = deps.api.addr_validate(&sender)?;
    let receiver32 = bytes32_from_binary(&receiver)?;
    let nonce = OUTBOUND_NONCES
        .may_load(deps.storage, (&sender, dst_eid, receiver32.as_slice()))?
        .unwrap_or(0);
    Ok(NonceResponse { nonce })
}

fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        admin: config.admin,
        eid: config.eid,
        native_denom: config.native_denom,
        base_fee: config.base_fee,
        per_byte_fee: config.per_byte_fee,
        gas_price: config.gas_price,
        auto_deliver: config.auto_deliver,
    })
}

fn query_pending_packets(deps: Deps) -> StdResult<PendingPacketsResponse> {
    let guids = INBOX
        .range(deps.storage, None, None, Order::Ascending)
        .filter_map(|item| match item {
            Ok((_, packet)) if !packet.delivered => Some(Ok(packet.guid)),
            Ok(_) => None,
            Err(e) => Some(Err(e)),
        })
        .collect::<StdResult<Vec<_>>>()?;
    Ok(PendingPacketsResponse { guids })
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    Ok(Response::new().add_attribute("action", "migrate"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosmwasm_std::testing::{mock_dependencies, mock_env, mock_info};
    use cosmwasm_std::{coins, from_json};

    fn setup(deps: DepsMut) {
        instantiate(
            deps,
            mock_env(),
            mock_info("admin", &[]),
            InstantiateMsg {
                admin: "admin".to_string(),
                eid: 1,
                native_denom: "uluna".to_string(),
                base_fee: Uint128::new(1_000),
                per_byte_fee: Uint128::new(10),
                gas_price: Uint128::new(1),
                auto_deliver: true,
            },
        )
        .unwrap();
    }

    #[test]
    fn test_quote_sums_all_components() {
        let mut deps = mock_dependencies();
        setup(deps.as_mut());

        let res = query(
            deps.as_ref(),
            mock_env(),
            QueryMsg::Quote {
                dst_eid: 2,
                message: Binary::from(vec![0u8; 13]),
                options: MessagingOptions::new(100_000, 5),
            },
        )
        .unwrap();
        let fee: MessagingFee = from_json(res).unwrap();
        assert_eq!(fee.native_fee, Uint128::new(1_000 + 130 + 100_000 + 5));
    }

    #[test]
    fn test_send_rejects_underpayment() {
        let mut deps = mock_dependencies();
        setup(deps.as_mut());

        let err = execute(
            deps.as_mut(),
            mock_env(),
            mock_info("messenger", &coins(1_000, "uluna")),
            ExecuteMsg::Send {
                dst_eid: 2,
                receiver: Binary::from(vec![1u8; 32]),
                message: Binary::from(vec![3u8; 13]),
                options: MessagingOptions::new(100_000, 0),
                refund_address: "messenger".to_string(),
            },
        )
        .unwrap_err();
        assert_eq!(
            err,
            ContractError::InsufficientFee {
                required: Uint128::new(101_130),
                provided: Uint128::new(1_000),
            }
        );
    }

    #[test]
    fn test_send_without_route_fails() {
        let mut deps = mock_dependencies();
        setup(deps.as_mut());

        let err = execute(
            deps.as_mut(),
            mock_env(),
            mock_info("messenger", &coins(1_000_000, "uluna")),
            ExecuteMsg::Send {
                dst_eid: 2,
                receiver: Binary::from(vec![1u8; 32]),
                message: Binary::from(vec![3u8; 13]),
                options: MessagingOptions::default(),
                refund_address: "messenger".to_string(),
            },
        )
        .unwrap_err();
        assert!(matches!(err, ContractError::UnknownRoute { dst_eid: 2, .. }));
    }

    #[test]
    fn test_receive_requires_known_endpoint() {
        let mut deps = mock_dependencies();
        setup(deps.as_mut());

        let packet = Packet {
            origin: Origin {
                src_eid: 2,
                sender: Binary::from(vec![2u8; 32]),
                nonce: 1,
            },
            receiver: cosmwasm_std::Addr::unchecked("messenger"),
            guid: Binary::from(vec![9u8; 32]),
            message: Binary::from(vec![3u8; 13]),
            value: Uint128::zero(),
            delivered: false,
        };
        let err = execute(
            deps.as_mut(),
            mock_env(),
            mock_info("stranger", &[]),
            ExecuteMsg::Receive { packet },
        )
        .unwrap_err();
        assert_eq!(
            err,
            ContractError::UnknownEndpoint {
                endpoint: "stranger".to_string()
            }
        );
    }
}
