//! Sale creation handlers.
//!
//! A sale's cw20 is instantiated through a submessage whose reply id is the
//! sale index; the reply records the token address.

use common::MessagingOptions;
use cosmwasm_std::{
    coins, to_json_binary, Addr, Api, BankMsg, DepsMut, Env, Event, MessageInfo, Reply,
    Response, StdError, Storage, SubMsg, Uint128, WasmMsg,
};
use cw20::{Cw20Coin, MinterResponse};

use crate::curve::CurveConfig;
use crate::error::ContractError;
use crate::msg::TokenInstantiateMsg;
use crate::outbound::{
    create_token_message, dispatch, fan_out, messenger, paid_amount, peer_chains,
};
use crate::state::{
    Config, Sale, SaleOrigin, TradeTotals, CONFIG, CURVE, SALES, SALE_BY_TOKEN, SALE_COUNT,
    TOTALS,
};

// ============================================================================
// Validation
// ============================================================================

/// cw20-base name rules: 3 to 50 bytes.
pub fn validate_name(name: &str) -> Result<(), ContractError> {
    if name.len() < 3 || name.len() > 50 {
        return Err(ContractError::InvalidName {
            reason: "must be 3 to 50 bytes".to_string(),
        });
    }
    Ok(())
}

/// cw20-base symbol rules: 3 to 12 of `[a-zA-Z-]`.
pub fn validate_symbol(symbol: &str) -> Result<(), ContractError> {
    if symbol.len() < 3 || symbol.len() > 12 {
        return Err(ContractError::InvalidSymbol {
            reason: "must be 3 to 12 characters".to_string(),
        });
    }
    if !symbol.bytes().all(|b| b.is_ascii_alphabetic() || b == b'-') {
        return Err(ContractError::InvalidSymbol {
            reason: "only letters and '-' allowed".to_string(),
        });
    }
    Ok(())
}

/// Creator recorded on a new sale.
pub fn resolve_creator(
    api: &dyn Api,
    sender: &Addr,
    creator_override: Option<String>,
) -> Result<String, ContractError> {
    match creator_override {
        Some(creator) => Ok(api.addr_validate(&creator)?.to_string()),
        None => Ok(sender.to_string()),
    }
}

/// Instantiate submessage for the cw20 of the sale at `index`.
///
/// Local sales mint the whole supply to the launchpad. Mirrors start empty
/// with the launchpad as minter.
pub fn token_instantiate_msg(
    env: &Env,
    config: &Config,
    curve: &CurveConfig,
    sale: &Sale,
    index: u64,
) -> Result<SubMsg, ContractError> {
    let launchpad = env.contract.address.to_string();
    let (initial_balances, mint) = if sale.is_mirror() {
        (
            vec![],
            Some(MinterResponse {
                minter: launchpad.clone(),
                cap: Some(curve.total_supply),
            }),
        )
    } else {
        (
            vec![Cw20Coin {
                address: launchpad.clone(),
                amount: curve.total_supply,
            }],
            None,
        )
    };

    let msg = WasmMsg::Instantiate {
        admin: Some(launchpad),
        code_id: config.token_code_id,
        msg: to_json_binary(&TokenInstantiateMsg {
            name: sale.name.clone(),
            symbol: sale.symbol.clone(),
            decimals: curve.decimals,
            initial_balances,
            mint,
        })?,
        funds: vec![],
        label: format!("launchpad sale {} {}", index, sale.symbol),
    };
    Ok(SubMsg::reply_on_success(msg, index))
}

/// Register a sale at the next index.
pub fn register_sale(storage: &mut dyn Storage, sale: &Sale) -> Result<u64, ContractError> {
    let index = SALE_COUNT.load(storage)?;
    SALE_COUNT.save(storage, &(index + 1))?;
    SALES.save(storage, index, sale)?;
    TOTALS.save(storage, index, &TradeTotals::default())?;
    Ok(index)
}

/// Load a sale that must originate on this chain.
pub fn load_local_sale(
    storage: &dyn Storage,
    config: &Config,
    sale_index: u64,
) -> Result<Sale, ContractError> {
    let sale = SALES
        .may_load(storage, sale_index)?
        .ok_or(ContractError::UnknownSale {
            origin_eid: config.eid,
            index: sale_index,
        })?;
    if sale.is_mirror() {
        return Err(ContractError::NotLocalSale { sale_index });
    }
    Ok(sale)
}

// ============================================================================
// Create
// ============================================================================

/// Launch a token and broadcast CREATE_TOKEN to every enabled peer chain.
#[allow(clippy::too_many_arguments)]
pub fn execute_create(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    name: String,
    symbol: String,
    metadata_uri: String,
    creator_override: Option<String>,
    options: Option<MessagingOptions>,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if config.paused {
        return Err(ContractError::Paused);
    }

    validate_name(&name)?;
    validate_symbol(&symbol)?;

    let paid = paid_amount(&info, &config.native_denom);
    if paid < config.creation_fee {
        return Err(ContractError::InsufficientFee {
            required: config.creation_fee,
            provided: paid,
        });
    }

    let creator = resolve_creator(deps.api, &info.sender, creator_override)?;
    let sale = Sale {
        token: None,
        name,
        symbol,
        metadata_uri,
        creator,
        sold: Uint128::zero(),
        raised: Uint128::zero(),
        is_open: true,
        is_liquidity_created: false,
        origin: SaleOrigin::Local,
        created_at: env.block.height,
    };
    let index = register_sale(deps.storage, &sale)?;
    let sale_ref = sale.sale_ref(config.eid, index);

    let curve = CURVE.load(deps.storage)?;
    let instantiate = token_instantiate_msg(&env, &config, &curve, &sale, index)?;

    let peers = peer_chains(deps.as_ref(), &config)?;
    let messages = fan_out(&peers, &create_token_message(&sale, sale_ref), options);
    let sent = dispatch(
        deps.as_ref(),
        &config,
        messages,
        paid - config.creation_fee,
        &info.sender,
    )?;

    let mut response = Response::new().add_submessage(instantiate);
    if !config.creation_fee.is_zero() {
        response = response.add_message(BankMsg::Send {
            to_address: config.fee_recipient.to_string(),
            amount: coins(config.creation_fee.u128(), &config.native_denom),
        });
    }

    let event = Event::new("sale_created")
        .add_attribute("sale_index", index.to_string())
        .add_attribute("origin_eid", config.eid.to_string())
        .add_attribute("name", &sale.name)
        .add_attribute("symbol", &sale.symbol)
        .add_attribute("creator", &sale.creator)
        .add_attribute(
            "peer_chains",
            peers
                .iter()
                .map(|eid| eid.to_string())
                .collect::<Vec<_>>()
                .join(","),
        );

    Ok(response
        .add_messages(sent.msgs)
        .add_event(event)
        .add_attribute("method", "create")
        .add_attribute("sale_index", index.to_string())
        .add_attribute("creator", sale.creator)
        .add_attribute("creation_fee", config.creation_fee)
        .add_attribute("messaging_fee", sent.fee)
        .add_attribute("refund", sent.refund))
}

// ============================================================================
// Launch to a single chain
// ============================================================================

/// Re-send CREATE_TOKEN of a local sale to `dst_eid` (creator or admin).
pub fn execute_send_launch_to_remote_chain(
    deps: DepsMut,
    info: MessageInfo,
    sale_index: u64,
    dst_eid: u32,
    options: Option<MessagingOptions>,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if config.paused {
        return Err(ContractError::Paused);
    }
    messenger(&config)?;

    let sale = load_local_sale(deps.storage, &config, sale_index)?;
    if info.sender.as_str() != sale.creator && info.sender != config.admin {
        return Err(ContractError::Unauthorized);
    }

    let message = create_token_message(&sale, sale.sale_ref(config.eid, sale_index));
    let sent = dispatch(
        deps.as_ref(),
        &config,
        fan_out(&[dst_eid], &message, options),
        paid_amount(&info, &config.native_denom),
        &info.sender,
    )?;

    Ok(Response::new()
        .add_messages(sent.msgs)
        .add_attribute("method", "send_launch_to_remote_chain")
        .add_attribute("sale_index", sale_index.to_string())
        .add_attribute("dst_eid", dst_eid.to_string())
        .add_attribute("messaging_fee", sent.fee))
}

// ============================================================================
// Token instantiation reply
// ============================================================================

/// Record the cw20 address of the sale whose index is the reply id.
pub fn handle_token_instantiated(deps: DepsMut, reply: Reply) -> Result<Response, ContractError> {
    let sale_index = reply.id;
    let res = reply.result.into_result().map_err(StdError::generic_err)?;

    let token = res
        .events
        .iter()
        .filter(|event| event.ty == "instantiate")
        .flat_map(|event| event.attributes.iter())
        .find(|attr| attr.key == "_contract_address")
        .map(|attr| attr.value.clone())
        .ok_or_else(|| StdError::generic_err("Token address missing from instantiate reply"))?;
    let token = deps.api.addr_validate(&token)?;

    let mut sale = SALES.load(deps.storage, sale_index)?;
    sale.token = Some(token.clone());
    SALES.save(deps.storage, sale_index, &sale)?;
    SALE_BY_TOKEN.save(deps.storage, &token, &sale_index)?;

    Ok(Response::new()
        .add_attribute("method", "token_instantiated")
        .add_attribute("sale_index", sale_index.to_string())
        .add_attribute("token", token))
}
