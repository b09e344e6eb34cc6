//! Application of authenticated remote messages (messenger only).
//!
//! The messenger has already checked the peer and deduplicated the GUID.
//! Handlers here are still idempotent on their own keys, since the same
//! sale event may arrive under different GUIDs (a re-sent launch, a
//! repeated liquidity notice).

use common::{ProtocolMessage, SaleRef, TradeDirection};
use cosmwasm_std::{Binary, DepsMut, Env, MessageInfo, Response, Storage, Uint128};

use crate::error::ContractError;
use crate::execute::{register_sale, token_instantiate_msg};
use crate::state::{Config, Sale, SaleOrigin, CONFIG, CURVE, MIRRORS, SALES, TOTALS};

pub fn execute_apply_remote(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    src_eid: u32,
    guid: Binary,
    message: ProtocolMessage,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if config.messenger.as_ref() != Some(&info.sender) {
        return Err(ContractError::OnlyMessenger);
    }

    let sale_ref = message.sale();
    if sale_ref.origin_eid == config.eid {
        return Err(ContractError::NotMirror {
            sale_index: sale_ref.index,
        });
    }
    // Sale events only ever flow from the chain that owns the sale
    if sale_ref.origin_eid != src_eid {
        return Err(ContractError::OriginMismatch {
            src_eid,
            origin_eid: sale_ref.origin_eid,
        });
    }

    let response = Response::new()
        .add_attribute("method", "apply_remote")
        .add_attribute("msg_type", message.message_type().as_str())
        .add_attribute("src_eid", src_eid.to_string())
        .add_attribute("origin_index", sale_ref.index.to_string())
        .add_attribute("guid", hex::encode(guid.as_slice()));

    match message {
        ProtocolMessage::CreateToken {
            name,
            symbol,
            metadata_uri,
            creator,
            ..
        } => apply_create_token(
            deps,
            env,
            &config,
            sale_ref,
            name,
            symbol,
            metadata_uri,
            creator,
            response,
        ),
        ProtocolMessage::BridgeTokens {
            direction,
            amount,
            funds,
            ..
        } => apply_bridge_tokens(deps, sale_ref, direction, amount, funds, response),
        ProtocolMessage::LiquidityCreated { .. } => {
            apply_liquidity_created(deps, sale_ref, response)
        }
    }
}

fn resolve_mirror(storage: &dyn Storage, sale_ref: SaleRef) -> Result<(u64, Sale), ContractError> {
    let index = MIRRORS
        .may_load(storage, (sale_ref.origin_eid, sale_ref.index))?
        .ok_or(ContractError::UnknownSale {
            origin_eid: sale_ref.origin_eid,
            index: sale_ref.index,
        })?;
    Ok((index, SALES.load(storage, index)?))
}

#[allow(clippy::too_many_arguments)]
fn apply_create_token(
    deps: DepsMut,
    env: Env,
    config: &Config,
    sale_ref: SaleRef,
    name: String,
    symbol: String,
    metadata_uri: String,
    creator: String,
    response: Response,
) -> Result<Response, ContractError> {
    let key = (sale_ref.origin_eid, sale_ref.index);
    if let Some(existing) = MIRRORS.may_load(deps.storage, key)? {
        return Ok(response
            .add_attribute("status", "duplicate")
            .add_attribute("sale_index", existing.to_string()));
    }

    let sale = Sale {
        token: None,
        name,
        symbol,
        metadata_uri,
        creator,
        sold: Uint128::zero(),
        raised: Uint128::zero(),
        is_open: false,
        is_liquidity_created: false,
        origin: SaleOrigin::Remote {
            eid: sale_ref.origin_eid,
            index: sale_ref.index,
        },
        created_at: env.block.height,
    };
    let index = register_sale(deps.storage, &sale)?;
    MIRRORS.save(deps.storage, key, &index)?;

    let curve = CURVE.load(deps.storage)?;
    let instantiate = token_instantiate_msg(&env, config, &curve, &sale, index)?;

    Ok(response
        .add_submessage(instantiate)
        .add_attribute("status", "applied")
        .add_attribute("sale_index", index.to_string())
        .add_attribute("creator", sale.creator))
}

fn apply_bridge_tokens(
    deps: DepsMut,
    sale_ref: SaleRef,
    direction: TradeDirection,
    amount: Uint128,
    funds: Uint128,
    response: Response,
) -> Result<Response, ContractError> {
    let (index, mut sale) = resolve_mirror(deps.storage, sale_ref)?;

    let mut totals = TOTALS.load(deps.storage, index)?;
    totals.record(direction, amount, funds)?;
    TOTALS.save(deps.storage, index, &totals)?;

    sale.sold = totals.sold();
    sale.raised = totals.raised();
    SALES.save(deps.storage, index, &sale)?;

    Ok(response
        .add_attribute("status", "applied")
        .add_attribute("sale_index", index.to_string())
        .add_attribute("direction", direction.as_str())
        .add_attribute("sold", sale.sold)
        .add_attribute("raised", sale.raised))
}

fn apply_liquidity_created(
    deps: DepsMut,
    sale_ref: SaleRef,
    response: Response,
) -> Result<Response, ContractError> {
    let (index, mut sale) = resolve_mirror(deps.storage, sale_ref)?;
    if sale.is_liquidity_created {
        return Ok(response
            .add_attribute("status", "duplicate")
            .add_attribute("sale_index", index.to_string()));
    }

    sale.is_liquidity_created = true;
    sale.is_open = false;
    SALES.save(deps.storage, index, &sale)?;

    Ok(response
        .add_attribute("status", "applied")
        .add_attribute("sale_index", index.to_string()))
}
