//! Origin-side synchronisation of sale state to mirroring chains.

use common::interface::OutboundMessage;
use common::{MessagingOptions, ProtocolMessage, TradeDirection};
use cosmwasm_std::{DepsMut, MessageInfo, Response, Storage};

use crate::error::ContractError;
use crate::execute::load_local_sale;
use crate::outbound::{dispatch, fan_out, messenger, paid_amount};
use crate::state::{Config, TradeTotals, CONFIG, SYNCED, TOTALS};

/// BRIDGE_TOKENS messages carrying the gross growth of a local sale's
/// totals since its last sync to `dst_eid`, with the totals they bring
/// the destination up to.
pub fn sync_messages(
    storage: &dyn Storage,
    config: &Config,
    sale_index: u64,
    dst_eid: u32,
    options: Option<MessagingOptions>,
) -> Result<(Vec<OutboundMessage>, TradeTotals), ContractError> {
    let sale = load_local_sale(storage, config, sale_index)?;
    let sale_ref = sale.sale_ref(config.eid, sale_index);
    let totals = TOTALS.load(storage, sale_index)?;
    let synced = SYNCED
        .may_load(storage, (sale_index, dst_eid))?
        .unwrap_or_default();

    let (bought, funds_in, sold, funds_out) = totals.delta_since(&synced);
    let mut messages = vec![];
    if !bought.is_zero() || !funds_in.is_zero() {
        messages.push(ProtocolMessage::BridgeTokens {
            sale: sale_ref,
            direction: TradeDirection::Buy,
            amount: bought,
            funds: funds_in,
        });
    }
    if !sold.is_zero() || !funds_out.is_zero() {
        messages.push(ProtocolMessage::BridgeTokens {
            sale: sale_ref,
            direction: TradeDirection::Sell,
            amount: sold,
            funds: funds_out,
        });
    }
    if messages.is_empty() {
        return Err(ContractError::NothingToSync {
            sale_index,
            dst_eid,
        });
    }

    let outbound = messages
        .iter()
        .flat_map(|message| fan_out(&[dst_eid], message, options))
        .collect();
    Ok((outbound, totals))
}

/// LIQUIDITY_CREATED of a graduated local sale to `dst_eids`.
pub fn liquidity_notices(
    storage: &dyn Storage,
    config: &Config,
    sale_index: u64,
    dst_eids: &[u32],
    options: Option<MessagingOptions>,
) -> Result<Vec<OutboundMessage>, ContractError> {
    let sale = load_local_sale(storage, config, sale_index)?;
    if !sale.is_liquidity_created {
        return Err(ContractError::NotGraduated { sale_index });
    }
    let notice = ProtocolMessage::LiquidityCreated {
        sale: sale.sale_ref(config.eid, sale_index),
    };
    Ok(fan_out(dst_eids, &notice, options))
}

/// Send trade deltas since the last sync to `dst_eid`. Permissionless.
pub fn execute_sync_sale(
    deps: DepsMut,
    info: MessageInfo,
    sale_index: u64,
    dst_eid: u32,
    options: Option<MessagingOptions>,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    messenger(&config)?;

    let (messages, totals) = sync_messages(deps.storage, &config, sale_index, dst_eid, options)?;
    let count = messages.len();
    SYNCED.save(deps.storage, (sale_index, dst_eid), &totals)?;

    let sent = dispatch(
        deps.as_ref(),
        &config,
        messages,
        paid_amount(&info, &config.native_denom),
        &info.sender,
    )?;

    Ok(Response::new()
        .add_messages(sent.msgs)
        .add_attribute("method", "sync_sale")
        .add_attribute("sale_index", sale_index.to_string())
        .add_attribute("dst_eid", dst_eid.to_string())
        .add_attribute("messages", count.to_string())
        .add_attribute("tokens_bought", totals.tokens_bought)
        .add_attribute("tokens_sold", totals.tokens_sold)
        .add_attribute("messaging_fee", sent.fee))
}

/// Re-send LIQUIDITY_CREATED to one chain. Permissionless; the remote side
/// ignores repeats.
pub fn execute_notify_liquidity_created(
    deps: DepsMut,
    info: MessageInfo,
    sale_index: u64,
    dst_eid: u32,
    options: Option<MessagingOptions>,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    messenger(&config)?;

    let messages = liquidity_notices(deps.storage, &config, sale_index, &[dst_eid], options)?;
    let sent = dispatch(
        deps.as_ref(),
        &config,
        messages,
        paid_amount(&info, &config.native_denom),
        &info.sender,
    )?;

    Ok(Response::new()
        .add_messages(sent.msgs)
        .add_attribute("method", "notify_liquidity_created")
        .add_attribute("sale_index", sale_index.to_string())
        .add_attribute("dst_eid", dst_eid.to_string())
        .add_attribute("messaging_fee", sent.fee))
}
