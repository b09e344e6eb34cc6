//! Query handlers for the launchpad.

use common::{MessagingFee, MessagingOptions, ProtocolMessage};
use cosmwasm_std::{Addr, Deps, Order, StdError, StdResult, Uint128};
use cw_storage_plus::Bound;

use crate::curve::{buy_cost, sell_proceeds, spot_price, tokens_for_funds, CurveConfig};
use crate::error::ContractError;
use crate::execute::{load_local_sale, resolve_creator, sync_messages};
use crate::msg::{
    ConfigResponse, PendingAdminResponse, QuoteResponse, SaleResponse, SalesResponse,
    SimulateBuyResponse, SimulateSellResponse, TotalSalesResponse, TradeTotalsResponse,
};
use crate::outbound::{create_token_message, fan_out, peer_chains, quote};
use crate::state::{
    Config, Sale, SaleOrigin, CONFIG, CURVE, MIRRORS, PENDING_ADMIN, SALES, SALE_BY_TOKEN,
    SALE_COUNT, SYNCED, TOTALS,
};

const DEFAULT_LIMIT: u32 = 10;
const MAX_LIMIT: u32 = 50;

fn to_std(err: ContractError) -> StdError {
    match err {
        ContractError::Std(err) => err,
        other => StdError::generic_err(other.to_string()),
    }
}

fn sale_response(config: &Config, index: u64, sale: Sale) -> SaleResponse {
    let sale_ref = sale.sale_ref(config.eid, index);
    SaleResponse {
        index,
        is_mirror: matches!(sale.origin, SaleOrigin::Remote { .. }),
        origin_eid: sale_ref.origin_eid,
        origin_index: sale_ref.index,
        token: sale.token,
        name: sale.name,
        symbol: sale.symbol,
        metadata_uri: sale.metadata_uri,
        creator: sale.creator,
        sold: sale.sold,
        raised: sale.raised,
        is_open: sale.is_open,
        is_liquidity_created: sale.is_liquidity_created,
        created_at: sale.created_at,
    }
}

fn load_sale(deps: Deps, config: &Config, sale_index: u64) -> StdResult<Sale> {
    SALES.may_load(deps.storage, sale_index)?.ok_or_else(|| {
        to_std(ContractError::UnknownSale {
            origin_eid: config.eid,
            index: sale_index,
        })
    })
}

// ============================================================================
// Core Queries
// ============================================================================

pub fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        admin: config.admin,
        paused: config.paused,
        eid: config.eid,
        native_denom: config.native_denom,
        token_code_id: config.token_code_id,
        creation_fee: config.creation_fee,
        fee_recipient: config.fee_recipient,
        messenger: config.messenger,
        liquidity_pool: config.liquidity_pool,
    })
}

pub fn query_curve(deps: Deps) -> StdResult<CurveConfig> {
    CURVE.load(deps.storage)
}

pub fn query_pending_admin(deps: Deps) -> StdResult<Option<PendingAdminResponse>> {
    let pending = PENDING_ADMIN.may_load(deps.storage)?;
    Ok(pending.map(|p| PendingAdminResponse {
        new_address: p.new_address,
        execute_after: p.execute_after,
    }))
}

// ============================================================================
// Sale Queries
// ============================================================================

pub fn query_sale(deps: Deps, sale_index: u64) -> StdResult<SaleResponse> {
    let config = CONFIG.load(deps.storage)?;
    let sale = load_sale(deps, &config, sale_index)?;
    Ok(sale_response(&config, sale_index, sale))
}

pub fn query_sales(
    deps: Deps,
    start_after: Option<u64>,
    limit: Option<u32>,
) -> StdResult<SalesResponse> {
    let config = CONFIG.load(deps.storage)?;
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start = start_after.map(Bound::exclusive);

    let sales = SALES
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| item.map(|(index, sale)| sale_response(&config, index, sale)))
        .collect::<StdResult<Vec<_>>>()?;

    Ok(SalesResponse { sales })
}

pub fn query_total_sales(deps: Deps) -> StdResult<TotalSalesResponse> {
    Ok(TotalSalesResponse {
        count: SALE_COUNT.may_load(deps.storage)?.unwrap_or_default(),
    })
}

pub fn query_sale_by_token(deps: Deps, token: String) -> StdResult<Option<SaleResponse>> {
    let config = CONFIG.load(deps.storage)?;
    let token = Addr::unchecked(token);
    match SALE_BY_TOKEN.may_load(deps.storage, &token)? {
        Some(index) => {
            let sale = SALES.load(deps.storage, index)?;
            Ok(Some(sale_response(&config, index, sale)))
        }
        None => Ok(None),
    }
}

pub fn query_mirror_of(
    deps: Deps,
    origin_eid: u32,
    index: u64,
) -> StdResult<Option<SaleResponse>> {
    let config = CONFIG.load(deps.storage)?;
    match MIRRORS.may_load(deps.storage, (origin_eid, index))? {
        Some(local) => {
            let sale = SALES.load(deps.storage, local)?;
            Ok(Some(sale_response(&config, local, sale)))
        }
        None => Ok(None),
    }
}

pub fn query_trade_totals(
    deps: Deps,
    sale_index: u64,
    dst_eid: Option<u32>,
) -> StdResult<TradeTotalsResponse> {
    let totals = TOTALS.may_load(deps.storage, sale_index)?.unwrap_or_default();
    let synced = match dst_eid {
        Some(dst_eid) => Some(
            SYNCED
                .may_load(deps.storage, (sale_index, dst_eid))?
                .unwrap_or_default(),
        ),
        None => None,
    };
    Ok(TradeTotalsResponse { totals, synced })
}

// ============================================================================
// Curve Simulation
// ============================================================================

pub fn query_simulate_buy(
    deps: Deps,
    sale_index: u64,
    amount: Uint128,
) -> StdResult<SimulateBuyResponse> {
    let config = CONFIG.load(deps.storage)?;
    let curve = CURVE.load(deps.storage)?;
    let sale = load_sale(deps, &config, sale_index)?;

    let sold_after = sale.sold.checked_add(amount)?;
    if sold_after > curve.supply_ceiling {
        return Err(to_std(ContractError::CurveExhausted {
            requested: amount,
            remaining: curve.supply_ceiling.saturating_sub(sale.sold),
        }));
    }
    Ok(SimulateBuyResponse {
        amount,
        cost: buy_cost(&curve, sale.sold, amount)?,
        price_after: spot_price(&curve, sold_after)?,
    })
}

pub fn query_simulate_sell(
    deps: Deps,
    sale_index: u64,
    amount: Uint128,
) -> StdResult<SimulateSellResponse> {
    let config = CONFIG.load(deps.storage)?;
    let curve = CURVE.load(deps.storage)?;
    let sale = load_sale(deps, &config, sale_index)?;

    let proceeds = sell_proceeds(&curve, sale.sold, amount)?;
    Ok(SimulateSellResponse {
        amount,
        proceeds,
        price_after: spot_price(&curve, sale.sold - amount)?,
    })
}

pub fn query_simulate_buy_with_funds(
    deps: Deps,
    sale_index: u64,
    funds: Uint128,
) -> StdResult<SimulateBuyResponse> {
    let config = CONFIG.load(deps.storage)?;
    let curve = CURVE.load(deps.storage)?;
    let sale = load_sale(deps, &config, sale_index)?;

    let amount = tokens_for_funds(&curve, sale.sold, funds)?;
    Ok(SimulateBuyResponse {
        amount,
        cost: buy_cost(&curve, sale.sold, amount)?,
        price_after: spot_price(&curve, sale.sold + amount)?,
    })
}

// ============================================================================
// Fee Quotes
// ============================================================================

fn quote_response(creation_fee: Uint128, messaging_fee: Uint128) -> StdResult<QuoteResponse> {
    Ok(QuoteResponse {
        creation_fee,
        messaging_fee: MessagingFee {
            native_fee: messaging_fee,
        },
        total: creation_fee.checked_add(messaging_fee)?,
    })
}

/// Funds `Create` needs: the creation fee plus CREATE_TOKEN to every peer.
pub fn query_quote_create(
    deps: Deps,
    sender: String,
    name: String,
    symbol: String,
    metadata_uri: String,
    creator_override: Option<String>,
    options: Option<MessagingOptions>,
) -> StdResult<QuoteResponse> {
    let config = CONFIG.load(deps.storage)?;
    let sender = deps.api.addr_validate(&sender)?;
    let creator = resolve_creator(deps.api, &sender, creator_override).map_err(to_std)?;
    let index = SALE_COUNT.may_load(deps.storage)?.unwrap_or_default();

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
        created_at: 0,
    };
    let message = create_token_message(&sale, sale.sale_ref(config.eid, index));
    let peers = peer_chains(deps, &config)?;
    let fee = quote(deps, &config, &fan_out(&peers, &message, options)).map_err(to_std)?;

    quote_response(config.creation_fee, fee)
}

pub fn query_quote_launch(
    deps: Deps,
    sale_index: u64,
    dst_eid: u32,
    options: Option<MessagingOptions>,
) -> StdResult<QuoteResponse> {
    let config = CONFIG.load(deps.storage)?;
    let sale = load_local_sale(deps.storage, &config, sale_index).map_err(to_std)?;
    let message = create_token_message(&sale, sale.sale_ref(config.eid, sale_index));
    let fee = quote(deps, &config, &fan_out(&[dst_eid], &message, options)).map_err(to_std)?;

    quote_response(Uint128::zero(), fee)
}

pub fn query_quote_sync(
    deps: Deps,
    sale_index: u64,
    dst_eid: u32,
    options: Option<MessagingOptions>,
) -> StdResult<QuoteResponse> {
    let config = CONFIG.load(deps.storage)?;
    let (messages, _) =
        sync_messages(deps.storage, &config, sale_index, dst_eid, options).map_err(to_std)?;
    let fee = quote(deps, &config, &messages).map_err(to_std)?;

    quote_response(Uint128::zero(), fee)
}

/// LIQUIDITY_CREATED to `dst_eid`, or to every enabled peer chain. For a
/// sale that has not graduated yet this is what the graduating buy must
/// attach on top of its cost.
pub fn query_quote_liquidity_notice(
    deps: Deps,
    sale_index: u64,
    dst_eid: Option<u32>,
    options: Option<MessagingOptions>,
) -> StdResult<QuoteResponse> {
    let config = CONFIG.load(deps.storage)?;
    let sale = load_local_sale(deps.storage, &config, sale_index).map_err(to_std)?;
    let dst_eids = match dst_eid {
        Some(dst_eid) => vec![dst_eid],
        None => peer_chains(deps, &config)?,
    };

    let notice = ProtocolMessage::LiquidityCreated {
        sale: sale.sale_ref(config.eid, sale_index),
    };
    let fee = quote(deps, &config, &fan_out(&dst_eids, &notice, options)).map_err(to_std)?;

    quote_response(Uint128::zero(), fee)
}
