//! Launchpad - Entry Points
//!
//! The implementation is modularized into:
//! - `execute/` - Execute message handlers
//! - `query` - Query message handlers
//! - `curve` - Bonding curve math
//! - `migrator` - Liquidity migration on graduation
//! - `outbound` - Paid sends through the cross-chain messenger

use cosmwasm_std::{
    entry_point, to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Reply, Response,
    StdResult, Uint128,
};
use cw2::set_contract_version;

use crate::error::ContractError;
use crate::execute::{
    execute_apply_remote, execute_buy, execute_create, execute_notify_liquidity_created,
    execute_receive, execute_send_launch_to_remote_chain, execute_set_creation_fee,
    execute_set_cross_chain_messenger, execute_set_fee_recipient, execute_set_liquidity_pool,
    execute_sync_sale, handle_token_instantiated,
};
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::query::{
    query_config, query_curve, query_mirror_of, query_pending_admin, query_quote_create,
    query_quote_launch, query_quote_liquidity_notice, query_quote_sync, query_sale,
    query_sale_by_token, query_sales, query_simulate_buy, query_simulate_buy_with_funds,
    query_simulate_sell, query_total_sales, query_trade_totals,
};
use crate::state::{
    Config, ADMIN, CONFIG, CONTRACT_NAME, CONTRACT_VERSION, CURVE, DEFAULT_CREATION_FEE,
    SALE_COUNT,
};

// ============================================================================
// Instantiate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let admin = deps.api.addr_validate(&msg.admin)?;
    let fee_recipient = match msg.fee_recipient {
        Some(addr) => deps.api.addr_validate(&addr)?,
        None => admin.clone(),
    };
    let messenger = msg
        .messenger
        .map(|m| deps.api.addr_validate(&m))
        .transpose()?;
    let liquidity_pool = msg
        .liquidity_pool
        .map(|p| deps.api.addr_validate(&p))
        .transpose()?;

    let curve = msg.curve.unwrap_or_default();
    curve.validate()?;

    let config = Config {
        admin,
        paused: false,
        eid: msg.eid,
        native_denom: msg.native_denom,
        token_code_id: msg.token_code_id,
        creation_fee: msg
            .creation_fee
            .unwrap_or(Uint128::new(DEFAULT_CREATION_FEE)),
        fee_recipient,
        messenger,
        liquidity_pool,
    };
    CONFIG.save(deps.storage, &config)?;
    CURVE.save(deps.storage, &curve)?;
    SALE_COUNT.save(deps.storage, &0u64)?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("admin", config.admin)
        .add_attribute("eid", config.eid.to_string())
        .add_attribute("creation_fee", config.creation_fee))
}

// ============================================================================
// Execute
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        // Sales
        ExecuteMsg::Create {
            name,
            symbol,
            metadata_uri,
            creator_override,
            options,
        } => execute_create(
            deps,
            env,
            info,
            name,
            symbol,
            metadata_uri,
            creator_override,
            options,
        ),
        ExecuteMsg::SendLaunchToRemoteChain {
            sale_index,
            dst_eid,
            options,
        } => execute_send_launch_to_remote_chain(deps, info, sale_index, dst_eid, options),
        ExecuteMsg::Buy { sale_index, amount } => execute_buy(deps, env, info, sale_index, amount),
        ExecuteMsg::Receive(msg) => execute_receive(deps, env, info, msg),
        ExecuteMsg::SyncSale {
            sale_index,
            dst_eid,
            options,
        } => execute_sync_sale(deps, info, sale_index, dst_eid, options),
        ExecuteMsg::NotifyLiquidityCreated {
            sale_index,
            dst_eid,
            options,
        } => execute_notify_liquidity_created(deps, info, sale_index, dst_eid, options),
        ExecuteMsg::ApplyRemote {
            src_eid,
            guid,
            message,
        } => execute_apply_remote(deps, env, info, src_eid, guid, message),

        // Configuration
        ExecuteMsg::SetLiquidityPool { address } => {
            execute_set_liquidity_pool(deps, info, address)
        }
        ExecuteMsg::SetCrossChainMessenger { address } => {
            execute_set_cross_chain_messenger(deps, info, address)
        }
        ExecuteMsg::SetCreationFee { fee } => execute_set_creation_fee(deps, info, fee),
        ExecuteMsg::SetFeeRecipient { address } => execute_set_fee_recipient(deps, info, address),

        // Admin
        ExecuteMsg::Pause {} => Ok(ADMIN.set_paused(deps, info, true)?),
        ExecuteMsg::Unpause {} => Ok(ADMIN.set_paused(deps, info, false)?),
        ExecuteMsg::ProposeAdmin { new_admin } => Ok(ADMIN.propose(deps, env, info, new_admin)?),
        ExecuteMsg::AcceptAdmin {} => Ok(ADMIN.accept(deps, env, info)?),
        ExecuteMsg::CancelAdminProposal {} => Ok(ADMIN.cancel(deps, info)?),
    }
}

// ============================================================================
// Reply
// ============================================================================

/// Reply ids are sale indexes; the only submessages are token instantiations.
#[cfg_attr(not(feature = "library"), entry_point)]
pub fn reply(deps: DepsMut, _env: Env, msg: Reply) -> Result<Response, ContractError> {
    handle_token_instantiated(deps, msg)
}

// ============================================================================
// Query
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::Curve {} => to_json_binary(&query_curve(deps)?),
        QueryMsg::PendingAdmin {} => to_json_binary(&query_pending_admin(deps)?),
        QueryMsg::Sale { sale_index } => to_json_binary(&query_sale(deps, sale_index)?),
        QueryMsg::Sales { start_after, limit } => {
            to_json_binary(&query_sales(deps, start_after, limit)?)
        }
        QueryMsg::TotalSales {} => to_json_binary(&query_total_sales(deps)?),
        QueryMsg::SaleByToken { token } => to_json_binary(&query_sale_by_token(deps, token)?),
        QueryMsg::MirrorOf { origin_eid, index } => {
            to_json_binary(&query_mirror_of(deps, origin_eid, index)?)
        }
        QueryMsg::SimulateBuy { sale_index, amount } => {
            to_json_binary(&query_simulate_buy(deps, sale_index, amount)?)
        }
        QueryMsg::SimulateSell { sale_index, amount } => {
            to_json_binary(&query_simulate_sell(deps, sale_index, amount)?)
        }
        QueryMsg::SimulateBuyWithFunds { sale_index, funds } => {
            to_json_binary(&query_simulate_buy_with_funds(deps, sale_index, funds)?)
        }
        QueryMsg::TradeTotals {
            sale_index,
            dst_eid,
        } => to_json_binary(&query_trade_totals(deps, sale_index, dst_eid)?),
        QueryMsg::QuoteCreate {
            sender,
            name,
            symbol,
            metadata_uri,
            creator_override,
            options,
        } => to_json_binary(&query_quote_create(
            deps,
            sender,
            name,
            symbol,
            metadata_uri,
            creator_override,
            options,
        )?),
        QueryMsg::QuoteLaunch {
            sale_index,
            dst_eid,
            options,
        } => to_json_binary(&query_quote_launch(deps, sale_index, dst_eid, options)?),
        QueryMsg::QuoteSync {
            sale_index,
            dst_eid,
            options,
        } => to_json_binary(&query_quote_sync(deps, sale_index, dst_eid, options)?),
        QueryMsg::QuoteLiquidityNotice {
            sale_index,
            dst_eid,
            options,
        } => to_json_binary(&query_quote_liquidity_notice(
            deps, sale_index, dst_eid, options,
        )?),
    }
}

// ============================================================================
// Migrate
// ============================================================================

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    Ok(Response::new()
        .add_attribute("method", "migrate")
        .add_attribute("version", CONTRACT_VERSION))
}
