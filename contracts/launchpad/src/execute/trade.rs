//! Curve trading on open local sales.

use common::{ProtocolMessage, TradeDirection};
use cosmwasm_std::{
    coins, from_json, to_json_binary, Addr, BankMsg, DepsMut, Env, Event, MessageInfo,
    Response, Storage, Uint128, WasmMsg,
};
use cw20::{Cw20ExecuteMsg, Cw20ReceiveMsg};

use crate::curve::{buy_cost, is_graduated, remaining_supply, sell_proceeds, within_buy_bounds};
use crate::error::ContractError;
use crate::migrator::migrate_liquidity;
use crate::msg::ReceiveMsg;
use crate::outbound::{dispatch, fan_out, paid_amount, peer_chains};
use crate::state::{Config, Sale, CONFIG, CURVE, SALES, TOTALS};

/// Load a sale that can be traded against the curve right now.
fn load_tradable_sale(
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
    if sale.is_liquidity_created {
        return Err(ContractError::TargetReached { sale_index });
    }
    if sale.is_mirror() || !sale.is_open {
        return Err(ContractError::SaleClosed { sale_index });
    }
    Ok(sale)
}

// ============================================================================
// Buy
// ============================================================================

/// Buy `amount` tokens from the curve.
///
/// The surplus over the cost is refunded, unless the buy graduates the sale:
/// then it pays for LIQUIDITY_CREATED to every enabled peer chain and only
/// what remains is refunded.
pub fn execute_buy(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    sale_index: u64,
    amount: Uint128,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if config.paused {
        return Err(ContractError::Paused);
    }
    let curve = CURVE.load(deps.storage)?;
    let mut sale = load_tradable_sale(deps.storage, &config, sale_index)?;

    if !within_buy_bounds(&curve, sale.sold, amount) {
        return Err(ContractError::AmountOutOfRange {
            amount,
            min: curve.min_buy,
            max: curve.max_buy,
        });
    }
    let remaining = remaining_supply(&curve, sale.sold);
    if amount > remaining {
        return Err(ContractError::CurveExhausted {
            requested: amount,
            remaining,
        });
    }

    let cost = buy_cost(&curve, sale.sold, amount)?;
    let paid = paid_amount(&info, &config.native_denom);
    if paid < cost {
        return Err(ContractError::InsufficientFunds {
            required: cost,
            provided: paid,
        });
    }
    let token = sale
        .token
        .clone()
        .ok_or(ContractError::TokenNotReady { sale_index })?;

    let mut totals = TOTALS.load(deps.storage, sale_index)?;
    totals.record(TradeDirection::Buy, amount, cost)?;
    TOTALS.save(deps.storage, sale_index, &totals)?;
    sale.sold = sale.sold.checked_add(amount)?;
    sale.raised = sale.raised.checked_add(cost)?;

    let transfer = WasmMsg::Execute {
        contract_addr: token.to_string(),
        msg: to_json_binary(&Cw20ExecuteMsg::Transfer {
            recipient: info.sender.to_string(),
            amount,
        })?,
        funds: vec![],
    };
    let surplus = paid - cost;

    let mut response = Response::new()
        .add_message(transfer)
        .add_attribute("method", "buy")
        .add_attribute("sale_index", sale_index.to_string())
        .add_attribute("buyer", info.sender.as_str())
        .add_attribute("amount", amount)
        .add_attribute("cost", cost)
        .add_attribute("sold", sale.sold)
        .add_attribute("raised", sale.raised);

    if is_graduated(&curve, sale.sold, sale.raised) {
        let migration = migrate_liquidity(deps.storage, &config, &curve, sale_index, &mut sale)?;

        let peers = peer_chains(deps.as_ref(), &config)?;
        let notice = ProtocolMessage::LiquidityCreated {
            sale: sale.sale_ref(config.eid, sale_index),
        };
        let sent = dispatch(
            deps.as_ref(),
            &config,
            fan_out(&peers, &notice, None),
            surplus,
            &info.sender,
        )?;

        response = response
            .add_messages(migration.msgs)
            .add_messages(sent.msgs)
            .add_event(
                Event::new("sale_graduated")
                    .add_attribute("sale_index", sale_index.to_string())
                    .add_attribute("token", token)
                    .add_attribute("token_amount", migration.token_amount)
                    .add_attribute("native_amount", migration.native_amount),
            )
            .add_attribute("messaging_fee", sent.fee)
            .add_attribute("refund", sent.refund);
    } else {
        SALES.save(deps.storage, sale_index, &sale)?;
        if !surplus.is_zero() {
            response = response
                .add_message(BankMsg::Send {
                    to_address: info.sender.to_string(),
                    amount: coins(surplus.u128(), &config.native_denom),
                })
                .add_attribute("refund", surplus);
        }
    }

    Ok(response)
}

// ============================================================================
// Sell
// ============================================================================

/// cw20 receive hook; the sending token contract is `info.sender`.
pub fn execute_receive(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    wrapper: Cw20ReceiveMsg,
) -> Result<Response, ContractError> {
    let msg: ReceiveMsg = from_json(&wrapper.msg)?;
    let seller = deps.api.addr_validate(&wrapper.sender)?;

    match msg {
        ReceiveMsg::Sell {
            sale_index,
            min_proceeds,
        } => execute_sell(
            deps,
            env,
            info.sender,
            seller,
            wrapper.amount,
            sale_index,
            min_proceeds,
        ),
    }
}

fn execute_sell(
    deps: DepsMut,
    _env: Env,
    token: Addr,
    seller: Addr,
    amount: Uint128,
    sale_index: u64,
    min_proceeds: Option<Uint128>,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if config.paused {
        return Err(ContractError::Paused);
    }
    let curve = CURVE.load(deps.storage)?;
    let mut sale = load_tradable_sale(deps.storage, &config, sale_index)?;

    if sale.token.as_ref() != Some(&token) {
        return Err(ContractError::InvalidToken {
            sale_index,
            token: token.to_string(),
        });
    }
    if amount.is_zero() {
        return Err(ContractError::ZeroAmount);
    }
    if amount > sale.sold {
        return Err(ContractError::InsufficientSold {
            amount,
            sold: sale.sold,
        });
    }

    let proceeds = sell_proceeds(&curve, sale.sold, amount)?;
    if let Some(min) = min_proceeds {
        if proceeds < min {
            return Err(ContractError::SlippageExceeded {
                min,
                actual: proceeds,
            });
        }
    }

    let mut totals = TOTALS.load(deps.storage, sale_index)?;
    totals.record(TradeDirection::Sell, amount, proceeds)?;
    TOTALS.save(deps.storage, sale_index, &totals)?;
    sale.sold -= amount;
    sale.raised = sale.raised.checked_sub(proceeds)?;
    SALES.save(deps.storage, sale_index, &sale)?;

    let mut response = Response::new()
        .add_attribute("method", "sell")
        .add_attribute("sale_index", sale_index.to_string())
        .add_attribute("seller", seller.as_str())
        .add_attribute("amount", amount)
        .add_attribute("proceeds", proceeds)
        .add_attribute("sold", sale.sold)
        .add_attribute("raised", sale.raised);
    if !proceeds.is_zero() {
        response = response.add_message(BankMsg::Send {
            to_address: seller.to_string(),
            amount: coins(proceeds.u128(), &config.native_denom),
        });
    }
    Ok(response)
}
