use cosmwasm_std::{
    coins, entry_point, from_json, to_json_binary, Addr, BankMsg, Binary, CosmosMsg, Deps,
    DepsMut, Env, MessageInfo, Response, StdError, StdResult, Uint128, Uint256, WasmMsg,
};
use cw2::set_contract_version;
use cw20::{BalanceResponse, Cw20ExecuteMsg, Cw20QueryMsg, Cw20ReceiveMsg};

use crate::error::ContractError;
use crate::msg::{
    ConfigResponse, ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg, ReceiveMsg,
    SimulateSwapResponse, SwapOffer,
};
use crate::state::{
    Config, Pool, BPS_DENOMINATOR, CONFIG, CONTRACT_NAME, CONTRACT_VERSION, DEFAULT_FEE_BPS,
    POOLS, POOL_BY_TOKEN,
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
    let launchpad = msg
        .launchpad
        .map(|l| deps.api.addr_validate(&l))
        .transpose()?;
    let fee_bps = msg.fee_bps.unwrap_or(DEFAULT_FEE_BPS);
    if u128::from(fee_bps) >= BPS_DENOMINATOR {
        return Err(StdError::generic_err("fee_bps must be below 10000").into());
    }

    let config = Config {
        admin,
        launchpad,
        native_denom: msg.native_denom,
        fee_bps,
    };
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("admin", config.admin)
        .add_attribute("fee_bps", fee_bps.to_string()))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::CreatePool {
            sale_index,
            token,
            token_amount,
        } => execute_create_pool(deps, env, info, sale_index, token, token_amount),
        ExecuteMsg::SwapNative {
            sale_index,
            min_out,
        } => execute_swap_native(deps, info, sale_index, min_out),
        ExecuteMsg::Receive(cw20_msg) => execute_receive(deps, info, cw20_msg),
        ExecuteMsg::SetLaunchpad { launchpad } => execute_set_launchpad(deps, info, launchpad),
    }
}

fn paid_amount(info: &MessageInfo, denom: &str) -> Uint128 {
    info.funds
        .iter()
        .filter(|c| c.denom == denom)
        .map(|c| c.amount)
        .sum()
}

fn execute_create_pool(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    sale_index: u64,
    token: String,
    token_amount: Uint128,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if config.launchpad.as_ref() != Some(&info.sender) {
        return Err(ContractError::OnlyLaunchpad);
    }
    if POOLS.has(deps.storage, sale_index) {
        return Err(ContractError::PoolExists { sale_index });
    }

    let token = deps.api.addr_validate(&token)?;
    let native_amount = paid_amount(&info, &config.native_denom);
    if native_amount.is_zero() || token_amount.is_zero() {
        return Err(ContractError::ZeroAmount);
    }

    let balance: BalanceResponse = deps.querier.query_wasm_smart(
        token.to_string(),
        &Cw20QueryMsg::Balance {
            address: env.contract.address.to_string(),
        },
    )?;
    if balance.balance < token_amount {
        return Err(ContractError::TokenNotReceived {
            expected: token_amount,
            balance: balance.balance,
        });
    }

    let pool = Pool {
        sale_index,
        token: token.clone(),
        native_reserve: native_amount,
        token_reserve: token_amount,
        created_at: env.block.height,
    };
    POOLS.save(deps.storage, sale_index, &pool)?;
    POOL_BY_TOKEN.save(deps.storage, &token, &sale_index)?;

    Ok(Response::new()
        .add_attribute("action", "create_pool")
        .add_attribute("sale_index", sale_index.to_string())
        .add_attribute("token", token)
        .add_attribute("native_reserve", native_amount)
        .add_attribute("token_reserve", token_amount))
}

/// Constant-product output for `offer` against `(offer_reserve, ask_reserve)`.
/// The fee is taken from the input and stays in the pool; output rounds down.
pub fn compute_swap(
    offer_reserve: Uint128,
    ask_reserve: Uint128,
    offer: Uint128,
    fee_bps: u16,
) -> StdResult<(Uint128, Uint128)> {
    let fee_amount = offer.multiply_ratio(u128::from(fee_bps), BPS_DENOMINATOR);
    let offer_after_fee = offer - fee_amount;

    let numerator = Uint256::from(ask_reserve) * Uint256::from(offer_after_fee);
    let denominator = Uint256::from(offer_reserve) + Uint256::from(offer_after_fee);
    if denominator.is_zero() {
        return Ok((Uint128::zero(), fee_amount));
    }
    let return_amount = Uint128::try_from(numerator / denominator)?;
    Ok((return_amount, fee_amount))
}

fn check_slippage(return_amount: Uint128, min_out: Option<Uint128>) -> Result<(), ContractError> {
    if return_amount.is_zero() {
        return Err(ContractError::InsufficientLiquidity);
    }
    if let Some(min_out) = min_out {
        if return_amount < min_out {
            return Err(ContractError::SlippageExceeded {
                min_out,
                return_amount,
            });
        }
    }
    Ok(())
}

fn execute_swap_native(
    deps: DepsMut,
    info: MessageInfo,
    sale_index: u64,
    min_out: Option<Uint128>,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let mut pool = POOLS
        .may_load(deps.storage, sale_index)?
        .ok_or(ContractError::PoolNotFound { sale_index })?;

    let offer = paid_amount(&info, &config.native_denom);
    if offer.is_zero() {
        return Err(ContractError::ZeroAmount);
    }

    let (return_amount, fee_amount) =
        compute_swap(pool.native_reserve, pool.token_reserve, offer, config.fee_bps)?;
    check_slippage(return_amount, min_out)?;

    pool.native_reserve += offer;
    pool.token_reserve -= return_amount;
    POOLS.save(deps.storage, sale_index, &pool)?;

    let transfer = CosmosMsg::Wasm(WasmMsg::Execute {
        contract_addr: pool.token.to_string(),
        msg: to_json_binary(&Cw20ExecuteMsg::Transfer {
            recipient: info.sender.to_string(),
            amount: return_amount,
        })?,
        funds: vec![],
    });

    Ok(Response::new()
        .add_message(transfer)
        .add_attribute("action", "swap")
        .add_attribute("sale_index", sale_index.to_string())
        .add_attribute("offer_asset", config.native_denom)
        .add_attribute("offer_amount", offer)
        .add_attribute("return_amount", return_amount)
        .add_attribute("fee_amount", fee_amount))
}

fn execute_receive(
    deps: DepsMut,
    info: MessageInfo,
    cw20_msg: Cw20ReceiveMsg,
) -> Result<Response, ContractError> {
    let msg: ReceiveMsg = from_json(&cw20_msg.msg)?;
    match msg {
        ReceiveMsg::SwapToken {
            sale_index,
            min_out,
        } => {
            let sender = deps.api.addr_validate(&cw20_msg.sender)?;
            execute_swap_token(deps, info.sender, sender, sale_index, cw20_msg.amount, min_out)
        }
    }
}

fn execute_swap_token(
    deps: DepsMut,
    token: Addr,
    sender: Addr,
    sale_index: u64,
    offer: Uint128,
    min_out: Option<Uint128>,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let mut pool = POOLS
        .may_load(deps.storage, sale_index)?
        .ok_or(ContractError::PoolNotFound { sale_index })?;
    if pool.token != token {
        return Err(ContractError::WrongToken {
            sale_index,
            token: token.to_string(),
        });
    }
    if offer.is_zero() {
        return Err(ContractError::ZeroAmount);
    }

    let (return_amount, fee_amount) =
        compute_swap(pool.token_reserve, pool.native_reserve, offer, config.fee_bps)?;
    check_slippage(return_amount, min_out)?;

    pool.token_reserve += offer;
    pool.native_reserve -= return_amount;
    POOLS.save(deps.storage, sale_index, &pool)?;

    Ok(Response::new()
        .add_message(BankMsg::Send {
            to_address: sender.to_string(),
            amount: coins(return_amount.u128(), &config.native_denom),
        })
        .add_attribute("action", "swap")
        .add_attribute("sale_index", sale_index.to_string())
        .add_attribute("offer_asset", token)
        .add_attribute("offer_amount", offer)
        .add_attribute("return_amount", return_amount)
        .add_attribute("fee_amount", fee_amount))
}

fn execute_set_launchpad(
    deps: DepsMut,
    info: MessageInfo,
    launchpad: String,
) -> Result<Response, ContractError> {
    let mut config = CONFIG.load(deps.storage)?;
    if info.sender != config.admin {
        return Err(ContractError::Unauthorized);
    }

    let launchpad_addr = deps.api.addr_validate(&launchpad)?;
    config.launchpad = Some(launchpad_addr.clone());
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new()
        .add_attribute("action", "set_launchpad")
        .add_attribute("launchpad", launchpad_addr))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::Pool { sale_index } => to_json_binary(&POOLS.load(deps.storage, sale_index)?),
        QueryMsg::SimulateSwap { sale_index, offer } => {
            to_json_binary(&query_simulate_swap(deps, sale_index, offer)?)
        }
    }
}

fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        admin: config.admin,
        launchpad: config.launchpad,
        native_denom: config.native_denom,
        fee_bps: config.fee_bps,
    })
}

fn query_simulate_swap(
    deps: Deps,
    sale_index: u64,
    offer: SwapOffer,
) -> StdResult<SimulateSwapResponse> {
    let config = CONFIG.load(deps.storage)?;
    let pool = POOLS.load(deps.storage, sale_index)?;
    let (return_amount, fee_amount) = match offer {
        SwapOffer::Native(amount) => {
            compute_swap(pool.native_reserve, pool.token_reserve, amount, config.fee_bps)?
        }
        SwapOffer::Token(amount) => {
            compute_swap(pool.token_reserve, pool.native_reserve, amount, config.fee_bps)?
        }
    };
    Ok(SimulateSwapResponse {
        return_amount,
        fee_amount,
    })
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    Ok(Response::new().add_attribute("action", "migrate"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swap_output_rounds_down_and_keeps_fee() {
        // 1_000 in at 30 bps: 3 fee, 997 effective
        let (out, fee) = compute_swap(
            Uint128::new(3_000_000),
            Uint128::new(500_000_000_000),
            Uint128::new(1_000),
            30,
        )
        .unwrap();
        assert_eq!(fee, Uint128::new(3));
        // floor(500_000_000_000 * 997 / 3_000_997)
        assert_eq!(out, Uint128::new(166_111_462));
    }

    #[test]
    fn test_swap_never_drains_reserve() {
        let (out, _) = compute_swap(
            Uint128::new(1),
            Uint128::new(1_000),
            Uint128::new(u64::MAX as u128),
            30,
        )
        .unwrap();
        assert!(out < Uint128::new(1_000));
    }

    #[test]
    fn test_product_does_not_decrease() {
        let native = Uint128::new(3_000_000);
        let tokens = Uint128::new(500_000_000_000);
        let offer = Uint128::new(250_000);
        let (out, _) = compute_swap(native, tokens, offer, 30).unwrap();

        let before = Uint256::from(native) * Uint256::from(tokens);
        let after = Uint256::from(native + offer) * Uint256::from(tokens - out);
        assert!(after >= before);
    }

    #[test]
    fn test_slippage_check() {
        assert_eq!(
            check_slippage(Uint128::new(5), Some(Uint128::new(6))).unwrap_err(),
            ContractError::SlippageExceeded {
                min_out: Uint128::new(6),
                return_amount: Uint128::new(5),
            }
        );
        assert_eq!(
            check_slippage(Uint128::zero(), None).unwrap_err(),
            ContractError::InsufficientLiquidity
        );
        assert!(check_slippage(Uint128::new(6), Some(Uint128::new(6))).is_ok());
    }
}
