use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Uint128};
use cw20::Cw20ReceiveMsg;

use crate::state::Pool;

#[cw_serde]
pub struct InstantiateMsg {
    pub admin: String,
    pub launchpad: Option<String>,
    pub native_denom: String,
    /// Swap fee in basis points; defaults to 30
    pub fee_bps: Option<u16>,
}

#[cw_serde]
pub struct MigrateMsg {}

#[cw_serde]
pub enum ExecuteMsg {
    /// Launchpad only. Seed the pool of a graduated sale. The token deposit
    /// must already be transferred; native funds are attached.
    CreatePool {
        sale_index: u64,
        token: String,
        token_amount: Uint128,
    },
    /// Swap attached native funds for pool tokens
    SwapNative { sale_index: u64, min_out: Option<Uint128> },
    /// Swap pool tokens for native funds (via cw20 `Send`)
    Receive(Cw20ReceiveMsg),
    /// Admin: set the launchpad allowed to create pools
    SetLaunchpad { launchpad: String },
}

#[cw_serde]
pub enum ReceiveMsg {
    SwapToken { sale_index: u64, min_out: Option<Uint128> },
}

#[cw_serde]
pub enum SwapOffer {
    Native(Uint128),
    Token(Uint128),
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ConfigResponse)]
    Config {},
    #[returns(Pool)]
    Pool { sale_index: u64 },
    #[returns(SimulateSwapResponse)]
    SimulateSwap { sale_index: u64, offer: SwapOffer },
}

#[cw_serde]
pub struct ConfigResponse {
    pub admin: Addr,
    pub launchpad: Option<Addr>,
    pub native_denom: String,
    pub fee_bps: u16,
}

#[cw_serde]
pub struct SimulateSwapResponse {
    pub return_amount: Uint128,
    pub fee_amount: Uint128,
}
