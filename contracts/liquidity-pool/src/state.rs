use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Uint128};
use cw_storage_plus::{Item, Map};

pub const CONTRACT_NAME: &str = "crates.io:launchpad-liquidity-pool";
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// 30 bps swap fee, kept in the reserves
pub const DEFAULT_FEE_BPS: u16 = 30;
pub const BPS_DENOMINATOR: u128 = 10_000;

#[cw_serde]
pub struct Config {
    pub admin: Addr,
    pub launchpad: Option<Addr>,
    pub native_denom: String,
    pub fee_bps: u16,
}

#[cw_serde]
pub struct Pool {
    pub sale_index: u64,
    pub token: Addr,
    pub native_reserve: Uint128,
    pub token_reserve: Uint128,
    pub created_at: u64,
}

pub const CONFIG: Item<Config> = Item::new("config");

/// sale index => pool
pub const POOLS: Map<u64, Pool> = Map::new("pools");

/// token => sale index
pub const POOL_BY_TOKEN: Map<&Addr, u64> = Map::new("pool_by_token");
