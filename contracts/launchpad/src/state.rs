//! State definitions for the launchpad

use common::admin::{AdminControl, Administered, PendingAdmin};
use common::{SaleRef, TradeDirection};
use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, StdResult, Uint128};
use cw_storage_plus::{Item, Map};

use crate::curve::CurveConfig;

pub const CONTRACT_NAME: &str = "crates.io:omnichain-launchpad";
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default creation fee (0.1 LUNC)
pub const DEFAULT_CREATION_FEE: u128 = 100_000;

// ============================================================================
// Core Configuration
// ============================================================================

#[cw_serde]
pub struct Config {
    pub admin: Addr,
    pub paused: bool,
    /// Endpoint id of this chain; `origin_eid` of every local sale
    pub eid: u32,
    pub native_denom: String,
    /// Code id instantiated for every sale token (cw20-base)
    pub token_code_id: u64,
    pub creation_fee: Uint128,
    pub fee_recipient: Addr,
    pub messenger: Option<Addr>,
    pub liquidity_pool: Option<Addr>,
}

impl Administered for Config {
    fn admin(&self) -> &Addr {
        &self.admin
    }

    fn set_admin(&mut self, admin: Addr) {
        self.admin = admin;
    }

    fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }
}

// ============================================================================
// Sales
// ============================================================================

#[cw_serde]
pub enum SaleOrigin {
    /// Created on this chain; tradable until it graduates
    Local,
    /// Mirror of a sale created on another chain
    Remote { eid: u32, index: u64 },
}

#[cw_serde]
pub struct Sale {
    /// cw20 contract; `None` until the instantiate reply lands
    pub token: Option<Addr>,
    pub name: String,
    pub symbol: String,
    pub metadata_uri: String,
    /// Creator address; foreign-chain format on mirrors
    pub creator: String,
    pub sold: Uint128,
    pub raised: Uint128,
    pub is_open: bool,
    pub is_liquidity_created: bool,
    pub origin: SaleOrigin,
    pub created_at: u64,
}

impl Sale {
    pub fn is_mirror(&self) -> bool {
        matches!(self.origin, SaleOrigin::Remote { .. })
    }

    /// Cross-chain identity of the sale stored at `index`.
    pub fn sale_ref(&self, local_eid: u32, index: u64) -> SaleRef {
        match self.origin {
            SaleOrigin::Local => SaleRef {
                origin_eid: local_eid,
                index,
            },
            SaleOrigin::Remote { eid, index } => SaleRef {
                origin_eid: eid,
                index,
            },
        }
    }
}

/// Gross trade counters. Only ever grow, so deltas between two snapshots
/// commute and can be applied in any order.
#[cw_serde]
#[derive(Default, Copy)]
pub struct TradeTotals {
    pub tokens_bought: Uint128,
    pub tokens_sold: Uint128,
    pub funds_in: Uint128,
    pub funds_out: Uint128,
}

impl TradeTotals {
    pub fn record(
        &mut self,
        direction: TradeDirection,
        amount: Uint128,
        funds: Uint128,
    ) -> StdResult<()> {
        match direction {
            TradeDirection::Buy => {
                self.tokens_bought = self.tokens_bought.checked_add(amount)?;
                self.funds_in = self.funds_in.checked_add(funds)?;
            }
            TradeDirection::Sell => {
                self.tokens_sold = self.tokens_sold.checked_add(amount)?;
                self.funds_out = self.funds_out.checked_add(funds)?;
            }
        }
        Ok(())
    }

    pub fn sold(&self) -> Uint128 {
        self.tokens_bought.saturating_sub(self.tokens_sold)
    }

    pub fn raised(&self) -> Uint128 {
        self.funds_in.saturating_sub(self.funds_out)
    }

    /// Growth since `synced`, as (buy tokens, buy funds, sell tokens, sell funds).
    pub fn delta_since(&self, synced: &TradeTotals) -> (Uint128, Uint128, Uint128, Uint128) {
        (
            self.tokens_bought.saturating_sub(synced.tokens_bought),
            self.funds_in.saturating_sub(synced.funds_in),
            self.tokens_sold.saturating_sub(synced.tokens_sold),
            self.funds_out.saturating_sub(synced.funds_out),
        )
    }
}

// ============================================================================
// Storage
// ============================================================================

pub const CONFIG: Item<Config> = Item::new("config");
pub const CURVE: Item<CurveConfig> = Item::new("curve");
pub const PENDING_ADMIN: Item<PendingAdmin> = Item::new("pending_admin");
pub const ADMIN: AdminControl<Config> = AdminControl::new(CONFIG, PENDING_ADMIN);

/// Next sale index
pub const SALE_COUNT: Item<u64> = Item::new("sale_count");

pub const SALES: Map<u64, Sale> = Map::new("sales");

pub const SALE_BY_TOKEN: Map<&Addr, u64> = Map::new("sale_by_token");

/// Mirrors by origin: (origin_eid, origin_index) -> local index
pub const MIRRORS: Map<(u32, u64), u64> = Map::new("mirrors");

/// Local trading totals of origin sales, received totals of mirrors
pub const TOTALS: Map<u64, TradeTotals> = Map::new("totals");

/// Totals of an origin sale already sent to a chain: (sale_index, dst_eid)
pub const SYNCED: Map<(u64, u32), TradeTotals> = Map::new("synced");
