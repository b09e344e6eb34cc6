//! Message types for the launchpad

use common::{MessagingFee, MessagingOptions, ProtocolMessage};
use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Binary, Timestamp, Uint128};
use cw20::{Cw20Coin, Cw20ReceiveMsg, MinterResponse};

use crate::curve::CurveConfig;
use crate::state::TradeTotals;

// ============================================================================
// Instantiate & Migrate
// ============================================================================

#[cw_serde]
pub struct MigrateMsg {}

#[cw_serde]
pub struct InstantiateMsg {
    pub admin: String,
    /// Endpoint id of this chain
    pub eid: u32,
    /// Native denom for fees and trading (e.g. "uluna")
    pub native_denom: String,
    /// cw20-base code id used for sale tokens
    pub token_code_id: u64,
    /// Defaults to 100_000
    pub creation_fee: Option<Uint128>,
    /// Defaults to admin
    pub fee_recipient: Option<String>,
    /// Defaults to the standard step curve
    pub curve: Option<CurveConfig>,
    pub messenger: Option<String>,
    pub liquidity_pool: Option<String>,
}

// ============================================================================
// Execute Messages
// ============================================================================

#[cw_serde]
pub enum ExecuteMsg {
    // ========================================================================
    // Sales
    // ========================================================================
    /// Launch a token. Funds must cover `creation_fee` plus the messaging fee
    /// of CREATE_TOKEN to every enabled peer chain (see `QuoteCreate`).
    Create {
        name: String,
        symbol: String,
        metadata_uri: String,
        /// Recorded creator; defaults to the sender
        creator_override: Option<String>,
        /// Extra options for each CREATE_TOKEN
        options: Option<MessagingOptions>,
    },

    /// Creator or admin. Re-send CREATE_TOKEN of a local sale to one chain.
    SendLaunchToRemoteChain {
        sale_index: u64,
        dst_eid: u32,
        options: Option<MessagingOptions>,
    },

    /// Buy `amount` token base units. A buy that graduates the sale spends
    /// the surplus on LIQUIDITY_CREATED to every peer chain.
    Buy { sale_index: u64, amount: Uint128 },

    /// Sell via cw20 `Send` with a [`ReceiveMsg`] payload
    Receive(Cw20ReceiveMsg),

    /// Send trade deltas since the last sync to `dst_eid`
    SyncSale {
        sale_index: u64,
        dst_eid: u32,
        options: Option<MessagingOptions>,
    },

    /// Re-send LIQUIDITY_CREATED of a graduated local sale to `dst_eid`
    NotifyLiquidityCreated {
        sale_index: u64,
        dst_eid: u32,
        options: Option<MessagingOptions>,
    },

    /// Messenger only. Apply an authenticated remote message.
    ApplyRemote {
        src_eid: u32,
        guid: Binary,
        message: ProtocolMessage,
    },

    // ========================================================================
    // Configuration
    // ========================================================================
    SetLiquidityPool { address: String },
    SetCrossChainMessenger { address: String },
    SetCreationFee { fee: Uint128 },
    SetFeeRecipient { address: String },

    // ========================================================================
    // Admin
    // ========================================================================
    Pause {},
    Unpause {},
    ProposeAdmin { new_admin: String },
    AcceptAdmin {},
    CancelAdminProposal {},
}

/// Payload of a cw20 `Send` to the launchpad
#[cw_serde]
pub enum ReceiveMsg {
    Sell {
        sale_index: u64,
        min_proceeds: Option<Uint128>,
    },
}

/// cw20-base instantiation message for sale tokens
#[cw_serde]
pub struct TokenInstantiateMsg {
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    pub initial_balances: Vec<Cw20Coin>,
    pub mint: Option<MinterResponse>,
}

// ============================================================================
// Query Messages
// ============================================================================

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ConfigResponse)]
    Config {},

    #[returns(CurveConfig)]
    Curve {},

    #[returns(Option<PendingAdminResponse>)]
    PendingAdmin {},

    #[returns(SaleResponse)]
    Sale { sale_index: u64 },

    #[returns(SalesResponse)]
    Sales {
        start_after: Option<u64>,
        limit: Option<u32>,
    },

    #[returns(TotalSalesResponse)]
    TotalSales {},

    #[returns(Option<SaleResponse>)]
    SaleByToken { token: String },

    /// Local mirror of a remote sale
    #[returns(Option<SaleResponse>)]
    MirrorOf { origin_eid: u32, index: u64 },

    #[returns(SimulateBuyResponse)]
    SimulateBuy { sale_index: u64, amount: Uint128 },

    #[returns(SimulateSellResponse)]
    SimulateSell { sale_index: u64, amount: Uint128 },

    #[returns(SimulateBuyResponse)]
    SimulateBuyWithFunds { sale_index: u64, funds: Uint128 },

    #[returns(TradeTotalsResponse)]
    TradeTotals {
        sale_index: u64,
        /// Include the totals already synced to this chain
        dst_eid: Option<u32>,
    },

    /// Funds `Create` needs when sent by `sender`
    #[returns(QuoteResponse)]
    QuoteCreate {
        sender: String,
        name: String,
        symbol: String,
        metadata_uri: String,
        creator_override: Option<String>,
        options: Option<MessagingOptions>,
    },

    #[returns(QuoteResponse)]
    QuoteLaunch {
        sale_index: u64,
        dst_eid: u32,
        options: Option<MessagingOptions>,
    },

    #[returns(QuoteResponse)]
    QuoteSync {
        sale_index: u64,
        dst_eid: u32,
        options: Option<MessagingOptions>,
    },

    /// LIQUIDITY_CREATED to `dst_eid`, or to every enabled peer chain
    #[returns(QuoteResponse)]
    QuoteLiquidityNotice {
        sale_index: u64,
        dst_eid: Option<u32>,
        options: Option<MessagingOptions>,
    },
}

// ============================================================================
// Response Types
// ============================================================================

#[cw_serde]
pub struct ConfigResponse {
    pub admin: Addr,
    pub paused: bool,
    pub eid: u32,
    pub native_denom: String,
    pub token_code_id: u64,
    pub creation_fee: Uint128,
    pub fee_recipient: Addr,
    pub messenger: Option<Addr>,
    pub liquidity_pool: Option<Addr>,
}

#[cw_serde]
pub struct PendingAdminResponse {
    pub new_address: Addr,
    pub execute_after: Timestamp,
}

#[cw_serde]
pub struct SaleResponse {
    pub index: u64,
    pub token: Option<Addr>,
    pub name: String,
    pub symbol: String,
    pub metadata_uri: String,
    pub creator: String,
    pub sold: Uint128,
    pub raised: Uint128,
    pub is_open: bool,
    pub is_liquidity_created: bool,
    pub is_mirror: bool,
    pub origin_eid: u32,
    pub origin_index: u64,
    pub created_at: u64,
}

#[cw_serde]
pub struct SalesResponse {
    pub sales: Vec<SaleResponse>,
}

#[cw_serde]
pub struct TotalSalesResponse {
    pub count: u64,
}

#[cw_serde]
pub struct SimulateBuyResponse {
    pub amount: Uint128,
    pub cost: Uint128,
    /// Spot price after the buy
    pub price_after: Uint128,
}

#[cw_serde]
pub struct SimulateSellResponse {
    pub amount: Uint128,
    pub proceeds: Uint128,
    pub price_after: Uint128,
}

#[cw_serde]
pub struct TradeTotalsResponse {
    pub totals: TradeTotals,
    pub synced: Option<TradeTotals>,
}

#[cw_serde]
pub struct QuoteResponse {
    pub creation_fee: Uint128,
    pub messaging_fee: MessagingFee,
    /// Funds to attach
    pub total: Uint128,
}
