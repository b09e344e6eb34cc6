//! Two-chain test harness.
//!
//! Chains A (eid 1) and B (eid 2) share one `App`. Each chain has its own
//! endpoint, messenger, launchpad and liquidity pool; the endpoints route to
//! each other the way two transport deployments would.

#![allow(dead_code)]

use common::address_to_bytes32;
use cosmwasm_std::{coins, Addr, Binary, Empty, Uint128};
use cw20::{BalanceResponse, Cw20QueryMsg, TokenInfoResponse};
use cw_multi_test::{App, AppResponse, Contract, ContractWrapper, Executor};

use launchpad::msg::{
    ExecuteMsg, InstantiateMsg, QueryMsg, QuoteResponse, SaleResponse, TotalSalesResponse,
};
use launchpad::CurveConfig;

pub const DENOM: &str = "uluna";
pub const EID_A: u32 = 1;
pub const EID_B: u32 = 2;
pub const UNIT: u128 = 1_000_000;
pub const CREATION_FEE: u128 = 100_000;

/// Execution result with the error reduced to its root cause.
pub type TxResult = Result<AppResponse, String>;

// ============================================================================
// Contracts
// ============================================================================

fn contract_launchpad() -> Box<dyn Contract<Empty>> {
    Box::new(
        ContractWrapper::new(
            launchpad::contract::execute,
            launchpad::contract::instantiate,
            launchpad::contract::query,
        )
        .with_reply(launchpad::contract::reply),
    )
}

fn contract_messenger() -> Box<dyn Contract<Empty>> {
    Box::new(ContractWrapper::new(
        messenger::contract::execute,
        messenger::contract::instantiate,
        messenger::contract::query,
    ))
}

fn contract_endpoint() -> Box<dyn Contract<Empty>> {
    Box::new(
        ContractWrapper::new(
            endpoint_mock::contract::execute,
            endpoint_mock::contract::instantiate,
            endpoint_mock::contract::query,
        )
        .with_reply(endpoint_mock::contract::reply),
    )
}

fn contract_pool() -> Box<dyn Contract<Empty>> {
    Box::new(ContractWrapper::new(
        liquidity_pool::contract::execute,
        liquidity_pool::contract::instantiate,
        liquidity_pool::contract::query,
    ))
}

fn contract_cw20() -> Box<dyn Contract<Empty>> {
    Box::new(ContractWrapper::new(
        cw20_base::contract::execute,
        cw20_base::contract::instantiate,
        cw20_base::contract::query,
    ))
}

// ============================================================================
// Suite
// ============================================================================

#[derive(Clone)]
pub struct Chain {
    pub eid: u32,
    pub endpoint: Addr,
    pub messenger: Addr,
    pub launchpad: Addr,
    pub pool: Addr,
}

pub struct Suite {
    pub app: App,
    pub admin: Addr,
    pub user: Addr,
    pub trader: Addr,
    pub a: Chain,
    pub b: Chain,
}

impl Suite {
    pub fn new() -> Self {
        Self::with_curve(None)
    }

    pub fn with_curve(curve: Option<CurveConfig>) -> Self {
        let mut app = App::default();
        let admin = Addr::unchecked("terra1admin");
        let user = Addr::unchecked("terra1user");
        let trader = Addr::unchecked("terra1trader");

        app.init_modules(|router, _, storage| {
            for account in [&admin, &user, &trader] {
                router
                    .bank
                    .init_balance(storage, account, coins(100_000_000_000, DENOM))
                    .unwrap();
            }
        });

        let launchpad_code = app.store_code(contract_launchpad());
        let messenger_code = app.store_code(contract_messenger());
        let endpoint_code = app.store_code(contract_endpoint());
        let pool_code = app.store_code(contract_pool());
        let cw20_code = app.store_code(contract_cw20());

        let mut deploy = |eid: u32| -> Chain {
            let endpoint = app
                .instantiate_contract(
                    endpoint_code,
                    admin.clone(),
                    &endpoint_mock::msg::InstantiateMsg {
                        admin: admin.to_string(),
                        eid,
                        native_denom: DENOM.to_string(),
                        base_fee: Uint128::new(1_000),
                        per_byte_fee: Uint128::new(10),
                        gas_price: Uint128::new(1),
                        auto_deliver: true,
                    },
                    &[],
                    "endpoint",
                    None,
                )
                .unwrap();

            let launchpad = app
                .instantiate_contract(
                    launchpad_code,
                    admin.clone(),
                    &InstantiateMsg {
                        admin: admin.to_string(),
                        eid,
                        native_denom: DENOM.to_string(),
                        token_code_id: cw20_code,
                        creation_fee: Some(Uint128::new(CREATION_FEE)),
                        fee_recipient: None,
                        curve: curve.clone(),
                        messenger: None,
                        liquidity_pool: None,
                    },
                    &[],
                    "launchpad",
                    Some(admin.to_string()),
                )
                .unwrap();

            let messenger = app
                .instantiate_contract(
                    messenger_code,
                    admin.clone(),
                    &messenger::msg::InstantiateMsg {
                        admin: admin.to_string(),
                        endpoint: endpoint.to_string(),
                        launchpad: Some(launchpad.to_string()),
                        native_denom: DENOM.to_string(),
                    },
                    &[],
                    "messenger",
                    Some(admin.to_string()),
                )
                .unwrap();

            let pool = app
                .instantiate_contract(
                    pool_code,
                    admin.clone(),
                    &liquidity_pool::msg::InstantiateMsg {
                        admin: admin.to_string(),
                        launchpad: Some(launchpad.to_string()),
                        native_denom: DENOM.to_string(),
                        fee_bps: None,
                    },
                    &[],
                    "pool",
                    None,
                )
                .unwrap();

            for msg in [
                ExecuteMsg::SetCrossChainMessenger {
                    address: messenger.to_string(),
                },
                ExecuteMsg::SetLiquidityPool {
                    address: pool.to_string(),
                },
            ] {
                app.execute_contract(admin.clone(), launchpad.clone(), &msg, &[])
                    .unwrap();
            }

            Chain {
                eid,
                endpoint,
                messenger,
                launchpad,
                pool,
            }
        };

        let a = deploy(EID_A);
        let b = deploy(EID_B);

        // Wire the two chains together in both directions
        for (local, remote) in [(&a, &b), (&b, &a)] {
            app.execute_contract(
                admin.clone(),
                local.endpoint.clone(),
                &endpoint_mock::msg::ExecuteMsg::SetDestEndpoint {
                    oapp: remote.messenger.to_string(),
                    endpoint: remote.endpoint.to_string(),
                },
                &[],
            )
            .unwrap();
            app.execute_contract(
                admin.clone(),
                local.messenger.clone(),
                &messenger::msg::ExecuteMsg::SetPeer {
                    eid: remote.eid,
                    peer: peer_bytes(&remote.messenger),
                },
                &[],
            )
            .unwrap();
            app.execute_contract(
                admin.clone(),
                local.messenger.clone(),
                &messenger::msg::ExecuteMsg::AddPeerChain { eid: remote.eid },
                &[],
            )
            .unwrap();
        }

        Suite {
            app,
            admin,
            user,
            trader,
            a,
            b,
        }
    }

    // ========================================================================
    // Transport control
    // ========================================================================

    pub fn set_auto_deliver(&mut self, endpoint: &Addr, enabled: bool) {
        self.app
            .execute_contract(
                self.admin.clone(),
                endpoint.clone(),
                &endpoint_mock::msg::ExecuteMsg::SetAutoDeliver { enabled },
                &[],
            )
            .unwrap();
    }

    pub fn deliver(&mut self, endpoint: &Addr, guid: &Binary) -> TxResult {
        self.app.execute_contract(
            self.admin.clone(),
            endpoint.clone(),
            &endpoint_mock::msg::ExecuteMsg::Deliver { guid: guid.clone() },
            &[],
        )
        .map_err(|err| err.root_cause().to_string())
    }

    pub fn pending_packets(&self, endpoint: &Addr) -> Vec<Binary> {
        let res: endpoint_mock::msg::PendingPacketsResponse = self
            .app
            .wrap()
            .query_wasm_smart(endpoint, &endpoint_mock::msg::QueryMsg::PendingPackets {})
            .unwrap();
        res.guids
    }

    // ========================================================================
    // Launchpad calls
    // ========================================================================

    pub fn quote_create(
        &self,
        chain: &Chain,
        sender: &Addr,
        name: &str,
        symbol: &str,
    ) -> QuoteResponse {
        self.app
            .wrap()
            .query_wasm_smart(
                &chain.launchpad,
                &QueryMsg::QuoteCreate {
                    sender: sender.to_string(),
                    name: name.to_string(),
                    symbol: symbol.to_string(),
                    metadata_uri: "ipfs://metadata".to_string(),
                    creator_override: None,
                    options: None,
                },
            )
            .unwrap()
    }

    pub fn create_with_funds(
        &mut self,
        chain: &Chain,
        sender: &Addr,
        name: &str,
        symbol: &str,
        funds: u128,
    ) -> TxResult {
        self.app.execute_contract(
            sender.clone(),
            chain.launchpad.clone(),
            &ExecuteMsg::Create {
                name: name.to_string(),
                symbol: symbol.to_string(),
                metadata_uri: "ipfs://metadata".to_string(),
                creator_override: None,
                options: None,
            },
            &coins(funds, DENOM),
        )
        .map_err(|err| err.root_cause().to_string())
    }

    /// Create a sale paying exactly the quoted total.
    pub fn create(&mut self, chain: &Chain, sender: &Addr) -> AppResponse {
        let quote = self.quote_create(chain, sender, "Test Token", "TEST");
        self.create_with_funds(chain, sender, "Test Token", "TEST", quote.total.u128())
            .unwrap()
    }

    pub fn buy(
        &mut self,
        chain: &Chain,
        sender: &Addr,
        sale_index: u64,
        tokens: u128,
        funds: u128,
    ) -> TxResult {
        self.buy_units(chain, sender, sale_index, tokens * UNIT, funds)
    }

    /// Buy an amount in token base units.
    pub fn buy_units(
        &mut self,
        chain: &Chain,
        sender: &Addr,
        sale_index: u64,
        amount: u128,
        funds: u128,
    ) -> TxResult {
        self.app.execute_contract(
            sender.clone(),
            chain.launchpad.clone(),
            &ExecuteMsg::Buy {
                sale_index,
                amount: Uint128::new(amount),
            },
            &coins(funds, DENOM),
        )
        .map_err(|err| err.root_cause().to_string())
    }

    pub fn sell(
        &mut self,
        chain: &Chain,
        sender: &Addr,
        sale_index: u64,
        tokens: u128,
    ) -> TxResult {
        let token = self.sale(chain, sale_index).token.unwrap();
        self.app.execute_contract(
            sender.clone(),
            token,
            &cw20::Cw20ExecuteMsg::Send {
                contract: chain.launchpad.to_string(),
                amount: Uint128::new(tokens * UNIT),
                msg: cosmwasm_std::to_json_binary(&launchpad::msg::ReceiveMsg::Sell {
                    sale_index,
                    min_proceeds: None,
                })
                .unwrap(),
            },
            &[],
        )
        .map_err(|err| err.root_cause().to_string())
    }

    pub fn quote_sync(&self, chain: &Chain, sale_index: u64, dst_eid: u32) -> QuoteResponse {
        self.app
            .wrap()
            .query_wasm_smart(
                &chain.launchpad,
                &QueryMsg::QuoteSync {
                    sale_index,
                    dst_eid,
                    options: None,
                },
            )
            .unwrap()
    }

    pub fn sync(
        &mut self,
        chain: &Chain,
        sale_index: u64,
        dst_eid: u32,
        funds: u128,
    ) -> TxResult {
        let sender = self.trader.clone();
        self.app.execute_contract(
            sender,
            chain.launchpad.clone(),
            &ExecuteMsg::SyncSale {
                sale_index,
                dst_eid,
                options: None,
            },
            &coins(funds, DENOM),
        )
        .map_err(|err| err.root_cause().to_string())
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn sale(&self, chain: &Chain, sale_index: u64) -> SaleResponse {
        self.app
            .wrap()
            .query_wasm_smart(&chain.launchpad, &QueryMsg::Sale { sale_index })
            .unwrap()
    }

    pub fn mirror_of(&self, chain: &Chain, origin_eid: u32, index: u64) -> Option<SaleResponse> {
        self.app
            .wrap()
            .query_wasm_smart(&chain.launchpad, &QueryMsg::MirrorOf { origin_eid, index })
            .unwrap()
    }

    pub fn total_sales(&self, chain: &Chain) -> u64 {
        let res: TotalSalesResponse = self
            .app
            .wrap()
            .query_wasm_smart(&chain.launchpad, &QueryMsg::TotalSales {})
            .unwrap();
        res.count
    }

    pub fn balance(&self, addr: &Addr) -> u128 {
        self.app.wrap().query_balance(addr, DENOM).unwrap().amount.u128()
    }

    pub fn token_balance(&self, token: &Addr, addr: &Addr) -> u128 {
        let res: BalanceResponse = self
            .app
            .wrap()
            .query_wasm_smart(
                token,
                &Cw20QueryMsg::Balance {
                    address: addr.to_string(),
                },
            )
            .unwrap();
        res.balance.u128()
    }

    pub fn token_supply(&self, token: &Addr) -> u128 {
        let res: TokenInfoResponse = self
            .app
            .wrap()
            .query_wasm_smart(token, &Cw20QueryMsg::TokenInfo {})
            .unwrap();
        res.total_supply.u128()
    }
}

// ============================================================================
// Helpers
// ============================================================================

pub fn peer_bytes(messenger: &Addr) -> Binary {
    Binary::from(address_to_bytes32(messenger.as_str()).to_vec())
}

/// GUIDs of the packets handed to a source endpoint, in send order.
pub fn sent_guids(res: &AppResponse) -> Vec<Binary> {
    res.events
        .iter()
        .filter(|event| event.ty == "wasm")
        .filter(|event| {
            event
                .attributes
                .iter()
                .any(|attr| attr.key == "action" && attr.value == "send")
        })
        .filter_map(|event| event.attributes.iter().find(|attr| attr.key == "guid"))
        .map(|attr| {
            let hex_guid = attr.value.trim_start_matches("0x");
            Binary::from(hex::decode(hex_guid).unwrap())
        })
        .collect()
}

/// Whether any event of the response carries `key = value`.
pub fn has_attribute(res: &AppResponse, key: &str, value: &str) -> bool {
    res.events
        .iter()
        .flat_map(|event| event.attributes.iter())
        .any(|attr| attr.key == key && attr.value == value)
}
