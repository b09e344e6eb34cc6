//! Liquidity migration of graduated sales.
//!
//! Runs inside the buy that reaches the target. The sale is marked graduated
//! before any transfer message is built, so the curve is frozen even if the
//! pool calls back into the launchpad.

use common::interface::PoolExecuteMsg;
use cosmwasm_std::{coins, to_json_binary, CosmosMsg, Storage, Uint128, WasmMsg};
use cw20::Cw20ExecuteMsg;

use crate::curve::CurveConfig;
use crate::error::ContractError;
use crate::state::{Config, Sale, SALES};

/// What moved into the pool.
#[derive(Debug)]
pub struct Migration {
    pub msgs: Vec<CosmosMsg>,
    pub token_amount: Uint128,
    pub native_amount: Uint128,
}

pub fn migrate_liquidity(
    storage: &mut dyn Storage,
    config: &Config,
    curve: &CurveConfig,
    sale_index: u64,
    sale: &mut Sale,
) -> Result<Migration, ContractError> {
    if sale.is_liquidity_created {
        return Err(ContractError::AlreadyGraduated { sale_index });
    }
    let pool = config
        .liquidity_pool
        .as_ref()
        .ok_or(ContractError::LiquidityPoolNotSet)?;
    let token = sale
        .token
        .clone()
        .ok_or(ContractError::TokenNotReady { sale_index })?;

    sale.is_liquidity_created = true;
    sale.is_open = false;
    SALES.save(storage, sale_index, sale)?;

    // Unsold curve supply plus the fixed reserve
    let token_amount = curve.total_supply.checked_sub(sale.sold)?;
    let native_amount = sale.raised;

    let mut msgs: Vec<CosmosMsg> = vec![];
    if !token_amount.is_zero() {
        msgs.push(
            WasmMsg::Execute {
                contract_addr: token.to_string(),
                msg: to_json_binary(&Cw20ExecuteMsg::Transfer {
                    recipient: pool.to_string(),
                    amount: token_amount,
                })?,
                funds: vec![],
            }
            .into(),
        );
    }
    msgs.push(
        WasmMsg::Execute {
            contract_addr: pool.to_string(),
            msg: to_json_binary(&PoolExecuteMsg::CreatePool {
                sale_index,
                token: token.to_string(),
                token_amount,
            })?,
            funds: if native_amount.is_zero() {
                vec![]
            } else {
                coins(native_amount.u128(), &config.native_denom)
            },
        }
        .into(),
    );

    Ok(Migration {
        msgs,
        token_amount,
        native_amount,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::SaleOrigin;
    use cosmwasm_std::testing::MockStorage;
    use cosmwasm_std::{from_json, Addr};

    fn config(pool: Option<&str>) -> Config {
        Config {
            admin: Addr::unchecked("terra1admin"),
            paused: false,
            eid: 1,
            native_denom: "uluna".to_string(),
            token_code_id: 1,
            creation_fee: Uint128::new(100_000),
            fee_recipient: Addr::unchecked("terra1admin"),
            messenger: None,
            liquidity_pool: pool.map(Addr::unchecked),
        }
    }

    fn sale(sold: u128, raised: u128) -> Sale {
        Sale {
            token: Some(Addr::unchecked("terra1token")),
            name: "Test Token".to_string(),
            symbol: "TEST".to_string(),
            metadata_uri: String::new(),
            creator: "terra1creator".to_string(),
            sold: Uint128::new(sold),
            raised: Uint128::new(raised),
            is_open: true,
            is_liquidity_created: false,
            origin: SaleOrigin::Local,
            created_at: 1,
        }
    }

    #[test]
    fn test_migration_moves_unsold_supply_and_raised_funds() {
        let mut storage = MockStorage::new();
        let curve = CurveConfig::default();
        let mut sale = sale(20_000_000_000, 3_000_000);

        let migration =
            migrate_liquidity(&mut storage, &config(Some("terra1pool")), &curve, 0, &mut sale)
                .unwrap();

        assert_eq!(migration.token_amount, Uint128::new(980_000_000_000));
        assert_eq!(migration.native_amount, Uint128::new(3_000_000));
        assert_eq!(migration.msgs.len(), 2);

        let stored = SALES.load(&storage, 0).unwrap();
        assert!(stored.is_liquidity_created);
        assert!(!stored.is_open);

        match &migration.msgs[1] {
            CosmosMsg::Wasm(WasmMsg::Execute {
                contract_addr,
                msg,
                funds,
            }) => {
                assert_eq!(contract_addr, "terra1pool");
                assert_eq!(funds, &coins(3_000_000, "uluna"));
                let PoolExecuteMsg::CreatePool { token_amount, .. } = from_json(msg).unwrap();
                assert_eq!(token_amount, Uint128::new(980_000_000_000));
            }
            other => panic!("unexpected message: {:?}", other),
        }
    }

    #[test]
    fn test_migration_requires_pool() {
        let mut storage = MockStorage::new();
        let mut sale = sale(1, 1);
        let err = migrate_liquidity(
            &mut storage,
            &config(None),
            &CurveConfig::default(),
            0,
            &mut sale,
        )
        .unwrap_err();
        assert_eq!(err, ContractError::LiquidityPoolNotSet);
        assert!(!sale.is_liquidity_created);
    }

    #[test]
    fn test_migration_runs_once() {
        let mut storage = MockStorage::new();
        let mut sale = sale(1, 1);
        sale.is_liquidity_created = true;
        let err = migrate_liquidity(
            &mut storage,
            &config(Some("terra1pool")),
            &CurveConfig::default(),
            3,
            &mut sale,
        )
        .unwrap_err();
        assert_eq!(err, ContractError::AlreadyGraduated { sale_index: 3 });
    }
}
