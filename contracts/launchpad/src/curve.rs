//! Bonding curve.
//!
//! Step price schedule: one whole token costs
//! `base_price + price_step * floor(sold / step_size)` native base units,
//! where `sold` and `step_size` are in token base units.
//!
//! Integrals are accumulated exactly in `Uint256` over token base units and
//! scaled down by `10^decimals` once at the end. Buys round up, sells round
//! down, so a buy followed by a sell of the same quantity never gains.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{StdError, StdResult, Uint128, Uint256};

/// Upper bound on `supply_ceiling / step_size`; keeps every walk bounded.
pub const MAX_STEPS: u128 = 10_000;

const UNIT: u128 = 1_000_000;

#[cw_serde]
pub struct CurveConfig {
    /// Token decimals; prices are quoted per whole token
    pub decimals: u8,
    /// Price of a whole token in the first step
    pub base_price: Uint128,
    /// Price increase per step
    pub price_step: Uint128,
    /// Step width in token base units
    pub step_size: Uint128,
    /// Most tokens the curve will ever distribute
    pub supply_ceiling: Uint128,
    /// Supply minted per sale
    pub total_supply: Uint128,
    /// Tokens set aside for the pool on top of the unsold curve balance
    pub liquidity_reserve: Uint128,
    /// Raised native funds that graduate the sale
    pub graduation_target: Uint128,
    pub min_buy: Uint128,
    pub max_buy: Uint128,
}

impl Default for CurveConfig {
    fn default() -> Self {
        Self {
            decimals: 6,
            base_price: Uint128::new(100),
            price_step: Uint128::new(100),
            step_size: Uint128::new(10_000 * UNIT),
            supply_ceiling: Uint128::new(500_000 * UNIT),
            total_supply: Uint128::new(1_000_000 * UNIT),
            liquidity_reserve: Uint128::new(500_000 * UNIT),
            graduation_target: Uint128::new(3_000_000),
            min_buy: Uint128::new(UNIT),
            max_buy: Uint128::new(10_000 * UNIT),
        }
    }
}

impl CurveConfig {
    pub fn validate(&self) -> StdResult<()> {
        let fail = |reason: &str| Err(StdError::generic_err(format!("Invalid curve: {}", reason)));

        if self.decimals > 18 {
            return fail("decimals above 18");
        }
        if self.step_size.is_zero() {
            return fail("zero step size");
        }
        if self.base_price.is_zero() {
            return fail("zero base price");
        }
        if self.supply_ceiling.is_zero() || self.supply_ceiling > self.total_supply {
            return fail("supply ceiling must be within total supply");
        }
        if self.supply_ceiling.checked_add(self.liquidity_reserve)? > self.total_supply {
            return fail("liquidity reserve does not fit in total supply");
        }
        if self.supply_ceiling.u128().div_ceil(self.step_size.u128()) > MAX_STEPS {
            return fail("too many price steps");
        }
        if self.graduation_target.is_zero() {
            return fail("zero graduation target");
        }
        if self.min_buy.is_zero() || self.min_buy > self.max_buy {
            return fail("buy bounds");
        }
        // The most expensive step must be representable.
        price_at_step(self, self.supply_ceiling / self.step_size)?;
        Ok(())
    }

    fn scale(&self) -> Uint256 {
        Uint256::from(10u128.pow(self.decimals as u32))
    }
}

fn price_at_step(curve: &CurveConfig, step: Uint128) -> StdResult<Uint128> {
    Ok(curve
        .base_price
        .checked_add(curve.price_step.checked_mul(step)?)?)
}

/// Current price of a whole token.
pub fn spot_price(curve: &CurveConfig, sold: Uint128) -> StdResult<Uint128> {
    price_at_step(curve, sold / curve.step_size)
}

/// Unscaled integral of the price over `[from, to)`.
fn integral(curve: &CurveConfig, from: Uint128, to: Uint128) -> StdResult<Uint256> {
    let mut total = Uint256::zero();
    let mut pos = from;
    while pos < to {
        let step = pos / curve.step_size;
        let step_end = step
            .checked_add(Uint128::one())?
            .checked_mul(curve.step_size)?;
        let seg_end = step_end.min(to);
        let price = Uint256::from(price_at_step(curve, step)?);
        total = total.checked_add(price.checked_mul(Uint256::from(seg_end - pos))?)?;
        pos = seg_end;
    }
    Ok(total)
}

/// Native cost of buying `amount` tokens at `sold`, rounded up.
pub fn buy_cost(curve: &CurveConfig, sold: Uint128, amount: Uint128) -> StdResult<Uint128> {
    let end = sold.checked_add(amount)?;
    let raw = integral(curve, sold, end)?;
    let scale = curve.scale();
    let cost = raw.checked_add(scale - Uint256::one())? / scale;
    Ok(Uint128::try_from(cost)?)
}

/// Native proceeds of selling `amount` tokens back at `sold`, rounded down.
pub fn sell_proceeds(curve: &CurveConfig, sold: Uint128, amount: Uint128) -> StdResult<Uint128> {
    let start = sold
        .checked_sub(amount)
        .map_err(|_| StdError::generic_err("Cannot sell more than sold"))?;
    let raw = integral(curve, start, sold)?;
    Ok(Uint128::try_from(raw / curve.scale())?)
}

/// Tokens bought at `sold` with `funds`, rounded down and capped at the
/// supply ceiling. `buy_cost` of the result never exceeds `funds`.
pub fn tokens_for_funds(curve: &CurveConfig, sold: Uint128, funds: Uint128) -> StdResult<Uint128> {
    let mut budget = Uint256::from(funds).checked_mul(curve.scale())?;
    let mut pos = sold;
    while pos < curve.supply_ceiling {
        let step = pos / curve.step_size;
        let step_end = step
            .checked_add(Uint128::one())?
            .checked_mul(curve.step_size)?;
        let seg_end = step_end.min(curve.supply_ceiling);
        let price = Uint256::from(price_at_step(curve, step)?);
        let seg_cost = price.checked_mul(Uint256::from(seg_end - pos))?;
        if budget >= seg_cost {
            budget -= seg_cost;
            pos = seg_end;
        } else {
            pos += Uint128::try_from(budget / price)?;
            break;
        }
    }
    Ok(pos.saturating_sub(sold))
}

/// Remaining curve capacity at `sold`.
pub fn remaining_supply(curve: &CurveConfig, sold: Uint128) -> Uint128 {
    curve.supply_ceiling.saturating_sub(sold)
}

/// Per-buy bounds at `sold`. The fill that exhausts the curve may be smaller
/// than `min_buy`, so a dust remainder never blocks graduation.
pub fn within_buy_bounds(curve: &CurveConfig, sold: Uint128, amount: Uint128) -> bool {
    if amount.is_zero() || amount > curve.max_buy {
        return false;
    }
    amount >= curve.min_buy || amount == remaining_supply(curve, sold)
}

pub fn is_graduated(curve: &CurveConfig, sold: Uint128, raised: Uint128) -> bool {
    raised >= curve.graduation_target || sold >= curve.supply_ceiling
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(n: u128) -> Uint128 {
        Uint128::new(n * UNIT)
    }

    #[test]
    fn test_default_curve_is_valid() {
        CurveConfig::default().validate().unwrap();
    }

    #[test]
    fn test_first_two_steps_reach_target() {
        let curve = CurveConfig::default();
        let first = buy_cost(&curve, Uint128::zero(), tokens(10_000)).unwrap();
        assert_eq!(first, Uint128::new(1_000_000));

        let second = buy_cost(&curve, tokens(10_000), tokens(10_000)).unwrap();
        assert_eq!(second, Uint128::new(2_000_000));
        assert!(is_graduated(&curve, tokens(20_000), first + second));
    }

    #[test]
    fn test_buy_straddling_a_step() {
        let curve = CurveConfig::default();
        // 5k at 100 + 5k at 200
        let cost = buy_cost(&curve, tokens(5_000), tokens(10_000)).unwrap();
        assert_eq!(cost, Uint128::new(500_000 + 1_000_000));
    }

    #[test]
    fn test_buy_rounds_up_sell_rounds_down() {
        let curve = CurveConfig::default();
        // One base unit costs 100 / 10^6 of a native unit
        assert_eq!(
            buy_cost(&curve, Uint128::zero(), Uint128::one()).unwrap(),
            Uint128::one()
        );
        assert_eq!(
            sell_proceeds(&curve, Uint128::one(), Uint128::one()).unwrap(),
            Uint128::zero()
        );
    }

    #[test]
    fn test_round_trip_never_gains() {
        let curve = CurveConfig::default();
        for (sold, amount) in [
            (0u128, 1u128),
            (0, 1_234_567),
            (9_999_999_999, 2),
            (tokens(12_345).u128(), 987_654_321),
        ] {
            let sold = Uint128::new(sold);
            let amount = Uint128::new(amount);
            let cost = buy_cost(&curve, sold, amount).unwrap();
            let back = sell_proceeds(&curve, sold + amount, amount).unwrap();
            assert!(back <= cost, "sold={} amount={}", sold, amount);
        }
    }

    #[test]
    fn test_price_is_non_decreasing() {
        let curve = CurveConfig::default();
        let mut last = Uint128::zero();
        for i in 0..60u128 {
            let price = spot_price(&curve, tokens(i * 9_000)).unwrap();
            assert!(price >= last);
            last = price;
        }
        assert_eq!(spot_price(&curve, tokens(10_000)).unwrap(), Uint128::new(200));
    }

    #[test]
    fn test_tokens_for_funds_is_affordable() {
        let curve = CurveConfig::default();
        let sold = tokens(7_500);
        for funds in [1u128, 99, 100, 250_000, 1_000_001, 2_500_000] {
            let funds = Uint128::new(funds);
            let out = tokens_for_funds(&curve, sold, funds).unwrap();
            assert!(buy_cost(&curve, sold, out).unwrap() <= funds);
        }
        // Exactly one full step from zero
        assert_eq!(
            tokens_for_funds(&curve, Uint128::zero(), Uint128::new(1_000_000)).unwrap(),
            tokens(10_000)
        );
    }

    #[test]
    fn test_tokens_for_funds_caps_at_ceiling() {
        let curve = CurveConfig::default();
        let out = tokens_for_funds(&curve, tokens(499_000), Uint128::new(u64::MAX as u128)).unwrap();
        assert_eq!(out, tokens(1_000));
        assert_eq!(remaining_supply(&curve, tokens(499_000)), tokens(1_000));
    }

    #[test]
    fn test_sell_more_than_sold_fails() {
        let curve = CurveConfig::default();
        assert!(sell_proceeds(&curve, tokens(1), tokens(2)).is_err());
    }

    #[test]
    fn test_final_fill_may_be_below_min_buy() {
        let curve = CurveConfig::default();
        let dust = Uint128::new(UNIT / 2);
        let sold = curve.supply_ceiling - dust;

        assert!(within_buy_bounds(&curve, sold, dust));
        assert!(within_buy_bounds(&curve, sold, curve.min_buy));
        assert!(!within_buy_bounds(&curve, Uint128::zero(), dust));
        assert!(!within_buy_bounds(&curve, curve.supply_ceiling, Uint128::zero()));
        assert!(!within_buy_bounds(
            &curve,
            Uint128::zero(),
            curve.max_buy + Uint128::one()
        ));
    }

    #[test]
    fn test_validate_rejects_bad_configs() {
        let mut curve = CurveConfig {
            step_size: Uint128::zero(),
            ..CurveConfig::default()
        };
        assert!(curve.validate().is_err());

        curve = CurveConfig {
            liquidity_reserve: tokens(600_000),
            ..CurveConfig::default()
        };
        assert!(curve.validate().is_err());

        curve = CurveConfig {
            step_size: Uint128::new(1),
            ..CurveConfig::default()
        };
        assert!(curve.validate().is_err());

        curve = CurveConfig {
            min_buy: tokens(20_000),
            ..CurveConfig::default()
        };
        assert!(curve.validate().is_err());
    }
}
