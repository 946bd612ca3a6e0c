use crate::full_math::{checked_add, checked_sub, mul_div, powi};
use cfd_types::{Error, PoolState, PriceData, RebalanceDelta, PRICE_SCALE};
use soroban_sdk::{log, Env};

/// Price a mark-to-market move from the pool's reference price to `price`
///
/// growth = (price / reference) ^ leverage
/// delta  = collateral_long * (growth - 1), clamped to the losing side
///
/// Positive delta moves collateral from short to long. A ratio too large to
/// represent saturates to the whole short collateral.
pub fn compute_rebalance(
    env: &Env,
    state: &PoolState,
    price: u128,
    leverage: u32,
) -> Result<RebalanceDelta, Error> {
    let reference = state.reference_price_long;
    let collateral_long = state.collateral_long;
    let collateral_short = state.collateral_short;

    // Nothing to mark against, or nobody on the other side to pay
    if reference == 0 || price == reference || collateral_long == 0 || collateral_short == 0 {
        return Ok(RebalanceDelta::none());
    }

    let growth = match mul_div(env, price, PRICE_SCALE, reference)
        .and_then(|ratio| powi(env, ratio, leverage))
    {
        Ok(growth) => growth,
        Err(Error::ArithmeticOverflow) => {
            log!(env, "rebalance growth saturated", price, reference);
            return Ok(long_gains(collateral_short, collateral_short));
        }
        Err(e) => return Err(e),
    };

    if growth >= PRICE_SCALE {
        let gain = match mul_div(env, collateral_long, growth - PRICE_SCALE, PRICE_SCALE) {
            Ok(gain) => gain,
            Err(Error::ArithmeticOverflow) => collateral_short,
            Err(e) => return Err(e),
        };
        Ok(long_gains(gain, collateral_short))
    } else {
        // growth < 1 so the loss is always below collateral_long
        let loss = mul_div(env, collateral_long, PRICE_SCALE - growth, PRICE_SCALE)?;
        Ok(long_loses(loss, collateral_long))
    }
}

/// Mark the pool to `price`, moving collateral between sides
///
/// Idempotent within an oracle round. Returns the applied delta.
pub fn apply_rebalance(
    env: &Env,
    state: &mut PoolState,
    price: &PriceData,
    leverage: u32,
) -> Result<i128, Error> {
    if state.last_rebalance_round != 0 && price.round == state.last_rebalance_round {
        return Ok(0);
    }

    let outcome = compute_rebalance(env, state, price.price, leverage)?;
    let magnitude = outcome.delta.unsigned_abs();

    if outcome.delta > 0 {
        state.collateral_long = checked_add(state.collateral_long, magnitude)?;
        state.collateral_short = checked_sub(state.collateral_short, magnitude)?;
    } else if outcome.delta < 0 {
        state.collateral_short = checked_add(state.collateral_short, magnitude)?;
        state.collateral_long = checked_sub(state.collateral_long, magnitude)?;
    }

    // A side is only wiped if someone still holds its units
    if outcome.long_wiped && state.supply_long > 0 {
        state.long_wiped = true;
    }
    if outcome.short_wiped && state.supply_short > 0 {
        state.short_wiped = true;
    }

    state.set_reference_price(price.price);
    state.last_rebalance_round = price.round;

    Ok(outcome.delta)
}

fn long_gains(gain: u128, collateral_short: u128) -> RebalanceDelta {
    let effective = gain.min(collateral_short);
    RebalanceDelta {
        delta: to_signed(effective),
        long_wiped: false,
        short_wiped: effective == collateral_short,
    }
}

fn long_loses(loss: u128, collateral_long: u128) -> RebalanceDelta {
    let effective = loss.min(collateral_long);
    RebalanceDelta {
        delta: -to_signed(effective),
        long_wiped: effective == collateral_long,
        short_wiped: false,
    }
}

/// Collateral amounts are bounded by i128::MAX at the token boundary
fn to_signed(value: u128) -> i128 {
    value.min(i128::MAX as u128) as i128
}
