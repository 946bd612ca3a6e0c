use crate::full_math::{bps_of, checked_add, checked_sub, mul_div};
use cfd_types::{Error, PoolState, Side};
use soroban_sdk::Env;

/// Collateral redeemable for `units` of a side's exposure token
/// value = units * collateral[side] / supply[side], 0 for an empty side
pub fn value_of(env: &Env, side: Side, units: u128, state: &PoolState) -> Result<u128, Error> {
    let supply = state.supply(side);
    if supply == 0 {
        return Ok(0);
    }
    mul_div(env, units, state.collateral(side), supply)
}

/// Units to issue for `collateral_in` (already net of fees)
///
/// - empty side: 1:1 with collateral
/// - wiped side: 1:1, the stale units are retired by `apply_mint`
/// - live side: collateral_in * supply / collateral, preserving pro-rata ownership
///
/// Takes no price: `state` must already be marked to the operation's price.
/// The reference price of a fresh pool is recorded by `apply_mint`.
pub fn mint_amount_for(
    env: &Env,
    side: Side,
    collateral_in: u128,
    state: &PoolState,
) -> Result<u128, Error> {
    let supply = state.supply(side);

    if supply == 0 || state.is_wiped(side) {
        Ok(collateral_in)
    } else {
        mul_div(env, collateral_in, supply, state.collateral(side))
    }
}

/// Collateral paid out for burning `units`, floored so rounding never
/// over-redeems
pub fn redeem_amount_for(
    env: &Env,
    side: Side,
    units: u128,
    state: &PoolState,
) -> Result<u128, Error> {
    value_of(env, side, units, state)
}

/// Split a deposit into (fee, net)
pub fn fee_for(amount: u128, fee_bps: u32) -> Result<(u128, u128), Error> {
    let fee = bps_of(amount, fee_bps)?;
    Ok((fee, checked_sub(amount, fee)?))
}

/// Book a mint of `net_in` collateral on `side`
///
/// The first deposit into an empty pool establishes the reference price.
/// A deposit into a wiped side drops the stale units from the ledger, the
/// caller must retire them on the exposure token too. Returns the units to
/// issue.
pub fn apply_mint(
    env: &Env,
    state: &mut PoolState,
    side: Side,
    net_in: u128,
    price: u128,
) -> Result<u128, Error> {
    if net_in == 0 {
        return Err(Error::ZeroAmount);
    }

    let units = mint_amount_for(env, side, net_in, state)?;
    if units == 0 {
        return Err(Error::ZeroAmount);
    }

    if state.supply_long == 0 && state.supply_short == 0 {
        state.set_reference_price(price);
    }

    if state.is_wiped(side) {
        state.set_supply(side, 0);
    }

    state.set_collateral(side, checked_add(state.collateral(side), net_in)?);
    state.set_supply(side, checked_add(state.supply(side), units)?);
    state.set_wiped(side, false);

    Ok(units)
}

/// Book a redemption of `units` on `side`. Returns the collateral to pay out.
pub fn apply_redeem(
    env: &Env,
    state: &mut PoolState,
    side: Side,
    units: u128,
) -> Result<u128, Error> {
    if units == 0 {
        return Err(Error::ZeroAmount);
    }
    if units > state.supply(side) {
        return Err(Error::InsufficientBalance);
    }

    let collateral_out = redeem_amount_for(env, side, units, state)?;
    if collateral_out > state.collateral(side) {
        return Err(Error::InsufficientPoolCollateral);
    }

    state.set_collateral(side, state.collateral(side) - collateral_out);
    state.set_supply(side, state.supply(side) - units);
    if state.supply(side) == 0 {
        state.set_wiped(side, false);
    }

    Ok(collateral_out)
}
