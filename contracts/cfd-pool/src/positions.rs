use crate::external::{
    exposure_balance, exposure_burn, exposure_mint, exposure_reset, to_token_amount,
    treasury_receive_fee,
};
use crate::invariants::{
    custody_covers_state, fee_bounded_by_input, mint_conserves, payout_covered,
};
use crate::oracle::read_price;
use crate::storage::{get_config, get_state, set_state};
use cfd_math::{apply_mint, apply_redeem, apply_rebalance, fee_for, value_of};
use cfd_types::{Error, PoolConfig, PoolState, Side};
use soroban_sdk::{log, token, Address, Env, Symbol};

/// Deposit collateral on `side` and receive exposure-token units
///
/// Marks the pool to the current price first so units are never priced
/// against a stale mark. The fee is carved out of the deposit and routed
/// to the treasury. A deposit into a wiped side restarts it: units issued
/// before the wipe are zeroed on the exposure token.
pub fn mint(env: &Env, caller: &Address, side: Side, collateral_in: u128) -> Result<u128, Error> {
    if collateral_in == 0 {
        return Err(Error::ZeroAmount);
    }

    let config = get_config(env)?;
    let mut state = get_state(env)?;
    let price = read_price(env, &config, &state)?;

    apply_rebalance(env, &mut state, &price, config.leverage)?;
    let marked = state.clone();

    let (fee, net) = fee_for(collateral_in, state.fee_bps)?;
    debug_assert!(fee_bounded_by_input(fee, collateral_in));
    let restarts_side = state.is_wiped(side);

    let units = apply_mint(env, &mut state, side, net, price.price)?;
    debug_assert!(mint_conserves(&marked, &state, net));

    let deposit_amount = to_token_amount(collateral_in)?;
    let fee_amount = to_token_amount(fee)?;
    let units_amount = to_token_amount(units)?;

    set_state(env, &state);

    // Interactions
    let pool = env.current_contract_address();
    let collateral = token::Client::new(env, &config.collateral_token);
    collateral.transfer(caller, &pool, &deposit_amount);

    if fee_amount > 0 {
        collateral.transfer(&pool, &config.treasury, &fee_amount);
        treasury_receive_fee(env, &config.treasury, &pool, fee_amount);
    }

    if restarts_side {
        log!(env, "wiped side recapitalised", marked.supply(side));
        exposure_reset(env, config.token(side));
    }
    exposure_mint(env, config.token(side), caller, units_amount);

    ensure_custody(env, &config, &state)?;

    env.events().publish(
        (Symbol::new(env, "mint"), caller.clone()),
        (side, collateral_in, fee, units),
    );

    Ok(units)
}

/// Burn `units` of `side` and receive the collateral they are worth
pub fn redeem(env: &Env, caller: &Address, side: Side, units: u128) -> Result<u128, Error> {
    if units == 0 {
        return Err(Error::ZeroAmount);
    }

    let config = get_config(env)?;
    let mut state = get_state(env)?;

    let balance = exposure_balance(env, config.token(side), caller);
    if balance < 0 || (balance as u128) < units {
        return Err(Error::InsufficientBalance);
    }

    let price = read_price(env, &config, &state)?;
    apply_rebalance(env, &mut state, &price, config.leverage)?;

    let side_collateral = state.collateral(side);
    let collateral_out = apply_redeem(env, &mut state, side, units)?;
    debug_assert!(payout_covered(collateral_out, side_collateral));

    let units_amount = to_token_amount(units)?;
    let payout_amount = to_token_amount(collateral_out)?;

    set_state(env, &state);

    // Interactions
    let pool = env.current_contract_address();
    exposure_burn(env, config.token(side), caller, units_amount);

    if payout_amount > 0 {
        let collateral = token::Client::new(env, &config.collateral_token);
        collateral.transfer(&pool, caller, &payout_amount);
    }

    ensure_custody(env, &config, &state)?;

    env.events().publish(
        (Symbol::new(env, "redeem"), caller.clone()),
        (side, units, collateral_out),
    );

    Ok(collateral_out)
}

/// Collateral `holder`'s balance of `side` redeems for at the current price
pub fn holder_value(env: &Env, side: Side, holder: &Address) -> Result<u128, Error> {
    let config = get_config(env)?;
    let state = marked_state(env, &config)?;

    let balance = exposure_balance(env, config.token(side), holder);
    if balance <= 0 {
        return Ok(0);
    }
    value_of(env, side, balance as u128, &state)
}

/// Units a mint of `collateral_in` would issue right now
pub fn preview_mint(env: &Env, side: Side, collateral_in: u128) -> Result<u128, Error> {
    if collateral_in == 0 {
        return Err(Error::ZeroAmount);
    }

    let config = get_config(env)?;
    let mut state = marked_state(env, &config)?;
    let (_, net) = fee_for(collateral_in, state.fee_bps)?;
    let price = state.reference_price_long;
    apply_mint(env, &mut state, side, net, price)
}

/// Collateral a redemption of `units` would pay right now
pub fn preview_redeem(env: &Env, side: Side, units: u128) -> Result<u128, Error> {
    let config = get_config(env)?;
    let mut state = marked_state(env, &config)?;
    apply_redeem(env, &mut state, side, units)
}

/// Copy of the ledger marked to the current price, never persisted
fn marked_state(env: &Env, config: &PoolConfig) -> Result<PoolState, Error> {
    let mut state = get_state(env)?;
    let price = read_price(env, config, &state)?;
    apply_rebalance(env, &mut state, &price, config.leverage)?;
    Ok(state)
}

/// The collateral token balance must cover the ledger
fn ensure_custody(env: &Env, config: &PoolConfig, state: &PoolState) -> Result<(), Error> {
    let collateral = token::Client::new(env, &config.collateral_token);
    let custodied = collateral.balance(&env.current_contract_address());
    if !custody_covers_state(state, custodied) {
        log!(env, "custody below ledger", custodied);
        return Err(Error::InsufficientPoolCollateral);
    }
    Ok(())
}
