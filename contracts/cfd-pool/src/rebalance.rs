use crate::invariants::{
    fee_valid, rebalance_conserves, reference_prices_aligned, wiped_sides_have_holders,
};
use crate::oracle::read_price;
use crate::storage::{get_config, get_state, set_state};
use cfd_math::apply_rebalance;
use cfd_types::Error;
use soroban_sdk::{Env, Symbol};

/// Mark the pool to the oracle price
///
/// Permissionless so keepers can keep the pool marked between user
/// operations. A second call within the same oracle round is a no-op and
/// leaves storage untouched.
pub fn execute_rebalance(env: &Env) -> Result<i128, Error> {
    let config = get_config(env)?;
    let mut state = get_state(env)?;
    let price = read_price(env, &config, &state)?;

    let before = state.clone();
    let delta = apply_rebalance(env, &mut state, &price, config.leverage)?;

    if state == before {
        return Ok(0);
    }

    debug_assert!(rebalance_conserves(&before, &state));
    debug_assert!(reference_prices_aligned(&state));
    debug_assert!(wiped_sides_have_holders(&state));
    debug_assert!(fee_valid(&state));

    set_state(env, &state);

    env.events().publish(
        (Symbol::new(env, "rebalance"),),
        (price.price, price.round, delta),
    );

    Ok(delta)
}
