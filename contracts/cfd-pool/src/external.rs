use cfd_types::{Error, PriceData};
use soroban_sdk::{Address, Env, IntoVal, Symbol, Vec};

// Calls into the contracts the pool is wired to at initialization.
// All of them happen after the pool has written its own state.

/// Latest observation from the oracle, if it has one and answers
pub fn oracle_latest_price(env: &Env, oracle: &Address) -> Result<PriceData, Error> {
    let result = env.try_invoke_contract::<Option<PriceData>, Error>(
        oracle,
        &Symbol::new(env, "latest_price"),
        Vec::new(env),
    );
    match result {
        Ok(Ok(Some(price))) => Ok(price),
        _ => Err(Error::OracleUnavailable),
    }
}

pub fn exposure_mint(env: &Env, token: &Address, to: &Address, amount: i128) {
    env.invoke_contract::<()>(
        token,
        &Symbol::new(env, "mint"),
        (to, amount).into_val(env),
    );
}

pub fn exposure_burn(env: &Env, token: &Address, from: &Address, amount: i128) {
    env.invoke_contract::<()>(
        token,
        &Symbol::new(env, "burn"),
        (from, amount).into_val(env),
    );
}

/// Zero every balance of a side's exposure token
pub fn exposure_reset(env: &Env, token: &Address) {
    env.invoke_contract::<u32>(token, &Symbol::new(env, "reset"), Vec::new(env));
}

pub fn exposure_balance(env: &Env, token: &Address, holder: &Address) -> i128 {
    env.invoke_contract(
        token,
        &Symbol::new(env, "balance"),
        (holder,).into_val(env),
    )
}

/// Notify the treasury of a fee already transferred to it
pub fn treasury_receive_fee(env: &Env, treasury: &Address, from: &Address, amount: i128) {
    env.invoke_contract::<()>(
        treasury,
        &Symbol::new(env, "receive_fee"),
        (from, amount).into_val(env),
    );
}

/// Token amounts cross contract boundaries as i128
pub fn to_token_amount(amount: u128) -> Result<i128, Error> {
    i128::try_from(amount).map_err(|_| Error::ArithmeticOverflow)
}
