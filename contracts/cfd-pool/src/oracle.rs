use crate::external::oracle_latest_price;
use crate::invariants::{observation_fresh, round_monotonic};
use cfd_types::{Error, PoolConfig, PoolState, PriceData};
use soroban_sdk::{log, Env};

/// Read and validate the price for one operation
///
/// The oracle is untrusted input: the round must be recent enough, not
/// stamped ahead of the ledger, and not older than the round the pool last
/// marked against. Callers capture the result once and pass it down.
pub fn read_price(env: &Env, config: &PoolConfig, state: &PoolState) -> Result<PriceData, Error> {
    let observation = oracle_latest_price(env, &config.oracle)?;

    let now = env.ledger().timestamp();
    if !observation_fresh(now, observation.timestamp, config.max_price_age) {
        log!(
            env,
            "oracle round not fresh",
            observation.round,
            observation.timestamp,
            now
        );
        return Err(Error::StalePrice);
    }

    if !round_monotonic(state.last_rebalance_round, observation.round) {
        log!(
            env,
            "oracle round out of order",
            observation.round,
            state.last_rebalance_round
        );
        return Err(Error::StalePrice);
    }

    Ok(observation)
}
