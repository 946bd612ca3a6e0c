#![no_std]

mod external;
mod invariants;
mod oracle;
mod positions;
mod rebalance;
mod storage;


use cfd_types::{Error, PoolConfig, PoolState, Side, MAX_FEE_BPS, MAX_LEVERAGE};
use soroban_sdk::{contract, contractimpl, Address, Env, Symbol};
use storage::{get_config, get_state, is_initialized, set_config, set_state};

#[contract]
pub struct CfdPool;

#[contractimpl]
impl CfdPool {
    /// Initialize a new pool
    ///
    /// # Arguments
    /// * `oracle` - Price oracle answering `latest_price`
    /// * `collateral_token` - Token deposited as collateral
    /// * `long_token` / `short_token` - Exposure tokens; the pool must be made
    ///   their admin before the first mint
    /// * `treasury` - Fee recipient
    /// * `fee_bps` - Mint fee in basis points
    /// * `max_price_age` - Oldest acceptable oracle round, in seconds
    /// * `leverage` - Exponent of the exposure curve (1 = linear)
    pub fn initialize(
        env: Env,
        oracle: Address,
        collateral_token: Address,
        long_token: Address,
        short_token: Address,
        treasury: Address,
        fee_bps: u32,
        max_price_age: u64,
        leverage: u32,
    ) -> Result<(), Error> {
        if is_initialized(&env) {
            return Err(Error::AlreadyInitialized);
        }

        if fee_bps > MAX_FEE_BPS
            || leverage == 0
            || leverage > MAX_LEVERAGE
            || long_token == short_token
        {
            return Err(Error::InvalidConfig);
        }

        let config = PoolConfig {
            oracle,
            collateral_token,
            long_token,
            short_token,
            treasury,
            max_price_age,
            leverage,
        };
        set_config(&env, &config);
        set_state(&env, &PoolState::new(fee_bps));

        env.events().publish(
            (Symbol::new(&env, "initialized"),),
            (config.long_token, config.short_token, fee_bps),
        );

        Ok(())
    }

    /// Deposit collateral on a side
    ///
    /// # Returns
    /// Exposure-token units minted to `caller`
    pub fn mint(env: Env, caller: Address, side: Side, collateral_in: u128) -> Result<u128, Error> {
        caller.require_auth();
        storage::enter(&env)?;
        let result = positions::mint(&env, &caller, side, collateral_in);
        storage::exit(&env);
        result
    }

    /// Burn exposure-token units
    ///
    /// # Returns
    /// Collateral paid to `caller`
    pub fn redeem(env: Env, caller: Address, side: Side, units: u128) -> Result<u128, Error> {
        caller.require_auth();
        storage::enter(&env)?;
        let result = positions::redeem(&env, &caller, side, units);
        storage::exit(&env);
        result
    }

    /// Mark the pool to the current oracle price. Callable by anyone.
    ///
    /// # Returns
    /// Collateral moved towards the long side (negative: towards short)
    pub fn rebalance(env: Env) -> Result<i128, Error> {
        storage::enter(&env)?;
        let result = rebalance::execute_rebalance(&env);
        storage::exit(&env);
        result
    }

    // === View Functions ===

    /// Get current pool state
    pub fn get_state(env: Env) -> Result<PoolState, Error> {
        get_state(&env)
    }

    /// Get pool configuration
    pub fn get_config(env: Env) -> Result<PoolConfig, Error> {
        get_config(&env)
    }

    /// Get fee
    pub fn fee_bps(env: Env) -> Result<u32, Error> {
        Ok(get_state(&env)?.fee_bps)
    }

    /// Collateral `holder` would receive for their whole balance of `side`
    pub fn value_of(env: Env, side: Side, holder: Address) -> Result<u128, Error> {
        positions::holder_value(&env, side, &holder)
    }

    /// Units a mint would issue at the current price, after fees
    pub fn preview_mint(env: Env, side: Side, collateral_in: u128) -> Result<u128, Error> {
        positions::preview_mint(&env, side, collateral_in)
    }

    /// Collateral a redemption would pay at the current price
    pub fn preview_redeem(env: Env, side: Side, units: u128) -> Result<u128, Error> {
        positions::preview_redeem(&env, side, units)
    }
}
