use cfd_types::{Error, PoolConfig, PoolState};
use soroban_sdk::{contracttype, Env};

// ============================================================================
// SOROBAN RESOURCE LIMITS - constraints for pool operations:
// ============================================================================
// - Config, state and the in-progress flag are three small Instance entries
// - Every operation reads config + state and rewrites state at most once
// - Token balances live in the token contracts, not here
// - Mint touches: oracle, collateral token (1-2 transfers), treasury,
//   one exposure token. Redeem: oracle, one exposure token, collateral token
// ============================================================================

/// Storage keys for the pool contract
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// Pool configuration (Instance storage)
    Config,
    /// Pool ledger (Instance storage)
    State,
    /// Set while a state-changing operation is executing
    Locked,
}

// TTL constants
const INSTANCE_TTL_THRESHOLD: u32 = 17280; // ~1 day
const INSTANCE_TTL_EXTEND: u32 = 518400; // ~30 days

/// Extend instance storage TTL
pub fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_EXTEND);
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

// === Config ===

pub fn get_config(env: &Env) -> Result<PoolConfig, Error> {
    let config = env
        .storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(Error::NotInitialized)?;
    extend_instance_ttl(env);
    Ok(config)
}

pub fn set_config(env: &Env, config: &PoolConfig) {
    env.storage().instance().set(&DataKey::Config, config);
    extend_instance_ttl(env);
}

// === State ===

pub fn get_state(env: &Env) -> Result<PoolState, Error> {
    let state = env
        .storage()
        .instance()
        .get(&DataKey::State)
        .ok_or(Error::NotInitialized)?;
    extend_instance_ttl(env);
    Ok(state)
}

pub fn set_state(env: &Env, state: &PoolState) {
    env.storage().instance().set(&DataKey::State, state);
    extend_instance_ttl(env);
}

// === Reentrancy guard ===

/// Mark an operation as in progress, failing if one already is
pub fn enter(env: &Env) -> Result<(), Error> {
    let locked: bool = env
        .storage()
        .instance()
        .get(&DataKey::Locked)
        .unwrap_or(false);
    if locked {
        return Err(Error::Reentrancy);
    }
    env.storage().instance().set(&DataKey::Locked, &true);
    Ok(())
}

pub fn exit(env: &Env) {
    env.storage().instance().remove(&DataKey::Locked);
}
