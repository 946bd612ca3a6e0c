#![no_std]

use soroban_sdk::{contract, contractimpl, contracttype, Address, Env, Symbol};

#[contract]
pub struct Treasury;

/// Storage keys for the treasury
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// Treasury admin (Instance storage)
    Admin,
    /// Token fees are collected in (Instance storage)
    CollateralToken,
    /// Lifetime fees received (Instance storage)
    TotalFees,
    /// Source -> lifetime fees received from it (Persistent storage)
    FeesFrom(Address),
}

// TTL constants
const INSTANCE_TTL_THRESHOLD: u32 = 17280;
const INSTANCE_TTL_EXTEND: u32 = 518400;
const PERSISTENT_TTL_THRESHOLD: u32 = 17280;
const PERSISTENT_TTL_EXTEND: u32 = 518400;

#[contractimpl]
impl Treasury {
    /// Initialize the treasury
    pub fn initialize(env: Env, admin: Address, collateral_token: Address) {
        if env.storage().instance().has(&DataKey::Admin) {
            panic!("Already initialized");
        }

        env.storage().instance().set(&DataKey::Admin, &admin);
        env.storage()
            .instance()
            .set(&DataKey::CollateralToken, &collateral_token);
        env.storage().instance().set(&DataKey::TotalFees, &0i128);
        extend_instance_ttl(&env);
    }

    /// Record a fee that `from` has already transferred to this contract
    ///
    /// Pools call this right after moving the fee so the treasury can keep
    /// per-source accounting without pulling funds itself.
    pub fn receive_fee(env: Env, from: Address, amount: i128) {
        from.require_auth();

        if amount <= 0 {
            panic!("Fee must be positive");
        }

        let total: i128 = env
            .storage()
            .instance()
            .get(&DataKey::TotalFees)
            .unwrap_or(0);
        env.storage()
            .instance()
            .set(&DataKey::TotalFees, &(total + amount));
        extend_instance_ttl(&env);

        let key = DataKey::FeesFrom(from.clone());
        let from_total: i128 = env.storage().persistent().get(&key).unwrap_or(0);
        env.storage().persistent().set(&key, &(from_total + amount));
        env.storage()
            .persistent()
            .extend_ttl(&key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_EXTEND);

        env.events()
            .publish((Symbol::new(&env, "fee_received"), from), amount);
    }

    // === View Functions ===

    /// Lifetime fees received from all sources
    pub fn total_fees(env: Env) -> i128 {
        env.storage()
            .instance()
            .get(&DataKey::TotalFees)
            .unwrap_or(0)
    }

    /// Lifetime fees received from `source`
    pub fn fees_from(env: Env, source: Address) -> i128 {
        env.storage()
            .persistent()
            .get(&DataKey::FeesFrom(source))
            .unwrap_or(0)
    }

    pub fn admin(env: Env) -> Address {
        env.storage()
            .instance()
            .get(&DataKey::Admin)
            .expect("Not initialized")
    }

    pub fn collateral_token(env: Env) -> Address {
        env.storage()
            .instance()
            .get(&DataKey::CollateralToken)
            .expect("Not initialized")
    }
}

fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_EXTEND);
}
