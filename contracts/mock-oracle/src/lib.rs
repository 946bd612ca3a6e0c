#![no_std]

//! Admin-fed price oracle used for deployments without a live feed and in tests.
//!
//! Every update opens a new round. The pool only reads `latest_price`.

use cfd_types::PriceData;
use soroban_sdk::{contract, contractimpl, contracttype, Address, Env, Symbol};

#[contract]
pub struct MockPriceOracle;

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Admin,
    Latest,
}

const INSTANCE_TTL_THRESHOLD: u32 = 17280;
const INSTANCE_TTL_EXTEND: u32 = 518400;

#[contractimpl]
impl MockPriceOracle {
    pub fn initialize(env: Env, admin: Address) {
        if env.storage().instance().has(&DataKey::Admin) {
            panic!("Already initialized");
        }
        env.storage().instance().set(&DataKey::Admin, &admin);
        extend_instance_ttl(&env);
    }

    /// Publish `price` stamped with the current ledger time
    pub fn set_price(env: Env, price: u128) -> u64 {
        let timestamp = env.ledger().timestamp();
        publish(&env, price, timestamp)
    }

    /// Publish `price` with an explicit timestamp
    pub fn set_price_at(env: Env, price: u128, timestamp: u64) -> u64 {
        publish(&env, price, timestamp)
    }

    /// Most recent round, `None` before the first update
    pub fn latest_price(env: Env) -> Option<PriceData> {
        env.storage().instance().get(&DataKey::Latest)
    }

    pub fn admin(env: Env) -> Address {
        env.storage()
            .instance()
            .get(&DataKey::Admin)
            .expect("Not initialized")
    }
}

fn publish(env: &Env, price: u128, timestamp: u64) -> u64 {
    let admin: Address = env
        .storage()
        .instance()
        .get(&DataKey::Admin)
        .expect("Not initialized");
    admin.require_auth();

    let round = env
        .storage()
        .instance()
        .get::<_, PriceData>(&DataKey::Latest)
        .map(|p| p.round + 1)
        .unwrap_or(1);

    let data = PriceData {
        price,
        round,
        timestamp,
    };
    env.storage().instance().set(&DataKey::Latest, &data);
    extend_instance_ttl(env);

    env.events()
        .publish((Symbol::new(env, "price_set"),), (price, round, timestamp));

    round
}

fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_EXTEND);
}
