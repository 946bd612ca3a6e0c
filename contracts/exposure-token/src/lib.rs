#![no_std]

use soroban_sdk::{contract, contractimpl, contracttype, Address, Env, String, Symbol};

#[contract]
pub struct ExposureToken;

/// Storage keys for the exposure token
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// Only address allowed to mint and burn (Instance storage)
    Admin,
    /// Token metadata (Instance storage)
    Metadata,
    /// Outstanding units (Instance storage)
    TotalSupply,
    /// Current balance epoch, bumped by `reset` (Instance storage)
    Epoch,
    /// Holder -> balance (Persistent storage)
    Balance(Address),
}

/// A holder's balance, only meaningful in the epoch it was written in
#[contracttype]
#[derive(Clone, Debug)]
pub struct BalanceEntry {
    pub epoch: u32,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct TokenMetadata {
    pub decimals: u32,
    pub name: String,
    pub symbol: String,
}

// TTL constants
const INSTANCE_TTL_THRESHOLD: u32 = 17280;
const INSTANCE_TTL_EXTEND: u32 = 518400;
const PERSISTENT_TTL_THRESHOLD: u32 = 17280;
const PERSISTENT_TTL_EXTEND: u32 = 518400;

#[contractimpl]
impl ExposureToken {
    /// Initialize the token; `admin` is handed over to the pool at deployment
    pub fn initialize(env: Env, admin: Address, decimals: u32, name: String, symbol: String) {
        if env.storage().instance().has(&DataKey::Admin) {
            panic!("Already initialized");
        }

        env.storage().instance().set(&DataKey::Admin, &admin);
        env.storage().instance().set(
            &DataKey::Metadata,
            &TokenMetadata {
                decimals,
                name,
                symbol,
            },
        );
        env.storage().instance().set(&DataKey::TotalSupply, &0i128);
        env.storage().instance().set(&DataKey::Epoch, &0u32);
        extend_instance_ttl(&env);
    }

    /// Mint new units (admin only)
    pub fn mint(env: Env, to: Address, amount: i128) {
        check_nonnegative(amount);
        get_admin(&env).require_auth();

        write_balance(&env, &to, read_balance(&env, &to) + amount);
        write_total_supply(&env, read_total_supply(&env) + amount);

        env.events()
            .publish((Symbol::new(&env, "mint"), to), amount);
    }

    /// Burn units from a holder (admin only)
    pub fn burn(env: Env, from: Address, amount: i128) {
        check_nonnegative(amount);
        get_admin(&env).require_auth();

        spend_balance(&env, &from, amount);
        write_total_supply(&env, read_total_supply(&env) - amount);

        env.events()
            .publish((Symbol::new(&env, "burn"), from), amount);
    }

    /// Move units between holders
    pub fn transfer(env: Env, from: Address, to: Address, amount: i128) {
        check_nonnegative(amount);
        from.require_auth();

        spend_balance(&env, &from, amount);
        write_balance(&env, &to, read_balance(&env, &to) + amount);

        env.events()
            .publish((Symbol::new(&env, "transfer"), from, to), amount);
    }

    /// Zero every outstanding balance (admin only)
    ///
    /// The pool calls this when a wiped side is recapitalised, so units
    /// issued before the wipe can no longer claim the new collateral.
    pub fn reset(env: Env) -> u32 {
        get_admin(&env).require_auth();

        let epoch = read_epoch(&env) + 1;
        env.storage().instance().set(&DataKey::Epoch, &epoch);
        write_total_supply(&env, 0);

        env.events()
            .publish((Symbol::new(&env, "reset"),), epoch);

        epoch
    }

    /// Hand mint/burn authority to a new admin
    pub fn set_admin(env: Env, new_admin: Address) {
        get_admin(&env).require_auth();
        env.storage().instance().set(&DataKey::Admin, &new_admin);
        extend_instance_ttl(&env);

        env.events()
            .publish((Symbol::new(&env, "admin_set"),), new_admin);
    }

    // === View Functions ===

    pub fn balance(env: Env, id: Address) -> i128 {
        read_balance(&env, &id)
    }

    pub fn total_supply(env: Env) -> i128 {
        read_total_supply(&env)
    }

    pub fn epoch(env: Env) -> u32 {
        read_epoch(&env)
    }

    pub fn admin(env: Env) -> Address {
        get_admin(&env)
    }

    pub fn decimals(env: Env) -> u32 {
        get_metadata(&env).decimals
    }

    pub fn name(env: Env) -> String {
        get_metadata(&env).name
    }

    pub fn symbol(env: Env) -> String {
        get_metadata(&env).symbol
    }
}

fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_EXTEND);
}

fn extend_persistent_ttl(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_EXTEND);
}

fn check_nonnegative(amount: i128) {
    if amount < 0 {
        panic!("Amount must be non-negative");
    }
}

fn get_admin(env: &Env) -> Address {
    extend_instance_ttl(env);
    env.storage()
        .instance()
        .get(&DataKey::Admin)
        .expect("Not initialized")
}

fn get_metadata(env: &Env) -> TokenMetadata {
    env.storage()
        .instance()
        .get(&DataKey::Metadata)
        .expect("Not initialized")
}

fn read_total_supply(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::TotalSupply)
        .unwrap_or(0)
}

fn write_total_supply(env: &Env, supply: i128) {
    env.storage().instance().set(&DataKey::TotalSupply, &supply);
    extend_instance_ttl(env);
}

fn read_epoch(env: &Env) -> u32 {
    env.storage().instance().get(&DataKey::Epoch).unwrap_or(0)
}

fn read_balance(env: &Env, id: &Address) -> i128 {
    let key = DataKey::Balance(id.clone());
    match env.storage().persistent().get::<_, BalanceEntry>(&key) {
        Some(entry) if entry.epoch == read_epoch(env) => entry.amount,
        // Written before the last reset
        _ => 0,
    }
}

fn write_balance(env: &Env, id: &Address, balance: i128) {
    let key = DataKey::Balance(id.clone());
    if balance == 0 {
        // Remove empty balance
        env.storage().persistent().remove(&key);
    } else {
        let entry = BalanceEntry {
            epoch: read_epoch(env),
            amount: balance,
        };
        env.storage().persistent().set(&key, &entry);
        extend_persistent_ttl(env, &key);
    }
}

fn spend_balance(env: &Env, id: &Address, amount: i128) {
    let balance = read_balance(env, id);
    if balance < amount {
        panic!("Insufficient balance");
    }
    write_balance(env, id, balance - amount);
}
