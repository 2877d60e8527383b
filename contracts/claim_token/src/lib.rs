#![no_std]
use soroban_sdk::{
    contract, contracterror, contractimpl, contracttype, panic_with_error, symbol_short, Address,
    Env, String, Symbol,
};
use vault_interfaces::ClaimLedgerInterface;

// ---------------------------------------------------------------------------
// Storage key symbols
// ---------------------------------------------------------------------------
const ADMIN: Symbol  = symbol_short!("ADMIN");
const VAULT: Symbol  = symbol_short!("VAULT");
const NAME: Symbol   = symbol_short!("NAME");
const SYMBOL: Symbol = symbol_short!("SYMBOL");
const SUPPLY: Symbol = symbol_short!("SUPPLY");

/// Claims mirror the accounted asset's precision.
pub const DECIMALS: u32 = 6;

const DAY_IN_LEDGERS: u32 = 17_280;
const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = INSTANCE_BUMP_AMOUNT - DAY_IN_LEDGERS;
const BALANCE_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const BALANCE_LIFETIME_THRESHOLD: u32 = BALANCE_BUMP_AMOUNT - DAY_IN_LEDGERS;

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Balance(Address),
}

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ClaimError {
    VaultAlreadySet = 1,
    VaultNotSet = 2,
    InvalidAmount = 3,
    InsufficientBalance = 4,
    Overflow = 5,
}

// ---------------------------------------------------------------------------
// Contract
// ---------------------------------------------------------------------------

/// Fungible receipt ledger. Deployed once as the Principal Claim and once
/// as the Yield Claim; only the wired vault can change the supply.
#[contract]
pub struct ClaimToken;

#[contractimpl]
impl ClaimToken {
    pub fn __constructor(env: Env, admin: Address, name: String, symbol: String) {
        env.storage().instance().set(&ADMIN, &admin);
        env.storage().instance().set(&NAME, &name);
        env.storage().instance().set(&SYMBOL, &symbol);
        env.storage().instance().set(&SUPPLY, &0_i128);
    }

    /// One-time wiring of the vault allowed to mint and burn.
    pub fn set_vault(env: Env, vault: Address) {
        let admin = Self::admin(env.clone());
        admin.require_auth();

        if env.storage().instance().has(&VAULT) {
            panic_with_error!(&env, ClaimError::VaultAlreadySet);
        }

        env.storage().instance().set(&VAULT, &vault);
        bump_instance(&env);

        env.events().publish((symbol_short!("set_vault"), admin), vault);
    }

    pub fn admin(env: Env) -> Address {
        env.storage().instance().get(&ADMIN).unwrap()
    }

    pub fn vault(env: Env) -> Option<Address> {
        env.storage().instance().get(&VAULT)
    }

    pub fn name(env: Env) -> String {
        env.storage().instance().get(&NAME).unwrap()
    }

    pub fn symbol(env: Env) -> String {
        env.storage().instance().get(&SYMBOL).unwrap()
    }
}

#[contractimpl]
impl ClaimLedgerInterface for ClaimToken {
    fn mint(env: Env, to: Address, amount: i128) {
        check_positive(&env, amount);
        let vault = require_vault(&env);

        let balance = read_balance(&env, &to);
        write_balance(&env, &to, checked(&env, balance.checked_add(amount)));

        let supply: i128 = env.storage().instance().get(&SUPPLY).unwrap_or(0);
        env.storage().instance().set(&SUPPLY, &checked(&env, supply.checked_add(amount)));
        bump_instance(&env);

        env.events().publish((symbol_short!("mint"), vault, to), amount);
    }

    fn burn(env: Env, from: Address, amount: i128) {
        check_positive(&env, amount);
        let vault = require_vault(&env);

        spend_balance(&env, &from, amount);

        let supply: i128 = env.storage().instance().get(&SUPPLY).unwrap_or(0);
        env.storage().instance().set(&SUPPLY, &checked(&env, supply.checked_sub(amount)));
        bump_instance(&env);

        env.events().publish((symbol_short!("burn"), vault, from), amount);
    }

    fn balance(env: Env, id: Address) -> i128 {
        read_balance(&env, &id)
    }

    fn total_supply(env: Env) -> i128 {
        env.storage().instance().get(&SUPPLY).unwrap_or(0)
    }

    fn transfer(env: Env, from: Address, to: Address, amount: i128) {
        from.require_auth();
        check_positive(&env, amount);

        spend_balance(&env, &from, amount);
        let balance = read_balance(&env, &to);
        write_balance(&env, &to, checked(&env, balance.checked_add(amount)));
        bump_instance(&env);

        env.events().publish((symbol_short!("transfer"), from, to), amount);
    }

    fn decimals(_env: Env) -> u32 {
        DECIMALS
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn require_vault(env: &Env) -> Address {
    let vault: Address = env
        .storage()
        .instance()
        .get(&VAULT)
        .unwrap_or_else(|| panic_with_error!(env, ClaimError::VaultNotSet));
    vault.require_auth();
    vault
}

fn check_positive(env: &Env, amount: i128) {
    if amount <= 0 {
        panic_with_error!(env, ClaimError::InvalidAmount);
    }
}

fn checked(env: &Env, value: Option<i128>) -> i128 {
    value.unwrap_or_else(|| panic_with_error!(env, ClaimError::Overflow))
}

fn read_balance(env: &Env, id: &Address) -> i128 {
    let key = DataKey::Balance(id.clone());
    match env.storage().persistent().get::<DataKey, i128>(&key) {
        Some(balance) => {
            env.storage()
                .persistent()
                .extend_ttl(&key, BALANCE_LIFETIME_THRESHOLD, BALANCE_BUMP_AMOUNT);
            balance
        }
        None => 0,
    }
}

fn write_balance(env: &Env, id: &Address, amount: i128) {
    let key = DataKey::Balance(id.clone());
    env.storage().persistent().set(&key, &amount);
    env.storage()
        .persistent()
        .extend_ttl(&key, BALANCE_LIFETIME_THRESHOLD, BALANCE_BUMP_AMOUNT);
}

fn spend_balance(env: &Env, id: &Address, amount: i128) {
    let balance = read_balance(env, id);
    if balance < amount {
        panic_with_error!(env, ClaimError::InsufficientBalance);
    }
    write_balance(env, id, balance - amount);
}

fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}
