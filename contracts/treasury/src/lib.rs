#![no_std]
use soroban_sdk::{
    contract, contracterror, contractimpl, contracttype, panic_with_error, symbol_short, token,
    Address, Env, Symbol,
};
use vault_interfaces::{CreditKind, TreasuryInterface};

// ---------------------------------------------------------------------------
// Storage key symbols
// ---------------------------------------------------------------------------
const ADMIN: Symbol   = symbol_short!("ADMIN");
const ASSET: Symbol   = symbol_short!("ASSET");
const VAULT: Symbol   = symbol_short!("VAULT");
const BALANCE: Symbol = symbol_short!("BALANCE");

const DAY_IN_LEDGERS: u32 = 17_280;
const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = INSTANCE_BUMP_AMOUNT - DAY_IN_LEDGERS;

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// Lifetime amount credited per inflow kind.
    Credited(CreditKind),
}

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum TreasuryError {
    VaultAlreadySet = 1,
    VaultNotSet = 2,
    Unauthorized = 3,
    InvalidAmount = 4,
    InsufficientBalance = 5,
    Overflow = 6,
}

/// Holds harvested yield and forfeited early-exit principal.
///
/// Only the wired vault may credit it; only the admin may take funds out.
#[contract]
pub struct Treasury;

#[contractimpl]
impl Treasury {
    pub fn __constructor(env: Env, admin: Address, asset: Address) {
        env.storage().instance().set(&ADMIN, &admin);
        env.storage().instance().set(&ASSET, &asset);
        env.storage().instance().set(&BALANCE, &0_i128);
    }

    pub fn set_vault(env: Env, vault: Address) {
        let admin = Self::admin(env.clone());
        admin.require_auth();

        if env.storage().instance().has(&VAULT) {
            panic_with_error!(&env, TreasuryError::VaultAlreadySet);
        }

        env.storage().instance().set(&VAULT, &vault);
        bump_instance(&env);

        env.events().publish((symbol_short!("set_vault"), admin), vault);
    }

    /// Admin withdrawal path. Returns the remaining booked balance.
    pub fn withdraw(env: Env, to: Address, amount: i128) -> i128 {
        let admin = Self::admin(env.clone());
        admin.require_auth();

        if amount <= 0 {
            panic_with_error!(&env, TreasuryError::InvalidAmount);
        }

        let balance = read_balance(&env);
        if amount > balance {
            panic_with_error!(&env, TreasuryError::InsufficientBalance);
        }

        let remaining = balance - amount;
        env.storage().instance().set(&BALANCE, &remaining);
        bump_instance(&env);

        token::Client::new(&env, &Self::asset(env.clone())).transfer(
            &env.current_contract_address(),
            &to,
            &amount,
        );

        env.events().publish((symbol_short!("withdraw"), admin, to), amount);

        remaining
    }

    pub fn total_credited(env: Env, kind: CreditKind) -> i128 {
        env.storage()
            .instance()
            .get(&DataKey::Credited(kind))
            .unwrap_or(0)
    }

    pub fn admin(env: Env) -> Address {
        env.storage().instance().get(&ADMIN).unwrap()
    }

    pub fn asset(env: Env) -> Address {
        env.storage().instance().get(&ASSET).unwrap()
    }

    pub fn vault(env: Env) -> Option<Address> {
        env.storage().instance().get(&VAULT)
    }
}

#[contractimpl]
impl TreasuryInterface for Treasury {
    fn credit(env: Env, from: Address, amount: i128, kind: CreditKind) {
        from.require_auth();

        let vault: Address = env
            .storage()
            .instance()
            .get(&VAULT)
            .unwrap_or_else(|| panic_with_error!(&env, TreasuryError::VaultNotSet));
        if from != vault {
            panic_with_error!(&env, TreasuryError::Unauthorized);
        }
        if amount <= 0 {
            panic_with_error!(&env, TreasuryError::InvalidAmount);
        }

        let balance = checked(&env, read_balance(&env).checked_add(amount));
        env.storage().instance().set(&BALANCE, &balance);

        let key = DataKey::Credited(kind);
        let credited: i128 = env.storage().instance().get(&key).unwrap_or(0);
        env.storage()
            .instance()
            .set(&key, &checked(&env, credited.checked_add(amount)));
        bump_instance(&env);

        // The vault approved exactly `amount` for this pull.
        let treasury = env.current_contract_address();
        token::Client::new(&env, &Self::asset(env.clone()))
            .transfer_from(&treasury, &from, &treasury, &amount);

        env.events().publish((symbol_short!("credit"), from, kind), amount);
    }

    fn balance(env: Env) -> i128 {
        read_balance(&env)
    }
}

fn read_balance(env: &Env) -> i128 {
    env.storage().instance().get(&BALANCE).unwrap_or(0)
}

fn checked(env: &Env, value: Option<i128>) -> i128 {
    value.unwrap_or_else(|| panic_with_error!(env, TreasuryError::Overflow))
}

fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

#[cfg(test)]
mod test;
