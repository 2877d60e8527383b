use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::error::VaultError;

// ---------------------------------------------------------------------------
// Storage key symbols
// ---------------------------------------------------------------------------
const CONFIG: Symbol           = symbol_short!("CONFIG");
const TOTAL_PRINCIPAL: Symbol  = symbol_short!("TOT_PRIN");
const MARKET_PRINCIPAL: Symbol = symbol_short!("MKT_PRIN");

const DAY_IN_LEDGERS: u32 = 17_280;
const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = INSTANCE_BUMP_AMOUNT - DAY_IN_LEDGERS;
const POSITION_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const POSITION_LIFETIME_THRESHOLD: u32 = POSITION_BUMP_AMOUNT - DAY_IN_LEDGERS;
/// Expected ledger close time, used to turn a lock into a ledger count.
const LEDGER_SECONDS: u64 = 5;

/// Addresses wired at construction. Never changes afterwards.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitialSetup {
    pub owner: Address,
    pub asset: Address,
    pub market: Address,
    pub treasury: Address,
    pub principal_claim: Address,
    pub yield_claim: Address,
}

/// An open deposit. Removed from storage once its principal reaches zero.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Position {
    pub principal_amount: i128,
    pub deposit_timestamp: u64,
    pub lock_duration: u64,
}

impl Position {
    pub fn unlock_time(&self) -> Result<u64, VaultError> {
        self.deposit_timestamp
            .checked_add(self.lock_duration)
            .ok_or(VaultError::ArithmeticOverflow)
    }
}

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Position(Address),
}

pub fn write_config(env: &Env, setup: &InitialSetup) {
    env.storage().instance().set(&CONFIG, setup);
}

pub fn read_config(env: &Env) -> InitialSetup {
    env.storage().instance().get(&CONFIG).unwrap()
}

pub fn read_position(env: &Env, id: &Address) -> Option<Position> {
    let key = DataKey::Position(id.clone());
    let position = env.storage().persistent().get::<DataKey, Position>(&key);
    if position.is_some() {
        env.storage()
            .persistent()
            .extend_ttl(&key, POSITION_LIFETIME_THRESHOLD, POSITION_BUMP_AMOUNT);
    }
    position
}

/// Stores `position`, or drops the record when nothing is left in it.
pub fn write_position(env: &Env, id: &Address, position: &Position) {
    let key = DataKey::Position(id.clone());
    if position.principal_amount == 0 {
        env.storage().persistent().remove(&key);
        return;
    }
    env.storage().persistent().set(&key, position);
    let live_for = position_ttl(env, position);
    env.storage().persistent().extend_ttl(&key, live_for, live_for);
}

/// Ledgers a written position must stay live: until its unlock plus the
/// regular bump, capped at the network's maximum entry TTL.
pub fn position_ttl(env: &Env, position: &Position) -> u32 {
    let remaining = position
        .unlock_time()
        .unwrap_or(u64::MAX)
        .saturating_sub(env.ledger().timestamp());
    let lock_ledgers = u32::try_from(remaining / LEDGER_SECONDS).unwrap_or(u32::MAX);
    lock_ledgers
        .saturating_add(POSITION_BUMP_AMOUNT)
        .min(env.storage().max_ttl())
}

pub fn remove_position(env: &Env, id: &Address) {
    env.storage()
        .persistent()
        .remove(&DataKey::Position(id.clone()));
}

pub fn read_total_principal(env: &Env) -> i128 {
    env.storage().instance().get(&TOTAL_PRINCIPAL).unwrap_or(0)
}

pub fn write_total_principal(env: &Env, amount: i128) {
    env.storage().instance().set(&TOTAL_PRINCIPAL, &amount);
}

/// Principal the vault has placed in the market and not yet taken back.
pub fn read_market_principal(env: &Env) -> i128 {
    env.storage().instance().get(&MARKET_PRINCIPAL).unwrap_or(0)
}

pub fn write_market_principal(env: &Env, amount: i128) {
    env.storage().instance().set(&MARKET_PRINCIPAL, &amount);
}

pub fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}
