#![no_std]
use soroban_sdk::{
    contract, contracterror, contractimpl, contracttype, panic_with_error, symbol_short, token,
    Address, Env, Symbol,
};
use vault_interfaces::YieldMarketInterface;

const ASSET: Symbol = symbol_short!("ASSET");
const APY_BPS: Symbol = symbol_short!("APY_BPS");

pub const BPS_DENOMINATOR: i128 = 10_000;
pub const SECONDS_PER_YEAR: i128 = 31_536_000;

const DAY_IN_LEDGERS: u32 = 17_280;
const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = INSTANCE_BUMP_AMOUNT - DAY_IN_LEDGERS;
const ACCOUNT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const ACCOUNT_LIFETIME_THRESHOLD: u32 = ACCOUNT_BUMP_AMOUNT - DAY_IN_LEDGERS;

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Account(Address),
}

/// A depositor's balance in the market, settled up to `last_accrual`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MarketAccount {
    pub balance: i128,
    pub last_accrual: u64,
}

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum MarketError {
    InvalidAmount = 1,
    InsufficientBalance = 2,
    Overflow = 3,
}

/// Simulated lending market: deposits earn simple interest at a fixed APY,
/// settled whenever the account is touched.
///
/// Yield is paid out of the market's own asset holdings, so the market has
/// to be funded with reserves beyond what depositors put in.
#[contract]
pub struct SimulatedYieldMarket;

#[contractimpl]
impl SimulatedYieldMarket {
    pub fn __constructor(env: Env, asset: Address, apy_bps: u32) {
        env.storage().instance().set(&ASSET, &asset);
        env.storage().instance().set(&APY_BPS, &apy_bps);
    }

    pub fn asset(env: Env) -> Address {
        env.storage().instance().get(&ASSET).unwrap()
    }

    pub fn account(env: Env, id: Address) -> Option<MarketAccount> {
        env.storage().persistent().get(&DataKey::Account(id))
    }
}

#[contractimpl]
impl YieldMarketInterface for SimulatedYieldMarket {
    fn deposit(env: Env, from: Address, amount: i128) {
        from.require_auth();
        if amount <= 0 {
            panic_with_error!(&env, MarketError::InvalidAmount);
        }

        let mut account = settled_account(&env, &from);
        account.balance = checked(&env, account.balance.checked_add(amount));
        write_account(&env, &from, &account);

        let market = env.current_contract_address();
        token::Client::new(&env, &SimulatedYieldMarket::asset(env.clone()))
            .transfer_from(&market, &from, &market, &amount);

        env.events().publish((symbol_short!("deposit"), from), amount);
    }

    fn withdraw(env: Env, to: Address, amount: i128) {
        to.require_auth();
        if amount <= 0 {
            panic_with_error!(&env, MarketError::InvalidAmount);
        }

        let mut account = settled_account(&env, &to);
        if amount > account.balance {
            panic_with_error!(&env, MarketError::InsufficientBalance);
        }
        account.balance -= amount;
        write_account(&env, &to, &account);

        token::Client::new(&env, &SimulatedYieldMarket::asset(env.clone())).transfer(
            &env.current_contract_address(),
            &to,
            &amount,
        );

        env.events().publish((symbol_short!("withdraw"), to), amount);
    }

    fn balance(env: Env, id: Address) -> i128 {
        match SimulatedYieldMarket::account(env.clone(), id) {
            Some(account) => {
                let now = env.ledger().timestamp();
                let interest = accrued(&env, &account, now);
                checked(&env, account.balance.checked_add(interest))
            }
            None => 0,
        }
    }

    fn apy_bps(env: Env) -> u32 {
        env.storage().instance().get(&APY_BPS).unwrap_or(0)
    }
}

// ---------------------------------------------------------------------------
// Accrual
// ---------------------------------------------------------------------------

/// Simple interest on `account.balance` from `last_accrual` to `now`,
/// rounded down.
fn accrued(env: &Env, account: &MarketAccount, now: u64) -> i128 {
    if now <= account.last_accrual || account.balance <= 0 {
        return 0;
    }
    let elapsed = (now - account.last_accrual) as i128;
    let apy_bps = SimulatedYieldMarket::apy_bps(env.clone()) as i128;

    let numerator = account
        .balance
        .checked_mul(apy_bps)
        .and_then(|v| v.checked_mul(elapsed));
    checked(env, numerator) / (BPS_DENOMINATOR * SECONDS_PER_YEAR)
}

fn settled_account(env: &Env, id: &Address) -> MarketAccount {
    let now = env.ledger().timestamp();
    match SimulatedYieldMarket::account(env.clone(), id.clone()) {
        Some(account) => {
            let interest = accrued(env, &account, now);
            MarketAccount {
                balance: checked(env, account.balance.checked_add(interest)),
                last_accrual: now,
            }
        }
        None => MarketAccount {
            balance: 0,
            last_accrual: now,
        },
    }
}

fn write_account(env: &Env, id: &Address, account: &MarketAccount) {
    let key = DataKey::Account(id.clone());
    env.storage().persistent().set(&key, account);
    env.storage()
        .persistent()
        .extend_ttl(&key, ACCOUNT_LIFETIME_THRESHOLD, ACCOUNT_BUMP_AMOUNT);
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

fn checked(env: &Env, value: Option<i128>) -> i128 {
    value.unwrap_or_else(|| panic_with_error!(env, MarketError::Overflow))
}
