#![no_std]
//! Capability interfaces the funds vault is wired against.
//!
//! The vault only ever talks to its collaborators through the clients
//! generated here, so any contract implementing one of these traits (a
//! simulated market in tests, a real lending pool adapter in production)
//! can be plugged in at construction time.

use soroban_sdk::{contractclient, contracttype, Address, Env};

/// Which vault flow produced a treasury credit.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CreditKind {
    /// Yield realised from the market by `harvest_yield`.
    Harvest,
    /// Principal forfeited through an early claim.
    EarlyExit,
}

/// Principal Claim and Yield Claim ledgers.
///
/// `mint` and `burn` are reserved for the vault; holders can only move
/// balances with `transfer`.
#[contractclient(name = "ClaimLedgerClient")]
pub trait ClaimLedgerInterface {
    fn mint(env: Env, to: Address, amount: i128);
    fn burn(env: Env, from: Address, amount: i128);
    fn balance(env: Env, id: Address) -> i128;
    fn total_supply(env: Env) -> i128;
    fn transfer(env: Env, from: Address, to: Address, amount: i128);
    fn decimals(env: Env) -> u32;
}

/// Receiving account for harvested yield and early-exit proceeds.
#[contractclient(name = "TreasuryClient")]
pub trait TreasuryInterface {
    /// Pulls `amount` of the accounted asset from `from` (which must have
    /// approved the treasury) and books it under `kind`.
    fn credit(env: Env, from: Address, amount: i128, kind: CreditKind);
    fn balance(env: Env) -> i128;
}

/// External market that grows a deposited balance over time.
#[contractclient(name = "YieldMarketClient")]
pub trait YieldMarketInterface {
    /// Pulls `amount` from `from` against a prior allowance.
    fn deposit(env: Env, from: Address, amount: i128);
    /// Pays `amount` out of `to`'s market balance back to `to`.
    fn withdraw(env: Env, to: Address, amount: i128);
    /// Principal plus yield accrued up to the current ledger time.
    fn balance(env: Env, id: Address) -> i128;
    fn apy_bps(env: Env) -> u32;
}
