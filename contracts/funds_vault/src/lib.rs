#![no_std]
use soroban_sdk::{contract, contractimpl, log, token, Address, Env};
use vault_interfaces::{ClaimLedgerClient, CreditKind, TreasuryClient, YieldMarketClient};

mod error;
mod events;
pub mod policy;
mod storage;

pub use error::VaultError;
pub use policy::{APPROVAL_LEDGERS, BPS_DENOMINATOR, MAX_LOCK_DURATION, YIELD_RATE_BPS};
pub use storage::{DataKey, InitialSetup, Position};

/// Time-locked custody vault.
///
/// A deposit opens a [`Position`], mints Principal Claim 1:1 and Yield Claim
/// at [`YIELD_RATE_BPS`], and places the principal in the yield market.
/// Principal comes back after the lock through `withdraw_principal`, or goes
/// to the treasury through `claim_funds`. Market yield above placed principal
/// is swept to the treasury by `harvest_yield`. Yield Claim can be spent on a
/// merchant payment or exchanged for the asset, both paid from the vault's
/// reserve.
#[contract]
pub struct FundsVault;

#[contractimpl]
impl FundsVault {
    pub fn __constructor(env: Env, setup: InitialSetup) {
        storage::write_config(&env, &setup);
        storage::write_total_principal(&env, 0);
        storage::write_market_principal(&env, 0);
    }

    // -----------------------------------------------------------------------
    // Deposits and redemption
    // -----------------------------------------------------------------------

    /// Opens a position for `depositor`. The vault pulls `amount` against an
    /// allowance the depositor granted it beforehand.
    pub fn deposit(
        env: Env,
        depositor: Address,
        amount: i128,
        lock_duration: u64,
    ) -> Result<Position, VaultError> {
        depositor.require_auth();

        if amount <= 0 {
            return Err(VaultError::InvalidAmount);
        }
        policy::check_lock_duration(lock_duration)?;
        if storage::read_position(&env, &depositor).is_some() {
            return Err(VaultError::PositionAlreadyOpen);
        }

        let config = storage::read_config(&env);
        let yield_claim = policy::yield_claim_for(amount)?;
        let position = Position {
            principal_amount: amount,
            deposit_timestamp: env.ledger().timestamp(),
            lock_duration,
        };

        storage::write_position(&env, &depositor, &position);
        storage::write_total_principal(&env, add(storage::read_total_principal(&env), amount)?);
        storage::write_market_principal(&env, add(storage::read_market_principal(&env), amount)?);
        storage::bump_instance(&env);

        ClaimLedgerClient::new(&env, &config.principal_claim).mint(&depositor, &amount);
        // Dust deposits round down to no Yield Claim at all.
        if yield_claim > 0 {
            ClaimLedgerClient::new(&env, &config.yield_claim).mint(&depositor, &yield_claim);
        }

        pull(&env, &config, &depositor, amount)?;
        place_in_market(&env, &config, amount)?;

        events::deposit(&env, &depositor, amount, yield_claim, lock_duration);
        Ok(position)
    }

    /// Burns `claim_amount` of the holder's Principal Claim and pays the same
    /// amount of principal back. Returns the amount paid.
    pub fn withdraw_principal(
        env: Env,
        holder: Address,
        claim_amount: i128,
    ) -> Result<i128, VaultError> {
        holder.require_auth();

        let mut position =
            storage::read_position(&env, &holder).ok_or(VaultError::NoOpenPosition)?;

        let now = env.ledger().timestamp();
        let unlock = position.unlock_time()?;
        if now < unlock {
            log!(&env, "principal locked until {}, now {}", unlock, now);
            return Err(VaultError::LockNotElapsed);
        }

        if claim_amount <= 0 {
            return Err(VaultError::InvalidAmount);
        }
        let config = storage::read_config(&env);
        let principal_claim = ClaimLedgerClient::new(&env, &config.principal_claim);
        if claim_amount > position.principal_amount || claim_amount > principal_claim.balance(&holder)
        {
            return Err(VaultError::InsufficientClaim);
        }

        position.principal_amount -= claim_amount;
        let closed = position.principal_amount == 0;
        storage::write_position(&env, &holder, &position);
        storage::write_total_principal(&env, storage::read_total_principal(&env) - claim_amount);
        storage::write_market_principal(&env, storage::read_market_principal(&env) - claim_amount);
        storage::bump_instance(&env);

        principal_claim.burn(&holder, &claim_amount);

        take_from_market(&env, &config, claim_amount)?;
        push(&env, &config, &holder, claim_amount)?;

        events::withdraw(&env, &holder, claim_amount, closed);
        Ok(claim_amount)
    }

    /// Sweeps market yield above placed principal to the treasury. Anyone
    /// may call it. Returns the amount swept.
    pub fn harvest_yield(env: Env) -> Result<i128, VaultError> {
        let config = storage::read_config(&env);

        let accrued = Self::accrued_yield(env.clone());
        if accrued == 0 {
            log!(&env, "nothing to harvest");
            return Err(VaultError::NoYieldAvailable);
        }

        take_from_market(&env, &config, accrued)?;
        credit_treasury(&env, &config, accrued, CreditKind::Harvest)?;

        events::harvest(&env, accrued);
        Ok(accrued)
    }

    /// Early exit: closes the depositor's position before (or after) the
    /// lock and forfeits its principal to the treasury.
    ///
    /// Callable by the depositor or the owner. The depositor must still hold
    /// Principal Claim covering the whole position; the Yield Claim stays
    /// with them. Returns the amount routed to the treasury.
    pub fn claim_funds(env: Env, caller: Address, depositor: Address) -> Result<i128, VaultError> {
        caller.require_auth();

        let config = storage::read_config(&env);
        if caller != depositor && caller != config.owner {
            log!(&env, "early claim refused for {}", caller);
            return Err(VaultError::Unauthorized);
        }

        let position =
            storage::read_position(&env, &depositor).ok_or(VaultError::NoOpenPosition)?;
        let principal = position.principal_amount;

        let principal_claim = ClaimLedgerClient::new(&env, &config.principal_claim);
        if principal_claim.balance(&depositor) < principal {
            return Err(VaultError::InsufficientClaim);
        }

        storage::remove_position(&env, &depositor);
        storage::write_total_principal(&env, storage::read_total_principal(&env) - principal);
        storage::write_market_principal(&env, storage::read_market_principal(&env) - principal);
        storage::bump_instance(&env);

        principal_claim.burn(&depositor, &principal);

        take_from_market(&env, &config, principal)?;
        credit_treasury(&env, &config, principal, CreditKind::EarlyExit)?;

        events::early_claim(&env, &caller, &depositor, principal);
        Ok(principal)
    }

    // -----------------------------------------------------------------------
    // Yield Claim spending
    // -----------------------------------------------------------------------

    /// Burns `amount` of the payer's Yield Claim and pays the merchant the
    /// same amount of the asset out of the vault's reserve.
    pub fn pay_merchant(
        env: Env,
        payer: Address,
        amount: i128,
        merchant: Address,
    ) -> Result<(), VaultError> {
        payer.require_auth();

        if amount <= 0 {
            return Err(VaultError::InvalidAmount);
        }
        let config = storage::read_config(&env);
        let yield_claim = ClaimLedgerClient::new(&env, &config.yield_claim);
        let backing = yield_claim.balance(&payer);
        if amount > backing {
            log!(&env, "payment {} above yield claim {}", amount, backing);
            return Err(VaultError::InsufficientFunds);
        }

        yield_claim.burn(&payer, &amount);
        push(&env, &config, &merchant, amount)?;

        events::pay(&env, &payer, &merchant, amount);
        Ok(())
    }

    /// Exchanges Yield Claim 1:1 for `target_asset`, which must be the
    /// accounted asset. Returns the amount credited.
    pub fn sell_yield_tokens_for_tokens(
        env: Env,
        seller: Address,
        amount: i128,
        target_asset: Address,
    ) -> Result<i128, VaultError> {
        seller.require_auth();

        if amount <= 0 {
            return Err(VaultError::InvalidAmount);
        }
        let config = storage::read_config(&env);
        if target_asset != config.asset {
            return Err(VaultError::UnsupportedAsset);
        }
        let yield_claim = ClaimLedgerClient::new(&env, &config.yield_claim);
        if amount > yield_claim.balance(&seller) {
            return Err(VaultError::InsufficientClaim);
        }

        yield_claim.burn(&seller, &amount);
        push(&env, &config, &seller, amount)?;

        events::sell(&env, &seller, &target_asset, amount);
        Ok(amount)
    }

    /// Owner top-up of the reserve that backs payments and exchanges.
    pub fn deposit_initial_funds(env: Env, amount: i128) -> Result<(), VaultError> {
        let config = storage::read_config(&env);
        config.owner.require_auth();

        if amount <= 0 {
            return Err(VaultError::InvalidAmount);
        }
        pull(&env, &config, &config.owner, amount)?;

        events::fund(&env, &config.owner, amount);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Views
    // -----------------------------------------------------------------------

    /// `(yield_claim, principal_claim)` balances of `id`.
    pub fn get_holdings(env: Env, id: Address) -> (i128, i128) {
        let config = storage::read_config(&env);
        (
            ClaimLedgerClient::new(&env, &config.yield_claim).balance(&id),
            ClaimLedgerClient::new(&env, &config.principal_claim).balance(&id),
        )
    }

    pub fn get_lock_period(env: Env, id: Address) -> Result<u64, VaultError> {
        storage::read_position(&env, &id)
            .map(|p| p.lock_duration)
            .ok_or(VaultError::NoOpenPosition)
    }

    /// Market APY in whole percent.
    pub fn get_current_apy(env: Env) -> u32 {
        let config = storage::read_config(&env);
        policy::apy_percent(YieldMarketClient::new(&env, &config.market).apy_bps())
    }

    pub fn get_position(env: Env, id: Address) -> Option<Position> {
        storage::read_position(&env, &id)
    }

    pub fn unlock_time(env: Env, id: Address) -> Result<u64, VaultError> {
        storage::read_position(&env, &id)
            .ok_or(VaultError::NoOpenPosition)?
            .unlock_time()
    }

    pub fn accrued_yield(env: Env) -> i128 {
        let config = storage::read_config(&env);
        let in_market = YieldMarketClient::new(&env, &config.market)
            .balance(&env.current_contract_address());
        policy::accrued_yield(in_market, storage::read_market_principal(&env))
    }

    /// Asset held by the vault itself, available for payments and exchanges.
    pub fn reserves(env: Env) -> i128 {
        let config = storage::read_config(&env);
        token::Client::new(&env, &config.asset).balance(&env.current_contract_address())
    }

    pub fn total_principal(env: Env) -> i128 {
        storage::read_total_principal(&env)
    }

    // Principal Claim supply must equal the principal of all open positions.
    pub fn check_backing_invariant(env: Env) -> bool {
        let config = storage::read_config(&env);
        ClaimLedgerClient::new(&env, &config.principal_claim).total_supply()
            == storage::read_total_principal(&env)
    }

    pub fn get_config(env: Env) -> InitialSetup {
        storage::read_config(&env)
    }
}

// ---------------------------------------------------------------------------
// Asset moves
// ---------------------------------------------------------------------------

fn add(a: i128, b: i128) -> Result<i128, VaultError> {
    a.checked_add(b).ok_or(VaultError::ArithmeticOverflow)
}

/// Collapses a `try_*` client outcome: any failure of the callee, or a
/// return value that does not decode, is a rejected transfer.
fn settled<T, C, E>(outcome: Result<Result<T, C>, E>) -> Result<T, VaultError> {
    match outcome {
        Ok(Ok(value)) => Ok(value),
        _ => Err(VaultError::TransferFailed),
    }
}

fn pull(env: &Env, config: &InitialSetup, from: &Address, amount: i128) -> Result<(), VaultError> {
    let vault = env.current_contract_address();
    settled(token::Client::new(env, &config.asset).try_transfer_from(&vault, from, &vault, &amount))
}

fn push(env: &Env, config: &InitialSetup, to: &Address, amount: i128) -> Result<(), VaultError> {
    let vault = env.current_contract_address();
    settled(token::Client::new(env, &config.asset).try_transfer(&vault, to, &amount))
}

/// Lets `spender` pull exactly `amount` from the vault.
fn approve(env: &Env, config: &InitialSetup, spender: &Address, amount: i128) -> Result<(), VaultError> {
    let vault = env.current_contract_address();
    let expiration = env.ledger().sequence() + APPROVAL_LEDGERS;
    settled(token::Client::new(env, &config.asset).try_approve(&vault, spender, &amount, &expiration))
}

fn place_in_market(env: &Env, config: &InitialSetup, amount: i128) -> Result<(), VaultError> {
    approve(env, config, &config.market, amount)?;
    settled(
        YieldMarketClient::new(env, &config.market)
            .try_deposit(&env.current_contract_address(), &amount),
    )
}

fn take_from_market(env: &Env, config: &InitialSetup, amount: i128) -> Result<(), VaultError> {
    settled(
        YieldMarketClient::new(env, &config.market)
            .try_withdraw(&env.current_contract_address(), &amount),
    )
}

fn credit_treasury(
    env: &Env,
    config: &InitialSetup,
    amount: i128,
    kind: CreditKind,
) -> Result<(), VaultError> {
    approve(env, config, &config.treasury, amount)?;
    settled(
        TreasuryClient::new(env, &config.treasury)
            .try_credit(&env.current_contract_address(), &amount, &kind),
    )
}
