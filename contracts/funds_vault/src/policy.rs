use crate::error::VaultError;

/// Yield Claim minted per unit of principal, in basis points (10%).
pub const YIELD_RATE_BPS: i128 = 1_000;
pub const BPS_DENOMINATOR: i128 = 10_000;

/// Longest accepted lock: 10 years in seconds.
pub const MAX_LOCK_DURATION: u64 = 315_360_000;

/// Lifetime of allowances the vault grants to the market and treasury.
/// They are spent within the same invocation.
pub const APPROVAL_LEDGERS: u32 = 100;

pub fn yield_claim_for(amount: i128) -> Result<i128, VaultError> {
    amount
        .checked_mul(YIELD_RATE_BPS)
        .map(|v| v / BPS_DENOMINATOR)
        .ok_or(VaultError::ArithmeticOverflow)
}

/// Yield sitting in the market above the principal the vault placed there.
/// A market reporting less than placed principal yields nothing.
pub fn accrued_yield(market_balance: i128, market_principal: i128) -> i128 {
    market_balance.saturating_sub(market_principal).max(0)
}

pub fn apy_percent(apy_bps: u32) -> u32 {
    apy_bps / 100
}

pub fn check_lock_duration(lock_duration: u64) -> Result<(), VaultError> {
    if lock_duration > MAX_LOCK_DURATION {
        return Err(VaultError::InvalidLockDuration);
    }
    Ok(())
}
