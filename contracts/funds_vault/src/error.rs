use soroban_sdk::contracterror;

/// Stable error codes returned by every vault entry point.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum VaultError {
    /// Principal redemption before `deposit_timestamp + lock_duration`.
    LockNotElapsed = 1,
    /// Harvest with nothing accrued above placed principal.
    NoYieldAvailable = 2,
    /// Redeem or exchange amount above the held claim or remaining principal.
    InsufficientClaim = 3,
    /// Merchant payment above the payer's Yield Claim balance.
    InsufficientFunds = 4,
    NoOpenPosition = 5,
    /// The asset ledger, market or treasury rejected a move.
    TransferFailed = 6,
    InvalidAmount = 7,
    PositionAlreadyOpen = 8,
    InvalidLockDuration = 9,
    Unauthorized = 10,
    UnsupportedAsset = 11,
    ArithmeticOverflow = 12,
}
