//! Error types for the AstraVest staking ledger.
//!
//! Every error leaves ledger state unchanged: instructions validate and
//! compute before writing, and a failing instruction reverts all of its
//! account writes and token transfers.

use anchor_lang::prelude::*;

/// Custom error codes for the AstraVest program.
///
/// Error codes start at 6000 (Anchor's custom error offset).
#[error_code]
pub enum StakingError {
    // ========== Input Validation Errors ==========

    /// [6000] Cannot stake, unstake or fund with zero amount.
    #[msg("Amount must be greater than zero")]
    ZeroAmount,

    /// [6001] Pool rate is above the policy ceiling.
    #[msg("Annual rate exceeds the maximum of 100000 basis points (1000%)")]
    InvalidRate,

    /// [6002] New authority must be a real key.
    #[msg("New authority cannot be the default pubkey")]
    InvalidAuthority,

    // ========== State/Balance Errors ==========

    /// [6003] No pool has been registered under this id.
    #[msg("Pool not found")]
    PoolNotFound,

    /// [6004] Unstake amount is larger than the recorded principal.
    #[msg("Insufficient staked principal for this operation")]
    InsufficientStake,

    /// [6005] Nothing has passed its vesting lock.
    #[msg("No vested rewards available to claim")]
    NoClaimableRewards,

    /// [6006] Paying the reward would dip into staked principal.
    #[msg("Reward reserve in the vault cannot cover this payout")]
    InsufficientRewardReserve,

    /// [6007] Token CPI failed or moved a non-positive/unexpected amount.
    #[msg("Token transfer failed or moved an unexpected amount")]
    TransferFailed,

    // ========== Time Errors ==========

    /// [6008] Current time is earlier than the record's checkpoint.
    #[msg("Clock is behind the last accrual checkpoint")]
    ClockWentBackwards,

    // ========== Math/Overflow Errors ==========

    /// [6009] Accrual or balance arithmetic left the safe integer range.
    #[msg("Arithmetic overflow occurred during calculation")]
    ArithmeticOverflow,

    // ========== Authorization Errors ==========

    /// [6010] Caller is not the ledger authority.
    #[msg("Unauthorized: caller is not the ledger authority")]
    Unauthorized,

    // ========== Account Validation Errors ==========

    /// [6011] Token mint does not match the ledger's staking mint.
    #[msg("Token mint mismatch - wrong token for this ledger")]
    MintMismatch,

    /// [6012] Vault account does not match the ledger's vault.
    #[msg("Vault address mismatch")]
    VaultMismatch,

    /// [6013] Pool does not belong to this ledger.
    #[msg("Stake pool does not belong to this ledger")]
    PoolMismatch,

    /// [6014] Stake account is not the (pool, user) record it claims to be.
    #[msg("User stake account does not match the pool or owner")]
    StakeAccountMismatch,

    /// [6015] The same stake record was supplied twice.
    #[msg("Stake account supplied more than once")]
    DuplicateStakeAccount,
}
