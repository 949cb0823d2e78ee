//! Program constants for the AstraVest staking ledger.
//!
//! PDA seeds, time periods and the reward-rate policy bounds used by
//! the accrual engine and the pool registry.

use anchor_lang::prelude::*;

/// Seed for deriving the ledger config PDA
#[constant]
pub const LEDGER_SEED: &[u8] = b"ledger";

/// Seed for deriving stake pool PDAs (`["pool", ledger, id_le_bytes]`)
#[constant]
pub const POOL_SEED: &[u8] = b"pool";

/// Seed for deriving user stake PDAs (`["user_stake", pool, owner]`)
#[constant]
pub const USER_STAKE_SEED: &[u8] = b"user_stake";

/// Number of seconds in a day
pub const SECONDS_PER_DAY: i64 = 86_400;

/// Number of seconds in a year (365 days)
pub const SECONDS_PER_YEAR: u64 = 365 * 86_400;

/// Lock applied to accrued reward after every principal change (180 days)
#[constant]
pub const VESTING_DURATION: i64 = 180 * SECONDS_PER_DAY;

/// Basis points denominator (100% = 10000 basis points)
pub const BASIS_POINTS_DENOMINATOR: u64 = 10_000;

/// Highest annual rate a pool may be created with (1000% = 100000 basis points)
#[constant]
pub const MAX_ANNUAL_RATE_BPS: u32 = 100_000;
