//! Reward accrual math.
//!
//! Simple (non-compounding) interest over elapsed seconds:
//!
//! ```text
//! reward = principal * rate_bps * elapsed / (10_000 * SECONDS_PER_YEAR)
//! ```
//!
//! Everything is widened to `u128` before multiplying and the division
//! truncates, so fractions of the smallest token unit are dropped and never
//! rounded up. With `u64` principal, a rate up to `MAX_ANNUAL_RATE_BPS` and
//! centuries of elapsed time the product stays far below `u128::MAX`; the
//! checked operations still report `ArithmeticOverflow` instead of wrapping,
//! and so does a result that no longer fits the token's `u64` amounts.

use anchor_lang::prelude::*;

use crate::constants::{BASIS_POINTS_DENOMINATOR, SECONDS_PER_YEAR};
use crate::error::StakingError;

/// Reward earned by `principal` at `rate_bps` per year over `elapsed_seconds`.
pub fn accrue(principal: u64, rate_bps: u32, elapsed_seconds: u64) -> Result<u64> {
    if principal == 0 || rate_bps == 0 || elapsed_seconds == 0 {
        return Ok(0);
    }

    let denominator = (BASIS_POINTS_DENOMINATOR as u128)
        .checked_mul(SECONDS_PER_YEAR as u128)
        .ok_or(StakingError::ArithmeticOverflow)?;

    let reward = (principal as u128)
        .checked_mul(rate_bps as u128)
        .ok_or(StakingError::ArithmeticOverflow)?
        .checked_mul(elapsed_seconds as u128)
        .ok_or(StakingError::ArithmeticOverflow)?
        .checked_div(denominator)
        .ok_or(StakingError::ArithmeticOverflow)?;

    u64::try_from(reward).map_err(|_| error!(StakingError::ArithmeticOverflow))
}

/// Seconds between `checkpoint` and `now`.
///
/// Time only moves forward: a `now` earlier than the checkpoint is a
/// precondition violation, not a zero-length window.
pub fn elapsed_since(checkpoint: i64, now: i64) -> Result<u64> {
    let delta = now
        .checked_sub(checkpoint)
        .ok_or(StakingError::ArithmeticOverflow)?;
    require!(delta >= 0, StakingError::ClockWentBackwards);
    Ok(delta as u64)
}
