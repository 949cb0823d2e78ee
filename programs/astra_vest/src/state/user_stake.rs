use anchor_lang::prelude::*;

use crate::error::StakingError;
use crate::math::{accrue, elapsed_since};

/// Stake record for one user in one pool.
///
/// `principal` is always the measured amount the vault received, never the
/// amount the user asked to deposit. A record whose principal reached zero
/// is kept as a tombstone so unvested reward stays claimable and a later
/// re-stake continues from the same checkpoint.
#[account]
#[derive(Default, Debug)]
pub struct UserStake {
    pub owner: Pubkey,
    pub pool: Pubkey,

    pub principal: u64,
    pub accrued_unvested: u64,
    pub total_rewards_claimed: u64,

    pub last_accrual_checkpoint: i64,
    pub vesting_unlock_at: i64,

    pub bump: u8,
}

impl UserStake {
    pub const LEN: usize = 8 + 32 + 32 + 8 + 8 + 8 + 8 + 8 + 1;

    pub fn is_initialized(&self) -> bool {
        self.owner != Pubkey::default()
    }

    /// Reward earned since the last checkpoint at the pool's rate.
    pub fn accrued_since_checkpoint(&self, rate_bps: u32, now: i64) -> Result<u64> {
        let elapsed = elapsed_since(self.last_accrual_checkpoint, now)?;
        accrue(self.principal, rate_bps, elapsed)
    }

    /// Unvested balance as it would read after settling at `now`.
    pub fn projected_unvested(&self, rate_bps: u32, now: i64) -> Result<u64> {
        let fresh = self.accrued_since_checkpoint(rate_bps, now)?;
        self.accrued_unvested
            .checked_add(fresh)
            .ok_or_else(|| error!(StakingError::ArithmeticOverflow))
    }

    pub fn is_vested(&self, now: i64) -> bool {
        self.vesting_unlock_at <= now
    }

    pub fn is_empty(&self) -> bool {
        self.principal == 0 && self.accrued_unvested == 0
    }
}
