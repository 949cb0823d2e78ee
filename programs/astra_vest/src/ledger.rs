//! Stake ledger and vesting flows.
//!
//! These functions hold the accounting rules independent of how accounts
//! are loaded; instruction handlers pass in the deserialized accounts, the
//! clock and a [`TokenLink`]. Each flow validates and computes everything
//! first, then writes. Inbound transfers happen before the principal they
//! fund is credited; outbound transfers are the last step, after every
//! ledger write.
//!
//! A failing token transfer aborts the whole instruction, which reverts any
//! write made earlier in the same flow.

use anchor_lang::prelude::*;

use crate::constants::VESTING_DURATION;
use crate::error::StakingError;
use crate::state::{LedgerConfig, StakePool, UserStake};
use crate::token_link::TokenLink;

/// Settle accrual for `record` up to `now`.
///
/// Returns the unvested balance the record holds once the reward earned
/// since its checkpoint is folded in. Every stake, unstake and claim goes
/// through here exactly once, before principal changes.
pub fn settle(record: &UserStake, rate_bps: u32, now: i64) -> Result<u64> {
    record.projected_unvested(rate_bps, now)
}

fn unlock_time(now: i64) -> Result<i64> {
    now.checked_add(VESTING_DURATION)
        .ok_or_else(|| error!(StakingError::ArithmeticOverflow))
}

/// Deposit `requested` into `pool` for the record's owner.
///
/// Returns the credited principal, which is the vault's measured balance
/// change and may be below `requested` for fee-charging mints.
pub fn stake<L: TokenLink>(
    ledger: &mut LedgerConfig,
    pool: &mut StakePool,
    record: &mut UserStake,
    link: &mut L,
    requested: u64,
    now: i64,
) -> Result<u64> {
    require!(requested > 0, StakingError::ZeroAmount);

    let settled = settle(record, pool.annual_rate_bps, now)?;
    let vesting_unlock_at = unlock_time(now)?;

    let credited = link.pull_from(requested)?;

    let principal = record
        .principal
        .checked_add(credited)
        .ok_or(StakingError::ArithmeticOverflow)?;
    let pool_total = pool
        .total_principal
        .checked_add(credited)
        .ok_or(StakingError::ArithmeticOverflow)?;
    let ledger_total = ledger
        .total_principal
        .checked_add(credited)
        .ok_or(StakingError::ArithmeticOverflow)?;

    if record.principal == 0 {
        pool.staker_count = pool.staker_count.saturating_add(1);
    }

    record.accrued_unvested = settled;
    record.last_accrual_checkpoint = now;
    record.principal = principal;
    record.vesting_unlock_at = vesting_unlock_at;

    pool.total_principal = pool_total;
    ledger.total_principal = ledger_total;
    ledger.last_updated = now;

    msg!(
        "Staked {} (requested {}) in pool {}; principal {}, unvested {}",
        credited,
        requested,
        pool.id,
        record.principal,
        record.accrued_unvested
    );

    Ok(credited)
}

/// Withdraw `amount` of principal from `pool`.
///
/// The remaining unvested reward is re-locked for a full
/// `VESTING_DURATION`. Principal itself is never locked.
pub fn unstake<L: TokenLink>(
    ledger: &mut LedgerConfig,
    pool: &mut StakePool,
    record: &mut UserStake,
    link: &mut L,
    amount: u64,
    now: i64,
) -> Result<u64> {
    require!(amount > 0, StakingError::ZeroAmount);
    require!(amount <= record.principal, StakingError::InsufficientStake);

    let settled = settle(record, pool.annual_rate_bps, now)?;
    let vesting_unlock_at = unlock_time(now)?;

    let principal = record.principal - amount;
    let pool_total = pool
        .total_principal
        .checked_sub(amount)
        .ok_or(StakingError::ArithmeticOverflow)?;
    let ledger_total = ledger
        .total_principal
        .checked_sub(amount)
        .ok_or(StakingError::ArithmeticOverflow)?;

    if principal == 0 {
        pool.staker_count = pool.staker_count.saturating_sub(1);
    }

    record.accrued_unvested = settled;
    record.last_accrual_checkpoint = now;
    record.principal = principal;
    record.vesting_unlock_at = vesting_unlock_at;

    pool.total_principal = pool_total;
    ledger.total_principal = ledger_total;
    ledger.last_updated = now;

    msg!(
        "Unstaked {} from pool {}; principal {}, unvested {} locked until {}",
        amount,
        pool.id,
        record.principal,
        record.accrued_unvested,
        record.vesting_unlock_at
    );

    link.push_to(amount)
}

/// Reward earned in one pool so far, vested or not. Read-only.
pub fn pending_rewards(pool: &StakePool, record: &UserStake, now: i64) -> Result<u64> {
    settle(record, pool.annual_rate_bps, now)
}

/// Reward that `claim_vested` would pay at `now`, summed over `entries`.
///
/// Dry run of the claim: records still inside their vesting lock
/// contribute nothing.
pub fn claimable_rewards(entries: &[(&StakePool, &UserStake)], now: i64) -> Result<u64> {
    entries
        .iter()
        .filter(|(_, record)| record.is_vested(now))
        .try_fold(0u64, |total, (pool, record)| {
            let settled = settle(record, pool.annual_rate_bps, now)?;
            total
                .checked_add(settled)
                .ok_or_else(|| error!(StakingError::ArithmeticOverflow))
        })
}

/// Pay out every unlocked record in `entries`.
///
/// Unlocked records are settled, emptied and re-checkpointed; their unlock
/// time does not move. Locked records are left exactly as they were. The
/// payout comes from the vault's reward reserve and may never touch staked
/// principal.
pub fn claim_vested<L: TokenLink>(
    ledger: &mut LedgerConfig,
    entries: &mut [(&StakePool, &mut UserStake)],
    link: &mut L,
    now: i64,
) -> Result<u64> {
    let mut settlements = Vec::with_capacity(entries.len());
    let mut payout: u64 = 0;
    for (pool, record) in entries.iter() {
        if !record.is_vested(now) {
            settlements.push(None);
            continue;
        }
        let settled = settle(record, pool.annual_rate_bps, now)?;
        let claimed = record
            .total_rewards_claimed
            .checked_add(settled)
            .ok_or(StakingError::ArithmeticOverflow)?;
        payout = payout
            .checked_add(settled)
            .ok_or(StakingError::ArithmeticOverflow)?;
        settlements.push(Some(claimed));
    }

    require!(payout > 0, StakingError::NoClaimableRewards);

    let reserve = ledger.reward_reserve(link.vault_balance()?);
    if payout > reserve {
        msg!("Payout {} exceeds reward reserve {}", payout, reserve);
        return err!(StakingError::InsufficientRewardReserve);
    }
    let total_paid = ledger
        .total_rewards_paid
        .checked_add(payout)
        .ok_or(StakingError::ArithmeticOverflow)?;

    for ((_, record), claimed) in entries.iter_mut().zip(settlements) {
        if let Some(claimed) = claimed {
            record.accrued_unvested = 0;
            record.last_accrual_checkpoint = now;
            record.total_rewards_claimed = claimed;
        }
    }
    ledger.total_rewards_paid = total_paid;
    ledger.last_updated = now;

    msg!("Claimed {} vested reward", payout);

    link.push_to(payout)
}

/// Add reward reserve to the vault. Returns the measured amount received.
pub fn fund_rewards<L: TokenLink>(
    ledger: &mut LedgerConfig,
    link: &mut L,
    amount: u64,
    now: i64,
) -> Result<u64> {
    require!(amount > 0, StakingError::ZeroAmount);

    let credited = link.pull_from(amount)?;
    ledger.total_reward_funded = ledger
        .total_reward_funded
        .checked_add(credited)
        .ok_or(StakingError::ArithmeticOverflow)?;
    ledger.last_updated = now;

    msg!(
        "Reward reserve funded with {}; total funded {}",
        credited,
        ledger.total_reward_funded
    );

    Ok(credited)
}
