//! Read-only instructions.
//!
//! Values are returned through Anchor return data; clients read them by
//! simulating the transaction. None of these handlers write to any account.

use anchor_lang::prelude::*;

use crate::constants::*;
use crate::instructions::claim_vested_rewards::load_stake_entries;
use crate::ledger;
use crate::registry;
use crate::state::{LedgerConfig, StakePool, UserStake};

#[derive(Accounts)]
#[instruction(pool_id: u64)]
pub struct GetPool<'info> {
    #[account(
        seeds = [LEDGER_SEED, ledger.staking_mint.as_ref()],
        bump = ledger.bump
    )]
    pub ledger: Account<'info, LedgerConfig>,

    /// CHECK: address pinned by seeds; loaded through `registry::load_pool`.
    #[account(
        seeds = [POOL_SEED, ledger.key().as_ref(), &pool_id.to_le_bytes()],
        bump
    )]
    pub pool: UncheckedAccount<'info>,
}

#[derive(Accounts)]
#[instruction(pool_id: u64, user: Pubkey)]
pub struct PendingRewards<'info> {
    #[account(
        seeds = [LEDGER_SEED, ledger.staking_mint.as_ref()],
        bump = ledger.bump
    )]
    pub ledger: Account<'info, LedgerConfig>,

    /// CHECK: address pinned by seeds; loaded through `registry::load_pool`.
    #[account(
        seeds = [POOL_SEED, ledger.key().as_ref(), &pool_id.to_le_bytes()],
        bump
    )]
    pub pool: UncheckedAccount<'info>,

    /// CHECK: address pinned by seeds; may not exist yet if `user` never
    /// staked in this pool.
    #[account(
        seeds = [USER_STAKE_SEED, pool.key().as_ref(), user.as_ref()],
        bump
    )]
    pub user_stake: UncheckedAccount<'info>,
}

#[derive(Accounts)]
pub struct ClaimableRewards<'info> {
    #[account(
        seeds = [LEDGER_SEED, ledger.staking_mint.as_ref()],
        bump = ledger.bump
    )]
    pub ledger: Account<'info, LedgerConfig>,
}

/// Look up a pool by id.
pub fn get_pool_handler(ctx: Context<GetPool>, pool_id: u64) -> Result<StakePool> {
    let ledger_key = ctx.accounts.ledger.key();
    let pool = registry::load_pool(
        &ctx.accounts.pool.to_account_info(),
        &ctx.accounts.ledger,
        &ledger_key,
        pool_id,
    )?;
    Ok(pool.into_inner())
}

/// Reward `user` has earned in pool `pool_id`, vested or not.
pub fn pending_rewards_handler(
    ctx: Context<PendingRewards>,
    pool_id: u64,
    _user: Pubkey,
) -> Result<u64> {
    let now = Clock::get()?.unix_timestamp;
    let ledger_key = ctx.accounts.ledger.key();
    let pool = registry::load_pool(
        &ctx.accounts.pool.to_account_info(),
        &ctx.accounts.ledger,
        &ledger_key,
        pool_id,
    )?;

    let stake_info = ctx.accounts.user_stake.to_account_info();
    if stake_info.data_is_empty() {
        return Ok(0);
    }
    let record = Account::<UserStake>::try_from(&stake_info)?;

    let pending = ledger::pending_rewards(&pool, &record, now)?;
    msg!("Pending rewards in pool {}: {}", pool_id, pending);
    Ok(pending)
}

/// Reward `user` could claim right now across the supplied
/// `(pool, user_stake)` pairs.
pub fn claimable_rewards_handler<'info>(
    ctx: Context<'_, '_, 'info, 'info, ClaimableRewards<'info>>,
    user: Pubkey,
) -> Result<u64> {
    let now = Clock::get()?.unix_timestamp;
    let ledger_key = ctx.accounts.ledger.key();

    let loaded = load_stake_entries(ctx.remaining_accounts, &ledger_key, &user, false)?;
    let entries: Vec<(&StakePool, &UserStake)> = loaded
        .iter()
        .map(|(pool, record)| (&**pool, &**record))
        .collect();

    let claimable = ledger::claimable_rewards(&entries, now)?;
    msg!("Claimable rewards across {} pools: {}", entries.len(), claimable);
    Ok(claimable)
}
