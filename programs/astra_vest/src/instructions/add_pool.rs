//! Add pool instruction handler.

use anchor_lang::prelude::*;

use crate::constants::*;
use crate::events::PoolAdded;
use crate::registry;
use crate::state::{LedgerConfig, StakePool};

#[derive(Accounts)]
pub struct AddPool<'info> {
    /// Must be the ledger authority; checked by `registry::register_pool`.
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [LEDGER_SEED, ledger.staking_mint.as_ref()],
        bump = ledger.bump
    )]
    pub ledger: Account<'info, LedgerConfig>,

    /// Next pool in the sequence. The id is the current `pool_count`.
    #[account(
        init,
        payer = authority,
        space = StakePool::LEN,
        seeds = [POOL_SEED, ledger.key().as_ref(), &ledger.pool_count.to_le_bytes()],
        bump
    )]
    pub pool: Account<'info, StakePool>,

    pub system_program: Program<'info, System>,
}

/// Create a pool paying `annual_rate_bps` per year. Returns the new pool id.
pub fn handler(ctx: Context<AddPool>, annual_rate_bps: u32) -> Result<u64> {
    let clock = Clock::get()?;
    let ledger_key = ctx.accounts.ledger.key();
    let pool_key = ctx.accounts.pool.key();
    let caller = ctx.accounts.authority.key();

    let pool_id = registry::register_pool(
        &mut ctx.accounts.ledger,
        ledger_key,
        &mut ctx.accounts.pool,
        &caller,
        annual_rate_bps,
        ctx.bumps.pool,
        clock.unix_timestamp,
    )?;

    msg!("Pool {} added at {}bp per year", pool_id, annual_rate_bps);
    msg!("Pools registered: {}", ctx.accounts.ledger.pool_count);

    emit!(PoolAdded {
        pool: pool_key,
        pool_id,
        annual_rate_bps,
    });

    Ok(pool_id)
}
