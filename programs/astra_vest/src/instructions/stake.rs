//! Stake instruction handler.
//!
//! Deposits tokens into a pool. The principal credited is what the vault
//! measurably received, not the requested amount.

use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use crate::constants::*;
use crate::error::StakingError;
use crate::events::Staked;
use crate::ledger;
use crate::registry;
use crate::state::{LedgerConfig, UserStake};
use crate::token_link::VaultLink;

/// Accounts required for staking.
#[derive(Accounts)]
#[instruction(pool_id: u64)]
pub struct Stake<'info> {
    /// The user staking tokens.
    #[account(mut)]
    pub user: Signer<'info>,

    #[account(
        mut,
        seeds = [LEDGER_SEED, ledger.staking_mint.as_ref()],
        bump = ledger.bump,
        has_one = vault @ StakingError::VaultMismatch,
        has_one = staking_mint @ StakingError::MintMismatch
    )]
    pub ledger: Box<Account<'info, LedgerConfig>>,

    /// CHECK: address pinned by seeds; contents loaded through
    /// `registry::load_pool`, which rejects unknown ids.
    #[account(
        mut,
        seeds = [POOL_SEED, ledger.key().as_ref(), &pool_id.to_le_bytes()],
        bump
    )]
    pub pool: UncheckedAccount<'info>,

    /// User's stake record in this pool (created on first stake).
    #[account(
        init_if_needed,
        payer = user,
        space = UserStake::LEN,
        seeds = [USER_STAKE_SEED, pool.key().as_ref(), user.key().as_ref()],
        bump
    )]
    pub user_stake: Box<Account<'info, UserStake>>,

    pub staking_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        mut,
        token::mint = staking_mint,
        token::authority = user,
        token::token_program = token_program
    )]
    pub user_token_account: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(mut)]
    pub vault: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,

    pub system_program: Program<'info, System>,
}

/// Stake `amount` into pool `pool_id`.
///
/// Order: settle accrual, pull tokens and measure, credit the measured
/// amount, restart the vesting clock.
pub fn handler(mut ctx: Context<Stake>, pool_id: u64, amount: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let user_stake_bump = ctx.bumps.user_stake;
    let accounts = &mut ctx.accounts;

    let ledger_key = accounts.ledger.key();
    let mut pool = registry::load_pool(
        &accounts.pool.to_account_info(),
        &accounts.ledger,
        &ledger_key,
        pool_id,
    )?;

    let user_key = accounts.user.key();
    if !accounts.user_stake.is_initialized() {
        let user_stake = &mut accounts.user_stake;
        user_stake.owner = user_key;
        user_stake.pool = pool.key();
        user_stake.last_accrual_checkpoint = now;
        user_stake.bump = user_stake_bump;
    }

    let ledger_info = accounts.ledger.to_account_info();
    let ledger_bump = accounts.ledger.bump;
    let mut link = VaultLink {
        token_program: &accounts.token_program,
        mint: &accounts.staking_mint,
        vault: &mut accounts.vault,
        counterparty: &accounts.user_token_account,
        counterparty_authority: accounts.user.to_account_info(),
        ledger: ledger_info,
        ledger_bump,
    };

    let credited = ledger::stake(
        &mut accounts.ledger,
        &mut pool,
        &mut accounts.user_stake,
        &mut link,
        amount,
        now,
    )?;
    pool.exit(&crate::ID)?;

    msg!("Total staked in pool {}: {}", pool_id, pool.total_principal);

    emit!(Staked {
        pool_id,
        user: user_key,
        requested: amount,
        credited,
        principal: accounts.user_stake.principal,
        vesting_unlock_at: accounts.user_stake.vesting_unlock_at,
    });

    Ok(())
}
