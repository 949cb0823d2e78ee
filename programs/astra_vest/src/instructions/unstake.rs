//! Unstake instruction handler.
//!
//! Handles withdrawing staked principal from a pool.

use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use crate::constants::*;
use crate::error::StakingError;
use crate::events::Unstaked;
use crate::ledger;
use crate::registry;
use crate::state::{LedgerConfig, UserStake};
use crate::token_link::VaultLink;

/// Accounts required for unstaking.
#[derive(Accounts)]
#[instruction(pool_id: u64)]
pub struct Unstake<'info> {
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
    /// `registry::load_pool`.
    #[account(
        mut,
        seeds = [POOL_SEED, ledger.key().as_ref(), &pool_id.to_le_bytes()],
        bump
    )]
    pub pool: UncheckedAccount<'info>,

    #[account(
        mut,
        seeds = [USER_STAKE_SEED, pool.key().as_ref(), user.key().as_ref()],
        bump = user_stake.bump,
        constraint = user_stake.owner == user.key() @ StakingError::StakeAccountMismatch,
        constraint = user_stake.pool == pool.key() @ StakingError::StakeAccountMismatch
    )]
    pub user_stake: Box<Account<'info, UserStake>>,

    pub staking_mint: Box<InterfaceAccount<'info, Mint>>,

    /// User's token account for receiving unstaked tokens.
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
}

/// Unstake `amount` of principal from pool `pool_id`.
///
/// Any outbound transfer fee is taken from what the user receives; the
/// ledger debits the full `amount`.
pub fn handler(mut ctx: Context<Unstake>, pool_id: u64, amount: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let accounts = &mut ctx.accounts;

    let ledger_key = accounts.ledger.key();
    let mut pool = registry::load_pool(
        &accounts.pool.to_account_info(),
        &accounts.ledger,
        &ledger_key,
        pool_id,
    )?;

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

    ledger::unstake(
        &mut accounts.ledger,
        &mut pool,
        &mut accounts.user_stake,
        &mut link,
        amount,
        now,
    )?;
    pool.exit(&crate::ID)?;

    msg!("Total staked in pool {}: {}", pool_id, pool.total_principal);

    emit!(Unstaked {
        pool_id,
        user: accounts.user.key(),
        amount,
        principal: accounts.user_stake.principal,
        vesting_unlock_at: accounts.user_stake.vesting_unlock_at,
    });

    Ok(())
}
