/// Initialize instruction handler.
///
/// Creates the ledger config for a staking mint and the vault that holds
/// every pool's principal plus the reward reserve.
///
/// ## Security Guarantees
/// - Ledger is a PDA of the mint: one ledger per token
/// - Vault is the ledger PDA's associated token account, so only the
///   program can move funds out of it
/// - Mint and vault are locked into ledger state permanently

use anchor_lang::prelude::*;
use anchor_spl::associated_token::AssociatedToken;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use crate::constants::*;
use crate::events::LedgerInitialized;
use crate::state::LedgerConfig;

/// Accounts required for ledger initialization.
#[derive(Accounts)]
pub struct Initialize<'info> {
    /// Becomes the ledger authority (the only account allowed to add pools).
    #[account(mut)]
    pub authority: Signer<'info>,

    #[account(
        init,
        payer = authority,
        space = LedgerConfig::LEN,
        seeds = [LEDGER_SEED, staking_mint.key().as_ref()],
        bump
    )]
    pub ledger: Box<Account<'info, LedgerConfig>>,

    /// SPL Token or Token-2022 mint; transfer-fee mints are supported.
    pub staking_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        init,
        payer = authority,
        associated_token::mint = staking_mint,
        associated_token::authority = ledger,
        associated_token::token_program = token_program
    )]
    pub vault: Box<InterfaceAccount<'info, TokenAccount>>,

    pub system_program: Program<'info, System>,

    pub token_program: Interface<'info, TokenInterface>,

    pub associated_token_program: Program<'info, AssociatedToken>,
}

pub fn handler(ctx: Context<Initialize>) -> Result<()> {
    let clock = Clock::get()?;
    let ledger_key = ctx.accounts.ledger.key();
    let authority = ctx.accounts.authority.key();
    let staking_mint = ctx.accounts.staking_mint.key();
    let vault = ctx.accounts.vault.key();

    let ledger = &mut ctx.accounts.ledger;
    ledger.authority = authority;
    ledger.staking_mint = staking_mint; // LOCKED - never changes
    ledger.vault = vault; // LOCKED - ATA of the ledger PDA
    ledger.pool_count = 0;
    ledger.total_principal = 0;
    ledger.total_reward_funded = 0;
    ledger.total_rewards_paid = 0;
    ledger.created_at = clock.unix_timestamp;
    ledger.last_updated = clock.unix_timestamp;
    ledger.bump = ctx.bumps.ledger;

    msg!("AstraVest ledger initialized");
    msg!("Admin: {}", authority);
    msg!("Mint: {}", staking_mint);
    msg!("Vault: {}", vault);

    emit!(LedgerInitialized {
        ledger: ledger_key,
        authority,
        staking_mint,
        vault,
    });

    Ok(())
}
