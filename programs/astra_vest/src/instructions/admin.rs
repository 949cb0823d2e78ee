/// Admin instruction handlers.
///
/// ## Security Guarantees
/// - Signer must equal ledger.authority
/// - PDA validation ensures correct ledger

use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::StakingError;
use crate::events::AuthorityTransferred;
use crate::state::LedgerConfig;

/// Accounts required for admin operations.
#[derive(Accounts)]
pub struct AdminControl<'info> {
    /// The admin authority.
    /// SECURITY: Must be signer AND match ledger.authority.
    #[account(
        constraint = authority.key() == ledger.authority @ StakingError::Unauthorized
    )]
    pub authority: Signer<'info>,

    #[account(
        mut,
        seeds = [LEDGER_SEED, ledger.staking_mint.as_ref()],
        bump = ledger.bump
    )]
    pub ledger: Account<'info, LedgerConfig>,
}

/// Transfer admin authority to a new address.
///
/// # Security
/// - Only current authority can call this
/// - New authority must be a valid pubkey (non-zero)
/// - Existing pools keep their rates; only future `add_pool` calls are affected
pub fn transfer_authority_handler(
    ctx: Context<AdminControl>,
    new_authority: Pubkey,
) -> Result<()> {
    let clock = Clock::get()?;
    let caller = ctx.accounts.authority.key();

    let old_authority = ctx
        .accounts
        .ledger
        .transfer_authority(&caller, new_authority, clock.unix_timestamp)?;

    msg!("Authority transferred: {} -> {}", old_authority, new_authority);

    emit!(AuthorityTransferred {
        old_authority,
        new_authority,
    });

    Ok(())
}
