/// Fund rewards instruction handler.
///
/// Handles depositing reward reserve into the ledger vault. Principal and
/// reward share one vault; the reserve is whatever the vault holds beyond
/// total staked principal.
///
/// ## Security Guarantees
/// - Vault and mint validated against ledger state
/// - Funded amount is measured, so fee-charging mints cannot inflate it
/// - Anyone can fund (no admin restriction)

use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use crate::constants::*;
use crate::error::StakingError;
use crate::events::RewardsFunded;
use crate::ledger;
use crate::state::LedgerConfig;
use crate::token_link::VaultLink;

/// Accounts required for funding the reward reserve.
#[derive(Accounts)]
pub struct FundRewards<'info> {
    /// The funder (anyone can fund - no admin restriction).
    #[account(mut)]
    pub funder: Signer<'info>,

    #[account(
        mut,
        seeds = [LEDGER_SEED, ledger.staking_mint.as_ref()],
        bump = ledger.bump,
        has_one = vault @ StakingError::VaultMismatch,
        has_one = staking_mint @ StakingError::MintMismatch
    )]
    pub ledger: Box<Account<'info, LedgerConfig>>,

    pub staking_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        mut,
        token::mint = staking_mint,
        token::authority = funder,
        token::token_program = token_program
    )]
    pub funder_token_account: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(mut)]
    pub vault: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,
}

/// Fund the reward reserve.
///
/// # Arguments
/// * `ctx` - FundRewards accounts context
/// * `amount` - Amount of tokens to transfer in
pub fn handler(mut ctx: Context<FundRewards>, amount: u64) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let accounts = &mut ctx.accounts;

    let ledger_info = accounts.ledger.to_account_info();
    let ledger_bump = accounts.ledger.bump;
    let mut link = VaultLink {
        token_program: &accounts.token_program,
        mint: &accounts.staking_mint,
        vault: &mut accounts.vault,
        counterparty: &accounts.funder_token_account,
        counterparty_authority: accounts.funder.to_account_info(),
        ledger: ledger_info,
        ledger_bump,
    };

    let credited = ledger::fund_rewards(&mut accounts.ledger, &mut link, amount, now)?;

    let reserve = accounts.ledger.reward_reserve(accounts.vault.amount);
    msg!("Reward reserve now: {}", reserve);
    msg!("Funder: {}", accounts.funder.key());

    emit!(RewardsFunded {
        funder: accounts.funder.key(),
        requested: amount,
        credited,
    });

    Ok(())
}
