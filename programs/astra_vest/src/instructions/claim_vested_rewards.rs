//! Claim vested rewards instruction handler.
//!
//! Pays out every unlocked reward balance the user holds, across any number
//! of pools, in a single transfer from the vault's reward reserve.
//!
//! Stake records are passed in `remaining_accounts` as `(pool, user_stake)`
//! pairs.

use anchor_lang::prelude::*;
use anchor_spl::token_interface::{Mint, TokenAccount, TokenInterface};

use crate::constants::*;
use crate::error::StakingError;
use crate::events::RewardsClaimed;
use crate::ledger;
use crate::state::{LedgerConfig, StakePool, UserStake};
use crate::token_link::VaultLink;

/// Accounts required for claiming rewards.
#[derive(Accounts)]
pub struct ClaimVestedRewards<'info> {
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

    pub staking_mint: Box<InterfaceAccount<'info, Mint>>,

    /// User's token account for receiving rewards.
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

/// Deserialize and validate `(pool, user_stake)` pairs.
///
/// Every pool must belong to `ledger_key`, every record must be `user`'s
/// record in the pool it is paired with, and no record may appear twice
/// (a duplicate would be paid once per copy).
pub fn load_stake_entries<'info>(
    remaining: &'info [AccountInfo<'info>],
    ledger_key: &Pubkey,
    user: &Pubkey,
    writable: bool,
) -> Result<Vec<(Account<'info, StakePool>, Account<'info, UserStake>)>> {
    require!(
        remaining.len() % 2 == 0,
        StakingError::StakeAccountMismatch
    );

    let mut seen: Vec<Pubkey> = Vec::with_capacity(remaining.len() / 2);
    let mut entries = Vec::with_capacity(remaining.len() / 2);

    for pair in remaining.chunks(2) {
        let (pool_info, stake_info) = (&pair[0], &pair[1]);

        let pool = Account::<StakePool>::try_from(pool_info)?;
        require_keys_eq!(pool.ledger, *ledger_key, StakingError::PoolMismatch);

        let record = Account::<UserStake>::try_from(stake_info)?;
        require_keys_eq!(record.owner, *user, StakingError::StakeAccountMismatch);
        require_keys_eq!(record.pool, pool.key(), StakingError::StakeAccountMismatch);
        if writable {
            require!(
                stake_info.is_writable,
                anchor_lang::error::ErrorCode::ConstraintMut
            );
        }

        require!(
            !seen.contains(stake_info.key),
            StakingError::DuplicateStakeAccount
        );
        seen.push(*stake_info.key);

        entries.push((pool, record));
    }

    Ok(entries)
}

pub fn handler<'info>(mut ctx: Context<'_, '_, 'info, 'info, ClaimVestedRewards<'info>>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let accounts = &mut ctx.accounts;
    let ledger_key = accounts.ledger.key();
    let user_key = accounts.user.key();

    let mut loaded = load_stake_entries(ctx.remaining_accounts, &ledger_key, &user_key, true)?;

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

    let paid = {
        let mut entries: Vec<(&StakePool, &mut UserStake)> = loaded
            .iter_mut()
            .map(|(pool, record)| (&**pool, &mut **record))
            .collect();
        ledger::claim_vested(&mut accounts.ledger, &mut entries, &mut link, now)?
    };

    for (_, record) in loaded.iter() {
        record.exit(&crate::ID)?;
    }
    let records = u32::try_from(loaded.len())
        .map_err(|_| error!(StakingError::ArithmeticOverflow))?;

    msg!("Total rewards paid by ledger: {}", accounts.ledger.total_rewards_paid);

    emit!(RewardsClaimed {
        user: user_key,
        amount: paid,
        records,
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::fixtures::RawAccount;

    fn error_code(err: Error) -> u32 {
        match err {
            Error::AnchorError(e) => e.error_code_number,
            other => panic!("unexpected error: {other:?}"),
        }
    }

    fn pool_of(ledger_key: Pubkey, id: u64) -> RawAccount {
        RawAccount::new(&StakePool {
            ledger: ledger_key,
            id,
            annual_rate_bps: 2_000,
            ..Default::default()
        })
    }

    fn record_of(owner: Pubkey, pool: &RawAccount) -> RawAccount {
        RawAccount::new(&UserStake {
            owner,
            pool: pool.key,
            principal: 1_000,
            ..Default::default()
        })
    }

    #[test]
    fn loads_every_pair_in_order() {
        let ledger_key = Pubkey::new_unique();
        let user = Pubkey::new_unique();
        let mut pool_a = pool_of(ledger_key, 0);
        let mut pool_b = pool_of(ledger_key, 1);
        let mut stake_a = record_of(user, &pool_a);
        let mut stake_b = record_of(user, &pool_b);

        let infos = vec![pool_a.info(), stake_a.info(), pool_b.info(), stake_b.info()];
        let entries = load_stake_entries(&infos, &ledger_key, &user, true).unwrap();

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].0.id, 0);
        assert_eq!(entries[1].0.id, 1);
        assert_eq!(entries[1].1.owner, user);
    }

    #[test]
    fn empty_list_loads_nothing() {
        let entries =
            load_stake_entries(&[], &Pubkey::new_unique(), &Pubkey::new_unique(), true).unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn same_record_twice_is_rejected() {
        let ledger_key = Pubkey::new_unique();
        let user = Pubkey::new_unique();
        let mut pool = pool_of(ledger_key, 0);
        let mut pool_again = pool_of(ledger_key, 0).with_key(pool.key);
        let mut stake = record_of(user, &pool);
        let mut stake_again = record_of(user, &pool).with_key(stake.key);

        let infos = vec![pool.info(), stake.info(), pool_again.info(), stake_again.info()];
        let err = load_stake_entries(&infos, &ledger_key, &user, true).unwrap_err();

        assert_eq!(error_code(err), u32::from(StakingError::DuplicateStakeAccount));
    }

    #[test]
    fn odd_account_count_is_rejected() {
        let ledger_key = Pubkey::new_unique();
        let mut pool = pool_of(ledger_key, 0);

        let infos = vec![pool.info()];
        let err = load_stake_entries(&infos, &ledger_key, &Pubkey::new_unique(), true).unwrap_err();

        assert_eq!(error_code(err), u32::from(StakingError::StakeAccountMismatch));
    }

    #[test]
    fn record_of_another_user_is_rejected() {
        let ledger_key = Pubkey::new_unique();
        let user = Pubkey::new_unique();
        let mut pool = pool_of(ledger_key, 0);
        let mut stake = record_of(Pubkey::new_unique(), &pool);

        let infos = vec![pool.info(), stake.info()];
        let err = load_stake_entries(&infos, &ledger_key, &user, true).unwrap_err();

        assert_eq!(error_code(err), u32::from(StakingError::StakeAccountMismatch));
    }

    #[test]
    fn record_paired_with_wrong_pool_is_rejected() {
        let ledger_key = Pubkey::new_unique();
        let user = Pubkey::new_unique();
        let mut pool = pool_of(ledger_key, 0);
        let other_pool = pool_of(ledger_key, 1);
        let mut stake = record_of(user, &other_pool);

        let infos = vec![pool.info(), stake.info()];
        let err = load_stake_entries(&infos, &ledger_key, &user, true).unwrap_err();

        assert_eq!(error_code(err), u32::from(StakingError::StakeAccountMismatch));
    }

    #[test]
    fn pool_of_another_ledger_is_rejected() {
        let ledger_key = Pubkey::new_unique();
        let user = Pubkey::new_unique();
        let mut pool = pool_of(Pubkey::new_unique(), 0);
        let mut stake = record_of(user, &pool);

        let infos = vec![pool.info(), stake.info()];
        let err = load_stake_entries(&infos, &ledger_key, &user, true).unwrap_err();

        assert_eq!(error_code(err), u32::from(StakingError::PoolMismatch));
    }

    #[test]
    fn read_only_record_is_refused_for_claims_but_fine_for_views() {
        let ledger_key = Pubkey::new_unique();
        let user = Pubkey::new_unique();
        let mut pool = pool_of(ledger_key, 0);
        let mut stake = record_of(user, &pool).read_only();

        let infos = vec![pool.info(), stake.info()];
        let err = load_stake_entries(&infos, &ledger_key, &user, true).unwrap_err();
        assert_eq!(error_code(err), anchor_lang::error::ErrorCode::ConstraintMut as u32);

        let entries = load_stake_entries(&infos, &ledger_key, &user, false).unwrap();
        assert_eq!(entries.len(), 1);
    }
}
