//! # AstraVest Staking Program
//!
//! A multi-pool staking ledger for a single SPL token. Users stake into
//! pools created by the ledger authority; each pool has a fixed annual
//! reward rate. Rewards accrue linearly by the second and vest behind a
//! 180-day lock that restarts whenever a position changes.
//!
//! ## Features
//! - Any number of pools, each with its own annual rate in basis points
//! - Fee-on-transfer tolerant: principal is credited as measured by the vault
//! - Partial unstake at any time; principal is never locked
//! - One claim across all pools, paid only from reward reserve
//! - Anyone can top up the reward reserve
//!
//! ## Views
//! `get_pool`, `pending_rewards` and `calculate_claimable_rewards` return
//! their value through return data and modify nothing.

use anchor_lang::prelude::*;

declare_id!("Fg6PaFpoGXkYsidMpWTK6W2BeZ7FEfcYkg476zPFsLnS");

pub mod constants;
pub mod error;
pub mod events;
pub mod instructions;
pub mod ledger;
pub mod math;
pub mod registry;
pub mod state;
pub mod token_link;

use instructions::*;
use state::StakePool;

#[program]
pub mod astra_vest {
    use super::*;

    /// Creates the ledger and its vault for `staking_mint`.
    ///
    /// The signer becomes the ledger authority.
    pub fn initialize(ctx: Context<Initialize>) -> Result<()> {
        instructions::initialize::handler(ctx)
    }

    /// Registers a new pool and returns its id.
    ///
    /// # Arguments
    /// * `ctx` - The context containing admin accounts
    /// * `annual_rate_bps` - Annual reward rate (basis points, e.g., 2000 = 20%)
    ///
    /// # Errors
    /// Returns an error if:
    /// - Caller is not the authority
    /// - Rate exceeds the maximum
    pub fn add_pool(ctx: Context<AddPool>, annual_rate_bps: u32) -> Result<u64> {
        instructions::add_pool::handler(ctx, annual_rate_bps)
    }

    /// Returns the pool registered under `pool_id`.
    pub fn get_pool(ctx: Context<GetPool>, pool_id: u64) -> Result<StakePool> {
        instructions::views::get_pool_handler(ctx, pool_id)
    }

    /// Stakes tokens into a pool.
    ///
    /// Principal is credited with what the vault actually received, and the
    /// record's vesting lock restarts.
    ///
    /// # Errors
    /// Returns an error if:
    /// - Amount is zero
    /// - Pool does not exist
    /// - Nothing arrived in the vault
    pub fn stake(ctx: Context<Stake>, pool_id: u64, amount: u64) -> Result<()> {
        instructions::stake::handler(ctx, pool_id, amount)
    }

    /// Withdraws principal from a pool.
    ///
    /// # Errors
    /// Returns an error if:
    /// - Amount is zero
    /// - Amount exceeds staked principal
    /// - Pool does not exist
    pub fn unstake(ctx: Context<Unstake>, pool_id: u64, amount: u64) -> Result<()> {
        instructions::unstake::handler(ctx, pool_id, amount)
    }

    /// Returns the reward `user` has earned in a pool, vested or not.
    pub fn pending_rewards(
        ctx: Context<PendingRewards>,
        pool_id: u64,
        user: Pubkey,
    ) -> Result<u64> {
        instructions::views::pending_rewards_handler(ctx, pool_id, user)
    }

    /// Returns the reward `user` could claim now.
    ///
    /// Stake records are passed in `remaining_accounts` as
    /// `(pool, user_stake)` pairs.
    pub fn calculate_claimable_rewards<'info>(
        ctx: Context<'_, '_, 'info, 'info, ClaimableRewards<'info>>,
        user: Pubkey,
    ) -> Result<u64> {
        instructions::views::claimable_rewards_handler(ctx, user)
    }

    /// Pays out every vested reward balance in a single transfer.
    ///
    /// Stake records are passed in `remaining_accounts` as
    /// `(pool, user_stake)` pairs.
    ///
    /// # Errors
    /// Returns an error if:
    /// - Nothing is vested
    /// - Reward reserve cannot cover the payout
    /// - A record appears twice or belongs to someone else
    pub fn claim_vested_rewards<'info>(
        ctx: Context<'_, '_, 'info, 'info, ClaimVestedRewards<'info>>,
    ) -> Result<()> {
        instructions::claim_vested_rewards::handler(ctx)
    }

    /// Deposits tokens into the reward reserve.
    ///
    /// # Errors
    /// Returns an error if amount is zero or nothing arrived in the vault.
    pub fn fund_rewards(ctx: Context<FundRewards>, amount: u64) -> Result<()> {
        instructions::fund_rewards::handler(ctx, amount)
    }

    /// Admin function to transfer authority to a new address.
    ///
    /// # Arguments
    /// * `ctx` - The context containing admin accounts
    /// * `new_authority` - New admin pubkey
    ///
    /// # Errors
    /// Returns an error if:
    /// - Caller is not the current admin
    /// - New authority is zero address
    pub fn transfer_authority(ctx: Context<AdminControl>, new_authority: Pubkey) -> Result<()> {
        instructions::admin::transfer_authority_handler(ctx, new_authority)
    }
}
