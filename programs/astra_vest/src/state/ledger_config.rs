use anchor_lang::prelude::*;

use crate::error::StakingError;

/// Ledger-wide configuration: the admin, the staked token, the shared vault
/// and the registry counter for sequential pool ids.
#[account]
#[derive(Default, Debug)]
pub struct LedgerConfig {
    pub authority: Pubkey,
    pub staking_mint: Pubkey,
    /// Token account (ATA of this PDA) holding every pool's principal and
    /// the reward reserve.
    pub vault: Pubkey,

    pub pool_count: u64,
    /// Sum of `total_principal` over all pools.
    pub total_principal: u64,
    pub total_reward_funded: u64,
    pub total_rewards_paid: u64,

    pub created_at: i64,
    pub last_updated: i64,

    pub bump: u8,
}

impl LedgerConfig {
    pub const LEN: usize = 8
        + (32 * 3)
        + (8 * 4)
        + (8 * 2)
        + 1;

    /// Vault tokens not backing any principal.
    pub fn reward_reserve(&self, vault_balance: u64) -> u64 {
        vault_balance.saturating_sub(self.total_principal)
    }

    /// Hand the ledger to `new_authority`. Returns the previous authority.
    ///
    /// Existing pools keep their rates; only future `add_pool` calls see the
    /// new authority.
    pub fn transfer_authority(
        &mut self,
        caller: &Pubkey,
        new_authority: Pubkey,
        now: i64,
    ) -> Result<Pubkey> {
        require_keys_eq!(*caller, self.authority, StakingError::Unauthorized);
        require!(new_authority != Pubkey::default(), StakingError::InvalidAuthority);

        let old_authority = self.authority;
        self.authority = new_authority;
        self.last_updated = now;
        Ok(old_authority)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn error_code(err: Error) -> u32 {
        match err {
            Error::AnchorError(e) => e.error_code_number,
            other => panic!("unexpected error: {other:?}"),
        }
    }

    fn ledger(authority: Pubkey) -> LedgerConfig {
        LedgerConfig {
            authority,
            last_updated: 1,
            ..Default::default()
        }
    }

    #[test]
    fn authority_moves_to_new_key() {
        let admin = Pubkey::new_unique();
        let successor = Pubkey::new_unique();
        let mut config = ledger(admin);

        let old = config.transfer_authority(&admin, successor, 50).unwrap();

        assert_eq!(old, admin);
        assert_eq!(config.authority, successor);
        assert_eq!(config.last_updated, 50);
    }

    #[test]
    fn default_pubkey_is_rejected() {
        let admin = Pubkey::new_unique();
        let mut config = ledger(admin);

        let err = config.transfer_authority(&admin, Pubkey::default(), 50).unwrap_err();

        assert_eq!(error_code(err), u32::from(StakingError::InvalidAuthority));
        assert_eq!(config.authority, admin);
        assert_eq!(config.last_updated, 1);
    }

    #[test]
    fn only_current_authority_can_hand_over() {
        let admin = Pubkey::new_unique();
        let intruder = Pubkey::new_unique();
        let mut config = ledger(admin);

        let err = config.transfer_authority(&intruder, intruder, 50).unwrap_err();

        assert_eq!(error_code(err), u32::from(StakingError::Unauthorized));
        assert_eq!(config.authority, admin);
    }

    #[test]
    fn reserve_excludes_staked_principal() {
        let config = LedgerConfig {
            total_principal: 700,
            ..Default::default()
        };
        assert_eq!(config.reward_reserve(1_000), 300);
        assert_eq!(config.reward_reserve(500), 0);
    }
}
