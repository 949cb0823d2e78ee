//! Pool registry: sequential pool ids with an immutable annual rate.

use anchor_lang::prelude::*;

use crate::constants::MAX_ANNUAL_RATE_BPS;
use crate::error::StakingError;
use crate::state::{LedgerConfig, StakePool};

/// Register a new pool under the next sequential id.
///
/// `caller` is checked against the ledger authority here rather than
/// through an account constraint, so the gate travels with the operation.
/// Nothing is written unless every check passes.
pub fn register_pool(
    ledger: &mut LedgerConfig,
    ledger_key: Pubkey,
    pool: &mut StakePool,
    caller: &Pubkey,
    annual_rate_bps: u32,
    bump: u8,
    now: i64,
) -> Result<u64> {
    require_keys_eq!(*caller, ledger.authority, StakingError::Unauthorized);
    require!(
        annual_rate_bps <= MAX_ANNUAL_RATE_BPS,
        StakingError::InvalidRate
    );

    let pool_id = ledger.pool_count;
    let next_id = pool_id
        .checked_add(1)
        .ok_or(StakingError::ArithmeticOverflow)?;

    pool.ledger = ledger_key;
    pool.id = pool_id;
    pool.annual_rate_bps = annual_rate_bps;
    pool.total_principal = 0;
    pool.staker_count = 0;
    pool.created_at = now;
    pool.bump = bump;

    ledger.pool_count = next_id;
    ledger.last_updated = now;

    Ok(pool_id)
}

/// Resolve `pool_id` to its pool account.
///
/// The account address itself is pinned by the caller's `seeds` constraint;
/// this only rejects ids the registry never issued and pools that belong to
/// a different ledger.
pub fn load_pool<'info>(
    info: &'info AccountInfo<'info>,
    ledger: &LedgerConfig,
    ledger_key: &Pubkey,
    pool_id: u64,
) -> Result<Account<'info, StakePool>> {
    require!(pool_id < ledger.pool_count, StakingError::PoolNotFound);

    let pool = Account::<StakePool>::try_from(info)?;
    require_keys_eq!(pool.ledger, *ledger_key, StakingError::PoolMismatch);
    require!(pool.id == pool_id, StakingError::PoolMismatch);

    Ok(pool)
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

    fn ledger(authority: Pubkey) -> LedgerConfig {
        LedgerConfig {
            authority,
            ..Default::default()
        }
    }

    #[test]
    fn admin_registers_sequential_pools() {
        let admin = Pubkey::new_unique();
        let ledger_key = Pubkey::new_unique();
        let mut config = ledger(admin);

        let mut first = StakePool::default();
        let mut second = StakePool::default();
        let id0 =
            register_pool(&mut config, ledger_key, &mut first, &admin, 2_000, 255, 10).unwrap();
        let id1 =
            register_pool(&mut config, ledger_key, &mut second, &admin, 500, 254, 20).unwrap();

        assert_eq!((id0, id1), (0, 1));
        assert_eq!(config.pool_count, 2);
        assert_eq!(first.annual_rate_bps, 2_000);
        assert_eq!(first.total_principal, 0);
        assert_eq!(first.ledger, ledger_key);
        assert_eq!(second.id, 1);
        assert_eq!(second.created_at, 20);
    }

    #[test]
    fn non_admin_is_unauthorized_and_creates_nothing() {
        let admin = Pubkey::new_unique();
        let intruder = Pubkey::new_unique();
        let mut config = ledger(admin);
        let mut pool = StakePool::default();

        let err = register_pool(
            &mut config,
            Pubkey::new_unique(),
            &mut pool,
            &intruder,
            1_500,
            255,
            10,
        )
        .unwrap_err();

        assert_eq!(error_code(err), u32::from(StakingError::Unauthorized));
        assert_eq!(config.pool_count, 0);
        assert_eq!(pool.annual_rate_bps, 0);
        assert_eq!(pool.ledger, Pubkey::default());
    }

    #[test]
    fn rate_above_ceiling_is_rejected() {
        let admin = Pubkey::new_unique();
        let mut config = ledger(admin);
        let mut pool = StakePool::default();

        let err = register_pool(
            &mut config,
            Pubkey::new_unique(),
            &mut pool,
            &admin,
            MAX_ANNUAL_RATE_BPS + 1,
            255,
            10,
        )
        .unwrap_err();

        assert_eq!(error_code(err), u32::from(StakingError::InvalidRate));
        assert_eq!(config.pool_count, 0);
    }

    #[test]
    fn zero_and_ceiling_rates_are_accepted() {
        let admin = Pubkey::new_unique();
        let mut config = ledger(admin);
        let key = Pubkey::new_unique();
        register_pool(&mut config, key, &mut StakePool::default(), &admin, 0, 255, 0).unwrap();
        register_pool(
            &mut config,
            key,
            &mut StakePool::default(),
            &admin,
            MAX_ANNUAL_RATE_BPS,
            255,
            0,
        )
        .unwrap();
        assert_eq!(config.pool_count, 2);
    }

    fn registered_pool(ledger_key: Pubkey, id: u64) -> StakePool {
        StakePool {
            ledger: ledger_key,
            id,
            annual_rate_bps: 2_000,
            ..Default::default()
        }
    }

    #[test]
    fn load_pool_resolves_a_registered_id() {
        let ledger_key = Pubkey::new_unique();
        let config = LedgerConfig {
            pool_count: 2,
            ..Default::default()
        };
        let mut raw = RawAccount::new(&registered_pool(ledger_key, 1));

        let pool = load_pool(&raw.info(), &config, &ledger_key, 1).unwrap();
        assert_eq!(pool.id, 1);
        assert_eq!(pool.annual_rate_bps, 2_000);
    }

    #[test]
    fn load_pool_rejects_ids_never_issued() {
        let ledger_key = Pubkey::new_unique();
        let config = LedgerConfig {
            pool_count: 1,
            ..Default::default()
        };
        let mut raw = RawAccount::new(&registered_pool(ledger_key, 1));

        let err = load_pool(&raw.info(), &config, &ledger_key, 1).unwrap_err();
        assert_eq!(error_code(err), u32::from(StakingError::PoolNotFound));

        // No pools at all: even id 0 is unknown.
        let empty = LedgerConfig::default();
        let err = load_pool(&raw.info(), &empty, &ledger_key, 0).unwrap_err();
        assert_eq!(error_code(err), u32::from(StakingError::PoolNotFound));
    }

    #[test]
    fn load_pool_rejects_pool_of_another_ledger() {
        let ledger_key = Pubkey::new_unique();
        let config = LedgerConfig {
            pool_count: 1,
            ..Default::default()
        };
        let mut raw = RawAccount::new(&registered_pool(Pubkey::new_unique(), 0));

        let err = load_pool(&raw.info(), &config, &ledger_key, 0).unwrap_err();
        assert_eq!(error_code(err), u32::from(StakingError::PoolMismatch));
    }

    #[test]
    fn load_pool_rejects_id_mismatch() {
        let ledger_key = Pubkey::new_unique();
        let config = LedgerConfig {
            pool_count: 3,
            ..Default::default()
        };
        let mut raw = RawAccount::new(&registered_pool(ledger_key, 2));

        let err = load_pool(&raw.info(), &config, &ledger_key, 0).unwrap_err();
        assert_eq!(error_code(err), u32::from(StakingError::PoolMismatch));
    }
}
