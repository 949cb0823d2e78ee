//! State structures for the AstraVest staking ledger.
//!
//! One `LedgerConfig` per staking mint, one `StakePool` per sequential pool
//! id and one `UserStake` per (pool, user).

pub mod ledger_config;
pub mod stake_pool;
pub mod user_stake;

pub use ledger_config::*;
pub use stake_pool::*;
pub use user_stake::*;

#[cfg(test)]
pub(crate) mod fixtures;
