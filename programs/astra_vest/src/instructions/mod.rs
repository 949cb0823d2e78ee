//! Instruction handlers for the AstraVest program.
//!
//! Handlers load and validate accounts, read the clock and wire a
//! `VaultLink`; the accounting itself lives in `crate::ledger`.

pub mod add_pool;
pub mod admin;
pub mod claim_vested_rewards;
pub mod fund_rewards;
pub mod initialize;
pub mod stake;
pub mod unstake;
pub mod views;

pub use add_pool::*;
pub use admin::*;
pub use claim_vested_rewards::*;
pub use fund_rewards::*;
pub use initialize::*;
pub use stake::*;
pub use unstake::*;
pub use views::*;
