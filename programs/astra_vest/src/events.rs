use anchor_lang::prelude::*;

#[event]
pub struct LedgerInitialized {
    pub ledger: Pubkey,
    pub authority: Pubkey,
    pub staking_mint: Pubkey,
    pub vault: Pubkey,
}

#[event]
pub struct PoolAdded {
    pub pool: Pubkey,
    pub pool_id: u64,
    pub annual_rate_bps: u32,
}

#[event]
pub struct Staked {
    pub pool_id: u64,
    pub user: Pubkey,
    pub requested: u64,
    pub credited: u64,
    pub principal: u64,
    pub vesting_unlock_at: i64,
}

#[event]
pub struct Unstaked {
    pub pool_id: u64,
    pub user: Pubkey,
    pub amount: u64,
    pub principal: u64,
    pub vesting_unlock_at: i64,
}

#[event]
pub struct RewardsClaimed {
    pub user: Pubkey,
    pub amount: u64,
    pub records: u32,
}

#[event]
pub struct RewardsFunded {
    pub funder: Pubkey,
    pub requested: u64,
    pub credited: u64,
}

#[event]
pub struct AuthorityTransferred {
    pub old_authority: Pubkey,
    pub new_authority: Pubkey,
}
