use anchor_lang::prelude::*;

#[account]
#[derive(Default, Debug)]
pub struct StakePool {
    pub ledger: Pubkey,
    pub id: u64,

    /// Annual reward rate in basis points (2000 = 20%). Immutable.
    pub annual_rate_bps: u32,

    pub total_principal: u64,
    pub staker_count: u64,

    pub created_at: i64,
    pub bump: u8,
}

impl StakePool {
    pub const LEN: usize = 8
        + 32
        + 8
        + 4
        + (8 * 2)
        + 8
        + 1;
}
