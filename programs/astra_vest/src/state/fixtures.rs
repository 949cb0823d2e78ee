//! Program-owned account buffers for tests that go through
//! `Account::try_from`.

use anchor_lang::prelude::*;

pub(crate) struct RawAccount {
    pub key: Pubkey,
    pub owner: Pubkey,
    pub lamports: u64,
    pub data: Vec<u8>,
    pub is_writable: bool,
}

impl RawAccount {
    /// Serialize `state` (discriminator included) into a writable account
    /// owned by this program under a fresh key.
    pub fn new<T: AccountSerialize>(state: &T) -> Self {
        let mut data = Vec::new();
        state.try_serialize(&mut data).unwrap();
        Self {
            key: Pubkey::new_unique(),
            owner: crate::ID,
            lamports: 1_000_000,
            data,
            is_writable: true,
        }
    }

    pub fn with_key(mut self, key: Pubkey) -> Self {
        self.key = key;
        self
    }

    pub fn read_only(mut self) -> Self {
        self.is_writable = false;
        self
    }

    pub fn info(&mut self) -> AccountInfo<'_> {
        AccountInfo::new(
            &self.key,
            false,
            self.is_writable,
            &mut self.lamports,
            &mut self.data[..],
            &self.owner,
            false,
            0,
        )
    }
}
