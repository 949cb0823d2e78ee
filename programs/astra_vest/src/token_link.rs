//! Fee-aware token movement.
//!
//! The ledger never trusts the amount it asked the token program to move.
//! Every transfer is bracketed by two reads of the vault balance and the
//! measured delta is what gets credited. Token-2022 mints with a transfer
//! fee withhold part of an inbound transfer on the destination, so the
//! vault grows by less than requested; crediting the request instead would
//! leave the pool under-collateralized.
//!
//! Outbound transfers debit the vault by the full amount and any fee is
//! taken from what the recipient receives. The ledger records what it paid,
//! not what arrived.

use anchor_lang::prelude::*;
use anchor_spl::token_interface::{self, Mint, TokenAccount, TokenInterface, TransferChecked};

use crate::constants::LEDGER_SEED;
use crate::error::StakingError;

/// Token movement between the ledger vault and one counterparty.
pub trait TokenLink {
    /// Current balance of the ledger vault.
    fn vault_balance(&mut self) -> Result<u64>;

    /// Move `amount` from the counterparty into the vault.
    fn transfer_in(&mut self, amount: u64) -> Result<()>;

    /// Move `amount` from the vault to the counterparty.
    fn transfer_out(&mut self, amount: u64) -> Result<()>;

    /// Pull `requested` into the vault and return what actually arrived.
    fn pull_from(&mut self, requested: u64) -> Result<u64> {
        require!(requested > 0, StakingError::ZeroAmount);

        let before = self.vault_balance()?;
        self.transfer_in(requested).map_err(|err| {
            msg!("Inbound transfer of {} failed: {}", requested, err);
            error!(StakingError::TransferFailed)
        })?;
        let after = self.vault_balance()?;

        let credited = after
            .checked_sub(before)
            .filter(|delta| *delta > 0)
            .ok_or(StakingError::TransferFailed)?;

        if credited != requested {
            msg!("Requested {} but vault received {}", requested, credited);
        }
        Ok(credited)
    }

    /// Send `amount` out of the vault and return the measured debit.
    fn push_to(&mut self, amount: u64) -> Result<u64> {
        require!(amount > 0, StakingError::ZeroAmount);

        let before = self.vault_balance()?;
        self.transfer_out(amount).map_err(|err| {
            msg!("Outbound transfer of {} failed: {}", amount, err);
            error!(StakingError::TransferFailed)
        })?;
        let after = self.vault_balance()?;

        let sent = before
            .checked_sub(after)
            .ok_or(StakingError::TransferFailed)?;
        require!(sent == amount, StakingError::TransferFailed);
        Ok(sent)
    }
}

/// `TokenLink` over the SPL Token / Token-2022 program.
///
/// Inbound transfers are signed by the counterparty's owner; outbound ones
/// by the ledger PDA, which is the vault's authority.
pub struct VaultLink<'a, 'info> {
    pub token_program: &'a Interface<'info, TokenInterface>,
    pub mint: &'a InterfaceAccount<'info, Mint>,
    pub vault: &'a mut InterfaceAccount<'info, TokenAccount>,
    pub counterparty: &'a InterfaceAccount<'info, TokenAccount>,
    pub counterparty_authority: AccountInfo<'info>,
    pub ledger: AccountInfo<'info>,
    pub ledger_bump: u8,
}

impl<'a, 'info> TokenLink for VaultLink<'a, 'info> {
    fn vault_balance(&mut self) -> Result<u64> {
        self.vault.reload()?;
        Ok(self.vault.amount)
    }

    fn transfer_in(&mut self, amount: u64) -> Result<()> {
        let cpi_accounts = TransferChecked {
            from: self.counterparty.to_account_info(),
            mint: self.mint.to_account_info(),
            to: self.vault.to_account_info(),
            authority: self.counterparty_authority.clone(),
        };
        let cpi_ctx = CpiContext::new(self.token_program.to_account_info(), cpi_accounts);
        token_interface::transfer_checked(cpi_ctx, amount, self.mint.decimals)
    }

    fn transfer_out(&mut self, amount: u64) -> Result<()> {
        let mint_key = self.mint.key();
        let seeds = &[LEDGER_SEED, mint_key.as_ref(), &[self.ledger_bump]];
        let signer_seeds = &[&seeds[..]];

        let cpi_accounts = TransferChecked {
            from: self.vault.to_account_info(),
            mint: self.mint.to_account_info(),
            to: self.counterparty.to_account_info(),
            authority: self.ledger.clone(),
        };
        let cpi_ctx = CpiContext::new_with_signer(
            self.token_program.to_account_info(),
            cpi_accounts,
            signer_seeds,
        );
        token_interface::transfer_checked(cpi_ctx, amount, self.mint.decimals)
    }
}

#[cfg(test)]
pub(crate) mod mock {
    use super::*;

    /// In-memory token that withholds `fee_bps` of every transfer from the
    /// receiving side, like a Token-2022 transfer-fee mint.
    #[derive(Debug, Default)]
    pub struct FeeToken {
        pub vault: u64,
        pub counterparty: u64,
        pub fee_bps: u64,
        pub withheld: u64,
        pub fail_next: bool,
    }

    impl FeeToken {
        pub fn new(counterparty: u64, fee_bps: u64) -> Self {
            Self {
                counterparty,
                fee_bps,
                ..Default::default()
            }
        }

        fn fee(&self, amount: u64) -> u64 {
            amount * self.fee_bps / 10_000
        }
    }

    impl TokenLink for FeeToken {
        fn vault_balance(&mut self) -> Result<u64> {
            Ok(self.vault)
        }

        fn transfer_in(&mut self, amount: u64) -> Result<()> {
            if std::mem::take(&mut self.fail_next) || self.counterparty < amount {
                return err!(StakingError::TransferFailed);
            }
            let fee = self.fee(amount);
            self.counterparty -= amount;
            self.vault += amount - fee;
            self.withheld += fee;
            Ok(())
        }

        fn transfer_out(&mut self, amount: u64) -> Result<()> {
            if std::mem::take(&mut self.fail_next) || self.vault < amount {
                return err!(StakingError::TransferFailed);
            }
            let fee = self.fee(amount);
            self.vault -= amount;
            self.counterparty += amount - fee;
            self.withheld += fee;
            Ok(())
        }
    }
}
