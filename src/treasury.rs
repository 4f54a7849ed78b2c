//! Accrued mint proceeds and the owner-gated withdrawal.

use serde::{Deserialize, Serialize};

use crate::{Address, Amount};

#[derive(Debug, thiserror::Error)]
pub enum TreasuryError {
    #[error("caller is not the treasury owner")]
    Unauthorized,
}

/// Payment balance accumulated by successful mints.
///
/// The balance only grows through [`credit`](TreasuryAccount::credit) and
/// only returns to zero through a full withdrawal. A `None` owner disables
/// withdrawal permanently: no caller can ever match it.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct TreasuryAccount {
    owner: Option<Address>,
    balance: Amount,
}

impl TreasuryAccount {
    pub fn new(owner: Option<Address>) -> Self {
        Self { owner, balance: 0 }
    }

    pub fn owner(&self) -> Option<&Address> {
        self.owner.as_ref()
    }

    pub fn balance(&self) -> Amount {
        self.balance
    }

    /// Adds an already-validated mint payment to the balance.
    pub fn credit(&mut self, amount: Amount) {
        self.balance += amount;
    }

    /// Transfers the entire balance to the owner and resets it to zero.
    ///
    /// Returns the transferred amount; a zero balance is a no-op success, so
    /// repeated withdrawals never fail on emptiness.
    pub fn withdraw(&mut self, caller: &Address) -> Result<Amount, TreasuryError> {
        match &self.owner {
            Some(owner) if owner == caller => {
                let withdrawn = self.balance;
                self.balance = 0;
                Ok(withdrawn)
            }
            _ => Err(TreasuryError::Unauthorized),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owner() -> Address {
        "0x00000000000000000000000000000000000000aa".into()
    }

    #[test]
    fn credits_accumulate() {
        let mut treasury = TreasuryAccount::new(Some(owner()));
        treasury.credit(100);
        treasury.credit(250);
        assert_eq!(treasury.balance(), 350);
    }

    #[test]
    fn owner_withdraws_full_balance() {
        let mut treasury = TreasuryAccount::new(Some(owner()));
        treasury.credit(1_000);
        assert_eq!(treasury.withdraw(&owner()).unwrap(), 1_000);
        assert_eq!(treasury.balance(), 0);
    }

    #[test]
    fn withdrawal_is_idempotent_on_empty_balance() {
        let mut treasury = TreasuryAccount::new(Some(owner()));
        treasury.credit(500);
        assert_eq!(treasury.withdraw(&owner()).unwrap(), 500);
        assert_eq!(treasury.withdraw(&owner()).unwrap(), 0);
    }

    #[test]
    fn non_owner_cannot_withdraw() {
        let mut treasury = TreasuryAccount::new(Some(owner()));
        treasury.credit(42);
        let stranger: Address = "0x00000000000000000000000000000000000000bb".into();
        assert!(matches!(
            treasury.withdraw(&stranger),
            Err(TreasuryError::Unauthorized)
        ));
        assert_eq!(treasury.balance(), 42);
    }

    #[test]
    fn null_owner_disables_withdrawal() {
        let mut treasury = TreasuryAccount::new(None);
        treasury.credit(42);
        assert!(matches!(
            treasury.withdraw(&owner()),
            Err(TreasuryError::Unauthorized)
        ));
        assert_eq!(treasury.balance(), 42);
    }
}
