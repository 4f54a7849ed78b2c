//! Issuance state machine.
//!
//! Each catalog slot moves `Unissued -> Issued` exactly once; there is no
//! burn, so `Issued` is terminal. Token ids are assigned contiguously from 1
//! in issuance order, and slots are consumed lowest-first, so with no burn
//! the next unissued slot is always `issued_count + 1`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{Address, TokenId};

#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    /// Canonical zero-supply message; callers match on this exact string.
    #[error("No supply available")]
    NoSupply,
    #[error("insufficient supply: requested {requested}, available {available}")]
    InsufficientSupply { requested: u64, available: u64 },
    #[error("token index {index} out of bounds (issued {issued})")]
    IndexOutOfBounds { index: u64, issued: u64 },
    #[error("unknown token {0}")]
    UnknownToken(TokenId),
}

/// An issued, uniquely numbered claim on one catalog slot.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Token {
    pub id: TokenId,
    pub slot: u64,
    pub owner: Address,
}

/// Bookkeeping for issued tokens and their owners.
///
/// Invariants: `issued_count == tokens_by_id.len()`, ids are contiguous in
/// `1..=issued_count`, and each slot appears in at most one token.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct IssuanceLedger {
    issued_count: u64,
    tokens_by_id: BTreeMap<TokenId, Token>,
    owner_tokens: BTreeMap<Address, Vec<TokenId>>,
}

impl IssuanceLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issued_count(&self) -> u64 {
        self.issued_count
    }

    /// Remaining unissued slots for a catalog of the given length.
    pub fn available_supply(&self, catalog_len: u64) -> u64 {
        catalog_len - self.issued_count
    }

    /// Issues the next `count` tokens to `beneficiary`.
    ///
    /// All preconditions are checked before any state is touched, so a
    /// failed call leaves the ledger unchanged; on success all `count`
    /// tokens are issued together.
    pub fn mint_next(
        &mut self,
        catalog_len: u64,
        count: u64,
        beneficiary: &Address,
    ) -> Result<Vec<Token>, LedgerError> {
        let available = self.available_supply(catalog_len);
        if available == 0 {
            return Err(LedgerError::NoSupply);
        }
        if count == 0 || count > available {
            return Err(LedgerError::InsufficientSupply {
                requested: count,
                available,
            });
        }

        let mut minted = Vec::with_capacity(count as usize);
        let holdings = self.owner_tokens.entry(beneficiary.clone()).or_default();
        for offset in 1..=count {
            let id = self.issued_count + offset;
            let token = Token {
                id,
                // Lowest unissued slot; issuance order equals catalog order.
                slot: id,
                owner: beneficiary.clone(),
            };
            self.tokens_by_id.insert(id, token.clone());
            holdings.push(id);
            minted.push(token);
        }
        self.issued_count += count;
        Ok(minted)
    }

    /// Token at a 0-based position in issuance order.
    pub fn token_by_index(&self, index: u64) -> Result<&Token, LedgerError> {
        if index >= self.issued_count {
            return Err(LedgerError::IndexOutOfBounds {
                index,
                issued: self.issued_count,
            });
        }
        // Ids are contiguous from 1, so issuance index i holds id i + 1.
        self.token(index + 1)
    }

    pub fn token(&self, id: TokenId) -> Result<&Token, LedgerError> {
        self.tokens_by_id.get(&id).ok_or(LedgerError::UnknownToken(id))
    }

    pub fn owner_of(&self, id: TokenId) -> Result<&Address, LedgerError> {
        self.token(id).map(|t| &t.owner)
    }

    /// Token ids held by `owner`, in acquisition order. Unknown owners hold
    /// nothing.
    pub fn tokens_of(&self, owner: &Address) -> &[TokenId] {
        self.owner_tokens.get(owner).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All issued tokens in id order.
    pub fn tokens(&self) -> impl Iterator<Item = &Token> {
        self.tokens_by_id.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(tag: &str) -> Address {
        format!("0x{tag:0>40}")
    }

    #[test]
    fn minting_assigns_contiguous_ids_and_slots() {
        let mut ledger = IssuanceLedger::new();
        let alice = addr("a11ce");
        let tokens = ledger.mint_next(5, 3, &alice).unwrap();
        assert_eq!(
            tokens.iter().map(|t| t.id).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert_eq!(
            tokens.iter().map(|t| t.slot).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        assert_eq!(ledger.issued_count(), 3);
        assert_eq!(ledger.available_supply(5), 2);

        let bob = addr("b0b");
        let more = ledger.mint_next(5, 2, &bob).unwrap();
        assert_eq!(more[0].id, 4);
        assert_eq!(more[1].id, 5);
        assert_eq!(ledger.available_supply(5), 0);
        assert_eq!(ledger.tokens_of(&alice), &[1, 2, 3]);
        assert_eq!(ledger.tokens_of(&bob), &[4, 5]);
    }

    #[test]
    fn zero_supply_mint_reports_canonical_message() {
        let mut ledger = IssuanceLedger::new();
        let err = ledger.mint_next(0, 1, &addr("a")).unwrap_err();
        assert_eq!(err.to_string(), "No supply available");

        ledger.mint_next(1, 1, &addr("a")).unwrap();
        let err = ledger.mint_next(1, 1, &addr("a")).unwrap_err();
        assert_eq!(err.to_string(), "No supply available");
    }

    #[test]
    fn oversized_mint_fails_without_partial_issuance() {
        let mut ledger = IssuanceLedger::new();
        ledger.mint_next(3, 1, &addr("a")).unwrap();
        let before = ledger.clone();

        let err = ledger.mint_next(3, 5, &addr("b")).unwrap_err();
        assert!(matches!(
            err,
            LedgerError::InsufficientSupply {
                requested: 5,
                available: 2
            }
        ));
        assert_eq!(ledger, before);
        assert_eq!(ledger.tokens_of(&addr("b")), &[] as &[TokenId]);
    }

    #[test]
    fn zero_count_violates_the_supply_precondition() {
        let mut ledger = IssuanceLedger::new();
        let err = ledger.mint_next(3, 0, &addr("a")).unwrap_err();
        assert!(matches!(
            err,
            LedgerError::InsufficientSupply {
                requested: 0,
                available: 3
            }
        ));
    }

    #[test]
    fn token_by_index_is_bounded_by_issued_count() {
        let mut ledger = IssuanceLedger::new();
        ledger.mint_next(5, 5, &addr("a")).unwrap();
        assert_eq!(ledger.token_by_index(0).unwrap().id, 1);
        assert_eq!(ledger.token_by_index(4).unwrap().id, 5);
        assert!(matches!(
            ledger.token_by_index(5),
            Err(LedgerError::IndexOutOfBounds {
                index: 5,
                issued: 5
            })
        ));
    }

    #[test]
    fn owner_of_rejects_unissued_ids() {
        let mut ledger = IssuanceLedger::new();
        assert!(matches!(ledger.owner_of(1), Err(LedgerError::UnknownToken(1))));
        ledger.mint_next(2, 1, &addr("a")).unwrap();
        assert_eq!(ledger.owner_of(1).unwrap(), &addr("a"));
        assert!(matches!(ledger.owner_of(2), Err(LedgerError::UnknownToken(2))));
    }
}
