//! The façade composing catalog, ledger, treasury, and the descriptor seam.
//!
//! `CompaniesEngine` owns all mutable state and takes `&mut self` for every
//! mutating operation, so each call runs to completion with exclusive access.
//! [`EngineSnapshot`] is the durable form of that state: a plain serde value
//! carrying a Sha256 digest that `restore` recomputes and verifies.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::catalog::{CatalogError, CatalogStore, CompanyEntry};
use crate::descriptor::{Descriptor, Metadata};
use crate::ledger::{IssuanceLedger, LedgerError, Token};
use crate::treasury::{TreasuryAccount, TreasuryError};
use crate::{Address, Amount, TokenId, DEFAULT_UNIT_PRICE};

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error(transparent)]
    Treasury(#[from] TreasuryError),
    #[error("insufficient payment: required {required}, got {payment}")]
    InsufficientPayment { required: Amount, payment: Amount },
    /// Strict-payment policy: overpayment is rejected rather than kept, so
    /// no funds are ever silently absorbed.
    #[error("excess payment: required {required}, got {payment}")]
    ExcessPayment { required: Amount, payment: Amount },
    #[error("snapshot digest mismatch")]
    CorruptSnapshot,
}

/// Durable form of the engine state. The digest covers every other field;
/// [`CompaniesEngine::restore`] rejects snapshots whose digest no longer
/// matches their content.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct EngineSnapshot {
    pub unit_price: Amount,
    pub catalog: CatalogStore,
    pub ledger: IssuanceLedger,
    pub treasury: TreasuryAccount,
    pub digest: [u8; 32],
}

/// The issuance engine: a bounded catalog, the mint state machine over it,
/// and the owner-gated treasury, with metadata rendering delegated to `D`.
pub struct CompaniesEngine<D> {
    descriptor: D,
    unit_price: Amount,
    catalog: CatalogStore,
    ledger: IssuanceLedger,
    treasury: TreasuryAccount,
}

impl<D: Descriptor> CompaniesEngine<D> {
    /// Seeds the catalog and fixes the owner; `None` disables withdrawal
    /// permanently. Uses [`DEFAULT_UNIT_PRICE`].
    pub fn new(descriptor: D, entries: Vec<CompanyEntry>, owner: Option<Address>) -> Self {
        Self::with_unit_price(descriptor, entries, owner, DEFAULT_UNIT_PRICE)
    }

    pub fn with_unit_price(
        descriptor: D,
        entries: Vec<CompanyEntry>,
        owner: Option<Address>,
        unit_price: Amount,
    ) -> Self {
        Self {
            descriptor,
            unit_price,
            catalog: CatalogStore::new(entries),
            ledger: IssuanceLedger::new(),
            treasury: TreasuryAccount::new(owner),
        }
    }

    pub fn company_supply(&self) -> u64 {
        self.catalog.company_supply()
    }

    pub fn available_supply(&self) -> u64 {
        self.ledger.available_supply(self.catalog.company_supply())
    }

    pub fn unit_price(&self) -> Amount {
        self.unit_price
    }

    pub fn treasury_balance(&self) -> Amount {
        self.treasury.balance()
    }

    pub fn owner(&self) -> Option<&Address> {
        self.treasury.owner()
    }

    /// Mints `count` tokens to `caller` against an attached `payment`.
    ///
    /// Payment must equal `count * unit_price` exactly (strict-payment
    /// policy); supply errors then surface from the ledger untouched. The
    /// treasury is credited only after issuance succeeded, so a failure at
    /// any stage leaves all state unchanged.
    pub fn mint(
        &mut self,
        caller: &Address,
        count: u64,
        payment: Amount,
    ) -> Result<Vec<Token>, EngineError> {
        let required = match count.checked_mul(self.unit_price) {
            Some(required) => required,
            // A count that overflows the price multiply exceeds any catalog.
            None => {
                return Err(LedgerError::InsufficientSupply {
                    requested: count,
                    available: self.available_supply(),
                }
                .into())
            }
        };
        if payment < required {
            return Err(EngineError::InsufficientPayment { required, payment });
        }
        if payment > required {
            return Err(EngineError::ExcessPayment { required, payment });
        }

        let tokens = self
            .ledger
            .mint_next(self.catalog.company_supply(), count, caller)?;
        self.treasury.credit(payment);
        Ok(tokens)
    }

    /// Renders the metadata for an issued token via the descriptor seam.
    pub fn describe(&self, token_id: TokenId) -> Result<Metadata, EngineError> {
        let token = self.ledger.token(token_id)?;
        let entry = self.catalog.entry_at(token.slot)?;
        Ok(self.descriptor.describe(entry))
    }

    pub fn token_by_index(&self, index: u64) -> Result<&Token, EngineError> {
        Ok(self.ledger.token_by_index(index)?)
    }

    pub fn owner_of(&self, token_id: TokenId) -> Result<&Address, EngineError> {
        Ok(self.ledger.owner_of(token_id)?)
    }

    pub fn tokens_of(&self, owner: &Address) -> &[TokenId] {
        self.ledger.tokens_of(owner)
    }

    /// Transfers the full treasury balance to the owner; zero balance is a
    /// no-op success.
    pub fn withdraw(&mut self, caller: &Address) -> Result<Amount, EngineError> {
        Ok(self.treasury.withdraw(caller)?)
    }

    /// Captures the durable state together with its integrity digest.
    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            unit_price: self.unit_price,
            catalog: self.catalog.clone(),
            ledger: self.ledger.clone(),
            treasury: self.treasury.clone(),
            digest: state_digest(&self.unit_price, &self.catalog, &self.ledger, &self.treasury),
        }
    }

    /// Rebuilds an engine from a snapshot, verifying the digest first.
    pub fn restore(descriptor: D, snapshot: EngineSnapshot) -> Result<Self, EngineError> {
        let expected = state_digest(
            &snapshot.unit_price,
            &snapshot.catalog,
            &snapshot.ledger,
            &snapshot.treasury,
        );
        if expected != snapshot.digest {
            return Err(EngineError::CorruptSnapshot);
        }
        Ok(Self {
            descriptor,
            unit_price: snapshot.unit_price,
            catalog: snapshot.catalog,
            ledger: snapshot.ledger,
            treasury: snapshot.treasury,
        })
    }
}

/// Sha256 over domain-prefixed leaves of the whole engine state.
fn state_digest(
    unit_price: &Amount,
    catalog: &CatalogStore,
    ledger: &IssuanceLedger,
    treasury: &TreasuryAccount,
) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(b"price");
    hasher.update(unit_price.to_le_bytes());

    for entry in catalog.entries() {
        hasher.update(b"entry");
        hasher.update((entry.name.len() as u64).to_le_bytes());
        hasher.update(entry.name.as_bytes());
        hasher.update((entry.tags.len() as u64).to_le_bytes());
        for tag in &entry.tags {
            hasher.update((tag.len() as u64).to_le_bytes());
            hasher.update(tag.as_bytes());
        }
        hasher.update((entry.batch.len() as u64).to_le_bytes());
        hasher.update(entry.batch.as_bytes());
    }

    for token in ledger.tokens() {
        hasher.update(b"token");
        hasher.update(token.id.to_le_bytes());
        hasher.update(token.slot.to_le_bytes());
        hasher.update((token.owner.len() as u64).to_le_bytes());
        hasher.update(token.owner.as_bytes());
    }

    hasher.update(b"treasury");
    match treasury.owner() {
        Some(owner) => {
            hasher.update((owner.len() as u64).to_le_bytes());
            hasher.update(owner.as_bytes());
        }
        None => hasher.update(u64::MAX.to_le_bytes()),
    }
    hasher.update(treasury.balance().to_le_bytes());

    hasher.finalize().into()
}
