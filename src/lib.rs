//! Bounded-catalog token issuance ledger.
//!
//! A fixed, pre-seeded list of company entries, each mintable at most once as
//! a uniquely numbered token, sold at a fixed unit price, with proceeds
//! withdrawable by a single owner account. The crate is split into small,
//! focused modules:
//!
//! * [`catalog`] — the immutable company catalog seeded at construction.
//! * [`descriptor`] — the metadata-rendering seam (`Descriptor` trait).
//! * [`ledger`] — the issuance state machine: supply limits, token ids,
//!   per-owner enumeration.
//! * [`treasury`] — accrued mint proceeds and the owner-gated withdrawal.
//! * [`engine`] — the façade composing the above, plus digest-checked
//!   snapshots for durable state.
//!
//! The engine is a fully serialized state machine: every mutating operation
//! takes `&mut self`, so a concurrent front end only needs to put the engine
//! behind one `Mutex` (or a single-writer task) to keep the check-then-act
//! sequences in `mint` and `withdraw` atomic.

pub mod catalog;
pub mod descriptor;
pub mod engine;
pub mod ledger;
pub mod treasury;

pub use catalog::{CatalogError, CatalogStore, CompanyEntry};
pub use descriptor::{Descriptor, Metadata, TextDescriptor};
pub use engine::{CompaniesEngine, EngineError, EngineSnapshot};
pub use ledger::{IssuanceLedger, LedgerError, Token};
pub use treasury::{TreasuryAccount, TreasuryError};

/// Account identity. By convention a `0x`-prefixed hex string; the ledger
/// treats it as an opaque key and enforces nothing about its shape.
pub type Address = String;

/// Monetary amount in the smallest currency unit.
pub type Amount = u64;

/// Token identifier, assigned contiguously from 1 in issuance order.
pub type TokenId = u64;

/// One whole native currency unit in smallest units.
pub const COIN: Amount = 100_000_000;

/// Price of one token unless overridden at engine construction.
pub const DEFAULT_UNIT_PRICE: Amount = COIN;
