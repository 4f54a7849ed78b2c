//! The immutable company catalog.
//!
//! Seeded once at construction and read-only thereafter; the catalog length
//! is the total issuable supply. Entries are addressed by 1-based slot index.

use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("slot {slot} out of range (catalog holds {len} entries)")]
    OutOfRange { slot: u64, len: u64 },
}

/// A single catalog entry. Immutable once stored; identified by its slot.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CompanyEntry {
    pub name: String,
    pub tags: Vec<String>,
    pub batch: String,
}

/// Ordered, fixed-length company list. An empty catalog is valid and simply
/// yields zero mintable supply.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct CatalogStore {
    entries: Vec<CompanyEntry>,
}

impl CatalogStore {
    pub fn new(entries: Vec<CompanyEntry>) -> Self {
        Self { entries }
    }

    /// Total catalog length, i.e. the total issuable supply.
    pub fn company_supply(&self) -> u64 {
        self.entries.len() as u64
    }

    /// Entry backing the given slot. Slots are 1-based.
    pub fn entry_at(&self, slot: u64) -> Result<&CompanyEntry, CatalogError> {
        if slot == 0 || slot > self.entries.len() as u64 {
            return Err(CatalogError::OutOfRange {
                slot,
                len: self.entries.len() as u64,
            });
        }
        Ok(&self.entries[(slot - 1) as usize])
    }

    /// All entries in insertion order.
    pub fn entries(&self) -> &[CompanyEntry] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CompanyEntry {
        CompanyEntry {
            name: "Mighty Health".into(),
            tags: vec!["Wellness".into(), "Fitness".into(), "Aging".into()],
            batch: "S22".into(),
        }
    }

    #[test]
    fn supply_matches_seed_length() {
        assert_eq!(CatalogStore::new(vec![]).company_supply(), 0);
        assert_eq!(CatalogStore::new(vec![sample()]).company_supply(), 1);
        assert_eq!(
            CatalogStore::new(vec![sample(), sample(), sample()]).company_supply(),
            3
        );
    }

    #[test]
    fn entry_lookup_is_one_based() {
        let store = CatalogStore::new(vec![sample()]);
        assert_eq!(store.entry_at(1).unwrap().name, "Mighty Health");
        assert!(matches!(
            store.entry_at(0),
            Err(CatalogError::OutOfRange { slot: 0, len: 1 })
        ));
        assert!(matches!(
            store.entry_at(2),
            Err(CatalogError::OutOfRange { slot: 2, len: 1 })
        ));
    }

    #[test]
    fn seed_round_trips_through_json() {
        let json = r#"[{"name":"Mighty Health","tags":["Wellness","Fitness","Aging"],"batch":"S22"}]"#;
        let entries: Vec<CompanyEntry> = serde_json::from_str(json).unwrap();
        let store = CatalogStore::new(entries);
        assert_eq!(store.company_supply(), 1);
        assert_eq!(store.entry_at(1).unwrap(), &sample());
    }
}
