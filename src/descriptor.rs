//! Metadata-rendering seam.
//!
//! The core never renders presentation data itself; it only requires a pure
//! `describe` capability. [`TextDescriptor`] is the bundled reference
//! implementation used by the CLI and the test suite.

use serde::{Deserialize, Serialize};

use crate::catalog::CompanyEntry;

/// Human-facing rendering of a catalog entry.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Metadata {
    pub name: String,
    pub batch: String,
    pub tags: Vec<String>,
    pub description: String,
}

/// Maps a catalog entry to its metadata. Implementations must be pure: the
/// same entry always yields the same metadata.
pub trait Descriptor {
    fn describe(&self, entry: &CompanyEntry) -> Metadata;
}

/// Plain-text renderer: `"<name> - <batch> batch (<tag>, <tag>, ...)"`.
#[derive(Clone, Debug, Default)]
pub struct TextDescriptor;

impl Descriptor for TextDescriptor {
    fn describe(&self, entry: &CompanyEntry) -> Metadata {
        let description = if entry.tags.is_empty() {
            format!("{} - {} batch", entry.name, entry.batch)
        } else {
            format!(
                "{} - {} batch ({})",
                entry.name,
                entry.batch,
                entry.tags.join(", ")
            )
        };
        Metadata {
            name: entry.name.clone(),
            batch: entry.batch.clone(),
            tags: entry.tags.clone(),
            description,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_descriptor_renders_tags_in_order() {
        let entry = CompanyEntry {
            name: "Mighty Health".into(),
            tags: vec!["Wellness".into(), "Fitness".into(), "Aging".into()],
            batch: "S22".into(),
        };
        let meta = TextDescriptor.describe(&entry);
        assert_eq!(
            meta.description,
            "Mighty Health - S22 batch (Wellness, Fitness, Aging)"
        );
        assert_eq!(meta.tags, entry.tags);
    }

    #[test]
    fn text_descriptor_handles_untagged_entries() {
        let entry = CompanyEntry {
            name: "Acme".into(),
            tags: vec![],
            batch: "W10".into(),
        };
        assert_eq!(TextDescriptor.describe(&entry).description, "Acme - W10 batch");
    }
}
