//! Core domain types for CiteScout reference lists.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// ReferenceRecord
// ---------------------------------------------------------------------------

/// One literature reference extracted from a spreadsheet row.
///
/// Records are built once during generation and never mutated. The `index` is
/// the 1-based position among valid rows and doubles as the DOM/storage
/// identifier in the generated page (`paper<index>`, `check<index>`); it is
/// only stable within a single generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceRecord {
    /// 1-based position among rows that carried a title.
    pub index: usize,
    /// Document or patent title. Presence is the sole inclusion filter.
    pub title: String,
    /// Citation text, already truncated to the configured display prefix.
    pub citation_excerpt: String,
    /// Publication year, if the source row had one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<String>,
    /// Journal name or patent number, if the source row had one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue: Option<String>,
    /// Document/patent type, if the source row had one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_type: Option<String>,
}

// ---------------------------------------------------------------------------
// LoadSummary
// ---------------------------------------------------------------------------

/// Statistics from one spreadsheet load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadSummary {
    /// Data rows seen in the sheet (header excluded).
    pub rows_seen: usize,
    /// Records extracted (rows with a non-empty title).
    pub records: usize,
    /// Rows skipped for missing a title.
    pub skipped: usize,
    /// Record counts grouped by document type, sorted by type label.
    pub by_doc_type: BTreeMap<String, usize>,
}

impl LoadSummary {
    /// Record one extracted row with its optional document type.
    pub fn count_record(&mut self, doc_type: Option<&str>) {
        self.records += 1;
        if let Some(t) = doc_type {
            *self.by_doc_type.entry(t.to_string()).or_insert(0) += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_serialization_skips_empty_optionals() {
        let record = ReferenceRecord {
            index: 1,
            title: "Perovskite solar cells".into(),
            citation_excerpt: "Smith et al.".into(),
            year: None,
            venue: None,
            doc_type: None,
        };

        let serialized = toml::to_string(&record).expect("serialize");
        assert!(serialized.contains("title"));
        assert!(!serialized.contains("year"));
        assert!(!serialized.contains("venue"));
    }

    #[test]
    fn summary_counts_by_type() {
        let mut summary = LoadSummary::default();
        summary.count_record(Some("journal article"));
        summary.count_record(Some("journal article"));
        summary.count_record(Some("patent"));
        summary.count_record(None);

        assert_eq!(summary.records, 4);
        assert_eq!(summary.by_doc_type.get("journal article"), Some(&2));
        assert_eq!(summary.by_doc_type.get("patent"), Some(&1));
    }
}
