//! Drift comparison between a document and an authoritative listing.

use serde::Serialize;

use crate::document::Document;
use crate::error::Result;
use crate::listing::{ListingSource, count_entries};

/// Outcome of one drift check: the two counts, compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DriftReport {
    /// Rows found in the document via marker-prefix matching
    pub documented: usize,
    /// Entries reported by the authoritative listing
    pub reported: usize,
}

impl DriftReport {
    /// Signed difference: reported minus documented. Zero means consistent.
    pub fn delta(&self) -> i64 {
        self.reported as i64 - self.documented as i64
    }

    /// Whether the documentation has drifted from the listing.
    pub fn is_drifted(&self) -> bool {
        self.documented != self.reported
    }
}

/// Count documented rows and listed entries, and compare.
///
/// The documented count is taken before the listing runs, so a listing
/// failure reports nothing partial.
pub fn check(document: &Document, prefix: &str, source: &dyn ListingSource) -> Result<DriftReport> {
    let documented = document.table_rows(prefix).len();
    let listing = source.fetch()?;
    let reported = count_entries(&listing);
    log::debug!("documented {documented} rows, listing reports {reported}");
    Ok(DriftReport {
        documented,
        reported,
    })
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::document::DEFAULT_ROW_PREFIX;
    use crate::error::Error;

    /// Stub listing returning fixed text, so the comparison is exercised
    /// without any real subprocess.
    struct Fixed(&'static str);

    impl ListingSource for Fixed {
        fn fetch(&self) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    struct Failing;

    impl ListingSource for Failing {
        fn fetch(&self) -> Result<String> {
            Err(Error::ListingFailed {
                program: "stub".to_string(),
                code: Some(1),
            })
        }
    }

    fn doc_with_rows(n: usize) -> Document {
        let rows: String = (0..n)
            .map(|i| format!("<td><a href=\"#e{i}\">e{i}</a></td>\n\n"))
            .collect();
        Document::from_text(format!("# Registry\n\n{rows}"))
    }

    #[test]
    fn test_matching_counts_are_consistent() {
        let report = check(&doc_with_rows(3), DEFAULT_ROW_PREFIX, &Fixed("a\nb\nc")).unwrap();
        assert_eq!(report.documented, 3);
        assert_eq!(report.reported, 3);
        assert_eq!(report.delta(), 0);
        assert!(!report.is_drifted());
    }

    #[test]
    fn test_extra_listed_entries_are_drift() {
        let report = check(&doc_with_rows(2), DEFAULT_ROW_PREFIX, &Fixed("a\nb\nc\nd")).unwrap();
        assert_eq!(report.delta(), 2);
        assert!(report.is_drifted());
    }

    #[test]
    fn test_extra_documented_rows_are_negative_drift() {
        let report = check(&doc_with_rows(4), DEFAULT_ROW_PREFIX, &Fixed("a\nb")).unwrap();
        assert_eq!(report.delta(), -2);
        assert!(report.is_drifted());
    }

    #[test]
    fn test_empty_listing_counts_as_one_entry() {
        let report = check(&doc_with_rows(0), DEFAULT_ROW_PREFIX, &Fixed("")).unwrap();
        assert_eq!(report.documented, 0);
        assert_eq!(report.reported, 1);
        assert_eq!(report.delta(), 1);
        assert!(report.is_drifted());
    }

    #[test]
    fn test_listing_failure_propagates() {
        let err = check(&doc_with_rows(1), DEFAULT_ROW_PREFIX, &Failing).unwrap_err();
        assert!(matches!(err, Error::ListingFailed { .. }));
    }
}
