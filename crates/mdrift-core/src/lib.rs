#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! mdrift core library
//!
//! Drift checking between a human-maintained markdown registry table and an
//! authoritative listing command: the number of table rows documented in the
//! markdown must equal the number of entries the listing reports.
//!
//! # Modules
//!
//! - [`document`]: markdown loading and raw-HTML row extraction
//! - [`listing`]: listing capture ([`ListingSource`] seam, [`CommandListing`])
//! - [`drift`]: count comparison and [`DriftReport`]
//! - [`error`]: error types
//!
//! # Example
//!
//! ```rust
//! use mdrift_core::{check, Document, ListingSource, Result, DEFAULT_ROW_PREFIX};
//!
//! struct Fixed(&'static str);
//!
//! impl ListingSource for Fixed {
//!     fn fetch(&self) -> Result<String> {
//!         Ok(self.0.to_string())
//!     }
//! }
//!
//! let doc = Document::from_text("<td><a href=\"#a\">a</a></td>\n\n<td><a href=\"#b\">b</a></td>\n");
//! let report = check(&doc, DEFAULT_ROW_PREFIX, &Fixed("a\nb")).unwrap();
//! assert!(!report.is_drifted());
//! ```

pub mod document;
pub mod drift;
pub mod error;
pub mod listing;

// Re-exports for convenience
pub use document::{DEFAULT_ROW_PREFIX, Document};
pub use drift::{DriftReport, check};
pub use error::{Error, Result};
pub use listing::{CommandListing, ListingSource, count_entries};
