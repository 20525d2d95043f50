//! Markdown registry document scanning.
//!
//! A registry document is an ordinary markdown file (typically a README)
//! whose entry table is rendered as raw HTML. Each documented entry is one
//! raw-HTML block starting with a fixed marker prefix, so counting entries
//! reduces to counting matching blocks:
//!
//! ```rust
//! use mdrift_core::{Document, DEFAULT_ROW_PREFIX};
//!
//! let doc = Document::from_text("intro\n\n<td><a href=\"#one\">one</a></td>\n\n<td><a href=\"#two\">two</a></td>\n");
//! assert_eq!(doc.table_rows(DEFAULT_ROW_PREFIX).len(), 2);
//! ```
//!
//! This is deliberately a heuristic count, not a validated table parse: the
//! checker trusts that every documented row begins with the marker prefix
//! and that no other raw-HTML block in the document shares it. Prose that
//! merely mentions the prefix is never counted, because only blocks the
//! parser classifies as raw HTML are inspected.

use pulldown_cmark::{Event, Parser, Tag, TagEnd};
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// Marker prefix of a rendered registry row: the opening cell/anchor
/// sequence emitted by the table regeneration tool.
pub const DEFAULT_ROW_PREFIX: &str = "<td><a";

/// An immutable markdown document loaded into memory.
#[derive(Debug, Clone)]
pub struct Document {
    text: String,
}

impl Document {
    /// Load a document from a file.
    ///
    /// The file must be valid UTF-8. Fails with [`Error::Read`] if it is
    /// missing, unreadable, or not text.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("loaded {} ({} bytes)", path.display(), text.len());
        Ok(Self { text })
    }

    /// Wrap already-loaded markdown text.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// The raw markdown text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Contents of every top-level raw-HTML block, in document order.
    ///
    /// Blocks of any other kind (paragraphs, headings, code blocks) are
    /// never included, even when their text contains HTML-looking content.
    /// Inline HTML inside a paragraph does not form a block and is likewise
    /// ignored.
    pub fn html_blocks(&self) -> Vec<String> {
        let parser = Parser::new(&self.text);
        let mut blocks = Vec::new();
        let mut current: Option<String> = None;

        for event in parser {
            match event {
                Event::Start(Tag::HtmlBlock) => {
                    current = Some(String::new());
                }
                Event::Html(html) => {
                    if let Some(block) = current.as_mut() {
                        block.push_str(&html);
                    }
                }
                Event::End(TagEnd::HtmlBlock) => {
                    if let Some(block) = current.take() {
                        blocks.push(block);
                    }
                }
                _ => {}
            }
        }

        blocks
    }

    /// Raw-HTML blocks whose content starts with `prefix`, in document
    /// order. The length of this list is the documented entry count.
    ///
    /// No matches is an empty list, not an error.
    pub fn table_rows(&self, prefix: &str) -> Vec<String> {
        self.html_blocks()
            .into_iter()
            .filter(|block| block.starts_with(prefix))
            .collect()
    }
}

// ============================================================================
// Tests
// ============================================================================
