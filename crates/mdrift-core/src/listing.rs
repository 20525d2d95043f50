//! Authoritative listing capture.
//!
//! The drift check needs a second, programmatically generated count to hold
//! the document against. [`ListingSource`] abstracts where that text comes
//! from so the comparison logic can be tested against a stub; in production
//! it is [`CommandListing`], which runs the registry's own CLI in its
//! porcelain output mode (one entry per line) and captures stdout.

use std::process::Command;

use crate::error::{Error, Result};

/// A source of porcelain listing text: one entry per line, no decoration.
pub trait ListingSource {
    /// Produce the listing text, trailing whitespace stripped.
    fn fetch(&self) -> Result<String>;
}

/// Listing obtained by running an external command and capturing stdout.
///
/// The command is run synchronously with no timeout; a hanging listing
/// command hangs the whole check.
#[derive(Debug, Clone)]
pub struct CommandListing {
    program: String,
    args: Vec<String>,
    scrub: Option<String>,
}

impl CommandListing {
    /// A listing command with no arguments.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            scrub: None,
        }
    }

    /// Append arguments to the command line.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Hide one environment variable from the child process.
    ///
    /// Debug/verbosity flags leak banners into porcelain output, so the
    /// variable is removed from the child's environment only. The checker's
    /// own environment is never touched, on any path.
    pub fn scrub_env(mut self, name: impl Into<String>) -> Self {
        self.scrub = Some(name.into());
        self
    }
}

impl ListingSource for CommandListing {
    fn fetch(&self) -> Result<String> {
        let mut command = Command::new(&self.program);
        command.args(&self.args);
        if let Some(name) = &self.scrub {
            command.env_remove(name);
        }

        log::debug!("running listing command: {} {:?}", self.program, self.args);
        let output = command.output().map_err(|source| Error::Spawn {
            program: self.program.clone(),
            source,
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            if !stderr.trim().is_empty() {
                log::warn!("listing command stderr: {}", stderr.trim());
            }
            return Err(Error::ListingFailed {
                program: self.program.clone(),
                code: output.status.code(),
            });
        }

        let stdout = String::from_utf8(output.stdout).map_err(|source| Error::ListingDecode {
            program: self.program.clone(),
            source,
        })?;
        Ok(stdout.trim_end().to_string())
    }
}

/// Number of entries in a porcelain listing: newline count plus one.
///
/// Empty text therefore counts as one entry, not zero. That quirk is
/// inherited from the original counting convention and kept on purpose; a
/// registry with zero entries and an empty listing still reports drift.
pub fn count_entries(listing: &str) -> usize {
    listing.matches('\n').count() + 1
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    fn sh(script: &str) -> CommandListing {
        CommandListing::new("sh").args(["-c", script])
    }

    // ------------------------------------------------------------------------
    // count_entries
    // ------------------------------------------------------------------------

    #[test]
    fn test_count_entries_one_per_line() {
        assert_eq!(count_entries("a\nb\nc"), 3);
    }

    #[test]
    fn test_count_entries_single_entry() {
        assert_eq!(count_entries("only"), 1);
    }

    #[test]
    fn test_count_entries_empty_counts_as_one() {
        assert_eq!(count_entries(""), 1);
    }

    // ------------------------------------------------------------------------
    // CommandListing
    // ------------------------------------------------------------------------

    #[test]
    fn test_fetch_captures_stdout() {
        let listing = sh("printf 'a\\nb\\nc'").fetch().unwrap();
        assert_eq!(listing, "a\nb\nc");
        assert_eq!(count_entries(&listing), 3);
    }

    #[test]
    fn test_fetch_strips_trailing_whitespace() {
        let listing = sh("printf 'a\\nb\\n\\n'").fetch().unwrap();
        assert_eq!(listing, "a\nb");
    }

    #[test]
    fn test_fetch_nonzero_exit_is_error() {
        let err = sh("exit 3").fetch().unwrap_err();
        match err {
            Error::ListingFailed { code, .. } => assert_eq!(code, Some(3)),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_fetch_missing_program_is_spawn_error() {
        let err = CommandListing::new("mdrift-no-such-program")
            .fetch()
            .unwrap_err();
        assert!(matches!(err, Error::Spawn { .. }));
    }

    #[test]
    fn test_fetch_non_utf8_output_is_decode_error() {
        let err = sh("printf '\\377'").fetch().unwrap_err();
        assert!(matches!(err, Error::ListingDecode { .. }));
    }
}
