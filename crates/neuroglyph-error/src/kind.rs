//! Error kinds for neuroglyph operations

use strum_macros::{Display, IntoStaticStr};

/// The kind of error that occurred.
///
/// Callers match on `ErrorKind` to pick an exit code or decide whether a
/// failure is worth reporting as a warning only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr, Display)]
#[non_exhaustive]
pub enum ErrorKind {
    // =========================================================================
    // General errors
    // =========================================================================
    /// An unexpected error occurred - catch-all for unhandled cases
    Unexpected,

    /// Invalid configuration file or font file
    ConfigInvalid,

    // =========================================================================
    // Generation errors
    // =========================================================================
    /// Malformed region, negative or impossible counts, bad ranges or metrics
    InvalidParameters,

    /// A bounded sampling budget ran out before the layout was complete
    GenerationFailed,

    /// A character has no glyph in the active table
    GlyphLookupMiss,

    // =========================================================================
    // File/IO errors
    // =========================================================================
    /// File not found
    FileNotFound,

    /// Permission denied
    PermissionDenied,

    /// IO operation failed
    IoFailed,
}

impl ErrorKind {
    /// Returns the error kind as a static string
    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }

    /// Check if this error kind is retryable by default
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorKind::IoFailed)
    }

    /// Whether rendering can continue after an error of this kind.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ErrorKind::GlyphLookupMiss)
    }
}
