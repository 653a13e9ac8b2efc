//! Whether repeating an operation could change its outcome.

use strum_macros::{Display, IntoStaticStr};

use crate::ErrorKind;

/// Generation is deterministic, so only I/O failures are ever `Temporary`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum ErrorStatus {
    /// The same inputs fail the same way.
    #[default]
    Permanent,
    /// The environment may change; a rerun might succeed.
    Temporary,
}

impl ErrorStatus {
    pub fn for_kind(kind: ErrorKind) -> Self {
        if kind.is_retryable() {
            ErrorStatus::Temporary
        } else {
            ErrorStatus::Permanent
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorStatus::Temporary)
    }

    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}
