//! # neuroglyph-error
//!
//! Unified error handling for the neuroglyph generators.
//!
//! ## Design Philosophy
//!
//! - **ErrorKind**: Know what went wrong (e.g., InvalidParameters, GenerationFailed)
//! - **ErrorStatus**: Decide how to handle it (Permanent, Temporary)
//! - **Error Context**: Key-value pairs naming the offending parameter or path
//! - **Error Source**: Wrap underlying errors (I/O, TOML) without leaking raw types
//!
//! ## Usage
//!
//! ```rust
//! use neuroglyph_error::{Error, ErrorKind};
//!
//! fn check_radius(rx: f64) -> Result<(), Error> {
//!     if rx > 0.0 {
//!         return Ok(());
//!     }
//!     Err(Error::new(ErrorKind::InvalidParameters, "radius must be positive")
//!         .with_operation("layout::validate")
//!         .with_context("rx", rx.to_string()))
//! }
//!
//! assert!(check_radius(-1.0).is_err());
//! ```
//!
//! ## Principles
//!
//! - All fallible functions return `Result<T, neuroglyph_error::Error>`
//! - External errors are wrapped with `set_source(err)`
//! - Generation is deterministic, so nothing in the core is ever retried
//! - `Display` renders `Kind (status) at operation, context { .. } => message`;
//!   the `at` part is left out for errors raised outside a named operation

mod error;
mod kind;
mod status;

pub use error::Error;
pub use kind::ErrorKind;
pub use status::ErrorStatus;

/// Result type alias using neuroglyph Error
pub type Result<T> = std::result::Result<T, Error>;
