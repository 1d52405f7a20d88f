//! Landing Pattern - File Name Pattern Engine
//!
//! Compiles the small pattern language used by upload configurations into
//! an immutable matcher that recognises file names, extracts their date
//! fields and free-text captures, and renders a destination directory path.
//!
//! # Pattern Language
//!
//! | Token | Meaning |
//! |---|---|
//! | any char except `{ } * ? \` | itself |
//! | `\{ \} \* \? \\` | escaped literal |
//! | `{table}` | the configured table name |
//! | `*` | any run of characters, not captured |
//! | `?` | any single character, not captured |
//! | `{yyyyMMdd}` | calendar group (see [`timestamp`]) |
//! | `{?*}` | wildcard capture, becomes a misc directory |
//!
//! # Example
//!
//! ```
//! use landing_pattern::{compile, MatchOutcome};
//!
//! let matcher = compile("{table}_{?*}_{yyyyMMdd}", "sales").unwrap();
//! assert_eq!(
//!     matcher.match_name("sales_NOTES_20140102"),
//!     MatchOutcome::Match(vec![
//!         "2014".to_string(),
//!         "01".to_string(),
//!         "02".to_string(),
//!         "NOTES".to_string(),
//!     ])
//! );
//! assert_eq!(matcher.match_name("sales_20140102"), MatchOutcome::NoMatch);
//! ```
//!
//! This crate performs no I/O.

pub mod compiler;
pub mod error;
pub mod field;
pub mod matcher;
pub mod timestamp;
mod unit;

pub use error::{CompileError, PatternError};
pub use field::{FieldKind, FieldRecord};
pub use matcher::{compile, match_file, CompiledMatcher, MatchOutcome};
pub use timestamp::TimestampFormat;
