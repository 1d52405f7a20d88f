//! Error types for pattern compilation and matching

use crate::field::FieldKind;
use thiserror::Error;

/// Errors raised while compiling a pattern. All of them are terminal: the
/// pattern has to be fixed before it can be used.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    #[error("Invalid escape at offset {offset}: only \\{{ \\}} \\* \\? \\\\ are allowed")]
    InvalidEscape { offset: usize },

    #[error("Unterminated '{{' group starting at offset {offset}")]
    UnterminatedGroup { offset: usize },

    #[error("Unmatched '}}' at offset {offset}")]
    UnmatchedBrace { offset: usize },

    #[error("Empty '{{}}' group at offset {offset}")]
    EmptyGroup { offset: usize },

    #[error("Unsupported calendar token '{token}' in group '{{{group}}}'")]
    UnsupportedToken { group: String, token: String },

    #[error("Unterminated quote in calendar group '{{{group}}}'")]
    UnterminatedQuote { group: String },

    #[error("Calendar group '{{{group}}}' does not reference any date field")]
    NoCalendarFields { group: String },

    #[error("Pattern does not reference any date field")]
    NoDateFields,

    #[error("Pattern references {highest} but is missing {}", join_fields(.missing))]
    MissingFields {
        highest: FieldKind,
        missing: Vec<FieldKind>,
    },
}

/// Hard failure found while matching one candidate. Signals a data or
/// configuration problem, never an ordinary non-match.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    #[error("Conflicting values for {field}: {first} and {second}")]
    FieldConflict {
        field: FieldKind,
        first: i64,
        second: i64,
    },

    #[error("Negative value {value} parsed for {field}")]
    NegativeField { field: FieldKind, value: i64 },

    #[error("Malformed date '{input}' for calendar group '{{{group}}}': {message}")]
    MalformedDate {
        group: String,
        input: String,
        message: String,
    },

    #[error("Missing value for {0} in an otherwise complete match")]
    MissingField(FieldKind),
}

fn join_fields(fields: &[FieldKind]) -> String {
    fields
        .iter()
        .map(|f| f.name())
        .collect::<Vec<_>>()
        .join(", ")
}
