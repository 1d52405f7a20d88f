//! Compiled matchers and match outcomes

use crate::compiler;
use crate::error::{CompileError, PatternError};
use crate::field::{FieldKind, FieldRecord};
use crate::unit::{Search, Unit, UnitId};

/// Result of matching one candidate name
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome {
    /// The name does not have the pattern's shape
    NoMatch,
    /// The name matched; directory components in canonical order followed
    /// by misc captures
    Match(Vec<String>),
    /// The name fits the pattern's skeleton but its fields are inconsistent
    PatternError(PatternError),
}

impl MatchOutcome {
    pub fn is_match(&self) -> bool {
        matches!(self, MatchOutcome::Match(_))
    }

    pub fn dirs(&self) -> Option<&[String]> {
        match self {
            MatchOutcome::Match(dirs) => Some(dirs),
            _ => None,
        }
    }

    /// `Ok(None)` for `NoMatch`, `Ok(Some(dirs))` for `Match`
    pub fn into_result(self) -> Result<Option<Vec<String>>, PatternError> {
        match self {
            MatchOutcome::NoMatch => Ok(None),
            MatchOutcome::Match(dirs) => Ok(Some(dirs)),
            MatchOutcome::PatternError(err) => Err(err),
        }
    }
}

/// An immutable, reusable matcher for one pattern and table.
///
/// Holds no interior state; share it by reference across threads and
/// call [`CompiledMatcher::match_name`] once per candidate.
#[derive(Debug, Clone)]
pub struct CompiledMatcher {
    pattern: String,
    table: String,
    units: Vec<Unit>,
    start: UnitId,
    highest: FieldKind,
}

impl CompiledMatcher {
    /// Compile `pattern` with `{table}` bound to `table`.
    pub fn compile(pattern: &str, table: &str) -> Result<Self, CompileError> {
        compiler::compile(pattern, table)
    }

    pub(crate) fn from_parts(
        pattern: String,
        table: String,
        units: Vec<Unit>,
        start: UnitId,
        highest: FieldKind,
    ) -> Self {
        Self {
            pattern,
            table,
            units,
            start,
            highest,
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// Finest date field the pattern references
    pub fn highest_field(&self) -> FieldKind {
        self.highest
    }

    /// Date fields every match produces, in canonical order
    pub fn fields(&self) -> &'static [FieldKind] {
        self.highest.prefix()
    }

    /// Run the pattern against `name` and return the raw field record.
    pub fn extract(&self, name: &str) -> Result<Option<FieldRecord>, PatternError> {
        Search::new(&self.units, name).run(self.start, 0)
    }

    /// Match `name` and render its destination directories.
    pub fn match_name(&self, name: &str) -> MatchOutcome {
        let record = match self.extract(name) {
            Ok(Some(record)) => record,
            Ok(None) => return MatchOutcome::NoMatch,
            Err(err) => return MatchOutcome::PatternError(err),
        };
        match record.render_dirs(self.highest) {
            Ok(dirs) => MatchOutcome::Match(dirs),
            Err(err) => MatchOutcome::PatternError(err),
        }
    }
}

/// Compile a pattern once per upload configuration.
pub fn compile(pattern: &str, table: &str) -> Result<CompiledMatcher, CompileError> {
    CompiledMatcher::compile(pattern, table)
}

/// Match one candidate file name.
pub fn match_file(matcher: &CompiledMatcher, file_name: &str) -> MatchOutcome {
    matcher.match_name(file_name)
}
