//! Extracted date-time fields and free-text captures
//!
//! A [`FieldRecord`] is built up while a candidate name is matched. Date-time
//! fields live in a fixed canonical order (year → second); a valid pattern
//! must cover a prefix of that order with no gaps.

use crate::error::{CompileError, PatternError};
use std::fmt;

/// Date-time field kinds, ordered from coarsest to finest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldKind {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
}

impl FieldKind {
    /// All kinds in canonical order
    pub const ALL: &'static [FieldKind] = &[
        FieldKind::Year,
        FieldKind::Month,
        FieldKind::Day,
        FieldKind::Hour,
        FieldKind::Minute,
        FieldKind::Second,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            FieldKind::Year => "year",
            FieldKind::Month => "month",
            FieldKind::Day => "day",
            FieldKind::Hour => "hour",
            FieldKind::Minute => "minute",
            FieldKind::Second => "second",
        }
    }

    /// Rendered width in a directory name
    pub fn width(self) -> usize {
        match self {
            FieldKind::Year => 4,
            _ => 2,
        }
    }

    /// Zero-padded directory name for a value of this field
    pub fn render(self, value: i64) -> String {
        format!("{:0width$}", value, width = self.width())
    }

    /// Kinds from `Year` up to and including `self`
    pub fn prefix(self) -> &'static [FieldKind] {
        &Self::ALL[..=self.index()]
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Check that `referenced` forms a gap-free canonical prefix and return its
/// highest field.
pub fn validate_fields(referenced: &[FieldKind]) -> Result<FieldKind, CompileError> {
    let highest = referenced
        .iter()
        .copied()
        .max()
        .ok_or(CompileError::NoDateFields)?;

    let missing: Vec<FieldKind> = highest
        .prefix()
        .iter()
        .copied()
        .filter(|kind| !referenced.contains(kind))
        .collect();

    if missing.is_empty() {
        Ok(highest)
    } else {
        Err(CompileError::MissingFields { highest, missing })
    }
}

/// Date-time values and misc captures extracted from one candidate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldRecord {
    time: [Option<i64>; 6],
    misc: Vec<String>,
}

impl FieldRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record holding a single misc capture
    pub fn capture(text: impl Into<String>) -> Self {
        Self {
            time: [None; 6],
            misc: vec![text.into()],
        }
    }

    pub fn get(&self, kind: FieldKind) -> Option<i64> {
        self.time[kind.index()]
    }

    pub fn misc(&self) -> &[String] {
        &self.misc
    }

    /// Present date-time fields in canonical order
    pub fn time_fields(&self) -> impl Iterator<Item = (FieldKind, i64)> + '_ {
        FieldKind::ALL
            .iter()
            .filter_map(move |&kind| self.get(kind).map(|value| (kind, value)))
    }

    /// Set a date-time field. Setting the same value twice is a no-op; a
    /// different value is a conflict.
    pub fn set(&mut self, kind: FieldKind, value: i64) -> Result<(), PatternError> {
        let slot = &mut self.time[kind.index()];
        match *slot {
            Some(first) if first != value => Err(PatternError::FieldConflict {
                field: kind,
                first,
                second: value,
            }),
            _ => {
                *slot = Some(value);
                Ok(())
            }
        }
    }

    pub fn push_misc(&mut self, text: impl Into<String>) {
        self.misc.push(text.into());
    }

    /// Combine two records. Misc captures of `self` come first.
    pub fn merge(mut self, other: FieldRecord) -> Result<FieldRecord, PatternError> {
        for (kind, value) in other.time_fields() {
            self.set(kind, value)?;
        }
        self.misc.extend(other.misc);
        Ok(self)
    }

    /// Render directory names: each field up to `highest` (year 4 digits,
    /// others 2), followed by the misc captures in capture order.
    pub fn render_dirs(&self, highest: FieldKind) -> Result<Vec<String>, PatternError> {
        let mut dirs = Vec::with_capacity(highest.index() + 1 + self.misc.len());
        for &kind in highest.prefix() {
            let value = self.get(kind).ok_or(PatternError::MissingField(kind))?;
            dirs.push(kind.render(value));
        }
        dirs.extend(self.misc.iter().cloned());
        Ok(dirs)
    }
}
