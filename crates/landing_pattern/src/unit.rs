//! Pattern units and the backtracking search over them
//!
//! Units are stored in an arena and point at their continuation by index,
//! so `*` can defer to "the rest of the pattern" without expanding it. The
//! search is ordered choice: the first complete derivation wins, and `*`
//! always prefers consuming one more character before letting the
//! continuation try the current position.

use crate::error::PatternError;
use crate::field::FieldRecord;
use crate::timestamp::TimestampFormat;

/// Index of a unit in its arena
pub type UnitId = usize;

/// Wildcard step inside a capture group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wildcard {
    /// `?`
    One,
    /// `*`
    Many,
}

#[derive(Debug, Clone)]
pub enum Unit {
    /// Exact text
    Literal { text: String, next: UnitId },
    /// `?`
    AnyChar { next: UnitId },
    /// `*`
    AnyRun { next: UnitId },
    /// `{?*…}`: consumed text becomes one misc field, never empty
    Capture { steps: Vec<Wildcard>, next: UnitId },
    /// `{yyyyMMdd}` and friends
    Timestamp { format: TimestampFormat, next: UnitId },
    /// Succeeds only at the end of input
    End,
}

/// Result of running the search from one unit
pub(crate) type Step = Result<Option<FieldRecord>, PatternError>;

/// One match attempt over one candidate. Holds the per-call failure memo;
/// the unit arena itself is never mutated.
pub(crate) struct Search<'a> {
    units: &'a [Unit],
    input: &'a str,
    /// `(unit, position)` pairs known to have no derivation
    failed: Vec<bool>,
}

impl<'a> Search<'a> {
    pub(crate) fn new(units: &'a [Unit], input: &'a str) -> Self {
        Self {
            units,
            input,
            failed: vec![false; units.len() * (input.len() + 1)],
        }
    }

    /// Run the unit chain starting at `node` against `input[pos..]`.
    pub(crate) fn run(&mut self, node: UnitId, pos: usize) -> Step {
        let slot = node * (self.input.len() + 1) + pos;
        if self.failed[slot] {
            return Ok(None);
        }

        let outcome = self.step(node, pos)?;
        if outcome.is_none() {
            self.failed[slot] = true;
        }
        Ok(outcome)
    }

    fn step(&mut self, node: UnitId, pos: usize) -> Step {
        let units = self.units;
        match &units[node] {
            Unit::End => Ok((pos == self.input.len()).then(FieldRecord::new)),
            Unit::Literal { text, next } => {
                if self.input[pos..].starts_with(text.as_str()) {
                    self.run(*next, pos + text.len())
                } else {
                    Ok(None)
                }
            }
            Unit::AnyChar { next } => match self.advance(pos) {
                Some(after) => self.run(*next, after),
                None => Ok(None),
            },
            Unit::AnyRun { next } => {
                if let Some(after) = self.advance(pos) {
                    if let Some(record) = self.run(node, after)? {
                        return Ok(Some(record));
                    }
                }
                self.run(*next, pos)
            }
            Unit::Capture { steps, next } => self.capture(steps, 0, pos, pos, *next),
            Unit::Timestamp { format, next } => {
                let Some((after, own)) = format.parse_at(self.input, pos)? else {
                    return Ok(None);
                };
                match self.run(*next, after)? {
                    Some(rest) => own.merge(rest).map(Some),
                    None => Ok(None),
                }
            }
        }
    }

    /// Walk the wildcard steps of a capture group from `pos`, then hand the
    /// captured text `input[start..pos]` to the continuation.
    fn capture(
        &mut self,
        steps: &[Wildcard],
        index: usize,
        start: usize,
        pos: usize,
        next: UnitId,
    ) -> Step {
        let Some(&wildcard) = steps.get(index) else {
            if pos == start {
                return Ok(None);
            }
            let captured = FieldRecord::capture(&self.input[start..pos]);
            return match self.run(next, pos)? {
                Some(rest) => captured.merge(rest).map(Some),
                None => Ok(None),
            };
        };

        match wildcard {
            Wildcard::One => match self.advance(pos) {
                Some(after) => self.capture(steps, index + 1, start, after, next),
                None => Ok(None),
            },
            Wildcard::Many => {
                if let Some(after) = self.advance(pos) {
                    if let Some(record) = self.capture(steps, index, start, after, next)? {
                        return Ok(Some(record));
                    }
                }
                self.capture(steps, index + 1, start, pos, next)
            }
        }
    }

    /// Offset after the character at `pos`, if any
    fn advance(&self, pos: usize) -> Option<usize> {
        self.input[pos..].chars().next().map(|c| pos + c.len_utf8())
    }
}
