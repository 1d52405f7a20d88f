//! Calendar groups such as `{yyyyMMdd}` or `{yyyy-MM-dd'T'HHmm}`
//!
//! A calendar group is split once into literal text and numeric fields.
//! Each field only accepts a run of ASCII digits of the token's width;
//! the digits are then handed to `chrono`, which sets the field and checks
//! its range and consistency.
//!
//! Supported letters:
//!
//! | Token       | Field  | Digits |
//! |-------------|--------|--------|
//! | `yyyy`      | year   | 4      |
//! | `M`, `MM`   | month  | 1-2, 2 |
//! | `d`, `dd`   | day    | 1-2, 2 |
//! | `H`, `HH`   | hour (0-23) | 1-2, 2 |
//! | `m`, `mm`   | minute | 1-2, 2 |
//! | `s`, `ss`   | second | 1-2, 2 |
//!
//! Other characters are literals. Letters can be quoted with `'…'`, and
//! `''` is a literal quote. Quoted text may contain `{` and `}`, so
//! `{yyyy'}'MMdd}` matches `2014}0102`.
//!
//! A field whose digits are present but whose value is impossible (month
//! `13`, day `32`) is a [`PatternError`], not a mismatch. So is a `-` in
//! front of the group's first field when the digits after it fit.

use crate::error::{CompileError, PatternError};
use crate::field::{FieldKind, FieldRecord};
use chrono::format::{self, Item, Numeric, Pad, Parsed};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Field {
        kind: FieldKind,
        min_digits: usize,
        max_digits: usize,
    },
}

/// Compiled calendar group
#[derive(Debug, Clone)]
pub struct TimestampFormat {
    group: String,
    segments: Vec<Segment>,
    /// Distinct fields, canonical order
    fields: Vec<FieldKind>,
}

impl TimestampFormat {
    /// Compile the contents of a `{…}` calendar group.
    pub fn compile(group: &str) -> Result<Self, CompileError> {
        let mut segments = Vec::new();
        let mut fields = Vec::new();
        let mut literal = String::new();
        let mut chars = group.chars().peekable();

        while let Some(c) = chars.next() {
            if c == '\'' {
                if chars.peek() == Some(&'\'') {
                    chars.next();
                    literal.push('\'');
                    continue;
                }
                loop {
                    match chars.next() {
                        Some('\'') if chars.peek() == Some(&'\'') => {
                            chars.next();
                            literal.push('\'');
                        }
                        Some('\'') => break,
                        Some(ch) => literal.push(ch),
                        None => {
                            return Err(CompileError::UnterminatedQuote {
                                group: group.to_string(),
                            })
                        }
                    }
                }
                continue;
            }

            if !c.is_ascii_alphabetic() {
                literal.push(c);
                continue;
            }

            let mut run = 1;
            while chars.peek() == Some(&c) {
                chars.next();
                run += 1;
            }
            let (kind, min_digits, max_digits) =
                token_kind(c, run).ok_or_else(|| CompileError::UnsupportedToken {
                    group: group.to_string(),
                    token: c.to_string().repeat(run),
                })?;

            if !literal.is_empty() {
                segments.push(Segment::Literal(std::mem::take(&mut literal)));
            }
            segments.push(Segment::Field {
                kind,
                min_digits,
                max_digits,
            });
            fields.push(kind);
        }

        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }
        if fields.is_empty() {
            return Err(CompileError::NoCalendarFields {
                group: group.to_string(),
            });
        }

        fields.sort();
        fields.dedup();

        Ok(Self {
            group: group.to_string(),
            segments,
            fields,
        })
    }

    /// The group text as written in the pattern, without braces
    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn fields(&self) -> &[FieldKind] {
        &self.fields
    }

    /// Parse the calendar group at byte offset `pos` of `input`.
    ///
    /// `Ok(None)` means the text at this offset does not have the group's
    /// shape and lets the caller try another derivation. `Err` means the
    /// shape fits but the values are broken, which no other derivation
    /// can repair.
    pub fn parse_at(
        &self,
        input: &str,
        pos: usize,
    ) -> Result<Option<(usize, FieldRecord)>, PatternError> {
        let mut parsed = Parsed::new();
        let mut cursor = pos;

        for segment in &self.segments {
            let rest = &input[cursor..];
            match segment {
                Segment::Literal(text) => {
                    if !rest.starts_with(text.as_str()) {
                        return Ok(None);
                    }
                    cursor += text.len();
                }
                Segment::Field {
                    kind,
                    min_digits,
                    max_digits,
                } => {
                    // a sign is only read in front of the group's first field
                    let (negative, unsigned) = match rest.strip_prefix('-') {
                        Some(after) if cursor == pos => (true, after),
                        _ => (false, rest),
                    };
                    let len = digit_run(unsigned, *max_digits);
                    if len < *min_digits {
                        return Ok(None);
                    }
                    let digits = &unsigned[..len];
                    let value = digit_value(digits);
                    if negative {
                        return Err(PatternError::NegativeField {
                            field: *kind,
                            value: -value,
                        });
                    }

                    let end = cursor + len;
                    if !in_calendar_range(*kind, value) {
                        return Err(self.malformed(
                            &input[pos..end],
                            format!("{kind} {value} is out of range"),
                        ));
                    }

                    let item = Item::Numeric(numeric_for(*kind), Pad::Zero);
                    format::parse(&mut parsed, digits, std::iter::once(&item)).map_err(|err| {
                        self.malformed(&input[pos..end], err.to_string())
                    })?;
                    cursor = end;
                }
            }
        }

        let mut record = FieldRecord::new();
        for &kind in &self.fields {
            let value = field_value(&parsed, kind).ok_or_else(|| {
                self.malformed(&input[pos..cursor], format!("no value parsed for {kind}"))
            })?;
            if value < 0 {
                return Err(PatternError::NegativeField { field: kind, value });
            }
            record.set(kind, value)?;
        }

        Ok(Some((cursor, record)))
    }

    fn malformed(&self, input: &str, message: String) -> PatternError {
        PatternError::MalformedDate {
            group: self.group.clone(),
            input: input.to_string(),
            message,
        }
    }
}

/// Field and accepted digit count for a run of one letter
fn token_kind(letter: char, run: usize) -> Option<(FieldKind, usize, usize)> {
    let kind = match letter {
        'y' if run == 4 => return Some((FieldKind::Year, 4, 4)),
        'M' => FieldKind::Month,
        'd' => FieldKind::Day,
        'H' => FieldKind::Hour,
        'm' => FieldKind::Minute,
        's' => FieldKind::Second,
        _ => return None,
    };
    match run {
        1 => Some((kind, 1, 2)),
        2 => Some((kind, 2, 2)),
        _ => None,
    }
}

/// Length of the leading ASCII digit run of `s`, capped at `max`
fn digit_run(s: &str, max: usize) -> usize {
    s.bytes().take(max).take_while(u8::is_ascii_digit).count()
}

fn digit_value(digits: &str) -> i64 {
    digits
        .bytes()
        .fold(0, |acc, b| acc * 10 + i64::from(b - b'0'))
}

fn numeric_for(kind: FieldKind) -> Numeric {
    match kind {
        FieldKind::Year => Numeric::Year,
        FieldKind::Month => Numeric::Month,
        FieldKind::Day => Numeric::Day,
        FieldKind::Hour => Numeric::Hour,
        FieldKind::Minute => Numeric::Minute,
        FieldKind::Second => Numeric::Second,
    }
}

fn in_calendar_range(kind: FieldKind, value: i64) -> bool {
    match kind {
        FieldKind::Year => true,
        FieldKind::Month => (1..=12).contains(&value),
        FieldKind::Day => (1..=31).contains(&value),
        FieldKind::Hour => (0..=23).contains(&value),
        FieldKind::Minute => (0..=59).contains(&value),
        // leap second
        FieldKind::Second => (0..=60).contains(&value),
    }
}

fn field_value(parsed: &Parsed, kind: FieldKind) -> Option<i64> {
    match kind {
        FieldKind::Year => parsed.year().map(i64::from),
        FieldKind::Month => parsed.month().map(i64::from),
        FieldKind::Day => parsed.day().map(i64::from),
        FieldKind::Hour => {
            let div = parsed.hour_div_12()?;
            let rem = parsed.hour_mod_12()?;
            Some(i64::from(div * 12 + rem))
        }
        FieldKind::Minute => parsed.minute().map(i64::from),
        FieldKind::Second => parsed.second().map(i64::from),
    }
}
