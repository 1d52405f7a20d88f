//! Pattern string → unit arena
//!
//! The pattern is read left to right into tokens, validated, and then laid
//! out right to left so every unit knows its continuation.

use crate::error::CompileError;
use crate::field::{validate_fields, FieldKind};
use crate::matcher::CompiledMatcher;
use crate::timestamp::TimestampFormat;
use crate::unit::{Unit, UnitId, Wildcard};
use tracing::debug;

/// Placeholder replaced by the configured table name
pub const TABLE_PLACEHOLDER: &str = "table";

#[derive(Debug)]
enum Token {
    Literal(String),
    AnyChar,
    AnyRun,
    Capture(Vec<Wildcard>),
    Timestamp(TimestampFormat),
}

/// Compile `pattern` for files of `table`.
pub fn compile(pattern: &str, table: &str) -> Result<CompiledMatcher, CompileError> {
    let tokens = tokenize(pattern, table)?;

    let referenced: Vec<FieldKind> = tokens
        .iter()
        .filter_map(|token| match token {
            Token::Timestamp(format) => Some(format.fields()),
            _ => None,
        })
        .flatten()
        .copied()
        .collect();
    let highest = validate_fields(&referenced)?;

    let (units, start) = layout(tokens);
    debug!(
        pattern,
        table,
        units = units.len(),
        highest = %highest,
        "Compiled file name pattern"
    );

    Ok(CompiledMatcher::from_parts(
        pattern.to_string(),
        table.to_string(),
        units,
        start,
        highest,
    ))
}

fn tokenize(pattern: &str, table: &str) -> Result<Vec<Token>, CompileError> {
    let mut tokens = Vec::new();
    let mut chars = pattern.char_indices();

    while let Some((offset, c)) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some((_, escaped @ ('{' | '}' | '*' | '?' | '\\'))) => {
                    push_literal(&mut tokens, escaped.encode_utf8(&mut [0; 4]));
                }
                _ => return Err(CompileError::InvalidEscape { offset }),
            },
            '*' => tokens.push(Token::AnyRun),
            '?' => tokens.push(Token::AnyChar),
            '}' => return Err(CompileError::UnmatchedBrace { offset }),
            '{' => {
                let mut group = String::new();
                // braces inside '…' belong to calendar literals
                let mut quoted = false;
                loop {
                    match chars.next() {
                        Some((_, '}')) if !quoted => break,
                        Some((_, '{')) if !quoted => {
                            return Err(CompileError::UnterminatedGroup { offset })
                        }
                        None => return Err(CompileError::UnterminatedGroup { offset }),
                        Some((_, ch)) => {
                            if ch == '\'' {
                                quoted = !quoted;
                            }
                            group.push(ch);
                        }
                    }
                }
                push_group(&mut tokens, &group, table, offset)?;
            }
            _ => push_literal(&mut tokens, c.encode_utf8(&mut [0; 4])),
        }
    }

    Ok(tokens)
}

fn push_group(
    tokens: &mut Vec<Token>,
    group: &str,
    table: &str,
    offset: usize,
) -> Result<(), CompileError> {
    if group.is_empty() {
        return Err(CompileError::EmptyGroup { offset });
    }

    if group == TABLE_PLACEHOLDER {
        push_literal(tokens, table);
    } else if group.chars().all(|c| c == '*' || c == '?') {
        let steps = group
            .chars()
            .map(|c| if c == '*' { Wildcard::Many } else { Wildcard::One })
            .collect();
        tokens.push(Token::Capture(steps));
    } else {
        tokens.push(Token::Timestamp(TimestampFormat::compile(group)?));
    }
    Ok(())
}

fn push_literal(tokens: &mut Vec<Token>, text: &str) {
    if text.is_empty() {
        return;
    }
    match tokens.last_mut() {
        Some(Token::Literal(prev)) => prev.push_str(text),
        _ => tokens.push(Token::Literal(text.to_string())),
    }
}

/// Build the arena from the last token backwards. Index 0 is always `End`.
fn layout(tokens: Vec<Token>) -> (Vec<Unit>, UnitId) {
    let mut units = Vec::with_capacity(tokens.len() + 1);
    units.push(Unit::End);
    let mut next: UnitId = 0;

    for token in tokens.into_iter().rev() {
        let unit = match token {
            Token::Literal(text) => Unit::Literal { text, next },
            Token::AnyChar => Unit::AnyChar { next },
            Token::AnyRun => Unit::AnyRun { next },
            Token::Capture(steps) => Unit::Capture { steps, next },
            Token::Timestamp(format) => Unit::Timestamp { format, next },
        };
        units.push(unit);
        next = units.len() - 1;
    }

    (units, next)
}
