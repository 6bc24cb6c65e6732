//! Enumerator name extraction from raw declaration text.
//!
//! The declaration arrives exactly as written, e.g.
//! `None = 0, Salted = 1 << 0, SourSweet = (SOUR | SWEET)`. A single
//! left-to-right pass over the bytes picks out the leading identifier of
//! every clause and skips its initializer:
//!
//! ```text
//!            ident byte                 non-ident byte
//!   Start ───────────────▶ InIdentifier ───────────────▶ SkippingToSeparator
//!     ▲                    (emit name)                     │  '('  depth += 1
//!     │                                                    │  ')'  depth -= 1, or end of list at depth 0
//!     └────────────────────── ',' at depth 0 ──────────────┘
//! ```
//!
//! Commas and parentheses nested inside an initializer never split a
//! clause. The list ends at the first unmatched `)` after a name (the
//! closing delimiter of a parenthesized list), or at the end of the input.

use crate::error::{ReflectError, ReflectResult};

/// One `Name [= initializer]` clause of a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clause<'a> {
    /// The enumerator identifier.
    pub name: &'a str,
    /// Initializer text after `=`, trimmed; `None` when the clause has none.
    pub initializer: Option<&'a str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// Before the next identifier.
    Start,
    /// Inside an identifier that began at `start`.
    InIdentifier { start: usize },
    /// Looking for the separator comma after the identifier ending at `name_end`.
    SkippingToSeparator { name_start: usize, name_end: usize },
}

#[inline]
fn is_ident_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_'
}

fn finish_clause<'a>(
    type_name: &str,
    raw: &'a str,
    name_start: usize,
    name_end: usize,
    end: usize,
) -> ReflectResult<Clause<'a>> {
    let name = &raw[name_start..name_end];
    if name.as_bytes()[0].is_ascii_digit() {
        return Err(ReflectError::unexpected(
            type_name,
            name_start,
            name,
            "not an identifier",
        ));
    }

    let rest = &raw[name_end..end];
    let trimmed = rest.trim();
    if trimmed.is_empty() {
        return Ok(Clause {
            name,
            initializer: None,
        });
    }

    // Anything but `= initializer` here means the name was cut short, e.g. by
    // a non-ASCII character or the `#` of a raw identifier.
    let Some(initializer) = trimmed.strip_prefix('=').map(str::trim) else {
        let offset = name_end + (rest.len() - rest.trim_start().len());
        return Err(ReflectError::unexpected(
            type_name,
            offset,
            trimmed,
            format!("expected `=`, `,` or `)` after `{}`", name),
        ));
    };
    if initializer.is_empty() {
        return Err(ReflectError::unexpected(
            type_name,
            name_end,
            trimmed,
            format!("`{}` has `=` but no initializer", name),
        ));
    }

    Ok(Clause {
        name,
        initializer: Some(initializer),
    })
}

/// Scan every clause of a declaration list, in declaration order.
///
/// `type_name` only labels errors. Every clause is checked on the way: a
/// name must not start with a digit, and only `= initializer` may follow it.
/// Fails with [`ReflectError::UnbalancedParentheses`] when the input ends
/// inside a parenthesized initializer.
pub fn scan_clauses<'a>(type_name: &str, raw: &'a str) -> ReflectResult<Vec<Clause<'a>>> {
    let bytes = raw.as_bytes();
    let mut clauses = Vec::new();
    let mut state = ScanState::Start;
    let mut depth = 0usize;
    let mut pos = 0usize;

    let terminator = loop {
        let byte = bytes.get(pos).copied();
        match state {
            ScanState::Start => match byte {
                Some(b) if is_ident_byte(b) => state = ScanState::InIdentifier { start: pos },
                Some(b'=') => {
                    return Err(ReflectError::unexpected(
                        type_name,
                        pos,
                        "=",
                        "initializer without an enumerator name",
                    ));
                }
                Some(_) => {}
                None => break None,
            },
            ScanState::InIdentifier { start } => match byte {
                Some(b) if is_ident_byte(b) => {}
                // The byte that ends the identifier is handed to the skip state unconsumed.
                _ => {
                    state = ScanState::SkippingToSeparator {
                        name_start: start,
                        name_end: pos,
                    };
                    continue;
                }
            },
            ScanState::SkippingToSeparator {
                name_start,
                name_end,
            } => match byte {
                Some(b'(') => depth += 1,
                Some(b')') if depth > 0 => depth -= 1,
                Some(b')') => {
                    clauses.push(finish_clause(type_name, raw, name_start, name_end, pos)?);
                    break Some(pos);
                }
                Some(b',') if depth == 0 => {
                    clauses.push(finish_clause(type_name, raw, name_start, name_end, pos)?);
                    state = ScanState::Start;
                }
                Some(_) => {}
                None if depth > 0 => {
                    return Err(ReflectError::UnbalancedParentheses {
                        type_name: type_name.to_string(),
                        depth,
                    });
                }
                None => {
                    clauses.push(finish_clause(type_name, raw, name_start, name_end, pos)?);
                    break None;
                }
            },
        }
        pos += 1;
    };

    if let Some(close) = terminator {
        let rest = &raw[close + 1..];
        if rest.bytes().any(is_ident_byte) {
            let offset = close + 1 + (rest.len() - rest.trim_start().len());
            return Err(ReflectError::unexpected(
                type_name,
                offset,
                rest.trim(),
                "text after the closing parenthesis of the list",
            ));
        }
    }

    Ok(clauses)
}

/// Extract exactly `expected` enumerator names from a declaration list.
///
/// A count mismatch is a [`ReflectError::StructuralMismatch`]; malformed
/// clauses fail as in [`scan_clauses`].
pub fn tokenize_names<'a>(
    type_name: &str,
    raw: &'a str,
    expected: usize,
) -> ReflectResult<Vec<&'a str>> {
    let clauses = scan_clauses(type_name, raw)?;
    if clauses.len() != expected {
        return Err(ReflectError::mismatch(
            type_name,
            expected,
            clauses.len(),
            "declaration text and value list disagree",
        ));
    }

    Ok(clauses.iter().map(|clause| clause.name).collect())
}
