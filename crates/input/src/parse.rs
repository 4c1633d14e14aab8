//! Record parser for placement lines.
//!
//! A record is `<color> <x>`: an unsigned color, one or more spaces, and an
//! optionally negative x. Nothing else may appear on the line apart from a
//! trailing line break.

use arrayvec::ArrayVec;

use crate::error::InputError;
use crate::types::{Piece, Placement, MAX_COLOR};

/// Parse one record; `line_no` is only used for error reporting
pub fn parse_line(line: &str, line_no: usize, max_abs_x: i64) -> Result<Placement, InputError> {
    let line = line.strip_suffix('\n').unwrap_or(line);
    let line = line.strip_suffix('\r').unwrap_or(line);
    let syntax = |reason| InputError::Syntax {
        line: line_no,
        reason,
    };
    let range = |reason| InputError::Range {
        line: line_no,
        reason,
    };

    if line.starts_with(' ') || line.ends_with(' ') {
        return Err(syntax("leading or trailing space"));
    }

    let mut tokens = ArrayVec::<&str, 2>::new();
    for token in line.split(' ').filter(|t| !t.is_empty()) {
        tokens
            .try_push(token)
            .map_err(|_| syntax("expected exactly two tokens"))?;
    }
    let [color, x] = tokens.as_slice() else {
        return Err(syntax("expected exactly two tokens"));
    };

    let color = magnitude(color).ok_or_else(|| syntax("color is not a number"))?;
    if color > MAX_COLOR as u64 {
        return Err(range("color must be in [0, 254]"));
    }

    let (negative, digits) = match x.strip_prefix('-') {
        Some(digits) => (true, digits),
        None => (false, *x),
    };
    let x = magnitude(digits).ok_or_else(|| syntax("x is not a number"))?;
    if x > max_abs_x.unsigned_abs() {
        return Err(range("x is out of bounds"));
    }
    let x = if negative { -(x as i64) } else { x as i64 };

    match Piece::new(color as u8) {
        Some(piece) => Ok(Placement::new(piece, x)),
        None => Err(range("color must be in [0, 254]")),
    }
}

/// Decimal value of a non-empty all-digit token, saturating on overflow
fn magnitude(token: &str) -> Option<u64> {
    if token.is_empty() {
        return None;
    }
    token.bytes().try_fold(0u64, |acc, b| {
        b.is_ascii_digit()
            .then(|| acc.saturating_mul(10).saturating_add((b - b'0') as u64))
    })
}
