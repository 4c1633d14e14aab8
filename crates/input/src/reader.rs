//! Streaming placement reader.
//!
//! Wraps any [`BufRead`] and yields one [`Placement`] per line. The first
//! error ends the stream: nothing after a bad line is ever parsed.

use std::io::{BufRead, ErrorKind};

use crate::error::InputError;
use crate::parse::parse_line;
use crate::types::{Placement, DEFAULT_MAX_ABS_X};

pub struct PlacementReader<R> {
    input: R,
    max_abs_x: i64,
    line_no: usize,
    buf: String,
    done: bool,
}

impl<R: BufRead> PlacementReader<R> {
    pub fn new(input: R) -> Self {
        Self::with_bound(input, DEFAULT_MAX_ABS_X)
    }

    /// Reader accepting `|x| <= max_abs_x`
    pub fn with_bound(input: R, max_abs_x: i64) -> Self {
        Self {
            input,
            max_abs_x,
            line_no: 0,
            buf: String::with_capacity(32),
            done: false,
        }
    }

    /// Number of lines consumed so far
    pub fn lines_read(&self) -> usize {
        self.line_no
    }
}

impl<R: BufRead> Iterator for PlacementReader<R> {
    type Item = Result<Placement, InputError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        self.buf.clear();
        let result = match self.input.read_line(&mut self.buf) {
            Ok(0) => {
                self.done = true;
                return None;
            }
            Ok(_) => {
                self.line_no += 1;
                parse_line(&self.buf, self.line_no, self.max_abs_x)
            }
            Err(e) if e.kind() == ErrorKind::InvalidData => Err(InputError::Syntax {
                line: self.line_no + 1,
                reason: "line is not valid UTF-8",
            }),
            Err(e) => Err(InputError::Io {
                line: self.line_no + 1,
                message: e.to_string(),
            }),
        };

        if result.is_err() {
            self.done = true;
        }
        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_reads_until_eof() {
        let reader = PlacementReader::new(Cursor::new("1 0\n2 -5\n3 7"));
        let placements: Vec<_> = reader
            .map(|r| r.map(|p| (p.piece.color(), p.x)))
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(placements, vec![(1, 0), (2, -5), (3, 7)]);
    }

    #[test]
    fn test_empty_input_yields_nothing() {
        let mut reader = PlacementReader::new(Cursor::new(""));
        assert!(reader.next().is_none());
        assert_eq!(reader.lines_read(), 0);
    }

    #[test]
    fn test_stops_after_first_error() {
        let mut reader = PlacementReader::new(Cursor::new("1 0\nbad\n2 0\n"));
        assert!(reader.next().unwrap().is_ok());
        let err = reader.next().unwrap().unwrap_err();
        assert_eq!(err.line(), 2);
        assert_eq!(err.code(), "syntax_error");
        assert!(reader.next().is_none());
    }

    #[test]
    fn test_invalid_utf8_is_a_syntax_error() {
        let mut reader = PlacementReader::new(Cursor::new(vec![b'1', b' ', 0xff, b'\n']));
        assert_eq!(reader.next().unwrap().unwrap_err().code(), "syntax_error");
    }
}
