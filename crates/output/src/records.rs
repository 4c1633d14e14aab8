use std::io::Write;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::core::types::CellRecord;
use crate::core::Board;

/// Encoding of the final record listing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum RecordFormat {
    /// One `<color> <x> <row>` line per occupied cell
    #[default]
    Text,
    /// A single JSON array of `{"color","x","row"}` objects
    Json,
}

impl RecordFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            RecordFormat::Text => "text",
            RecordFormat::Json => "json",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "txt" => Some(RecordFormat::Text),
            "json" => Some(RecordFormat::Json),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonRecord {
    pub color: u8,
    pub x: i64,
    pub row: usize,
}

impl From<CellRecord> for JsonRecord {
    fn from(record: CellRecord) -> Self {
        Self {
            color: record.piece.color(),
            x: record.x,
            row: record.row,
        }
    }
}

/// Write `records` in the given format; returns how many were written
///
/// Records are written in iteration order, callers pass them canonically
/// sorted (ascending x, then ascending row).
pub fn write_records<W, I>(out: &mut W, format: RecordFormat, records: I) -> Result<usize>
where
    W: Write,
    I: IntoIterator<Item = CellRecord>,
{
    match format {
        RecordFormat::Text => {
            let mut count = 0;
            for CellRecord { piece, x, row } in records {
                writeln!(out, "{} {} {}", piece.color(), x, row)?;
                count += 1;
            }
            Ok(count)
        }
        RecordFormat::Json => {
            let records: Vec<JsonRecord> = records.into_iter().map(JsonRecord::from).collect();
            serde_json::to_writer(&mut *out, &records)?;
            writeln!(out)?;
            Ok(records.len())
        }
    }
}

/// Write every occupied cell of `board`
pub fn write_board<W: Write>(out: &mut W, format: RecordFormat, board: &Board) -> Result<usize> {
    write_records(out, format, board.cells())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Piece;

    fn board_from(moves: &[(u8, i64)]) -> Board {
        let mut board = Board::new();
        for &(color, x) in moves {
            board.place_piece(x, Piece::new(color).unwrap()).unwrap();
        }
        board
    }

    fn render(format: RecordFormat, board: &Board) -> String {
        let mut out = Vec::new();
        write_board(&mut out, format, board).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_text_records_are_sorted_by_x_then_row() {
        let board = board_from(&[(3, 4), (1, -2), (2, 4), (9, 0)]);
        assert_eq!(render(RecordFormat::Text, &board), "1 -2 0\n9 0 0\n3 4 0\n2 4 1\n");
    }

    #[test]
    fn test_json_records_match_text_order() {
        let board = board_from(&[(5, 1), (6, -1), (7, 1)]);
        let text = render(RecordFormat::Json, &board);
        assert_eq!(
            text,
            "[{\"color\":6,\"x\":-1,\"row\":0},{\"color\":5,\"x\":1,\"row\":0},{\"color\":7,\"x\":1,\"row\":1}]\n"
        );
        let parsed: Vec<JsonRecord> = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed.len(), 3);
    }

    #[test]
    fn test_empty_board_writes_nothing_or_empty_array() {
        let board = Board::new();
        assert_eq!(render(RecordFormat::Text, &board), "");
        assert_eq!(render(RecordFormat::Json, &board), "[]\n");
    }

    #[test]
    fn test_format_names() {
        assert_eq!(RecordFormat::from_str("JSON"), Some(RecordFormat::Json));
        assert_eq!(RecordFormat::from_str(" text "), Some(RecordFormat::Text));
        assert_eq!(RecordFormat::from_str("xml"), None);
        assert_eq!(RecordFormat::Json.as_str(), "json");
        assert_eq!(RecordFormat::default(), RecordFormat::Text);
    }
}
