//! Debug dump of the board layout.
//!
//! ```text
//! Board: [-3; 2]
//! [      -3] col  1/ 4 |  7|
//! [      -2] --- 2 cols ---
//! [       0] col  0/ 4 |
//! [       1] --- 1 cols ---
//! [       2] col  2/ 4 |  1|  4|
//!
//! ```

use std::fmt;
use std::io::{self, Write};

use crate::core::{Board, NodeView};

/// `Display` adapter printing one line per node
pub struct BoardDump<'a>(pub &'a Board);

impl fmt::Display for BoardDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let board = self.0;
        writeln!(f, "Board: [{}; {}]", board.start_x(), board.end_x())?;
        for (x, node) in board.nodes() {
            match node {
                NodeView::Column(column) => {
                    write!(
                        f,
                        "[{:>8}] col {:>2}/{:>2} |",
                        x,
                        column.height(),
                        column.capacity()
                    )?;
                    for piece in column.pieces() {
                        write!(f, "{:>3}|", piece.color())?;
                    }
                    writeln!(f)?;
                }
                NodeView::Padding { span } => writeln!(f, "[{:>8}] --- {} cols ---", x, span)?,
            }
        }
        writeln!(f)
    }
}

pub fn write_dump<W: Write>(out: &mut W, board: &Board) -> io::Result<()> {
    write!(out, "{}", BoardDump(board))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Piece;

    #[test]
    fn test_dump_lists_columns_and_paddings() {
        let mut board = Board::new();
        for (color, x) in [(7, -3), (1, 2), (4, 2)] {
            board.place_piece(x, Piece::new(color).unwrap()).unwrap();
        }
        let expected = "Board: [-3; 2]\n\
                        [      -3] col  1/ 4 |  7|\n\
                        [      -2] --- 2 cols ---\n\
                        [       0] col  0/ 4 |\n\
                        [       1] --- 1 cols ---\n\
                        [       2] col  2/ 4 |  1|  4|\n\
                        \n";
        assert_eq!(BoardDump(&board).to_string(), expected);
    }

    #[test]
    fn test_write_dump_matches_display() {
        let board = Board::new();
        let mut out = Vec::new();
        write_dump(&mut out, &board).unwrap();
        assert_eq!(out, b"Board: [0; 0]\n[       0] col  0/ 4 |\n\n");
    }
}
