use std::fmt;

/// Largest `|x|` the board can address without risking coordinate overflow
pub const MAX_ADDRESSABLE_X: i64 = 1 << 62;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// A column buffer could not grow to `requested` slots
    Allocation { x: i64, requested: usize },
    /// Coordinate outside of what the board can address
    OutOfRange { x: i64 },
    /// The empty sentinel was offered as a piece
    EmptyPiece { x: i64 },
    /// Column is the origin or still holds pieces
    NotRemovable { x: i64 },
    /// Structural invariant violated
    Corrupt { x: i64, reason: &'static str },
}

impl BoardError {
    pub fn code(&self) -> &'static str {
        match self {
            BoardError::Allocation { .. } => "allocation_failed",
            BoardError::OutOfRange { .. } => "out_of_range",
            BoardError::EmptyPiece { .. } => "empty_piece",
            BoardError::NotRemovable { .. } => "not_removable",
            BoardError::Corrupt { .. } => "corrupt_board",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            BoardError::Allocation { .. } => "not enough memory to grow a column",
            BoardError::OutOfRange { .. } => "x coordinate is not addressable",
            BoardError::EmptyPiece { .. } => "the empty sentinel cannot be placed",
            BoardError::NotRemovable { .. } => "only empty non-origin columns can be removed",
            BoardError::Corrupt { reason, .. } => *reason,
        }
    }
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::Allocation { x, requested } => write!(
                f,
                "{}: {} (x = {}, {} slots)",
                self.code(),
                self.message(),
                x,
                requested
            ),
            BoardError::OutOfRange { x }
            | BoardError::EmptyPiece { x }
            | BoardError::NotRemovable { x }
            | BoardError::Corrupt { x, .. } => {
                write!(f, "{}: {} (x = {})", self.code(), self.message(), x)
            }
        }
    }
}

impl std::error::Error for BoardError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_code_and_coordinate() {
        let err = BoardError::Allocation {
            x: -4,
            requested: 128,
        };
        assert_eq!(
            err.to_string(),
            "allocation_failed: not enough memory to grow a column (x = -4, 128 slots)"
        );
        assert_eq!(
            BoardError::Corrupt {
                x: 2,
                reason: "adjacent paddings"
            }
            .to_string(),
            "corrupt_board: adjacent paddings (x = 2)"
        );
    }
}
