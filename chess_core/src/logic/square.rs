use crate::logic::rules::MoveError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A square on the 8x8 board.
///
/// Row 0 is rank 8 (Black's back rank) and row 7 is rank 1. Column 0 is
/// file a. Both coordinates are always in `0..8`; an off-board square cannot
/// be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Square {
    row: u8,
    col: u8,
}

impl Square {
    pub const SIZE: usize = 8;

    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn new(row: usize, col: usize) -> Option<Self> {
        if row < Self::SIZE && col < Self::SIZE {
            Some(Self {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    /// Builds a square from a row-major index in `0..64`.
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < Self::SIZE * Self::SIZE {
            Self::new(index / Self::SIZE, index % Self::SIZE)
        } else {
            None
        }
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.row as usize * Self::SIZE + self.col as usize
    }

    #[must_use]
    pub const fn row(self) -> usize {
        self.row as usize
    }

    #[must_use]
    pub const fn col(self) -> usize {
        self.col as usize
    }

    /// Rank digit 1..=8 as printed in algebraic notation.
    #[must_use]
    pub const fn rank(self) -> u8 {
        8 - self.row
    }

    /// Steps by a signed offset, returning `None` when it leaves the board.
    #[must_use]
    pub fn offset(self, d_row: isize, d_col: isize) -> Option<Self> {
        let row = self.row().checked_add_signed(d_row)?;
        let col = self.col().checked_add_signed(d_col)?;
        Self::new(row, col)
    }

    /// Every square in row-major order, starting at a8 and ending at h1.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..Self::SIZE * Self::SIZE).filter_map(Self::from_index)
    }

    /// Parses algebraic notation such as `"e4"`. The file letter is
    /// case-insensitive; anything other than exactly two characters fails.
    pub fn parse(text: &str) -> Result<Self, MoveError> {
        let mut chars = text.chars();
        let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(MoveError::InvalidCoordinate);
        };

        let file = file.to_ascii_lowercase();
        if !('a'..='h').contains(&file) || !('1'..='8').contains(&rank) {
            return Err(MoveError::InvalidCoordinate);
        }

        let col = file as usize - 'a' as usize;
        let row = 8 - (rank as usize - '0' as usize);
        Self::new(row, col).ok_or(MoveError::InvalidCoordinate)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = char::from(b'a' + self.col);
        write!(f, "{file}{}", self.rank())
    }
}

impl FromStr for Square {
    type Err = MoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
