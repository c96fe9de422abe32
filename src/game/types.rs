//! Board vocabulary shared by the rules adapter, the reconciler and the scene hosts
//!
//! Squares and piece descriptors are small `Copy` newtypes so they can serve as
//! map keys without ceremony. Both round-trip through the same text forms used
//! by FEN: `"e4"` for squares and `'N'`/`'p'` for pieces.

use std::fmt;
use std::str::FromStr;

use super::error::GameError;

/// Number of files (and ranks) on the board.
pub const BOARD_SIZE: u8 = 8;

/// A square on the board, e.g. `e4`
///
/// `file` runs 0 (`a`) to 7 (`h`); `rank` runs 0 (rank 1) to 7 (rank 8).
/// Ordering is rank-major starting at a1, matching the engine's square index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BoardSquare {
    rank: u8,
    file: u8,
}

impl BoardSquare {
    /// Build a square from zero-based file and rank, `None` if off the board.
    pub fn new(file: u8, rank: u8) -> Option<Self> {
        (file < BOARD_SIZE && rank < BOARD_SIZE).then_some(Self { rank, file })
    }

    /// Build a square from its file letter and rank digit (`'e'`, `'4'`).
    pub fn from_chars(file: char, rank: char) -> Option<Self> {
        let file = match file {
            'a'..='h' => file as u8 - b'a',
            _ => return None,
        };
        let rank = match rank {
            '1'..='8' => rank as u8 - b'1',
            _ => return None,
        };
        Self::new(file, rank)
    }

    #[inline]
    pub fn file(self) -> u8 {
        self.file
    }

    #[inline]
    pub fn rank(self) -> u8 {
        self.rank
    }

    #[inline]
    pub fn file_char(self) -> char {
        (b'a' + self.file) as char
    }

    #[inline]
    pub fn rank_char(self) -> char {
        (b'1' + self.rank) as char
    }

    /// Linear index 0-63, a1 = 0, h8 = 63.
    #[inline]
    pub fn index(self) -> usize {
        self.rank as usize * BOARD_SIZE as usize + self.file as usize
    }

    /// Manhattan distance in squares.
    pub fn distance(self, other: BoardSquare) -> u8 {
        self.file.abs_diff(other.file) + self.rank.abs_diff(other.rank)
    }

    /// Light squares in the usual checkerboard (a1 is dark).
    pub fn is_light(self) -> bool {
        (self.file + self.rank) % 2 == 1
    }

    /// All 64 squares, a1 first.
    pub fn all() -> impl Iterator<Item = BoardSquare> {
        (0..BOARD_SIZE).flat_map(|rank| (0..BOARD_SIZE).map(move |file| BoardSquare { rank, file }))
    }
}

impl fmt::Display for BoardSquare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

impl FromStr for BoardSquare {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let square = match (chars.next(), chars.next(), chars.next()) {
            (Some(file), Some(rank), None) => Self::from_chars(file, rank),
            _ => None,
        };
        square.ok_or_else(|| GameError::InvalidSquare {
            square: s.to_string(),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PieceColor {
    White,
    Black,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Lowercase FEN letter.
    pub fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PieceKind::Pawn => "pawn",
            PieceKind::Knight => "knight",
            PieceKind::Bishop => "bishop",
            PieceKind::Rook => "rook",
            PieceKind::Queen => "queen",
            PieceKind::King => "king",
        }
    }
}

/// Piece type and color, the single-character unit of a FEN placement field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PieceDescriptor {
    pub color: PieceColor,
    pub kind: PieceKind,
}

impl PieceDescriptor {
    pub const fn new(color: PieceColor, kind: PieceKind) -> Self {
        Self { color, kind }
    }

    /// Parse a FEN piece character; case selects the color.
    pub fn from_char(c: char) -> Option<Self> {
        let color = if c.is_ascii_uppercase() {
            PieceColor::White
        } else {
            PieceColor::Black
        };
        let kind = match c.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'r' => PieceKind::Rook,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            _ => return None,
        };
        Some(Self { color, kind })
    }

    pub fn to_char(self) -> char {
        match self.color {
            PieceColor::White => self.kind.letter().to_ascii_uppercase(),
            PieceColor::Black => self.kind.letter(),
        }
    }

    /// All twelve descriptors, white first.
    pub fn all() -> impl Iterator<Item = PieceDescriptor> {
        [PieceColor::White, PieceColor::Black]
            .into_iter()
            .flat_map(|color| PieceKind::ALL.into_iter().map(move |kind| Self { color, kind }))
    }
}

impl fmt::Display for PieceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let color = match self.color {
            PieceColor::White => "white",
            PieceColor::Black => "black",
        };
        write!(f, "{} {}", color, self.kind.name())
    }
}
