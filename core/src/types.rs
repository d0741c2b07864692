use crate::error::ParseError;
use std::fmt;
use std::str::FromStr;

/// Represents one of the two sides.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Player {
    Black,
    White,
}

impl Player {
    /// Returns the opposite side.
    pub const fn opponent(self) -> Self {
        match self {
            Player::Black => Player::White,
            Player::White => Player::Black,
        }
    }

    /// Row delta of a forward step for men of this side.
    /// Black moves toward increasing rows, White toward decreasing rows.
    pub const fn forward(self) -> i8 {
        match self {
            Player::Black => 1,
            Player::White => -1,
        }
    }

    /// Returns the row on which men of this side are promoted.
    pub const fn promotion_row(self) -> u8 {
        match self {
            Player::Black => 7,
            Player::White => 0,
        }
    }

    /// Returns the back row this side starts from.
    pub const fn home_row(self) -> u8 {
        match self {
            Player::Black => 0,
            Player::White => 7,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::Black => write!(f, "Black"),
            Player::White => write!(f, "White"),
        }
    }
}

impl FromStr for Player {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "black" | "b" => Ok(Player::Black),
            "white" | "w" => Ok(Player::White),
            _ => Err(ParseError::Player(s.to_string())),
        }
    }
}

/// Whether a piece is still a man or has been crowned.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Rank {
    Man,
    King,
}

impl Rank {
    /// Material weight used by the evaluator, in men.
    pub const fn value(self) -> u8 {
        match self {
            Rank::Man => 1,
            Rank::King => 3,
        }
    }
}

/// A piece with both owner and rank.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Piece {
    pub owner: Player,
    pub rank: Rank,
}

impl Piece {
    pub const fn new(owner: Player, rank: Rank) -> Self {
        Self { owner, rank }
    }

    pub const fn man(owner: Player) -> Self {
        Self::new(owner, Rank::Man)
    }

    pub const fn king(owner: Player) -> Self {
        Self::new(owner, Rank::King)
    }

    pub const fn is_king(self) -> bool {
        matches!(self.rank, Rank::King)
    }

    /// Returns this piece crowned.
    pub const fn crowned(self) -> Self {
        Self::king(self.owner)
    }
}

/// The four diagonal directions as (row delta, col delta).
pub const DIAGONALS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// A square on the 8x8 board, indexed row * 8 + col.
/// Can only be constructed in range.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Square(u8);

impl Square {
    /// Creates a square from row and column (0-7).
    /// Returns None if either is out of range.
    pub const fn new(row: u8, col: u8) -> Option<Self> {
        if row < 8 && col < 8 {
            Some(Square(row * 8 + col))
        } else {
            None
        }
    }

    /// Creates a square from signed coordinates, as handed in by callers
    /// that may point off the board.
    pub fn from_coords(row: i32, col: i32) -> Option<Self> {
        let row = u8::try_from(row).ok()?;
        let col = u8::try_from(col).ok()?;
        Self::new(row, col)
    }

    /// Creates a square from index (0-63).
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < 64 {
            Some(Square(index))
        } else {
            None
        }
    }

    pub const fn row(self) -> u8 {
        self.0 / 8
    }

    pub const fn col(self) -> u8 {
        self.0 % 8
    }

    pub const fn index(self) -> u8 {
        self.0
    }

    /// Playable squares are those where row + col is odd.
    pub const fn is_dark(self) -> bool {
        (self.row() + self.col()) % 2 == 1
    }

    /// Returns the square displaced by the given deltas, if still on the board.
    pub const fn offset(self, d_row: i8, d_col: i8) -> Option<Self> {
        let row = self.row() as i8 + d_row;
        let col = self.col() as i8 + d_col;
        if row >= 0 && row < 8 && col >= 0 && col < 8 {
            Some(Square(row as u8 * 8 + col as u8))
        } else {
            None
        }
    }

    /// Signed (row, col) difference from `self` to `other`.
    pub const fn delta(self, other: Square) -> (i8, i8) {
        (
            other.row() as i8 - self.row() as i8,
            other.col() as i8 - self.col() as i8,
        )
    }

    /// Iterates over all 64 squares in index order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64).filter_map(Square::from_index)
    }

    /// Iterates over the 32 playable squares in index order.
    pub fn dark() -> impl Iterator<Item = Square> {
        Self::all().filter(|sq| sq.is_dark())
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.row(), self.col())
    }
}

impl FromStr for Square {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseError::Square(s.to_string());
        let (row, col) = s.trim().split_once(',').ok_or_else(err)?;
        let row: i32 = row.trim().parse().map_err(|_| err())?;
        let col: i32 = col.trim().parse().map_err(|_| err())?;
        Square::from_coords(row, col).ok_or_else(err)
    }
}

/// A single move. A move with a non-empty `captured` list is a jump and
/// lists every opposing piece removed by it.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub captured: Vec<Square>,
}

impl Move {
    /// Creates a non-capturing move.
    pub fn new(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            captured: Vec::new(),
        }
    }

    /// Creates a jump removing the given pieces.
    pub fn capture(from: Square, to: Square, captured: Vec<Square>) -> Self {
        Self { from, to, captured }
    }

    pub fn is_capture(&self) -> bool {
        !self.captured.is_empty()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sep = if self.is_capture() { 'x' } else { '-' };
        write!(f, "{}{}{}", self.from, sep, self.to)
    }
}

/// AI strength tiers.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Search depth after the candidate move, or None for random play.
    pub const fn search_depth(self) -> Option<u8> {
        match self {
            Difficulty::Easy => None,
            Difficulty::Medium => Some(2),
            Difficulty::Hard => Some(6),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(ParseError::Difficulty(s.to_string())),
        }
    }
}

/// Who the AI plays and how strongly.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct AiConfig {
    pub ai_player: Option<Player>,
    pub difficulty: Difficulty,
}

impl AiConfig {
    pub const fn new(difficulty: Difficulty, ai_player: Option<Player>) -> Self {
        Self {
            ai_player,
            difficulty,
        }
    }

    /// Both sides are human.
    pub const fn human_only() -> Self {
        Self::new(Difficulty::Easy, None)
    }
}

/// Result of a committed move: either the turn passed to the opponent or
/// the same piece has to keep capturing from the given square.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ContinuationStatus {
    TurnPassed,
    MustContinue(Square),
}

impl ContinuationStatus {
    pub const fn must_continue(self) -> bool {
        matches!(self, ContinuationStatus::MustContinue(_))
    }
}
