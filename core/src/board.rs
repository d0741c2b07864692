use crate::types::*;

/// Board representation: a plain 64-cell array.
/// Copying a board copies the whole grid, so simulated positions never
/// share state with the board they were made from.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Board {
    /// 64 squares, indexed by Square::index()
    squares: [Option<Piece>; 64],
}

impl Board {
    /// Creates an empty board.
    pub const fn empty() -> Self {
        Self {
            squares: [None; 64],
        }
    }

    /// Creates the standard starting position: Black men on the dark squares
    /// of rows 0-2, White men on the dark squares of rows 5-7.
    pub fn starting_position() -> Self {
        let mut board = Self::empty();

        for square in Square::dark() {
            match square.row() {
                0..=2 => board.set_piece(square, Some(Piece::man(Player::Black))),
                5..=7 => board.set_piece(square, Some(Piece::man(Player::White))),
                _ => {}
            }
        }

        board
    }

    /// Gets the piece at the given square.
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.squares[square.index() as usize]
    }

    /// Sets the piece at the given square.
    pub fn set_piece(&mut self, square: Square, piece: Option<Piece>) {
        self.squares[square.index() as usize] = piece;
    }

    /// Removes and returns the piece at the given square.
    pub fn remove_piece(&mut self, square: Square) -> Option<Piece> {
        self.squares[square.index() as usize].take()
    }

    /// Returns true if the given square is empty.
    pub fn is_empty(&self, square: Square) -> bool {
        self.piece_at(square).is_none()
    }

    /// Returns true if the given square holds a piece of the given player.
    pub fn is_owned_by(&self, square: Square, player: Player) -> bool {
        self.piece_at(square).is_some_and(|p| p.owner == player)
    }

    /// Returns true if the given square holds an opposing piece.
    pub fn is_enemy(&self, square: Square, player: Player) -> bool {
        self.is_owned_by(square, player.opponent())
    }

    /// Iterates over the squares and pieces of one player.
    pub fn pieces(&self, player: Player) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| match self.piece_at(sq) {
            Some(piece) if piece.owner == player => Some((sq, piece)),
            _ => None,
        })
    }

    /// Counts the pieces of one player.
    pub fn count(&self, player: Player) -> usize {
        self.squares
            .iter()
            .flatten()
            .filter(|p| p.owner == player)
            .count()
    }

    /// Applies a move that has already been validated: removes the captured
    /// pieces, relocates the mover and crowns it if it landed on its
    /// promotion row. Returns true if the piece was promoted.
    pub fn apply_in_place(&mut self, mv: &Move) -> bool {
        for &captured in &mv.captured {
            self.remove_piece(captured);
        }

        let Some(piece) = self.remove_piece(mv.from) else {
            debug_assert!(false, "no piece at {}", mv.from);
            return false;
        };

        let promote = !piece.is_king() && mv.to.row() == piece.owner.promotion_row();
        let landed = if promote { piece.crowned() } else { piece };
        self.set_piece(mv.to, Some(landed));

        promote
    }

    /// Returns a new board with the move applied. The receiver is untouched.
    pub fn apply(&self, mv: &Move) -> Self {
        let mut next = *self;
        next.apply_in_place(mv);
        next
    }

    /// Returns true if every piece stands on a playable square.
    pub fn is_consistent(&self) -> bool {
        Square::all().all(|sq| sq.is_dark() || self.is_empty(sq))
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::starting_position()
    }
}
