use crate::board::Board;
use crate::error::DiagramError;
use crate::types::{Piece, Player, Rank, Square};
use std::fmt;

/// Plain-text board diagrams, used for test fixtures and the command line.
///
/// Eight rows, row 0 first, eight characters each: `.` empty dark square,
/// `-` or a space for a light square, `b`/`B` Black man/king, `w`/`W` White
/// man/king. Blank lines and lines starting with `#` are skipped.
impl Board {
    pub fn from_diagram(text: &str) -> Result<Self, DiagramError> {
        let rows: Vec<&str> = text
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .filter(|line| !line.trim().is_empty() && !line.trim_start().starts_with('#'))
            .collect();

        if rows.len() != 8 {
            return Err(DiagramError::WrongRowCount(rows.len()));
        }

        let mut board = Board::empty();
        for (row, line) in rows.iter().enumerate() {
            let cells: Vec<char> = line.trim().chars().filter(|ch| *ch != ' ').collect();
            // Light squares may be written as spaces, which the filter drops
            let cells = if cells.len() == 4 {
                expand_dark_only(row, &cells)
            } else {
                cells
            };
            if cells.len() != 8 {
                return Err(DiagramError::WrongRowLength {
                    row,
                    len: cells.len(),
                });
            }

            for (col, &ch) in cells.iter().enumerate() {
                let piece = match ch {
                    '.' | '-' => None,
                    _ => Some(piece_from_char(ch).ok_or(DiagramError::InvalidPiece {
                        ch,
                        row,
                        col,
                    })?),
                };
                let Some(square) = Square::new(row as u8, col as u8) else {
                    continue;
                };
                if piece.is_some() && !square.is_dark() {
                    return Err(DiagramError::LightSquare { row, col });
                }
                board.set_piece(square, piece);
            }
        }

        Ok(board)
    }

    /// Serializes the board in the format accepted by [`Board::from_diagram`].
    pub fn to_diagram(&self) -> String {
        let mut out = String::with_capacity(72);
        for row in 0..8u8 {
            for col in 0..8u8 {
                let ch = match Square::new(row, col) {
                    Some(sq) if sq.is_dark() => self.piece_at(sq).map_or('.', piece_to_char),
                    _ => '-',
                };
                out.push(ch);
            }
            out.push('\n');
        }
        out
    }
}

/// Re-inserts light squares for a row written with only its four dark squares.
fn expand_dark_only(row: usize, dark: &[char]) -> Vec<char> {
    let mut cells = Vec::with_capacity(8);
    for &ch in dark {
        if row % 2 == 0 {
            cells.push('-');
            cells.push(ch);
        } else {
            cells.push(ch);
            cells.push('-');
        }
    }
    cells
}

pub fn piece_to_char(piece: Piece) -> char {
    match (piece.owner, piece.rank) {
        (Player::Black, Rank::Man) => 'b',
        (Player::Black, Rank::King) => 'B',
        (Player::White, Rank::Man) => 'w',
        (Player::White, Rank::King) => 'W',
    }
}

pub fn piece_from_char(ch: char) -> Option<Piece> {
    match ch {
        'b' => Some(Piece::man(Player::Black)),
        'B' => Some(Piece::king(Player::Black)),
        'w' => Some(Piece::man(Player::White)),
        'W' => Some(Piece::king(Player::White)),
        _ => None,
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  0 1 2 3 4 5 6 7")?;
        for row in 0..8u8 {
            write!(f, "{row}")?;
            for col in 0..8u8 {
                let ch = match Square::new(row, col) {
                    Some(sq) if sq.is_dark() => self.piece_at(sq).map_or('.', piece_to_char),
                    _ => ' ',
                };
                write!(f, " {ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const START: &str = "\
-b-b-b-b
b-b-b-b-
-b-b-b-b
.-.-.-.-
-.-.-.-.
w-w-w-w-
-w-w-w-w
w-w-w-w-
";

    #[test]
    fn test_parse_starting_position() {
        let board = Board::from_diagram(START).unwrap();
        assert_eq!(board, Board::starting_position());
    }

    #[test]
    fn test_to_diagram_matches_parser() {
        let board = Board::starting_position();
        assert_eq!(board.to_diagram(), START);
    }

    #[test]
    fn test_comments_and_kings() {
        let text = "\
# black king in the corner
-.-.-.-.
.-.-.-.-
-.-.-.-.
.-.-.-.-
-.-.-.-.
.-.-.-.-
-.-.-.-.
B-.-.-.W
";
        // Row 7 has no dark square at col 7; the W sits on a light square.
        assert_eq!(
            Board::from_diagram(text),
            Err(DiagramError::LightSquare { row: 7, col: 7 })
        );

        let text = text.replace("B-.-.-.W", "B-.-.-W-");
        let board = Board::from_diagram(&text).unwrap();
        let corner = Square::new(7, 0).unwrap();
        assert_eq!(board.piece_at(corner), Some(Piece::king(Player::Black)));
        assert_eq!(
            board.piece_at(Square::new(7, 6).unwrap()),
            Some(Piece::king(Player::White))
        );
        assert_eq!(board.count(Player::Black), 1);
    }

    #[test]
    fn test_dark_squares_only_rows() {
        let text = "bbbb\nbbbb\nbbbb\n....\n....\nwwww\nwwww\nwwww\n";
        let board = Board::from_diagram(text).unwrap();
        assert_eq!(board, Board::starting_position());
    }

    #[test]
    fn test_invalid_diagrams() {
        assert_eq!(
            Board::from_diagram("-b-b-b-b\n"),
            Err(DiagramError::WrongRowCount(1))
        );

        let short = START.replacen("-b-b-b-b", "-b-b-b", 1);
        assert_eq!(
            Board::from_diagram(&short),
            Err(DiagramError::WrongRowLength { row: 0, len: 6 })
        );

        let bad = START.replacen("-b-b-b-b", "-b-x-b-b", 1);
        assert_eq!(
            Board::from_diagram(&bad),
            Err(DiagramError::InvalidPiece {
                ch: 'x',
                row: 0,
                col: 3
            })
        );
    }

    #[test]
    fn test_display_has_coordinates() {
        let shown = Board::starting_position().to_string();
        assert!(shown.starts_with("  0 1 2 3 4 5 6 7\n"));
        assert!(shown.contains("\n0   b   b   b   b\n"));
        assert_eq!(shown.lines().count(), 9);
    }
}
