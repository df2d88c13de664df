/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use log::trace;

/// A move from one square to another.
mod moves;

/// Colors, piece kinds, and the pieces themselves.
mod piece;

/// Coordinates on the board.
mod position;

pub use moves::*;
pub use piece::*;
pub use position::*;

/// Represents all pieces and their locations on a chess board.
///
/// Has no knowledge of turns or en passant. If you need those, see [`crate::Game`].
///
/// Internally this is a mailbox: one cell per [`Position`], each owning at most one [`Piece`].
/// A piece is never in two cells at once, and the [`Position`] a piece stores always matches the
/// cell that holds it. Cloning a [`Board`] clones every piece, so two boards never share one.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Option<Piece>; Position::COUNT],
}

impl Board {
    /// Creates a new, empty [`Board`] containing no pieces.
    ///
    /// # Example
    /// ```
    /// # use kingside::{Board, Position};
    /// let board = Board::new();
    /// assert!(Position::iter().all(|pos| board.is_empty(pos)));
    /// ```
    #[inline(always)]
    pub fn new() -> Self {
        Self {
            cells: std::array::from_fn(|_| None),
        }
    }

    /// Fetches the [`Piece`] at the provided [`Position`], if there is one.
    ///
    /// # Example
    /// ```
    /// # use kingside::{Board, Color, Piece, PieceKind, Position};
    /// let mut board = Board::new();
    /// board.set_piece_at(Position::A1, Piece::new(PieceKind::Rook, Color::White, Position::A1));
    /// assert_eq!(board.piece_at(Position::A1).unwrap().kind(), PieceKind::Rook);
    /// assert!(board.piece_at(Position::A2).is_none());
    /// ```
    #[inline(always)]
    pub fn piece_at(&self, position: Position) -> Option<&Piece> {
        self.cells[position].as_ref()
    }

    /// Places `piece` at `position`, taking ownership of it.
    ///
    /// Whatever occupied `position` before is dropped. The piece's stored position is updated to
    /// `position` without counting as a move.
    ///
    /// # Example
    /// ```
    /// # use kingside::{Board, Color, Piece, PieceKind, Position};
    /// let mut board = Board::new();
    /// board.set_piece_at(Position::C4, Piece::new(PieceKind::Knight, Color::White, Position::A1));
    ///
    /// let knight = board.piece_at(Position::C4).unwrap();
    /// assert_eq!(knight.position(), Position::C4);
    /// assert!(!knight.has_moved());
    /// ```
    #[inline(always)]
    pub fn set_piece_at(&mut self, position: Position, mut piece: Piece) {
        piece.place_at(position);
        self.cells[position] = Some(piece);
    }

    /// Takes the [`Piece`] from a given [`Position`], if there is one present.
    ///
    /// # Example
    /// ```
    /// # use kingside::{Board, Color, Piece, PieceKind, Position};
    /// let mut board = Board::new();
    /// board.set_piece_at(Position::C4, Piece::new(PieceKind::Knight, Color::White, Position::C4));
    ///
    /// let taken = board.remove_piece_at(Position::C4);
    /// assert_eq!(taken.unwrap().kind(), PieceKind::Knight);
    /// assert!(board.is_empty(Position::C4));
    /// assert!(board.remove_piece_at(Position::C4).is_none());
    /// ```
    #[inline(always)]
    pub fn remove_piece_at(&mut self, position: Position) -> Option<Piece> {
        self.cells[position].take()
    }

    /// Returns `true` if there is no piece at the given [`Position`].
    #[inline(always)]
    pub fn is_empty(&self, position: Position) -> bool {
        self.cells[position].is_none()
    }

    /// Transfers the piece at `mv.from()` to `mv.to()`, updating the piece's position.
    ///
    /// Anything already on the destination is dropped, so callers that care about captures
    /// must collect that piece first. No chess rules are checked here.
    ///
    /// Returns `false`, leaving the board untouched, if `mv` is not a valid move or there is no
    /// piece on its source square.
    ///
    /// # Example
    /// ```
    /// # use kingside::{Board, Color, Move, Piece, PieceKind, Position};
    /// let mut board = Board::new();
    /// board.set_piece_at(Position::A1, Piece::new(PieceKind::Rook, Color::White, Position::A1));
    ///
    /// assert!(board.move_piece(Move::new(Position::A1, Position::A8)));
    /// assert!(board.is_empty(Position::A1));
    /// assert_eq!(board.piece_at(Position::A8).unwrap().position(), Position::A8);
    ///
    /// // Nothing on A1 anymore
    /// assert!(!board.move_piece(Move::new(Position::A1, Position::A2)));
    /// ```
    pub fn move_piece(&mut self, mv: Move) -> bool {
        if !mv.is_valid() {
            trace!("Refusing to move a piece onto its own square: {mv:?}");
            return false;
        }

        let (from, to) = mv.parts();
        let Some(mut piece) = self.cells[from].take() else {
            trace!("Refusing to move from {from}: no piece there");
            return false;
        };

        piece.set_position(to);
        self.cells[to] = Some(piece);
        true
    }

    /// Returns `true` if every square strictly between `from` and `to` is empty.
    ///
    /// Only defined for squares sharing a rank, file, or diagonal, and trivially `true` if
    /// `from == to`. Any other pair (such as a Knight's jump) has no path and yields `false`.
    ///
    /// # Example
    /// ```
    /// # use kingside::{Board, Color, Piece, PieceKind, Position};
    /// let mut board = Board::new();
    /// assert!(board.is_path_clear(Position::A1, Position::H8));
    ///
    /// board.set_piece_at(Position::D4, Piece::new(PieceKind::Pawn, Color::Black, Position::D4));
    /// assert!(!board.is_path_clear(Position::A1, Position::H8));
    ///
    /// // The endpoints themselves don't count
    /// assert!(board.is_path_clear(Position::A1, Position::D4));
    /// ```
    pub fn is_path_clear(&self, from: Position, to: Position) -> bool {
        if from == to {
            return true;
        }

        let mv = Move::new(from, to);
        if !(mv.is_horizontal() || mv.is_vertical() || mv.is_diagonal()) {
            return false;
        }

        let (step_x, step_y) = (mv.delta_x().signum(), mv.delta_y().signum());
        let mut current = from;

        while let Some(next) = current.offset(step_x, step_y) {
            if next == to {
                return true;
            }
            if !self.is_empty(next) {
                return false;
            }
            current = next;
        }

        // Unreachable for aligned squares, since walking towards `to` always lands on it
        false
    }

    /// Clears the entire board, removing all pieces.
    #[inline(always)]
    pub fn clear(&mut self) {
        self.cells.iter_mut().for_each(|cell| *cell = None);
    }

    /// Number of pieces currently on the board.
    #[inline(always)]
    pub fn piece_count(&self) -> usize {
        self.cells.iter().flatten().count()
    }

    /// Iterates over every occupied cell, in [`Position`] index order.
    ///
    /// # Example
    /// ```
    /// # use kingside::{Board, Color, Piece, PieceKind, Position};
    /// let mut board = Board::new();
    /// board.set_piece_at(Position::H8, Piece::new(PieceKind::King, Color::Black, Position::H8));
    /// board.set_piece_at(Position::A1, Piece::new(PieceKind::King, Color::White, Position::A1));
    ///
    /// let squares: Vec<_> = board.iter().map(|(pos, _)| pos).collect();
    /// assert_eq!(squares, [Position::A1, Position::H8]);
    /// ```
    #[inline(always)]
    pub fn iter(&self) -> impl Iterator<Item = (Position, &Piece)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(i, cell)| Some((Position::from_index_unchecked(i), cell.as_ref()?)))
    }
}

impl Default for Board {
    /// An empty board.
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    /// Draws the board from White's side, with `.` for empty squares.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in (0..crate::BOARD_SIZE as u8).rev() {
            write!(f, "{}| ", y + 1)?;

            for x in 0..crate::BOARD_SIZE as u8 {
                match self.piece_at(Position::new_unchecked(x, y)) {
                    Some(piece) => write!(f, "{piece} ")?,
                    None => write!(f, ". ")?,
                }
            }

            writeln!(f)?;
        }

        write!(f, " +")?;
        for _ in 0..crate::BOARD_SIZE {
            write!(f, "--")?;
        }
        write!(f, "\n   ")?;
        for x in 0..crate::BOARD_SIZE as u8 {
            write!(f, "{} ", (b'a' + x) as char)?;
        }

        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{self}")?;
        f.debug_list().entries(self.iter().map(|(_, piece)| piece)).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rook(color: Color, position: Position) -> Piece {
        Piece::new(PieceKind::Rook, color, position)
    }

    #[test]
    fn test_lone_rook_slides_up_the_file() {
        let mut board = Board::new();
        board.set_piece_at(Position::A1, rook(Color::White, Position::A1));

        assert!(board.is_path_clear(Position::A1, Position::A8));
        assert!(board.move_piece(Move::new(Position::A1, Position::A8)));

        assert!(board.is_empty(Position::A1));
        let moved = board.piece_at(Position::A8).unwrap();
        assert_eq!(moved.kind(), PieceKind::Rook);
        assert_eq!(moved.position(), Position::A8);
        assert!(moved.has_moved());
        assert_eq!(board.piece_count(), 1);
    }

    #[test]
    fn test_move_overwrites_destination() {
        let mut board = Board::new();
        board.set_piece_at(Position::A1, rook(Color::White, Position::A1));
        board.set_piece_at(Position::A8, rook(Color::Black, Position::A8));

        assert!(board.move_piece(Move::new(Position::A1, Position::A8)));
        assert_eq!(board.piece_count(), 1);
        assert_eq!(board.piece_at(Position::A8).unwrap().color(), Color::White);
    }

    #[test]
    fn test_failed_moves_leave_board_untouched() {
        let mut board = Board::new();
        board.set_piece_at(Position::D4, rook(Color::White, Position::D4));
        let before = board.clone();

        assert!(!board.move_piece(Move::new(Position::D4, Position::D4)));
        assert!(!board.move_piece(Move::new(Position::E4, Position::E5)));
        assert_eq!(board, before);
    }

    #[test]
    fn test_path_clearance_in_every_direction() {
        let mut board = Board::new();
        let center = Position::D4;

        let ends = [
            Position::D8,
            Position::H8,
            Position::H4,
            Position::G1,
            Position::D1,
            Position::A1,
            Position::A4,
            Position::A7,
        ];
        for end in ends {
            assert!(board.is_path_clear(center, end), "{center} -> {end}");
            assert!(board.is_path_clear(end, center), "{end} -> {center}");
        }

        // Block every neighbour; only the adjacent squares stay reachable
        for dx in -1..=1 {
            for dy in -1..=1 {
                if let Some(blocker) = center.offset(dx, dy).filter(|&pos| pos != center) {
                    board.set_piece_at(blocker, rook(Color::Black, blocker));
                }
            }
        }
        for end in ends {
            assert!(!board.is_path_clear(center, end), "{center} -> {end}");
        }
        assert!(board.is_path_clear(center, Position::E5));
        assert!(board.is_path_clear(center, Position::C3));
    }

    #[test]
    fn test_path_is_undefined_for_knight_jumps() {
        let board = Board::new();
        assert!(!board.is_path_clear(Position::B1, Position::C3));
        assert!(board.is_path_clear(Position::B1, Position::B1));
    }

    #[test]
    fn test_clone_is_deep() {
        let mut board = Board::new();
        board.set_piece_at(Position::A1, rook(Color::White, Position::A1));

        let mut copy = board.clone();
        assert_eq!(copy, board);

        copy.move_piece(Move::new(Position::A1, Position::A5));
        assert!(board.piece_at(Position::A1).is_some());
        assert!(!board.piece_at(Position::A1).unwrap().has_moved());
        assert!(copy.piece_at(Position::A1).is_none());
    }

    #[test]
    fn test_display() {
        let mut board = Board::new();
        board.set_piece_at(Position::E1, Piece::new(PieceKind::King, Color::White, Position::E1));
        board.set_piece_at(Position::E8, Piece::new(PieceKind::King, Color::Black, Position::E8));

        let drawn = board.to_string();
        let lines: Vec<_> = drawn.lines().collect();
        assert_eq!(lines[0], "8| . . . . k . . . ");
        assert_eq!(lines[7], "1| . . . . K . . . ");
        assert_eq!(lines[9], "   a b c d e f g h ");
    }
}
