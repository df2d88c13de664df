/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use anyhow::{bail, Result};

use crate::{Board, Color, Move, Piece};

/// Stateless legality checks for a single [`Move`] on a [`Board`].
///
/// Composes a piece's movement pattern with what is actually on the board: ownership of the moving
/// piece, friendly pieces on the destination, blockers along the way, and the Pawn's special rules
/// for captures and pushes. En passant is not handled here, see [`crate::Game`].
pub struct MoveValidator;

impl MoveValidator {
    /// Returns `true` if `player` may play `mv` on `board`.
    ///
    /// # Example
    /// ```
    /// # use kingside::*;
    /// let game = Game::new();
    /// let board = game.board();
    ///
    /// assert!(MoveValidator::is_valid_move(board, "g1 f3".parse().unwrap(), Color::White));
    /// assert!(!MoveValidator::is_valid_move(board, "g1 f3".parse().unwrap(), Color::Black));
    /// assert!(!MoveValidator::is_valid_move(board, "f1 c4".parse().unwrap(), Color::White));
    /// ```
    #[inline(always)]
    pub fn is_valid_move(board: &Board, mv: Move, player: Color) -> bool {
        Self::check_move(board, mv, player).is_ok()
    }

    /// Checks if `player` may play `mv` on `board`.
    ///
    /// If `Ok()`, the move is legal.
    /// If `Err(msg)`, then `msg` will be the first reason found as to why it's not legal.
    pub fn check_move(board: &Board, mv: Move, player: Color) -> Result<()> {
        if !mv.is_valid() {
            bail!("A move must leave its starting square");
        }

        let (from, to) = mv.parts();

        // If there's no piece here, illegal move
        let Some(piece) = board.piece_at(from) else {
            bail!("No piece on {from} to move");
        };

        // A player may only move their own pieces
        if piece.color() != player {
            bail!("{player} tried to move a {}", piece.name());
        }

        if !piece.can_move_to(to) {
            bail!("A {} cannot move from {from} to {to}", piece.kind());
        }

        // Can't capture own pieces
        if board.piece_at(to).is_some_and(|target| target.is_same_color(piece)) {
            bail!("Tried to capture your own piece on {to}");
        }

        // Knights jump; everything else needs a clear path
        if !piece.is_knight() && !board.is_path_clear(from, to) {
            bail!("The path from {from} to {to} is blocked");
        }

        if piece.is_pawn() {
            Self::check_pawn_move(board, mv, piece)?;
        }

        Ok(())
    }

    /// Rules that only apply to Pawns: diagonal steps must capture, and pushes must land on empty squares.
    fn check_pawn_move(board: &Board, mv: Move, pawn: &Piece) -> Result<()> {
        let (from, to) = mv.parts();

        match (mv.delta_x().abs(), mv.delta_y().abs()) {
            // Diagonal steps are only allowed as captures
            (1, _) => {
                if !pawn.can_capture(to) || board.is_empty(to) {
                    bail!("A pawn can only move diagonally onto {to} to capture");
                }
            }

            (0, distance) => {
                if !board.is_empty(to) {
                    bail!("A pawn cannot capture straight ahead on {to}");
                }

                if distance == 2 {
                    let skipped = from.offset(0, mv.delta_y().signum());
                    if skipped.is_some_and(|square| !board.is_empty(square)) {
                        bail!("A pawn cannot jump over the piece in front of it");
                    }
                }
            }

            _ => bail!("A pawn cannot move from {from} to {to}"),
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PieceKind, Position};

    fn board_with(pieces: &[(PieceKind, Color, Position)]) -> Board {
        let mut board = Board::new();
        for &(kind, color, pos) in pieces {
            board.set_piece_at(pos, Piece::new(kind, color, pos));
        }
        board
    }

    fn mv(from: Position, to: Position) -> Move {
        Move::new(from, to)
    }

    #[test]
    fn test_rejections_in_order() {
        let board = board_with(&[
            (PieceKind::Rook, Color::White, Position::A1),
            (PieceKind::Pawn, Color::White, Position::A2),
            (PieceKind::Rook, Color::Black, Position::H8),
        ]);

        // Null moves
        assert!(!MoveValidator::is_valid_move(&board, mv(Position::A1, Position::A1), Color::White));
        // Nothing to move
        assert!(!MoveValidator::is_valid_move(&board, mv(Position::B1, Position::B2), Color::White));
        // Not yours
        assert!(!MoveValidator::is_valid_move(&board, mv(Position::H8, Position::H1), Color::White));
        // Not how a Rook moves
        assert!(!MoveValidator::is_valid_move(&board, mv(Position::A1, Position::B2), Color::White));
        // Own pawn in the way
        assert!(!MoveValidator::is_valid_move(&board, mv(Position::A1, Position::A8), Color::White));
        // But sideways is fine
        assert!(MoveValidator::is_valid_move(&board, mv(Position::A1, Position::H1), Color::White));
        // And the enemy Rook can take down the file
        assert!(MoveValidator::is_valid_move(&board, mv(Position::H8, Position::H1), Color::Black));
    }

    #[test]
    fn test_no_self_capture() {
        let board = board_with(&[
            (PieceKind::Queen, Color::White, Position::D1),
            (PieceKind::Knight, Color::White, Position::D2),
            (PieceKind::Knight, Color::White, Position::B1),
        ]);

        assert!(!MoveValidator::is_valid_move(&board, mv(Position::D1, Position::D2), Color::White));
        assert!(!MoveValidator::is_valid_move(&board, mv(Position::B1, Position::D2), Color::White));

        let err = MoveValidator::check_move(&board, mv(Position::D1, Position::D2), Color::White);
        assert!(err.unwrap_err().to_string().contains("your own piece"));
    }

    #[test]
    fn test_knights_jump() {
        let board = board_with(&[
            (PieceKind::Knight, Color::Black, Position::G8),
            (PieceKind::Pawn, Color::Black, Position::F7),
            (PieceKind::Pawn, Color::Black, Position::G7),
            (PieceKind::Pawn, Color::Black, Position::H7),
        ]);

        assert!(MoveValidator::is_valid_move(&board, mv(Position::G8, Position::F6), Color::Black));
        assert!(MoveValidator::is_valid_move(&board, mv(Position::G8, Position::H6), Color::Black));
        assert!(!MoveValidator::is_valid_move(&board, mv(Position::G8, Position::G6), Color::Black));
    }

    #[test]
    fn test_pawn_diagonals_need_a_victim() {
        let board = board_with(&[
            (PieceKind::Pawn, Color::White, Position::E4),
            (PieceKind::Pawn, Color::Black, Position::D5),
        ]);

        assert!(MoveValidator::is_valid_move(&board, mv(Position::E4, Position::D5), Color::White));
        assert!(!MoveValidator::is_valid_move(&board, mv(Position::E4, Position::F5), Color::White));
        assert!(MoveValidator::is_valid_move(&board, mv(Position::D5, Position::E4), Color::Black));
    }

    #[test]
    fn test_pawn_pushes_need_empty_squares() {
        let board = board_with(&[
            (PieceKind::Pawn, Color::White, Position::E2),
            (PieceKind::Pawn, Color::White, Position::D2),
            (PieceKind::Knight, Color::Black, Position::E4),
            (PieceKind::Bishop, Color::Black, Position::D3),
        ]);

        // Blocked on the destination
        assert!(!MoveValidator::is_valid_move(&board, mv(Position::E2, Position::E4), Color::White));
        assert!(MoveValidator::is_valid_move(&board, mv(Position::E2, Position::E3), Color::White));

        // Blocked on the skipped square
        assert!(!MoveValidator::is_valid_move(&board, mv(Position::D2, Position::D4), Color::White));
        assert!(!MoveValidator::is_valid_move(&board, mv(Position::D2, Position::D3), Color::White));
    }
}
