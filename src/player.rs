/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::{Color, Piece};

/// One side of a [`crate::Game`], along with every piece it has captured.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Player {
    color: Color,

    /// Captured pieces, in the order they were taken.
    captured: Vec<Piece>,
}

impl Player {
    /// Creates a new [`Player`] that hasn't captured anything yet.
    #[inline(always)]
    pub const fn new(color: Color) -> Self {
        Self {
            color,
            captured: Vec::new(),
        }
    }

    /// The [`Color`] this [`Player`] plays.
    #[inline(always)]
    pub const fn color(&self) -> Color {
        self.color
    }

    /// Returns `true` if this [`Player`] plays White.
    #[inline(always)]
    pub const fn is_white(&self) -> bool {
        self.color.is_white()
    }

    /// Returns `true` if this [`Player`] plays Black.
    #[inline(always)]
    pub const fn is_black(&self) -> bool {
        self.color.is_black()
    }

    /// Takes ownership of a captured piece.
    #[inline(always)]
    pub fn add_captured_piece(&mut self, piece: Piece) {
        self.captured.push(piece);
    }

    /// Every piece this [`Player`] has captured, oldest first.
    #[inline(always)]
    pub fn captured_pieces(&self) -> &[Piece] {
        &self.captured
    }

    /// Number of pieces this [`Player`] has captured.
    #[inline(always)]
    pub fn captured_count(&self) -> usize {
        self.captured.len()
    }

    /// Forgets every captured piece.
    #[inline(always)]
    pub fn clear_captured_pieces(&mut self) {
        self.captured.clear();
    }

    /// Total material value of every captured piece.
    ///
    /// # Example
    /// ```
    /// # use kingside::{Color, Piece, PieceKind, Player, Position};
    /// let mut player = Player::new(Color::White);
    /// assert_eq!(player.score(), 0);
    ///
    /// player.add_captured_piece(Piece::new(PieceKind::Queen, Color::Black, Position::D8));
    /// player.add_captured_piece(Piece::new(PieceKind::Pawn, Color::Black, Position::A7));
    /// assert_eq!(player.score(), 10);
    /// ```
    pub fn score(&self) -> i32 {
        self.captured.iter().map(Piece::value).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PieceKind, Position};

    #[test]
    fn test_score_follows_captures() {
        let mut player = Player::new(Color::Black);

        for (kind, pos) in [
            (PieceKind::Knight, Position::B1),
            (PieceKind::Rook, Position::A1),
            (PieceKind::King, Position::E1),
        ] {
            player.add_captured_piece(Piece::new(kind, Color::White, pos));
        }

        assert_eq!(player.captured_count(), 3);
        assert_eq!(player.score(), 8);

        let order: Vec<_> = player.captured_pieces().iter().map(Piece::kind).collect();
        assert_eq!(order, [PieceKind::Knight, PieceKind::Rook, PieceKind::King]);

        player.clear_captured_pieces();
        assert_eq!(player.score(), 0);
        assert!(player.captured_pieces().is_empty());
    }
}
