/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{
    fmt,
    ops::{Index, IndexMut},
    str::FromStr,
};

use anyhow::{bail, Result};

use super::Position;
use crate::{BLACK_BACK_RANK, BLACK_PAWN_RANK, WHITE_BACK_RANK, WHITE_PAWN_RANK};

/// Represents the color of a player or a piece.
///
/// White moves first, and therefore [`Color`] defaults to [`Color::White`].
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Color {
    #[default]
    White,
    Black,
}

impl Color {
    /// Number of color variants.
    pub const COUNT: usize = 2;

    /// An array of both colors, starting with White.
    #[inline(always)]
    pub const fn all() -> [Self; Self::COUNT] {
        [Self::White, Self::Black]
    }

    /// Returns `true` if this [`Color`] is White.
    #[inline(always)]
    pub const fn is_white(&self) -> bool {
        matches!(self, Self::White)
    }

    /// Returns `true` if this [`Color`] is Black.
    #[inline(always)]
    pub const fn is_black(&self) -> bool {
        matches!(self, Self::Black)
    }

    /// Returns this [`Color`]'s opponent.
    ///
    /// # Example
    /// ```
    /// # use kingside::Color;
    /// assert_eq!(Color::White.opponent(), Color::Black);
    /// assert_eq!(Color::Black.opponent(), Color::White);
    /// ```
    #[inline(always)]
    pub const fn opponent(&self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    /// The direction this [`Color`]'s pawns advance in, as a rank delta.
    ///
    /// # Example
    /// ```
    /// # use kingside::Color;
    /// assert_eq!(Color::White.forward(), 1);
    /// assert_eq!(Color::Black.forward(), -1);
    /// ```
    #[inline(always)]
    pub const fn forward(&self) -> i32 {
        match self {
            Self::White => 1,
            Self::Black => -1,
        }
    }

    /// The rank this [`Color`]'s pawns start on.
    #[inline(always)]
    pub const fn pawn_rank(&self) -> u8 {
        match self {
            Self::White => WHITE_PAWN_RANK,
            Self::Black => BLACK_PAWN_RANK,
        }
    }

    /// The rank this [`Color`]'s other pieces start on.
    #[inline(always)]
    pub const fn back_rank(&self) -> u8 {
        match self {
            Self::White => WHITE_BACK_RANK,
            Self::Black => BLACK_BACK_RANK,
        }
    }

    /// Returns this [`Color`] as a `usize`, for indexing into lists.
    ///
    /// Will be `0` for White, `1` for Black.
    #[inline(always)]
    pub const fn index(&self) -> usize {
        *self as usize
    }

    /// Creates a [`Color`] from `'w'` or `'b'` (case-insensitive).
    ///
    /// # Example
    /// ```
    /// # use kingside::Color;
    /// assert_eq!(Color::from_char('b').unwrap(), Color::Black);
    /// assert!(Color::from_char('x').is_err());
    /// ```
    #[inline(always)]
    pub fn from_char(color: char) -> Result<Self> {
        match color {
            'w' | 'W' => Ok(Self::White),
            'b' | 'B' => Ok(Self::Black),
            _ => bail!("Color must be either 'w' or 'b' (case-insensitive). Found {color:?}"),
        }
    }

    /// Fetches a human-readable name for this [`Color`].
    ///
    /// # Example
    /// ```
    /// # use kingside::Color;
    /// assert_eq!(Color::White.name(), "white");
    /// ```
    #[inline(always)]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::White => "white",
            Self::Black => "black",
        }
    }
}

impl<T> Index<Color> for [T; Color::COUNT] {
    type Output = T;
    /// A [`Color`] can be used to index into a list of two elements.
    #[inline(always)]
    fn index(&self, index: Color) -> &Self::Output {
        &self[index.index()]
    }
}

impl<T> IndexMut<Color> for [T; Color::COUNT] {
    /// A [`Color`] can be used to mutably index into a list of two elements.
    #[inline(always)]
    fn index_mut(&mut self, index: Color) -> &mut Self::Output {
        &mut self[index.index()]
    }
}

impl FromStr for Color {
    type Err = anyhow::Error;
    /// Does the same as [`Color::from_char`], but only if `s` is one character in length.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_char(c),
            _ => bail!("Invalid str for Color: Must be a str of len 1. Got {s:?}"),
        }
    }
}

impl fmt::Display for Color {
    /// Displays the human-readable name of this [`Color`].
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" ({})", self.name(), self.index())
    }
}

/// Represents the kind (or "role") that a chess piece can be.
///
/// These have no [`Color`] or location associated with them. See [`Piece`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Number of piece variants.
    pub const COUNT: usize = 6;

    /// An array of all 6 [`PieceKind`]s.
    ///
    /// In the order: `Pawn`, `Knight`, `Bishop`, `Rook`, `Queen`, `King`.
    #[inline(always)]
    pub const fn all() -> [Self; Self::COUNT] {
        use PieceKind::*;
        [Pawn, Knight, Bishop, Rook, Queen, King]
    }

    /// Returns this [`PieceKind`] as a `usize`, for indexing into lists.
    #[inline(always)]
    pub const fn index(&self) -> usize {
        *self as usize
    }

    /// Material value credited to whoever captures a piece of this kind.
    ///
    /// # Example
    /// ```
    /// # use kingside::PieceKind;
    /// assert_eq!(PieceKind::Queen.value(), 9);
    /// assert_eq!(PieceKind::King.value(), 0);
    /// ```
    #[inline(always)]
    pub const fn value(&self) -> i32 {
        match self {
            Self::Pawn => 1,
            Self::Knight => 3,
            Self::Bishop => 3,
            Self::Rook => 5,
            Self::Queen => 9,
            Self::King => 0, // The King can't be traded, so it carries no material
        }
    }

    /// Creates a new [`PieceKind`] from its (case-insensitive) letter.
    ///
    /// # Example
    /// ```
    /// # use kingside::PieceKind;
    /// assert_eq!(PieceKind::from_char('N').unwrap(), PieceKind::Knight);
    /// assert!(PieceKind::from_char('x').is_err());
    /// ```
    #[inline(always)]
    pub fn from_char(kind: char) -> Result<Self> {
        match kind {
            'P' | 'p' => Ok(Self::Pawn),
            'N' | 'n' => Ok(Self::Knight),
            'B' | 'b' => Ok(Self::Bishop),
            'R' | 'r' => Ok(Self::Rook),
            'Q' | 'q' => Ok(Self::Queen),
            'K' | 'k' => Ok(Self::King),
            _ => bail!("Invalid char for PieceKind: Got {kind:?}."),
        }
    }

    /// Converts this [`PieceKind`] to its letter. Will always be lowercase.
    #[inline(always)]
    pub const fn char(&self) -> char {
        match self {
            Self::Pawn => 'p',
            Self::Knight => 'n',
            Self::Bishop => 'b',
            Self::Rook => 'r',
            Self::Queen => 'q',
            Self::King => 'k',
        }
    }

    /// Fetches a human-readable name for this [`PieceKind`].
    #[inline(always)]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Pawn => "pawn",
            Self::Knight => "knight",
            Self::Bishop => "bishop",
            Self::Rook => "rook",
            Self::Queen => "queen",
            Self::King => "king",
        }
    }
}

impl FromStr for PieceKind {
    type Err = anyhow::Error;
    /// Does the same as [`PieceKind::from_char`], but only if `s` is one character in length.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_char(c),
            _ => bail!("Invalid str for PieceKind: Must be a str of len 1. Got {s:?}"),
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl fmt::Debug for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" ({})", self.name(), self.index())
    }
}

/// Returns `true` if a displacement of `(dx, dy)` runs along a single rank or file.
///
/// Shared by Rooks and Queens.
#[inline(always)]
pub const fn moves_straight(dx: i32, dy: i32) -> bool {
    (dx == 0) != (dy == 0)
}

/// Returns `true` if a displacement of `(dx, dy)` runs along a single diagonal.
///
/// Shared by Bishops and Queens.
#[inline(always)]
pub const fn moves_diagonally(dx: i32, dy: i32) -> bool {
    dx != 0 && dx.abs() == dy.abs()
}

/// A chess piece: its [`PieceKind`], [`Color`], where it stands, and whether it has ever moved.
///
/// Pieces are deliberately not [`Copy`]: a piece lives in exactly one place at a time, either a
/// cell of a [`crate::Board`] or a [`crate::Player`]'s list of captured pieces. Moving it between
/// the two is an ownership transfer. [`Clone`] produces an independent piece.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Piece {
    kind: PieceKind,
    color: Color,
    position: Position,
    has_moved: bool,
}

impl Piece {
    /// Creates a new, unmoved [`Piece`] standing on `position`.
    ///
    /// # Example
    /// ```
    /// # use kingside::{Piece, PieceKind, Color, Position};
    /// let knight = Piece::new(PieceKind::Knight, Color::White, Position::G1);
    /// assert_eq!(knight.to_string(), "N");
    /// assert!(!knight.has_moved());
    /// ```
    #[inline(always)]
    pub const fn new(kind: PieceKind, color: Color, position: Position) -> Self {
        Self {
            kind,
            color,
            position,
            has_moved: false,
        }
    }

    /// Fetches the [`PieceKind`] of this [`Piece`].
    #[inline(always)]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    /// Fetches the [`Color`] of this [`Piece`].
    #[inline(always)]
    pub const fn color(&self) -> Color {
        self.color
    }

    /// Fetches the [`Position`] this [`Piece`] stands on.
    #[inline(always)]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Returns `true` if this [`Piece`] has been moved at least once.
    #[inline(always)]
    pub const fn has_moved(&self) -> bool {
        self.has_moved
    }

    /// Moves this [`Piece`] to `position`, marking it as having moved.
    #[inline(always)]
    pub fn set_position(&mut self, position: Position) {
        self.position = position;
        self.has_moved = true;
    }

    /// Puts this [`Piece`] on `position` without counting it as a move.
    ///
    /// Used when a piece is placed on a board rather than played.
    #[inline(always)]
    pub(crate) fn place_at(&mut self, position: Position) {
        self.position = position;
    }

    /// Returns `true` if this [`Piece`] is White.
    #[inline(always)]
    pub const fn is_white(&self) -> bool {
        self.color.is_white()
    }

    /// Returns `true` if this [`Piece`] is Black.
    #[inline(always)]
    pub const fn is_black(&self) -> bool {
        self.color.is_black()
    }

    /// Returns `true` if both pieces belong to the same side.
    #[inline(always)]
    pub fn is_same_color(&self, other: &Self) -> bool {
        self.color == other.color
    }

    /// Returns `true` if this [`Piece`] is a Pawn.
    #[inline(always)]
    pub const fn is_pawn(&self) -> bool {
        matches!(self.kind, PieceKind::Pawn)
    }

    /// Returns `true` if this [`Piece`] is a Knight.
    #[inline(always)]
    pub const fn is_knight(&self) -> bool {
        matches!(self.kind, PieceKind::Knight)
    }

    /// Material value of this [`Piece`]. See [`PieceKind::value`].
    #[inline(always)]
    pub const fn value(&self) -> i32 {
        self.kind.value()
    }

    /// Signed file and rank distance from this [`Piece`] to `target`.
    #[inline(always)]
    const fn deltas_to(&self, target: Position) -> (i32, i32) {
        (
            target.x() as i32 - self.position.x() as i32,
            target.y() as i32 - self.position.y() as i32,
        )
    }

    /// Returns `true` if `target` fits this [`Piece`]'s movement pattern from where it stands.
    ///
    /// This is purely geometric: other pieces on the board (blockers, captures) are not considered.
    ///
    /// # Example
    /// ```
    /// # use kingside::{Piece, PieceKind, Color, Position};
    /// let bishop = Piece::new(PieceKind::Bishop, Color::Black, Position::C8);
    /// assert!(bishop.can_move_to(Position::H3));
    /// assert!(!bishop.can_move_to(Position::C1));
    ///
    /// let pawn = Piece::new(PieceKind::Pawn, Color::Black, Position::D7);
    /// assert!(pawn.can_move_to(Position::D5));
    /// assert!(pawn.can_move_to(Position::E6));
    /// assert!(!pawn.can_move_to(Position::D8));
    /// ```
    pub fn can_move_to(&self, target: Position) -> bool {
        let (dx, dy) = self.deltas_to(target);

        match self.kind {
            PieceKind::Rook => moves_straight(dx, dy),
            PieceKind::Bishop => moves_diagonally(dx, dy),
            PieceKind::Queen => moves_straight(dx, dy) || moves_diagonally(dx, dy),
            PieceKind::Knight => matches!((dx.abs(), dy.abs()), (1, 2) | (2, 1)),
            PieceKind::King => {
                let reach = dx.abs().max(dy.abs());
                reach > 0 && reach <= 1
            }
            PieceKind::Pawn => {
                let forward = self.color.forward();

                // Diagonal steps are only a pattern; whether something is there to capture is the board's concern
                if dx.abs() == 1 && dy == forward {
                    return true;
                }

                dx == 0
                    && (dy == forward
                        || (dy == 2 * forward
                            && !self.has_moved
                            && self.position.y() == self.color.pawn_rank()))
            }
        }
    }

    /// Returns `true` if this [`Piece`] is a Pawn and `target` is one square diagonally forward.
    ///
    /// # Example
    /// ```
    /// # use kingside::{Piece, PieceKind, Color, Position};
    /// let pawn = Piece::new(PieceKind::Pawn, Color::White, Position::E4);
    /// assert!(pawn.can_capture(Position::D5));
    /// assert!(!pawn.can_capture(Position::E5));
    /// assert!(!pawn.can_capture(Position::D3));
    /// ```
    #[inline(always)]
    pub fn can_capture(&self, target: Position) -> bool {
        let (dx, dy) = self.deltas_to(target);
        self.is_pawn() && dx.abs() == 1 && dy == self.color.forward()
    }

    /// Returns `true` if this Pawn may move to `target` as an en passant capture of `en_passant_target`.
    ///
    /// This requires [`Piece::can_capture`] to hold, and the square on this Pawn's own rank at
    /// `target`'s file to be `en_passant_target`.
    #[inline(always)]
    pub fn can_capture_en_passant(&self, target: Position, en_passant_target: Position) -> bool {
        self.can_capture(target)
            && Position::new_unchecked(target.x(), self.position.y()) == en_passant_target
    }

    /// Returns `true` if this Pawn has moved and now stands exactly two ranks away from `previous`, on the same file.
    ///
    /// # Example
    /// ```
    /// # use kingside::{Piece, PieceKind, Color, Position};
    /// let mut pawn = Piece::new(PieceKind::Pawn, Color::White, Position::E2);
    /// assert!(!pawn.just_moved_two_squares(Position::E4));
    ///
    /// pawn.set_position(Position::E4);
    /// assert!(pawn.just_moved_two_squares(Position::E2));
    /// assert!(!pawn.just_moved_two_squares(Position::E3));
    /// ```
    pub fn just_moved_two_squares(&self, previous: Position) -> bool {
        if !self.is_pawn() || !self.has_moved {
            return false;
        }

        let (dx, dy) = (
            self.position.x() as i32 - previous.x() as i32,
            self.position.y() as i32 - previous.y() as i32,
        );
        dx == 0 && dy.abs() == 2
    }

    /// Converts this [`Piece`] to its letter: uppercase for White, lowercase for Black.
    ///
    /// # Example
    /// ```
    /// # use kingside::{Piece, PieceKind, Color, Position};
    /// assert_eq!(Piece::new(PieceKind::Queen, Color::White, Position::D1).char(), 'Q');
    /// assert_eq!(Piece::new(PieceKind::Queen, Color::Black, Position::D8).char(), 'q');
    /// ```
    #[inline(always)]
    pub const fn char(&self) -> char {
        if self.is_white() {
            self.kind.char().to_ascii_uppercase()
        } else {
            self.kind.char()
        }
    }

    /// Fetches a human-readable name for this [`Piece`], such as `"white queen"`.
    #[inline(always)]
    pub fn name(&self) -> String {
        format!("{} {}", self.color.name(), self.kind.name())
    }
}

impl fmt::Display for Piece {
    /// Displays this [`Piece`] as its letter. See [`Piece::char`].
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.char())
    }
}

impl fmt::Debug for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} on {}", self.name(), self.position)?;
        if self.has_moved {
            write!(f, " (moved)")?;
        }
        Ok(())
    }
}
