/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, str::FromStr};

use anyhow::{anyhow, bail, Result};

use super::Position;

/// Represents a move made on a chess board, as an ordered pair of [`Position`]s.
///
/// A [`Move`] carries no information about the piece being moved. Whether it is legal is decided
/// by the board it is played on, see [`crate::MoveValidator`] and [`crate::Game`].
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    from: Position,
    to: Position,
}

impl Move {
    /// Creates a new [`Move`] from the given [`Position`]s.
    ///
    /// # Example
    /// ```
    /// # use kingside::{Move, Position};
    /// let e2e4 = Move::new(Position::E2, Position::E4);
    /// assert_eq!(e2e4.to_string(), "e2 e4");
    /// ```
    #[inline(always)]
    pub const fn new(from: Position, to: Position) -> Self {
        Self { from, to }
    }

    /// Creates a new [`Move`] from raw coordinates, failing if any of them is off the board.
    ///
    /// # Example
    /// ```
    /// # use kingside::{Move, Position};
    /// let e2e4 = Move::from_coords(4, 1, 4, 3).unwrap();
    /// assert_eq!(e2e4, Move::new(Position::E2, Position::E4));
    ///
    /// assert!(Move::from_coords(4, 1, 4, 8).is_err());
    /// ```
    #[inline(always)]
    pub fn from_coords(from_x: i32, from_y: i32, to_x: i32, to_y: i32) -> Result<Self> {
        Ok(Self::new(
            Position::new(from_x, from_y)?,
            Position::new(to_x, to_y)?,
        ))
    }

    /// Fetches the source (or "from") part of this [`Move`].
    #[inline(always)]
    pub const fn from(&self) -> Position {
        self.from
    }

    /// Fetches the destination (or "to") part of this [`Move`].
    #[inline(always)]
    pub const fn to(&self) -> Position {
        self.to
    }

    /// Fetches the source and destination of this [`Move`].
    #[inline(always)]
    pub const fn parts(&self) -> (Position, Position) {
        (self.from, self.to)
    }

    /// Returns `true` if this [`Move`] goes somewhere, i.e. its source and destination differ.
    ///
    /// Both endpoints are always on the board, because a [`Position`] cannot be built otherwise.
    ///
    /// # Example
    /// ```
    /// # use kingside::{Move, Position};
    /// assert!(Move::new(Position::E2, Position::E4).is_valid());
    /// assert!(!Move::new(Position::E2, Position::E2).is_valid());
    /// ```
    #[inline(always)]
    pub fn is_valid(&self) -> bool {
        self.from != self.to
    }

    /// Signed number of files travelled. Positive is towards the h-file.
    #[inline(always)]
    pub const fn delta_x(&self) -> i32 {
        self.to.x() as i32 - self.from.x() as i32
    }

    /// Signed number of ranks travelled. Positive is towards Black's side.
    #[inline(always)]
    pub const fn delta_y(&self) -> i32 {
        self.to.y() as i32 - self.from.y() as i32
    }

    /// Returns `true` if this [`Move`] travels along a diagonal.
    ///
    /// # Example
    /// ```
    /// # use kingside::{Move, Position};
    /// assert!(Move::new(Position::C1, Position::H6).is_diagonal());
    /// assert!(!Move::new(Position::C1, Position::C6).is_diagonal());
    /// ```
    #[inline(always)]
    pub const fn is_diagonal(&self) -> bool {
        self.delta_x() != 0 && self.delta_x().abs() == self.delta_y().abs()
    }

    /// Returns `true` if this [`Move`] stays on its rank.
    #[inline(always)]
    pub const fn is_horizontal(&self) -> bool {
        self.delta_y() == 0 && self.delta_x() != 0
    }

    /// Returns `true` if this [`Move`] stays on its file.
    #[inline(always)]
    pub const fn is_vertical(&self) -> bool {
        self.delta_x() == 0 && self.delta_y() != 0
    }

    /// Creates a [`Move`] from two whitespace-separated squares in algebraic notation, such as `"e2 e4"`.
    ///
    /// # Example
    /// ```
    /// # use kingside::{Move, Position};
    /// let mv = Move::from_notation("g1   f3").unwrap();
    /// assert_eq!(mv, Move::new(Position::G1, Position::F3));
    ///
    /// assert!(Move::from_notation("g1f3").is_err());
    /// assert!(Move::from_notation("g1 f3 e5").is_err());
    /// assert!(Move::from_notation("g1 f9").is_err());
    /// ```
    pub fn from_notation(notation: &str) -> Result<Self> {
        let mut tokens = notation.split_whitespace();

        let from = tokens
            .next()
            .ok_or(anyhow!("Move str must contain a `from` square. Got {notation:?}"))?;
        let to = tokens
            .next()
            .ok_or(anyhow!("Move str must contain a `to` square. Got {notation:?}"))?;

        if tokens.next().is_some() {
            bail!("Move str must contain exactly two squares. Got {notation:?}");
        }

        Ok(Self::new(from.parse()?, to.parse()?))
    }
}

impl FromStr for Move {
    type Err = anyhow::Error;
    /// Wrapper for [`Move::from_notation`].
    #[inline(always)]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_notation(s)
    }
}

impl fmt::Display for Move {
    /// Displays this [`Move`] the same way [`Move::from_notation`] reads it.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.from, self.to)
    }
}

impl fmt::Debug for Move {
    /// Debug formatting also displays the deltas of this [`Move`].
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {} ({:+}, {:+})",
            self.from,
            self.to,
            self.delta_x(),
            self.delta_y()
        )
    }
}
