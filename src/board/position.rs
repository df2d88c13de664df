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

use crate::{BOARD_SIZE, MAX_COORDINATE, MIN_COORDINATE};

/// Represents a single square on an `8x8` chess board, as an `(x, y)` coordinate pair.
///
/// `x` is the file (`0` is the a-file) and `y` is the rank (`0` is the first rank, White's side).
/// Both coordinates are always within `[0, 7]`: the only ways to build a [`Position`] from raw
/// values are [`Position::new`] and the setters, which reject anything out of range.
///
/// Positions are indexed in "little-endian rank-file" order, so `index = x + y * 8`:
/// ```text
/// 8| 56 57 58 59 60 61 62 63
/// 7| 48 49 50 51 52 53 54 55
/// 6| 40 41 42 43 44 45 46 47
/// 5| 32 33 34 35 36 37 38 39
/// 4| 24 25 26 27 28 29 30 31
/// 3| 16 17 18 19 20 21 22 23
/// 2|  8  9 10 11 12 13 14 15
/// 1|  0  1  2  3  4  5  6  7
///  +------------------------
///    a  b  c  d  e  f  g  h
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    x: u8,
    y: u8,
}

impl Position {
    pub const A1: Self = Self::new_unchecked(0, 0);
    pub const A2: Self = Self::new_unchecked(0, 1);
    pub const A3: Self = Self::new_unchecked(0, 2);
    pub const A4: Self = Self::new_unchecked(0, 3);
    pub const A5: Self = Self::new_unchecked(0, 4);
    pub const A6: Self = Self::new_unchecked(0, 5);
    pub const A7: Self = Self::new_unchecked(0, 6);
    pub const A8: Self = Self::new_unchecked(0, 7);

    pub const B1: Self = Self::new_unchecked(1, 0);
    pub const B2: Self = Self::new_unchecked(1, 1);
    pub const B3: Self = Self::new_unchecked(1, 2);
    pub const B4: Self = Self::new_unchecked(1, 3);
    pub const B5: Self = Self::new_unchecked(1, 4);
    pub const B6: Self = Self::new_unchecked(1, 5);
    pub const B7: Self = Self::new_unchecked(1, 6);
    pub const B8: Self = Self::new_unchecked(1, 7);

    pub const C1: Self = Self::new_unchecked(2, 0);
    pub const C2: Self = Self::new_unchecked(2, 1);
    pub const C3: Self = Self::new_unchecked(2, 2);
    pub const C4: Self = Self::new_unchecked(2, 3);
    pub const C5: Self = Self::new_unchecked(2, 4);
    pub const C6: Self = Self::new_unchecked(2, 5);
    pub const C7: Self = Self::new_unchecked(2, 6);
    pub const C8: Self = Self::new_unchecked(2, 7);

    pub const D1: Self = Self::new_unchecked(3, 0);
    pub const D2: Self = Self::new_unchecked(3, 1);
    pub const D3: Self = Self::new_unchecked(3, 2);
    pub const D4: Self = Self::new_unchecked(3, 3);
    pub const D5: Self = Self::new_unchecked(3, 4);
    pub const D6: Self = Self::new_unchecked(3, 5);
    pub const D7: Self = Self::new_unchecked(3, 6);
    pub const D8: Self = Self::new_unchecked(3, 7);

    pub const E1: Self = Self::new_unchecked(4, 0);
    pub const E2: Self = Self::new_unchecked(4, 1);
    pub const E3: Self = Self::new_unchecked(4, 2);
    pub const E4: Self = Self::new_unchecked(4, 3);
    pub const E5: Self = Self::new_unchecked(4, 4);
    pub const E6: Self = Self::new_unchecked(4, 5);
    pub const E7: Self = Self::new_unchecked(4, 6);
    pub const E8: Self = Self::new_unchecked(4, 7);

    pub const F1: Self = Self::new_unchecked(5, 0);
    pub const F2: Self = Self::new_unchecked(5, 1);
    pub const F3: Self = Self::new_unchecked(5, 2);
    pub const F4: Self = Self::new_unchecked(5, 3);
    pub const F5: Self = Self::new_unchecked(5, 4);
    pub const F6: Self = Self::new_unchecked(5, 5);
    pub const F7: Self = Self::new_unchecked(5, 6);
    pub const F8: Self = Self::new_unchecked(5, 7);

    pub const G1: Self = Self::new_unchecked(6, 0);
    pub const G2: Self = Self::new_unchecked(6, 1);
    pub const G3: Self = Self::new_unchecked(6, 2);
    pub const G4: Self = Self::new_unchecked(6, 3);
    pub const G5: Self = Self::new_unchecked(6, 4);
    pub const G6: Self = Self::new_unchecked(6, 5);
    pub const G7: Self = Self::new_unchecked(6, 6);
    pub const G8: Self = Self::new_unchecked(6, 7);

    pub const H1: Self = Self::new_unchecked(7, 0);
    pub const H2: Self = Self::new_unchecked(7, 1);
    pub const H3: Self = Self::new_unchecked(7, 2);
    pub const H4: Self = Self::new_unchecked(7, 3);
    pub const H5: Self = Self::new_unchecked(7, 4);
    pub const H6: Self = Self::new_unchecked(7, 5);
    pub const H7: Self = Self::new_unchecked(7, 6);
    pub const H8: Self = Self::new_unchecked(7, 7);
    /// Number of squares on the board.
    pub const COUNT: usize = BOARD_SIZE * BOARD_SIZE;

    /// Returns an iterator over all squares, in index order.
    ///
    /// # Example
    /// ```
    /// # use kingside::Position;
    /// let mut iter = Position::iter();
    /// assert_eq!(iter.len(), 64);
    /// assert_eq!(iter.next().unwrap(), Position::A1);
    /// assert_eq!(iter.last().unwrap(), Position::H8);
    /// ```
    #[inline(always)]
    pub fn iter() -> impl ExactSizeIterator<Item = Self> + DoubleEndedIterator<Item = Self> {
        (0..Self::COUNT).map(Self::from_index_unchecked)
    }

    /// Creates a new [`Position`] from raw coordinates.
    ///
    /// Both coordinates must be within `[0, 7]`, or else an error is returned.
    ///
    /// # Example
    /// ```
    /// # use kingside::Position;
    /// let e2 = Position::new(4, 1);
    /// assert!(e2.is_ok());
    /// assert_eq!(e2.unwrap(), Position::E2);
    ///
    /// assert!(Position::new(8, 0).is_err());
    /// assert!(Position::new(0, -1).is_err());
    /// ```
    #[inline(always)]
    pub fn new(x: i32, y: i32) -> Result<Self> {
        Self::validate(x, y)?;
        Ok(Self::new_unchecked(x as u8, y as u8))
    }

    /// Creates a new [`Position`] from coordinates that are already known to be on the board.
    ///
    /// # Panics
    /// If either coordinate is greater than `7` and debug assertions are enabled.
    #[inline(always)]
    pub(crate) const fn new_unchecked(x: u8, y: u8) -> Self {
        debug_assert!(
            (x as usize) < BOARD_SIZE && (y as usize) < BOARD_SIZE,
            "Invalid coordinates for Position: Must be between [0, 7]"
        );
        Self { x, y }
    }

    /// Creates a new [`Position`] from its index value.
    ///
    /// The provided `index` must be `[0, 63]` or else an error is returned.
    ///
    /// # Example
    /// ```
    /// # use kingside::Position;
    /// let c4 = Position::from_index(26);
    /// assert!(c4.is_ok());
    /// assert_eq!(c4.unwrap(), Position::C4);
    ///
    /// assert!(Position::from_index(64).is_err());
    /// ```
    #[inline(always)]
    pub fn from_index(index: usize) -> Result<Self> {
        if index >= Self::COUNT {
            bail!(
                "Invalid index for Position: Must be between [0, {}]. Got {index}",
                Self::COUNT - 1
            );
        }

        Ok(Self::from_index_unchecked(index))
    }

    /// Creates a new [`Position`] from its index value, without error checking.
    #[inline(always)]
    pub(crate) const fn from_index_unchecked(index: usize) -> Self {
        Self::new_unchecked((index % BOARD_SIZE) as u8, (index / BOARD_SIZE) as u8)
    }

    /// Returns `true` if `(x, y)` lies on the board.
    ///
    /// # Example
    /// ```
    /// # use kingside::Position;
    /// assert!(Position::in_bounds(7, 7));
    /// assert!(!Position::in_bounds(-1, 3));
    /// ```
    #[inline(always)]
    pub const fn in_bounds(x: i32, y: i32) -> bool {
        x >= MIN_COORDINATE && x <= MAX_COORDINATE && y >= MIN_COORDINATE && y <= MAX_COORDINATE
    }

    /// Errors with the offending values if `(x, y)` does not lie on the board.
    fn validate(x: i32, y: i32) -> Result<()> {
        if !Self::in_bounds(x, y) {
            bail!(
                "Invalid coordinates for Position: Must be between [{MIN_COORDINATE}, {MAX_COORDINATE}]. Got ({x}, {y})"
            );
        }

        Ok(())
    }

    /// The file of this [`Position`], where `0` is the a-file.
    #[inline(always)]
    pub const fn x(&self) -> u8 {
        self.x
    }

    /// The rank of this [`Position`], where `0` is the first rank.
    #[inline(always)]
    pub const fn y(&self) -> u8 {
        self.y
    }

    /// Returns the index of this [`Position`], for indexing into a list of 64 elements.
    ///
    /// # Example
    /// ```
    /// # use kingside::Position;
    /// assert_eq!(Position::A1.index(), 0);
    /// assert_eq!(Position::C4.index(), 26);
    /// assert_eq!(Position::H8.index(), 63);
    /// ```
    #[inline(always)]
    pub const fn index(&self) -> usize {
        self.x as usize + self.y as usize * BOARD_SIZE
    }

    /// Sets the file of this [`Position`], leaving it untouched if `x` is off the board.
    ///
    /// # Example
    /// ```
    /// # use kingside::Position;
    /// let mut pos = Position::A1;
    /// pos.set_x(3).unwrap();
    /// assert_eq!(pos, Position::D1);
    ///
    /// assert!(pos.set_x(8).is_err());
    /// assert_eq!(pos, Position::D1);
    /// ```
    #[inline(always)]
    pub fn set_x(&mut self, x: i32) -> Result<()> {
        self.set(x, self.y as i32)
    }

    /// Sets the rank of this [`Position`], leaving it untouched if `y` is off the board.
    #[inline(always)]
    pub fn set_y(&mut self, y: i32) -> Result<()> {
        self.set(self.x as i32, y)
    }

    /// Sets both coordinates of this [`Position`], leaving it untouched if either is off the board.
    #[inline(always)]
    pub fn set(&mut self, x: i32, y: i32) -> Result<()> {
        *self = Self::new(x, y)?;
        Ok(())
    }

    /// Attempt to offset this [`Position`] by the file and rank offsets.
    ///
    /// If the result would leave the board, `None` is returned.
    ///
    /// # Example
    /// ```
    /// # use kingside::Position;
    /// assert_eq!(Position::C4.offset(1, 1), Some(Position::D5));
    /// assert_eq!(Position::C4.offset(-1, -1), Some(Position::B3));
    /// assert_eq!(Position::A1.offset(-1, -1), None);
    /// ```
    #[inline(always)]
    pub const fn offset(&self, dx: i32, dy: i32) -> Option<Self> {
        let x = self.x as i32 + dx;
        let y = self.y as i32 + dy;

        if Self::in_bounds(x, y) {
            Some(Self::new_unchecked(x as u8, y as u8))
        } else {
            None
        }
    }

    /// Computes the [Manhattan distance](https://en.wikipedia.org/wiki/Taxicab_geometry) between two positions.
    ///
    /// # Example
    /// ```
    /// # use kingside::Position;
    /// assert_eq!(Position::A1.manhattan_distance(Position::H8), 14);
    /// assert_eq!(Position::E4.manhattan_distance(Position::E4), 0);
    /// ```
    #[inline(always)]
    pub const fn manhattan_distance(&self, other: Self) -> u8 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Creates a [`Position`] from algebraic notation: a lowercase file letter `a`-`h` followed by a rank digit `1`-`8`.
    ///
    /// # Example
    /// ```
    /// # use kingside::Position;
    /// let c4 = Position::from_algebraic("c4");
    /// assert!(c4.is_ok());
    /// assert_eq!(c4.unwrap(), Position::C4);
    ///
    /// assert!(Position::from_algebraic("z0").is_err());
    /// assert!(Position::from_algebraic("C4").is_err());
    /// assert!(Position::from_algebraic("c44").is_err());
    /// ```
    pub fn from_algebraic(notation: &str) -> Result<Self> {
        let bytes = notation.as_bytes();
        if bytes.len() != 2 {
            bail!("Invalid Position string: String must contain exactly 2 characters. Got {notation:?}");
        }

        let (file, rank) = (bytes[0], bytes[1]);
        if !(b'a'..=b'h').contains(&file) {
            bail!("Invalid file for Position: Must be between [a, h]. Got {:?}", file as char);
        }
        if !(b'1'..=b'8').contains(&rank) {
            bail!("Invalid rank for Position: Must be between [1, 8]. Got {:?}", rank as char);
        }

        Self::new((file - b'a') as i32, (rank - b'1') as i32)
    }

    /// Converts this [`Position`] to algebraic notation.
    ///
    /// # Example
    /// ```
    /// # use kingside::Position;
    /// assert_eq!(Position::C4.to_algebraic(), "c4");
    /// ```
    #[inline(always)]
    pub fn to_algebraic(self) -> String {
        format!("{}{}", self.file_char(), self.rank_char())
    }

    /// The file of this [`Position`] as a lowercase letter.
    #[inline(always)]
    pub const fn file_char(&self) -> char {
        (b'a' + self.x) as char
    }

    /// The rank of this [`Position`] as a digit, starting at `1`.
    #[inline(always)]
    pub const fn rank_char(&self) -> char {
        (b'1' + self.y) as char
    }
}

impl FromStr for Position {
    type Err = anyhow::Error;
    /// Wrapper for [`Position::from_algebraic`].
    #[inline(always)]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_algebraic(s)
    }
}

impl TryFrom<&str> for Position {
    type Error = anyhow::Error;
    /// Wrapper for [`Position::from_algebraic`].
    #[inline(always)]
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::from_algebraic(value)
    }
}

impl TryFrom<(i32, i32)> for Position {
    type Error = anyhow::Error;
    /// Wrapper for [`Position::new`].
    #[inline(always)]
    fn try_from((x, y): (i32, i32)) -> Result<Self, Self::Error> {
        Self::new(x, y)
    }
}

impl<T> Index<Position> for [T; Position::COUNT] {
    type Output = T;
    /// A [`Position`] can be used to index into an array of 64 elements.
    #[inline(always)]
    fn index(&self, index: Position) -> &Self::Output {
        &self[index.index()]
    }
}

impl<T> IndexMut<Position> for [T; Position::COUNT] {
    /// A [`Position`] can be used to mutably index into an array of 64 elements.
    #[inline(always)]
    fn index_mut(&mut self, index: Position) -> &mut Self::Output {
        &mut self[index.index()]
    }
}

impl fmt::Display for Position {
    /// Displays this [`Position`] in algebraic notation.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

impl fmt::Debug for Position {
    /// Displays this [`Position`] in algebraic notation, followed by its raw coordinates.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self} ({}, {})", self.x, self.y)
    }
}
