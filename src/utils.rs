/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::PieceKind;

/// Number of files (and ranks) on the board.
pub const BOARD_SIZE: usize = 8;

/// Smallest valid file or rank coordinate.
pub const MIN_COORDINATE: i32 = 0;

/// Largest valid file or rank coordinate.
pub const MAX_COORDINATE: i32 = BOARD_SIZE as i32 - 1;

/// Rank that White's pieces (excluding pawns) start on.
pub const WHITE_BACK_RANK: u8 = 0;

/// Rank that White's pawns start on.
pub const WHITE_PAWN_RANK: u8 = 1;

/// Rank that Black's pawns start on.
pub const BLACK_PAWN_RANK: u8 = 6;

/// Rank that Black's pieces (excluding pawns) start on.
pub const BLACK_BACK_RANK: u8 = 7;

/// Piece layout of either back rank in the opening position, from the a-file to the h-file.
pub const BACK_RANK: [PieceKind; BOARD_SIZE] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];
