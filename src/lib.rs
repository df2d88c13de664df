/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

/// The board, its coordinates, moves, and the pieces that move on it.
mod board;

/// Turn order, en passant tracking, and move application.
mod game;

/// A side of the game and the pieces it has captured.
mod player;

/// Misc utility functions, constants, and types.
mod utils;

/// Legality of a single move on a board.
mod validator;

pub use board::*;
pub use game::*;
pub use player::*;
pub use utils::*;
pub use validator::*;
