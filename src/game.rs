/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use anyhow::{anyhow, bail, Result};
use log::{debug, trace};

use crate::{
    Board, Color, Move, MoveValidator, Piece, PieceKind, Player, Position, BACK_RANK, BOARD_SIZE,
};

/// The state a [`Game`] is in.
///
/// Only [`GameState::Playing`] accepts moves. Nothing inside a [`Game`] ever leaves it on its own;
/// the other states exist so that callers can adjudicate a game with [`Game::set_game_state`].
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, Debug)]
pub enum GameState {
    #[default]
    Playing,
    Check,
    Checkmate,
    Stalemate,
    Draw,
}

impl GameState {
    /// Returns `true` if moves can currently be made.
    #[inline(always)]
    pub const fn is_playing(&self) -> bool {
        matches!(self, Self::Playing)
    }

    /// Fetches a human-readable name for this [`GameState`].
    #[inline(always)]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Playing => "playing",
            Self::Check => "check",
            Self::Checkmate => "checkmate",
            Self::Stalemate => "stalemate",
            Self::Draw => "draw",
        }
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// How a move was found to be legal.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Legality {
    /// A Pawn capturing en passant; the victim stands on the tracked square, not on the destination.
    EnPassant { victim: Position },

    /// Anything accepted by [`MoveValidator`], made by a piece of `kind`.
    Standard { kind: PieceKind },
}

impl Legality {
    /// Kind of the piece making the move.
    #[inline(always)]
    const fn moved_kind(&self) -> PieceKind {
        match self {
            Self::EnPassant { .. } => PieceKind::Pawn,
            Self::Standard { kind } => *kind,
        }
    }

    /// Square whose occupant, if any, is captured when `mv` is played.
    #[inline(always)]
    const fn capture_square(&self, mv: Move) -> Position {
        match self {
            Self::EnPassant { victim } => *victim,
            Self::Standard { .. } => mv.to(),
        }
    }
}

/// A game of chess between two [`Player`]s.
///
/// This type owns the [`Board`] and both players, and tracks whose turn it is and whether en passant
/// is available. Every session is its own value, so any number of games can be played side by side.
///
/// The methods you're probably looking for are [`Game::make_move`] and [`Game::validate_move_with_message`].
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Game {
    board: Board,

    /// Indexed by [`Color`].
    players: [Player; Color::COUNT],

    side_to_move: Color,

    state: GameState,

    /// The square a Pawn skipped over on the previous ply, if it advanced two ranks.
    en_passant: Option<Position>,

    last_move: Option<Move>,
}

impl Game {
    /// Creates a new [`Game`] in the standard opening position, with White to move.
    ///
    /// # Example
    /// ```
    /// # use kingside::*;
    /// let game = Game::new();
    /// assert_eq!(game.current_player().color(), Color::White);
    /// assert_eq!(game.game_state(), GameState::Playing);
    /// assert_eq!(game.board().piece_count(), 32);
    /// ```
    pub fn new() -> Self {
        let mut game = Self::with_board(Board::new());
        game.initialize_board();
        game
    }

    /// Creates a new [`Game`] played on `board`, with White to move.
    ///
    /// Useful for setting up positions that don't arise from the opening.
    pub fn with_board(board: Board) -> Self {
        Self {
            board,
            players: Color::all().map(Player::new),
            side_to_move: Color::White,
            state: GameState::Playing,
            en_passant: None,
            last_move: None,
        }
    }

    /// Clears the board and sets up the standard 32-piece opening position.
    pub fn initialize_board(&mut self) {
        self.board.clear();

        for color in Color::all() {
            for (x, kind) in BACK_RANK.into_iter().enumerate() {
                self.place(kind, color, Position::new_unchecked(x as u8, color.back_rank()));
            }

            for x in 0..BOARD_SIZE as u8 {
                self.place(PieceKind::Pawn, color, Position::new_unchecked(x, color.pawn_rank()));
            }
        }
    }

    /// Puts a fresh piece on the board.
    #[inline(always)]
    fn place(&mut self, kind: PieceKind, color: Color, position: Position) {
        self.board.set_piece_at(position, Piece::new(kind, color, position));
    }

    /// Fetch the [`Board`] this [`Game`] is played on.
    #[inline(always)]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// Fetch the [`Player`] whose turn it is.
    #[inline(always)]
    pub fn current_player(&self) -> &Player {
        &self.players[self.side_to_move]
    }

    /// Fetch the [`Player`] playing `color`.
    #[inline(always)]
    pub fn player(&self, color: Color) -> &Player {
        &self.players[color]
    }

    /// The [`Color`] whose turn it is.
    #[inline(always)]
    pub const fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// The current [`GameState`].
    #[inline(always)]
    pub const fn game_state(&self) -> GameState {
        self.state
    }

    /// Overrides the current [`GameState`], such as when a game is resigned or drawn by agreement.
    ///
    /// Any state other than [`GameState::Playing`] makes every subsequent move illegal.
    #[inline(always)]
    pub fn set_game_state(&mut self, state: GameState) {
        debug!("Game state changed from {} to {state}", self.state);
        self.state = state;
    }

    /// Scores of White and Black, respectively.
    ///
    /// # Example
    /// ```
    /// # use kingside::*;
    /// let mut game = Game::new();
    /// for mv in ["e2 e4", "d7 d5", "e4 d5"] {
    ///     assert!(game.make_move(mv.parse().unwrap()));
    /// }
    /// assert_eq!(game.scores(), (1, 0));
    /// ```
    #[inline(always)]
    pub fn scores(&self) -> (i32, i32) {
        (
            self.players[Color::White].score(),
            self.players[Color::Black].score(),
        )
    }

    /// The square a Pawn skipped over on the previous ply, if en passant is available.
    #[inline(always)]
    pub const fn en_passant_target(&self) -> Option<Position> {
        self.en_passant
    }

    /// Returns `true` if the previous ply was a Pawn advancing two ranks.
    #[inline(always)]
    pub const fn is_en_passant_available(&self) -> bool {
        self.en_passant.is_some()
    }

    /// The most recent move that was made, if any.
    #[inline(always)]
    pub const fn last_move(&self) -> Option<Move> {
        self.last_move
    }

    /// Checks whether `mv` can be played right now, and how.
    ///
    /// If `Err(msg)`, then `msg` will be the first reason found as to why it's not legal.
    fn check_move(&self, mv: Move) -> Result<Legality> {
        if !self.state.is_playing() {
            bail!("The game is not in progress ({})", self.state);
        }

        if !mv.is_valid() {
            bail!("Invalid move: a piece must leave its starting square");
        }

        let Some(piece) = self.board.piece_at(mv.from()) else {
            bail!("There is no piece on {}", mv.from());
        };

        let player = self.side_to_move;
        if piece.color() != player {
            bail!(
                "{} to move cannot move a {} piece",
                capitalize(player.name()),
                piece.color()
            );
        }

        if let Some(victim) = self
            .en_passant
            .filter(|&target| piece.is_pawn() && piece.can_capture_en_passant(mv.to(), target))
        {
            return Ok(Legality::EnPassant { victim });
        }

        let kind = piece.kind();
        MoveValidator::check_move(&self.board, mv, player).map_err(|reason| {
            debug!("{mv} is illegal for {player}: {reason}");
            anyhow!("Illegal move for this {kind}")
        })?;

        Ok(Legality::Standard { kind })
    }

    /// Checks if `mv` can be played right now.
    ///
    /// Returns an empty string if it can, otherwise the first reason it cannot.
    ///
    /// # Example
    /// ```
    /// # use kingside::*;
    /// let game = Game::new();
    /// assert_eq!(game.validate_move_with_message("e2 e4".parse().unwrap()), "");
    /// assert_eq!(
    ///     game.validate_move_with_message("e7 e5".parse().unwrap()),
    ///     "White to move cannot move a black piece"
    /// );
    /// ```
    pub fn validate_move_with_message(&self, mv: Move) -> String {
        match self.check_move(mv) {
            Ok(_) => String::new(),
            Err(reason) => reason.to_string(),
        }
    }

    /// Plays `mv` if it is legal, returning `true` on success.
    ///
    /// An illegal move returns `false` and changes nothing: the board, both players, the side to
    /// move, and en passant availability are all left as they were.
    ///
    /// # Example
    /// ```
    /// # use kingside::*;
    /// let mut game = Game::new();
    /// assert!(game.make_move("e2 e4".parse().unwrap()));
    /// assert_eq!(game.side_to_move(), Color::Black);
    /// assert_eq!(game.en_passant_target(), Some(Position::E3));
    ///
    /// // White can't move twice in a row
    /// assert!(!game.make_move("d2 d4".parse().unwrap()));
    /// ```
    pub fn make_move(&mut self, mv: Move) -> bool {
        let legality = match self.check_move(mv) {
            Ok(legality) => legality,
            Err(reason) => {
                debug!("Rejected {mv}: {reason}");
                return false;
            }
        };

        let player = self.side_to_move;

        // The captured piece leaves the board and becomes the mover's
        let victim_square = legality.capture_square(mv);
        if let Some(captured) = self.board.remove_piece_at(victim_square) {
            trace!("{player} captures the {} on {victim_square}", captured.name());
            self.players[player].add_captured_piece(captured);
        }

        let moved = self.board.move_piece(mv);
        debug_assert!(moved, "{mv} passed validation but could not be moved");

        self.update_en_passant(mv, legality.moved_kind());
        self.last_move = Some(mv);
        self.side_to_move = player.opponent();

        debug!("{player} played {mv}");
        true
    }

    /// Recomputes en passant availability after `mv` was played by a piece of `moved_kind`.
    ///
    /// Any previous availability is discarded, whatever moved.
    fn update_en_passant(&mut self, mv: Move, moved_kind: PieceKind) {
        self.en_passant = if moved_kind == PieceKind::Pawn && mv.delta_y().abs() == 2 {
            let (from, to) = mv.parts();
            let skipped = Position::new_unchecked(to.x(), (from.y() + to.y()) / 2);
            trace!("En passant is now available on {skipped}");
            Some(skipped)
        } else {
            None
        };
    }
}

impl Default for Game {
    /// A new game in the standard opening position.
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.board)?;

        let (white, black) = self.scores();
        write!(
            f,
            "{} to move ({}). Score: {white} - {black}",
            capitalize(self.side_to_move.name()),
            self.state
        )?;

        if let Some(target) = self.en_passant {
            write!(f, ". En passant available on {target}")?;
        }

        Ok(())
    }
}

/// Uppercases the first letter of `s`.
fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play(game: &mut Game, moves: &[&str]) {
        for mv in moves {
            assert!(
                game.make_move(mv.parse().unwrap()),
                "{mv} should be legal: {}",
                game.validate_move_with_message(mv.parse().unwrap())
            );
        }
    }

    #[test]
    fn test_opening_layout() {
        let game = Game::new();
        let board = game.board();

        assert_eq!(board.piece_count(), 32);
        for x in 0..8u8 {
            let white = board.piece_at(Position::new_unchecked(x, 0)).unwrap();
            let black = board.piece_at(Position::new_unchecked(x, 7)).unwrap();
            assert_eq!(white.kind(), BACK_RANK[x as usize]);
            assert_eq!(black.kind(), BACK_RANK[x as usize]);
            assert!(white.is_white());
            assert!(black.is_black());

            assert!(board.piece_at(Position::new_unchecked(x, 1)).unwrap().is_pawn());
            assert!(board.piece_at(Position::new_unchecked(x, 6)).unwrap().is_pawn());

            for y in 2..6 {
                assert!(board.is_empty(Position::new_unchecked(x, y)));
            }
        }

        assert_eq!(board.piece_at(Position::D1).unwrap().kind(), PieceKind::Queen);
        assert_eq!(board.piece_at(Position::E8).unwrap().kind(), PieceKind::King);
    }

    #[test]
    fn test_initialize_board_resets_pieces() {
        let mut game = Game::new();
        play(&mut game, &["e2 e4", "d7 d5", "e4 d5"]);
        assert_eq!(game.board().piece_count(), 31);

        game.initialize_board();
        assert_eq!(game.board(), Game::new().board());
    }

    #[test]
    fn test_messages_in_order() {
        let mut game = Game::new();

        assert_eq!(game.validate_move_with_message("e2 e4".parse().unwrap()), "");
        assert!(game
            .validate_move_with_message("e2 e2".parse().unwrap())
            .starts_with("Invalid move"));
        assert_eq!(
            game.validate_move_with_message("e4 e5".parse().unwrap()),
            "There is no piece on e4"
        );
        assert_eq!(
            game.validate_move_with_message("e2 e5".parse().unwrap()),
            "Illegal move for this pawn"
        );

        game.set_game_state(GameState::Draw);
        assert_eq!(
            game.validate_move_with_message("e2 e4".parse().unwrap()),
            "The game is not in progress (draw)"
        );
        assert!(!game.make_move("e2 e4".parse().unwrap()));
    }

    #[test]
    fn test_capture_goes_to_mover() {
        let mut game = Game::new();
        play(&mut game, &["e2 e4", "d7 d5", "e4 d5", "d8 d5"]);

        let white = game.player(Color::White);
        let black = game.player(Color::Black);
        assert_eq!(white.captured_count(), 1);
        assert_eq!(black.captured_count(), 1);
        assert!(white.captured_pieces()[0].is_black());
        assert!(black.captured_pieces()[0].is_white());
        assert_eq!(game.scores(), (1, 1));
        assert_eq!(game.board().piece_count(), 30);
        assert_eq!(game.board().piece_at(Position::D5).unwrap().kind(), PieceKind::Queen);
    }

    #[test]
    fn test_en_passant_path_uses_tracked_square() {
        // White pawn on d6, Black answers with a double step right beside its destination
        let mut board = Board::new();
        for (kind, color, pos) in [
            (PieceKind::Pawn, Color::White, Position::D6),
            (PieceKind::Pawn, Color::Black, Position::E7),
            (PieceKind::King, Color::White, Position::A1),
            (PieceKind::King, Color::Black, Position::H8),
        ] {
            board.set_piece_at(pos, Piece::new(kind, color, pos));
        }

        let mut game = Game::with_board(board);
        play(&mut game, &["a1 a2", "e7 e5"]);
        assert_eq!(game.en_passant_target(), Some(Position::E6));

        // d6xe7 lands on the square on the pawn's own rank at the tracked file
        let mv = "d6 e7".parse().unwrap();
        assert_eq!(game.validate_move_with_message(mv), "");
        assert!(game.make_move(mv));
        assert_eq!(game.board().piece_at(Position::E7).unwrap().kind(), PieceKind::Pawn);
        assert!(game.board().is_empty(Position::D6));
        assert!(!game.is_en_passant_available());
    }

    #[test]
    fn test_last_move_and_display() {
        let mut game = Game::new();
        assert!(game.last_move().is_none());

        play(&mut game, &["g1 f3"]);
        assert_eq!(game.last_move(), Some("g1 f3".parse().unwrap()));

        let shown = game.to_string();
        assert!(shown.ends_with("Black to move (playing). Score: 0 - 0"), "{shown}");
    }

    #[test]
    fn test_legality_carries_the_moved_kind() {
        let mut game = Game::new();

        let legality = game.check_move("g1 f3".parse().unwrap()).unwrap();
        assert_eq!(legality, Legality::Standard { kind: PieceKind::Knight });
        assert_eq!(legality.capture_square("g1 f3".parse().unwrap()), Position::F3);

        play(&mut game, &["e2 e4"]);
        let legality = game.check_move("d7 d5".parse().unwrap()).unwrap();
        assert_eq!(legality.moved_kind(), PieceKind::Pawn);

        let legality = Legality::EnPassant { victim: Position::E6 };
        assert_eq!(legality.moved_kind(), PieceKind::Pawn);
        assert_eq!(legality.capture_square("d6 e7".parse().unwrap()), Position::E6);
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("white"), "White");
        assert_eq!(capitalize(""), "");
    }
}
