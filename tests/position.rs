/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use kingside::{Move, Position};
use pretty_assertions::assert_eq;

const OFF_BOARD: [(i32, i32); 6] = [(8, 0), (0, 8), (-1, 3), (3, -1), (8, 8), (100, 0)];

#[test]
fn off_board_coordinates_never_become_positions() {
    for (x, y) in OFF_BOARD {
        assert!(Position::new(x, y).is_err(), "({x}, {y})");
        assert!(Position::try_from((x, y)).is_err(), "({x}, {y})");
        assert!(Move::from_coords(x, y, 4, 4).is_err(), "({x}, {y})");
        assert!(Move::from_coords(4, 4, x, y).is_err(), "({x}, {y})");

        let mut pos = Position::E4;
        assert!(pos.set(x, y).is_err(), "({x}, {y})");
        assert_eq!(pos, Position::E4);
    }

    assert!(Position::from_index(64).is_err());
    assert!(Position::from_algebraic("i1").is_err());
    assert!(Position::from_algebraic("a9").is_err());
}

#[test]
fn offsets_stop_at_the_edge() {
    assert_eq!(Position::H1.offset(1, 0), None);
    assert_eq!(Position::A8.offset(0, 1), None);
    assert_eq!(Position::A1.offset(-1, -1), None);
    assert_eq!(Position::G7.offset(1, 1), Some(Position::H8));
}

#[test]
fn every_position_has_its_own_index() {
    let mut seen = [false; Position::COUNT];

    for pos in Position::iter() {
        assert!(pos.index() < Position::COUNT, "{pos:?}");
        assert!(!seen[pos.index()], "{pos:?} shares an index");
        seen[pos.index()] = true;

        assert_eq!(Position::new(pos.x() as i32, pos.y() as i32).unwrap(), pos);
        assert_eq!(Position::from_index(pos.index()).unwrap(), pos);
    }

    assert!(seen.iter().all(|&hit| hit));
}
