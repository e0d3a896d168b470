// Copyright 2020 Zachary Stewart
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Projections of a board for the player who owns it and for the player shooting at
//! it.
use std::fmt;

use enumflags2::BitFlags;

use crate::{
    board::{Board, Cell, Coordinate, Grid},
    fleet::Fleet,
    session::{PlayerId, SessionId, Status},
};

/// Classes of cell a projection discloses.
#[derive(BitFlags, Debug, Copy, Clone, Eq, PartialEq)]
#[repr(u8)]
pub enum Reveal {
    /// Unhit ship cells, shown by their marker.
    Ships = 0b01,
    /// Hits and misses.
    Marks = 0b10,
}

/// A board as seen by one player. Cells that are not revealed read as water.
#[derive(Debug, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct BoardView {
    grid: Grid,
}

impl BoardView {
    /// Project `board`, hiding every cell class not in `reveal`.
    pub fn project(board: &Board, reveal: BitFlags<Reveal>) -> Self {
        let grid = board.grid().map(|cell| match cell {
            Cell::Ship(_) if reveal.contains(Reveal::Ships) => cell,
            Cell::Hit | Cell::Miss if reveal.contains(Reveal::Marks) => cell,
            _ => Cell::Water,
        });
        Self { grid }
    }

    /// The owner's view: every cell as it is.
    pub fn owner(board: &Board) -> Self {
        Self::project(board, BitFlags::all())
    }

    /// The opponent's view: hits and misses only.
    pub fn opponent(board: &Board) -> Self {
        Self::project(board, Reveal::Marks.into())
    }

    /// Get the cell at `coord` as seen in this view.
    pub fn get(&self, coord: Coordinate) -> Option<Cell> {
        self.grid.get(coord)
    }

    /// Iterate the rows of this view from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.grid.rows()
    }
}

impl fmt::Display for BoardView {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (y, row) in self.rows().enumerate() {
            if y > 0 {
                f.write_str("\n")?;
            }
            for cell in row {
                write!(f, "{}", cell)?;
            }
        }
        Ok(())
    }
}

/// A participant and the name they are shown under.
#[derive(Debug, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerSummary {
    pub id: PlayerId,
    pub name: String,
}

/// Everything one participant may see of a session.
#[derive(Debug, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SessionView {
    pub id: SessionId,
    pub status: Status,
    pub player1: PlayerSummary,
    pub player2: Option<PlayerSummary>,
    /// The viewer's own board, fully revealed.
    pub your_board: BoardView,
    /// The opponent's board with ships hidden. Open water while nobody has joined.
    pub opponent_board: BoardView,
    /// The viewer's ship records.
    pub your_fleet: Fleet,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{session::Side, testing};

    #[test]
    fn owner_view_matches_the_board() {
        let mut session = testing::active_session();
        session
            .board_mut(Side::First)
            .fire(Coordinate::new(0, 0))
            .unwrap();
        session
            .board_mut(Side::First)
            .fire(Coordinate::new(9, 9))
            .unwrap();
        let board = session.board(Side::First);
        let view = BoardView::owner(board);
        assert!(board.rows().eq(view.rows()));
        assert_eq!(view.get(Coordinate::new(1, 0)), Some(Cell::Ship('A')));
        assert_eq!(view.get(Coordinate::new(0, 0)), Some(Cell::Hit));
    }

    #[test]
    fn opponent_view_never_shows_unhit_ships() {
        let mut session = testing::active_session();
        let board = session.board_mut(Side::Second);
        board.fire(Coordinate::new(0, 2)).unwrap();
        board.fire(Coordinate::new(5, 5)).unwrap();

        let view = BoardView::opponent(session.board(Side::Second));
        for (y, row) in view.rows().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                let expected = match (x, y) {
                    (0, 2) => Cell::Hit,
                    (5, 5) => Cell::Miss,
                    _ => Cell::Water,
                };
                assert_eq!(*cell, expected, "cell {},{}", x, y);
            }
        }
    }

    #[test]
    fn ships_only_projection_hides_marks() {
        let mut board = Board::new();
        board.occupy(&[Coordinate::new(3, 3)], 'D').unwrap();
        board.fire(Coordinate::new(4, 4)).unwrap();
        let view = BoardView::project(&board, Reveal::Ships.into());
        assert_eq!(view.get(Coordinate::new(3, 3)), Some(Cell::Ship('D')));
        assert_eq!(view.get(Coordinate::new(4, 4)), Some(Cell::Water));
    }

    #[test]
    fn view_renders_ten_lines_of_symbols() {
        let mut board = Board::new();
        board
            .occupy(&[Coordinate::new(0, 0), Coordinate::new(1, 0)], 'D')
            .unwrap();
        board.fire(Coordinate::new(1, 0)).unwrap();
        board.fire(Coordinate::new(9, 9)).unwrap();

        let rendered = BoardView::owner(&board).to_string();
        let lines: Vec<_> = rendered.split('\n').collect();
        assert_eq!(lines.len(), 10);
        assert_eq!(lines[0], "DX~~~~~~~~");
        assert_eq!(lines[9], "~~~~~~~~~M");
        assert!(lines[1..9].iter().all(|line| *line == "~~~~~~~~~~"));

        assert_eq!(
            BoardView::opponent(&board).to_string().lines().next(),
            Some("~X~~~~~~~~")
        );
    }
}
