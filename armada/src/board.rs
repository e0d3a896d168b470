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

//! Types that make up the game board.
use std::{fmt, str::FromStr};

pub(crate) use self::grid::Grid;
pub use self::{
    coordinate::Coordinate,
    errors::{CannotShootReason, OccupiedError, ParseOrientationError, ShotError},
    grid::GRID_SIZE,
};
use crate::ships::FLEET_CELLS;

mod coordinate;
mod errors;
mod grid;

/// A single cell in a player's grid.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Cell {
    /// Open water that has not been shot.
    Water,
    /// Part of a ship, identified by the ship's marker character. Not yet shot.
    Ship(char),
    /// A shot that struck a ship.
    Hit,
    /// A shot that landed in open water.
    Miss,
}

impl Cell {
    /// Get the single-character rendering of this cell.
    pub fn symbol(self) -> char {
        match self {
            Cell::Water => '~',
            Cell::Ship(marker) => marker,
            Cell::Hit => 'X',
            Cell::Miss => 'M',
        }
    }

    /// Whether a shot has been resolved on this cell.
    pub fn is_marked(self) -> bool {
        matches!(self, Cell::Hit | Cell::Miss)
    }
}

impl Default for Cell {
    fn default() -> Self {
        Cell::Water
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut buf = [0; 4];
        f.pad(self.symbol().encode_utf8(&mut buf))
    }
}

/// Placement orientation of a ship. Ships extend from their start coordinate towards
/// increasing `x` (horizontal) or increasing `y` (vertical).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Get the coordinate `offset` cells away from `start` along this orientation.
    fn step(self, start: Coordinate, offset: usize) -> Option<Coordinate> {
        match self {
            Orientation::Horizontal => start
                .x
                .checked_add(offset)
                .map(|x| Coordinate::new(x, start.y)),
            Orientation::Vertical => start
                .y
                .checked_add(offset)
                .map(|y| Coordinate::new(start.x, y)),
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(match self {
            Orientation::Horizontal => "horizontal",
            Orientation::Vertical => "vertical",
        })
    }
}

impl FromStr for Orientation {
    type Err = ParseOrientationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "horizontal" | "h" => Ok(Orientation::Horizontal),
            "vertical" | "v" => Ok(Orientation::Vertical),
            other => Err(ParseOrientationError(other.to_owned())),
        }
    }
}

/// Represents a single player's side of the ocean: their ships and the shots fired at
/// them.
#[derive(Debug, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Board {
    /// Cells of the board, row-major.
    grid: Grid,
}

impl Board {
    /// Construct a board of open water.
    pub fn new() -> Self {
        Self { grid: Grid::new() }
    }

    /// Compute the cells a ship of length `len` would occupy when placed at `start`
    /// with the given orientation. Returns `None` if any of those cells would fall
    /// outside the grid.
    pub fn project(
        start: Coordinate,
        orientation: Orientation,
        len: usize,
    ) -> Option<Vec<Coordinate>> {
        (0..len)
            .map(|offset| {
                orientation
                    .step(start, offset)
                    .filter(|coord| coord.x < GRID_SIZE && coord.y < GRID_SIZE)
            })
            .collect()
    }

    /// Get the cell at the given coordinate. Returns `None` if the coordinate is out
    /// of bounds.
    pub fn get(&self, coord: Coordinate) -> Option<Cell> {
        self.grid.get(coord)
    }

    /// Iterate the rows of the board, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.grid.rows()
    }

    /// Number of [`Cell::Hit`] cells on this board.
    pub fn hits(&self) -> usize {
        self.grid.cells().filter(|cell| *cell == Cell::Hit).count()
    }

    /// Number of cells that have been shot, whether hit or miss.
    pub fn shots(&self) -> usize {
        self.grid.cells().filter(|cell| cell.is_marked()).count()
    }

    /// Returns true once every ship cell of a full fleet has been hit.
    pub fn defeated(&self) -> bool {
        self.hits() == FLEET_CELLS
    }

    pub(crate) fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Write `marker` into every cell of `cells`. Either all cells are written or, if
    /// any target is out of bounds or not open water, none are.
    pub(crate) fn occupy(
        &mut self,
        cells: &[Coordinate],
        marker: char,
    ) -> Result<(), OccupiedError> {
        let free = cells
            .iter()
            .all(|&coord| self.grid.get(coord) == Some(Cell::Water));
        if !free {
            return Err(OccupiedError::new(
                cells
                    .iter()
                    .filter_map(|&coord| self.grid.get(coord).map(|cell| (coord, cell)))
                    .collect(),
            ));
        }
        for &coord in cells {
            self.grid[coord] = Cell::Ship(marker);
        }
        Ok(())
    }

    /// Fire a shot at this board, returning the new state of the targeted cell.
    pub(crate) fn fire(&mut self, coord: Coordinate) -> Result<Cell, ShotError> {
        let cell = match self.grid.get_mut(coord) {
            None => return Err(ShotError::new(CannotShootReason::OutOfBounds, coord)),
            Some(cell) if cell.is_marked() => {
                return Err(ShotError::new(CannotShootReason::AlreadyShot, coord))
            }
            Some(cell) => cell,
        };
        *cell = match *cell {
            Cell::Water => Cell::Miss,
            _ => Cell::Hit,
        };
        Ok(*cell)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn projection_follows_orientation() {
        assert_eq!(
            Board::project(Coordinate::new(2, 3), Orientation::Horizontal, 3),
            Some(vec![
                Coordinate::new(2, 3),
                Coordinate::new(3, 3),
                Coordinate::new(4, 3),
            ])
        );
        assert_eq!(
            Board::project(Coordinate::new(2, 3), Orientation::Vertical, 2),
            Some(vec![Coordinate::new(2, 3), Coordinate::new(2, 4)])
        );
    }

    #[test]
    fn projection_rejects_cells_past_the_edge() {
        let project = |x, y, orientation| Board::project(Coordinate::new(x, y), orientation, 5);
        assert_eq!(project(6, 0, Orientation::Horizontal), None);
        assert_eq!(project(0, 6, Orientation::Vertical), None);
        assert!(project(5, 0, Orientation::Horizontal).is_some());
        assert!(project(0, 5, Orientation::Vertical).is_some());
        // The fixed axis has to be in range too.
        assert_eq!(project(12, 0, Orientation::Vertical), None);
        assert_eq!(project(usize::MAX, 0, Orientation::Horizontal), None);
    }

    #[test]
    fn occupy_is_all_or_nothing() {
        let mut board = Board::new();
        let first = Board::project(Coordinate::new(0, 0), Orientation::Horizontal, 3).unwrap();
        board.occupy(&first, 'C').unwrap();

        let second = Board::project(Coordinate::new(1, 0), Orientation::Horizontal, 3).unwrap();
        let err = board.occupy(&second, 'S').unwrap_err();
        assert_eq!(
            err.cells(),
            &[
                (Coordinate::new(1, 0), Cell::Ship('C')),
                (Coordinate::new(2, 0), Cell::Ship('C')),
                (Coordinate::new(3, 0), Cell::Water),
            ][..]
        );
        assert_eq!(board.get(Coordinate::new(3, 0)), Some(Cell::Water));
    }

    #[test]
    fn shots_mark_cells_permanently() {
        let mut board = Board::new();
        board.occupy(&[Coordinate::new(4, 4)], 'D').unwrap();

        assert_eq!(board.fire(Coordinate::new(4, 4)).unwrap(), Cell::Hit);
        assert_eq!(board.fire(Coordinate::new(5, 5)).unwrap(), Cell::Miss);
        assert_eq!(board.hits(), 1);
        assert_eq!(board.shots(), 2);

        let err = board.fire(Coordinate::new(4, 4)).unwrap_err();
        assert_eq!(err.reason(), CannotShootReason::AlreadyShot);
        assert_eq!(err.coord(), Coordinate::new(4, 4));
        let err = board.fire(Coordinate::new(10, 0)).unwrap_err();
        assert_eq!(err.reason(), CannotShootReason::OutOfBounds);
        assert_eq!(err.coord(), Coordinate::new(10, 0));
        assert_eq!(
            err.to_string(),
            "could not shoot cell 10,0: the target coordinate is out of bounds"
        );
        assert_eq!(board.shots(), 2);
    }

    #[test]
    fn cells_render_as_symbols() {
        assert_eq!(Cell::Water.to_string(), "~");
        assert_eq!(Cell::Ship('B').to_string(), "B");
        assert_eq!(Cell::Hit.to_string(), "X");
        assert_eq!(Cell::Miss.to_string(), "M");
    }

    #[test]
    fn orientation_parses_long_and_short_forms() {
        assert_eq!("horizontal".parse(), Ok(Orientation::Horizontal));
        assert_eq!("v".parse(), Ok(Orientation::Vertical));
        assert!("diagonal".parse::<Orientation>().is_err());
    }
}
