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

//! Row-major cell storage shared between [`Board`] and
//! [`BoardView`][crate::view::BoardView].
use std::{
    convert::TryFrom,
    ops::{Index, IndexMut},
};

use thiserror::Error;

use crate::board::{Cell, Coordinate};

/// Width and height of every board.
pub const GRID_SIZE: usize = 10;

/// Number of cells in a grid.
pub(crate) const CELL_COUNT: usize = GRID_SIZE * GRID_SIZE;

/// Error produced when a stored grid does not hold exactly [`GRID_SIZE`] squared cells.
#[derive(Debug, Error)]
#[error("grid must hold 100 cells, found {0}")]
pub(crate) struct GridSizeError(usize);

/// Fixed-size grid of cells.
#[derive(Debug, Clone, Eq, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<Cell>", into = "Vec<Cell>")
)]
pub(crate) struct Grid {
    cells: Box<[Cell]>,
}

impl Grid {
    /// Construct a grid where every cell is [`Cell::Water`].
    pub(crate) fn new() -> Self {
        Self {
            cells: vec![Cell::Water; CELL_COUNT].into_boxed_slice(),
        }
    }

    /// Convert a coordinate to an index into the cell storage. Returns `None` if the
    /// coordinate is out of bounds.
    #[inline]
    fn linearize(coord: Coordinate) -> Option<usize> {
        if coord.x < GRID_SIZE && coord.y < GRID_SIZE {
            Some(coord.y * GRID_SIZE + coord.x)
        } else {
            None
        }
    }

    /// Get the cell at the given [`Coordinate`].
    pub(crate) fn get(&self, coord: Coordinate) -> Option<Cell> {
        Self::linearize(coord).map(|i| self.cells[i])
    }

    /// Get a mutable reference to the cell at the given [`Coordinate`].
    pub(crate) fn get_mut(&mut self, coord: Coordinate) -> Option<&mut Cell> {
        Self::linearize(coord).map(move |i| &mut self.cells[i])
    }

    /// Iterate the rows of the grid, top to bottom.
    pub(crate) fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(GRID_SIZE)
    }

    /// Iterate all cells in row-major order.
    pub(crate) fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().copied()
    }

    /// Build a new grid by mapping every cell of this one.
    pub(crate) fn map(&self, f: impl FnMut(Cell) -> Cell) -> Grid {
        Grid {
            cells: self.cells.iter().copied().map(f).collect(),
        }
    }
}

impl Index<Coordinate> for Grid {
    type Output = Cell;

    fn index(&self, coord: Coordinate) -> &Self::Output {
        Self::linearize(coord)
            .map(|i| &self.cells[i])
            .expect("coordinate out of bounds")
    }
}

impl IndexMut<Coordinate> for Grid {
    fn index_mut(&mut self, coord: Coordinate) -> &mut Self::Output {
        self.get_mut(coord).expect("coordinate out of bounds")
    }
}

impl TryFrom<Vec<Cell>> for Grid {
    type Error = GridSizeError;

    fn try_from(cells: Vec<Cell>) -> Result<Self, Self::Error> {
        if cells.len() == CELL_COUNT {
            Ok(Grid {
                cells: cells.into_boxed_slice(),
            })
        } else {
            Err(GridSizeError(cells.len()))
        }
    }
}

impl From<Grid> for Vec<Cell> {
    fn from(grid: Grid) -> Self {
        grid.cells.into_vec()
    }
}
