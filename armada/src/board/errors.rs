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

//! Errors used by the [`Board`][crate::board::Board].

use thiserror::Error;

use crate::board::{Cell, Coordinate};

/// Reason why a particular cell could not be shot.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum CannotShootReason {
    /// The cell selected was out of bounds on the board.
    #[error("the target coordinate is out of bounds")]
    OutOfBounds,

    /// A shot has already been fired at that cell.
    #[error("the target cell was already shot")]
    AlreadyShot,
}

/// Error returned when trying to shoot a cell.
#[derive(Debug, Error)]
#[error("could not shoot cell {coord}: {reason}")]
pub struct ShotError {
    /// Reason why the cell could not be shot.
    reason: CannotShootReason,

    /// The coordinates of the cell.
    coord: Coordinate,
}

impl ShotError {
    /// Construct a shot error with the given reason for the specified cell.
    pub(super) fn new(reason: CannotShootReason, coord: Coordinate) -> Self {
        Self { reason, coord }
    }

    /// Get the reason the shot failed.
    pub fn reason(&self) -> CannotShootReason {
        self.reason
    }

    /// Get the coordinate of the shot cell.
    pub fn coord(&self) -> Coordinate {
        self.coord
    }
}

/// Error returned when ship cells cannot be written because some target cells are not
/// open water. Carries every target cell together with its current contents.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
#[error("{} target cell(s) already occupied", occupied_count(.cells))]
pub struct OccupiedError {
    cells: Vec<(Coordinate, Cell)>,
}

fn occupied_count(cells: &[(Coordinate, Cell)]) -> usize {
    cells.iter().filter(|(_, cell)| *cell != Cell::Water).count()
}

impl OccupiedError {
    pub(super) fn new(cells: Vec<(Coordinate, Cell)>) -> Self {
        Self { cells }
    }

    /// Target cells and what currently occupies them.
    pub fn cells(&self) -> &[(Coordinate, Cell)] {
        &self.cells
    }

    /// Extract the target cells.
    pub fn into_cells(self) -> Vec<(Coordinate, Cell)> {
        self.cells
    }
}

/// Error returned when parsing an [`Orientation`][crate::board::Orientation] from text.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
#[error("invalid orientation {0:?}, expected \"horizontal\" or \"vertical\"")]
pub struct ParseOrientationError(pub(super) String);
