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

//! Validation of ship placement batches.
//!
//! A batch is processed in request order against the live board: each placement either
//! lands (its cells are written immediately), is skipped because the ship is already on
//! the board, or is rejected with a [`PlacementError`]. Rejections never undo the
//! placements that landed before or after them; whether a rejected batch is persisted is
//! decided by the caller's [`BatchPolicy`][crate::engine::BatchPolicy].
use std::fmt;

use log::debug;

use crate::{
    board::{Board, Coordinate, Orientation},
    fleet::Fleet,
    ships::Ship,
    view::BoardView,
};

pub use self::errors::{CannotPlaceReason, PlacementError};

mod errors;

/// A request to place one ship, as submitted by a player.
#[derive(Debug, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Placement {
    /// Column of the ship's first cell.
    pub x: usize,
    /// Row of the ship's first cell.
    pub y: usize,
    /// Direction the ship extends in from its first cell.
    pub orientation: Orientation,
    /// Catalog name of the ship to place.
    pub ship_name: String,
}

impl Placement {
    /// Construct a placement request for the named ship.
    pub fn new(
        ship_name: impl Into<String>,
        x: usize,
        y: usize,
        orientation: Orientation,
    ) -> Self {
        Self {
            x,
            y,
            orientation,
            ship_name: ship_name.into(),
        }
    }

    /// Get the coordinate of the ship's first cell.
    pub fn start(&self) -> Coordinate {
        Coordinate::new(self.x, self.y)
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} at {},{} {}",
            self.ship_name, self.x, self.y, self.orientation
        )
    }
}

/// What happened to a single placement of a batch.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum PlacementOutcome {
    /// The ship was written to the board on the given cells.
    Placed(Ship, Vec<Coordinate>),
    /// The ship was already on the board; nothing changed.
    AlreadyPlaced(Ship),
    /// The placement was invalid; nothing changed for it.
    Rejected(PlacementError),
}

/// Ordered outcomes of every placement in a batch.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct PlacementReport {
    outcomes: Vec<PlacementOutcome>,
}

impl PlacementReport {
    /// Outcomes in request order.
    pub fn outcomes(&self) -> &[PlacementOutcome] {
        &self.outcomes
    }

    /// Returns true if any placement of the batch was rejected.
    pub fn is_rejected(&self) -> bool {
        self.errors().next().is_some()
    }

    /// Iterate the rejected placements.
    pub fn errors(&self) -> impl Iterator<Item = &PlacementError> {
        self.outcomes.iter().filter_map(|outcome| match outcome {
            PlacementOutcome::Rejected(err) => Some(err),
            _ => None,
        })
    }

    /// Extract the rejected placements.
    pub fn into_errors(self) -> Vec<PlacementError> {
        self.outcomes
            .into_iter()
            .filter_map(|outcome| match outcome {
                PlacementOutcome::Rejected(err) => Some(err),
                _ => None,
            })
            .collect()
    }
}

/// Apply a batch of placements to one player's board and fleet.
pub fn place_fleet(
    board: &mut Board,
    fleet: &mut Fleet,
    placements: &[Placement],
) -> PlacementReport {
    let outcomes = placements
        .iter()
        .map(|placement| match place_one(board, fleet, placement) {
            Ok(outcome) => {
                debug!("placement {} accepted: {:?}", placement, outcome);
                outcome
            }
            Err(reason) => {
                debug!("placement {} rejected: {}", placement, reason);
                PlacementOutcome::Rejected(PlacementError::new(reason, placement.clone()))
            }
        })
        .collect();
    PlacementReport { outcomes }
}

fn place_one(
    board: &mut Board,
    fleet: &mut Fleet,
    placement: &Placement,
) -> Result<PlacementOutcome, CannotPlaceReason> {
    let ship =
        Ship::from_name(&placement.ship_name).ok_or(CannotPlaceReason::InvalidShipName)?;
    let state = fleet
        .get_mut(ship)
        .ok_or(CannotPlaceReason::InvalidShipName)?;
    if state.placed() {
        return Ok(PlacementOutcome::AlreadyPlaced(ship));
    }
    let cells = Board::project(placement.start(), placement.orientation, ship.len())
        .ok_or(CannotPlaceReason::OutOfBounds)?;
    board
        .occupy(&cells, ship.marker())
        .map_err(|err| CannotPlaceReason::Overlap(err.into_cells()))?;
    state.place(cells.clone());
    Ok(PlacementOutcome::Placed(ship, cells))
}

/// Progress of the session after a successful placement call.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlacementStatus {
    /// The batch was applied. `game_ready` is true if both fleets are now complete.
    Placed { game_ready: bool },
    /// The player's fleet was already complete; the batch was ignored.
    AlreadyPlaced { game_ready: bool },
}

impl PlacementStatus {
    /// Whether both fleets are complete and the game has started.
    pub fn game_ready(self) -> bool {
        match self {
            PlacementStatus::Placed { game_ready }
            | PlacementStatus::AlreadyPlaced { game_ready } => game_ready,
        }
    }
}

impl fmt::Display for PlacementStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(match *self {
            PlacementStatus::Placed { game_ready: true } => {
                "Ships placed successfully. Game can now start."
            }
            PlacementStatus::Placed { game_ready: false } => {
                "Ships placed successfully. Waiting for the other player to place ships."
            }
            PlacementStatus::AlreadyPlaced { game_ready: true } => {
                "Ships already placed. Game can now start."
            }
            PlacementStatus::AlreadyPlaced { game_ready: false } => {
                "Ships already placed. Waiting for the other player to place ships."
            }
        })
    }
}

/// Result of a successful placement call.
#[derive(Debug, Clone)]
pub struct PlacementSummary {
    /// Where the session stands after the call.
    pub status: PlacementStatus,
    /// Per-placement outcomes. Empty when the fleet was already complete.
    pub report: PlacementReport,
    /// The acting player's own board.
    pub your_board: BoardView,
}
