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
use std::fmt::{self, Debug};

use thiserror::Error;

use crate::{
    board::{Cell, Coordinate},
    placement::Placement,
};

/// Reason why a ship could not be placed at a given position.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CannotPlaceReason {
    /// The ship name does not appear in the fleet catalog.
    #[error("invalid ship name")]
    InvalidShipName,
    /// The ship does not fit on the board in the requested direction.
    #[error("ship exceeds grid boundaries")]
    OutOfBounds,
    /// One or more target cells were already occupied. Carries every target cell and
    /// its contents at the time of the check.
    #[error("position overlaps with another ship")]
    Overlap(Vec<(Coordinate, Cell)>),
}

/// Error caused when attempting to place a ship in an invalid position.
#[derive(Error, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[error("could not place {placement}: {reason}")]
pub struct PlacementError {
    #[source]
    reason: CannotPlaceReason,
    placement: Placement,
}

impl Debug for PlacementError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl PlacementError {
    /// Construct a placement error from a reason and the rejected placement.
    pub(super) fn new(reason: CannotPlaceReason, placement: Placement) -> Self {
        Self { reason, placement }
    }

    /// Get the reason placement was rejected.
    pub fn reason(&self) -> &CannotPlaceReason {
        &self.reason
    }

    /// Get a reference to the rejected [`Placement`].
    pub fn placement(&self) -> &Placement {
        &self.placement
    }

    /// Extract the Placement from this error.
    pub fn into_placement(self) -> Placement {
        self.placement
    }
}
