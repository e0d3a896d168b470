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

//! Engine for two-player Battleship sessions.
//!
//! The crate is layered leaves first:
//!
//! * [`ships`] is the fixed fleet catalog shared by every session.
//! * [`board`] and [`fleet`] hold one player's grid and ship records.
//! * [`placement`] validates and applies batches of ship placements.
//! * [`turn`] resolves shots, turn ownership and victory.
//! * [`view`] derives the owner and fog-of-war projections of a board.
//! * [`session`] is the aggregate that ties two players together.
//! * [`engine`] drives sessions through a [`SessionStore`], serializing access per
//!   session.
//!
//! Callers are expected to have authenticated the acting player already; the engine
//! addresses players only through [`PlayerId`].

pub mod board;
pub mod engine;
pub mod fleet;
pub mod names;
pub mod placement;
#[cfg(feature = "rng_gen")]
pub mod random;
pub mod session;
pub mod ships;
pub mod store;
#[cfg(test)]
mod testing;
pub mod turn;
pub mod view;

pub use crate::{
    board::{Board, Cell, Coordinate, Orientation, GRID_SIZE},
    engine::{BatchPolicy, Engine, EngineConfig, EngineError, ErrorKind},
    fleet::{Fleet, ShipState},
    names::{Anonymous, DisplayNames},
    placement::{CannotPlaceReason, Placement, PlacementError, PlacementStatus, PlacementSummary},
    session::{GameSession, PlayerId, Precondition, SessionId, Side, Status},
    ships::{Ship, CATALOG, FLEET_CELLS},
    store::{MemoryStore, SessionStore, StoreError},
    turn::{MoveReport, ShotKind, Verdict},
    view::{BoardView, Reveal, SessionView},
};
