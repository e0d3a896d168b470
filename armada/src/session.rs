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

//! The session aggregate: two participants, their boards and fleets, and the status
//! of the match.
use std::fmt;

use crate::{
    board::Board,
    fleet::Fleet,
    placement::{self, Placement, PlacementReport},
};

pub use self::errors::Precondition;

mod errors;

/// Identifier of a participant, resolved by the caller before reaching the engine.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct PlayerId(String);

impl PlayerId {
    /// Construct a player id.
    pub fn new(id: impl Into<String>) -> Self {
        PlayerId(id.into())
    }

    /// Get the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PlayerId {
    fn from(id: &str) -> Self {
        PlayerId::new(id)
    }
}

impl From<String> for PlayerId {
    fn from(id: String) -> Self {
        PlayerId(id)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(&self.0)
    }
}

/// Opaque session identifier, assigned by the [`SessionStore`][crate::store::SessionStore].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SessionId(u64);

impl SessionId {
    /// Get the raw value of this id.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for SessionId {
    fn from(id: u64) -> Self {
        SessionId(id)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Seat of a participant within a session. `First` is the creator.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Side {
    First,
    Second,
}

impl Side {
    /// Get the opponent's side.
    pub fn opponent(self) -> Self {
        match self {
            Side::First => Side::Second,
            Side::Second => Side::First,
        }
    }
}

/// Lifecycle state of a session. Moves only forward: `Pending`, `Active`, `Finished`.
#[derive(Debug, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "status", rename_all = "lowercase"))]
pub enum Status {
    /// Waiting for a second player or for fleets to be placed.
    Pending,
    /// Both fleets are placed; `current` holds the turn.
    Active { current: PlayerId },
    /// `winner` sank the opposing fleet. The turn stays frozen with the winner.
    Finished { winner: PlayerId },
}

impl Status {
    /// The player allowed to move next, or the player who made the final move once the
    /// game is over. `None` while pending.
    pub fn current_player(&self) -> Option<&PlayerId> {
        match self {
            Status::Pending => None,
            Status::Active { current } => Some(current),
            Status::Finished { winner } => Some(winner),
        }
    }

    /// Get the winner, if the game is over.
    pub fn winner(&self) -> Option<&PlayerId> {
        match self {
            Status::Finished { winner } => Some(winner),
            _ => None,
        }
    }

    /// Returns true once the game is over.
    pub fn is_game_over(&self) -> bool {
        matches!(self, Status::Finished { .. })
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(match self {
            Status::Pending => "pending",
            Status::Active { .. } => "active",
            Status::Finished { .. } => "finished",
        })
    }
}

/// One Battleship match between two participants.
#[derive(Debug, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameSession {
    id: SessionId,

    /// Store revision this record was loaded at.
    version: u64,

    player1: PlayerId,
    player2: Option<PlayerId>,

    board1: Board,
    board2: Board,

    fleet1: Fleet,
    fleet2: Fleet,

    status: Status,
}

impl GameSession {
    /// Create a pending session owned by `player1` with two empty boards and two
    /// unplaced fleets.
    pub fn new(id: SessionId, player1: PlayerId) -> Self {
        Self {
            id,
            version: 0,
            player1,
            player2: None,
            board1: Board::new(),
            board2: Board::new(),
            fleet1: Fleet::new(),
            fleet2: Fleet::new(),
            status: Status::Pending,
        }
    }

    /// Get the id of this session.
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// Get the store revision of this record. Zero for a record that was never saved.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Set the store revision. Only meant for [`SessionStore`][crate::store::SessionStore]
    /// implementations.
    pub fn set_version(&mut self, version: u64) {
        self.version = version;
    }

    /// Get the creator of the session.
    pub fn player1(&self) -> &PlayerId {
        &self.player1
    }

    /// Get the player who joined the session, if any.
    pub fn player2(&self) -> Option<&PlayerId> {
        self.player2.as_ref()
    }

    /// Get the participant seated at `side`.
    pub fn participant(&self, side: Side) -> Option<&PlayerId> {
        match side {
            Side::First => Some(&self.player1),
            Side::Second => self.player2.as_ref(),
        }
    }

    /// Find which side the given player is seated at. `None` for non-participants.
    pub fn side_of(&self, player: &PlayerId) -> Option<Side> {
        if *player == self.player1 {
            Some(Side::First)
        } else if self.player2.as_ref() == Some(player) {
            Some(Side::Second)
        } else {
            None
        }
    }

    /// Get the board owned by the player at `side`.
    pub fn board(&self, side: Side) -> &Board {
        match side {
            Side::First => &self.board1,
            Side::Second => &self.board2,
        }
    }

    /// Get the fleet owned by the player at `side`.
    pub fn fleet(&self, side: Side) -> &Fleet {
        match side {
            Side::First => &self.fleet1,
            Side::Second => &self.fleet2,
        }
    }

    pub(crate) fn board_mut(&mut self, side: Side) -> &mut Board {
        match side {
            Side::First => &mut self.board1,
            Side::Second => &mut self.board2,
        }
    }

    /// Get the current status.
    pub fn status(&self) -> &Status {
        &self.status
    }

    /// Get the player allowed to move next. See [`Status::current_player`].
    pub fn current_player(&self) -> Option<&PlayerId> {
        self.status.current_player()
    }

    /// Returns true once the game is over.
    pub fn is_game_over(&self) -> bool {
        self.status.is_game_over()
    }

    /// Returns true if both fleets are fully placed.
    pub fn fleets_placed(&self) -> bool {
        self.fleet1.all_placed() && self.fleet2.all_placed()
    }

    pub(crate) fn set_status(&mut self, status: Status) {
        self.status = status;
    }

    /// Seat `player` as the second participant.
    pub(crate) fn join(&mut self, player: PlayerId) -> Result<(), Precondition> {
        if self.player2.is_some() {
            Err(Precondition::SessionFull)
        } else if player == self.player1 {
            Err(Precondition::CannotJoinOwnSession)
        } else {
            self.player2 = Some(player);
            Ok(())
        }
    }

    /// Apply a placement batch to the fleet and board at `side`.
    pub(crate) fn place(&mut self, side: Side, placements: &[Placement]) -> PlacementReport {
        let (board, fleet) = match side {
            Side::First => (&mut self.board1, &mut self.fleet1),
            Side::Second => (&mut self.board2, &mut self.fleet2),
        };
        placement::place_fleet(board, fleet, placements)
    }

    /// Move a pending session to active once both players are seated and both fleets
    /// are placed. Player 1 always moves first. Returns true if the status changed.
    pub(crate) fn try_start(&mut self) -> bool {
        if self.status == Status::Pending && self.player2.is_some() && self.fleets_placed() {
            self.status = Status::Active {
                current: self.player1.clone(),
            };
            true
        } else {
            false
        }
    }

    /// Recompute the win condition from the boards alone. A session whose board carries
    /// a sunk fleet is finished no matter what status was recorded. Returns true if the
    /// status changed.
    pub(crate) fn detect_victory(&mut self) -> bool {
        if self.status.is_game_over() {
            return false;
        }
        let winner = if self.board2.defeated() {
            Some(self.player1.clone())
        } else if self.board1.defeated() {
            self.player2.clone()
        } else {
            None
        };
        match winner {
            Some(winner) => {
                self.status = Status::Finished { winner };
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{board::Coordinate, testing};

    #[test]
    fn new_session_is_pending_without_a_turn() {
        let session = GameSession::new(SessionId::from(1), PlayerId::from("alice"));
        assert_eq!(session.status(), &Status::Pending);
        assert_eq!(session.current_player(), None);
        assert_eq!(session.player2(), None);
        assert!(!session.is_game_over());
        assert!(!session.fleets_placed());
        assert_eq!(session.board(Side::First), &Board::new());
        assert_eq!(session.fleet(Side::Second), &Fleet::new());
    }

    #[test]
    fn join_checks_capacity_then_ownership() {
        let mut session = GameSession::new(SessionId::from(1), PlayerId::from("alice"));
        assert_eq!(
            session.join(PlayerId::from("alice")),
            Err(Precondition::CannotJoinOwnSession)
        );
        assert_eq!(session.join(PlayerId::from("bob")), Ok(()));
        assert_eq!(session.side_of(&PlayerId::from("bob")), Some(Side::Second));
        assert_eq!(session.join(PlayerId::from("carol")), Err(Precondition::SessionFull));
        assert_eq!(session.join(PlayerId::from("alice")), Err(Precondition::SessionFull));
        assert_eq!(session.side_of(&PlayerId::from("carol")), None);
    }

    #[test]
    fn session_starts_only_with_both_fleets_placed() {
        let mut session = GameSession::new(SessionId::from(1), PlayerId::from("alice"));
        session.place(Side::First, &testing::standard_layout());
        assert!(!session.try_start());

        session.join(PlayerId::from("bob")).unwrap();
        assert!(!session.try_start());

        session.place(Side::Second, &testing::standard_layout());
        assert!(session.try_start());
        assert_eq!(session.current_player(), Some(&PlayerId::from("alice")));
        assert!(!session.try_start());
    }

    #[test]
    fn victory_is_derived_from_board_state() {
        let mut session = testing::active_session();
        assert!(!session.detect_victory());

        for coord in testing::ship_cells() {
            session.board_mut(Side::Second).fire(coord).unwrap();
        }
        assert!(session.detect_victory());
        assert_eq!(session.status().winner(), Some(&PlayerId::from("alice")));
        assert!(session.is_game_over());
        assert!(!session.detect_victory());
    }

    #[test]
    fn sixteen_hits_are_not_a_victory() {
        let mut session = testing::active_session();
        for coord in testing::ship_cells().skip(1) {
            session.board_mut(Side::First).fire(coord).unwrap();
        }
        session.board_mut(Side::First).fire(Coordinate::new(9, 9)).unwrap();
        assert_eq!(session.board(Side::First).hits(), 16);
        assert!(!session.detect_victory());
    }
}
