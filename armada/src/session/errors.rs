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
use thiserror::Error;

/// A session rule that forbids the requested operation in the session's current state.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum Precondition {
    /// The acting player is not one of the session's participants.
    #[error("not part of this game")]
    NotParticipant,

    /// The game has been won; no further moves can be made.
    #[error("the game is already over")]
    GameAlreadyOver,

    /// Another player holds the turn, or the game has not started yet.
    #[error("it is not your turn")]
    NotYourTurn,

    /// The target coordinate is outside the board.
    #[error("target coordinates must be within 0 to 9")]
    OutOfBounds,

    /// The target cell was already hit or missed.
    #[error("already targeted, choose a different target")]
    AlreadyTargeted,

    /// The session already has two participants.
    #[error("game already full")]
    SessionFull,

    /// The joining player created the session.
    #[error("you cannot join your own game")]
    CannotJoinOwnSession,
}
