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

//! Shot resolution, turn ownership and victory.
use log::debug;

use crate::{
    board::{CannotShootReason, Cell, Coordinate},
    names::DisplayNames,
    session::{GameSession, PlayerId, Precondition, Side, Status},
    view::BoardView,
};

/// What a shot did.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ShotKind {
    /// Struck a ship. The shooter keeps the turn.
    Hit,
    /// Struck open water. The turn passes to the opponent.
    Miss,
    /// Struck the last unhit ship cell of the opposing fleet.
    Win,
}

/// Fire `actor`'s shot at `target` on the opponent's board.
///
/// Nothing is modified unless the shot is allowed.
pub(crate) fn resolve(
    session: &mut GameSession,
    actor: &PlayerId,
    target: Coordinate,
) -> Result<ShotKind, Precondition> {
    let side = session.side_of(actor).ok_or(Precondition::NotParticipant)?;
    if session.is_game_over() {
        return Err(Precondition::GameAlreadyOver);
    }
    if session.current_player() != Some(actor) {
        return Err(Precondition::NotYourTurn);
    }
    // Active implies both seats are filled.
    let opponent = session
        .participant(side.opponent())
        .cloned()
        .ok_or(Precondition::NotYourTurn)?;

    let id = session.id();
    let board = session.board_mut(side.opponent());
    let cell = board.fire(target).map_err(|err| {
        debug!("session {}: shot at {} refused: {}", id, err.coord(), err.reason());
        match err.reason() {
            CannotShootReason::OutOfBounds => Precondition::OutOfBounds,
            CannotShootReason::AlreadyShot => Precondition::AlreadyTargeted,
        }
    })?;
    let defeated = board.defeated();

    let kind = match cell {
        Cell::Hit if defeated => {
            session.set_status(Status::Finished {
                winner: actor.clone(),
            });
            ShotKind::Win
        }
        Cell::Hit => ShotKind::Hit,
        _ => {
            session.set_status(Status::Active { current: opponent });
            ShotKind::Miss
        }
    };
    debug!("session {}: {} fired at {}: {:?}", session.id(), actor, target, kind);
    Ok(kind)
}

/// Messages for both participants once a game is won.
#[derive(Debug, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Verdict {
    pub winner: PlayerId,
    pub loser: PlayerId,
    /// Shown to the winner.
    pub win_message: String,
    /// Shown to the loser.
    pub loss_message: String,
}

impl Verdict {
    fn new(winner: PlayerId, loser: PlayerId, names: &impl DisplayNames) -> Self {
        let winner_name = names.name_or_unknown(&winner);
        Self {
            win_message: format!(
                "Last ship hit! Congratulations! {} wins the game!",
                winner_name
            ),
            loss_message: format!("{} has won the game. Better luck next time.", winner_name),
            winner,
            loser,
        }
    }

    /// Get the message addressed to `player`. `None` if they did not play.
    pub fn message_for(&self, player: &PlayerId) -> Option<&str> {
        if *player == self.winner {
            Some(&self.win_message)
        } else if *player == self.loser {
            Some(&self.loss_message)
        } else {
            None
        }
    }
}

/// Result of a resolved move, as returned to the player who made it.
#[derive(Debug, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveReport {
    pub kind: ShotKind,
    pub target: Coordinate,
    /// The shooter's own board.
    pub your_board: BoardView,
    /// The board that was shot at, with ships hidden.
    pub opponent_board: BoardView,
    /// Present when this move won the game.
    pub verdict: Option<Verdict>,
}

impl MoveReport {
    pub(crate) fn new(
        session: &GameSession,
        side: Side,
        kind: ShotKind,
        target: Coordinate,
        names: &impl DisplayNames,
    ) -> Self {
        let verdict = match kind {
            ShotKind::Win => {
                let winner = session.participant(side).cloned();
                let loser = session.participant(side.opponent()).cloned();
                winner
                    .zip(loser)
                    .map(|(winner, loser)| Verdict::new(winner, loser, names))
            }
            _ => None,
        };
        Self {
            kind,
            target,
            your_board: BoardView::owner(session.board(side)),
            opponent_board: BoardView::opponent(session.board(side.opponent())),
            verdict,
        }
    }

    /// The message shown to the player who moved.
    pub fn message(&self) -> &str {
        match (self.kind, &self.verdict) {
            (ShotKind::Win, Some(verdict)) => &verdict.win_message,
            (ShotKind::Hit, _) | (ShotKind::Win, None) => "Hit! You can continue your turn.",
            (ShotKind::Miss, _) => "Miss. Let the other player take their turn.",
        }
    }
}
