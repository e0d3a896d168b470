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

//! Session operations on top of a [`SessionStore`].
//!
//! Every operation loads the session, checks and applies the change, and saves the
//! result while holding that session's lock, so two operations on the same session
//! never interleave within one engine. Saves are additionally version-checked by the
//! store, which catches writers outside this engine.
use std::{collections::HashMap, sync::Arc};

use log::{debug, info, warn};
use parking_lot::Mutex;

use crate::{
    board::Coordinate,
    names::{Anonymous, DisplayNames},
    placement::{Placement, PlacementReport, PlacementStatus, PlacementSummary},
    session::{GameSession, PlayerId, Precondition, SessionId, Side, Status},
    store::SessionStore,
    turn::{self, MoveReport, ShotKind},
    view::{BoardView, PlayerSummary, SessionView},
};

pub use self::errors::{EngineError, ErrorKind};

mod errors;

/// What to do with a placement batch that has rejected entries.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum BatchPolicy {
    /// Persist the placements that were valid and report the rest. Valid placements
    /// before and after a rejected one stay on the board.
    KeepValid,
    /// Persist nothing from a batch that has any rejected placement.
    Atomic,
}

impl Default for BatchPolicy {
    fn default() -> Self {
        BatchPolicy::KeepValid
    }
}

/// Engine settings.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub struct EngineConfig {
    pub batch_policy: BatchPolicy,
}

/// Drives Battleship sessions held in a [`SessionStore`].
pub struct Engine<S, N = Anonymous> {
    store: S,
    names: N,
    config: EngineConfig,
    /// One lock per session with an operation in flight.
    locks: Mutex<HashMap<SessionId, Arc<Mutex<()>>>>,
}

impl<S: SessionStore> Engine<S> {
    /// Construct an engine with the default configuration and no display names.
    pub fn new(store: S) -> Self {
        Self::with_config(store, Anonymous, EngineConfig::default())
    }
}

impl<S: SessionStore, N: DisplayNames> Engine<S, N> {
    /// Construct an engine that resolves display names through `names`.
    pub fn with_config(store: S, names: N, config: EngineConfig) -> Self {
        Self {
            store,
            names,
            config,
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Get the backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Get the configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Create a pending session owned by `player1`.
    pub fn create_session(&self, player1: PlayerId) -> Result<SessionId, EngineError> {
        let id = self.store.next_id()?;
        let session = GameSession::new(id, player1);
        self.save(&session)?;
        info!("session {} created by {}", id, session.player1());
        Ok(id)
    }

    /// Seat `player2` as the second participant of session `id`, returning their view.
    pub fn join_session(
        &self,
        id: SessionId,
        player2: PlayerId,
    ) -> Result<SessionView, EngineError> {
        self.with_session_lock(id, || {
            let mut session = self.load(id)?;
            session.join(player2)?;
            self.start_if_ready(&mut session);
            self.save(&session)?;
            if let Some(player2) = session.player2() {
                info!("session {}: {} joined", id, player2);
            }
            Ok(self.session_view(&session, Side::Second))
        })
    }

    /// Place ships on `player`'s board.
    ///
    /// If the player's fleet is already complete the batch is ignored. Otherwise each
    /// placement is applied in order; rejected placements are returned as
    /// [`EngineError::Validation`] and the configured [`BatchPolicy`] decides whether
    /// the valid ones are kept. The session starts once both fleets are complete.
    pub fn place_ships(
        &self,
        id: SessionId,
        player: &PlayerId,
        placements: &[Placement],
    ) -> Result<PlacementSummary, EngineError> {
        self.with_session_lock(id, || {
            let mut session = self.load(id)?;
            let side = session.side_of(player).ok_or(Precondition::NotParticipant)?;
            if session.fleet(side).all_placed() {
                debug!("session {}: fleet of {} already placed", id, player);
                return Ok(PlacementSummary {
                    status: PlacementStatus::AlreadyPlaced {
                        game_ready: game_ready(&session),
                    },
                    report: PlacementReport::default(),
                    your_board: BoardView::owner(session.board(side)),
                });
            }

            let report = session.place(side, placements);
            self.start_if_ready(&mut session);
            if report.is_rejected() {
                match self.config.batch_policy {
                    BatchPolicy::KeepValid => self.save(&session)?,
                    BatchPolicy::Atomic => {
                        debug!("session {}: discarding rejected batch from {}", id, player)
                    }
                }
                return Err(EngineError::Validation(report.into_errors()));
            }
            self.save(&session)?;
            Ok(PlacementSummary {
                status: PlacementStatus::Placed {
                    game_ready: game_ready(&session),
                },
                report,
                your_board: BoardView::owner(session.board(side)),
            })
        })
    }

    /// Fire `player`'s shot at `(x, y)` on the opponent's board.
    pub fn resolve_move(
        &self,
        id: SessionId,
        player: &PlayerId,
        x: usize,
        y: usize,
    ) -> Result<MoveReport, EngineError> {
        let target = Coordinate::new(x, y);
        self.with_session_lock(id, || {
            let mut session = self.load(id)?;
            let side = session.side_of(player).ok_or(Precondition::NotParticipant)?;
            let kind = turn::resolve(&mut session, player, target)?;
            self.save(&session)?;
            if kind == ShotKind::Win {
                info!("session {}: {} sank the last ship and won", id, player);
            }
            Ok(MoveReport::new(&session, side, kind, target, &self.names))
        })
    }

    /// Get `viewer`'s view of session `id`.
    pub fn view(&self, id: SessionId, viewer: &PlayerId) -> Result<SessionView, EngineError> {
        self.with_session_lock(id, || {
            let session = self.load(id)?;
            let side = session.side_of(viewer).ok_or(Precondition::NotParticipant)?;
            Ok(self.session_view(&session, side))
        })
    }

    /// Run `op` while holding the lock for session `id`.
    ///
    /// The lock's table entry is dropped again once no other operation holds or waits
    /// on it, so the table only ever holds sessions with operations in flight.
    fn with_session_lock<T>(
        &self,
        id: SessionId,
        op: impl FnOnce() -> Result<T, EngineError>,
    ) -> Result<T, EngineError> {
        let lock = self.locks.lock().entry(id).or_default().clone();
        let result = {
            let _guard = lock.lock();
            op()
        };
        // Clones are only handed out under the table lock, so the count is stable here.
        let mut locks = self.locks.lock();
        if Arc::strong_count(&lock) == 2 {
            locks.remove(&id);
        }
        result
    }

    /// Load a session and re-derive its win condition from the boards.
    fn load(&self, id: SessionId) -> Result<GameSession, EngineError> {
        let mut session = self.store.load(id)?.ok_or(EngineError::SessionNotFound(id))?;
        if session.detect_victory() {
            if let Some(winner) = session.status().winner() {
                info!("session {}: loaded with a sunk fleet, {} wins", id, winner);
            }
        }
        Ok(session)
    }

    fn save(&self, session: &GameSession) -> Result<(), EngineError> {
        match self.store.save(session) {
            Ok(version) => {
                debug!("session {} saved at version {}", session.id(), version);
                Ok(())
            }
            Err(err) => {
                warn!("session {} not saved: {}", session.id(), err);
                Err(err.into())
            }
        }
    }

    fn start_if_ready(&self, session: &mut GameSession) {
        if session.try_start() {
            info!("session {} started, {} moves first", session.id(), session.player1());
        }
    }

    fn session_view(&self, session: &GameSession, side: Side) -> SessionView {
        let summary = |player: &PlayerId| PlayerSummary {
            id: player.clone(),
            name: self.names.name_or_unknown(player),
        };
        SessionView {
            id: session.id(),
            status: session.status().clone(),
            player1: summary(session.player1()),
            player2: session.player2().map(summary),
            your_board: BoardView::owner(session.board(side)),
            opponent_board: BoardView::opponent(session.board(side.opponent())),
            your_fleet: session.fleet(side).clone(),
        }
    }
}

fn game_ready(session: &GameSession) -> bool {
    *session.status() != Status::Pending
}
