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

//! Fixtures shared by the unit tests.
use crate::{
    board::{Coordinate, Orientation},
    placement::Placement,
    session::{GameSession, PlayerId, SessionId, Side},
    ships::Ship,
};

/// Every ship laid out horizontally from column 0, on rows 0, 2, 4, 6 and 8.
pub(crate) fn standard_layout() -> Vec<Placement> {
    Ship::ALL
        .iter()
        .enumerate()
        .map(|(i, ship)| Placement::new(ship.name(), 0, i * 2, Orientation::Horizontal))
        .collect()
}

/// The cells covered by [`standard_layout`].
pub(crate) fn ship_cells() -> impl Iterator<Item = Coordinate> {
    Ship::ALL
        .iter()
        .enumerate()
        .flat_map(|(i, ship)| (0..ship.len()).map(move |x| Coordinate::new(x, i * 2)))
}

/// A session between alice and bob with both fleets on [`standard_layout`], alice to
/// move.
pub(crate) fn active_session() -> GameSession {
    let mut session = GameSession::new(SessionId::from(1), PlayerId::from("alice"));
    session.join(PlayerId::from("bob")).unwrap();
    session.place(Side::First, &standard_layout());
    session.place(Side::Second, &standard_layout());
    assert!(session.try_start());
    session
}
