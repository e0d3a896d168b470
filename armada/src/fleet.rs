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

//! Per-player ship records.
use crate::{board::Coordinate, ships::Ship};

/// Placement record of a single ship in a player's fleet.
#[derive(Debug, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShipState {
    /// Catalog ship this record tracks.
    ship: Ship,

    /// Cells covered by the ship, if it has been placed.
    placement: Option<Vec<Coordinate>>,
}

impl ShipState {
    fn new(ship: Ship) -> Self {
        Self {
            ship,
            placement: None,
        }
    }

    /// Get the catalog ship for this record.
    pub fn ship(&self) -> Ship {
        self.ship
    }

    /// Get the catalog name of the ship.
    pub fn name(&self) -> &'static str {
        self.ship.name()
    }

    /// Get the length of the ship.
    pub fn size(&self) -> usize {
        self.ship.len()
    }

    /// Returns true if this ship has been placed.
    pub fn placed(&self) -> bool {
        self.placement.is_some()
    }

    /// The cells this ship occupies, in placement order. Empty until placed.
    pub fn coordinates(&self) -> &[Coordinate] {
        self.placement.as_deref().unwrap_or(&[])
    }

    pub(crate) fn place(&mut self, cells: Vec<Coordinate>) {
        self.placement = Some(cells);
    }
}

/// The five ship records belonging to one player, in catalog order.
#[derive(Debug, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Fleet {
    ships: Vec<ShipState>,
}

impl Fleet {
    /// Construct a fleet holding one unplaced record per catalog ship.
    pub fn new() -> Self {
        Self {
            ships: Ship::ALL.iter().copied().map(ShipState::new).collect(),
        }
    }

    /// Checks if every ship of the fleet has been placed.
    pub fn all_placed(&self) -> bool {
        self.ships.iter().all(ShipState::placed)
    }

    /// Get the record for the given ship.
    pub fn get(&self, ship: Ship) -> Option<&ShipState> {
        self.ships.iter().find(|state| state.ship == ship)
    }

    pub(crate) fn get_mut(&mut self, ship: Ship) -> Option<&mut ShipState> {
        self.ships.iter_mut().find(|state| state.ship == ship)
    }

    /// Iterate all ship records.
    pub fn iter(&self) -> impl Iterator<Item = &ShipState> {
        self.ships.iter()
    }

    /// Get an iterator over the ships which still need to be placed.
    pub fn pending(&self) -> impl Iterator<Item = Ship> + '_ {
        self.ships
            .iter()
            .filter(|state| !state.placed())
            .map(ShipState::ship)
    }
}

impl Default for Fleet {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_fleet_lists_every_ship_unplaced() {
        let fleet = Fleet::new();
        assert!(!fleet.all_placed());
        assert_eq!(fleet.pending().collect::<Vec<_>>(), Ship::ALL);
        for state in fleet.iter() {
            assert!(state.coordinates().is_empty());
        }
    }

    #[test]
    fn fleet_is_complete_once_each_ship_is_placed() {
        let mut fleet = Fleet::new();
        for (row, &ship) in Ship::ALL.iter().enumerate() {
            let cells = (0..ship.len()).map(|x| Coordinate::new(x, row)).collect();
            fleet.get_mut(ship).unwrap().place(cells);
        }
        assert!(fleet.all_placed());
        assert_eq!(fleet.pending().count(), 0);
        assert_eq!(fleet.get(Ship::Destroyer).unwrap().coordinates().len(), 2);
    }
}
